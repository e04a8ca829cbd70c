//! Ordered prefix trie over characters
//!
//! Children are kept sorted by character and found by binary search; the
//! alphabets involved are small and lookups far outnumber insertions.

#[derive(Debug, Clone)]
struct Node<V> {
    value: Option<V>,
    children: Vec<(char, Node<V>)>,
}

impl<V> Node<V> {
    fn new() -> Self {
        Self {
            value: None,
            children: Vec::new(),
        }
    }

    fn child(&self, ch: char) -> Option<&Node<V>> {
        self.children
            .binary_search_by_key(&ch, |(key, _)| *key)
            .ok()
            .map(|idx| &self.children[idx].1)
    }

    fn child_or_insert(&mut self, ch: char) -> &mut Node<V> {
        let idx = match self.children.binary_search_by_key(&ch, |(key, _)| *key) {
            Ok(idx) => idx,
            Err(idx) => {
                self.children.insert(idx, (ch, Node::new()));
                idx
            }
        };
        &mut self.children[idx].1
    }
}

#[derive(Debug, Clone)]
pub struct PrefixTrie<V> {
    root: Node<V>,
}

impl<V> Default for PrefixTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PrefixTrie<V> {
    pub fn new() -> Self {
        Self { root: Node::new() }
    }

    /// Returns the slot for `key`, creating the path to it if needed.
    ///
    /// The empty key addresses the root; `longest_prefix` never reports it.
    pub fn entry(&mut self, key: &str) -> &mut Option<V> {
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.child_or_insert(ch);
        }
        &mut node.value
    }

    /// Exact lookup
    pub fn get(&self, key: &str) -> Option<&V> {
        let mut node = &self.root;
        for ch in key.chars() {
            node = node.child(ch)?;
        }
        node.value.as_ref()
    }

    /// Finds the longest non-empty key that prefixes `cursor`.
    ///
    /// On a match the cursor is advanced past the key; otherwise it is left
    /// untouched.
    pub fn longest_prefix(&self, cursor: &mut &str) -> Option<&V> {
        let input = *cursor;
        let mut node = &self.root;
        let mut best = None;

        for (idx, ch) in input.char_indices() {
            match node.child(ch) {
                Some(child) => {
                    node = child;
                    if let Some(value) = &node.value {
                        best = Some((idx + ch.len_utf8(), value));
                    }
                }
                None => break,
            }
        }

        let (len, value) = best?;
        *cursor = &input[len..];
        Some(value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut trie = PrefixTrie::new();
        for (idx, key) in ["a", "ab", "b", "´", "abc", "ß"].iter().enumerate() {
            *trie.entry(key) = Some(idx);
        }

        assert_eq!(trie.get("a"), Some(&0));
        assert_eq!(trie.get("ab"), Some(&1));
        assert_eq!(trie.get("b"), Some(&2));
        assert_eq!(trie.get("´"), Some(&3));
        assert_eq!(trie.get("abc"), Some(&4));
        assert_eq!(trie.get("ß"), Some(&5));
        assert_eq!(trie.get("abcd"), None);
        assert_eq!(trie.get("c"), None);
    }

    #[test]
    fn test_intermediate_nodes_have_no_value() {
        let mut trie = PrefixTrie::new();
        *trie.entry("xyz") = Some(1);
        assert_eq!(trie.get("x"), None);
        assert_eq!(trie.get("xy"), None);
        assert!(trie.contains("xyz"));
    }

    #[test]
    fn test_entry_returns_existing_slot() {
        let mut trie = PrefixTrie::new();
        *trie.entry("k") = Some(1);
        let slot = trie.entry("k");
        assert_eq!(*slot, Some(1));
        *slot = Some(2);
        assert_eq!(trie.get("k"), Some(&2));
    }

    #[test]
    fn test_children_stay_sorted() {
        let mut trie = PrefixTrie::new();
        for key in ["m", "c", "x", "a", "q"] {
            *trie.entry(key) = Some(key.to_string());
        }
        let keys: Vec<char> = trie.root.children.iter().map(|(ch, _)| *ch).collect();
        assert_eq!(keys, vec!['a', 'c', 'm', 'q', 'x']);
    }

    #[test]
    fn test_longest_prefix_prefers_longer_key() {
        let mut trie = PrefixTrie::new();
        *trie.entry("a") = Some(1);
        *trie.entry("ab") = Some(2);

        let mut cursor = "abc";
        assert_eq!(trie.longest_prefix(&mut cursor), Some(&2));
        assert_eq!(cursor, "c");
    }

    #[test]
    fn test_longest_prefix_falls_back() {
        let mut trie = PrefixTrie::new();
        *trie.entry("a") = Some(1);
        *trie.entry("abcd") = Some(4);

        let mut cursor = "ac";
        assert_eq!(trie.longest_prefix(&mut cursor), Some(&1));
        assert_eq!(cursor, "c");

        // Deeper path exists but is not bound at "abc"
        let mut cursor = "abcx";
        assert_eq!(trie.longest_prefix(&mut cursor), Some(&1));
        assert_eq!(cursor, "bcx");
    }

    #[test]
    fn test_longest_prefix_no_match_leaves_cursor() {
        let mut trie = PrefixTrie::new();
        *trie.entry("ab") = Some(2);

        let mut cursor = "zz";
        assert_eq!(trie.longest_prefix(&mut cursor), None);
        assert_eq!(cursor, "zz");

        // A path without any bound value is not a match either
        let mut cursor = "ax";
        assert_eq!(trie.longest_prefix(&mut cursor), None);
        assert_eq!(cursor, "ax");
    }

    #[test]
    fn test_longest_prefix_multibyte() {
        let mut trie = PrefixTrie::new();
        *trie.entry("´") = Some('´');
        *trie.entry("´e") = Some('é');

        let mut cursor = "´ex";
        assert_eq!(trie.longest_prefix(&mut cursor), Some(&'é'));
        assert_eq!(cursor, "x");
    }
}
