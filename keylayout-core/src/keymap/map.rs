use crate::types::{KeyCode, KEY_CODE_COUNT};

/// What a physical key does in one keymap
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyResult {
    #[default]
    None,
    Output(String),
    Action(String),
}

impl KeyResult {
    pub fn is_none(&self) -> bool {
        matches!(self, KeyResult::None)
    }
}

/// A table of results for every key code, plus the modifier selectors and
/// index assigned by the finishing pass
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    results: [KeyResult; KEY_CODE_COUNT],
    selectors: Vec<String>,
    index: Option<usize>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            results: std::array::from_fn(|_| KeyResult::None),
            selectors: Vec::new(),
            index: None,
        }
    }

    /// Copies the results only; selectors and index start empty
    pub fn duplicate(&self) -> Self {
        Self {
            results: self.results.clone(),
            selectors: Vec::new(),
            index: None,
        }
    }

    pub fn result(&self, code: KeyCode) -> &KeyResult {
        &self.results[code.index()]
    }

    pub fn result_mut(&mut self, code: KeyCode) -> &mut KeyResult {
        &mut self.results[code.index()]
    }

    /// Non-empty results in code order
    pub fn results(&self) -> impl Iterator<Item = (usize, &KeyResult)> {
        self.results
            .iter()
            .enumerate()
            .filter(|(_, result)| !result.is_none())
    }

    /// Structural equality where an empty slot on either side matches anything
    pub fn matches(&self, other: &KeyMap) -> bool {
        self.results
            .iter()
            .zip(other.results.iter())
            .all(|(lhs, rhs)| lhs.is_none() || rhs.is_none() || lhs == rhs)
    }

    /// Appends a selector built from space-separated modifier words
    pub fn add_selector(&mut self, parts: &[&str]) {
        let words: Vec<&str> = parts.iter().flat_map(|part| part.split_whitespace()).collect();
        self.selectors.push(words.join(" "));
    }

    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    pub fn assign_index(&mut self, next: &mut usize) {
        self.index = Some(*next);
        *next += 1;
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(n: u64) -> KeyCode {
        KeyCode::new(n).unwrap()
    }

    #[test]
    fn test_new_map_is_empty() {
        let map = KeyMap::new();
        assert_eq!(map.results().count(), 0);
        assert_eq!(map.index(), None);
        assert!(map.selectors().is_empty());
    }

    #[test]
    fn test_none_is_a_wildcard() {
        let mut lhs = KeyMap::new();
        let mut rhs = KeyMap::new();
        *lhs.result_mut(code(0)) = KeyResult::Output("a".into());
        *rhs.result_mut(code(1)) = KeyResult::Output("b".into());
        assert!(lhs.matches(&rhs));

        *rhs.result_mut(code(0)) = KeyResult::Action("a".into());
        assert!(!lhs.matches(&rhs));
    }

    #[test]
    fn test_duplicate_drops_assignment() {
        let mut map = KeyMap::new();
        *map.result_mut(code(3)) = KeyResult::Output("f".into());
        map.add_selector(&[" control", "", " anyOption?"]);
        let mut index = 4;
        map.assign_index(&mut index);
        assert_eq!(index, 5);

        let copy = map.duplicate();
        assert_eq!(copy.result(code(3)), &KeyResult::Output("f".into()));
        assert_eq!(copy.index(), None);
        assert!(copy.selectors().is_empty());
        assert_eq!(map.selectors(), ["control anyOption?"]);
    }

    #[test]
    fn test_empty_selector() {
        let mut map = KeyMap::new();
        map.add_selector(&["", "", "", ""]);
        assert_eq!(map.selectors(), [""]);
    }
}
