//! Literal registry: canonical token text to literal descriptors

use crate::charset;
use crate::trie::PrefixTrie;
use crate::types::{KeyCode, LayoutError, Result, ShiftState};

/// Stable handle to a literal owned by a `LiteralRegistry`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LiteralId(usize);

/// A place in the base encoding where a literal is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub shift_state: ShiftState,
    pub code: KeyCode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// Escaped form used in action names
    pub name: String,
    /// Text produced when the literal is typed
    pub output: String,
    /// Positions in base-encoding order
    pub points: Vec<Point>,
}

impl Literal {
    fn new(text: &str) -> Self {
        Self {
            name: charset::literal_name(text),
            output: text.to_string(),
            points: Vec::new(),
        }
    }

    /// First position not on the capslock layer
    pub fn primary_point(&self) -> Option<Point> {
        self.points
            .iter()
            .copied()
            .find(|point| point.shift_state != ShiftState::Capslock)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LiteralRegistry {
    trie: PrefixTrie<LiteralId>,
    literals: Vec<Literal>,
}

impl LiteralRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new literal; fails if `text` is already registered
    pub fn register(&mut self, text: &str) -> Result<LiteralId> {
        match self.intern(text) {
            (id, true) => Ok(id),
            (_, false) => Err(LayoutError::DuplicateLiteral(text.to_string())),
        }
    }

    /// Returns the literal for `text`, registering it on first sight.
    ///
    /// The flag is true when the literal was created by this call.
    pub fn intern(&mut self, text: &str) -> (LiteralId, bool) {
        let slot = self.trie.entry(text);
        if let Some(id) = slot {
            return (*id, false);
        }

        let id = LiteralId(self.literals.len());
        *slot = Some(id);
        self.literals.push(Literal::new(text));
        (id, true)
    }

    pub fn add_point(&mut self, id: LiteralId, shift_state: ShiftState, code: KeyCode) {
        self.literals[id.0].points.push(Point { shift_state, code });
    }

    pub fn get(&self, id: LiteralId) -> &Literal {
        &self.literals[id.0]
    }

    /// Exact lookup of resolved text
    pub fn lookup(&self, text: &str) -> Option<LiteralId> {
        self.trie.get(text).copied()
    }

    /// Longest registered literal at the start of `cursor`, advancing past it
    pub fn lookup_prefix(&self, cursor: &mut &str) -> Option<LiteralId> {
        self.trie.longest_prefix(cursor).copied()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LiteralId, &Literal)> {
        self.literals
            .iter()
            .enumerate()
            .map(|(idx, literal)| (LiteralId(idx), literal))
    }
}
