//! Actions, state paths and terminators

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A non-empty chain of action names reached by a partial sequence
///
/// Paths order bytewise by their dotted form, so `C.x` sorts after `C-a`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatePath(Vec<String>);

impl StatePath {
    pub fn new(first: impl Into<String>) -> Self {
        StatePath(vec![first.into()])
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    fn dotted_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().enumerate().flat_map(|(idx, component)| {
            let separator = if idx > 0 { Some(b'.') } else { None };
            separator.into_iter().chain(component.bytes())
        })
    }
}

impl Ord for StatePath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dotted_bytes()
            .cmp(other.dotted_bytes())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for StatePath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for StatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Sequence state an action is evaluated in
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    /// No sequence in progress
    None,
    Path(StatePath),
}

impl State {
    /// The state entered from `self` by pressing the key of `action`
    pub fn advance(&self, action: &str) -> StatePath {
        match self {
            State::None => StatePath::new(action),
            State::Path(path) => {
                let mut components = path.0.clone();
                components.push(action.to_string());
                StatePath(components)
            }
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::None => write!(f, "none"),
            State::Path(path) => path.fmt(f),
        }
    }
}

/// Effect of an action in one state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subaction {
    Output(String),
    /// Enter `state.advance(action)`
    Advance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    name: String,
    subactions: BTreeMap<State, Subaction>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subactions: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subaction(&self, state: &State) -> Option<&Subaction> {
        self.subactions.get(state)
    }

    /// Subactions with `none` first, then paths in order
    pub fn subactions(&self) -> impl Iterator<Item = (&State, &Subaction)> {
        self.subactions.iter()
    }

    /// Where `Advance` in `state` leads
    pub fn target(&self, state: &State) -> StatePath {
        state.advance(&self.name)
    }
}

/// Every action of a keyboard together with its terminators
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    actions: BTreeMap<String, Action>,
    terminators: BTreeMap<StatePath, String>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Creates the action with its `none` output
    pub fn create(&mut self, name: &str, none_output: String) {
        log::trace!("New action `{}' (none -> `{}')", name, none_output);
        let mut action = Action::new(name);
        action.subactions.insert(State::None, Subaction::Output(none_output));
        self.actions.insert(name.to_string(), action);
    }

    /// Records `subaction` for `action` in `state`.
    ///
    /// A different kind of subaction already in place is never lost: the text
    /// involved becomes the terminator of the advanced state.
    pub fn handle_state(&mut self, name: &str, state: State, subaction: Subaction) {
        let action = self
            .actions
            .entry(name.to_string())
            .or_insert_with(|| Action::new(name));
        let target = action.target(&state);

        let Some(existing) = action.subactions.get_mut(&state) else {
            action.subactions.insert(state, subaction);
            return;
        };

        match subaction {
            Subaction::Output(text) => match existing {
                Subaction::Output(_) => *existing = Subaction::Output(text),
                Subaction::Advance => {
                    log::debug!("Action `{}' in state {}: output becomes terminator of {}", name, state, target);
                    self.terminators.insert(target, text);
                }
            },
            Subaction::Advance => {
                if let Subaction::Output(old) = existing {
                    log::debug!("Action `{}' in state {}: promoting output `{}' to terminator", name, state, old);
                    let old = std::mem::take(old);
                    *existing = Subaction::Advance;
                    self.terminators.insert(target, old);
                }
            }
        }
    }

    pub fn set_terminator(&mut self, state: StatePath, output: String) {
        self.terminators.insert(state, output);
    }

    pub fn terminator(&self, state: &StatePath) -> Option<&str> {
        self.terminators.get(state).map(String::as_str)
    }

    /// Actions sorted by name
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    pub fn terminators(&self) -> impl Iterator<Item = (&StatePath, &str)> {
        self.terminators.iter().map(|(state, output)| (state, output.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
