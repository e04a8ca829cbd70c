//! Turns key sequences into keymap rewrites, actions and terminators

use super::action::{ActionTable, State, Subaction};
use crate::charset;
use crate::keymap::{KeyMapSet, KeyResult};
use crate::literal::{LiteralId, LiteralRegistry};
use crate::types::{LayoutError, Modifiers, Result, ShiftState};

/// One keystroke of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub mods: Modifiers,
    pub literal: LiteralId,
}

/// Splits one mapping-file token into keys.
///
/// Each key is any number of `O-`/`C-` prefixes followed by either a
/// bracketed character name or the longest registered literal.
pub fn parse_keys(literals: &LiteralRegistry, token: &str) -> Result<Vec<Key>> {
    let mut keys = Vec::new();
    let mut rest = token;

    while !rest.is_empty() {
        let mut mods = Modifiers::NONE;
        loop {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some('O'), Some('-')) => mods = mods | Modifiers::OPTION,
                (Some('C'), Some('-')) => mods = mods | Modifiers::CONTROL,
                _ => break,
            }
            rest = &rest[2..];
        }

        if rest.is_empty() {
            return Err(LayoutError::TruncatedKeyList);
        }

        let escape = rest
            .strip_prefix('[')
            .and_then(|inner| inner.find(']').map(|close| (&inner[..close], &inner[close + 1..])));

        let literal = match escape {
            Some((name, after)) => {
                let ch = charset::lookup_char(name)
                    .ok_or_else(|| LayoutError::UnknownCharacterName(name.to_string()))?;
                let id = literals
                    .lookup(ch.encode_utf8(&mut [0; 4]))
                    .ok_or_else(|| LayoutError::UnknownCharacter(name.to_string()))?;
                rest = after;
                id
            }
            None => literals
                .lookup_prefix(&mut rest)
                .ok_or_else(|| LayoutError::UnknownCharacter(rest.to_string()))?,
        };

        keys.push(Key { mods, literal });
    }

    Ok(keys)
}

/// Compiles sequences into the keymaps and action table of one keyboard
pub struct SequenceCompiler<'a> {
    pub literals: &'a LiteralRegistry,
    pub base_keymaps: &'a mut KeyMapSet,
    pub control_keymaps: &'a mut KeyMapSet,
    pub actions: &'a mut ActionTable,
    pub active_capslock: bool,
}

impl SequenceCompiler<'_> {
    fn keymaps(&mut self, mods: Modifiers) -> &mut KeyMapSet {
        if mods.has_control() {
            &mut *self.control_keymaps
        } else {
            &mut *self.base_keymaps
        }
    }

    /// Makes `keys`, typed in order, produce `raw_output`
    pub fn compile(&mut self, keys: &[Key], raw_output: &str) -> Result<()> {
        let output = charset::resolve_escapes(raw_output)?;
        let literals = self.literals;

        let mut previous = State::None;
        // Unmodified text typed since the last modified key
        let mut incremental: Option<String> = None;

        for (pos, key) in keys.iter().enumerate() {
            let literal = literals.get(key.literal);
            let name = format!("{}{}", key.mods.action_prefix(), literal.name);
            let is_last = pos + 1 == keys.len();

            incremental = if key.mods.is_empty() {
                Some(incremental.unwrap_or_default() + &literal.output)
            } else {
                None
            };

            let mut rewrite = None;
            if keys.len() == 1 {
                if self.actions.contains(&name) {
                    self.actions
                        .handle_state(&name, State::None, Subaction::Output(output.clone()));
                } else {
                    rewrite = Some(KeyResult::Output(output.clone()));
                }
            } else {
                if !self.actions.contains(&name) {
                    let base = self.base_output(*key, &name)?;
                    self.actions.create(&name, base);
                    rewrite = Some(KeyResult::Action(name.clone()));
                }

                if is_last {
                    self.actions
                        .handle_state(&name, previous.clone(), Subaction::Output(output.clone()));
                } else {
                    let next = previous.advance(&name);
                    let current = std::mem::replace(&mut previous, State::Path(next.clone()));
                    self.actions.handle_state(&name, current, Subaction::Advance);
                    if let Some(text) = &incremental {
                        self.actions.set_terminator(next, text.clone());
                    }
                }
            }

            if let Some(result) = rewrite {
                self.rewrite_points(*key, result)?;
            }
        }

        log::trace!("Compiled sequence of {} key(s) to `{}'", keys.len(), output);
        Ok(())
    }

    /// What the key produced on its own before it became an action
    fn base_output(&mut self, key: Key, name: &str) -> Result<String> {
        let missing = || LayoutError::MissingBaseOutput(name.to_string());
        let literals = self.literals;
        let point = literals.get(key.literal).primary_point().ok_or_else(missing)?;

        match self.keymaps(key.mods).result(key.mods, point.shift_state, point.code)? {
            KeyResult::Output(text) => Ok(text.clone()),
            _ => Err(missing()),
        }
    }

    fn rewrite_points(&mut self, key: Key, result: KeyResult) -> Result<()> {
        let literals = self.literals;
        let literal = literals.get(key.literal);
        let active_capslock = self.active_capslock;
        let keymaps = self.keymaps(key.mods);

        for point in &literal.points {
            // Modified capslock slots only matter when capslock changes the literal
            if !key.mods.is_empty() && point.shift_state == ShiftState::Capslock && !active_capslock {
                continue;
            }
            keymaps.set_result(key.mods, point.shift_state, point.code, result.clone())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeyCode;

    fn registry(texts: &[&str]) -> LiteralRegistry {
        let mut literals = LiteralRegistry::new();
        for (code, text) in texts.iter().enumerate() {
            let (id, _) = literals.intern(text);
            literals.add_point(id, ShiftState::Shiftless, KeyCode::new(code as u64).unwrap());
        }
        literals
    }

    #[test]
    fn test_parse_plain_keys() {
        let literals = registry(&["a", "ae", "b"]);
        let keys = parse_keys(&literals, "aeb").unwrap();
        let ids: Vec<LiteralId> = keys.iter().map(|k| k.literal).collect();
        assert_eq!(ids, vec![literals.lookup("ae").unwrap(), literals.lookup("b").unwrap()]);
        assert!(keys.iter().all(|k| k.mods.is_empty()));
    }

    #[test]
    fn test_parse_modifier_prefixes() {
        let literals = registry(&["e", "C"]);
        let keys = parse_keys(&literals, "O-eC-O-eC").unwrap();
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[0].mods, Modifiers::OPTION);
        assert_eq!(keys[1].mods, Modifiers::CONTROL | Modifiers::OPTION);
        assert_eq!(keys[2].mods, Modifiers::NONE);
        assert_eq!(keys[2].literal, literals.lookup("C").unwrap());
    }

    #[test]
    fn test_parse_escaped_key() {
        let literals = registry(&[" ", "["]);
        let keys = parse_keys(&literals, "O-[SPC]").unwrap();
        assert_eq!(keys[0].literal, literals.lookup(" ").unwrap());
        assert_eq!(keys[0].mods, Modifiers::OPTION);

        // No closing bracket: the bracket itself is the literal
        let keys = parse_keys(&literals, "[").unwrap();
        assert_eq!(keys[0].literal, literals.lookup("[").unwrap());
    }

    #[test]
    fn test_parse_errors() {
        let literals = registry(&["a"]);
        assert!(matches!(parse_keys(&literals, "O-"), Err(LayoutError::TruncatedKeyList)));
        assert!(matches!(parse_keys(&literals, "aC-O-"), Err(LayoutError::TruncatedKeyList)));
        assert!(matches!(
            parse_keys(&literals, "[NOPE]"),
            Err(LayoutError::UnknownCharacterName(ref n)) if n == "NOPE"
        ));
        assert!(matches!(
            parse_keys(&literals, "[TAB]"),
            Err(LayoutError::UnknownCharacter(ref n)) if n == "TAB"
        ));
        assert!(matches!(
            parse_keys(&literals, "az"),
            Err(LayoutError::UnknownCharacter(ref n)) if n == "z"
        ));
    }
}
