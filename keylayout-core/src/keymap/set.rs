use super::map::{KeyMap, KeyResult};
use super::subset::KeyMapSubset;
use crate::types::{KeyCode, LayoutError, Modifiers, Result, ShiftState};

/// The keymaps reached with or without control held.
///
/// The plain subset is loaded from the base encoding and then frozen into a
/// backup; the option subset appears on first use, seeded from that backup.
#[derive(Debug, Clone)]
pub struct KeyMapSet {
    control: bool,
    capslock_disables: bool,
    active_capslock: bool,
    plain: KeyMapSubset,
    option: Option<KeyMapSubset>,
    backup: Option<KeyMapSubset>,
    dirty: bool,
}

impl KeyMapSet {
    pub fn new(control: bool, capslock_disables: bool) -> Self {
        Self {
            control,
            capslock_disables,
            active_capslock: false,
            plain: KeyMapSubset::new(control, capslock_disables),
            option: None,
            backup: None,
            dirty: false,
        }
    }

    pub fn is_control(&self) -> bool {
        self.control
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn plain(&self) -> &KeyMapSubset {
        &self.plain
    }

    pub fn option(&self) -> Option<&KeyMapSubset> {
        self.option.as_ref()
    }

    pub fn backup(&self) -> Option<&KeyMapSubset> {
        self.backup.as_ref()
    }

    fn result_mut(&mut self, mods: Modifiers, shift_state: ShiftState, code: KeyCode) -> Result<&mut KeyResult> {
        if mods.has_option() && self.option.is_none() {
            let seed = self.backup.as_ref().ok_or(LayoutError::MissingBackup)?.snapshot();
            log::debug!("Creating option keymaps (control: {})", self.control);
            self.option = Some(seed);
        }

        let backup = self.backup.as_ref().map(KeyMapSubset::shiftless);
        let subset = match &mut self.option {
            Some(option) if mods.has_option() => option,
            _ => &mut self.plain,
        };
        subset.result_mut(shift_state, code, backup)
    }

    /// Current result for a slot; may create the option subset or split off
    /// shift variants
    pub fn result(&mut self, mods: Modifiers, shift_state: ShiftState, code: KeyCode) -> Result<&KeyResult> {
        self.result_mut(mods, shift_state, code).map(|result| &*result)
    }

    pub fn set_result(
        &mut self,
        mods: Modifiers,
        shift_state: ShiftState,
        code: KeyCode,
        result: KeyResult,
    ) -> Result<()> {
        *self.result_mut(mods, shift_state, code)? = result;
        self.dirty = true;
        Ok(())
    }

    /// Freezes the plain subset; later writes mark the set dirty
    pub fn make_backup(&mut self) {
        if self.option.is_some() {
            log::warn!("Backup taken after option keymaps were created");
        }
        self.backup = Some(self.plain.snapshot());
        self.dirty = false;
    }

    pub fn set_capslock_active(&mut self) -> Result<()> {
        if self.capslock_disables {
            return Err(LayoutError::CapslockDisabled);
        }
        self.active_capslock = true;
        self.plain.set_capslock_active()?;
        if let Some(option) = &mut self.option {
            option.set_capslock_active()?;
        }
        Ok(())
    }

    pub fn is_capslock_active(&self) -> bool {
        self.active_capslock
    }

    pub fn maybe_unshift(&mut self) {
        self.plain.maybe_unshift();
        if let Some(option) = &mut self.option {
            option.maybe_unshift();
        }
    }

    /// Whether the frozen backup is emitted as the capslock layer
    fn emits_backup(&self) -> bool {
        self.capslock_disables && self.dirty
    }

    /// Assigns selectors and indices to every surviving map, continuing from
    /// `index`
    pub fn assign_modifiers(&mut self, index: &mut usize) {
        let quiet_capslock = self.capslock_disables && !self.dirty;
        let emits_backup = self.emits_backup();

        let required = if self.control { " control" } else { "" };
        let permitted = match (self.option.is_some(), quiet_capslock) {
            (true, true) => " caps?",
            (true, false) => "",
            (false, true) => " anyOption? caps?",
            (false, false) => " anyOption?",
        };
        self.plain.assign_modifiers(required, permitted, index);

        if let Some(option) = &mut self.option {
            let required = if self.control { " control anyOption" } else { " anyOption" };
            let permitted = if quiet_capslock { " caps?" } else { "" };
            option.assign_modifiers(required, permitted, index);
        }

        if emits_backup {
            if let Some(backup) = &mut self.backup {
                let required = if self.control { " caps control" } else { " caps" };
                backup.assign_modifiers(required, " anyOption?", index);
            }
        }
    }

    /// Surviving maps in index order
    pub fn maps(&self) -> Vec<&KeyMap> {
        let mut maps = self.plain.maps();
        if let Some(option) = &self.option {
            maps.extend(option.maps());
        }
        if self.emits_backup() {
            if let Some(backup) = &self.backup {
                maps.extend(backup.maps());
            }
        }
        maps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn code(n: u64) -> KeyCode {
        KeyCode::new(n).unwrap()
    }

    fn output(text: &str) -> KeyResult {
        KeyResult::Output(text.to_string())
    }

    fn loaded_set(control: bool, capslock_disables: bool) -> KeyMapSet {
        let mut set = KeyMapSet::new(control, capslock_disables);
        set.set_result(Modifiers::NONE, ShiftState::Shiftless, code(0), output("a"))
            .unwrap();
        if !control {
            set.set_result(Modifiers::NONE, ShiftState::Shifty, code(0), output("A"))
                .unwrap();
        }
        set.make_backup();
        set
    }

    #[test]
    fn test_backup_resets_dirty() {
        let mut set = KeyMapSet::new(false, false);
        set.set_result(Modifiers::NONE, ShiftState::Shiftless, code(0), output("a"))
            .unwrap();
        assert!(set.is_dirty());
        set.make_backup();
        assert!(!set.is_dirty());
    }

    #[test]
    fn test_option_subset_requires_backup() {
        let mut set = KeyMapSet::new(false, false);
        let err = set.result(Modifiers::OPTION, ShiftState::Shiftless, code(0)).unwrap_err();
        assert!(matches!(err, LayoutError::MissingBackup));
    }

    #[test]
    fn test_option_subset_seeded_from_backup() {
        let mut set = loaded_set(false, false);
        set.set_result(Modifiers::NONE, ShiftState::Shiftless, code(0), output("x"))
            .unwrap();

        let seeded = set.result(Modifiers::OPTION, ShiftState::Shiftless, code(0)).unwrap();
        assert_eq!(seeded, &output("a"));

        set.set_result(Modifiers::OPTION, ShiftState::Shiftless, code(0), output("å"))
            .unwrap();
        let backup = set.backup().unwrap();
        assert_eq!(backup.shiftless().result(code(0)), &output("a"));
        assert_eq!(set.plain().shiftless().result(code(0)), &output("x"));
    }

    #[test]
    fn test_reads_do_not_dirty() {
        let mut set = loaded_set(false, false);
        set.result(Modifiers::OPTION, ShiftState::Shifty, code(0)).unwrap();
        assert!(!set.is_dirty());
        assert!(set.option().is_some());
    }

    #[test]
    fn test_capslock_active_rejected_when_disabled() {
        let mut set = KeyMapSet::new(false, true);
        assert!(matches!(set.set_capslock_active(), Err(LayoutError::CapslockDisabled)));
    }

    #[test]
    fn test_plain_selectors_and_indices() {
        let mut set = loaded_set(false, false);
        let mut index = 0;
        set.assign_modifiers(&mut index);

        let selectors: Vec<Vec<String>> = set.maps().iter().map(|m| m.selectors().to_vec()).collect();
        assert_eq!(
            selectors,
            vec![
                vec!["anyOption?".to_string(), "command anyOption? anyShift? caps?".to_string()],
                vec!["anyShift anyOption? caps?".to_string()],
                vec!["caps anyOption?".to_string()],
            ]
        );
        let indices: Vec<Option<usize>> = set.maps().iter().map(|m| m.index()).collect();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2)]);
        assert_eq!(index, 3);
    }

    #[test]
    fn test_control_option_selectors() {
        let mut set = loaded_set(true, false);
        set.set_result(Modifiers::OPTION, ShiftState::Shiftless, code(0), output("x"))
            .unwrap();
        let mut index = 5;
        set.assign_modifiers(&mut index);

        let selectors: Vec<Vec<String>> = set.maps().iter().map(|m| m.selectors().to_vec()).collect();
        assert_eq!(
            selectors,
            vec![
                vec!["control command? anyShift? caps?".to_string()],
                vec!["control anyOption command? anyShift? caps?".to_string()],
            ]
        );
        assert_eq!(index, 7);
    }

    #[test]
    fn test_clean_set_with_capslock_disabled() {
        let mut set = loaded_set(false, true);
        let mut index = 0;
        set.assign_modifiers(&mut index);

        assert_eq!(set.maps().len(), 2);
        assert_eq!(set.maps()[0].selectors()[0], "anyOption? caps?");
    }

    #[test]
    fn test_dirty_set_with_capslock_disabled_emits_backup() {
        let mut set = loaded_set(false, true);
        set.set_result(Modifiers::NONE, ShiftState::Shiftless, code(0), output("´"))
            .unwrap();
        let mut index = 0;
        set.assign_modifiers(&mut index);

        let maps = set.maps();
        assert_eq!(maps.len(), 4);
        assert_eq!(maps[0].selectors()[0], "anyOption?");
        assert_eq!(maps[2].selectors()[0], "caps anyOption?");
        assert_eq!(maps[2].result(code(0)), &output("a"));
        assert_eq!(maps[3].selectors()[0], "caps anyShift anyOption?");
        assert_eq!(index, 4);
    }
}
