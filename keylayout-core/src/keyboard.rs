//! Compilation of one keyboard: base encoding, mappings and the finishing pass

use crate::charset;
use crate::keymap::{KeyMap, KeyMapSet, KeyResult};
use crate::literal::{LiteralId, LiteralRegistry};
use crate::sequence::{parse_keys, ActionTable, Key, SequenceCompiler};
use crate::types::{BaseRow, CapslockPolicy, LayoutError, MappingRow, Modifiers, Result, ResultExt, ShiftState};

/// A keyboard being compiled
#[derive(Debug, Clone)]
pub struct Keyboard {
    policy: CapslockPolicy,
    active_capslock: bool,
    literals: LiteralRegistry,
    base_keymaps: KeyMapSet,
    control_keymaps: KeyMapSet,
    actions: ActionTable,
}

impl Keyboard {
    pub fn new(policy: CapslockPolicy) -> Self {
        let disables = policy.disables();
        Self {
            policy,
            active_capslock: false,
            literals: LiteralRegistry::new(),
            base_keymaps: KeyMapSet::new(false, disables),
            control_keymaps: KeyMapSet::new(true, disables),
            actions: ActionTable::new(),
        }
    }

    pub fn capslock_policy(&self) -> CapslockPolicy {
        self.policy
    }

    pub fn is_capslock_active(&self) -> bool {
        self.active_capslock
    }

    pub fn literals(&self) -> &LiteralRegistry {
        &self.literals
    }

    pub fn base_keymaps(&self) -> &KeyMapSet {
        &self.base_keymaps
    }

    pub fn control_keymaps(&self) -> &KeyMapSet {
        &self.control_keymaps
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    fn set_capslock_active(&mut self) -> Result<()> {
        if self.policy.disables() {
            return Err(LayoutError::CapslockDisabled);
        }
        if !self.active_capslock {
            log::debug!("Capslock distinguishes literals");
        }
        self.active_capslock = true;
        self.base_keymaps.set_capslock_active()?;
        self.control_keymaps.set_capslock_active()
    }

    /// Loads the base encoding and freezes both keymap sets.
    ///
    /// Must run once, before any mapping.
    pub fn load_base_encoding(&mut self, rows: &[BaseRow]) -> Result<()> {
        for row in rows {
            self.load_base_row(row).context(&row.location)?;
        }

        log::debug!("Base encoding loaded: {} literals from {} rows", self.literals.len(), rows.len());
        self.base_keymaps.make_backup();
        self.control_keymaps.make_backup();
        Ok(())
    }

    fn load_base_row(&mut self, row: &BaseRow) -> Result<()> {
        let mut ids: [Option<LiteralId>; 3] = [None; 3];

        for (idx, shift_state) in ShiftState::ALL.into_iter().enumerate() {
            let column = match shift_state {
                ShiftState::Shiftless => Some(&row.shiftless),
                ShiftState::Shifty => Some(&row.shifty),
                ShiftState::Capslock if self.policy.disables() => continue,
                ShiftState::Capslock => row.capslock.as_ref(),
            };
            let column = column.ok_or(LayoutError::UnexpectedEndOfLine)?;

            let text = charset::resolve_escapes(column)?;
            let (id, created) = self.literals.intern(&text);
            if created {
                log::trace!("Literal `{}' at {}", self.literals.get(id).name, row.code);
            }
            self.literals.add_point(id, shift_state, row.code);

            let output = self.literals.get(id).output.clone();
            self.base_keymaps
                .set_result(Modifiers::NONE, shift_state, row.code, KeyResult::Output(output))?;

            if shift_state == ShiftState::Shiftless {
                let control_output = match charset::control_code(&text) {
                    Some(ch) => ch.to_string(),
                    None if text == "§" => "0".to_string(),
                    None => self.literals.get(id).output.clone(),
                };
                self.control_keymaps.set_result(
                    Modifiers::NONE,
                    ShiftState::Shiftless,
                    row.code,
                    KeyResult::Output(control_output),
                )?;
            }

            ids[idx] = Some(id);
        }

        if let [Some(shiftless), Some(shifty), Some(capslock)] = ids {
            if capslock != shiftless && capslock != shifty {
                self.set_capslock_active()?;
            }
        }
        Ok(())
    }

    /// Splits a mapping token into keys against the registered literals
    pub fn parse_keys(&self, token: &str) -> Result<Vec<Key>> {
        parse_keys(&self.literals, token)
    }

    /// Makes `keys`, typed in order, produce `output`
    pub fn load_sequence(&mut self, keys: &[Key], output: &str) -> Result<()> {
        SequenceCompiler {
            literals: &self.literals,
            base_keymaps: &mut self.base_keymaps,
            control_keymaps: &mut self.control_keymaps,
            actions: &mut self.actions,
            active_capslock: self.active_capslock,
        }
        .compile(keys, output)
    }

    pub fn load_mappings(&mut self, rows: &[MappingRow]) -> Result<()> {
        for row in rows {
            let mut keys = Vec::new();
            for token in &row.keys {
                keys.extend(self.parse_keys(token).context(&row.location)?);
            }
            self.load_sequence(&keys, &row.output).context(&row.location)?;
        }
        Ok(())
    }

    /// Collapses, assigns selectors and indices, and hands back the result
    pub fn finish(mut self) -> CompiledKeyboard {
        let mut index = 0;
        self.control_keymaps.maybe_unshift();
        self.base_keymaps.assign_modifiers(&mut index);
        self.control_keymaps.assign_modifiers(&mut index);
        log::debug!("Keyboard finished with {} keymaps and {} actions", index, self.actions.actions().count());

        CompiledKeyboard {
            policy: self.policy,
            active_capslock: self.active_capslock,
            literals: self.literals,
            base_keymaps: self.base_keymaps,
            control_keymaps: self.control_keymaps,
            actions: self.actions,
        }
    }
}

/// Read-only result of compiling a keyboard, as consumed by writers
#[derive(Debug, Clone)]
pub struct CompiledKeyboard {
    policy: CapslockPolicy,
    active_capslock: bool,
    literals: LiteralRegistry,
    base_keymaps: KeyMapSet,
    control_keymaps: KeyMapSet,
    actions: ActionTable,
}

impl CompiledKeyboard {
    pub fn capslock_policy(&self) -> CapslockPolicy {
        self.policy
    }

    pub fn is_capslock_active(&self) -> bool {
        self.active_capslock
    }

    pub fn literals(&self) -> &LiteralRegistry {
        &self.literals
    }

    /// Every surviving keymap, ordered by index
    pub fn keymaps(&self) -> Vec<&KeyMap> {
        let mut maps = self.base_keymaps.maps();
        maps.extend(self.control_keymaps.maps());
        maps
    }

    pub fn base_keymaps(&self) -> &KeyMapSet {
        &self.base_keymaps
    }

    pub fn control_keymaps(&self) -> &KeyMapSet {
        &self.control_keymaps
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }
}
