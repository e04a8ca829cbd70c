use super::map::{KeyMap, KeyResult};
use crate::types::{KeyCode, LayoutError, Result, ShiftState};

/// Shift variants of a subset.
///
/// Control subsets start `Undistinguished`: every shift state reads the
/// shiftless map until a shifted slot is written, at which point the variants
/// are split off from the backup map.
#[derive(Debug, Clone, PartialEq)]
pub enum ShiftedMaps {
    Undistinguished,
    Distinguished {
        shifty: KeyMap,
        capslock: Option<KeyMap>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyMapSubset {
    control: bool,
    capslock_disables: bool,
    active_capslock: bool,
    shiftless: KeyMap,
    shifted: ShiftedMaps,
}

impl KeyMapSubset {
    /// A plain subset as built before the base encoding loads
    pub fn new(control: bool, capslock_disables: bool) -> Self {
        let shifted = if control {
            ShiftedMaps::Undistinguished
        } else {
            ShiftedMaps::Distinguished {
                shifty: KeyMap::new(),
                capslock: (!capslock_disables).then(KeyMap::new),
            }
        };

        Self {
            control,
            capslock_disables,
            active_capslock: false,
            shiftless: KeyMap::new(),
            shifted,
        }
    }

    /// Copy of the current results.
    ///
    /// Control snapshots keep only the shiftless map; the capslock map is kept
    /// only while capslock is active.
    pub fn snapshot(&self) -> Self {
        let shifted = match &self.shifted {
            ShiftedMaps::Distinguished { shifty, capslock } if !self.control => {
                let keep_capslock = !self.capslock_disables && self.active_capslock;
                ShiftedMaps::Distinguished {
                    shifty: shifty.duplicate(),
                    capslock: capslock.as_ref().filter(|_| keep_capslock).map(KeyMap::duplicate),
                }
            }
            _ => ShiftedMaps::Undistinguished,
        };

        Self {
            control: self.control,
            capslock_disables: self.capslock_disables,
            active_capslock: self.active_capslock,
            shiftless: self.shiftless.duplicate(),
            shifted,
        }
    }

    pub fn set_capslock_active(&mut self) -> Result<()> {
        if self.capslock_disables {
            return Err(LayoutError::CapslockDisabled);
        }
        self.active_capslock = true;
        Ok(())
    }

    pub fn shiftless(&self) -> &KeyMap {
        &self.shiftless
    }

    pub fn shifted(&self) -> &ShiftedMaps {
        &self.shifted
    }

    pub fn is_distinguished(&self) -> bool {
        matches!(self.shifted, ShiftedMaps::Distinguished { .. })
    }

    fn distinguish(&mut self, backup: Option<&KeyMap>) -> Result<(&mut KeyMap, &mut Option<KeyMap>)> {
        if let ShiftedMaps::Undistinguished = self.shifted {
            let backup = backup.ok_or(LayoutError::MissingBackup)?;
            log::trace!("Distinguishing shift states from backup map");
            self.shifted = ShiftedMaps::Distinguished {
                shifty: backup.duplicate(),
                capslock: self.active_capslock.then(|| backup.duplicate()),
            };
        }

        match &mut self.shifted {
            ShiftedMaps::Distinguished { shifty, capslock } => Ok((shifty, capslock)),
            ShiftedMaps::Undistinguished => Err(LayoutError::MissingBackup),
        }
    }

    /// Slot for `code` in the map of `shift_state`, splitting off shift
    /// variants from `backup` when needed
    pub fn result_mut(
        &mut self,
        shift_state: ShiftState,
        code: KeyCode,
        backup: Option<&KeyMap>,
    ) -> Result<&mut KeyResult> {
        match shift_state {
            ShiftState::Shiftless => Ok(self.shiftless.result_mut(code)),
            ShiftState::Shifty => {
                let (shifty, _) = self.distinguish(backup)?;
                Ok(shifty.result_mut(code))
            }
            ShiftState::Capslock => {
                if self.capslock_disables {
                    return Err(LayoutError::CapslockDisabled);
                }
                if !self.active_capslock && !self.has_capslock_map() {
                    return Err(LayoutError::CapslockInactive);
                }
                let (_, capslock) = self.distinguish(backup)?;
                capslock
                    .as_mut()
                    .map(|map| map.result_mut(code))
                    .ok_or(LayoutError::CapslockInactive)
            }
        }
    }

    fn has_capslock_map(&self) -> bool {
        matches!(
            self.shifted,
            ShiftedMaps::Distinguished {
                capslock: Some(_),
                ..
            }
        )
    }

    /// Drops the shift variants when they cannot be told apart from the
    /// shiftless map
    pub fn maybe_unshift(&mut self) {
        if let ShiftedMaps::Distinguished { shifty, capslock } = &self.shifted {
            let same = self.shiftless.matches(shifty)
                && capslock.as_ref().map_or(true, |map| self.shiftless.matches(map));
            if same {
                log::trace!("Collapsing indistinguishable shift variants");
                self.shifted = ShiftedMaps::Undistinguished;
            }
        }
    }

    /// Attaches modifier selectors to every map and numbers them in order.
    ///
    /// `required` and `permitted` are space-prefixed modifier lists shared by
    /// the whole subset.
    pub fn assign_modifiers(&mut self, required: &str, permitted: &str, index: &mut usize) {
        let disables = self.capslock_disables;
        let shiftless = &mut self.shiftless;

        match &mut self.shifted {
            ShiftedMaps::Distinguished { shifty, .. } if disables => {
                shiftless.add_selector(&[required, permitted]);
                shiftless.add_selector(&[required, " command", permitted, " anyShift?"]);
                shifty.add_selector(&[required, " anyShift", permitted]);
            }
            ShiftedMaps::Undistinguished if disables => {
                shiftless.add_selector(&[required, permitted, " command? anyShift?"]);
            }
            ShiftedMaps::Distinguished { shifty, capslock } => {
                match capslock {
                    Some(capslock) => {
                        shiftless.add_selector(&[required, permitted]);
                        shifty.add_selector(&[required, " anyShift", permitted, " caps?"]);
                        capslock.add_selector(&[required, " caps", permitted]);
                    }
                    None => {
                        shiftless.add_selector(&[required, permitted, " caps?"]);
                        shifty.add_selector(&[required, " anyShift", permitted, " caps?"]);
                    }
                }
                shiftless.add_selector(&[required, " command", permitted, " anyShift? caps?"]);
            }
            ShiftedMaps::Undistinguished => {
                shiftless.add_selector(&[required, permitted, " command? anyShift? caps?"]);
            }
        }

        for map in self.maps_mut() {
            map.assign_index(index);
        }
    }

    /// Surviving maps: shiftless, shifty, capslock
    pub fn maps(&self) -> Vec<&KeyMap> {
        let mut maps = vec![&self.shiftless];
        if let ShiftedMaps::Distinguished { shifty, capslock } = &self.shifted {
            maps.push(shifty);
            maps.extend(capslock.as_ref());
        }
        maps
    }

    fn maps_mut(&mut self) -> Vec<&mut KeyMap> {
        let mut maps = vec![&mut self.shiftless];
        if let ShiftedMaps::Distinguished { shifty, capslock } = &mut self.shifted {
            maps.push(shifty);
            maps.extend(capslock.as_mut());
        }
        maps
    }
}
