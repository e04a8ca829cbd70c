use super::escape;
use keylayout_core::{CompiledKeyboard, KeyMap, KeyResult, Subaction};
use std::io::{self, Write};

/// Writes a compiled keyboard as a `.keylayout` document
pub struct KeylayoutWriter<W: Write> {
    writer: W,
}

impl<W: Write> KeylayoutWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_keylayout(mut self, name: &str, keyboard: &CompiledKeyboard) -> io::Result<W> {
        let maps = keyboard.keymaps();

        writeln!(self.writer, "<?xml version=\"1.1\" encoding=\"UTF-8\"?>")?;
        writeln!(
            self.writer,
            "<!DOCTYPE keyboard SYSTEM \"file://localhost/System/Library/DTDs/KeyboardLayout.dtd\">"
        )?;
        writeln!(self.writer, "<keyboard group=\"126\" id=\"-1\" name=\"{}\">", escape(name))?;
        writeln!(self.writer, "  <layouts>")?;
        writeln!(
            self.writer,
            "    <layout first=\"0\" last=\"0\" mapSet=\"maps\" modifiers=\"mods\" />"
        )?;
        writeln!(self.writer, "  </layouts>")?;

        writeln!(self.writer, "  <modifierMap id=\"mods\" defaultIndex=\"0\">")?;
        for map in &maps {
            self.write_modifiers(map)?;
        }
        writeln!(self.writer, "  </modifierMap>")?;

        writeln!(self.writer, "  <keyMapSet id=\"maps\">")?;
        for map in &maps {
            self.write_keymap(map)?;
        }
        writeln!(self.writer, "  </keyMapSet>")?;

        self.write_actions(keyboard)?;
        self.write_terminators(keyboard)?;
        writeln!(self.writer, "</keyboard>")?;

        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_modifiers(&mut self, map: &KeyMap) -> io::Result<()> {
        let Some(index) = map.index() else {
            return Ok(());
        };

        writeln!(self.writer, "    <keyMapSelect mapIndex=\"{}\">", index)?;
        for selector in map.selectors() {
            writeln!(self.writer, "      <modifier keys=\"{}\" />", escape(selector))?;
        }
        writeln!(self.writer, "    </keyMapSelect>")
    }

    fn write_keymap(&mut self, map: &KeyMap) -> io::Result<()> {
        let Some(index) = map.index() else {
            return Ok(());
        };

        writeln!(self.writer, "    <keyMap index=\"{}\">", index)?;
        for (code, result) in map.results() {
            match result {
                KeyResult::Output(text) => {
                    writeln!(self.writer, "      <key code=\"{}\" output=\"{}\" />", code, escape(text))?
                }
                KeyResult::Action(name) => {
                    writeln!(self.writer, "      <key code=\"{}\" action=\"{}\" />", code, escape(name))?
                }
                KeyResult::None => {}
            }
        }
        writeln!(self.writer, "    </keyMap>")
    }

    fn write_actions(&mut self, keyboard: &CompiledKeyboard) -> io::Result<()> {
        let actions = keyboard.actions();
        if actions.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "  <actions>")?;
        for action in actions.actions() {
            writeln!(self.writer, "    <action id=\"{}\">", escape(action.name()))?;
            // `none` sorts first
            for (state, subaction) in action.subactions() {
                let state_name = state.to_string();
                match subaction {
                    Subaction::Output(text) => writeln!(
                        self.writer,
                        "      <when state=\"{}\" output=\"{}\" />",
                        escape(&state_name),
                        escape(text)
                    )?,
                    Subaction::Advance => {
                        let next = action.target(state).to_string();
                        writeln!(
                            self.writer,
                            "      <when state=\"{}\" next=\"{}\" />",
                            escape(&state_name),
                            escape(&next)
                        )?
                    }
                }
            }
            writeln!(self.writer, "    </action>")?;
        }
        writeln!(self.writer, "  </actions>")
    }

    fn write_terminators(&mut self, keyboard: &CompiledKeyboard) -> io::Result<()> {
        let mut terminators = keyboard.actions().terminators().peekable();
        if terminators.peek().is_none() {
            return Ok(());
        }

        writeln!(self.writer, "  <terminators>")?;
        for (state, output) in terminators {
            writeln!(
                self.writer,
                "    <when state=\"{}\" output=\"{}\" />",
                escape(&state.to_string()),
                escape(output)
            )?;
        }
        writeln!(self.writer, "  </terminators>")
    }
}
