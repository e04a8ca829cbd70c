use super::escape;
use crate::parser::{BundleConfig, KeyboardConfig};
use keylayout_core::CapslockPolicy;
use std::io::{self, Write};

/// Writes the bundle's `Info.plist`
pub struct PlistWriter<W: Write> {
    writer: W,
}

impl<W: Write> PlistWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_info_plist(mut self, bundle: &BundleConfig) -> io::Result<W> {
        writeln!(self.writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(
            self.writer,
            "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">"
        )?;
        writeln!(self.writer, "<plist version=\"1.0\">")?;
        writeln!(self.writer, "  <dict>")?;

        self.write_string("    ", "CFBundleIdentifier", &bundle.identifier)?;
        // The plain name, not the directory name
        self.write_string("    ", "CFBundleName", &bundle.name)?;
        self.write_string("    ", "CFBundleVersion", &bundle.version)?;

        for keyboard in &bundle.keyboards {
            self.write_keyboard(keyboard)?;
        }

        writeln!(self.writer, "  </dict>")?;
        writeln!(self.writer, "</plist>")?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_keyboard(&mut self, keyboard: &KeyboardConfig) -> io::Result<()> {
        let switches = keyboard.capslock_policy == CapslockPolicy::SwitchesInputMode;

        writeln!(self.writer, "    <key>KLInfo_{}</key>", escape(&keyboard.name))?;
        writeln!(self.writer, "    <dict>")?;
        writeln!(self.writer, "      <key>TICapsLockLanguageSwitchCapable</key>")?;
        writeln!(self.writer, "      <{}/>", if switches { "true" } else { "false" })?;
        self.write_string("      ", "TISInputSourceID", &keyboard.identifier)?;
        self.write_string("      ", "TISIntendedLanguage", &keyboard.language)?;
        writeln!(self.writer, "    </dict>")
    }

    fn write_string(&mut self, indent: &str, key: &str, value: &str) -> io::Result<()> {
        writeln!(self.writer, "{}<key>{}</key>", indent, key)?;
        writeln!(self.writer, "{}<string>{}</string>", indent, escape(value))
    }
}
