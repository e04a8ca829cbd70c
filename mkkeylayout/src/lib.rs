pub mod lexer;
pub mod parser;
pub mod data;
pub mod writer;
pub mod bundle;

pub use keylayout_core::*;

use bundle::BundleWriter;
use parser::{parse_base_rows, parse_config, parse_mapping_rows, BundleConfig, KeyboardConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Builds the bundle described by `config_path` inside `output_dir`
pub fn build_bundle(config_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    let config = load_config(config_path)?;
    let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let writer = BundleWriter::new(&config, config_dir);
    writer.check_target(output_dir)?;

    let keyboards = config
        .keyboards
        .iter()
        .map(|keyboard| compile_keyboard(keyboard, config_dir))
        .collect::<Result<Vec<_>>>()?;

    writer.write(output_dir, &keyboards)
}

pub fn load_config(path: &Path) -> Result<BundleConfig> {
    let input = fs::read_to_string(path)
        .map_err(|e| LayoutError::io(format!("Could not read {}", path.display()), e))?;
    parse_config(&path.display().to_string(), &input)
}

/// Loads the base encoding, option layer and data files of one keyboard
pub fn compile_keyboard(config: &KeyboardConfig, base_dir: &Path) -> Result<CompiledKeyboard> {
    log::debug!("Compiling keyboard {}", config.name);
    let mut keyboard = Keyboard::new(config.capslock_policy);

    let input = data::load(&config.base_encoding, base_dir)?;
    keyboard.load_base_encoding(&parse_base_rows(&config.base_encoding, &input)?)?;

    if config.osxopt {
        keyboard.load_mappings(&parse_mapping_rows("osxopt", data::OSXOPT)?)?;
    }

    for datafile in &config.datafiles {
        let input = data::load(datafile, base_dir)?;
        keyboard.load_mappings(&parse_mapping_rows(datafile, &input)?)?;
    }

    Ok(keyboard.finish())
}
