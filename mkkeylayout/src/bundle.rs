//! Assembly of the `.bundle` directory
//!
//! ```text
//! <name>.bundle/Contents/Info.plist
//! <name>.bundle/Contents/Resources/<keyboard>.keylayout
//! <name>.bundle/Contents/Resources/<keyboard>.icns
//! ```
//!
//! Everything is written below `<name>.bundle.TMP` first, which is renamed to
//! the final name once complete.

use crate::parser::BundleConfig;
use crate::writer::{AtomicFile, KeylayoutWriter, PlistWriter};
use keylayout_core::{CompiledKeyboard, LayoutError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A staging directory, removed on drop unless committed
struct StagingDir {
    path: PathBuf,
    committed: bool,
}

impl StagingDir {
    fn create(path: PathBuf) -> Result<Self> {
        if path.exists() {
            log::warn!("Removing stale staging directory {}", path.display());
            fs::remove_dir_all(&path)
                .map_err(|e| LayoutError::io(format!("Could not remove {}", path.display()), e))?;
        }
        create_dir(&path)?;
        Ok(Self {
            path,
            committed: false,
        })
    }

    fn commit(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target).map_err(|e| {
            LayoutError::io(
                format!("Could not rename {} to {}", self.path.display(), target.display()),
                e,
            )
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.path) {
            log::warn!("Could not remove {}: {}", self.path.display(), e);
        }
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir(path)
        .map_err(|e| LayoutError::io(format!("Could not create directory {}", path.display()), e))
}

/// Writes a bundle for `config` and its compiled keyboards, in configuration order
pub struct BundleWriter<'a> {
    config: &'a BundleConfig,
    /// Directory relative icon paths are resolved against
    config_dir: &'a Path,
}

impl<'a> BundleWriter<'a> {
    pub fn new(config: &'a BundleConfig, config_dir: &'a Path) -> Self {
        Self { config, config_dir }
    }

    /// Final location of the bundle inside `output_dir`
    pub fn target(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.config.directory_name())
    }

    /// Fails with `BundleExists` if the bundle is already there
    pub fn check_target(&self, output_dir: &Path) -> Result<PathBuf> {
        let target = self.target(output_dir);
        if target.exists() {
            return Err(LayoutError::BundleExists(target));
        }
        Ok(target)
    }

    pub fn write(&self, output_dir: &Path, keyboards: &[CompiledKeyboard]) -> Result<PathBuf> {
        let target = self.check_target(output_dir)?;
        let staging = StagingDir::create(output_dir.join(format!("{}.TMP", self.config.directory_name())))?;

        let contents = staging.path.join("Contents");
        let resources = contents.join("Resources");
        create_dir(&contents)?;
        create_dir(&resources)?;

        for (meta, keyboard) in self.config.keyboards.iter().zip(keyboards) {
            let file = AtomicFile::create(resources.join(meta.keylayout_file_name()))?;
            KeylayoutWriter::new(file)
                .write_keylayout(&meta.name, keyboard)
                .map_err(|e| LayoutError::io(format!("Write failed ({})", meta.keylayout_file_name()), e))?
                .commit()?;

            if let Some(icons) = &meta.icons {
                let source = self.config_dir.join(icons);
                let dest = resources.join(meta.icons_file_name());
                fs::copy(&source, &dest).map_err(|e| {
                    LayoutError::io(
                        format!("Could not copy {} to {}", source.display(), dest.display()),
                        e,
                    )
                })?;
            }
        }

        let file = AtomicFile::create(contents.join("Info.plist"))?;
        PlistWriter::new(file)
            .write_info_plist(self.config)
            .map_err(|e| LayoutError::io("Write failed (Info.plist)", e))?
            .commit()?;

        staging.commit(&target)?;
        log::info!("Created {}", target.display());
        Ok(target)
    }
}
