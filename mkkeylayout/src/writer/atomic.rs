//! Files that only appear under their final name once completely written

use keylayout_core::{LayoutError, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// A file written to a temporary sibling and renamed into place on commit.
///
/// Dropping an uncommitted file removes the temporary.
pub struct AtomicFile {
    path: PathBuf,
    temp_path: PathBuf,
    writer: Option<BufWriter<File>>,
}

/// `path.TMP`, or `path.TMP.NN` for the first `NN` not already taken
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".TMP");
    let mut candidate = PathBuf::from(&name);

    let mut count = 0;
    while candidate.exists() {
        count += 1;
        let mut numbered = name.clone();
        numbered.push(format!(".{:02}", count));
        candidate = PathBuf::from(numbered);
    }
    candidate
}

impl AtomicFile {
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let temp_path = temp_path_for(&path);
        let file = File::create(&temp_path).map_err(|e| {
            LayoutError::io(format!("Could not open {} for writing", temp_path.display()), e)
        })?;

        Ok(Self {
            path,
            temp_path,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Flushes, closes and renames the file to its final name
    pub fn commit(mut self) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            let file = writer.into_inner().map_err(|e| {
                LayoutError::io(format!("Write failed ({})", self.temp_path.display()), e.into_error())
            })?;
            file.sync_all()
                .map_err(|e| LayoutError::io(format!("Could not close {}", self.temp_path.display()), e))?;
        }

        fs::rename(&self.temp_path, &self.path).map_err(|e| {
            LayoutError::io(
                format!(
                    "Could not rename {} to {}",
                    self.temp_path.display(),
                    self.path.display()
                ),
                e,
            )
        })?;
        log::debug!("Wrote {}", self.path.display());

        // Renamed; nothing left for drop to clean up
        self.temp_path = PathBuf::new();
        Ok(())
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.writer.as_mut() {
            Some(writer) => writer.write(buf),
            None => Err(io::Error::new(io::ErrorKind::Other, "file already committed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        if self.temp_path.as_os_str().is_empty() {
            return;
        }

        self.writer.take();
        if let Err(e) = fs::remove_file(&self.temp_path) {
            log::warn!("Could not remove {}: {}", self.temp_path.display(), e);
        }
    }
}
