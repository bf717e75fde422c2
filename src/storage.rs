use crate::constants::EXPORT_FILE_NAME;
use crate::models::RequestDescriptor;
use crate::serializer;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads imported request files and writes exported ones
pub struct Storage {
    export_dir: PathBuf,
}

impl Storage {
    /// Exports land in the user's download directory when there is one
    pub fn new() -> Self {
        let export_dir = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Storage::with_export_dir(export_dir)
    }

    pub fn with_export_dir(export_dir: impl Into<PathBuf>) -> Self {
        Storage {
            export_dir: export_dir.into(),
        }
    }

    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(EXPORT_FILE_NAME)
    }

    /// Ensure export directory exists
    fn ensure_dir(&self) -> Result<()> {
        if !self.export_dir.exists() {
            fs::create_dir_all(&self.export_dir)
                .with_context(|| format!("creating {}", self.export_dir.display()))?;
        }
        Ok(())
    }

    /// Write the exported document, replacing any previous export
    pub fn save_export(&self, descriptor: &RequestDescriptor) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.export_path();
        fs::write(&path, serializer::export(descriptor))
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    /// Read a request file. `~` expands to the home directory.
    pub fn read_import(&self, path: &str) -> Result<String> {
        let path = expand_home(path.trim());
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    Path::new(path).to_path_buf()
}
