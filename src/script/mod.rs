//! Script file loading.

use std::fs;
use std::path::Path;

use crate::error::{Result, ScriptError};

/// Loader for script files with a size cap.
pub struct ScriptLoader {
    max_size_bytes: u64,
}

impl ScriptLoader {
    pub fn new(max_size_bytes: u64) -> Self {
        Self { max_size_bytes }
    }

    /// Read a script file, enforcing the size limit before reading.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ScriptError::FileNotFound(path.display().to_string()).into());
        }

        let metadata = fs::metadata(path)?;
        if metadata.len() > self.max_size_bytes {
            return Err(ScriptError::TooLarge {
                size: metadata.len(),
                max: self.max_size_bytes,
            }
            .into());
        }

        fs::read_to_string(path).map_err(|e| ScriptError::ReadFailed(e.to_string()).into())
    }
}

impl Default for ScriptLoader {
    fn default() -> Self {
        Self::new(10 * 1024 * 1024)
    }
}
