use crate::core::constants::HISTORY_FILE;
use crate::core::message::Message;
use directories::ProjectDirs;
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Errors that can occur while reading or writing the conversation
/// snapshot.
#[derive(Debug)]
pub enum HistoryError {
    /// Failed to read the snapshot file from disk.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The snapshot file exists but is not a valid message array.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to serialize the in-memory conversation.
    Serialize { source: serde_json::Error },

    /// Failed to write the snapshot back to disk.
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Read { path, source } => {
                write!(f, "Failed to read history at {}: {}", path.display(), source)
            }
            HistoryError::Parse { path, source } => {
                write!(
                    f,
                    "Failed to parse history at {}: {}",
                    path.display(),
                    source
                )
            }
            HistoryError::Serialize { source } => {
                write!(f, "Failed to serialize history: {}", source)
            }
            HistoryError::Persist { path, source } => {
                write!(
                    f,
                    "Failed to write history at {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl StdError for HistoryError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            HistoryError::Read { source, .. } => Some(source),
            HistoryError::Parse { source, .. } => Some(source),
            HistoryError::Serialize { source } => Some(source),
            HistoryError::Persist { source, .. } => Some(source),
        }
    }
}

/// Durable home of the conversation: one JSON array of messages,
/// rewritten wholesale (atomically) after every change so that the file
/// always equals the last in-memory snapshot.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn open_default() -> Result<Self, Box<dyn StdError>> {
        let proj_dirs = ProjectDirs::from("org", "parley", "parley")
            .ok_or("could not determine a data directory for this platform")?;
        Ok(Self {
            path: proj_dirs.data_dir().join(HISTORY_FILE),
        })
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Message>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|source| HistoryError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| HistoryError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Startup load with the unreadable-snapshot policy applied: a
    /// snapshot that cannot be read or parsed is moved aside to a
    /// `.corrupt` sibling (never deleted, never overwritten by the next
    /// save) and the session starts empty. The returned notice is meant
    /// for the status line.
    pub fn load_or_quarantine(&self) -> (Vec<Message>, Option<String>) {
        match self.load() {
            Ok(messages) => (messages, None),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load chat history");
                let notice = match self.quarantine() {
                    Ok(Some(moved)) => {
                        format!("Could not read saved history; moved it to {}", moved.display())
                    }
                    Ok(None) => "Could not read saved history; starting fresh".to_string(),
                    Err(rename_err) => {
                        tracing::warn!(error = %rename_err, "failed to quarantine history file");
                        "Could not read saved history; starting fresh".to_string()
                    }
                };
                (Vec::new(), Some(notice))
            }
        }
    }

    fn quarantine(&self) -> std::io::Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let quarantined = self.path.with_extension("json.corrupt");
        fs::rename(&self.path, &quarantined)?;
        Ok(Some(quarantined))
    }

    pub fn save(&self, messages: &[Message]) -> Result<(), HistoryError> {
        let persist_err = |source: std::io::Error| HistoryError::Persist {
            path: self.path.clone(),
            source,
        };

        let parent = self.path.parent().filter(|dir| !dir.as_os_str().is_empty());
        if let Some(dir) = parent {
            fs::create_dir_all(dir).map_err(persist_err)?;
        }

        let contents = serde_json::to_string_pretty(messages)
            .map_err(|source| HistoryError::Serialize { source })?;

        // Write to a temp file in the same directory so the final rename
        // is atomic; a crash mid-write leaves the previous snapshot intact.
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new(),
        }
        .map_err(persist_err)?;

        temp_file.write_all(contents.as_bytes()).map_err(persist_err)?;
        temp_file.as_file_mut().sync_all().map_err(persist_err)?;
        temp_file
            .persist(&self.path)
            .map_err(|err| persist_err(err.error))?;
        Ok(())
    }
}
