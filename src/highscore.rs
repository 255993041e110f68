use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A JSON file holding the best score achieved so far.
///
/// Access is best-effort: [`get()`][HighScoreFile::get] and
/// [`set()`][HighScoreFile::set] log failures and carry on, so a broken data
/// directory never interrupts a game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScoreFile {
    /// `None` if high scores are not being persisted
    path: Option<PathBuf>,
}

impl HighScoreFile {
    pub(crate) fn new(path: PathBuf) -> HighScoreFile {
        HighScoreFile { path: Some(path) }
    }

    /// A store that never reads or writes anything
    pub(crate) fn disabled() -> HighScoreFile {
        HighScoreFile { path: None }
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Return the stored high score, or `None` if there isn't one or it
    /// couldn't be read
    pub(crate) fn get(&self) -> Option<u32> {
        match self.load() {
            Ok(score) => score,
            Err(e) => {
                tracing::warn!(error = ?e, "ignoring unreadable high score");
                None
            }
        }
    }

    /// Store `score` as the new high score
    pub(crate) fn set(&self, score: u32) {
        if let Err(e) = self.save(score) {
            tracing::warn!(error = ?e, score, "could not save high score");
        }
    }

    pub(crate) fn load(&self) -> Result<Option<u32>, LoadError> {
        let Some(path) = self.path() else {
            return Ok(None);
        };
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LoadError::read(e)),
        };
        let record =
            serde_json::from_slice::<HighScoreRecord>(&src).map_err(LoadError::deserialize)?;
        Ok(Some(record.high_score))
    }

    pub(crate) fn save(&self, score: u32) -> Result<(), SaveError> {
        let Some(path) = self.path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(&HighScoreRecord { high_score: score })
            .map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct HighScoreRecord {
    high_score: u32,
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high score to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high score")]
    Deserialize(#[source] serde_json::Error),
}
