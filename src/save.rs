// Snapshot persistence for resuming a match

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::tournament::{MatchState, Status};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no data directory available for save files")]
    NoDataDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed save data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("saved match in status {0:?} cannot be resumed")]
    NotResumable(Status),
}

impl SaveError {
    fn io(path: &Path, source: io::Error) -> Self {
        SaveError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// `<data_dir>/foosball/save.json`
pub fn save_path() -> Result<PathBuf, SaveError> {
    let mut path = dirs::data_dir().ok_or(SaveError::NoDataDir)?;
    path.push("foosball");
    path.push("save.json");
    Ok(path)
}

pub fn store_at(path: &Path, state: &MatchState) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SaveError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json).map_err(|e| SaveError::io(path, e))
}

/// Read a snapshot; `Ok(None)` when there is nothing saved
pub fn load_from(path: &Path) -> Result<Option<MatchState>, SaveError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SaveError::io(path, e)),
    };

    let state: MatchState = serde_json::from_str(&contents)?;
    if !state.is_resumable() {
        return Err(SaveError::NotResumable(state.status()));
    }
    Ok(Some(state))
}

pub fn clear_at(path: &Path) -> Result<(), SaveError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SaveError::io(path, e)),
    }
}

/// Keep the file in step with the live state: written while resumable,
/// removed once the contest is over or a new one is being picked.
///
/// The menu leaves it untouched so an abandoned contest can be continued.
pub fn sync_at(path: &Path, state: &MatchState) -> Result<(), SaveError> {
    if state.is_resumable() {
        store_at(path, state)
    } else if matches!(
        state.status(),
        Status::TeamSelect | Status::GameOver | Status::Victory
    ) {
        clear_at(path)
    } else {
        Ok(())
    }
}

pub fn load() -> Result<Option<MatchState>, SaveError> {
    load_from(&save_path()?)
}

pub fn sync(state: &MatchState) -> Result<(), SaveError> {
    sync_at(&save_path()?, state)
}

pub fn clear() -> Result<(), SaveError> {
    clear_at(&save_path()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::{Contest, GameMode, Scoreline, Selection, Summary, Verdict};

    fn temp_save(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("foosball-save-test-{}-{}", std::process::id(), name))
            .join("save.json")
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = temp_save("missing");
        assert!(load_from(&path).unwrap().is_none());
        assert!(clear_at(&path).is_ok());
    }

    #[test]
    fn test_sync_stores_then_clears() {
        let path = temp_save("sync");
        let playing = MatchState::Playing(Contest::Arcade {
            score: Scoreline { home: 1, away: 1 },
            ball: 3,
        });

        sync_at(&path, &playing).unwrap();
        assert_eq!(load_from(&path).unwrap(), Some(playing.clone()));

        // The menu keeps it for Continue
        sync_at(&path, &MatchState::Menu).unwrap();
        assert!(path.exists());

        let over = MatchState::GameOver(Summary::new(GameMode::Arcade, Verdict::Home, Scoreline::default()));
        sync_at(&path, &over).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_starting_a_new_contest_drops_the_old_save() {
        let path = temp_save("restart");
        let arcade = MatchState::Playing(Contest::Arcade {
            score: Scoreline { home: 2, away: 0 },
            ball: 4,
        });
        sync_at(&path, &arcade).unwrap();
        sync_at(&path, &MatchState::Menu).unwrap();
        assert!(load_from(&path).unwrap().is_some());

        // Picking a team for a fresh world cup means the old contest is gone
        sync_at(&path, &MatchState::TeamSelect(Selection::WorldCup)).unwrap();
        assert!(load_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_rejects_garbage_and_terminal_snapshots() {
        let path = temp_save("reject");
        fs::create_dir_all(path.parent().unwrap()).unwrap();

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_from(&path), Err(SaveError::Parse(_))));

        let over = MatchState::Victory(Summary::new(GameMode::League, Verdict::Home, Scoreline::default()));
        fs::write(&path, serde_json::to_string(&over).unwrap()).unwrap();
        assert!(matches!(
            load_from(&path),
            Err(SaveError::NotResumable(Status::Victory))
        ));
        clear_at(&path).unwrap();
    }
}
