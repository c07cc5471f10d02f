//! File-backed high score: one decimal integer, overwritten in place.
//!
//! I/O failures never stop a session; the store logs a warning and the
//! high score lives in memory only.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::{info, warn};

const DEFAULT_PATH: &str = "highscore.txt";
const PATH_ENV: &str = "MUNCHER_HIGHSCORE";

pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `MUNCHER_HIGHSCORE` when set, otherwise a file in the working
    /// directory.
    pub fn from_env() -> Self {
        let path = std::env::var(PATH_ENV).unwrap_or_else(|_| DEFAULT_PATH.to_string());
        Self::new(path)
    }

    /// Reads the stored high score. A missing file means no record yet;
    /// an unreadable or non-numeric file degrades to 0.
    pub fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return 0,
            Err(err) => {
                warn!(
                    "could not read high score file {}: {err}",
                    self.path.display()
                );
                return 0;
            }
        };
        match text.trim().parse() {
            Ok(value) => {
                info!("loaded high score {value} from {}", self.path.display());
                value
            }
            Err(_) => {
                warn!(
                    "high score file {} holds {text:?}, not a number; starting from 0",
                    self.path.display()
                );
                0
            }
        }
    }

    /// Overwrites the file with `value`. Failures are logged and ignored.
    pub fn save(&self, value: u32) {
        if let Err(err) = fs::write(&self.path, value.to_string()) {
            warn!(
                "could not write high score file {}: {err}",
                self.path.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> HighScoreStore {
        let path = std::env::temp_dir().join(format!("muncher-{name}-{}", std::process::id()));
        let _ = fs::remove_file(&path);
        HighScoreStore::new(path)
    }

    #[test]
    fn missing_file_defaults_to_zero() {
        let store = temp_store("missing");
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = temp_store("roundtrip");
        store.save(1230);
        assert_eq!(store.load(), 1230);
        assert_eq!(fs::read_to_string(&store.path).unwrap(), "1230");
        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn corrupt_file_degrades_to_zero() {
        let store = temp_store("corrupt");
        fs::write(&store.path, "not a score").unwrap();
        assert_eq!(store.load(), 0);
        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn save_overwrites_previous_value() {
        let store = temp_store("overwrite");
        store.save(100);
        store.save(7);
        assert_eq!(store.load(), 7);
        let _ = fs::remove_file(&store.path);
    }
}
