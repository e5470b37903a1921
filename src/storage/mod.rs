//! Persistence layer.
//!
//! Saves and loads the session to/from a JSON file, carrying the spin
//! history, stakes, capital, and active set across restarts. A single
//! JSON blob is sufficient for this state shape.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::session::Session;

/// Default state file path.
const DEFAULT_STATE_FILE: &str = "paroli_session.json";

/// Save the session to a JSON file.
pub fn save_session(session: &Session, path: Option<&str>) -> Result<()> {
    let path = path.unwrap_or(DEFAULT_STATE_FILE);
    let json = serde_json::to_string_pretty(session)
        .context("Failed to serialise session")?;

    std::fs::write(path, &json)
        .context(format!("Failed to write session to {path}"))?;

    debug!(path, spins = session.spin_count(), "Session saved");
    Ok(())
}

/// Load the session from a JSON file.
/// Returns None if the file doesn't exist (fresh start).
pub fn load_session(path: Option<&str>) -> Result<Option<Session>> {
    let path = path.unwrap_or(DEFAULT_STATE_FILE);

    if !Path::new(path).exists() {
        info!(path, "No saved session found, starting fresh");
        return Ok(None);
    }

    let json = std::fs::read_to_string(path)
        .context(format!("Failed to read session from {path}"))?;

    let session: Session = serde_json::from_str(&json)
        .context(format!("Failed to parse session from {path}"))?;

    info!(
        path,
        spins = session.spin_count(),
        balance = %session.balance(),
        "Session loaded from disk"
    );

    Ok(Some(session))
}

/// Delete the state file (for testing or reset).
pub fn delete_session(path: Option<&str>) -> Result<()> {
    let path = path.unwrap_or(DEFAULT_STATE_FILE);
    if Path::new(path).exists() {
        std::fs::remove_file(path)
            .context(format!("Failed to delete state file {path}"))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chance, Spin};
    use rust_decimal_macros::dec;

    fn temp_path() -> String {
        let mut p = std::env::temp_dir();
        p.push(format!("paroli_test_session_{}.json", uuid::Uuid::new_v4()));
        p.to_string_lossy().to_string()
    }

    fn make_session() -> Session {
        Session::new(dec!(10), dec!(1000), [Chance::Red, Chance::Even]).unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path();
        let mut session = make_session();
        session.record(Spin::new(19).unwrap());
        session.record(Spin::new(0).unwrap());
        save_session(&session, Some(&path)).unwrap();

        let loaded = load_session(Some(&path)).unwrap();
        assert!(loaded.is_some());
        let loaded = loaded.unwrap();
        assert_eq!(loaded.spins(), session.spins());
        assert_eq!(loaded.base_stake(), dec!(10));
        assert_eq!(loaded.balance(), session.balance());

        delete_session(Some(&path)).unwrap();
    }

    #[test]
    fn test_load_nonexistent() {
        let path = "/tmp/paroli_nonexistent_session_12345.json";
        let loaded = load_session(Some(path)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_preserves_settings() {
        let path = temp_path();
        let mut session = make_session();
        session.set_base_stake(dec!(25)).unwrap();
        session.set_starting_capital(dec!(750));
        session.toggle(Chance::Black);

        save_session(&session, Some(&path)).unwrap();
        let loaded = load_session(Some(&path)).unwrap().unwrap();

        assert_eq!(loaded.base_stake(), dec!(25));
        assert_eq!(loaded.starting_capital(), dec!(750));
        assert!(loaded.is_active(Chance::Black));
        assert!(loaded.is_active(Chance::Red));

        delete_session(Some(&path)).unwrap();
    }

    #[test]
    fn test_corrupt_state_file_errors() {
        let path = temp_path();
        std::fs::write(&path, "{\"spins\": [99]}").unwrap();
        // 99 is not a pocket — boundary validation applies on load too.
        assert!(load_session(Some(&path)).is_err());
        delete_session(Some(&path)).unwrap();
    }

    #[test]
    fn test_delete_session() {
        let path = temp_path();
        save_session(&make_session(), Some(&path)).unwrap();
        assert!(Path::new(&path).exists());

        delete_session(Some(&path)).unwrap();
        assert!(!Path::new(&path).exists());
    }

    #[test]
    fn test_delete_nonexistent_ok() {
        let result = delete_session(Some("/tmp/paroli_does_not_exist_xyz.json"));
        assert!(result.is_ok());
    }
}
