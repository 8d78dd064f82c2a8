// ABOUTME: Session command implementation.
// ABOUTME: Shows or deletes the file backing this session's liked/sent lists.

use std::io::Write;

use crate::cli::SessionAction;
use crate::config::SessionConfig;
use crate::error::Result;

pub fn run(
    action: Option<SessionAction>,
    session: &SessionConfig,
    out: &mut impl Write,
) -> Result<()> {
    if session.is_ephemeral() {
        writeln!(out, "Session is in memory only; nothing is stored on disk.")?;
        return Ok(());
    }

    let storage = session.file_storage();
    match action {
        Some(SessionAction::Path) | None => {
            writeln!(out, "{}", storage.path().display())?;
        }
        Some(SessionAction::Clear) => {
            storage.clear()?;
            tracing::info!(path = %storage.path().display(), "Cleared session");
            writeln!(out, "Cleared session {}", session.session_id())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use happy_client::SessionStorage;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> SessionConfig {
        SessionConfig {
            id: Some("tab-1".to_string()),
            dir: Some(dir.path().to_path_buf()),
        }
    }

    #[test]
    fn test_path_prints_session_file() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        run(Some(SessionAction::Path), &session_in(&dir), &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(
            printed.trim(),
            dir.path().join("tab-1.json").display().to_string()
        );
    }

    #[test]
    fn test_clear_removes_stored_state() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);
        session
            .file_storage()
            .set_item("thought-storage", "{}")
            .unwrap();

        let mut out = Vec::new();
        run(Some(SessionAction::Clear), &session, &mut out).unwrap();

        assert!(!session.file_storage().path().exists());
        assert_eq!(String::from_utf8(out).unwrap(), "Cleared session tab-1\n");
    }

    #[test]
    fn test_clear_without_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        run(Some(SessionAction::Clear), &session_in(&dir), &mut out).unwrap();
    }

    #[test]
    fn test_ephemeral_session_has_no_file() {
        let session = SessionConfig {
            id: Some("none".to_string()),
            dir: None,
        };
        let mut out = Vec::new();
        run(None, &session, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("in memory"));
    }
}
