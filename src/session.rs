//! The signed-in session and its persistence across process restarts.
//!
//! The session is an explicit value constructed once at startup (or by
//! [crate::authenticate]) and passed to whatever needs the current user. It
//! is persisted in the settings store under two fixed keys so a relaunched
//! app can pick up where it left off; an empty user ID means "no session".

use serde::{Deserialize, Serialize};

use crate::{Error, models::UserID, stores::SettingsStore};

/// The settings key holding the signed-in user's ID.
const USER_ID_KEY: &str = "userID";

/// The settings key holding the signed-in user's display name.
const NAME_KEY: &str = "name";

/// The identity of the currently signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    user_id: UserID,
    display_name: String,
}

impl Session {
    /// Create a session for the user with `user_id`.
    pub fn new(user_id: UserID, display_name: String) -> Self {
        Self {
            user_id,
            display_name,
        }
    }

    /// The signed-in user's ID.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// The signed-in user's display name. May be empty.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Load the persisted session, or `None` if no one is signed in.
///
/// A missing or empty user ID means no session. A user ID that fails to
/// parse is treated the same way rather than as an error, since the only
/// way to reach that state is external tampering with the settings store.
pub fn load_session<S: SettingsStore>(settings: &S) -> Result<Option<Session>, Error> {
    let raw_user_id = settings.get(USER_ID_KEY)?.unwrap_or_default();

    if raw_user_id.is_empty() {
        return Ok(None);
    }

    let Ok(user_id) = raw_user_id.parse::<i64>() else {
        tracing::warn!("discarding unparseable persisted user ID {raw_user_id:?}");
        return Ok(None);
    };

    let display_name = settings.get(NAME_KEY)?.unwrap_or_default();

    Ok(Some(Session::new(UserID::new(user_id), display_name)))
}

/// Persist `session` so it survives a process restart.
///
/// Both keys are written as one atomic operation, so a failed save can
/// never leave a new user ID paired with a stale display name.
pub fn store_session<S: SettingsStore>(settings: &mut S, session: &Session) -> Result<(), Error> {
    settings.set_many(&[
        (USER_ID_KEY, &session.user_id().to_string()),
        (NAME_KEY, session.display_name()),
    ])
}

/// Log out by clearing the persisted session.
///
/// There is no server-side state to invalidate; both keys are simply set to
/// the empty string, atomically.
pub fn clear_session<S: SettingsStore>(settings: &mut S) -> Result<(), Error> {
    settings.set_many(&[(USER_ID_KEY, ""), (NAME_KEY, "")])
}

#[cfg(test)]
mod session_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        db::initialize,
        models::UserID,
        stores::{SettingsStore, sqlite::SQLiteSettingsStore},
    };

    use super::{Session, clear_session, load_session, store_session};

    fn get_test_settings() -> SQLiteSettingsStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteSettingsStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn load_session_returns_none_on_fresh_store() {
        let settings = get_test_settings();

        assert_eq!(load_session(&settings), Ok(None));
    }

    #[test]
    fn store_then_load_round_trips() {
        let mut settings = get_test_settings();
        let session = Session::new(UserID::new(42), "Alice".to_string());

        store_session(&mut settings, &session).unwrap();

        assert_eq!(load_session(&settings), Ok(Some(session)));
    }

    #[test]
    fn clear_session_logs_out() {
        let mut settings = get_test_settings();
        let session = Session::new(UserID::new(42), "Alice".to_string());
        store_session(&mut settings, &session).unwrap();

        clear_session(&mut settings).unwrap();

        assert_eq!(load_session(&settings), Ok(None));
        assert_eq!(settings.get("userID"), Ok(Some(String::new())));
        assert_eq!(settings.get("name"), Ok(Some(String::new())));
    }

    #[test]
    fn failed_store_session_leaves_no_partial_session() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));
        let mut settings = SQLiteSettingsStore::new(connection.clone());

        // Make the write of the display name fail to simulate a persistence
        // error partway through saving the session.
        connection
            .lock()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_name_key BEFORE INSERT ON settings
                WHEN NEW.key = 'name'
                BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
            )
            .unwrap();

        let session = Session::new(UserID::new(42), "Alice".to_string());
        assert!(store_session(&mut settings, &session).is_err());

        // The user ID must not have been persisted on its own.
        assert_eq!(load_session(&settings), Ok(None));
        assert_eq!(settings.get("userID"), Ok(None));
    }

    #[test]
    fn load_session_discards_unparseable_user_id() {
        let mut settings = get_test_settings();
        settings.set("userID", "not-a-number").unwrap();

        assert_eq!(load_session(&settings), Ok(None));
    }

    #[test]
    fn session_allows_empty_display_name() {
        let mut settings = get_test_settings();
        let session = Session::new(UserID::new(7), String::new());

        store_session(&mut settings, &session).unwrap();

        assert_eq!(load_session(&settings), Ok(Some(session)));
    }
}
