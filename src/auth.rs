//! The sign-in gateway that exchanges an external identity assertion for a
//! local user record.

use serde::{Deserialize, Serialize};

use crate::{Error, Session, stores::UserStore};

/// An identity assertion from an external provider, resolved and verified by
/// the platform sign-in flow before it reaches this crate.
///
/// The platform hands over exactly one shape: a stable subject identifier
/// plus an optional display name proposed at sign-up (Apple-style sign-in).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalCredential {
    /// The stable subject identifier issued by the identity provider.
    pub subject_id: String,
    /// A display name offered by the provider, typically only on the first
    /// sign-in.
    pub proposed_name: Option<String>,
}

/// Exchange an external credential for a session, creating a user record on
/// the first sign-in for a given subject identifier.
///
/// On repeat sign-ins the stored profile wins: the credential's proposed
/// name is ignored and the existing display name is returned. The operation
/// is idempotent; at most one user ever exists per subject identifier. If a
/// concurrent sign-in creates the user between this function's lookup and
/// insert, the unique constraint on the external auth ID rejects the insert
/// and the function falls back to returning the winner's record.
///
/// # Errors
/// Returns [Error::InvalidCredential] if the credential's subject identifier
/// is empty or blank. No record is created in that case.
pub fn authenticate<U>(credential: &ExternalCredential, user_store: &mut U) -> Result<Session, Error>
where
    U: UserStore,
{
    if credential.subject_id.trim().is_empty() {
        return Err(Error::InvalidCredential);
    }

    match user_store.get_by_external_id(&credential.subject_id) {
        Ok(user) => Ok(Session::new(user.id(), user.display_name().to_string())),
        Err(Error::NotFound) => {
            let display_name = credential.proposed_name.as_deref().unwrap_or_default();

            match user_store.create(&credential.subject_id, display_name) {
                Ok(user) => {
                    tracing::info!("created user {} on first sign-in", user.id());
                    Ok(Session::new(user.id(), user.display_name().to_string()))
                }
                // Lost a race against a concurrent sign-in for the same
                // subject. The winner's record is authoritative.
                Err(Error::DuplicateExternalId) => {
                    let user = user_store.get_by_external_id(&credential.subject_id)?;
                    Ok(Session::new(user.id(), user.display_name().to_string()))
                }
                Err(error) => Err(error),
            }
        }
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod authenticate_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{Error, db::initialize, stores::sqlite::SQLiteUserStore};

    use super::{ExternalCredential, authenticate};

    fn get_test_store() -> SQLiteUserStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteUserStore::new(Arc::new(Mutex::new(connection)))
    }

    fn credential(subject_id: &str, proposed_name: Option<&str>) -> ExternalCredential {
        ExternalCredential {
            subject_id: subject_id.to_string(),
            proposed_name: proposed_name.map(str::to_string),
        }
    }

    #[test]
    fn first_sign_in_creates_user() {
        let mut store = get_test_store();

        let session = authenticate(&credential("apple:123", Some("Alice")), &mut store).unwrap();

        assert_eq!(session.display_name(), "Alice");
        assert!(session.user_id().as_i64() > 0);
    }

    #[test]
    fn first_sign_in_without_name_stores_empty_name() {
        let mut store = get_test_store();

        let session = authenticate(&credential("apple:123", None), &mut store).unwrap();

        assert_eq!(session.display_name(), "");
    }

    #[test]
    fn repeat_sign_in_is_idempotent() {
        let mut store = get_test_store();

        let first = authenticate(&credential("apple:123", Some("Alice")), &mut store).unwrap();
        let second = authenticate(&credential("apple:123", Some("Alice")), &mut store).unwrap();

        assert_eq!(first.user_id(), second.user_id());
    }

    #[test]
    fn repeat_sign_in_keeps_stored_display_name() {
        let mut store = get_test_store();

        let first = authenticate(&credential("apple:123", Some("Alice")), &mut store).unwrap();
        // A changed provider-side name must not overwrite the local profile.
        let second = authenticate(&credential("apple:123", Some("Bob")), &mut store).unwrap();

        assert_eq!(second.user_id(), first.user_id());
        assert_eq!(second.display_name(), "Alice");
    }

    #[test]
    fn empty_subject_id_is_rejected_without_creating_a_record() {
        let mut store = get_test_store();

        let result = authenticate(&credential("", Some("Alice")), &mut store);

        assert_eq!(result, Err(Error::InvalidCredential));
    }

    #[test]
    fn blank_subject_id_is_rejected() {
        let mut store = get_test_store();

        let result = authenticate(&credential("   ", None), &mut store);

        assert_eq!(result, Err(Error::InvalidCredential));
    }
}
