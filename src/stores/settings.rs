//! Defines the key-value settings store trait.

use crate::Error;

/// A small key-value store for process-wide settings that must survive
/// restarts, such as the current session (see [crate::session]).
pub trait SettingsStore {
    /// Get the value stored under `key`, or `None` if the key has never been
    /// set.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;

    /// Store several key-value pairs as a single atomic write: either every
    /// pair is persisted or none are.
    ///
    /// Callers storing related keys, such as the session's user ID and
    /// display name, should use this rather than repeated [SettingsStore::set]
    /// calls so a failure cannot leave the keys out of step with each other.
    fn set_many(&mut self, pairs: &[(&str, &str)]) -> Result<(), Error>;
}
