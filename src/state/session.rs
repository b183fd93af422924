/// The login session flag
///
/// A boolean gate for the non-login screens, set on successful login
/// and cleared on logout. This is a UI gate only: the real credential
/// is the cookie the HTTP client holds, and the service rejects stale
/// cookies on its own.

use tracing::warn;

use super::storage::{StoragePort, SESSION_KEY};

pub struct Session {
    authenticated: bool,
    port: Box<dyn StoragePort>,
}

impl Session {
    pub fn load(port: Box<dyn StoragePort>) -> Self {
        let authenticated = port
            .get(SESSION_KEY)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or(false);

        Session {
            authenticated,
            port,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn log_in(&mut self) {
        self.authenticated = true;
        if let Err(e) = self.port.set(SESSION_KEY, "true") {
            warn!("could not persist session flag: {e}");
        }
    }

    pub fn log_out(&mut self) {
        self.authenticated = false;
        if let Err(e) = self.port.remove(SESSION_KEY) {
            warn!("could not clear session flag: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::state::storage::MemoryStorage;

    #[test]
    fn test_fresh_storage_means_logged_out() {
        let session = Session::load(Box::new(MemoryStorage::new()));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_then_logout() {
        let mut session = Session::load(Box::new(MemoryStorage::new()));
        session.log_in();
        assert!(session.is_authenticated());
        session.log_out();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_persisted_flag_survives_reload() {
        let mut values = HashMap::new();
        values.insert(SESSION_KEY.to_string(), "true".to_string());
        let session = Session::load(Box::new(MemoryStorage::with_values(values)));
        assert!(session.is_authenticated());
    }
}
