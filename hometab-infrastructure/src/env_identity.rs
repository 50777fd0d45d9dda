use std::{env, sync::RwLock};

use hometab_application::{AuthError, IdentityProvider, Session};

/// Identity provider backed by environment configuration.
///
/// `HOMETAB_USER_ID` (and optionally `HOMETAB_USER_EMAIL`) stand in for
/// the hosted provider's credentials; a configured user is treated as a
/// persisted session and restored on startup, exactly like the hosted
/// provider's session-restore check.
pub struct EnvIdentityProvider {
    configured: Option<Session>,
    current: RwLock<Option<Session>>,
}

impl EnvIdentityProvider {
    pub fn from_env() -> Self {
        let user_id = env::var("HOMETAB_USER_ID")
            .ok()
            .filter(|value| !value.is_empty());
        let email = env::var("HOMETAB_USER_EMAIL")
            .ok()
            .filter(|value| !value.is_empty());
        let configured = user_id.map(|user_id| Session { user_id, email });
        Self {
            current: RwLock::new(configured.clone()),
            configured,
        }
    }

    /// Provider with a fixed session, for wiring tests and demos.
    pub fn with_session(session: Session) -> Self {
        Self {
            current: RwLock::new(Some(session.clone())),
            configured: Some(session),
        }
    }
}

impl IdentityProvider for EnvIdentityProvider {
    fn sign_in(&self) -> Result<Session, AuthError> {
        let session = self
            .configured
            .clone()
            .ok_or(AuthError::NotConfigured)?;
        *self.current.write().expect("session lock poisoned") = Some(session.clone());
        tracing::info!("Signed in as {}", session.user_id);
        Ok(session)
    }

    fn sign_out(&self) {
        *self.current.write().expect("session lock poisoned") = None;
        tracing::info!("User signed out");
    }

    fn restore(&self) -> Option<Session> {
        self.current.read().expect("session lock poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            user_id: "uid-1".to_string(),
            email: Some("alice@example.com".to_string()),
        }
    }

    #[test]
    fn configured_session_is_restored_until_sign_out() {
        let provider = EnvIdentityProvider::with_session(session());

        assert_eq!(provider.restore(), Some(session()));

        provider.sign_out();
        assert_eq!(provider.restore(), None);

        let signed_in = provider.sign_in().expect("configured provider");
        assert_eq!(signed_in, session());
        assert_eq!(provider.restore(), Some(session()));
    }

    #[test]
    fn unconfigured_provider_rejects_sign_in() {
        let provider = EnvIdentityProvider {
            configured: None,
            current: RwLock::new(None),
        };

        assert_eq!(provider.restore(), None);
        assert_eq!(provider.sign_in(), Err(AuthError::NotConfigured));
    }
}
