use tracing::{debug, warn};

use synergy_api::{ApiClient, auth};
use synergy_types::models::{Session, User};

use crate::error::AuthError;
use crate::storage::{SessionStorage, TOKEN_KEY, USER_KEY};

/// The client's one piece of shared state: the authenticated session.
///
/// Pages receive a reference to the store instead of reading ambient
/// globals, so the lifecycle (restore on startup, teardown on logout) is
/// explicit and the store is testable in isolation.
pub struct SessionStore {
    client: ApiClient,
    storage: Box<dyn SessionStorage>,
    session: Session,
}

impl SessionStore {
    /// A store with no session. Most callers want [`SessionStore::restore`].
    pub fn new(client: ApiClient, storage: Box<dyn SessionStorage>) -> Self {
        Self {
            client,
            storage,
            session: Session::default(),
        }
    }

    /// Rebuild the session from persisted state, validating any persisted
    /// token against the backend before trusting it.
    ///
    /// A token that fails validation is discarded along with everything
    /// else persisted: a stale session must never read as "logged in". A
    /// persisted user record without a token (legacy bootstrap) yields a
    /// degraded session.
    pub async fn restore(client: ApiClient, storage: Box<dyn SessionStorage>) -> Self {
        let mut store = Self::new(client, storage);

        if let Some(token) = store.storage.get(TOKEN_KEY) {
            match auth::me(&store.client, &token).await {
                Ok(user) => {
                    debug!("restored session for {}", user.email);
                    store.install(token, User::from(user));
                }
                Err(e) => {
                    warn!("persisted token rejected, clearing session: {e}");
                    store.logout();
                }
            }
        } else if let Some(raw) = store.storage.get(USER_KEY) {
            match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    debug!("restored degraded session for {}", user.email);
                    store.session.user = Some(user);
                }
                Err(e) => {
                    warn!("persisted user record unreadable, discarding: {e}");
                    store.storage.remove(USER_KEY);
                }
            }
        }

        store
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let resp = auth::login(&self.client, email, password)
            .await
            .map_err(AuthError::classify)?;
        self.install(resp.access_token, User::from(resp.user));
        Ok(())
    }

    /// Create the account, then log in with the same credentials: two
    /// network operations treated as one logical action. If the implicit
    /// login fails the whole operation fails and no session state is left
    /// behind.
    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        auth::signup(&self.client, name, email, password)
            .await
            .map_err(AuthError::classify)?;
        self.login(email, password).await
    }

    /// Unconditional teardown; cannot fail. Clears memory and persisted
    /// state even when no session existed.
    pub fn logout(&mut self) {
        self.session = Session::default();
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }

    fn install(&mut self, token: String, user: User) {
        self.storage.put(TOKEN_KEY, &token);
        match serde_json::to_string(&user) {
            Ok(raw) => self.storage.put(USER_KEY, &raw),
            Err(e) => warn!("failed to encode user record: {e}"),
        }
        self.session = Session {
            token: Some(token),
            user: Some(user),
        };
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}
