// ── Session manager ──
//
// Owns the current-user identity and the restore/login/register/logout
// lifecycle. State transitions are published through a `watch` channel so
// every consumer observes the same session.
//
// Invariant: the session is always exactly Anonymous or Authenticated.
// A credential without an identity never survives `restore()`; a failed
// login or register changes nothing.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{debug, warn};

use stockdeck_api::ApiClient;
use stockdeck_api::types::AuthPayload;

use crate::credentials::{CredentialStore, StoredCredentials};
use crate::error::CoreError;
use crate::model::Identity;

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(Arc<Identity>),
}

impl SessionState {
    pub fn identity(&self) -> Option<&Arc<Identity>> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Anonymous => None,
        }
    }
}

/// The process-wide session context.
///
/// Constructed once, injected into consumers; there are no ambient
/// globals. The bearer credential lives in the shared `ApiClient` slot so
/// every request layer sees the same token.
pub struct Session {
    api: Arc<ApiClient>,
    credentials: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
}

impl Session {
    pub fn new(api: Arc<ApiClient>, credentials: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Anonymous);
        Self {
            api,
            credentials,
            state,
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Restore a previous session from the credential store.
    ///
    /// If a token is stored, installs it and asks the service who it
    /// belongs to. Success refreshes the cached profile; any failure --
    /// expired token, network trouble, corrupt store -- clears everything
    /// and lands on Anonymous. Never returns an error and never leaves
    /// the session half-restored.
    pub async fn restore(&self) -> SessionState {
        let stored = match self.credentials.load() {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                debug!("no stored session");
                return self.publish(SessionState::Anonymous);
            }
            Err(e) => {
                warn!(error = %e, "credential store unreadable; starting anonymous");
                let _ = self.credentials.clear();
                return self.publish(SessionState::Anonymous);
            }
        };

        self.api.set_bearer(SecretString::from(stored.token.clone()));

        match self.api.check().await {
            Ok(user) => {
                let identity = Arc::new(Identity::from(user));
                // Re-persist so the cached profile tracks the service's answer.
                if let Err(e) = self.credentials.save(&StoredCredentials {
                    token: stored.token,
                    profile: (*identity).clone(),
                }) {
                    warn!(error = %e, "failed to refresh cached profile");
                }
                debug!(user = %identity.email, "session restored");
                self.publish(SessionState::Authenticated(identity))
            }
            Err(e) => {
                debug!(error = %e, "stored credential rejected; clearing");
                if let Err(e) = self.credentials.clear() {
                    warn!(error = %e, "failed to clear credential store");
                }
                self.api.clear_bearer();
                self.publish(SessionState::Anonymous)
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// On success the credential and profile are persisted and the session
    /// becomes authenticated. On failure the error is surfaced untouched
    /// and neither the store nor the state changes.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Arc<Identity>, CoreError> {
        let payload = self.api.sign_in(email, password).await?;
        self.install(payload)
    }

    /// Create an account and sign in as it.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<Arc<Identity>, CoreError> {
        let payload = self.api.sign_up(name, email, password).await?;
        self.install(payload)
    }

    /// End the session.
    ///
    /// The remote logout is best-effort -- a failure is logged and ignored.
    /// Local credential and identity are cleared unconditionally.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            warn!(error = %e, "remote logout failed (non-fatal)");
        }
        self.forget();
    }

    /// Local-only teardown: clear the credential store, the bearer, and
    /// the identity without calling the service. Used after account
    /// deletion, where the remote session is already gone.
    pub fn forget(&self) {
        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "failed to clear credential store");
        }
        self.api.clear_bearer();
        self.publish(SessionState::Anonymous);
        debug!("session ended");
    }

    // ── State observation ────────────────────────────────────────────

    /// The current session state.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// The authenticated identity, if any.
    pub fn identity(&self) -> Option<Arc<Identity>> {
        self.current().identity().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.current(), SessionState::Authenticated(_))
    }

    /// Subscribe to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Persist a fresh credential + profile pair and publish the
    /// authenticated state. Ordering matters: nothing is installed until
    /// the store write succeeds, so a failed save leaves the session
    /// fully anonymous.
    fn install(&self, payload: AuthPayload) -> Result<Arc<Identity>, CoreError> {
        let identity = Arc::new(Identity::from(payload.user));
        self.credentials.save(&StoredCredentials {
            token: payload.token.clone(),
            profile: (*identity).clone(),
        })?;
        self.api.set_bearer(SecretString::from(payload.token));
        self.publish(SessionState::Authenticated(Arc::clone(&identity)));
        debug!(user = %identity.email, "signed in");
        Ok(identity)
    }

    /// Replace the identity after a profile mutation, keeping the stored
    /// profile slot in sync.
    pub(crate) fn update_identity(&self, identity: Identity) -> Arc<Identity> {
        let identity = Arc::new(identity);
        match self.credentials.load() {
            Ok(Some(mut stored)) => {
                stored.profile = (*identity).clone();
                if let Err(e) = self.credentials.save(&stored) {
                    warn!(error = %e, "failed to persist updated profile");
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "credential store unreadable during profile update"),
        }
        self.publish(SessionState::Authenticated(Arc::clone(&identity)));
        identity
    }

    fn publish(&self, state: SessionState) -> SessionState {
        self.state.send_replace(state.clone());
        state
    }
}
