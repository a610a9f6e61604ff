//! Session store: the authenticated identity and its bearer credential.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owned by the composition root (`app::App`) and lent to views. Views read
//! it while requests are in flight; only the root mutates it, in response to
//! a successful login/signup or an explicit logout.
//!
//! DESIGN
//! ======
//! Every mutation is mirrored to durable storage immediately (write when
//! non-empty, delete when empty), so memory and storage cannot diverge across
//! a restart. Storage failures are logged and swallowed; the in-memory value
//! stays authoritative for the running process.
//!
//! Each mutation also advances `epoch`. Views stamp the data they load with
//! the epoch they loaded under, which lets the root detect and drop data
//! belonging to an earlier session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::{Identity, Role};
use crate::util::storage::KeyValueStorage;

/// Storage key holding the JSON-serialized identity.
pub const USER_KEY: &str = "agc_user";
/// Storage key holding the raw bearer credential.
pub const TOKEN_KEY: &str = "agc_token";

pub struct SessionStore {
    storage: Box<dyn KeyValueStorage>,
    identity: Option<Identity>,
    credential: String,
    epoch: u64,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("identity", &self.identity)
            .field("has_credential", &!self.credential.is_empty())
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Restore a session from `storage`.
    ///
    /// An identity that fails to parse counts as absent. A half-persisted
    /// session (identity without credential or the reverse) is discarded and
    /// both keys are cleared.
    pub fn restore(storage: impl KeyValueStorage + 'static) -> Self {
        let identity = storage.get_item(USER_KEY).and_then(|raw| match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!(error = %e, "stored identity unreadable; treating as signed out");
                None
            }
        });
        let credential = storage.get_item(TOKEN_KEY).unwrap_or_default();

        let mut store = Self { storage: Box::new(storage), identity, credential, epoch: 0 };
        if store.identity.is_some() != !store.credential.is_empty() {
            tracing::warn!("stored session incomplete; clearing");
            store.identity = None;
            store.credential.clear();
            store.persist_identity();
            store.persist_credential();
        }
        if let Some(identity) = &store.identity {
            tracing::info!(user = %identity.id, role = %identity.role, "session restored");
        }
        store
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The bearer credential, or `None` when signed out.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        if self.credential.is_empty() { None } else { Some(&self.credential) }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|identity| identity.role)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Generation counter, advanced by every mutation.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Read-only access to the backing storage.
    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }

    pub fn set_identity(&mut self, identity: Option<Identity>) {
        self.identity = identity;
        self.epoch += 1;
        self.persist_identity();
    }

    /// Replace the credential; an empty string signs the credential out.
    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.credential = credential.into();
        self.epoch += 1;
        self.persist_credential();
    }

    /// Install a complete session in one step.
    pub fn establish(&mut self, identity: Identity, credential: impl Into<String>) {
        tracing::info!(user = %identity.id, role = %identity.role, "session established");
        self.set_identity(Some(identity));
        self.set_credential(credential);
    }

    /// Clear identity and credential, in memory and in storage.
    pub fn logout(&mut self) {
        if let Some(identity) = &self.identity {
            tracing::info!(user = %identity.id, "session cleared");
        }
        self.set_identity(None);
        self.set_credential(String::new());
    }

    fn persist_identity(&mut self) {
        let result = match &self.identity {
            Some(identity) => match serde_json::to_string(identity) {
                Ok(raw) => self.storage.set_item(USER_KEY, &raw),
                Err(e) => Err(e.into()),
            },
            None => self.storage.remove_item(USER_KEY),
        };
        if let Err(e) = result {
            tracing::warn!(key = USER_KEY, error = %e, "failed to persist identity");
        }
    }

    fn persist_credential(&mut self) {
        let result = if self.credential.is_empty() {
            self.storage.remove_item(TOKEN_KEY)
        } else {
            self.storage.set_item(TOKEN_KEY, &self.credential)
        };
        if let Err(e) = result {
            tracing::warn!(key = TOKEN_KEY, error = %e, "failed to persist credential");
        }
    }
}
