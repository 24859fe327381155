//! The identity provider seam.
//!
//! Authorization never reads an ambient session. Callers obtain the current
//! identity from an [`IdentityProvider`] and pass it into each action.

use tracing::warn;
use uuid::Uuid;

use crate::models::Identity;
use crate::store::Datastore;

/// Supplies the identity of whoever triggered the current action.
pub trait IdentityProvider {
    /// Returns the requester's identity, or `None` if nobody is signed in.
    fn current_identity(&self) -> Option<Identity>;
}

/// Resolves a claimed user id against the user store.
///
/// The claim comes from whatever authenticated the request upstream; an
/// absent claim, an unknown user or a failing store all mean nobody is
/// signed in.
pub struct StoreIdentity<'a, S> {
    store: &'a S,
    user_id: Option<Uuid>,
}

impl<'a, S: Datastore> StoreIdentity<'a, S> {
    /// Creates a provider for the given claimed user id.
    pub fn new(store: &'a S, user_id: Option<Uuid>) -> Self {
        Self { store, user_id }
    }
}

impl<S: Datastore> IdentityProvider for StoreIdentity<'_, S> {
    fn current_identity(&self) -> Option<Identity> {
        let user_id = self.user_id?;

        match self.store.transaction(|tx| tx.users().get(user_id)) {
            Ok(user) => user.map(|user| user.identity()),
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "Identity lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, User};
    use crate::store::{MemoryStore, StoreResult};
    use chrono::Utc;

    fn store_with_user(role: Role) -> (MemoryStore, Uuid) {
        let store = MemoryStore::new();
        let user = User {
            id: Uuid::new_v4(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: String::new(),
            role,
            created_at: Utc::now(),
        };
        let id = user.id;
        store
            .transaction(|tx| -> StoreResult<User> { tx.users().insert(user) })
            .unwrap();
        (store, id)
    }

    #[test]
    fn test_known_user_resolves_to_identity() {
        let (store, id) = store_with_user(Role::Employee);

        let identity = StoreIdentity::new(&store, Some(id)).current_identity();

        assert_eq!(
            identity,
            Some(Identity {
                id,
                role: Role::Employee
            })
        );
    }

    #[test]
    fn test_unknown_user_is_nobody() {
        let (store, _) = store_with_user(Role::Admin);
        assert_eq!(
            StoreIdentity::new(&store, Some(Uuid::new_v4())).current_identity(),
            None
        );
    }

    #[test]
    fn test_missing_claim_is_nobody() {
        let (store, _) = store_with_user(Role::Admin);
        assert_eq!(StoreIdentity::new(&store, None).current_identity(), None);
    }
}
