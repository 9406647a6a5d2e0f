//! Authorization Guard
//!
//! Single ownership rule for every mutating resource operation: only the
//! identity recorded as a resource's owner may change it. Callers fetch the
//! resource first, check, then mutate.

use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// `true` iff an identity is present and equals the owner
pub fn can_mutate(identity: Option<&UserId>, owner: &UserId) -> bool {
    identity.is_some_and(|id| id == owner)
}

/// [`can_mutate`] as a result: no identity is `Unauthenticated`, a
/// different identity is `Forbidden`
pub fn authorize_mutation(identity: Option<&UserId>, owner: &UserId) -> AuthResult<()> {
    match identity {
        None => Err(AuthError::Unauthenticated),
        Some(_) if can_mutate(identity, owner) => Ok(()),
        Some(id) => {
            tracing::debug!(user_id = %id, owner = %owner, "Ownership check failed");
            Err(AuthError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_mutate() {
        let a = UserId::new();
        let b = UserId::new();

        assert!(can_mutate(Some(&a), &a));
        assert!(!can_mutate(Some(&a), &b));
        assert!(!can_mutate(None, &a));
    }

    #[test]
    fn test_authorize_mutation_outcomes() {
        let a = UserId::new();
        let b = UserId::new();

        assert!(authorize_mutation(Some(&a), &a).is_ok());
        assert!(matches!(
            authorize_mutation(Some(&b), &a),
            Err(AuthError::Forbidden)
        ));
        assert!(matches!(
            authorize_mutation(None, &a),
            Err(AuthError::Unauthenticated)
        ));
    }
}
