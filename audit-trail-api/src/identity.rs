/// Source of the current actor's identity.
///
/// Queried once per change group; `None` means no authenticated actor and is
/// stored as a null username on the group.
pub trait IdentityProvider: Send + Sync {
    /// Returns the username of the current actor, if any
    fn current_username(&self) -> Option<String>;
}

/// Identity provider for contexts without authentication (batch jobs, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymousIdentity;

impl IdentityProvider for AnonymousIdentity {
    fn current_username(&self) -> Option<String> {
        None
    }
}
