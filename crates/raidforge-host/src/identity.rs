//! Identity resolution hook.

use raidforge_types::{AltProfile, CharId};

use crate::HostError;

/// Maps any character to its main identity and full alternate set.
///
/// The coordinator treats this as a pure lookup: it is called afresh for
/// each operation, and whatever it returns at join time is snapshotted
/// into the raider record.
///
/// # Trait bounds
///
/// - `Send + Sync` → the resolver is shared across async tasks.
/// - `'static` → it doesn't borrow temporary data; it lives as long as
///   the coordinator.
///
/// # Example
///
/// ```rust
/// use raidforge_host::{HostError, IdentityResolver};
/// use raidforge_types::{AltProfile, CharId, Character};
///
/// /// Treats every character as its own main with no alts.
/// /// Fine for hosts without an alt system.
/// struct NoAlts;
///
/// impl IdentityResolver for NoAlts {
///     async fn resolve(&self, id: CharId) -> Result<AltProfile, HostError> {
///         Ok(AltProfile::solo(Character::new(id, id.to_string())))
///     }
/// }
/// ```
pub trait IdentityResolver: Send + Sync + 'static {
    /// Resolves a character to its alt profile (main first).
    ///
    /// # Errors
    /// [`HostError::UnknownIdentity`] if the service has never seen the
    /// character.
    fn resolve(
        &self,
        id: CharId,
    ) -> impl std::future::Future<Output = Result<AltProfile, HostError>> + Send;
}
