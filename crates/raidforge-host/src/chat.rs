//! Chat delivery and presence hook.

use raidforge_types::CharId;

use crate::HostError;

/// The host's messaging and presence surface.
///
/// Everything here is best-effort from the core's perspective: a failed
/// `notify` or `broadcast` is logged and forgotten, never propagated into
/// roster state. Formatting, pagination, and fan-out mechanics are the
/// host's problem — the core hands over short plain-text lines.
pub trait ChatHost: Send + Sync + 'static {
    /// Sends a private message to one character.
    fn notify(
        &self,
        character: CharId,
        message: &str,
    ) -> impl std::future::Future<Output = Result<(), HostError>> + Send;

    /// Sends a message to the session-scoped raid channel.
    fn broadcast(
        &self,
        message: &str,
    ) -> impl std::future::Future<Output = Result<(), HostError>> + Send;

    /// Whether this host can send rate-managed mass messages.
    /// Announcements require it; hosts without the capability make
    /// `Announce` fail cleanly instead of flooding `notify`.
    fn mass_messaging(&self) -> bool;

    /// Queues a mass message to one character.
    fn mass_message(
        &self,
        character: CharId,
        message: &str,
    ) -> impl std::future::Future<Output = Result<(), HostError>> + Send;

    /// Whether the character is currently online.
    fn is_online(
        &self,
        character: CharId,
    ) -> impl std::future::Future<Output = bool> + Send;

    /// Every character the host considers a member (announce audience).
    fn all_members(&self) -> impl std::future::Future<Output = Vec<CharId>> + Send;

    /// Whether the character already sits in the raid channel. Joiners
    /// outside it get flagged as needing an invitation.
    fn in_channel(
        &self,
        character: CharId,
    ) -> impl std::future::Future<Output = bool> + Send;
}
