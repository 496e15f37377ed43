//! Host standard-permission collaborator.

use refgrant_types::{AccessOp, Actor, Subject};

/// The host framework's standard (non-custom) permission system.
///
/// Consulted on exactly one path: when a subject carries a public
/// grant record, the whole decision is delegated here and custom
/// grants are not consulted. The engine never calls this trait
/// otherwise — deny-by-default and the author fallback are its own
/// rules.
///
/// # Implementors
///
/// - `FixedHostAccess` (in `refgrant-store`) — static answer table
///   for embedding and tests
/// - Host frameworks implement this against their own permission
///   layer
pub trait HostAccess: Send + Sync + std::fmt::Debug {
    /// Returns the host's standard answer for `op` on `subject`.
    fn allows(&self, subject: &Subject, op: AccessOp, actor: &Actor) -> bool;
}
