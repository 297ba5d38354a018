//! Bridge port: the single REST backend fronting the light and fan.

use std::future::Future;

use globo_skill_domain::command::BridgeRequest;
use globo_skill_domain::outcome::BackendOutcome;

/// Client for the Globo bridge.
///
/// Implementations own the base URL, credential and timeouts. A call never
/// fails and never stays pending forever: every failure mode is folded into
/// [`BackendOutcome::HttpFailure`] or [`BackendOutcome::TransportFailure`].
pub trait BridgeClient: Send + Sync {
    /// Issue `request` and resolve exactly once.
    fn call(&self, request: BridgeRequest) -> impl Future<Output = BackendOutcome> + Send;
}
