//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, PickupPointQuery, ReceptionLifecycle, TokenVerifier};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub lifecycle: Arc<dyn ReceptionLifecycle>,
    pub pickup_points: Arc<dyn PickupPointQuery>,
    pub accounts: Arc<dyn AccountService>,
    pub tokens: Arc<dyn TokenVerifier>,
}

impl HttpState {
    /// Bundle the intake and account ports.
    pub fn new(
        lifecycle: Arc<dyn ReceptionLifecycle>,
        pickup_points: Arc<dyn PickupPointQuery>,
        accounts: Arc<dyn AccountService>,
        tokens: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            lifecycle,
            pickup_points,
            accounts,
            tokens,
        }
    }
}
