//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use actix_web::web;
use uuid::Uuid;

use crate::domain::ports::{
    MockAccountService, MockPickupPointQuery, MockReceptionLifecycle, MockTokenVerifier,
};
use crate::domain::{AuthError, Principal, Role};
use crate::inbound::http::state::HttpState;

/// Mocked ports handed to [`HttpState`].
///
/// Tests set expectations on the field they exercise and leave the rest
/// untouched, so an unexpected call fails loudly.
pub struct TestPorts {
    pub lifecycle: MockReceptionLifecycle,
    pub pickup_points: MockPickupPointQuery,
    pub accounts: MockAccountService,
    pub tokens: MockTokenVerifier,
}

impl Default for TestPorts {
    fn default() -> Self {
        Self {
            lifecycle: MockReceptionLifecycle::new(),
            pickup_points: MockPickupPointQuery::new(),
            accounts: MockAccountService::new(),
            tokens: role_token_verifier(),
        }
    }
}

impl TestPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(self.lifecycle),
            Arc::new(self.pickup_points),
            Arc::new(self.accounts),
            Arc::new(self.tokens),
        ))
    }
}

/// Verifier accepting the tokens `employee` and `moderator` as principals
/// holding that role and rejecting everything else.
pub fn role_token_verifier() -> MockTokenVerifier {
    let mut tokens = MockTokenVerifier::new();
    tokens.expect_verify().returning(|token| {
        let role = token
            .parse::<Role>()
            .map_err(|_| AuthError::InvalidToken)?;
        Ok(Principal {
            user_id: Uuid::nil(),
            email: format!("{role}@pvz.example"),
            role,
        })
    });
    tokens
}

/// `Authorization` header for a principal holding `role`.
pub fn bearer(role: Role) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {}", role.as_str()))
}
