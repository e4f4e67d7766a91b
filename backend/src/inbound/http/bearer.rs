//! Bearer token extractor resolving the request principal.
//!
//! Handlers take [`Authenticated`] as an argument; role checks stay explicit
//! in each handler through [`Authenticated::require_role`].

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{AuthError, Error, Principal, Role};
use crate::inbound::http::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Principal resolved from a valid `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct Authenticated(Principal);

impl Authenticated {
    /// Borrow the resolved principal.
    pub fn principal(&self) -> &Principal {
        &self.0
    }

    /// Return the principal when it holds `role`, otherwise `403`.
    pub fn require_role(&self, role: Role) -> Result<&Principal, Error> {
        self.0.require_role(role)?;
        Ok(&self.0)
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively; an empty token is treated as
/// absent.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequest for Authenticated {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .map(str::to_owned);

        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let Some(token) = token else {
                debug!("request carried no bearer token");
                return Err(Error::from(AuthError::Unauthenticated).into());
            };
            let principal = state.tokens.verify(&token).await.map_err(Error::from)?;
            Ok(Authenticated(principal))
        })
    }
}
