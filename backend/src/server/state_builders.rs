//! Builders wiring repositories, security adapters and services into the
//! state shared by the HTTP and gRPC servers.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use pvz_backend::domain::ports::{
    AccountService, FixtureIntakeRepository, FixtureUserRepository, IntakeRepository,
    PickupPointQuery, ReceptionLifecycle, TokenVerifier, UserRepository,
};
use pvz_backend::domain::{
    AuthenticationService, PickupPointQueryService, ReceptionLifecycleService,
};
use pvz_backend::inbound::http::state::HttpState;
use pvz_backend::outbound::persistence::{DbPool, DieselIntakeRepository, DieselUserRepository};
use pvz_backend::outbound::security::{Argon2PasswordHasher, JwtTokenCodec};

use super::ServerConfig;

/// Driving ports shared by both inbound adapters.
#[derive(Clone)]
pub(super) struct AppServices {
    pub(super) lifecycle: Arc<dyn ReceptionLifecycle>,
    pub(super) pickup_points: Arc<dyn PickupPointQuery>,
    pub(super) accounts: Arc<dyn AccountService>,
    pub(super) tokens: Arc<dyn TokenVerifier>,
}

impl AppServices {
    pub(super) fn http_state(&self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            self.lifecycle.clone(),
            self.pickup_points.clone(),
            self.accounts.clone(),
            self.tokens.clone(),
        ))
    }
}

fn build_with_repositories<I, U>(
    intake: Arc<I>,
    users: Arc<U>,
    jwt_secret: &[u8],
    clock: Arc<dyn Clock>,
) -> AppServices
where
    I: IntakeRepository + 'static,
    U: UserRepository + 'static,
{
    let lifecycle = Arc::new(ReceptionLifecycleService::new(intake.clone(), clock.clone()));
    let pickup_points = Arc::new(PickupPointQueryService::new(intake));
    let auth = Arc::new(AuthenticationService::new(
        users,
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(JwtTokenCodec::new(jwt_secret)),
        clock,
    ));
    AppServices {
        lifecycle,
        pickup_points,
        accounts: auth.clone(),
        tokens: auth,
    }
}

fn build_db_services(pool: &DbPool, jwt_secret: &[u8], clock: Arc<dyn Clock>) -> AppServices {
    build_with_repositories(
        Arc::new(DieselIntakeRepository::new(pool.clone())),
        Arc::new(DieselUserRepository::new(pool.clone())),
        jwt_secret,
        clock,
    )
}

/// Build the services using Diesel repositories when a pool is configured,
/// otherwise fixture repositories that never reach storage.
pub(super) fn build_services(config: &ServerConfig) -> AppServices {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => build_db_services(pool, &config.jwt_secret, clock),
        None => build_with_repositories(
            Arc::new(FixtureIntakeRepository),
            Arc::new(FixtureUserRepository),
            &config.jwt_secret,
            clock,
        ),
    }
}
