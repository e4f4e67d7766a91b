//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::{define_port_error, define_service_error};

mod account_service;
mod intake_repository;
mod password_hasher;
mod pickup_point_query;
mod reception_lifecycle;
mod token_codec;
mod user_repository;

#[cfg(test)]
pub use account_service::{MockAccountService, MockTokenVerifier};
pub use account_service::{AccountService, TokenVerifier};
#[cfg(test)]
pub use intake_repository::MockIntakeRepository;
pub use intake_repository::{FixtureIntakeRepository, IntakeRepository, IntakeRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use pickup_point_query::MockPickupPointQuery;
pub use pickup_point_query::{ListPickupPointsRequest, PickupPointQuery};
#[cfg(test)]
pub use reception_lifecycle::MockReceptionLifecycle;
pub use reception_lifecycle::{CreatePickupPointRequest, ReceptionLifecycle};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenCodecError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{
    FixtureUserRepository, NewUser, StoredUser, UserPersistenceError, UserRepository,
};
