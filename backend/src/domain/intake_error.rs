//! Failures raised by the reception lifecycle service.

use serde_json::json;

use super::Error;
use super::ports::{define_port_error, define_service_error};

define_service_error! {
    /// Business-rule and storage failures for pickup point intake.
    pub enum IntakeError {
        /// The registration date lies in the future.
        InvalidRegistrationDate => "registration date must not be in the future",
            reason = "ERR_DATE_FROM_FUTURE_FOR_REGISTRATION_DATE",
        /// A pickup point with the requested id already exists.
        PickupPointAlreadyExists => "pickup point already exists",
            reason = "ERR_PVZ_ALREADY_EXIST",
        /// The referenced pickup point does not exist.
        PickupPointNotFound => "pickup point does not exist",
            reason = "ERR_PVZ_DOESNT_EXIST",
        /// The pickup point already has a reception in progress.
        ReceptionAlreadyOpen => "a reception is already in progress for this pickup point",
            reason = "ERR_RECEPTION_ALREADY_EXIST",
        /// The pickup point has never had a reception.
        ReceptionNotFound => "no reception exists for this pickup point",
            reason = "ERR_RECEPTION_DOESNT_EXIST",
        /// The latest reception of the pickup point is closed.
        ReceptionNotOpen => "the latest reception is not in progress",
            reason = "ERR_WRONG_RECEPTION_STATUS",
        /// The open reception has no products left to remove.
        NoProductsToDelete => "the reception has no products to delete",
            reason = "ERR_NO_PRODUCTS_TO_DELETE",
        /// Storage could not be reached.
        StorageUnavailable { message: String } => "intake storage unavailable: {message}",
            reason = "ERR_STORAGE_UNAVAILABLE",
        /// Storage failed while executing a query.
        Storage { message: String } => "intake storage failed: {message}",
            reason = "ERR_STORAGE",
    }
}

impl From<IntakeError> for Error {
    fn from(value: IntakeError) -> Self {
        let reason = value.reason();
        let error = match &value {
            IntakeError::StorageUnavailable { .. } => Error::service_unavailable(value.to_string()),
            IntakeError::Storage { .. } => Error::internal(value.to_string()),
            _ => Error::invalid_request(value.to_string()),
        };
        error.with_details(json!({ "reason": reason }))
    }
}
