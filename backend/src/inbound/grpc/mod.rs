//! gRPC inbound adapter serving the unpaginated pickup point listing.
//!
//! The service skeleton is generated by `build.rs`; this module supplies the
//! prost messages and an implementation backed by [`PickupPointQuery`].

pub mod proto;

#[allow(clippy::all, clippy::pedantic, missing_docs)]
mod generated {
    include!(concat!(env!("OUT_DIR"), "/pvz.v1.PvzService.rs"));
}

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::error;

pub use generated::pvz_service_server::{PvzService, PvzServiceServer};

use crate::domain::IntakeError;
use crate::domain::ports::PickupPointQuery;
use proto::{GetPvzListRequest, GetPvzListResponse, Pvz};

fn status_for(error: IntakeError) -> Status {
    match error {
        IntakeError::StorageUnavailable { message } => {
            error!(%message, "pickup point listing unavailable");
            Status::unavailable("storage unavailable")
        }
        other => {
            error!(error = %other, "pickup point listing failed");
            Status::internal("internal error")
        }
    }
}

/// [`PvzService`] implementation listing every pickup point.
#[derive(Clone)]
pub struct PvzGrpcService {
    pickup_points: Arc<dyn PickupPointQuery>,
}

impl PvzGrpcService {
    pub fn new(pickup_points: Arc<dyn PickupPointQuery>) -> Self {
        Self { pickup_points }
    }

    /// Wrap the service for registration with a tonic router.
    pub fn into_server(self) -> PvzServiceServer<Self> {
        PvzServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl PvzService for PvzGrpcService {
    async fn get_pvz_list(
        &self,
        _request: Request<GetPvzListRequest>,
    ) -> Result<Response<GetPvzListResponse>, Status> {
        let points = self
            .pickup_points
            .list_all_pickup_points()
            .await
            .map_err(status_for)?;
        Ok(Response::new(GetPvzListResponse {
            pvzs: points.into_iter().map(Pvz::from).collect(),
        }))
    }
}
