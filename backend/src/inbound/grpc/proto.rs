//! Protobuf messages for the `pvz.v1` package.
//!
//! ```text
//! service PvzService {
//!   rpc GetPVZList(GetPvzListRequest) returns (GetPvzListResponse);
//! }
//! message Pvz {
//!   string id = 1;
//!   google.protobuf.Timestamp registration_date = 2;
//!   string city = 3;
//! }
//! ```

use chrono::{DateTime, Utc};
use prost_types::Timestamp;

use crate::domain::PickupPoint;

/// A pickup point as sent over the wire.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Pvz {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(message, optional, tag = "2")]
    pub registration_date: Option<Timestamp>,
    #[prost(string, tag = "3")]
    pub city: String,
}

/// Empty request for the full listing.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetPvzListRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetPvzListResponse {
    #[prost(message, repeated, tag = "1")]
    pub pvzs: Vec<Pvz>,
}

fn timestamp(instant: DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: instant.timestamp(),
        nanos: i32::try_from(instant.timestamp_subsec_nanos()).unwrap_or(0),
    }
}

impl From<PickupPoint> for Pvz {
    fn from(value: PickupPoint) -> Self {
        Self {
            id: value.id.to_string(),
            registration_date: Some(timestamp(value.registration_date)),
            city: value.city.as_str().to_owned(),
        }
    }
}
