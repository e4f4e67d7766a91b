//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! REST handlers live under [`http`]; the pickup point listing is also
//! served over gRPC from [`grpc`].

pub mod grpc;
pub mod http;
