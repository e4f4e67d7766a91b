//! Generate the gRPC service skeleton for the pickup point listing.
//!
//! Messages are hand-written prost types in `src/inbound/grpc/proto.rs`, so
//! the service is described with `tonic-build`'s manual builder and no
//! `protoc` is required at build time.

use tonic_build::manual::{Builder, Method, Service};

fn main() {
    let service = Service::builder()
        .name("PvzService")
        .package("pvz.v1")
        .method(
            Method::builder()
                .name("get_pvz_list")
                .route_name("GetPVZList")
                .input_type("crate::inbound::grpc::proto::GetPvzListRequest")
                .output_type("crate::inbound::grpc::proto::GetPvzListResponse")
                .codec_path("tonic_prost::ProstCodec")
                .build(),
        )
        .build();

    Builder::new().build_client(false).compile(&[service]);
    println!("cargo:rerun-if-changed=build.rs");
}
