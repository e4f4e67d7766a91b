//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (auth, pickup
//!   points, receptions, products, health)
//! - **Schemas**: Wire DTOs plus the domain error wrappers ([`ErrorSchema`],
//!   [`ErrorCodeSchema`]) that keep domain types free of utoipa derives
//! - **Security**: Bearer JWT authentication scheme
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth::{
    DummyLoginRequest, LoginRequest, RegisterRequest, TokenResponse, UserBody,
};
use crate::inbound::http::intake_dto::{
    PickupPointBody, PickupPointDetailBody, ProductBody, ReceptionBody, ReceptionDetailBody,
};
use crate::inbound::http::pickup_points::CreatePickupPointBody;
use crate::inbound::http::products::CreateProductBody;
use crate::inbound::http::receptions::CreateReceptionBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token issued by POST /dummyLogin or POST /login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "PVZ backend API",
        description = "Pickup point goods receiving: pickup points, receptions and products.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::auth::dummy_login,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::pickup_points::create_pickup_point,
        crate::inbound::http::pickup_points::list_pickup_points,
        crate::inbound::http::receptions::create_reception,
        crate::inbound::http::receptions::close_last_reception,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::delete_last_product,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        DummyLoginRequest,
        RegisterRequest,
        LoginRequest,
        TokenResponse,
        UserBody,
        CreatePickupPointBody,
        CreateReceptionBody,
        CreateProductBody,
        PickupPointBody,
        ReceptionBody,
        ProductBody,
        ReceptionDetailBody,
        PickupPointDetailBody,
    )),
    tags(
        (name = "auth", description = "Token issuing, registration and login"),
        (name = "pvz", description = "Pickup point registration and listing"),
        (name = "receptions", description = "Opening and closing receptions"),
        (name = "products", description = "Adding and removing received products"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn openapi_registers_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");
        assert!(
            matches!(
                components.security_schemes.get(BEARER_SCHEME),
                Some(SecurityScheme::Http(_))
            ),
            "bearer scheme registered"
        );
    }

    #[rstest]
    #[case("/dummyLogin")]
    #[case("/register")]
    #[case("/login")]
    #[case("/pvz")]
    #[case("/receptions")]
    #[case("/products")]
    #[case("/pvz/{pvzId}/close_last_reception")]
    #[case("/pvz/{pvzId}/delete_last_product")]
    #[case("/health/ready")]
    fn openapi_documents_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn openapi_pickup_point_body_uses_wire_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let body = schemas.get("PickupPointBody").expect("PickupPointBody schema");
        assert_object_schema_has_field(body, "registrationDate");
        assert_object_schema_has_field(body, "city");
    }
}
