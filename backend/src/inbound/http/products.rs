//! Product handlers.
//!
//! ```text
//! POST /products {"pvzId":"...","type":"электроника"}
//! POST /pvz/{pvzId}/delete_last_product
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Role;
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::intake_dto::ProductBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_product_type, parse_uuid};

/// Request body for `POST /products`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductBody {
    #[schema(format = "uuid")]
    pub pvz_id: String,
    #[serde(rename = "type")]
    #[schema(example = "электроника")]
    pub product_type: String,
}

/// Add a product to the open reception. Employees only.
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductBody,
    responses(
        (status = 201, description = "Product added", body = ProductBody),
        (status = 400, description = "Unknown pickup point or no open reception", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Not an employee", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<CreateProductBody>,
) -> ApiResult<HttpResponse> {
    auth.require_role(Role::Employee)?;
    let pickup_point_id = parse_uuid(&payload.pvz_id, FieldName::new("pvzId"))?;
    let product_type = parse_product_type(&payload.product_type, FieldName::new("type"))?;
    let product = state
        .lifecycle
        .create_product(pickup_point_id, product_type)
        .await?;
    Ok(HttpResponse::Created().json(ProductBody::from(product)))
}

/// Remove the most recently added product of the open reception.
/// Employees only.
#[utoipa::path(
    post,
    path = "/pvz/{pvzId}/delete_last_product",
    params(("pvzId" = uuid::Uuid, Path, description = "Pickup point identifier")),
    responses(
        (status = 200, description = "Product removed"),
        (status = 400, description = "Unknown pickup point, no open reception or nothing to delete", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Not an employee", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "deleteLastProduct"
)]
#[post("/pvz/{pvzId}/delete_last_product")]
pub async fn delete_last_product(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    auth.require_role(Role::Employee)?;
    let pickup_point_id = parse_uuid(&path, FieldName::new("pvzId"))?;
    state.lifecycle.delete_last_product(pickup_point_id).await?;
    Ok(HttpResponse::Ok().finish())
}
