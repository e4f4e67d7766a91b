//! Reception handlers.
//!
//! ```text
//! POST /receptions {"pvzId":"..."}
//! POST /pvz/{pvzId}/close_last_reception
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Role;
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::intake_dto::ReceptionBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Request body for `POST /receptions`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceptionBody {
    #[schema(format = "uuid")]
    pub pvz_id: String,
}

/// Open a reception at a pickup point. Employees only.
#[utoipa::path(
    post,
    path = "/receptions",
    request_body = CreateReceptionBody,
    responses(
        (status = 201, description = "Reception opened", body = ReceptionBody),
        (status = 400, description = "Unknown pickup point or reception already open", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Not an employee", body = ErrorSchema)
    ),
    tags = ["receptions"],
    operation_id = "createReception"
)]
#[post("/receptions")]
pub async fn create_reception(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<CreateReceptionBody>,
) -> ApiResult<HttpResponse> {
    auth.require_role(Role::Employee)?;
    let pickup_point_id = parse_uuid(&payload.pvz_id, FieldName::new("pvzId"))?;
    let reception = state.lifecycle.create_reception(pickup_point_id).await?;
    Ok(HttpResponse::Created().json(ReceptionBody::from(reception)))
}

/// Close the open reception of a pickup point. Employees only.
#[utoipa::path(
    post,
    path = "/pvz/{pvzId}/close_last_reception",
    params(("pvzId" = uuid::Uuid, Path, description = "Pickup point identifier")),
    responses(
        (status = 200, description = "Reception closed", body = ReceptionBody),
        (status = 400, description = "Unknown pickup point, no reception or already closed", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Not an employee", body = ErrorSchema)
    ),
    tags = ["receptions"],
    operation_id = "closeLastReception"
)]
#[post("/pvz/{pvzId}/close_last_reception")]
pub async fn close_last_reception(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<ReceptionBody>> {
    auth.require_role(Role::Employee)?;
    let pickup_point_id = parse_uuid(&path, FieldName::new("pvzId"))?;
    let reception = state.lifecycle.close_reception(pickup_point_id).await?;
    Ok(web::Json(reception.into()))
}
