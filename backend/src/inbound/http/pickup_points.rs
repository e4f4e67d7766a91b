//! Pickup point handlers.
//!
//! ```text
//! POST /pvz {"city":"Москва"}
//! GET /pvz?startDate=2025-04-01T00:00:00Z&page=1&limit=10
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreatePickupPointRequest, ListPickupPointsRequest};
use crate::domain::{PageRequest, ReceptionWindow, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::intake_dto::{PickupPointBody, PickupPointDetailBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_city, parse_optional_integer, parse_optional_rfc3339_timestamp,
    parse_optional_uuid,
};

/// Request body for `POST /pvz`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePickupPointBody {
    /// Generated when absent.
    #[schema(format = "uuid")]
    pub id: Option<String>,
    #[schema(example = "Москва")]
    pub city: String,
    /// Defaults to the current time; must not lie in the future.
    #[schema(format = "date-time")]
    pub registration_date: Option<String>,
}

/// Query string accepted by `GET /pvz`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListPickupPointsQuery {
    /// Earliest reception creation time to include.
    #[param(format = "date-time")]
    pub start_date: Option<String>,
    /// Latest reception creation time to include.
    #[param(format = "date-time")]
    pub end_date: Option<String>,
    /// One-based page; defaults to 1.
    pub page: Option<String>,
    /// Page size; defaults to 10 and is capped at 30.
    pub limit: Option<String>,
}

fn parse_list_query(query: &ListPickupPointsQuery) -> ApiResult<ListPickupPointsRequest> {
    let page = parse_optional_integer(query.page.as_deref(), FieldName::new("page"))?;
    let limit = parse_optional_integer(query.limit.as_deref(), FieldName::new("limit"))?;
    Ok(ListPickupPointsRequest {
        page: PageRequest::new(page, limit),
        window: ReceptionWindow {
            start: parse_optional_rfc3339_timestamp(
                query.start_date.as_deref(),
                FieldName::new("startDate"),
            )?,
            end: parse_optional_rfc3339_timestamp(
                query.end_date.as_deref(),
                FieldName::new("endDate"),
            )?,
        },
    })
}

/// Register a pickup point. Moderators only.
#[utoipa::path(
    post,
    path = "/pvz",
    request_body = CreatePickupPointBody,
    responses(
        (status = 201, description = "Pickup point created", body = PickupPointBody),
        (status = 400, description = "Invalid request or duplicate id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Not a moderator", body = ErrorSchema)
    ),
    tags = ["pvz"],
    operation_id = "createPvz"
)]
#[post("/pvz")]
pub async fn create_pickup_point(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<CreatePickupPointBody>,
) -> ApiResult<HttpResponse> {
    auth.require_role(Role::Moderator)?;
    let body = payload.into_inner();
    let request = CreatePickupPointRequest {
        id: parse_optional_uuid(body.id.as_deref(), FieldName::new("id"))?,
        city: parse_city(&body.city, FieldName::new("city"))?,
        registration_date: parse_optional_rfc3339_timestamp(
            body.registration_date.as_deref(),
            FieldName::new("registrationDate"),
        )?,
    };
    let point = state.lifecycle.create_pickup_point(request).await?;
    Ok(HttpResponse::Created().json(PickupPointBody::from(point)))
}

/// List pickup points with their receptions and products. Any role.
#[utoipa::path(
    get,
    path = "/pvz",
    params(ListPickupPointsQuery),
    responses(
        (status = 200, description = "Pickup points page", body = [PickupPointDetailBody]),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["pvz"],
    operation_id = "listPvz"
)]
#[get("/pvz")]
pub async fn list_pickup_points(
    state: web::Data<HttpState>,
    _auth: Authenticated,
    query: web::Query<ListPickupPointsQuery>,
) -> ApiResult<web::Json<Vec<PickupPointDetailBody>>> {
    let request = parse_list_query(&query)?;
    let details = state.pickup_points.list_pickup_points(request).await?;
    Ok(web::Json(
        details
            .into_iter()
            .map(PickupPointDetailBody::from)
            .collect(),
    ))
}

#[cfg(test)]
#[path = "pickup_points_tests.rs"]
mod tests;
