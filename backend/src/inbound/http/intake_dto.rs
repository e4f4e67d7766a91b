//! Response bodies shared by the intake handlers.
//!
//! Domain entities stay free of serde; these bodies fix the camelCase wire
//! shape and render enums through their canonical values.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{PickupPoint, PickupPointDetail, Product, Reception, ReceptionDetail};

/// Pickup point as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PickupPointBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "date-time")]
    pub registration_date: String,
    #[schema(example = "Москва")]
    pub city: String,
}

impl From<PickupPoint> for PickupPointBody {
    fn from(value: PickupPoint) -> Self {
        Self {
            id: value.id.to_string(),
            registration_date: value.registration_date.to_rfc3339(),
            city: value.city.as_str().to_owned(),
        }
    }
}

/// Reception as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "date-time")]
    pub date_time: String,
    #[schema(format = "uuid")]
    pub pvz_id: String,
    #[schema(example = "in_progress")]
    pub status: String,
}

impl From<Reception> for ReceptionBody {
    fn from(value: Reception) -> Self {
        Self {
            id: value.id.to_string(),
            date_time: value.created_at.to_rfc3339(),
            pvz_id: value.pickup_point_id.to_string(),
            status: value.status.as_str().to_owned(),
        }
    }
}

/// Product as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "date-time")]
    pub date_time: String,
    #[serde(rename = "type")]
    #[schema(example = "электроника")]
    pub product_type: String,
    #[schema(format = "uuid")]
    pub reception_id: String,
}

impl From<Product> for ProductBody {
    fn from(value: Product) -> Self {
        Self {
            id: value.id.to_string(),
            date_time: value.created_at.to_rfc3339(),
            product_type: value.product_type.as_str().to_owned(),
            reception_id: value.reception_id.to_string(),
        }
    }
}

/// Reception with the products received during it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReceptionDetailBody {
    pub reception: ReceptionBody,
    pub products: Vec<ProductBody>,
}

impl From<ReceptionDetail> for ReceptionDetailBody {
    fn from(value: ReceptionDetail) -> Self {
        Self {
            reception: value.reception.into(),
            products: value.products.into_iter().map(ProductBody::from).collect(),
        }
    }
}

/// Entry of the `GET /pvz` listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PickupPointDetailBody {
    pub pvz: PickupPointBody,
    pub receptions: Vec<ReceptionDetailBody>,
}

impl From<PickupPointDetail> for PickupPointDetailBody {
    fn from(value: PickupPointDetail) -> Self {
        Self {
            pvz: value.pickup_point.into(),
            receptions: value
                .receptions
                .into_iter()
                .map(ReceptionDetailBody::from)
                .collect(),
        }
    }
}
