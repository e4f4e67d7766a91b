//! Paging, date windows and the nested pickup point listing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{PickupPoint, Product, Reception};

/// Page used when the caller supplies none or a non-positive one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller supplies none or a non-positive one.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size served; bigger requests are clamped to it.
pub const MAX_LIMIT: u32 = 30;

/// Normalised one-based page selection.
///
/// ## Invariants
/// - `page >= 1` and `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a page request, replacing absent or non-positive values with
    /// [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`] and clamping `limit` to
    /// [`MAX_LIMIT`].
    ///
    /// # Examples
    /// ```
    /// use pvz_backend::domain::PageRequest;
    ///
    /// let page = PageRequest::new(Some(3), Some(0));
    /// assert_eq!(page.page(), 3);
    /// assert_eq!(page.limit(), 10);
    /// assert_eq!(page.offset(), 20);
    /// ```
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: positive_or(page, DEFAULT_PAGE),
            limit: positive_or(limit, DEFAULT_LIMIT).min(MAX_LIMIT),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1).saturating_mul(i64::from(self.limit))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn positive_or(value: Option<i64>, fallback: u32) -> u32 {
    value
        .filter(|v| *v >= 1)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(fallback)
}

/// Inclusive bounds on reception creation time; open ends are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReceptionWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl ReceptionWindow {
    /// Whether `instant` falls inside the window.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| instant >= start)
            && self.end.is_none_or(|end| instant <= end)
    }
}

/// A reception with the products added to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceptionDetail {
    pub reception: Reception,
    pub products: Vec<Product>,
}

/// A pickup point with its receptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupPointDetail {
    pub pickup_point: PickupPoint,
    pub receptions: Vec<ReceptionDetail>,
}

/// Group products under receptions and receptions under pickup points.
///
/// Pickup point order is preserved; receptions and products keep the order
/// they were supplied in. Rows whose owner is absent are dropped.
pub fn assemble_details(
    pickup_points: Vec<PickupPoint>,
    receptions: Vec<Reception>,
    products: Vec<Product>,
) -> Vec<PickupPointDetail> {
    let mut products_by_reception: HashMap<Uuid, Vec<Product>> = HashMap::new();
    for product in products {
        products_by_reception
            .entry(product.reception_id)
            .or_default()
            .push(product);
    }

    let mut receptions_by_point: HashMap<Uuid, Vec<ReceptionDetail>> = HashMap::new();
    for reception in receptions {
        let products = products_by_reception
            .remove(&reception.id)
            .unwrap_or_default();
        receptions_by_point
            .entry(reception.pickup_point_id)
            .or_default()
            .push(ReceptionDetail {
                reception,
                products,
            });
    }

    pickup_points
        .into_iter()
        .map(|pickup_point| PickupPointDetail {
            receptions: receptions_by_point
                .remove(&pickup_point.id)
                .unwrap_or_default(),
            pickup_point,
        })
        .collect()
}
