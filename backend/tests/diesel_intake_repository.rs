//! Integration tests for `DieselIntakeRepository` driven through the intake
//! services against a real PostgreSQL database.
//!
//! Set `PVZ_TEST_DATABASE_URL` to a disposable database to run them; they
//! skip otherwise. Every test works on freshly generated pickup point ids so
//! runs do not interfere with each other or with existing rows.

use std::sync::Arc;

use mockable::DefaultClock;
use pvz_backend::domain::ports::{
    CreatePickupPointRequest, ListPickupPointsRequest, PickupPointQuery, ReceptionLifecycle,
};
use pvz_backend::domain::{
    City, IntakeError, MAX_LIMIT, PageRequest, PickupPointDetail, ProductType, ReceptionStatus,
    ReceptionWindow,
};
use pvz_backend::outbound::persistence::{
    DbPool, DieselIntakeRepository, PoolConfig, run_pending_migrations,
};
use rstest::rstest;
use uuid::Uuid;

const DATABASE_URL_ENV: &str = "PVZ_TEST_DATABASE_URL";

struct Services {
    lifecycle: Arc<dyn ReceptionLifecycle>,
    query: Arc<dyn PickupPointQuery>,
}

async fn services() -> Option<Services> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        eprintln!("{DATABASE_URL_ENV} not set; skipping PostgreSQL integration test");
        return None;
    };
    run_pending_migrations(&url)
        .await
        .expect("migrations apply");
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(4))
        .await
        .expect("pool builds");
    let repository = Arc::new(DieselIntakeRepository::new(pool));
    Some(Services {
        lifecycle: Arc::new(pvz_backend::domain::ReceptionLifecycleService::new(
            repository.clone(),
            Arc::new(DefaultClock),
        )),
        query: Arc::new(pvz_backend::domain::PickupPointQueryService::new(repository)),
    })
}

async fn new_pickup_point(services: &Services) -> Uuid {
    let id = Uuid::new_v4();
    services
        .lifecycle
        .create_pickup_point(CreatePickupPointRequest {
            id: Some(id),
            city: City::Moscow,
            registration_date: None,
        })
        .await
        .expect("pickup point created");
    id
}

/// Walk the listing page by page until the pickup point shows up.
async fn find_detail(services: &Services, id: Uuid) -> PickupPointDetail {
    for page in 1..=1_000 {
        let details = services
            .query
            .list_pickup_points(ListPickupPointsRequest {
                page: PageRequest::new(Some(page), Some(i64::from(MAX_LIMIT))),
                window: ReceptionWindow::default(),
            })
            .await
            .expect("listing succeeds");
        if details.is_empty() {
            break;
        }
        if let Some(detail) = details.into_iter().find(|d| d.pickup_point.id == id) {
            return detail;
        }
    }
    panic!("pickup point {id} missing from listing");
}

#[rstest]
#[tokio::test]
async fn full_reception_scenario() {
    let Some(services) = services().await else {
        return;
    };
    let pvz_id = new_pickup_point(&services).await;

    let reception = services
        .lifecycle
        .create_reception(pvz_id)
        .await
        .expect("reception opens");
    assert_eq!(reception.status, ReceptionStatus::InProgress);

    let batches = [
        (ProductType::Electronics, 30),
        (ProductType::Clothes, 10),
        (ProductType::Shoes, 10),
    ];
    for (product_type, count) in batches {
        for _ in 0..count {
            let product = services
                .lifecycle
                .create_product(pvz_id, product_type)
                .await
                .expect("product added");
            assert_eq!(product.reception_id, reception.id);
        }
    }

    let closed = services
        .lifecycle
        .close_reception(pvz_id)
        .await
        .expect("reception closes");
    assert_eq!(closed.id, reception.id);
    assert_eq!(closed.status, ReceptionStatus::Closed);

    assert_eq!(
        services
            .lifecycle
            .create_product(pvz_id, ProductType::Shoes)
            .await
            .map(|_| ()),
        Err(IntakeError::ReceptionNotOpen)
    );
    assert_eq!(
        services.lifecycle.close_reception(pvz_id).await.map(|_| ()),
        Err(IntakeError::ReceptionNotOpen)
    );

    let detail = find_detail(&services, pvz_id).await;
    assert_eq!(detail.receptions.len(), 1);
    let products = &detail.receptions[0].products;
    assert_eq!(products.len(), 50);
    assert!(products.iter().all(|p| p.reception_id == reception.id));
}

#[rstest]
#[tokio::test]
async fn delete_last_product_drains_in_reverse_order() {
    let Some(services) = services().await else {
        return;
    };
    let pvz_id = new_pickup_point(&services).await;
    services
        .lifecycle
        .create_reception(pvz_id)
        .await
        .expect("reception opens");
    for product_type in [ProductType::Electronics, ProductType::Clothes] {
        services
            .lifecycle
            .create_product(pvz_id, product_type)
            .await
            .expect("product added");
    }

    services
        .lifecycle
        .delete_last_product(pvz_id)
        .await
        .expect("first delete");
    let detail = find_detail(&services, pvz_id).await;
    let remaining: Vec<ProductType> = detail.receptions[0]
        .products
        .iter()
        .map(|p| p.product_type)
        .collect();
    assert_eq!(remaining, vec![ProductType::Electronics]);

    services
        .lifecycle
        .delete_last_product(pvz_id)
        .await
        .expect("second delete");
    assert_eq!(
        services.lifecycle.delete_last_product(pvz_id).await,
        Err(IntakeError::NoProductsToDelete)
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_pickup_point_id_is_rejected() {
    let Some(services) = services().await else {
        return;
    };
    let pvz_id = new_pickup_point(&services).await;

    let result = services
        .lifecycle
        .create_pickup_point(CreatePickupPointRequest {
            id: Some(pvz_id),
            city: City::Kazan,
            registration_date: None,
        })
        .await;

    assert_eq!(result.map(|_| ()), Err(IntakeError::PickupPointAlreadyExists));
}

#[rstest]
#[tokio::test]
async fn unknown_pickup_point_is_reported_first() {
    let Some(services) = services().await else {
        return;
    };
    let unknown = Uuid::new_v4();

    assert_eq!(
        services.lifecycle.create_reception(unknown).await.map(|_| ()),
        Err(IntakeError::PickupPointNotFound)
    );
    assert_eq!(
        services.lifecycle.close_reception(unknown).await.map(|_| ()),
        Err(IntakeError::PickupPointNotFound)
    );
    assert_eq!(
        services
            .lifecycle
            .create_product(unknown, ProductType::Shoes)
            .await
            .map(|_| ()),
        Err(IntakeError::PickupPointNotFound)
    );
    assert_eq!(
        services.lifecycle.delete_last_product(unknown).await,
        Err(IntakeError::PickupPointNotFound)
    );
}

#[rstest]
#[tokio::test]
async fn concurrent_opens_admit_a_single_reception() {
    let Some(services) = services().await else {
        return;
    };
    let pvz_id = new_pickup_point(&services).await;

    let attempts = (0..4).map(|_| {
        let lifecycle = services.lifecycle.clone();
        tokio::spawn(async move { lifecycle.create_reception(pvz_id).await })
    });
    let results = futures::future::join_all(attempts).await;

    let opened = results
        .iter()
        .filter(|result| matches!(result, Ok(Ok(_))))
        .count();
    let rejected = results
        .iter()
        .filter(|result| matches!(result, Ok(Err(IntakeError::ReceptionAlreadyOpen))))
        .count();
    assert_eq!(opened, 1);
    assert_eq!(rejected, 3);
}
