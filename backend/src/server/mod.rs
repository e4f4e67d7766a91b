//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use state_builders::{AppServices, build_services};

use std::future::Future;
use std::net::SocketAddr;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use color_eyre::eyre::{Context, Result};
use tokio::sync::oneshot;
use tracing::info;

use pvz_backend::Trace;
#[cfg(debug_assertions)]
use pvz_backend::doc::ApiDoc;
use pvz_backend::inbound::grpc::PvzGrpcService;
use pvz_backend::inbound::http::auth::{dummy_login, login, register};
use pvz_backend::inbound::http::health::{HealthState, live, ready};
use pvz_backend::inbound::http::pickup_points::{create_pickup_point, list_pickup_points};
use pvz_backend::inbound::http::products::{create_product, delete_last_product};
use pvz_backend::inbound::http::receptions::{close_last_reception, create_reception};
use pvz_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(dummy_login)
        .service(register)
        .service(login)
        .service(create_pickup_point)
        .service(list_pickup_points)
        .service(create_reception)
        .service(close_last_reception)
        .service(create_product)
        .service(delete_last_product)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Bound HTTP server plus the gRPC service started next to it.
pub struct Servers {
    http: Server,
    grpc_addr: SocketAddr,
    grpc_service: PvzGrpcService,
}

impl Servers {
    /// Handle for stopping the HTTP listener from outside.
    pub fn http_handle(&self) -> ServerHandle {
        self.http.handle()
    }

    /// Serve REST and gRPC until `shutdown` resolves or either server exits.
    ///
    /// Actix stops HTTP by itself on SIGINT and SIGTERM; gRPC follows as soon
    /// as the HTTP future completes. A gRPC exit stops HTTP in turn.
    ///
    /// # Errors
    /// Returns the first server failure.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let http_handle = self.http_handle();
        let Servers {
            http,
            grpc_addr,
            grpc_service,
        } = self;
        let (http_stopped, http_stopped_rx) = oneshot::channel::<()>();
        let grpc_shutdown = async move {
            tokio::select! {
                () = shutdown => info!("shutdown signal received"),
                _ = http_stopped_rx => info!("HTTP server stopped; stopping gRPC"),
            }
        };

        info!(addr = %grpc_addr, "gRPC server listening");
        let grpc = tonic::transport::Server::builder()
            .add_service(grpc_service.into_server())
            .serve_with_shutdown(grpc_addr, grpc_shutdown);

        tokio::try_join!(
            async {
                let outcome = http.await.wrap_err("HTTP server failed");
                let _ = http_stopped.send(());
                outcome
            },
            async {
                let outcome = grpc.await.wrap_err("gRPC server failed");
                http_handle.stop(true).await;
                outcome
            },
        )?;
        Ok(())
    }
}

/// Construct the Actix HTTP server and the gRPC service using the provided
/// health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the HTTP listener is bound.
/// - `config`: pre-built [`ServerConfig`] containing listen addresses, token
///   secret and optional database pool.
///
/// # Returns
/// [`Servers`], driven to completion by [`Servers::run`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Servers> {
    let server_health_state = health_state.clone();
    let services: AppServices = build_services(&config);
    let http_state = services.http_state();
    let grpc_service = PvzGrpcService::new(services.pickup_points.clone());
    let ServerConfig {
        bind_addr,
        grpc_addr,
        jwt_secret: _,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(addr = %bind_addr, "HTTP server listening");
    health_state.mark_ready();
    Ok(Servers {
        http: server,
        grpc_addr,
        grpc_service,
    })
}

#[cfg(test)]
mod tests {
    //! End-to-end wiring tests against fixture repositories.

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};
    use std::time::Duration;
    use zeroize::Zeroizing;

    fn deps() -> AppDependencies {
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("valid addr"),
            "127.0.0.1:0".parse().expect("valid addr"),
            Zeroizing::new(b"app-secret".to_vec()),
        );
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: build_services(&config).http_state(),
        }
    }

    #[actix_web::test]
    async fn dummy_token_grants_listing_access() {
        let app = actix_test::init_service(build_app(deps())).await;

        let login_request = actix_test::TestRequest::post()
            .uri("/dummyLogin")
            .set_json(json!({ "role": "employee" }))
            .to_request();
        let token: Value = actix_test::call_and_read_body_json(&app, login_request).await;
        let token = token
            .get("token")
            .and_then(Value::as_str)
            .expect("token issued")
            .to_owned();

        let listing = actix_test::TestRequest::get()
            .uri("/pvz")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let response = actix_test::call_service(&app, listing).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("trace-id"));
    }

    #[actix_web::test]
    async fn employee_token_cannot_create_pickup_points() {
        let app = actix_test::init_service(build_app(deps())).await;

        let login_request = actix_test::TestRequest::post()
            .uri("/dummyLogin")
            .set_json(json!({ "role": "employee" }))
            .to_request();
        let token: Value = actix_test::call_and_read_body_json(&app, login_request).await;
        let token = token.get("token").and_then(Value::as_str).unwrap_or_default();

        let create = actix_test::TestRequest::post()
            .uri("/pvz")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({ "city": "Москва" }))
            .to_request();
        let response = actix_test::call_service(&app, create).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn grpc_stops_once_http_has_stopped() {
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("valid addr"),
            "127.0.0.1:0".parse().expect("valid addr"),
            Zeroizing::new(b"app-secret".to_vec()),
        );
        let servers =
            create_server(web::Data::new(HealthState::new()), config).expect("servers bind");
        let http = servers.http_handle();

        // Stopping HTTP mimics actix reacting to SIGTERM; the external
        // shutdown future never fires.
        let (outcome, ()) = tokio::time::timeout(Duration::from_secs(10), async {
            tokio::join!(servers.run(std::future::pending()), http.stop(true))
        })
        .await
        .expect("both servers exit after HTTP stops");

        assert!(outcome.is_ok());
    }

    #[actix_web::test]
    async fn shutdown_future_stops_both_servers() {
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("valid addr"),
            "127.0.0.1:0".parse().expect("valid addr"),
            Zeroizing::new(b"app-secret".to_vec()),
        );
        let servers =
            create_server(web::Data::new(HealthState::new()), config).expect("servers bind");

        let outcome = tokio::time::timeout(Duration::from_secs(10), servers.run(async {}))
            .await
            .expect("servers exit after the shutdown future resolves");

        assert!(outcome.is_ok());
    }

    #[actix_web::test]
    async fn readiness_probe_is_served() {
        let app = actix_test::init_service(build_app(deps())).await;
        let request = actix_test::TestRequest::get().uri("/health/ready").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
