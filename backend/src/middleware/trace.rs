//! Request correlation middleware.
//!
//! Every request runs inside a fresh [`TraceId`] scope, so errors built while
//! handling it carry the id. The id is returned in the `trace-id` response
//! header and one `request completed` event is logged per request.

use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{info, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware factory; wrap an `App` with it.
///
/// ```
/// use actix_web::App;
/// use pvz_backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { inner: service }))
    }
}

#[doc(hidden)]
pub struct TraceMiddleware<S> {
    inner: S,
}

/// What gets logged once the response is ready.
struct RequestLine {
    method: Method,
    path: String,
    started: Instant,
}

impl RequestLine {
    fn completed(&self, trace_id: TraceId, status: u16) {
        info!(
            method = %self.method,
            path = %self.path,
            status,
            elapsed_ms = millis(self.started.elapsed()),
            trace_id = %trace_id,
            "request completed"
        );
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn header_value(trace_id: TraceId) -> Option<HeaderValue> {
    HeaderValue::from_str(&trace_id.to_string())
        .inspect_err(|error| warn!(%error, %trace_id, "trace id is not a valid header value"))
        .ok()
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let line = RequestLine {
            method: req.method().clone(),
            path: req.path().to_owned(),
            started: Instant::now(),
        };
        let pending = self.inner.call(req);

        Box::pin(TraceId::scope(trace_id, async move {
            let mut response = pending.await?;
            if let Some(value) = header_value(trace_id) {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }
            line.completed(trace_id, response.status().as_u16());
            Ok(response)
        }))
    }
}
