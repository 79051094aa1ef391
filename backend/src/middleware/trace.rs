//! Request correlation and access logging.
//!
//! [`Trace`] gives every request a fresh [`TraceId`]. The handler runs inside
//! [`TraceId::scope`], so domain errors raised while serving it carry the id,
//! and the response always echoes it in the `trace-id` header. One access
//! log line is written per request once the response is ready.
//!
//! Task-locals do not follow spawned tasks; wrap spawned work in
//! [`TraceId::scope`] to keep the id.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, info, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware assigning a [`TraceId`] to each request.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use office_listings::middleware::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
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
    type Transform = TraceService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, inner: S) -> Self::Future {
        ready(Ok(TraceService { inner }))
    }
}

/// Service produced by [`Trace`]. Not meant to be named by applications.
pub struct TraceService<S> {
    inner: S,
}

/// What the access log needs to know about a request.
struct RequestLine {
    trace_id: TraceId,
    method: Method,
    path: String,
    started: Instant,
}

impl RequestLine {
    fn completed(&self, status: u16) {
        let latency_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let trace_id = self.trace_id;
        let method = &self.method;
        let path = self.path.as_str();
        if status >= 500 {
            warn!(%trace_id, %method, path, status, latency_ms, "request failed");
        } else {
            info!(%trace_id, %method, path, status, latency_ms, "request completed");
        }
    }
}

fn stamp_trace_header<B>(response: &mut ServiceResponse<B>, trace_id: TraceId) {
    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            response
                .response_mut()
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(err) => error!(error = %err, %trace_id, "trace id is not a valid header value"),
    }
}

impl<S, B> Service<ServiceRequest> for TraceService<S>
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
        let line = RequestLine {
            trace_id: TraceId::generate(),
            method: req.method().clone(),
            path: req.path().to_owned(),
            started: Instant::now(),
        };
        let trace_id = line.trace_id;
        let pending = TraceId::scope(trace_id, self.inner.call(req));
        Box::pin(async move {
            match pending.await {
                Ok(mut response) => {
                    stamp_trace_header(&mut response, trace_id);
                    line.completed(response.status().as_u16());
                    Ok(response)
                }
                Err(err) => {
                    warn!(
                        %trace_id,
                        method = %line.method,
                        path = line.path.as_str(),
                        error = %err,
                        "request errored before a response was built"
                    );
                    Err(err)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error as DomainError;
    use crate::inbound::http::ApiResult;
    use actix_web::body::BoxBody;
    use actix_web::{App, HttpResponse, Responder, test, web};
    use rstest::rstest;

    async fn serve<F, Fut, R>(handler: F, uri: &str) -> (ServiceResponse<BoxBody>, String)
    where
        F: Fn() -> Fut + Clone + 'static,
        Fut: std::future::Future<Output = R> + 'static,
        R: Responder + 'static,
    {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/offices", web::get().to(handler)),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        (res, trace_id)
    }

    #[rstest]
    #[case("/offices", 200)]
    #[case("/nowhere", 404)]
    #[actix_web::test]
    async fn every_response_carries_a_trace_id(#[case] uri: &str, #[case] status: u16) {
        let (res, trace_id) = serve(|| async { HttpResponse::Ok().finish() }, uri).await;
        assert_eq!(res.status().as_u16(), status);
        assert!(trace_id.parse::<TraceId>().is_ok());
    }

    #[actix_web::test]
    async fn handlers_see_the_request_trace_id() {
        let (res, trace_id) = serve(
            || async {
                let id = TraceId::current().expect("trace id in scope");
                HttpResponse::Ok().body(id.to_string())
            },
            "/offices",
        )
        .await;
        let body = test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), trace_id);
    }

    #[actix_web::test]
    async fn domain_errors_carry_the_request_trace_id() {
        let (res, trace_id) = serve(
            || async { ApiResult::<HttpResponse>::Err(DomainError::not_found("no such office")) },
            "/offices",
        )
        .await;
        let body: DomainError = test::read_body_json(res).await;
        assert_eq!(body.trace_id(), Some(trace_id.as_str()));
    }
}
