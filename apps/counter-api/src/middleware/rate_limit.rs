//! Rate limiting middleware.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{self, HeaderMap, HeaderName, HeaderValue},
};
use hitcount_shared::ErrorBody;
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use hitcount_core::ports::{RateLimitResult, RateLimiter};

pub const RATELIMIT_LIMIT: &str = "ratelimit-limit";
pub const RATELIMIT_REMAINING: &str = "ratelimit-remaining";
pub const RATELIMIT_RESET: &str = "ratelimit-reset";

/// How a request is mapped to the identity its quota is charged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientIdentity {
    /// The TCP peer address.
    PeerAddr,
    /// `Forwarded` / `X-Forwarded-For`, falling back to the peer address.
    /// Only safe behind a proxy that sets these headers itself.
    Forwarded,
}

impl ClientIdentity {
    fn resolve(self, req: &ServiceRequest) -> String {
        let ip = match self {
            ClientIdentity::PeerAddr => req.peer_addr().map(|addr| addr.ip().to_string()),
            ClientIdentity::Forwarded => req
                .connection_info()
                .realip_remote_addr()
                .map(str::to_string),
        };
        ip.unwrap_or_else(|| "unknown".to_string())
    }
}

/// Rate limiting middleware factory.
pub struct RateLimitMiddleware {
    limiter: Arc<dyn RateLimiter>,
    identity: ClientIdentity,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<dyn RateLimiter>, identity: ClientIdentity) -> Self {
        Self { limiter, identity }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            identity: self.identity,
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Arc<dyn RateLimiter>,
    identity: ClientIdentity,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let limiter = self.limiter.clone();
        let key = self.identity.resolve(&req);

        Box::pin(async move {
            let result = match limiter.check(&key).await {
                Ok(result) => result,
                Err(e) => {
                    // Fail open - a broken limiter must not take the API down
                    tracing::error!(error = %e, "Rate limiter error, failing open");
                    let mut res = service.call(req).await?;
                    apply_rate_limit_headers(res.headers_mut(), &limiter.full_quota());
                    return Ok(res.map_into_left_body());
                }
            };

            if !result.allowed {
                tracing::warn!(client = %key, "Rate limit exceeded");

                let mut response = HttpResponse::TooManyRequests();
                for (name, value) in rate_limit_headers(&result) {
                    response.insert_header((name, value));
                }
                response.insert_header((header::RETRY_AFTER, result.reset_secs().to_string()));
                let response = response.json(ErrorBody::too_many_requests());

                let (http_req, _payload) = req.into_parts();
                return Ok(ServiceResponse::new(http_req, response).map_into_right_body());
            }

            let mut res = service.call(req).await?;
            apply_rate_limit_headers(res.headers_mut(), &result);
            Ok(res.map_into_left_body())
        })
    }
}

fn rate_limit_headers(result: &RateLimitResult) -> [(HeaderName, HeaderValue); 3] {
    [
        (
            HeaderName::from_static(RATELIMIT_LIMIT),
            HeaderValue::from(result.limit),
        ),
        (
            HeaderName::from_static(RATELIMIT_REMAINING),
            HeaderValue::from(result.remaining),
        ),
        (
            HeaderName::from_static(RATELIMIT_RESET),
            HeaderValue::from(result.reset_secs()),
        ),
    ]
}

fn apply_rate_limit_headers(headers: &mut HeaderMap, result: &RateLimitResult) {
    for (name, value) in rate_limit_headers(result) {
        headers.insert(name, value);
    }
}
