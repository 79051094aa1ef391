//! Bearer token authentication for HTTP handlers.
//!
//! Handlers that need an identity take [`AuthenticatedCaller`] as an
//! argument; the extractor reads `Authorization: Bearer <token>` and resolves
//! it through the [`CallerAuthenticator`](crate::domain::ports::CallerAuthenticator)
//! held in [`HttpState`].

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Caller, Error};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// The caller behind an authenticated request.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(pub Caller);

impl AuthenticatedCaller {
    /// Unwrap the caller.
    pub fn into_inner(self) -> Caller {
        self.0
    }
}

pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<String, Error> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = value
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    Ok(token.to_owned())
}

impl FromRequest for AuthenticatedCaller {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req.headers());
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = token?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let caller = state.authenticator.authenticate(&token).await?;
            Ok(Self(caller))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc", "abc")]
    #[case("bearer abc ", "abc")]
    fn extracts_bearer_token(#[case] header: &str, #[case] expected: &str) {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, header))
            .to_http_request();
        assert_eq!(bearer_token(req.headers()).expect("token"), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic YWRtaW46cGFzc3dvcmQ="))]
    #[case(Some("Bearer "))]
    fn rejects_missing_or_foreign_schemes(#[case] header: Option<&str>) {
        let mut builder = TestRequest::default();
        if let Some(value) = header {
            builder = builder.insert_header((AUTHORIZATION, value));
        }
        let err = bearer_token(builder.to_http_request().headers()).expect_err("no token");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
