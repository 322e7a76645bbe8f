//! Request and response interceptors.
//!
//! Request interceptors run in order just before dispatch; response
//! interceptors see every HTTP response before it is classified as success
//! or failure.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};

use super::transport::{ApiRequest, ApiResponse};
use crate::backend::session::Session;
use crate::frontend::navigator::Navigator;
use crate::utils::logging::SharedLogger;
use crate::utils::{Error, Result};
use crate::{log_error, log_warn};

pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: &mut ApiRequest) -> Result<()>;
}

pub trait ResponseInterceptor: Send + Sync {
    fn intercept(&self, request: &ApiRequest, response: ApiResponse) -> Result<ApiResponse>;
}

/// Formats a bearer header value.
pub fn bearer(token: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| Error::new("session token contains characters not allowed in a header"))
}

/// Copies the session token into the `Authorization` header of each request.
pub struct BearerAuth {
    session: Session,
}

impl BearerAuth {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl RequestInterceptor for BearerAuth {
    fn intercept(&self, request: &mut ApiRequest) -> Result<()> {
        if let Some(token) = self.session.token() {
            // insert replaces, so only one Authorization value is ever sent
            request.headers.insert(AUTHORIZATION, bearer(&token)?);
        }
        Ok(())
    }
}

/// On 401: drops the tenant's session and forces navigation to its login
/// page. The response itself is passed through untouched.
pub struct UnauthorizedTeardown {
    session: Session,
    navigator: Arc<dyn Navigator>,
    logger: SharedLogger,
}

impl UnauthorizedTeardown {
    pub fn new(session: Session, navigator: Arc<dyn Navigator>, logger: SharedLogger) -> Self {
        Self {
            session,
            navigator,
            logger,
        }
    }
}

impl ResponseInterceptor for UnauthorizedTeardown {
    fn intercept(&self, request: &ApiRequest, response: ApiResponse) -> Result<ApiResponse> {
        if response.status == StatusCode::UNAUTHORIZED {
            let tenant = self.session.tenant();
            log_warn!(
                self.logger,
                "api",
                "{} {} was rejected, ending {tenant} session",
                request.method,
                request.url
            );
            if let Err(e) = self.session.clear() {
                log_error!(self.logger, "api", "Failed to clear {tenant} session: {e}");
            }
            self.navigator.force(tenant.login_path());
        }
        Ok(response)
    }
}
