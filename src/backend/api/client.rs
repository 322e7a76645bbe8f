//! Tenant-bound JSON API client.

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::interceptor::{
    BearerAuth, RequestInterceptor, ResponseInterceptor, UnauthorizedTeardown, bearer,
};
use super::transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
use crate::backend::session::{Session, SharedStore, Tenant};
use crate::backend::utils::config::{AppConfig, RetryPolicy};
use crate::frontend::navigator::Navigator;
use crate::utils::logging::SharedLogger;
use crate::utils::{Error, Result};
use crate::{log_debug, log_warn};

/// Query parameters in the order they are sent.
pub type Query = Vec<(String, String)>;

/// One backend, one tenant. Cloning shares the transport and interceptors.
#[derive(Clone)]
pub struct ApiClient {
    tenant: Tenant,
    base_url: String,
    default_headers: HeaderMap,
    transport: Arc<dyn Transport>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
    retry: RetryPolicy,
    logger: SharedLogger,
}

pub struct ApiClientBuilder {
    tenant: Tenant,
    base_url: String,
    default_headers: HeaderMap,
    transport: Option<Arc<dyn Transport>>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
    retry: RetryPolicy,
    timeout: Option<std::time::Duration>,
    logger: SharedLogger,
}

impl ApiClientBuilder {
    pub fn new(tenant: Tenant, base_url: &str, logger: SharedLogger) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            tenant,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers,
            transport: None,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
            retry: RetryPolicy::none(),
            timeout: None,
            logger,
        }
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a token sent when no session token overrides it.
    pub fn static_token(mut self, token: &str) -> Result<Self> {
        self.default_headers.insert(AUTHORIZATION, bearer(token)?);
        Ok(self)
    }

    pub fn request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    pub fn response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    pub const fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub const fn timeout(mut self, timeout: Option<std::time::Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.timeout)?),
        };
        Ok(ApiClient {
            tenant: self.tenant,
            base_url: self.base_url,
            default_headers: self.default_headers,
            transport,
            request_interceptors: self.request_interceptors,
            response_interceptors: self.response_interceptors,
            retry: self.retry,
            logger: self.logger,
        })
    }
}

impl ApiClient {
    pub fn builder(tenant: Tenant, base_url: &str, logger: SharedLogger) -> ApiClientBuilder {
        ApiClientBuilder::new(tenant, base_url, logger)
    }

    /// The standard client for `tenant`: bearer injection from the session
    /// plus session teardown on 401.
    pub fn for_tenant(
        tenant: Tenant,
        config: &AppConfig,
        store: SharedStore,
        navigator: Arc<dyn Navigator>,
        logger: SharedLogger,
        transport: Option<Arc<dyn Transport>>,
    ) -> Result<Self> {
        let api = config.api(tenant);
        let session = Session::new(store, tenant);

        let mut builder = Self::builder(tenant, &api.base_url, logger.clone())
            .retry(config.http.retry)
            .timeout(config.http.timeout())
            .request_interceptor(Arc::new(BearerAuth::new(session.clone())))
            .response_interceptor(Arc::new(UnauthorizedTeardown::new(
                session, navigator, logger,
            )));
        if let Some(token) = &api.static_token {
            builder = builder.static_token(token)?;
        }
        if let Some(transport) = transport {
            builder = builder.transport(transport);
        }
        builder.build()
    }

    pub const fn tenant(&self) -> Tenant {
        self.tenant
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, Query::new(), None).await
    }

    pub async fn get_with<T: DeserializeOwned>(&self, path: &str, query: Query) -> Result<T> {
        self.send(Method::GET, path, query, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, Query::new(), Some(body)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::POST, path, Query::new(), None).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::PUT, path, Query::new(), Some(body)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::PATCH, path, Query::new(), Some(body)).await
    }

    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::PATCH, path, Query::new(), None).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::DELETE, path, Query::new(), None).await
    }

    /// Builds, intercepts, dispatches and decodes one request.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Query,
        body: Option<Value>,
    ) -> Result<T> {
        let mut request = ApiRequest {
            method,
            url: self.url(path),
            headers: self.default_headers.clone(),
            query,
            body,
        };
        for interceptor in &self.request_interceptors {
            interceptor.intercept(&mut request)?;
        }

        log_debug!(
            self.logger,
            "api",
            "[{}] {} {}",
            self.tenant,
            request.method,
            request.url
        );

        let mut response = self.dispatch(&request).await?;
        for interceptor in &self.response_interceptors {
            response = interceptor.intercept(&request, response)?;
        }

        self.decode(&request, response)
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut attempt = 0;
        loop {
            match self.transport.send(request.clone()).await {
                Err(e)
                    if e.is_transport()
                        && request.is_idempotent()
                        && attempt < self.retry.max_retries =>
                {
                    attempt += 1;
                    log_warn!(
                        self.logger,
                        "api",
                        "{} {} failed ({e}), retry {attempt}/{}",
                        request.method,
                        request.url,
                        self.retry.max_retries
                    );
                    tokio::time::sleep(self.retry.delay(attempt)).await;
                }
                result => return result,
            }
        }
    }

    fn decode<T: DeserializeOwned>(&self, request: &ApiRequest, response: ApiResponse) -> Result<T> {
        let ApiResponse { status, body } = response;
        if status.is_success() {
            return serde_json::from_value(body).map_err(|source| Error::Decode {
                url: request.url.clone(),
                source,
            });
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized {
                tenant: self.tenant,
                url: request.url.clone(),
                body,
            });
        }
        Err(Error::Status {
            method: request.method.to_string(),
            url: request.url.clone(),
            status: status.as_u16(),
            body,
        })
    }

    fn url(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("tenant", &self.tenant)
            .field("base_url", &self.base_url)
            .field("request_interceptors", &self.request_interceptors.len())
            .field("response_interceptors", &self.response_interceptors.len())
            .field("retry", &self.retry)
            .finish()
    }
}
