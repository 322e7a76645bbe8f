//! HTTP access to the admin and resident backends.

pub mod client;
pub mod interceptor;
pub mod models;
pub mod transport;

pub use client::{ApiClient, ApiClientBuilder, Query};
pub use interceptor::{BearerAuth, RequestInterceptor, ResponseInterceptor, UnauthorizedTeardown};
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
