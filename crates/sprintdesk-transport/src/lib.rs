//! REST transport for SprintDesk.
//!
//! - [`Session`]: owned bearer-token handle, persisted through a [`TokenStore`]
//! - [`HttpTransport`]: the HTTP seam ([`ReqwestTransport`] in production)
//! - [`ApiClient`]: typed calls over every consumed endpoint
//! - [`ApiError`]: the error contract, flattened to one message per failure

pub mod client;
pub mod error;
pub mod http;
pub mod session;

pub use client::ApiClient;
pub use error::ApiError;
pub use http::{
    DEFAULT_BASE_URL, HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport,
    TransportFailure,
};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TOKEN_KEY, TokenStore, TokenStoreError};
