//! HTTP pipeline: params → request → executor → result.

pub mod executor;
pub mod headers;
pub mod method;
pub mod params;
pub mod request;
#[cfg(feature = "http")]
pub mod transport;

pub use executor::{execute, ApiResult, HttpExecutor, RawResponse};
pub use headers::{parse_raw_headers, HeaderValue, ResponseHeaders};
pub use method::HttpMethod;
pub use params::{ParamValue, RequestParams};
pub use request::{Request, RequestBuilder};
#[cfg(feature = "http")]
pub use transport::ReqwestExecutor;
