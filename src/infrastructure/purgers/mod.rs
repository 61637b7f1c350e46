//! Backend purgers implementing [`crate::domain::ports::Purger`].
//!
//! - [`LocalCachePurger`] - deletes `<url>:html` from the page cache
//! - [`EdgeProxyPurger`] - one `PURGE` request per URL to Varnish
//! - [`CdnPurger`] - one bulk `DELETE` per batch to Cloudflare
//!
//! The two network purgers share [`http::send_purge_request`].

pub mod cdn;
pub mod edge;
pub mod http;
pub mod local;

pub use cdn::{CdnPurger, CdnSettings};
pub use edge::{EdgeProxyPurger, EdgeSettings};
pub use http::{PurgeCallError, TlsVerification};
pub use local::LocalCachePurger;
