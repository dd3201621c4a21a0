//! Mock-serving dispatcher.
//!
//! Resolves `(project, method, path)` to a stored endpoint, applies the
//! optional per-endpoint key check and renders the stored response. The
//! dispatcher only ever reads from an [`EndpointRegistry`].

pub mod dispatcher;
pub mod registry;
pub mod render;
pub mod request;

pub use dispatcher::{DispatchError, Dispatcher};
pub use registry::{EndpointRegistry, MemoryRegistry, PgRegistry};
pub use render::{render, ContentKind, RenderedResponse};
pub use request::{HttpMethod, MockRequest};
