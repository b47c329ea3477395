//! Tools domain module.
//!
//! Every Holded operation the server exposes, and the machinery that runs
//! them. Both the MCP façade and the REST façade call into `Dispatcher`.
//!
//! ## Architecture
//!
//! - `schema.rs` - Declarative input schemas (also rendered as JSON Schema)
//! - `validator.rs` - Argument checking against a schema
//! - `resource.rs` - Families, document types and verbs
//! - `router.rs` - Arguments to outbound `ApiRequest`
//! - `definitions/` - The operation catalog (family table + document ops)
//! - `registry.rs` - Name lookup over the catalog
//! - `dispatcher.rs` - lookup, validate, route, call
//! - `error.rs` - Dispatch error types
//!
//! ## Adding an Operation
//!
//! Add a row (or an `ActionSpec`) to `definitions/families.rs`. The registry
//! checks the declaration at startup; no façade code needs to change.

pub mod definitions;
mod dispatcher;
mod error;
mod registry;
pub mod resource;
pub mod router;
pub mod schema;
pub mod validator;

#[cfg(test)]
pub(crate) use dispatcher::testing;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, ErrorKind, REMOTE_ERROR_CODE};
pub use registry::{Operation, OperationRegistry};
pub use resource::{DocumentType, Family, ResourceDescriptor, Verb};
pub use validator::{Arguments, FieldViolation};
