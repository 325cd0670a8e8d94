//! Weft Registry
//!
//! The editor's outward-facing boundary: traits for the remote workflow
//! registry (integration, bundle, and config CRUD) and for the host
//! platform's client object, plus the DTOs they exchange. The editing
//! core never performs I/O itself: it hands [`weft_workflow::Workflow`]
//! values across this boundary and receives them back; transports,
//! endpoints, and auth all live behind the traits.
//!
//! [`InMemoryRegistry`] is the reference implementation used in tests and
//! local development.

mod error;
mod host;
mod memory;
mod registry;
mod types;

pub use error::RegistryError;
pub use host::HostClient;
pub use memory::InMemoryRegistry;
pub use registry::RegistryApi;
pub use types::{Bundle, Integration, IntegrationDraft};
