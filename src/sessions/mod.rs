//! Session lifecycle
//!
//! Creation, lookup, teardown and idle expiry of per-client session stores.

pub mod registry;

pub use registry::{RegistryError, SessionHandle, SessionId, SessionRegistry};
