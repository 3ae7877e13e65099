//! `oxifleet` - Fleet-management core
//!
//! This library provides durable-key-value-backed observable stores for a
//! session and two fleet registries, the in-memory user directory behind
//! the sign-in flow, the mock dashboard dataset, and the collection-query
//! document and client shared with the companion HTTP service.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod backing;
pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod directory;
pub mod error;
pub mod fleet;
pub mod logging;
pub mod session;
pub mod store;

pub use app::App;
pub use backing::{Backing, StorageError};
pub use config::Config;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use store::{Persist, Store, Subscription};
