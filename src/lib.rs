//! Radarr provider library
//!
//! Resources for a declarative infrastructure host, backed by the Radarr v3
//! REST API. The binary in `main.rs` drives the same lifecycle from the
//! command line; integration tests use the library directly.

pub mod cli;
pub mod client;
pub mod config;
pub mod fields;
pub mod host;
pub mod provider;
pub mod resources;

pub use client::{ApiError, RadarrClient, Transport};
pub use host::{Attr, Diagnostics, Response, StateChange};
pub use provider::{ProviderData, RadarrProvider};
pub use resources::{DynResource, Resource, ResourceHandler};
