//! Harbor - offline caching agent for static websites
//!
//! Intercepts site requests and decides, per request, whether to answer from
//! a versioned cache partition or the network, keeps those partitions
//! populated, and synthesises an offline response when neither can help.

pub mod agent;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;

pub use error::{HarborError, HarborResult};
