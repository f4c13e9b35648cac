//! Request/response model and the network primitive
//!
//! The agent never talks to a socket directly: every fetch goes through the
//! [`Network`] trait so the host (browser shim, CLI, tests) decides how
//! requests actually leave the process.

pub mod http;
mod network;
mod request;
mod response;

#[cfg(test)]
pub(crate) mod testing;

pub use http::HttpNetwork;
pub use network::Network;
pub use request::{Destination, Request};
pub use response::{Response, ResponseKind};
