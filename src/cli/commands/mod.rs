//! CLI command implementations

pub mod classify;
pub mod config;
pub mod fallback;
pub mod partitions;
pub mod warm;

pub use classify::execute as classify;
pub use config::execute as config;
pub use fallback::execute as fallback;
pub use partitions::execute as partitions;
pub use warm::execute as warm;
