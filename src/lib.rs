// Receipt Processor - Core Library
// Exposes all modules for use in the CLI, the API server, and tests

pub mod receipt;
pub mod points;
pub mod store;
pub mod error;
pub mod config;

// HTTP layer only exists with the server feature
#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use receipt::{Item, Receipt, ReceiptId};
pub use points::{calculate_points, explain_points, PointsBreakdown, Rule, RuleContribution};
pub use store::{InMemoryStore, PointsStore};
pub use error::{ConfigError, ReceiptIdError, StoreError};
pub use config::ServerConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
