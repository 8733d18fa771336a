//! Command implementations.

pub mod analyze;
pub mod config;
pub mod search;
pub mod serve;

pub use self::analyze::execute_analyze;
pub use self::config::execute_config;
pub use self::search::execute_search;
pub use self::serve::{execute_serve, serve_stream};
