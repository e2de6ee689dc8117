//! CLI command handlers
//!
//! Argument parsing, the `count` driver and routing to the HTTP server.

pub mod args;
pub mod count;
pub mod help;
pub mod router;

pub use args::{Cli, Commands};
pub use help::get_log_level;
pub use router::{execute_command, load_config};
