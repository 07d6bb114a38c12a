//! Server Module
//!
//! This module initializes and configures the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database and port loading
//! └── init.rs         - Server initialization and app creation
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::{build_app, create_app};
pub use state::AppState;
