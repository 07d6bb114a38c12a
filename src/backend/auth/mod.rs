//! Authentication Module
//!
//! This module verifies credentials, issues and validates bearer tokens, and
//! decides whether a caller may act on a resource it does not own.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs        - Module exports and documentation
//! ├── password.rs   - bcrypt hashing and verification
//! ├── sessions.rs   - Access/refresh token issuing
//! ├── validator.rs  - Bearer header parsing and access token validation
//! ├── guard.rs      - Ownership checks
//! ├── users.rs      - User store trait and implementations
//! ├── resources.rs  - Resource owner lookup trait and implementations
//! ├── service.rs    - Register, login and refresh flows
//! └── handlers/     - HTTP handlers
//! ```
//!
//! # Request Flow
//!
//! 1. **Login**: password verified → access and refresh tokens issued
//! 2. **Authenticated request**: token validated → caller identity attached
//! 3. **Mutation**: resource owner looked up → ownership check → handler
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt with a configurable cost
//! - Access and refresh tokens are signed with separate secrets
//! - Invalid credentials return 401 with no hint of which part was wrong
//! - Tokens are stateless; there is no revocation

/// Password hashing and verification
pub mod password;

/// JWT token issuing
pub mod sessions;

/// Access token validation
pub mod validator;

/// Ownership checks
pub mod guard;

/// User store
pub mod users;

/// Resource owner lookup
pub mod resources;

/// Account operations
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use guard::{authorize, authorize_resource, AuthorizationDecision};
pub use handlers::{get_me, login, refresh, register};
pub use password::{hash_password, verify_password};
pub use resources::{InMemoryPostStore, PgPostStore, PostStore, ResourceOwnerLookup};
pub use service::{AuthService, LoginCredentials, LoginOutcome, Registration};
pub use sessions::{AccessClaims, RefreshClaims, TokenIssuer};
pub use users::{InMemoryUserStore, PgUserStore, UserStore};
pub use validator::{parse_bearer, TokenValidator, ValidationOptions};
