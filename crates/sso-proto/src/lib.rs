//! SSO Proto - gRPC Protocol Buffers
//!
//! Generated code for the `sso.v1.Auth` service.
//!
//! # Example
//!
//! ```ignore
//! use sso_proto::auth_service::auth_client::AuthClient;
//! use sso_proto::LoginRequest;
//!
//! let mut client = AuthClient::connect("http://localhost:44044").await?;
//! let response = client.login(LoginRequest {
//!     email: "alice@example.com".to_string(),
//!     password: "Secr3t!".to_string(),
//!     app_id: 10,
//! }).await?;
//! ```

// Suppress clippy warnings from generated tonic code
#![allow(clippy::derive_partial_eq_without_eq)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::default_trait_access)]

/// SSO v1 API types and services.
pub mod sso {
    pub mod v1 {
        tonic::include_proto!("sso.v1");
    }
}

// Re-export commonly used types at crate root for convenience
pub use sso::v1::*;

// Service module alias for clearer imports
pub mod auth_service {
    pub use super::sso::v1::auth_client;
    pub use super::sso::v1::auth_server;
}
