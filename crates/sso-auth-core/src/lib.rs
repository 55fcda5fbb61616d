//! SSO Auth Core - Authentication business logic
//!
//! Registration and login over a shared credential store, with tokens signed
//! per consuming application.

pub mod config;
pub mod crypto;
pub mod error;
pub mod registry;
pub mod service;
pub mod token;
pub mod validation;

pub use config::*;
pub use crypto::Argon2Hasher;
pub use error::*;
pub use registry::{AppRegistry, ResolvedApp};
pub use service::*;
pub use token::{SigningSecret, TokenClaims, TokenIssuer};
