//! SSO Types - Shared domain types
//!
//! Identifiers shared by the store, the auth core and the gRPC service:
//! - Users (store-assigned numeric ids)
//! - Applications (caller-supplied ids that scope issued tokens)

pub mod app;
pub mod user;

pub use app::*;
pub use user::*;
