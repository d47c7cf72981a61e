//! Authentication module for UltraShip Core.
//!
//! Callers present a role-claim JWT. Reads are open to everyone, falling
//! back to guest; writes require the admin role.

mod jwt;
mod middleware;

pub use jwt::*;
pub use middleware::*;
