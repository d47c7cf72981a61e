//! Caller resolution middleware for axum.

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::{JwtManager, Role};
use crate::error::{ShipError, ShipResult};

/// The resolved caller of a request, inserted into request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub role: Role,
}

impl Caller {
    /// Reject callers without the admin role.
    pub fn require_admin(&self) -> ShipResult<()> {
        if self.role.is_admin() {
            return Ok(());
        }

        tracing::warn!(role = %self.role, "Write rejected for non-admin caller");
        Err(ShipError::Forbidden(format!(
            "Access Denied: Admins only. Your role is: {}",
            self.role
        )))
    }
}

/// Resolve the caller's role from the `Authorization` header.
///
/// Never rejects: a missing or invalid credential continues as guest, which
/// can read but not write.
pub async fn resolve_caller(
    State(jwt_manager): State<JwtManager>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let role = jwt_manager.resolve_role(
        request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
    );

    request.extensions_mut().insert(Caller { role });

    next.run(request).await
}
