//! JWT role claims for dashboard callers.
//!
//! Tokens carry a role and nothing else; there is no identity behind them.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ShipError, ShipResult};

/// JWT claims for a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Role name as issued. Parsed leniently, see [`Claims::role`].
    pub role: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at time (Unix timestamp).
    pub iat: i64,
    /// Issuer.
    pub iss: String,
}

impl Claims {
    /// The claimed role; unrecognized names fall back to guest.
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Guest)
    }
}

/// Caller roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Full access including create, update and delete.
    Admin,
    /// Read-only staff access.
    Employee,
    /// Default for callers without a valid token. Read-only.
    Guest,
}

impl Role {
    /// Check if this role may mutate shipments.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Roles a caller may log in as.
    pub fn can_login(&self) -> bool {
        matches!(self, Role::Admin | Role::Employee)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Employee => write!(f, "EMPLOYEE"),
            Role::Guest => write!(f, "GUEST"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            "guest" => Ok(Role::Guest),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// JWT token manager.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    /// Token validity duration in minutes.
    token_duration_minutes: i64,
}

impl JwtManager {
    /// Create a new JWT manager with the given secret.
    pub fn new(secret: &str, issuer: String, token_duration_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            token_duration_minutes,
        }
    }

    /// Token validity in seconds.
    pub fn expires_in_secs(&self) -> i64 {
        self.token_duration_minutes * 60
    }

    /// Generate a JWT token carrying `role`.
    pub fn generate_token(&self, role: Role) -> ShipResult<String> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.token_duration_minutes);

        let claims = Claims {
            role: role.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ShipError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate and decode a JWT token.
    pub fn validate_token(&self, token: &str) -> ShipResult<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        let token_data: TokenData<Claims> =
            decode(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "JWT validation failed");
                ShipError::BadRequest(format!("Invalid token: {}", e))
            })?;

        Ok(token_data.claims)
    }

    /// Role for a raw `Authorization` header value.
    ///
    /// Accepts `Bearer <token>` or a bare token. A missing, malformed,
    /// expired or foreign token yields [`Role::Guest`] rather than an error.
    pub fn resolve_role(&self, authorization: Option<&str>) -> Role {
        let Some(raw) = authorization.filter(|v| !v.is_empty()) else {
            return Role::Guest;
        };
        let token = raw.strip_prefix("Bearer ").unwrap_or(raw);

        match self.validate_token(token) {
            Ok(claims) => claims.role(),
            Err(_) => {
                tracing::debug!("Credential rejected, continuing as guest");
                Role::Guest
            }
        }
    }
}
