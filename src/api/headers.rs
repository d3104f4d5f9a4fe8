//! Header parsing utilities for API requests.

use axum::http::{header, HeaderMap};

use crate::error::AuthError;

/// Extension trait for extracting the bearer credential.
pub trait HeaderMapExt {
    /// Extract the token from an `Authorization: Bearer <token>` header.
    ///
    /// A missing header and a malformed one are distinct failures; both
    /// map to 401 at the response boundary.
    fn bearer_token(&self) -> Result<&str, AuthError>;
}

impl HeaderMapExt for HeaderMap {
    fn bearer_token(&self) -> Result<&str, AuthError> {
        let value = self
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AuthError::MalformedHeader)?;

        // Exactly "Bearer <token>" with a single space and a non-empty
        // token.
        let mut parts = value.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
            _ => Err(AuthError::MalformedHeader),
        }
    }
}
