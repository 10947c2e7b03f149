use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::{AppError, AppState};

pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// Guards roster activation/deletion and swap approval.
pub async fn require_admin_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized(format!("{} header required", ADMIN_KEY_HEADER)))?;

    if key_matches(state.config.admin_key.as_bytes(), provided.as_bytes()) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(path = %request.uri().path(), "Rejected request with invalid admin key");
        Err(AppError::Unauthorized("Invalid admin key".to_string()))
    }
}

// Constant-time comparison; length mismatch compares unequal.
fn key_matches(expected: &[u8], provided: &[u8]) -> bool {
    expected.ct_eq(provided).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_matches() {
        assert!(key_matches(b"secret", b"secret"));
        assert!(!key_matches(b"secret", b"secreT"));
        assert!(!key_matches(b"secret", b"secret-longer"));
        assert!(!key_matches(b"secret", b""));
    }
}
