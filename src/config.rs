use axum::http::HeaderValue;
use std::env;

use crate::rota::AssignmentPolicy;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub admin_key: String,
    pub bind_addr: String,
    pub cors_origin: HeaderValue,
    pub allow_unassign_locked: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let admin_key = env::var("ADMIN_KEY")
            .map_err(|_| "ADMIN_KEY must be set".to_string())?;
        if admin_key.is_empty() {
            return Err("ADMIN_KEY must not be empty".to_string());
        }

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let cors_origin = env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .parse::<HeaderValue>()
            .map_err(|e| format!("Invalid CORS_ORIGIN: {}", e))?;

        let allow_unassign_locked = parse_flag("ALLOW_UNASSIGN_LOCKED", env::var("ALLOW_UNASSIGN_LOCKED").ok())?;

        Ok(Self {
            database_url,
            admin_key,
            bind_addr,
            cors_origin,
            allow_unassign_locked,
        })
    }

    pub fn assignment_policy(&self) -> AssignmentPolicy {
        AssignmentPolicy {
            allow_unassign_locked: self.allow_unassign_locked,
        }
    }
}

// Unset means false.
fn parse_flag(name: &str, value: Option<String>) -> Result<bool, String> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some("1") | Some("true") | Some("TRUE") | Some("yes") => Ok(true),
        Some("0") | Some("false") | Some("FALSE") | Some("no") => Ok(false),
        Some(other) => Err(format!("{} must be a boolean, got {:?}", name, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("X", None), Ok(false));
        assert_eq!(parse_flag("X", Some("true".into())), Ok(true));
        assert_eq!(parse_flag("X", Some(" 1 ".into())), Ok(true));
        assert_eq!(parse_flag("X", Some("no".into())), Ok(false));
        assert!(parse_flag("X", Some("maybe".into())).is_err());
    }
}
