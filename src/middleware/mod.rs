pub mod admin_auth;
pub mod metrics;
pub mod request_id;

pub use admin_auth::require_admin_key;
pub use metrics::metrics_middleware;
pub use request_id::request_id_middleware;
