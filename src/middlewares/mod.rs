pub mod auth;
pub mod cors;
pub mod rate_limit;

pub use auth::{AccessTier, AuthMiddleware, AuthUser, current_user, resolve_tier};
pub use cors::{create_cors, security_headers};
pub use rate_limit::{RateLimitMiddleware, RateLimiter};
