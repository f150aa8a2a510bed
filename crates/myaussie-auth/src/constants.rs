//! MyAussie endpoint constants
//!
//! The API is split over two fixed hosts: the auth host issues and rotates
//! the session cookie, the API host serves customer resources.

/// Host serving `POST /login` (password login) and `PUT /login` (refresh)
pub const AUTH_BASE_URL: &str = "https://myaussie-auth.aussiebroadband.com.au";

/// Host serving customer, usage, billing, outage and test resources
pub const API_BASE_URL: &str = "https://myaussie-api.aussiebroadband.com.au";

/// Name of the session cookie set by the auth host
pub const SESSION_COOKIE: &str = "myaussie_cookie";

/// User-Agent sent on every request
pub const USER_AGENT: &str = concat!("myaussie-rs/", env!("CARGO_PKG_VERSION"));
