//! Authentication surface: login flow handlers, cookie plumbing, and the
//! session extractor.

pub mod cookies;
pub mod handlers;
pub mod middleware;

pub use middleware::SessionUser;
