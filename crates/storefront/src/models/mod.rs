//! Per-visitor models kept in the session.

pub mod session;

pub use session::{SiteChrome, keys as session_keys};
