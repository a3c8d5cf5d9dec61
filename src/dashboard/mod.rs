//! Dashboard layer - page controllers and text views.
//!
//! Each controller owns its state exclusively and re-renders on demand; there
//! is no shared mutable state between pages.

/// Admin overview across all clients
pub mod admin;
/// Per-client payments view
pub mod client;
/// Role selection
pub mod login;
/// Text renderers
pub mod views;

pub use admin::{AdminDashboard, AdminTab};
pub use client::ClientDashboard;
pub use login::LoginPage;
