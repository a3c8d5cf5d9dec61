//! Core business logic - framework-agnostic records, aggregation, persistence and export.

/// CSV and JSON exports
pub mod export;
/// Payment and client records
pub mod payment;
/// Payment-link creation modal
pub mod payment_link;
/// State mirrored into the local store
pub mod persisted;
/// Roles and navigation
pub mod role;
/// Seed data
pub mod seed;
/// Aggregation over payments and clients
pub mod stats;
/// Key-value storage backends
pub mod storage;
