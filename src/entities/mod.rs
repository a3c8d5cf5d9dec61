//! Entity module - SeaORM entity definitions for the local persistence database.

pub mod kv_entry;

pub use kv_entry::{Column as KvEntryColumn, Entity as KvEntry, Model as KvEntryModel};
