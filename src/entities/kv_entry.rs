//! Key-value entry entity - Backing table for the local persistence store.
//!
//! Each row holds one JSON-encoded UI value (e.g. `clientPayments`, `userRole`).
//! Keys are unique; writing an existing key replaces its value.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key-value entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kv_entries")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Storage key (e.g., `"clientPayments"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Value serialized as JSON text
    pub value: String,
    /// When this entry was last written
    pub updated_at: DateTime,
}

/// `KvEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
