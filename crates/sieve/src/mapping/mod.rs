// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Schema mapping: which columns a table has and how its foreign properties
//! reach other tables.
//!
//! The translator only consumes these traits. Embedders backed by an ORM or a
//! configuration file implement them; [`MemoryMappingRegistry`] and
//! [`TableMetadata`] cover mappings assembled in code.

use std::fmt::Debug;
use std::sync::Arc;

use crate::Result;

mod memory;
pub use memory::*;
mod metadata;
pub use metadata::*;
mod relationship;
pub use relationship::*;

/// Reference to a [`TableMapping`].
pub type TableMappingRef = Arc<dyn TableMapping>;

/// Mapping metadata of one table.
pub trait TableMapping: Debug + Send + Sync {
    /// Whether the table has a column named `name`.
    fn has_column(&self, name: &str) -> bool;

    /// Name of the table.
    fn table_name(&self) -> &str;

    /// Identifier (primary key) column of the table.
    fn identifier_column(&self) -> &str;

    /// Relationship mapped under the foreign property `name`.
    ///
    /// The error returned for an unknown property is the implementor's own;
    /// it reaches the caller of the translator untouched.
    fn relationship_by_foreign_property(&self, name: &str) -> Result<RelationshipDescriptor>;
}

/// Lookup of table mappings, by table name or by relationship key.
pub trait MappingRegistry: Debug + Send + Sync {
    /// Mapping of the table named `name`.
    fn metadata_for_table(&self, name: &str) -> Result<TableMappingRef>;

    /// Mapping registered under the relationship key `key`.
    fn metadata(&self, key: &RelationshipKey) -> Result<TableMappingRef>;
}
