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

//! This module contains memory mapping registry implementation.

use std::collections::HashMap;

use crate::mapping::{MappingRegistry, RelationshipKey, TableMappingRef};
use crate::{Error, ErrorKind, Result};

/// Memory mapping registry implementation.
///
/// Every mapping is registered under a relationship key. Several keys may share
/// one table, as mapped subclasses of a single-table hierarchy do; lookups by
/// table name return the first mapping registered for that table.
#[derive(Debug, Default)]
pub struct MemoryMappingRegistry {
    by_key: HashMap<RelationshipKey, TableMappingRef>,
    by_table: HashMap<String, TableMappingRef>,
}

impl MemoryMappingRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `mapping` under `key`.
    pub fn register(
        &mut self,
        key: impl Into<RelationshipKey>,
        mapping: TableMappingRef,
    ) -> Result<()> {
        let key = key.into();
        let table_name = mapping.table_name().to_string();

        if self.by_key.contains_key(&key) {
            return Err(Error::new(
                ErrorKind::DataInvalid,
                format!("Mapping already registered under key: {key}"),
            ));
        }

        self.by_table
            .entry(table_name)
            .or_insert_with(|| mapping.clone());
        self.by_key.insert(key, mapping);
        Ok(())
    }

    /// Number of registered mappings.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Whether no mapping is registered.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl MappingRegistry for MemoryMappingRegistry {
    fn metadata_for_table(&self, name: &str) -> Result<TableMappingRef> {
        self.by_table.get(name).cloned().ok_or_else(|| {
            Error::new(
                ErrorKind::TableNotFound,
                format!("No mapping for table: {name}"),
            )
        })
    }

    fn metadata(&self, key: &RelationshipKey) -> Result<TableMappingRef> {
        self.by_key.get(key).cloned().ok_or_else(|| {
            Error::new(
                ErrorKind::TableNotFound,
                format!("No mapping registered under key: {key}"),
            )
        })
    }
}
