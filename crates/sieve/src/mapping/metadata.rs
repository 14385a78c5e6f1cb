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

use std::collections::{HashMap, HashSet};

use serde_derive::{Deserialize, Serialize};

use crate::mapping::{RelationshipDescriptor, TableMapping};
use crate::{Error, ErrorKind, Result};

/// Plain mapping of a table, built in code or deserialized.
///
/// # Example
///
/// ```rust
/// use sieve::mapping::{DirectRelationship, TableMapping, TableMetadata};
///
/// let posts = TableMetadata::new("posts", "id")
///     .with_columns(["title", "author_id"])
///     .with_relationship("author", DirectRelationship::new("Author", "author_id"));
///
/// assert!(posts.has_column("id"));
/// assert!(posts.has_column("title"));
/// assert!(!posts.has_column("body"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    table_name: String,
    identifier_column: String,
    #[serde(default)]
    columns: HashSet<String>,
    #[serde(default)]
    relationships: HashMap<String, RelationshipDescriptor>,
}

impl TableMetadata {
    /// Creates a mapping whose only column is the identifier.
    pub fn new(table_name: impl Into<String>, identifier_column: impl Into<String>) -> Self {
        let identifier_column = identifier_column.into();
        Self {
            table_name: table_name.into(),
            columns: HashSet::from([identifier_column.clone()]),
            identifier_column,
            relationships: HashMap::new(),
        }
    }

    /// Add columns.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Map the foreign property `property` to a relationship.
    pub fn with_relationship(
        mut self,
        property: impl Into<String>,
        relationship: impl Into<RelationshipDescriptor>,
    ) -> Self {
        self.relationships
            .insert(property.into(), relationship.into());
        self
    }
}

impl TableMapping for TableMetadata {
    fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn identifier_column(&self) -> &str {
        &self.identifier_column
    }

    fn relationship_by_foreign_property(&self, name: &str) -> Result<RelationshipDescriptor> {
        self.relationships.get(name).cloned().ok_or_else(|| {
            Error::new(
                ErrorKind::RelationshipNotFound,
                format!("No relationship mapped for property: {name}"),
            )
            .with_context("table", &self.table_name)
        })
    }
}
