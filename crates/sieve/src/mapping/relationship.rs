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

//! Descriptors of how a foreign property maps onto another table.

use std::fmt::{Display, Formatter};

use serde_derive::{Deserialize, Serialize};

/// Opaque key identifying the mapping on the far side of a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationshipKey(String);

impl RelationshipKey {
    /// Creates a key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RelationshipKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RelationshipKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for RelationshipKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// The root table holds a foreign key column pointing at the related table's
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectRelationship {
    target: RelationshipKey,
    foreign_key_column: String,
}

impl DirectRelationship {
    /// Type identifier used in diagnostics.
    pub const TYPE_NAME: &'static str = "DirectRelationship";

    /// Creates a direct relationship to `target` through `foreign_key_column`
    /// on the root table.
    pub fn new(target: impl Into<RelationshipKey>, foreign_key_column: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            foreign_key_column: foreign_key_column.into(),
        }
    }

    /// Key of the related mapping.
    pub fn target(&self) -> &RelationshipKey {
        &self.target
    }

    /// Foreign key column on the root table.
    pub fn foreign_key_column(&self) -> &str {
        &self.foreign_key_column
    }
}

/// The related table carries the identifier; the root has no local foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneToManyRelationship {
    target: RelationshipKey,
}

impl OneToManyRelationship {
    /// Type identifier used in diagnostics.
    pub const TYPE_NAME: &'static str = "OneToManyRelationship";

    /// Creates a one-to-many relationship to `target`.
    pub fn new(target: impl Into<RelationshipKey>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Key of the related mapping.
    pub fn target(&self) -> &RelationshipKey {
        &self.target
    }
}

/// A relationship kind this crate has no SQL lowering for, such as a
/// many-to-many join table mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsupportedRelationship {
    type_name: String,
    target: RelationshipKey,
}

impl UnsupportedRelationship {
    /// Creates a descriptor for a relationship of kind `type_name`.
    pub fn new(type_name: impl Into<String>, target: impl Into<RelationshipKey>) -> Self {
        Self {
            type_name: type_name.into(),
            target: target.into(),
        }
    }

    /// Key of the related mapping.
    pub fn target(&self) -> &RelationshipKey {
        &self.target
    }
}

/// How a foreign property resolves to another table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RelationshipDescriptor {
    /// Foreign key on the root table.
    Direct(DirectRelationship),
    /// Identifier on the related table.
    OneToMany(OneToManyRelationship),
    /// Any other kind of relationship.
    Other(UnsupportedRelationship),
}

impl RelationshipDescriptor {
    /// Key of the related mapping.
    pub fn target(&self) -> &RelationshipKey {
        match self {
            RelationshipDescriptor::Direct(r) => r.target(),
            RelationshipDescriptor::OneToMany(r) => r.target(),
            RelationshipDescriptor::Other(r) => r.target(),
        }
    }

    /// Type identifier of the concrete relationship kind.
    pub fn type_name(&self) -> &str {
        match self {
            RelationshipDescriptor::Direct(_) => DirectRelationship::TYPE_NAME,
            RelationshipDescriptor::OneToMany(_) => OneToManyRelationship::TYPE_NAME,
            RelationshipDescriptor::Other(r) => &r.type_name,
        }
    }
}

impl From<DirectRelationship> for RelationshipDescriptor {
    fn from(r: DirectRelationship) -> Self {
        RelationshipDescriptor::Direct(r)
    }
}

impl From<OneToManyRelationship> for RelationshipDescriptor {
    fn from(r: OneToManyRelationship) -> Self {
        RelationshipDescriptor::OneToMany(r)
    }
}

impl From<UnsupportedRelationship> for RelationshipDescriptor {
    fn from(r: UnsupportedRelationship) -> Self {
        RelationshipDescriptor::Other(r)
    }
}
