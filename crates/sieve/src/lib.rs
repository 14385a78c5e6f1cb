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

//! Translation of filter expression trees into parameterized SQL.
//!
//! # Examples
//!
//! ## Filter Across A Relationship
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use sieve::expr::Reference;
//! use sieve::mapping::{DirectRelationship, MemoryMappingRegistry, TableMetadata};
//! use sieve::sql::{SqlBindStyle, SqlDialect};
//! use sieve::{Result, SqlExpressionVisitor};
//!
//! fn main() -> Result<()> {
//!     // Describe the tables.
//!     let mut registry = MemoryMappingRegistry::new();
//!     registry.register(
//!         "Post",
//!         Arc::new(
//!             TableMetadata::new("posts", "id")
//!                 .with_columns(["title", "author_id"])
//!                 .with_relationship("author", DirectRelationship::new("Author", "author_id")),
//!         ),
//!     )?;
//!     registry.register(
//!         "Author",
//!         Arc::new(TableMetadata::new("authors", "id").with_columns(["name"])),
//!     )?;
//!
//!     // Translate a filter over `posts`, selected as `p`.
//!     let dialect = SqlDialect::builder()
//!         .bind_style(SqlBindStyle::DollarNumeric)
//!         .build();
//!     let mut visitor = SqlExpressionVisitor::try_new(Arc::new(registry), "posts", "p", dialect)?;
//!     let filter = visitor.compile(
//!         &Reference::new("title")
//!             .not_equal_to("Draft")
//!             .and(Reference::new("author.name").is_in(["Ada", "Grace"])),
//!     )?;
//!
//!     assert_eq!(
//!         filter.sql(),
//!         "(p.title <> $1) AND (p.author_id IN (SELECT authors.id FROM authors WHERE authors.name IN ($2)))"
//!     );
//!     assert_eq!(filter.parameters()[1].name(), "name_1");
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]

mod error;
pub use error::{Error, ErrorKind, Result};

mod value;
pub use value::Datum;

pub mod expr;
pub use expr::visitors::sql_visitor::{SqlExpressionVisitor, SqlFilter};

pub mod mapping;
pub mod sql;
