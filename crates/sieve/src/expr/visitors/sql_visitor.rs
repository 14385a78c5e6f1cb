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

//! Translation of [`Expression`] trees into parameterized SQL filter fragments.

use std::sync::Arc;

use crate::expr::visitors::{ExpressionVisitor, visit};
use crate::expr::{Comparison, Expression, LogicalOperator};
use crate::mapping::{
    DirectRelationship, MappingRegistry, OneToManyRelationship, RelationshipDescriptor,
    TableMapping, TableMappingRef,
};
use crate::sql::{Parameter, QueryBuilder, SqlDialect, fragment, placeholder_safe_name};
use crate::{Datum, Error, ErrorKind, Result};

/// A compiled filter: SQL fragment and the parameters it binds.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFilter {
    sql: String,
    parameters: Vec<Parameter>,
}

impl SqlFilter {
    /// The SQL fragment, without a leading `WHERE`.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound parameters, in the order their placeholders appear.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Consumes the filter.
    pub fn into_parts(self) -> (String, Vec<Parameter>) {
        (self.sql, self.parameters)
    }
}

/// Translates expressions over a root table into SQL `WHERE` fragments.
///
/// Field paths are either a bare column of the root table (`name`) or one hop
/// through a relationship mapped on the root table (`author.name`). Every
/// compared value is bound as a parameter named after the field and the
/// position of its comparison in the tree, e.g. `name_0`, `name_1`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use sieve::expr::Reference;
/// use sieve::expr::visitors::sql_visitor::SqlExpressionVisitor;
/// use sieve::mapping::{MemoryMappingRegistry, TableMetadata};
/// use sieve::sql::SqlDialect;
///
/// let mut registry = MemoryMappingRegistry::new();
/// registry
///     .register("Post", Arc::new(TableMetadata::new("posts", "id").with_columns(["title"])))
///     .unwrap();
///
/// let mut visitor =
///     SqlExpressionVisitor::try_new(Arc::new(registry), "posts", "p", SqlDialect::default())
///         .unwrap();
/// let sql = visitor
///     .dispatch(&Reference::new("title").equal_to("Hello"))
///     .unwrap();
///
/// assert_eq!(sql, "p.title = :title_0");
/// assert_eq!(visitor.parameters().len(), 1);
/// ```
#[derive(Debug)]
pub struct SqlExpressionVisitor {
    registry: Arc<dyn MappingRegistry>,
    root: TableMappingRef,
    root_alias: String,
    builder: QueryBuilder,
    ordinal: usize,
}

impl SqlExpressionVisitor {
    /// Creates a visitor over the `root` table, which the outer query selects
    /// as `root_alias`.
    pub fn new(
        registry: Arc<dyn MappingRegistry>,
        root: TableMappingRef,
        root_alias: impl Into<String>,
        dialect: SqlDialect,
    ) -> Self {
        Self {
            registry,
            root,
            root_alias: root_alias.into(),
            builder: QueryBuilder::new(dialect),
            ordinal: 0,
        }
    }

    /// Creates a visitor whose root table mapping is looked up in `registry`.
    pub fn try_new(
        registry: Arc<dyn MappingRegistry>,
        root_table: &str,
        root_alias: impl Into<String>,
        dialect: SqlDialect,
    ) -> Result<Self> {
        let root = registry.metadata_for_table(root_table)?;
        Ok(Self::new(registry, root, root_alias, dialect))
    }

    /// Translates `expression` into a SQL fragment.
    ///
    /// Parameters of a previous dispatch are discarded first. On error no
    /// parameter is retained.
    pub fn dispatch(&mut self, expression: &Expression) -> Result<String> {
        self.builder.reset();
        self.ordinal = 0;

        match visit(self, expression) {
            Ok(sql) => {
                tracing::debug!(
                    table = self.root.table_name(),
                    sql_len = sql.len(),
                    parameters = self.builder.parameters().len(),
                    "Translated expression to SQL"
                );
                Ok(sql)
            }
            Err(e) => {
                self.builder.reset();
                Err(e)
            }
        }
    }

    /// Parameters bound by the most recent dispatch, in visitation order.
    pub fn parameters(&self) -> &[Parameter] {
        self.builder.parameters()
    }

    /// Translates `expression` and returns the fragment with its parameters.
    pub fn compile(&mut self, expression: &Expression) -> Result<SqlFilter> {
        let sql = self.dispatch(expression)?;
        Ok(SqlFilter {
            sql,
            parameters: self.builder.parameters().to_vec(),
        })
    }

    fn next_parameter_name(&mut self, comparison: &Comparison) -> String {
        let field = comparison.reference().field_name();
        let name = format!("{}_{}", placeholder_safe_name(field), self.ordinal);
        self.ordinal += 1;
        name
    }

    fn root_comparison(&mut self, field: &str, comparison: &Comparison) -> Result<String> {
        ensure_column(self.root.as_ref(), field)?;

        let name = self.next_parameter_name(comparison);
        let placeholder = self.builder.create_named_parameter(
            name,
            comparison.value().clone(),
            comparison.type_hint(),
        );

        tracing::trace!(field, table = self.root.table_name(), "Resolved root field");
        Ok(fragment::comparison(
            &fragment::column(&self.root_alias, field),
            comparison.op(),
            &placeholder,
        ))
    }

    fn relationship_comparison(
        &mut self,
        relationship: &str,
        field: &str,
        comparison: &Comparison,
    ) -> Result<String> {
        if field.contains('.') {
            return Err(Error::new(
                ErrorKind::FieldNotFound,
                format!(
                    "Field path {} goes deeper than one relationship",
                    comparison.reference().name()
                ),
            )
            .with_context("table", self.root.table_name()));
        }

        let descriptor = self.root.relationship_by_foreign_property(relationship)?;
        let target = self.registry.metadata(descriptor.target())?;
        ensure_column(target.as_ref(), field)?;

        tracing::trace!(
            relationship,
            field,
            kind = descriptor.type_name(),
            target = target.table_name(),
            "Resolved relationship field"
        );

        let name = self.next_parameter_name(comparison);
        let value = comparison.value().clone();
        let op = comparison.op();
        let target_column = fragment::column(target.table_name(), field);

        match &descriptor {
            RelationshipDescriptor::Direct(direct) => {
                let mut nested = self.builder.sub_query();
                let placeholder =
                    nested.create_named_parameter(name, value, comparison.type_hint());
                let select = fragment::sub_select(
                    &fragment::column(target.table_name(), target.identifier_column()),
                    target.table_name(),
                    &fragment::comparison(&target_column, op, &placeholder),
                );
                self.builder.merge(nested);

                Ok(fragment::in_sub_select(
                    &fragment::column(&self.root_alias, direct.foreign_key_column()),
                    &select,
                ))
            }
            RelationshipDescriptor::OneToMany(_) => {
                let placeholder = self
                    .builder
                    .create_named_parameter(name, value, comparison.type_hint());
                Ok(fragment::comparison(&target_column, op, &placeholder))
            }
            RelationshipDescriptor::Other(_) => Err(Error::new(
                ErrorKind::UnhandledRelationshipMetadata,
                format!(
                    "Unhandled relationship metadata: expected {} or {}, got {}",
                    DirectRelationship::TYPE_NAME,
                    OneToManyRelationship::TYPE_NAME,
                    descriptor.type_name()
                ),
            )),
        }
    }
}

fn ensure_column(mapping: &dyn TableMapping, field: &str) -> Result<()> {
    if mapping.has_column(field) {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::FieldNotFound,
            format!("No field named {field} in table {}", mapping.table_name()),
        )
        .with_context("table", mapping.table_name())
        .with_context("field", field))
    }
}

impl ExpressionVisitor for SqlExpressionVisitor {
    type T = String;

    fn and(&mut self, children: Vec<String>) -> Result<String> {
        Ok(fragment::junction(LogicalOperator::And, &children))
    }

    fn or(&mut self, children: Vec<String>) -> Result<String> {
        Ok(fragment::junction(LogicalOperator::Or, &children))
    }

    fn not(&mut self, inner: String) -> Result<String> {
        Ok(fragment::not(&inner))
    }

    fn comparison(&mut self, comparison: &Comparison) -> Result<String> {
        match comparison.reference().split() {
            (None, field) => self.root_comparison(field, comparison),
            (Some(relationship), field) => {
                self.relationship_comparison(relationship, field, comparison)
            }
        }
    }

    fn value(&mut self, value: &Datum) -> Result<String> {
        Err(Error::new(
            ErrorKind::UnrecognizedExpression,
            format!("Value {value} is not a filter expression"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::expr::Reference;
    use crate::mapping::{MemoryMappingRegistry, TableMetadata, UnsupportedRelationship};
    use crate::sql::{ParameterType, SqlBindStyle};

    fn new_visitor(bind_style: SqlBindStyle) -> SqlExpressionVisitor {
        let mut registry = MemoryMappingRegistry::new();
        registry
            .register(
                "Post",
                Arc::new(
                    TableMetadata::new("posts", "id")
                        .with_columns(["title", "author_id"])
                        .with_relationship("author", DirectRelationship::new("Author", "author_id"))
                        .with_relationship("comments", OneToManyRelationship::new("Comment"))
                        .with_relationship(
                            "tags",
                            UnsupportedRelationship::new("ManyToManyRelationship", "Tag"),
                        ),
                ),
            )
            .unwrap();
        registry
            .register(
                "Author",
                Arc::new(TableMetadata::new("authors", "id").with_columns(["name"])),
            )
            .unwrap();
        registry
            .register(
                "Comment",
                Arc::new(TableMetadata::new("comments", "id").with_columns(["body"])),
            )
            .unwrap();
        registry
            .register("Tag", Arc::new(TableMetadata::new("tags", "id")))
            .unwrap();

        SqlExpressionVisitor::try_new(
            Arc::new(registry),
            "posts",
            "p",
            SqlDialect::builder().bind_style(bind_style).build(),
        )
        .unwrap()
    }

    #[test]
    fn test_root_comparison() {
        let mut visitor = new_visitor(SqlBindStyle::Named);
        let sql = visitor
            .dispatch(&Reference::new("title").not_equal_to("Draft"))
            .unwrap();

        assert_eq!(sql, "p.title <> :title_0");
        assert_eq!(visitor.parameters(), &[Parameter::new(
            "title_0",
            Datum::string("Draft"),
            ParameterType::Untyped
        )]);
    }

    #[test]
    fn test_set_comparison_binds_one_list() {
        let mut visitor = new_visitor(SqlBindStyle::Named);
        let sql = visitor
            .dispatch(&Reference::new("id").is_not_in([1, 2, 3]))
            .unwrap();

        assert_eq!(sql, "p.id NOT IN (:id_0)");
        assert_eq!(visitor.parameters().len(), 1);
        assert_eq!(visitor.parameters()[0].value(), &Datum::list([1, 2, 3]));
    }

    #[test]
    fn test_direct_relationship() {
        let mut visitor = new_visitor(SqlBindStyle::Named);
        let sql = visitor
            .dispatch(&Reference::new("author.name").equal_to("Ada"))
            .unwrap();

        assert_eq!(
            sql,
            "p.author_id IN (SELECT authors.id FROM authors WHERE authors.name = :name_0)"
        );
        assert_eq!(visitor.parameters()[0].name(), "name_0");
    }

    #[test]
    fn test_one_to_many_relationship() {
        let mut visitor = new_visitor(SqlBindStyle::Named);
        let sql = visitor
            .dispatch(&Reference::new("comments.body").equal_to("spam"))
            .unwrap();

        assert_eq!(sql, "comments.body = :body_0");
    }

    #[test]
    fn test_unhandled_relationship() {
        let mut visitor = new_visitor(SqlBindStyle::Named);
        let err = visitor
            .dispatch(&Reference::new("tags.id").equal_to(1))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnhandledRelationshipMetadata);
        assert_eq!(
            err.message(),
            "Unhandled relationship metadata: expected DirectRelationship or OneToManyRelationship, got ManyToManyRelationship"
        );
        assert!(visitor.parameters().is_empty());
    }

    #[test]
    fn test_missing_fields() {
        let mut visitor = new_visitor(SqlBindStyle::Named);

        let err = visitor
            .dispatch(&Reference::new("body").equal_to("x"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldNotFound);
        assert_eq!(err.message(), "No field named body in table posts");

        let err = visitor
            .dispatch(&Reference::new("author.email").equal_to("x"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldNotFound);
        assert_eq!(err.context_value("table"), Some("authors"));

        let err = visitor
            .dispatch(&Reference::new("author.address.city").equal_to("x"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldNotFound);
    }

    #[test]
    fn test_failed_dispatch_clears_parameters() {
        let mut visitor = new_visitor(SqlBindStyle::Named);
        visitor
            .dispatch(&Reference::new("title").equal_to("a"))
            .unwrap();
        assert_eq!(visitor.parameters().len(), 1);

        let expr = Reference::new("title")
            .equal_to("a")
            .and(Reference::new("missing").equal_to("b"));
        assert!(visitor.dispatch(&expr).is_err());
        assert!(visitor.parameters().is_empty());
    }

    #[test]
    fn test_dollar_numeric_across_sub_select() {
        let mut visitor = new_visitor(SqlBindStyle::DollarNumeric);
        let expr = Expression::all([
            Reference::new("title").equal_to("a"),
            Reference::new("author.name").equal_to("b"),
            Reference::new("id").equal_to(3),
        ]);
        let filter = visitor.compile(&expr).unwrap();

        assert_eq!(
            filter.sql(),
            "(p.title = $1) AND (p.author_id IN (SELECT authors.id FROM authors WHERE authors.name = $2)) AND (p.id = $3)"
        );
        let names: Vec<_> = filter.parameters().iter().map(Parameter::name).collect();
        assert_eq!(names, vec!["title_0", "name_1", "id_2"]);
    }

    #[test]
    fn test_value_is_not_a_filter() {
        let mut visitor = new_visitor(SqlBindStyle::Named);
        let err = visitor
            .dispatch(&Expression::Value(Datum::bool(true)))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnrecognizedExpression);
        assert_eq!(err.message(), "Value true is not a filter expression");
    }

    #[test]
    fn test_thread_bounds() {
        fn assert_send<T: Send>() {}
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send::<SqlExpressionVisitor>();
        assert_send::<SqlFilter>();
        assert_send_sync::<Arc<MemoryMappingRegistry>>();
    }
}
