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

//! This module contains filter expressions.
//! A filter expression evaluates to a boolean for each row, for example
//! `status = 'active' AND author.name IN ('a', 'b')`.

use std::fmt::{Display, Formatter};
use std::ops::Not;

use crate::expr::visitors::field_path_collector::FieldPathCollector;
use crate::expr::visitors::visit;
use crate::expr::{LogicalOperator, PredicateOperator, Reference};
use crate::sql::ParameterType;
use crate::{Datum, Result};

/// A leaf comparison, for example `a = 10` or `a IN (1, 2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    reference: Reference,
    op: PredicateOperator,
    value: Datum,
    type_hint: ParameterType,
}

impl Comparison {
    /// Creates a comparison with an untyped parameter.
    pub fn new(reference: Reference, op: PredicateOperator, value: Datum) -> Self {
        Self {
            reference,
            op,
            value,
            type_hint: ParameterType::Untyped,
        }
    }

    /// Set the type hint forwarded with the bound parameter.
    pub fn with_type_hint(mut self, type_hint: ParameterType) -> Self {
        self.type_hint = type_hint;
        self
    }

    /// Return the compared field.
    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    /// Return the operator.
    pub fn op(&self) -> PredicateOperator {
        self.op
    }

    /// Return the compared value.
    pub fn value(&self) -> &Datum {
        &self.value
    }

    /// Return the type hint of the bound parameter.
    pub fn type_hint(&self) -> ParameterType {
        self.type_hint
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.reference, self.op, self.value)
    }
}

/// Logical composition of sub-expressions, such as `AND`, `OR`, `NOT`.
///
/// The children are kept in the order given. `NOT` is only meaningful with
/// exactly one child; consumers reject any other arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeExpression {
    op: LogicalOperator,
    children: Vec<Expression>,
}

impl CompositeExpression {
    /// Creates a composite expression.
    pub fn new(op: LogicalOperator, children: Vec<Expression>) -> Self {
        Self { op, children }
    }

    /// Return the logical operator.
    pub fn op(&self) -> LogicalOperator {
        self.op
    }

    /// Return the children, in input order.
    pub fn children(&self) -> &[Expression] {
        &self.children
    }
}

/// Filter expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// Leaf comparison, for example `a = 10`.
    Comparison(Comparison),
    /// Composite, for example `(a = 10) AND (b = 20)`.
    Composite(CompositeExpression),
    /// Bare value. Not a boolean filter on its own.
    Value(Datum),
}

impl Expression {
    /// Combines two expressions with `AND`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sieve::Datum;
    /// use sieve::expr::Reference;
    ///
    /// let expr = Reference::new("a")
    ///     .equal_to(Datum::long(10))
    ///     .and(Reference::new("b").equal_to(Datum::long(20)));
    ///
    /// assert_eq!(&format!("{expr}"), "(a = 10) AND (b = 20)");
    /// ```
    pub fn and(self, other: Expression) -> Expression {
        Self::all([self, other])
    }

    /// Combines two expressions with `OR`.
    pub fn or(self, other: Expression) -> Expression {
        Self::any([self, other])
    }

    /// Combines any number of expressions with `AND`.
    pub fn all(children: impl IntoIterator<Item = Expression>) -> Expression {
        Expression::Composite(CompositeExpression::new(
            LogicalOperator::And,
            children.into_iter().collect(),
        ))
    }

    /// Combines any number of expressions with `OR`.
    pub fn any(children: impl IntoIterator<Item = Expression>) -> Expression {
        Expression::Composite(CompositeExpression::new(
            LogicalOperator::Or,
            children.into_iter().collect(),
        ))
    }

    /// Returns the distinct field paths referenced by this expression, in the
    /// order they are first visited.
    ///
    /// ```rust
    /// use sieve::expr::Reference;
    ///
    /// let expr = Reference::new("a")
    ///     .equal_to(1)
    ///     .or(Reference::new("author.name").equal_to("x"))
    ///     .and(Reference::new("a").not_equal_to(2));
    ///
    /// assert_eq!(expr.field_paths().unwrap(), vec!["a", "author.name"]);
    /// ```
    pub fn field_paths(&self) -> Result<Vec<String>> {
        let mut collector = FieldPathCollector::default();
        visit(&mut collector, self)?;
        Ok(collector.into_paths())
    }
}

impl Not for Expression {
    type Output = Expression;

    /// Create an expression which is the negation of this one. For example: `NOT (a = 10)`
    ///
    /// # Example
    ///
    /// ```rust
    /// use sieve::Datum;
    /// use sieve::expr::Reference;
    ///
    /// let expr = !Reference::new("a").equal_to(Datum::long(10));
    ///
    /// assert_eq!(&format!("{expr}"), "NOT (a = 10)");
    /// ```
    fn not(self) -> Self::Output {
        Expression::Composite(CompositeExpression::new(LogicalOperator::Not, vec![self]))
    }
}

impl From<Comparison> for Expression {
    fn from(comparison: Comparison) -> Self {
        Expression::Comparison(comparison)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Comparison(comparison) => write!(f, "{comparison}"),
            Expression::Composite(composite) => match composite.op {
                LogicalOperator::Not => {
                    let inner = composite
                        .children
                        .iter()
                        .map(|child| child.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    write!(f, "NOT ({inner})")
                }
                op => {
                    let joined = composite
                        .children
                        .iter()
                        .map(|child| format!("({child})"))
                        .collect::<Vec<_>>()
                        .join(&format!(" {op} "));
                    write!(f, "{joined}")
                }
            },
            Expression::Value(datum) => write!(f, "{datum}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_builders_keep_child_order() {
        let expr = Expression::any([
            Reference::new("c").equal_to(3),
            Reference::new("a").equal_to(1),
            Reference::new("b").equal_to(2),
        ]);

        let Expression::Composite(composite) = &expr else {
            panic!("expected a composite, got {expr:?}");
        };
        assert_eq!(composite.op(), LogicalOperator::Or);
        let names = composite
            .children()
            .iter()
            .map(|child| match child {
                Expression::Comparison(c) => c.reference().name().to_string(),
                other => panic!("unexpected child {other:?}"),
            })
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_display_nested() {
        let expr = !Reference::new("a")
            .equal_to(1)
            .or(Reference::new("b").is_not_in(["x", "y"]));

        assert_eq!(expr.to_string(), "NOT ((a = 1) OR (b NOT IN ('x', 'y')))");
    }

    #[test]
    fn test_type_hint_defaults_to_untyped() {
        let comparison = Comparison::new(
            Reference::new("a"),
            PredicateOperator::Eq,
            Datum::long(1),
        );
        assert_eq!(comparison.type_hint(), ParameterType::Untyped);

        let typed = comparison.with_type_hint(ParameterType::Integer);
        assert_eq!(typed.type_hint(), ParameterType::Integer);
    }

    #[test]
    fn test_field_paths_are_distinct() {
        let expr = Reference::new("a")
            .equal_to(1)
            .and(Reference::new("a").equal_to(2))
            .and(Reference::new("rel.b").equal_to(3));

        assert_eq!(expr.field_paths().unwrap(), vec!["a", "rel.b"]);
    }
}
