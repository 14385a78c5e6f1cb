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

//! Visitors over [`Expression`] trees.

pub(crate) mod field_path_collector;
pub mod sql_visitor;

use crate::expr::{Comparison, Expression, LogicalOperator};
use crate::{Datum, Error, ErrorKind, Result};

/// A visitor for [`Expression`]s. Visits in post-order, children left to right.
pub trait ExpressionVisitor {
    /// The return type of this visitor
    type T;

    /// Called after every child of an `AND` composite is visited
    fn and(&mut self, children: Vec<Self::T>) -> Result<Self::T>;

    /// Called after every child of an `OR` composite is visited
    fn or(&mut self, children: Vec<Self::T>) -> Result<Self::T>;

    /// Called after the operand of a `NOT` composite is visited
    fn not(&mut self, inner: Self::T) -> Result<Self::T>;

    /// Called when a comparison leaf is visited
    fn comparison(&mut self, comparison: &Comparison) -> Result<Self::T>;

    /// Called when a bare value node is visited
    fn value(&mut self, value: &Datum) -> Result<Self::T>;
}

/// Visits an [`Expression`] with the provided visitor, in post-order.
///
/// Composites are checked for arity before their children are visited: `NOT`
/// takes exactly one operand and `AND` / `OR` at least one.
pub fn visit<V: ExpressionVisitor>(visitor: &mut V, expression: &Expression) -> Result<V::T> {
    match expression {
        Expression::Comparison(comparison) => visitor.comparison(comparison),
        Expression::Value(value) => visitor.value(value),
        Expression::Composite(composite) => {
            let children = composite.children();
            match composite.op() {
                LogicalOperator::Not => {
                    let [inner] = children else {
                        return Err(Error::new(
                            ErrorKind::UnrecognizedExpression,
                            format!(
                                "NOT expects exactly one operand, got {}",
                                children.len()
                            ),
                        ));
                    };

                    let inner_result = visit(visitor, inner)?;
                    visitor.not(inner_result)
                }
                LogicalOperator::And => {
                    let results = visit_operands(visitor, LogicalOperator::And, children)?;
                    visitor.and(results)
                }
                LogicalOperator::Or => {
                    let results = visit_operands(visitor, LogicalOperator::Or, children)?;
                    visitor.or(results)
                }
            }
        }
    }
}

fn visit_operands<V: ExpressionVisitor>(
    visitor: &mut V,
    op: LogicalOperator,
    children: &[Expression],
) -> Result<Vec<V::T>> {
    if children.is_empty() {
        return Err(Error::new(
            ErrorKind::UnrecognizedExpression,
            format!("{op} expects at least one operand"),
        ));
    }

    children
        .iter()
        .map(|child| visit(&mut *visitor, child))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::expr::{CompositeExpression, Reference};

    /// Records the order of callbacks.
    #[derive(Default)]
    struct TraceVisitor {
        events: Vec<String>,
    }

    impl ExpressionVisitor for TraceVisitor {
        type T = usize;

        fn and(&mut self, children: Vec<usize>) -> Result<usize> {
            self.events.push(format!("and({})", children.len()));
            Ok(children.into_iter().sum())
        }

        fn or(&mut self, children: Vec<usize>) -> Result<usize> {
            self.events.push(format!("or({})", children.len()));
            Ok(children.into_iter().sum())
        }

        fn not(&mut self, inner: usize) -> Result<usize> {
            self.events.push("not".to_string());
            Ok(inner)
        }

        fn comparison(&mut self, comparison: &Comparison) -> Result<usize> {
            self.events.push(comparison.reference().name().to_string());
            Ok(1)
        }

        fn value(&mut self, _value: &Datum) -> Result<usize> {
            self.events.push("value".to_string());
            Ok(0)
        }
    }

    #[test]
    fn test_post_order_left_to_right() {
        let expr = Reference::new("a")
            .equal_to(1)
            .or(!Reference::new("b").equal_to(2))
            .and(Reference::new("c").equal_to(3));

        let mut visitor = TraceVisitor::default();
        let leaves = visit(&mut visitor, &expr).unwrap();

        assert_eq!(leaves, 3);
        assert_eq!(visitor.events, vec!["a", "b", "not", "or(2)", "c", "and(2)"]);
    }

    #[test]
    fn test_not_arity() {
        let expr = Expression::Composite(CompositeExpression::new(
            LogicalOperator::Not,
            vec![
                Reference::new("a").equal_to(1),
                Reference::new("b").equal_to(2),
            ],
        ));

        let mut visitor = TraceVisitor::default();
        let err = visit(&mut visitor, &expr).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnrecognizedExpression);
        assert_eq!(err.message(), "NOT expects exactly one operand, got 2");
        assert!(visitor.events.is_empty());
    }

    #[test]
    fn test_empty_junction() {
        let mut visitor = TraceVisitor::default();
        let err = visit(&mut visitor, &Expression::any([])).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnrecognizedExpression);
        assert_eq!(err.message(), "OR expects at least one operand");
    }

    #[test]
    fn test_value_nodes_reach_the_visitor() {
        let mut visitor = TraceVisitor::default();
        visit(&mut visitor, &Expression::Value(Datum::long(1))).unwrap();

        assert_eq!(visitor.events, vec!["value"]);
    }
}
