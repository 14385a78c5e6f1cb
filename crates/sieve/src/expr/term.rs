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

//! Term definition.

use std::fmt::{Display, Formatter};

use crate::Datum;
use crate::expr::{Comparison, Expression, PredicateOperator};

/// A named reference to a field, either `field` or `relationship.field`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    name: String,
}

impl Reference {
    /// Create a new unbound reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Return the full path of this reference.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Split the path into its relationship prefix and the remaining field.
    ///
    /// Only the first dot separates; `a.b.c` yields `(Some("a"), "b.c")`.
    pub fn split(&self) -> (Option<&str>, &str) {
        match self.name.split_once('.') {
            Some((relationship, field)) => (Some(relationship), field),
            None => (None, self.name.as_str()),
        }
    }

    /// The last segment of the path, the part naming the compared column.
    pub fn field_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(_, field)| field)
    }

    /// Creates an equality expression. For example, `a = 10`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sieve::Datum;
    /// use sieve::expr::Reference;
    ///
    /// let expr = Reference::new("a").equal_to(Datum::long(10));
    ///
    /// assert_eq!(&format!("{expr}"), "a = 10");
    /// ```
    pub fn equal_to(self, datum: impl Into<Datum>) -> Expression {
        self.compare(PredicateOperator::Eq, datum)
    }

    /// Creates an inequality expression. For example, `a <> 10`.
    pub fn not_equal_to(self, datum: impl Into<Datum>) -> Expression {
        self.compare(PredicateOperator::NotEq, datum)
    }

    /// Creates a membership expression. For example, `a IN (5, 6)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sieve::expr::Reference;
    ///
    /// let expr = Reference::new("a").is_in([5_i64, 6]);
    ///
    /// assert_eq!(&format!("{expr}"), "a IN (5, 6)");
    /// ```
    pub fn is_in<T: Into<Datum>>(self, values: impl IntoIterator<Item = T>) -> Expression {
        self.compare(PredicateOperator::In, Datum::list(values))
    }

    /// Creates a negated membership expression. For example, `a NOT IN (5, 6)`.
    pub fn is_not_in<T: Into<Datum>>(self, values: impl IntoIterator<Item = T>) -> Expression {
        self.compare(PredicateOperator::NotIn, Datum::list(values))
    }

    fn compare(self, op: PredicateOperator, datum: impl Into<Datum>) -> Expression {
        Expression::Comparison(Comparison::new(self, op, datum.into()))
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
