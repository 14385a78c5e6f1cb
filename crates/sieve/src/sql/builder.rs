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

use crate::Datum;
use crate::sql::{Parameter, ParameterType, SqlDialect};

/// Collects bound parameters and renders their placeholders in the dialect's
/// bind style.
///
/// A builder created by [`QueryBuilder::sub_query`] is independent of its
/// parent: it owns its own parameter list, which the parent takes back with
/// [`QueryBuilder::merge`] once the nested fragment is complete.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    dialect: SqlDialect,
    // Parameters bound before this builder's first one, in the final statement.
    position_offset: usize,
    parameters: Vec<Parameter>,
}

impl QueryBuilder {
    /// Creates an empty builder.
    pub fn new(dialect: SqlDialect) -> Self {
        Self {
            dialect,
            position_offset: 0,
            parameters: Vec::new(),
        }
    }

    /// Creates a nested builder with the same dialect, for a sub-select that
    /// will be spliced in at the current position.
    pub fn sub_query(&self) -> QueryBuilder {
        Self {
            dialect: self.dialect.clone(),
            position_offset: self.position_offset + self.parameters.len(),
            parameters: Vec::new(),
        }
    }

    /// Bind `value` under `name` and return the placeholder to put in the SQL.
    pub fn create_named_parameter(
        &mut self,
        name: impl Into<String>,
        value: Datum,
        type_hint: ParameterType,
    ) -> String {
        let name = name.into();
        let position = self.position_offset + self.parameters.len() + 1;
        let placeholder = self.dialect.bind_style().placeholder(&name, position);

        self.parameters.push(Parameter::new(name, value, type_hint));
        placeholder
    }

    /// Append the parameters of a finished nested builder.
    pub fn merge(&mut self, nested: QueryBuilder) {
        debug_assert_eq!(
            nested.position_offset,
            self.position_offset + self.parameters.len(),
            "nested builder merged out of order"
        );

        self.parameters.extend(nested.parameters);
    }

    /// Parameters bound so far, in binding order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Drop every bound parameter.
    pub fn reset(&mut self) {
        self.parameters.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sql::SqlBindStyle;

    fn builder(bind_style: SqlBindStyle) -> QueryBuilder {
        QueryBuilder::new(SqlDialect::builder().bind_style(bind_style).build())
    }

    #[test]
    fn test_named_placeholders() {
        let mut builder = builder(SqlBindStyle::Named);
        let placeholder =
            builder.create_named_parameter("name_0", Datum::string("x"), ParameterType::Untyped);

        assert_eq!(placeholder, ":name_0");
        assert_eq!(
            builder.parameters(),
            &[Parameter::new(
                "name_0",
                Datum::string("x"),
                ParameterType::Untyped
            )]
        );
    }

    #[test]
    fn test_sub_query_continues_positions() {
        let mut builder = builder(SqlBindStyle::DollarNumeric);
        assert_eq!(
            builder.create_named_parameter("a_0", Datum::long(1), ParameterType::Untyped),
            "$1"
        );

        let mut nested = builder.sub_query();
        assert!(nested.parameters().is_empty());
        assert_eq!(
            nested.create_named_parameter("b_1", Datum::long(2), ParameterType::Untyped),
            "$2"
        );

        builder.merge(nested);
        assert_eq!(
            builder.create_named_parameter("c_2", Datum::long(3), ParameterType::Untyped),
            "$3"
        );

        let names = builder
            .parameters()
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a_0", "b_1", "c_2"]);
    }

    #[test]
    fn test_reset() {
        let mut builder = builder(SqlBindStyle::QMark);
        builder.create_named_parameter("a_0", Datum::long(1), ParameterType::Untyped);
        builder.reset();

        assert!(builder.parameters().is_empty());
        assert_eq!(
            builder.create_named_parameter("a_0", Datum::long(1), ParameterType::Untyped),
            "?"
        );
    }
}
