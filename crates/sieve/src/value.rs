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

//! Values compared against fields and bound as query parameters.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde_derive::{Deserialize, Serialize};

/// A value carried by a comparison and later bound to a placeholder.
///
/// Lists are bound as a single parameter; drivers that support array binding
/// expand them when the statement runs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    /// SQL `NULL`.
    Null,
    /// A boolean value.
    Boolean(bool),
    /// A 64-bit signed integer.
    Long(i64),
    /// A 64-bit float.
    Double(OrderedFloat<f64>),
    /// A string value.
    String(String),
    /// A list of values, used by `IN` and `NOT IN`.
    List(Vec<Datum>),
}

impl Datum {
    /// Creates a `NULL` datum.
    pub fn null() -> Self {
        Self::Null
    }

    /// Creates a boolean datum.
    pub fn bool(value: bool) -> Self {
        Self::Boolean(value)
    }

    /// Creates a long datum.
    pub fn long(value: impl Into<i64>) -> Self {
        Self::Long(value.into())
    }

    /// Creates a double datum.
    pub fn double(value: f64) -> Self {
        Self::Double(OrderedFloat(value))
    }

    /// Creates a string datum.
    pub fn string(value: impl ToString) -> Self {
        Self::String(value.to_string())
    }

    /// Creates a list datum from anything convertible into datums.
    ///
    /// ```rust
    /// use sieve::Datum;
    ///
    /// let list = Datum::list([1_i64, 2, 3]);
    /// assert_eq!(list.to_string(), "(1, 2, 3)");
    /// ```
    pub fn list<T: Into<Datum>>(values: impl IntoIterator<Item = T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl Display for Datum {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Datum::Null => write!(f, "NULL"),
            Datum::Boolean(v) => write!(f, "{v}"),
            Datum::Long(v) => write!(f, "{v}"),
            Datum::Double(v) => write!(f, "{v}"),
            Datum::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Datum::List(values) => write!(f, "({})", values.iter().join(", ")),
        }
    }
}

impl From<bool> for Datum {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for Datum {
    fn from(value: i32) -> Self {
        Self::Long(value.into())
    }
}

impl From<i64> for Datum {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Self::double(value)
    }
}

impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Datum {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Datum>> From<Vec<T>> for Datum {
    fn from(values: Vec<T>) -> Self {
        Self::list(values)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_display_quotes_strings() {
        assert_eq!(Datum::string("o'brien").to_string(), "'o''brien'");
        assert_eq!(Datum::null().to_string(), "NULL");
        assert_eq!(
            Datum::list(vec![Datum::long(1), Datum::string("a")]).to_string(),
            "(1, 'a')"
        );
    }

    #[test]
    fn test_json_representation() {
        let datum = Datum::list(vec![
            Datum::long(7),
            Datum::string("x"),
            Datum::bool(true),
            Datum::null(),
        ]);

        let json = serde_json::to_string(&datum).unwrap();
        assert_eq!(json, r#"[7,"x",true,null]"#);

        let parsed: Datum = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, datum);
    }
}
