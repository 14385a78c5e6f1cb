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

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use typed_builder::TypedBuilder;

use crate::{Error, ErrorKind, Result};

/// Property selecting the placeholder syntax, see [`SqlBindStyle`].
pub const SQL_DIALECT_PROP_BIND_STYLE: &str = "sql.bind-style";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Placeholder syntax understood by the target driver.
pub enum SqlBindStyle {
    /// Named uses parameters of the form `:name`
    #[default]
    Named,
    /// DollarNumeric uses parameters of the form `$1..$N`, which is the Postgres style
    DollarNumeric,
    /// QMark uses parameters of the form `?` which is the style for other dialects (SQLite/MySQL/MariaDB)
    QMark,
}

impl SqlBindStyle {
    /// Render the placeholder for the parameter `name` bound at 1-based `position`.
    pub fn placeholder(&self, name: &str, position: usize) -> String {
        match self {
            SqlBindStyle::Named => format!(":{name}"),
            SqlBindStyle::DollarNumeric => format!("${position}"),
            SqlBindStyle::QMark => "?".to_string(),
        }
    }
}

impl Display for SqlBindStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlBindStyle::Named => write!(f, "named"),
            SqlBindStyle::DollarNumeric => write!(f, "dollar-numeric"),
            SqlBindStyle::QMark => write!(f, "qmark"),
        }
    }
}

impl FromStr for SqlBindStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "named" => Ok(SqlBindStyle::Named),
            "dollar-numeric" | "dollarnumeric" => Ok(SqlBindStyle::DollarNumeric),
            "qmark" => Ok(SqlBindStyle::QMark),
            other => Err(Error::new(
                ErrorKind::DataInvalid,
                format!("Unknown sql bind style: {other}"),
            )),
        }
    }
}

/// Dialect settings shared by every builder of one translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct SqlDialect {
    #[builder(default)]
    bind_style: SqlBindStyle,
}

impl SqlDialect {
    /// Load a dialect from string properties. Missing keys keep their defaults.
    pub fn from_props(props: &HashMap<String, String>) -> Result<Self> {
        let bind_style = match props.get(SQL_DIALECT_PROP_BIND_STYLE) {
            Some(value) => value
                .parse::<SqlBindStyle>()
                .map_err(|e| e.with_context("property", SQL_DIALECT_PROP_BIND_STYLE))?,
            None => SqlBindStyle::default(),
        };

        Ok(Self::builder().bind_style(bind_style).build())
    }

    /// Placeholder syntax of this dialect.
    pub fn bind_style(&self) -> SqlBindStyle {
        self.bind_style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(SqlBindStyle::Named.placeholder("name_0", 1), ":name_0");
        assert_eq!(SqlBindStyle::DollarNumeric.placeholder("name_0", 3), "$3");
        assert_eq!(SqlBindStyle::QMark.placeholder("name_0", 3), "?");
    }

    #[test]
    fn test_bind_style_parses_its_display() {
        for style in [
            SqlBindStyle::Named,
            SqlBindStyle::DollarNumeric,
            SqlBindStyle::QMark,
        ] {
            assert_eq!(style.to_string().parse::<SqlBindStyle>().unwrap(), style);
        }
    }

    #[test]
    fn test_from_props() {
        let dialect = SqlDialect::from_props(&HashMap::from([(
            SQL_DIALECT_PROP_BIND_STYLE.to_string(),
            "QMark".to_string(),
        )]))
        .unwrap();
        assert_eq!(dialect.bind_style(), SqlBindStyle::QMark);

        let dialect = SqlDialect::from_props(&HashMap::new()).unwrap();
        assert_eq!(dialect.bind_style(), SqlBindStyle::Named);
    }

    #[test]
    fn test_from_props_rejects_unknown_style() {
        let err = SqlDialect::from_props(&HashMap::from([(
            SQL_DIALECT_PROP_BIND_STYLE.to_string(),
            "percent".to_string(),
        )]))
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DataInvalid);
        assert_eq!(err.context_value("property"), Some(SQL_DIALECT_PROP_BIND_STYLE));
        assert_eq!(err.message(), "Unknown sql bind style: percent");
    }
}
