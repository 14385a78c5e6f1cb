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

use serde_derive::{Deserialize, Serialize};

use crate::Datum;

/// Type hint forwarded to the driver together with a bound value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParameterType {
    /// Let the driver infer the type from the value.
    #[default]
    Untyped,
    /// Boolean column.
    Boolean,
    /// Integer column.
    Integer,
    /// Text column.
    String,
    /// List of integers, bound as one array parameter.
    IntegerList,
    /// List of strings, bound as one array parameter.
    StringList,
}

impl ParameterType {
    /// Stable numeric code of this hint. `Untyped` is `0`.
    pub fn code(self) -> i32 {
        match self {
            ParameterType::Untyped => 0,
            ParameterType::Boolean => 1,
            ParameterType::Integer => 2,
            ParameterType::String => 3,
            ParameterType::IntegerList => 4,
            ParameterType::StringList => 5,
        }
    }
}

/// A value bound to a named placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    value: Datum,
    type_hint: ParameterType,
}

impl Parameter {
    /// Creates a parameter.
    pub fn new(name: impl Into<String>, value: Datum, type_hint: ParameterType) -> Self {
        Self {
            name: name.into(),
            value,
            type_hint,
        }
    }

    /// Placeholder name, without the bind-style prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound value.
    pub fn value(&self) -> &Datum {
        &self.value
    }

    /// Type hint.
    pub fn type_hint(&self) -> ParameterType {
        self.type_hint
    }
}

/// Rewrites `name` so it can be used in a named placeholder.
///
/// Anything outside `[A-Za-z0-9_]` becomes `_`; an empty name becomes `param`.
pub fn placeholder_safe_name(name: &str) -> String {
    if name.is_empty() {
        return "param".to_string();
    }

    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
