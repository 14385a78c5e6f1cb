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

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

/// Result that is a wrapper of `Result<T, sieve::Error>`
pub type Result<T> = std::result::Result<T, Error>;

/// ErrorKind is all kinds of Error of sieve.
///
/// None of these kinds are retryable: translating the same expression against
/// the same mappings fails the same way every time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Sieve don't know what happened here, and no actions other than
    /// just returning it back.
    Unexpected,

    /// Input data is invalid, for example a malformed configuration value.
    DataInvalid,

    /// A field path could not be resolved to a column of the mapped table.
    FieldNotFound,

    /// A mapping has no relationship for the requested foreign property.
    ///
    /// Mapping providers return this kind; the translator hands the error back
    /// to the caller exactly as the provider built it.
    RelationshipNotFound,

    /// A relationship descriptor is of a kind the translator cannot lower to SQL.
    UnhandledRelationshipMetadata,

    /// The expression tree contains a node that is not a valid filter.
    UnrecognizedExpression,

    /// No mapping is registered for a table name or relationship key.
    TableNotFound,
}

impl ErrorKind {
    /// Convert self into static str.
    pub fn into_static(self) -> &'static str {
        self.into()
    }
}

impl From<ErrorKind> for &'static str {
    fn from(v: ErrorKind) -> &'static str {
        match v {
            ErrorKind::Unexpected => "Unexpected",
            ErrorKind::DataInvalid => "DataInvalid",
            ErrorKind::FieldNotFound => "FieldNotFound",
            ErrorKind::RelationshipNotFound => "RelationshipNotFound",
            ErrorKind::UnhandledRelationshipMetadata => "UnhandledRelationshipMetadata",
            ErrorKind::UnrecognizedExpression => "UnrecognizedExpression",
            ErrorKind::TableNotFound => "TableNotFound",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_static())
    }
}

/// Error is the error struct returned by all sieve functions.
///
/// ## Display
///
/// - Via `Display`, the error is printed in a single line:
///
/// ```shell
/// FieldNotFound, context: { table: users, field: nickname } => Field not found, source: lookup failed
/// ```
///
/// - Via `Debug`, the error is printed in multiple lines, with the backtrace
///   when one was captured:
///
/// ```shell
/// FieldNotFound => Field not found
///
/// Context:
///    table: users
///    field: nickname
///
/// Source: lookup failed
/// ```
pub struct Error {
    kind: ErrorKind,
    message: String,

    context: Vec<(&'static str, String)>,

    source: Option<anyhow::Error>,
    backtrace: Backtrace,

    retryable: bool,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if !self.context.is_empty() {
            let context = self
                .context
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, ", context: {{ {context} }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        if let Some(source) = &self.source {
            write!(f, ", source: {source}")?;
        }

        Ok(())
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return f
                .debug_struct("Error")
                .field("kind", &self.kind)
                .field("message", &self.message)
                .field("context", &self.context)
                .field("source", &self.source)
                .field("backtrace", &self.backtrace)
                .finish();
        }

        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }
        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "Source: {source:#}")?;
        }

        if self.backtrace.status() == BacktraceStatus::Captured {
            writeln!(f)?;
            writeln!(f, "Backtrace:")?;
            writeln!(f, "{}", self.backtrace)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|v| v.as_ref())
    }
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: Vec::default(),

            source: None,
            // Zero cost unless RUST_BACKTRACE / RUST_LIB_BACKTRACE enables capturing.
            backtrace: Backtrace::capture(),

            retryable: false,
        }
    }

    /// Add more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set source for error.
    ///
    /// # Notes
    ///
    /// If the source has been set, we will raise a panic here.
    pub fn with_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        debug_assert!(self.source.is_none(), "the source error has been set");

        self.source = Some(src.into());
        self
    }

    #[cfg(test)]
    fn with_backtrace(mut self, backtrace: Backtrace) -> Self {
        self.backtrace = backtrace;
        self
    }

    /// Return error's backtrace.
    ///
    /// Print the error with `Debug` (`format!("{err:?}")`) to see it rendered.
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Return error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return error's retryable status
    pub fn retryable(&self) -> bool {
        self.retryable
    }

    /// Return error's message.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Return the value recorded for a context key, if any.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use pretty_assertions::assert_eq;

    use super::*;

    fn generate_error(backtrace: Backtrace) -> Error {
        Error::new(ErrorKind::FieldNotFound, "Field not found")
            .with_context("table", "users")
            .with_context("field", "nickname")
            .with_source(anyhow!("lookup failed"))
            .with_backtrace(backtrace)
    }

    #[test]
    fn test_error_display_without_backtrace() {
        let s = format!("{}", generate_error(Backtrace::disabled()));
        assert_eq!(
            s,
            r#"FieldNotFound, context: { table: users, field: nickname } => Field not found, source: lookup failed"#
        )
    }

    #[test]
    fn test_error_display_ignores_backtrace() {
        let s = format!("{}", generate_error(Backtrace::force_capture()));
        assert_eq!(
            s,
            r#"FieldNotFound, context: { table: users, field: nickname } => Field not found, source: lookup failed"#
        )
    }

    #[test]
    fn test_error_debug_without_backtrace() {
        let s = format!("{:?}", generate_error(Backtrace::disabled()));
        assert_eq!(
            s,
            r#"FieldNotFound => Field not found

Context:
   table: users
   field: nickname

Source: lookup failed
"#
        )
    }

    #[test]
    fn test_error_debug_with_backtrace() {
        let s = format!("{:?}", generate_error(Backtrace::force_capture()));

        let expected = r#"FieldNotFound => Field not found

Context:
   table: users
   field: nickname

Source: lookup failed

Backtrace:
"#;
        assert_eq!(&s[..expected.len()], expected);
    }

    #[test]
    fn test_context_value() {
        let err = generate_error(Backtrace::disabled());
        assert_eq!(err.context_value("field"), Some("nickname"));
        assert_eq!(err.context_value("alias"), None);
        assert!(!err.retryable());
    }
}
