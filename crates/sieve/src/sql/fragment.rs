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

//! Constructors for SQL boolean fragments. These only concatenate; callers
//! are responsible for passing resolved identifiers and placeholders.

use crate::expr::{LogicalOperator, PredicateOperator};

/// `<qualifier>.<column>`
pub fn column(qualifier: &str, column: &str) -> String {
    format!("{qualifier}.{column}")
}

/// `<column> <op> <placeholder>`, or `<column> <op> (<placeholder>)` for set operators.
pub fn comparison(column: &str, op: PredicateOperator, placeholder: &str) -> String {
    if op.is_set() {
        format!("{column} {op} ({placeholder})")
    } else {
        format!("{column} {op} {placeholder}")
    }
}

/// Wrap every part in parentheses and join them with `AND` / `OR`.
///
/// `NOT` is unary and goes through [`not`].
pub fn junction(op: LogicalOperator, parts: &[String]) -> String {
    debug_assert!(op != LogicalOperator::Not, "NOT is not a junction");

    parts
        .iter()
        .map(|part| format!("({part})"))
        .collect::<Vec<_>>()
        .join(&format!(" {op} "))
}

/// `NOT(<part>)`
pub fn not(part: &str) -> String {
    format!("NOT({part})")
}

/// `SELECT <select> FROM <table> WHERE <condition>`
pub fn sub_select(select: &str, table: &str, condition: &str) -> String {
    format!("SELECT {select} FROM {table} WHERE {condition}")
}

/// `<column> IN (<sub_select>)`
pub fn in_sub_select(column: &str, sub_select: &str) -> String {
    format!("{column} IN ({sub_select})")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_comparison() {
        assert_eq!(comparison("t.name", PredicateOperator::Eq, ":name_0"), "t.name = :name_0");
        assert_eq!(comparison("t.id", PredicateOperator::NotIn, ":id_1"), "t.id NOT IN (:id_1)");
    }

    #[test]
    fn test_junction() {
        let parts = vec!["a = 1".to_string(), "b = 2".to_string()];
        assert_eq!(junction(LogicalOperator::Or, &parts), "(a = 1) OR (b = 2)");
        assert_eq!(junction(LogicalOperator::And, &parts[..1]), "(a = 1)");
    }

    #[test]
    fn test_sub_select() {
        let select = sub_select("u.id", "u", "u.name = ?");
        assert_eq!(
            in_sub_select("p.user_id", &select),
            "p.user_id IN (SELECT u.id FROM u WHERE u.name = ?)"
        );
        assert_eq!(not("a = 1"), "NOT(a = 1)");
    }
}
