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

use std::collections::HashSet;

use crate::expr::Comparison;
use crate::expr::visitors::ExpressionVisitor;
use crate::{Datum, Result};

/// Collects the distinct field paths of an expression in visitation order.
#[derive(Debug, Default)]
pub(crate) struct FieldPathCollector {
    seen: HashSet<String>,
    paths: Vec<String>,
}

impl FieldPathCollector {
    pub(crate) fn into_paths(self) -> Vec<String> {
        self.paths
    }
}

impl ExpressionVisitor for FieldPathCollector {
    type T = ();

    fn and(&mut self, _children: Vec<()>) -> Result<()> {
        Ok(())
    }

    fn or(&mut self, _children: Vec<()>) -> Result<()> {
        Ok(())
    }

    fn not(&mut self, _inner: ()) -> Result<()> {
        Ok(())
    }

    fn comparison(&mut self, comparison: &Comparison) -> Result<()> {
        let path = comparison.reference().name();
        if self.seen.insert(path.to_string()) {
            self.paths.push(path.to_string());
        }
        Ok(())
    }

    fn value(&mut self, _value: &Datum) -> Result<()> {
        Ok(())
    }
}
