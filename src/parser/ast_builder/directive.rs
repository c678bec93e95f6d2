/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use crate::ast::{Data, DataValue, Instruction, Label};
use crate::parser::AstBuilder;
use crate::parser::Rule;
use anyhow::{Context, Result, bail};

impl<'a> AstBuilder<'a> {
    pub(super) fn build_label(mut self) -> Result<Instruction> {
        let name = self.expect_symbol().context("Invalid label name")?;

        Ok(Instruction::Label(Label::new(name)))
    }

    pub(super) fn build_data(mut self, size: u8) -> Result<Instruction> {
        let pair = self.next_value().context("expected a data value")?;
        let value = match pair.as_rule() {
            Rule::int => DataValue::Int(self.int_from(pair.as_str())?),
            Rule::symbol => DataValue::Symbol(pair.as_str().to_string()),
            rule => bail!("expected an integer or symbol, found {:?}", rule),
        };

        Ok(Instruction::Data(Data {
            size,
            value,
            target: None,
        }))
    }
}
