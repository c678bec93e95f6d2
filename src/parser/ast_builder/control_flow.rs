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

use crate::ast::{Condition, Instruction};
use crate::parser::AstBuilder;
use crate::parser::ast_builder::constants::*;
use anyhow::{Context, Result};

impl<'a> AstBuilder<'a> {
    pub(super) fn build_branch(mut self, condition: Condition) -> Result<Instruction> {
        let label = self.expect_symbol().context(INVALID_TARGET_OP_MSG)?;

        Ok(Instruction::Branch {
            condition,
            label,
            target: None,
        })
    }

    pub(super) fn build_bl(mut self) -> Result<Instruction> {
        let callee = self.expect_symbol().context(INVALID_TARGET_OP_MSG)?;

        Ok(Instruction::Bl { callee })
    }

    pub(super) fn build_bx(mut self) -> Result<Instruction> {
        let rm = self.expect_register().context(INVALID_OP_MSG)?;

        Ok(Instruction::Bx { rm })
    }
}
