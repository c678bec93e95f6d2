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

use crate::ast::Instruction;
use crate::parser::AstBuilder;
use crate::parser::ast_builder::constants::*;
use anyhow::{Context, Result};

impl<'a> AstBuilder<'a> {
    pub(super) fn build_ldr(mut self, size: u8, signed: bool) -> Result<Instruction> {
        let rt = self.expect_register().context(INVALID_DEST_OP_MSG)?;
        let rn = self.expect_register().context(INVALID_BASE_OP_MSG)?;
        let rm = self.maybe_operand().context(INVALID_OP_MSG)?;

        Ok(Instruction::Ldr {
            rt,
            rn,
            rm,
            size,
            signed,
        })
    }

    pub(super) fn build_str(mut self, size: u8) -> Result<Instruction> {
        let rt = self.expect_register().context(INVALID_SRC_OP_MSG)?;
        let rn = self.expect_register().context(INVALID_BASE_OP_MSG)?;
        let rm = self.maybe_operand().context(INVALID_OP_MSG)?;

        Ok(Instruction::Str { rt, rn, rm, size })
    }

    // "ldr rt, <symbol>" loads a word from a nearby literal pool.
    pub(super) fn build_ldr_pc(mut self) -> Result<Instruction> {
        let rt = self.expect_register().context(INVALID_DEST_OP_MSG)?;
        let label = self.expect_symbol().context(INVALID_OP_MSG)?;

        Ok(Instruction::LdrPc {
            rt,
            label,
            offset: 0,
            size: 4,
            signed: false,
            target: None,
        })
    }
}
