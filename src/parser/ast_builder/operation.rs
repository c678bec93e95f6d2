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

use crate::ast::{Instruction, OpKind, Operand};
use crate::errors::AssemblyError;
use crate::parser::AstBuilder;
use crate::parser::ast_builder::constants::*;
use anyhow::{Context, Result, bail};

impl<'a> AstBuilder<'a> {
    // Shared builder for the three-operand arithmetic/logic forms. The
    // two-operand shorthand "op rd, rm" expands to "op rd, rd, rm".
    pub(super) fn build_operation(mut self, kind: OpKind) -> Result<Instruction> {
        let rd = self.expect_register().context(INVALID_DEST_OP_MSG)?;
        let first = self.expect_operand().context(INVALID_SRC_OP_MSG)?;

        match self.maybe_operand().context(INVALID_SRC_OP_MSG)? {
            Some(rm) => {
                let rn = match first {
                    Operand::Register(reg) => reg,
                    Operand::Constant(_) => {
                        bail!("an immediate is not allowed as the first source operand")
                    }
                };
                Ok(Instruction::Op { kind, rd, rn, rm })
            }
            None => Ok(Instruction::Op {
                kind,
                rd,
                rn: rd,
                rm: first,
            }),
        }
    }

    // rsb against zero is the compiler's spelling of negation.
    pub(super) fn build_rsb(mut self) -> Result<Instruction> {
        let rd = self.expect_register().context(INVALID_DEST_OP_MSG)?;
        let rn = self.expect_register().context(INVALID_SRC_OP_MSG)?;
        let imm = self.expect_constant().context(INVALID_SRC_OP_MSG)?;

        if imm != 0 {
            return Err(AssemblyError::SemanticError {
                line: self.line_number,
                reason: "rsb only allowed with 0 immediate".to_string(),
            }
            .into());
        }

        Ok(Instruction::Neg { rd, rm: rn })
    }

    pub(super) fn build_mul(mut self) -> Result<Instruction> {
        let rd = self.expect_register().context(INVALID_DEST_OP_MSG)?;
        let rn = self.expect_register().context(INVALID_SRC_OP_MSG)?;
        let rm = match self.maybe_register().context(INVALID_SRC_OP_MSG)? {
            Some(rm) => rm,
            None => rd,
        };

        if rd != rn && rd != rm {
            return Err(AssemblyError::SemanticError {
                line: self.line_number,
                reason: "mul destination must be equal to one of the factors".to_string(),
            }
            .into());
        }

        Ok(Instruction::Mul { rd, rn, rm })
    }

    pub(super) fn build_neg(mut self) -> Result<Instruction> {
        let rd = self.expect_register().context(INVALID_DEST_OP_MSG)?;
        let rm = self.expect_register().context(INVALID_SRC_OP_MSG)?;

        Ok(Instruction::Neg { rd, rm })
    }

    pub(super) fn build_mov(mut self) -> Result<Instruction> {
        let rd = self.expect_register().context(INVALID_DEST_OP_MSG)?;
        let rm = self.expect_operand().context(INVALID_SRC_OP_MSG)?;

        Ok(Instruction::Mov { rd, rm })
    }

    pub(super) fn build_cmp(mut self) -> Result<Instruction> {
        let rn = self.expect_register().context(INVALID_OP_MSG)?;
        let rm = self.expect_operand().context(INVALID_OP_MSG)?;

        Ok(Instruction::Cmp { rn, rm })
    }

    pub(super) fn build_cmn(mut self) -> Result<Instruction> {
        let rn = self.expect_register().context(INVALID_OP_MSG)?;
        let rm = self.expect_operand().context(INVALID_OP_MSG)?;

        Ok(Instruction::Cmn { rn, rm })
    }
}
