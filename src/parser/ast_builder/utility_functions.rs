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

use crate::ast::{Operand, Register};
use crate::errors::AssemblyError;
use crate::parser::AstBuilder;
use crate::parser::Rule;
use anyhow::{Context, Result, bail};
use pest::iterators::Pair;

impl<'a> AstBuilder<'a> {
    // Advance to the next operand-carrying pair, skipping mnemonic tokens.
    pub(super) fn next_value(&mut self) -> Option<Pair<'a, Rule>> {
        self.pairs.find(|p| {
            matches!(
                p.as_rule(),
                Rule::reg | Rule::imm | Rule::int | Rule::symbol | Rule::size_args
            )
        })
    }

    pub(super) fn expect_register(&mut self) -> Result<Register> {
        let pair = self.next_value().context("expected a register")?;
        self.register_from(pair)
    }

    pub(super) fn maybe_register(&mut self) -> Result<Option<Register>> {
        match self.next_value() {
            Some(pair) => Ok(Some(self.register_from(pair)?)),
            None => Ok(None),
        }
    }

    pub(super) fn expect_operand(&mut self) -> Result<Operand> {
        let pair = self.next_value().context("expected a register or immediate")?;
        self.operand_from(pair)
    }

    pub(super) fn maybe_operand(&mut self) -> Result<Option<Operand>> {
        match self.next_value() {
            Some(pair) => Ok(Some(self.operand_from(pair)?)),
            None => Ok(None),
        }
    }

    pub(super) fn expect_constant(&mut self) -> Result<i64> {
        let pair = self.next_value().context("expected an immediate")?;
        match pair.as_rule() {
            Rule::imm => self.int_from(pair.as_str().trim_start_matches('#')),
            rule => bail!("expected an immediate, found {:?}", rule),
        }
    }

    pub(super) fn expect_symbol(&mut self) -> Result<String> {
        let pair = self.next_value().context("expected a symbol")?;
        match pair.as_rule() {
            Rule::symbol => Ok(pair.as_str().to_string()),
            rule => bail!("expected a symbol, found {:?}", rule),
        }
    }

    // Drain the remaining operands as a register list.
    pub(super) fn register_list(&mut self) -> Result<Vec<Register>> {
        let mut registers = Vec::new();
        while let Some(pair) = self.next_value() {
            registers.push(self.register_from(pair)?);
        }
        Ok(registers)
    }

    pub(super) fn register_from(&self, pair: Pair<'a, Rule>) -> Result<Register> {
        match pair.as_rule() {
            Rule::reg => Register::from_name(pair.as_str()).ok_or_else(|| {
                AssemblyError::SemanticError {
                    line: self.line_number,
                    reason: format!("bad register {}", pair.as_str()),
                }
                .into()
            }),
            rule => bail!("expected a register, found {:?}", rule),
        }
    }

    pub(super) fn operand_from(&self, pair: Pair<'a, Rule>) -> Result<Operand> {
        match pair.as_rule() {
            Rule::reg => Ok(Operand::Register(self.register_from(pair)?)),
            Rule::imm => Ok(Operand::Constant(
                self.int_from(pair.as_str().trim_start_matches('#'))?,
            )),
            rule => bail!("expected a register or immediate, found {:?}", rule),
        }
    }

    // Integer literal with the usual base prefixes: 0x hex, 0b binary, a
    // leading 0 octal, decimal otherwise. Magnitude is capped at 32 bits.
    pub(super) fn int_from(&self, text: &str) -> Result<i64> {
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let lower = digits.to_ascii_lowercase();
        let parsed = if let Some(hex) = lower.strip_prefix("0x") {
            i64::from_str_radix(hex, 16)
        } else if let Some(bin) = lower.strip_prefix("0b") {
            i64::from_str_radix(bin, 2)
        } else if lower.len() > 1 && lower.starts_with('0') {
            i64::from_str_radix(&lower[1..], 8)
        } else {
            lower.parse()
        };
        let magnitude = parsed.ok().filter(|&v| v <= u32::MAX as i64).ok_or_else(|| {
            AssemblyError::SemanticError {
                line: self.line_number,
                reason: format!("constant {} does not fit in 32 bits", text),
            }
        })?;
        Ok(if negative { -magnitude } else { magnitude })
    }
}
