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

mod constants;
mod control_flow;
mod directive;
mod load_store;
mod operation;
mod stack;
mod utility_functions;

use crate::ast::{Condition, Instruction, OpKind};
use crate::parser::Rule;
use anyhow::Result;
use pest::iterators::{Pair, Pairs};

pub struct AstBuilder<'a> {
    line_number: usize,
    rule: Rule,
    pairs: Pairs<'a, Rule>,
}

impl<'a> AstBuilder<'a> {
    pub fn new(pair: Pair<'a, Rule>) -> Self {
        Self {
            line_number: pair.as_span().start_pos().line_col().0,
            rule: pair.as_rule(),
            pairs: pair.into_inner(),
        }
    }

    // Build one Instruction from the statement pair matched by the grammar.
    pub fn build_instruction(self) -> Result<Instruction> {
        match self.rule {
            Rule::label => self.build_label(),
            Rule::data1 => self.build_data(1),
            Rule::data2 => self.build_data(2),
            Rule::data4 => self.build_data(4),
            Rule::align_directive => Ok(Instruction::Directive {
                text: ".align 2, 0".to_string(),
            }),
            Rule::code_directive | Rule::size_directive => Ok(Instruction::Directive {
                text: String::new(),
            }),
            Rule::push_multiple => self.build_push(),
            Rule::pop_multiple => self.build_pop(),
            Rule::stm_writeback => self.build_stm(),
            Rule::add_op => self.build_operation(OpKind::Add),
            Rule::sub_op => self.build_operation(OpKind::Sub),
            Rule::and_op => self.build_operation(OpKind::And),
            Rule::orr_op => self.build_operation(OpKind::Orr),
            Rule::eor_op => self.build_operation(OpKind::Eor),
            Rule::lsl_op => self.build_operation(OpKind::Lsl),
            Rule::lsr_op => self.build_operation(OpKind::Lsr),
            Rule::asl_op => self.build_operation(OpKind::Asl),
            Rule::asr_op => self.build_operation(OpKind::Asr),
            Rule::bic_op => self.build_operation(OpKind::Bic),
            Rule::rsb_op => self.build_rsb(),
            Rule::mul_op => self.build_mul(),
            Rule::neg_op => self.build_neg(),
            Rule::mov_op => self.build_mov(),
            Rule::cmp_op => self.build_cmp(),
            Rule::cmn_op => self.build_cmn(),
            Rule::ldr_offset => self.build_ldr(4, false),
            Rule::ldrb_offset => self.build_ldr(1, false),
            Rule::ldrh_offset => self.build_ldr(2, false),
            Rule::ldrsb_offset => self.build_ldr(1, true),
            Rule::ldrsh_offset => self.build_ldr(2, true),
            Rule::ldr_pc_load => self.build_ldr_pc(),
            Rule::str_offset => self.build_str(4),
            Rule::strb_offset => self.build_str(1),
            Rule::strh_offset => self.build_str(2),
            Rule::bl_call => self.build_bl(),
            Rule::bx_exchange => self.build_bx(),
            Rule::b_always => self.build_branch(Condition::Always),
            Rule::b_eq => self.build_branch(Condition::Eq),
            Rule::b_ne => self.build_branch(Condition::Ne),
            Rule::b_hs => self.build_branch(Condition::Hs),
            Rule::b_lo => self.build_branch(Condition::Lo),
            Rule::b_mi => self.build_branch(Condition::Mi),
            Rule::b_pl => self.build_branch(Condition::Pl),
            Rule::b_vs => self.build_branch(Condition::Vs),
            Rule::b_vc => self.build_branch(Condition::Vc),
            Rule::b_hi => self.build_branch(Condition::Hi),
            Rule::b_ls => self.build_branch(Condition::Ls),
            Rule::b_ge => self.build_branch(Condition::Ge),
            Rule::b_lt => self.build_branch(Condition::Lt),
            Rule::b_gt => self.build_branch(Condition::Gt),
            Rule::b_le => self.build_branch(Condition::Le),
            _ => unreachable!("unknown statement rule: {:?}", self.rule),
        }
    }
}
