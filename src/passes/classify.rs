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

use crate::ast::{AsmFile, DataValue, Function, Instruction, LabelType};

/// Record every label of each function, in source order.
pub fn collect_labels(asmfile: &mut AsmFile) {
    for function in &mut asmfile.functions {
        function.labels = function
            .instructions
            .iter()
            .enumerate()
            .filter(|(_, insn)| matches!(insn, Instruction::Label(_)))
            .map(|(id, _)| id)
            .collect();
    }
}

/// Assign each label a role from how it is used. The rules run in order
/// and later rules win: a label both followed by data and branched to ends
/// up CODE; a label named by a data word ends up CASE regardless.
pub fn classify_labels(asmfile: &mut AsmFile) {
    for function in &mut asmfile.functions {
        classify_function(function);
    }
}

fn classify_function(function: &mut Function) {
    for id in function.labels.clone() {
        function.label_mut(id).kind = LabelType::Other;
    }

    // A label whose next instruction is a data word heads a literal pool.
    let data_heads: Vec<usize> = function
        .labels
        .iter()
        .copied()
        .filter(|&id| matches!(function.instructions.get(id + 1), Some(Instruction::Data(_))))
        .collect();
    for id in data_heads {
        function.label_mut(id).kind = LabelType::Data;
    }

    let branch_targets: Vec<usize> = function
        .instructions
        .iter()
        .filter_map(|insn| match insn {
            Instruction::Branch { target, .. } => *target,
            _ => None,
        })
        .collect();
    for id in branch_targets {
        function.label_mut(id).kind = LabelType::Code;
    }

    // A data word naming a local label is a jump-table case entry.
    let mut case_entries = Vec::new();
    for (id, insn) in function.instructions.iter().enumerate() {
        let Instruction::Data(data) = insn else {
            continue;
        };
        let DataValue::Symbol(symbol) = &data.value else {
            continue;
        };
        if let Some(&label_id) = function
            .labels
            .iter()
            .find(|&&label_id| function.label(label_id).name == *symbol)
        {
            case_entries.push((id, label_id));
        }
    }
    for (id, label_id) in case_entries {
        function.label_mut(label_id).kind = LabelType::Case;
        if let Instruction::Data(data) = &mut function.instructions[id] {
            data.target = Some(label_id);
        }
    }
}
