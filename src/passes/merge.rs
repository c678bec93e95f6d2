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

use crate::ast::{AsmFile, Function, InsnId, Instruction, LabelType};

/// Coalesce runs of data words that the compiler emitted under separate
/// labels into one pool under the first label. Loads that resolved to an
/// absorbed label are re-pointed at the pool head with a byte offset of
/// four per data word already in the pool; the absorbed label is downgraded
/// to OTHER. The head label's own loads already carry offset 0 and are not
/// rewritten.
pub fn merge_data_labels(asmfile: &mut AsmFile) {
    for function in &mut asmfile.functions {
        merge_function(function);
    }
}

fn merge_function(function: &mut Function) {
    let mut current_data: Option<InsnId> = None;
    let mut ndata: u32 = 0;

    for id in 0..function.instructions.len() {
        match &function.instructions[id] {
            Instruction::Label(label) if label.kind == LabelType::Data => {}
            Instruction::Data(_) => {
                ndata += 1;
                continue;
            }
            _ => {
                current_data = None;
                ndata = 0;
                continue;
            }
        }
        match current_data {
            None => current_data = Some(id),
            Some(head) => absorb(function, id, head, ndata),
        }
    }
}

fn absorb(function: &mut Function, id: InsnId, head: InsnId, ndata: u32) {
    let loads = std::mem::take(&mut function.label_mut(id).loads);
    for &load in &loads {
        if let Instruction::LdrPc { target, offset, .. } = &mut function.instructions[load] {
            *target = Some(head);
            *offset += ndata * 4;
        }
    }
    function.label_mut(head).loads.extend(loads);
    function.label_mut(id).kind = LabelType::Other;
}
