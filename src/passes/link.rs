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

use crate::ast::{AsmFile, Function, InsnId, Instruction};

/// Resolve every branch and PC-relative load to the label it names, within
/// the same function. Symbols with no matching local label are left
/// unresolved; downstream passes treat them as external references.
/// Re-running the pass is harmless: the load back-references are rebuilt
/// from scratch.
pub fn link_instructions(asmfile: &mut AsmFile) {
    for function in &mut asmfile.functions {
        link_function(function);
    }
}

fn link_function(function: &mut Function) {
    let label_ids: Vec<InsnId> = function
        .instructions
        .iter()
        .enumerate()
        .filter(|(_, insn)| matches!(insn, Instruction::Label(_)))
        .map(|(id, _)| id)
        .collect();

    for &id in &label_ids {
        function.label_mut(id).loads.clear();
    }

    let mut branch_patches = Vec::new();
    let mut load_patches = Vec::new();
    for (id, insn) in function.instructions.iter().enumerate() {
        let (symbol, is_load) = match insn {
            Instruction::Branch { label, .. } => (label, false),
            Instruction::LdrPc { label, .. } => (label, true),
            _ => continue,
        };
        let Some(&label_id) = label_ids
            .iter()
            .find(|&&label_id| function.label(label_id).name == *symbol)
        else {
            continue;
        };
        if is_load {
            load_patches.push((id, label_id));
        } else {
            branch_patches.push((id, label_id));
        }
    }

    for (id, label_id) in branch_patches {
        if let Instruction::Branch { target, .. } = &mut function.instructions[id] {
            *target = Some(label_id);
        }
    }
    for (id, label_id) in load_patches {
        if let Instruction::LdrPc { target, .. } = &mut function.instructions[id] {
            *target = Some(label_id);
        }
        function.label_mut(label_id).loads.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::LabelType;
    use crate::parser::parse_source;

    #[test]
    fn test_link_branch_to_label() {
        let mut asmfile = parse_source("foo:\n.Ltgt:\n\tb .Ltgt\n").unwrap();
        link_instructions(&mut asmfile);

        let function = &asmfile.functions[0];
        match &function.instructions[1] {
            Instruction::Branch { target, .. } => assert_eq!(*target, Some(0)),
            other => panic!("expected a branch, got {:?}", other),
        }
        assert_eq!(function.label(0).kind, LabelType::Other);
    }

    #[test]
    fn test_link_load_back_references() {
        let source = "foo:\n\tldr r0, .L1\n\tldr r1, .L1\n.L1:\n\t.4byte 0x1\n";
        let mut asmfile = parse_source(source).unwrap();
        link_instructions(&mut asmfile);

        let function = &asmfile.functions[0];
        assert_eq!(function.label(2).loads, vec![0, 1]);
        for id in [0, 1] {
            match &function.instructions[id] {
                Instruction::LdrPc { target, .. } => assert_eq!(*target, Some(2)),
                other => panic!("expected a pc-relative load, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_link_unresolved_symbol_stays_unset() {
        let mut asmfile = parse_source("foo:\n\tb elsewhere\n").unwrap();
        link_instructions(&mut asmfile);

        match &asmfile.functions[0].instructions[0] {
            Instruction::Branch { target, label, .. } => {
                assert_eq!(*target, None);
                assert_eq!(label, "elsewhere");
            }
            other => panic!("expected a branch, got {:?}", other),
        }
    }

    #[test]
    fn test_link_is_idempotent() {
        let source = "foo:\n\tldr r0, .L1\n.L1:\n\t.4byte 0x1\n";
        let mut asmfile = parse_source(source).unwrap();
        link_instructions(&mut asmfile);
        let once = asmfile.clone();
        link_instructions(&mut asmfile);
        assert_eq!(asmfile, once);
    }
}
