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

use crate::ast::{AsmFile, Function, Instruction, OpKind, Operand};

/// Canonicalise instructions: fold add-zero into a move, flip add/sub with a
/// negative immediate, and drop directives. The instruction vector is
/// rebuilt, so every stored index is remapped afterwards.
pub fn patch_instructions(asmfile: &mut AsmFile) {
    for function in &mut asmfile.functions {
        patch_function(function);
    }
}

fn patch_function(function: &mut Function) {
    let old = std::mem::take(&mut function.instructions);
    let mut remap: Vec<Option<usize>> = vec![None; old.len()];
    let mut instructions = Vec::with_capacity(old.len());

    for (old_id, insn) in old.into_iter().enumerate() {
        let Some(replacement) = rewrite(insn) else {
            continue;
        };
        remap[old_id] = Some(instructions.len());
        instructions.push(replacement);
    }
    function.instructions = instructions;

    for insn in &mut function.instructions {
        match insn {
            Instruction::Branch { target, .. } | Instruction::LdrPc { target, .. } => {
                *target = target.and_then(|id| remap[id]);
            }
            Instruction::Data(data) => {
                data.target = data.target.and_then(|id| remap[id]);
            }
            Instruction::Label(label) => {
                let loads = std::mem::take(&mut label.loads);
                label.loads = loads.into_iter().filter_map(|id| remap[id]).collect();
            }
            _ => {}
        }
    }
    let labels = std::mem::take(&mut function.labels);
    function.labels = labels.into_iter().filter_map(|id| remap[id]).collect();
}

fn rewrite(insn: Instruction) -> Option<Instruction> {
    match insn {
        Instruction::Directive { .. } => None,
        Instruction::Op {
            kind: OpKind::Add,
            rd,
            rn,
            rm: Operand::Constant(0),
        } => Some(Instruction::Mov {
            rd,
            rm: Operand::Register(rn),
        }),
        Instruction::Op {
            kind: OpKind::Add,
            rd,
            rn,
            rm: Operand::Constant(value),
        } if value < 0 => Some(Instruction::Op {
            kind: OpKind::Sub,
            rd,
            rn,
            rm: Operand::Constant(-value),
        }),
        Instruction::Op {
            kind: OpKind::Sub,
            rd,
            rn,
            rm: Operand::Constant(value),
        } if value < 0 => Some(Instruction::Op {
            kind: OpKind::Add,
            rd,
            rn,
            rm: Operand::Constant(-value),
        }),
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AsmFile, Register};
    use crate::parser::parse_source;
    use crate::passes::{classify_labels, collect_labels, link_instructions};

    fn prepared(source: &str) -> AsmFile {
        let mut asmfile = parse_source(source).unwrap();
        link_instructions(&mut asmfile);
        collect_labels(&mut asmfile);
        classify_labels(&mut asmfile);
        patch_instructions(&mut asmfile);
        asmfile
    }

    #[test]
    fn test_patch_add_zero_becomes_mov() {
        let asmfile = prepared("foo:\n\tadd r1, r2, #0\n\tbx lr\n");
        assert_eq!(
            asmfile.functions[0].instructions[0],
            Instruction::Mov {
                rd: Register(1),
                rm: Operand::Register(Register(2)),
            }
        );
    }

    #[test]
    fn test_patch_negative_add_becomes_sub() {
        let asmfile = prepared("foo:\n\tadd r0, r0, #-4\n\tbx lr\n");
        assert_eq!(
            asmfile.functions[0].instructions[0],
            Instruction::Op {
                kind: OpKind::Sub,
                rd: Register(0),
                rn: Register(0),
                rm: Operand::Constant(4),
            }
        );
    }

    #[test]
    fn test_patch_negative_sub_becomes_add() {
        let asmfile = prepared("foo:\n\tsub r0, r1, #-8\n\tbx lr\n");
        assert_eq!(
            asmfile.functions[0].instructions[0],
            Instruction::Op {
                kind: OpKind::Add,
                rd: Register(0),
                rn: Register(1),
                rm: Operand::Constant(8),
            }
        );
    }

    #[test]
    fn test_patch_sub_zero_is_left_alone() {
        let asmfile = prepared("foo:\n\tsub r0, r1, #0\n\tbx lr\n");
        assert_eq!(
            asmfile.functions[0].instructions[0],
            Instruction::Op {
                kind: OpKind::Sub,
                rd: Register(0),
                rn: Register(1),
                rm: Operand::Constant(0),
            }
        );
    }

    #[test]
    fn test_patch_drops_directives_and_remaps_references() {
        let source = "foo:\n\tldr r0, .L1\n\t.align 2, 0\n.L1:\n\t.4byte 0x1\n";
        let asmfile = prepared(source);
        let function = &asmfile.functions[0];

        assert!(
            !function
                .instructions
                .iter()
                .any(|insn| matches!(insn, Instruction::Directive { .. }))
        );
        // The label moved up one slot; the load and its back-reference follow.
        match &function.instructions[0] {
            Instruction::LdrPc { target, .. } => assert_eq!(*target, Some(1)),
            other => panic!("expected a pc-relative load, got {:?}", other),
        }
        assert_eq!(function.label(1).loads, vec![0]);
        assert_eq!(function.labels, vec![1]);
    }

    #[test]
    fn test_patch_is_idempotent() {
        let source = "foo:\n\tadd r0, r0, #-4\n\tadd r1, r2, #0\n\t.align 2, 0\n\tbx lr\n";
        let mut asmfile = prepared(source);
        let once = asmfile.clone();
        patch_instructions(&mut asmfile);
        assert_eq!(asmfile, once);
    }
}
