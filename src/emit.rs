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

use crate::ast::{AsmFile, DataValue, Function, InsnId, Instruction, Register, signed_hex};

/// Serialise the whole file back to assembly text. Labels are emitted bare,
/// everything else tab-indented; each function opens with the thumb
/// prologue. Output depends only on the IR, so it is deterministic.
pub fn dump(asmfile: &AsmFile) -> String {
    let mut out = String::new();
    for function in &asmfile.functions {
        out.push_str(&format!(
            "\n\tthumb_func_start {}\n{}:\n",
            function.name, function.name
        ));
        for insn in &function.instructions {
            match insn {
                Instruction::Label(label) => {
                    out.push_str(&label.name);
                    out.push_str(":\n");
                }
                _ => {
                    out.push('\t');
                    out.push_str(&instruction_text(function, insn));
                    out.push('\n');
                }
            }
        }
    }
    out
}

fn size_suffix(size: u8) -> &'static str {
    match size {
        1 => "b",
        2 => "h",
        _ => "",
    }
}

fn register_list(registers: &[Register]) -> String {
    registers
        .iter()
        .map(|reg| reg.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// A reference prints its resolved label's current name; the original symbol
// text is kept only for unresolved externals.
fn reference_name<'a>(function: &'a Function, target: Option<InsnId>, symbol: &'a str) -> &'a str {
    match target {
        Some(id) => function.label(id).name.as_str(),
        None => symbol,
    }
}

/// Canonical text of one instruction, without indentation or newline.
pub fn instruction_text(function: &Function, insn: &Instruction) -> String {
    match insn {
        Instruction::Label(label) => format!("{}:", label.name),
        Instruction::Data(data) => {
            let payload = match (&data.target, &data.value) {
                (Some(id), _) => function.label(*id).name.clone(),
                (None, DataValue::Int(value)) => signed_hex(*value),
                (None, DataValue::Symbol(symbol)) => symbol.clone(),
            };
            format!(".{}byte {}", data.size, payload)
        }
        Instruction::Push { registers } => format!("push {{{}}}", register_list(registers)),
        Instruction::Pop { registers } => format!("pop {{{}}}", register_list(registers)),
        Instruction::Stm { rn, registers } => {
            format!("stmia {}!, {{{}}}", rn, register_list(registers))
        }
        Instruction::Op { kind, rd, rn, rm } => {
            if rd == rn {
                format!("{} {}, {}", kind.mnemonic(), rd, rm)
            } else {
                format!("{} {}, {}, {}", kind.mnemonic(), rd, rn, rm)
            }
        }
        Instruction::Mul { rd, rn, rm } => {
            if rd == rn {
                format!("mul {}, {}", rd, rm)
            } else if rd == rm {
                format!("mul {}, {}", rd, rn)
            } else {
                format!("mul {}, {}, {}", rd, rn, rm)
            }
        }
        Instruction::Neg { rd, rm } => format!("neg {}, {}", rd, rm),
        Instruction::Mov { rd, rm } => format!("mov {}, {}", rd, rm),
        Instruction::Cmp { rn, rm } => format!("cmp {}, {}", rn, rm),
        Instruction::Cmn { rn, rm } => format!("cmn {}, {}", rn, rm),
        Instruction::Ldr {
            rt,
            rn,
            rm,
            size,
            signed,
        } => {
            let mnemonic = format!(
                "ldr{}{}",
                if *signed { "s" } else { "" },
                size_suffix(*size)
            );
            match rm {
                Some(rm) if rm.is_truthy() => format!("{} {}, [{}, {}]", mnemonic, rt, rn, rm),
                _ => format!("{} {}, [{}]", mnemonic, rt, rn),
            }
        }
        Instruction::Str { rt, rn, rm, size } => {
            let mnemonic = format!("str{}", size_suffix(*size));
            match rm {
                Some(rm) if rm.is_truthy() => format!("{} {}, [{}, {}]", mnemonic, rt, rn, rm),
                _ => format!("{} {}, [{}]", mnemonic, rt, rn),
            }
        }
        Instruction::LdrPc {
            rt,
            label,
            offset,
            size,
            signed,
            target,
        } => {
            let mnemonic = format!(
                "ldr{}{}",
                if *signed { "s" } else { "" },
                size_suffix(*size)
            );
            let name = reference_name(function, *target, label);
            if *offset != 0 {
                format!("{} {}, {}+{:#x}", mnemonic, rt, name, offset)
            } else {
                format!("{} {}, {}", mnemonic, rt, name)
            }
        }
        Instruction::Bl { callee } => format!("bl {}", callee),
        Instruction::Bx { rm } => format!("bx {}", rm),
        Instruction::Branch {
            condition,
            label,
            target,
        } => {
            format!(
                "b{} {}",
                condition.suffix(),
                reference_name(function, *target, label)
            )
        }
        Instruction::Directive { text } => text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    fn empty_function() -> Function {
        Function::new("foo".to_string(), Vec::new())
    }

    fn text(insn: Instruction) -> String {
        instruction_text(&empty_function(), &insn)
    }

    #[test]
    fn test_emit_operation_collapses_matching_destination() {
        assert_eq!(
            text(Instruction::Op {
                kind: OpKind::Add,
                rd: Register(0),
                rn: Register(0),
                rm: Operand::Constant(4),
            }),
            "add r0, #0x4"
        );
        assert_eq!(
            text(Instruction::Op {
                kind: OpKind::Lsl,
                rd: Register(0),
                rn: Register(1),
                rm: Operand::Constant(2),
            }),
            "lsl r0, r1, #0x2"
        );
    }

    #[test]
    fn test_emit_mul_collapses() {
        assert_eq!(
            text(Instruction::Mul {
                rd: Register(0),
                rn: Register(0),
                rm: Register(1),
            }),
            "mul r0, r1"
        );
        assert_eq!(
            text(Instruction::Mul {
                rd: Register(0),
                rn: Register(1),
                rm: Register(0),
            }),
            "mul r0, r1"
        );
    }

    #[test]
    fn test_emit_load_drops_zero_index() {
        assert_eq!(
            text(Instruction::Ldr {
                rt: Register(0),
                rn: Register(1),
                rm: Some(Operand::Constant(0)),
                size: 4,
                signed: false,
            }),
            "ldr r0, [r1]"
        );
        assert_eq!(
            text(Instruction::Ldr {
                rt: Register(0),
                rn: Register(1),
                rm: Some(Operand::Constant(8)),
                size: 4,
                signed: false,
            }),
            "ldr r0, [r1, #0x8]"
        );
        assert_eq!(
            text(Instruction::Ldr {
                rt: Register(0),
                rn: Register(1),
                rm: None,
                size: 4,
                signed: false,
            }),
            "ldr r0, [r1]"
        );
    }

    #[test]
    fn test_emit_narrow_load_mnemonics() {
        assert_eq!(
            text(Instruction::Ldr {
                rt: Register(0),
                rn: Register(1),
                rm: None,
                size: 1,
                signed: true,
            }),
            "ldrsb r0, [r1]"
        );
        assert_eq!(
            text(Instruction::Str {
                rt: Register(0),
                rn: Register(1),
                rm: Some(Operand::Register(Register(2))),
                size: 2,
            }),
            "strh r0, [r1, r2]"
        );
    }

    #[test]
    fn test_emit_pc_relative_load_offset_suffix() {
        assert_eq!(
            text(Instruction::LdrPc {
                rt: Register(0),
                label: ".L1".to_string(),
                offset: 0,
                size: 4,
                signed: false,
                target: None,
            }),
            "ldr r0, .L1"
        );
        assert_eq!(
            text(Instruction::LdrPc {
                rt: Register(0),
                label: ".L1".to_string(),
                offset: 4,
                size: 4,
                signed: false,
                target: None,
            }),
            "ldr r0, .L1+0x4"
        );
    }

    #[test]
    fn test_emit_references_resolve_through_targets() {
        let mut function = empty_function();
        function.instructions.push(Instruction::Label(Label {
            name: "_code0_0".to_string(),
            kind: LabelType::Code,
            loads: Vec::new(),
        }));

        let branch = Instruction::Branch {
            condition: Condition::Ne,
            label: ".Lold".to_string(),
            target: Some(0),
        };
        assert_eq!(instruction_text(&function, &branch), "bne _code0_0");

        let data = Instruction::Data(Data {
            size: 4,
            value: DataValue::Symbol(".Lold".to_string()),
            target: Some(0),
        });
        assert_eq!(instruction_text(&function, &data), ".4byte _code0_0");
    }

    #[test]
    fn test_emit_data_payloads() {
        assert_eq!(
            text(Instruction::Data(Data {
                size: 4,
                value: DataValue::Int(0x1234),
                target: None,
            })),
            ".4byte 0x1234"
        );
        assert_eq!(
            text(Instruction::Data(Data {
                size: 2,
                value: DataValue::Int(-4),
                target: None,
            })),
            ".2byte -0x4"
        );
        assert_eq!(
            text(Instruction::Data(Data {
                size: 1,
                value: DataValue::Symbol("extern_table".to_string()),
                target: None,
            })),
            ".1byte extern_table"
        );
    }

    #[test]
    fn test_emit_stack_and_calls() {
        assert_eq!(
            text(Instruction::Push {
                registers: vec![Register(4), Register(14)],
            }),
            "push {r4, lr}"
        );
        assert_eq!(
            text(Instruction::Stm {
                rn: Register(1),
                registers: vec![Register(0)],
            }),
            "stmia r1!, {r0}"
        );
        assert_eq!(
            text(Instruction::Bl {
                callee: "memcpy".to_string(),
            }),
            "bl memcpy"
        );
        assert_eq!(text(Instruction::Bx { rm: Register(14) }), "bx lr");
    }

    #[test]
    fn test_emit_function_prologue() {
        let asmfile = AsmFile::new(vec![empty_function()]);
        assert_eq!(dump(&asmfile), "\n\tthumb_func_start foo\nfoo:\n");
    }
}
