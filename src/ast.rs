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

use std::fmt;

/// Index of an instruction slot inside its owning `Function`. All
/// cross-references between instructions (branch targets, literal-pool
/// back-references) are stored as these indices; a pass that rebuilds the
/// instruction vector must remap every stored index.
pub type InsnId = usize;

/// A physical register, identified by number 0..=15. The lexical aliases
/// sb/sl/ip/sp/lr/pc are collapsed to their numbers on parse.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Register(pub u8);

impl Register {
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        let number = match name.as_str() {
            "sb" => 9,
            "sl" => 10,
            "ip" => 12,
            "sp" => 13,
            "lr" => 14,
            "pc" => 15,
            _ => name.strip_prefix('r')?.parse().ok().filter(|&n| n <= 15)?,
        };
        Some(Self(number))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            13 => write!(f, "sp"),
            14 => write!(f, "lr"),
            15 => write!(f, "pc"),
            n => write!(f, "r{}", n),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Constant(i64),
}

impl Operand {
    /// Registers always count as present; a constant counts only when
    /// non-zero. Emission uses this to drop a zero index operand.
    pub fn is_truthy(&self) -> bool {
        match self {
            Operand::Register(_) => true,
            Operand::Constant(value) => *value != 0,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(reg) => write!(f, "{}", reg),
            Operand::Constant(value) => write!(f, "#{}", signed_hex(*value)),
        }
    }
}

/// Lower-case hex with the sign ahead of the 0x prefix.
pub fn signed_hex(value: i64) -> String {
    if value < 0 {
        format!("-{:#x}", -value)
    } else {
        format!("{:#x}", value)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LabelType {
    Code,
    Data,
    Case,
    Other,
}

impl LabelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelType::Code => "code",
            LabelType::Data => "data",
            LabelType::Case => "case",
            LabelType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,
    pub kind: LabelType,
    /// PC-relative loads that resolve to this label, filled in by linking.
    pub loads: Vec<InsnId>,
}

impl Label {
    pub fn new(name: String) -> Self {
        Self {
            name,
            kind: LabelType::Other,
            loads: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Symbol(String),
    Int(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    /// Entry width in bytes: 1, 2 or 4.
    pub size: u8,
    pub value: DataValue,
    /// Set when the payload is a symbol naming a label in the same function.
    pub target: Option<InsnId>,
}

/// The three-operand arithmetic/logic forms sharing one instruction shape.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OpKind {
    Add,
    Sub,
    And,
    Orr,
    Eor,
    Lsl,
    Lsr,
    Asl,
    Asr,
    Bic,
}

impl OpKind {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Sub => "sub",
            OpKind::And => "and",
            OpKind::Orr => "orr",
            OpKind::Eor => "eor",
            OpKind::Lsl => "lsl",
            OpKind::Lsr => "lsr",
            OpKind::Asl => "asl",
            OpKind::Asr => "asr",
            OpKind::Bic => "bic",
        }
    }
}

/// Branch condition, rendered as the suffix after "b".
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Condition {
    Always,
    Eq,
    Ne,
    Hs,
    Lo,
    Mi,
    Pl,
    Vs,
    Vc,
    Hi,
    Ls,
    Ge,
    Lt,
    Gt,
    Le,
}

impl Condition {
    pub fn suffix(&self) -> &'static str {
        match self {
            Condition::Always => "",
            Condition::Eq => "eq",
            Condition::Ne => "ne",
            Condition::Hs => "hs",
            Condition::Lo => "lo",
            Condition::Mi => "mi",
            Condition::Pl => "pl",
            Condition::Vs => "vs",
            Condition::Vc => "vc",
            Condition::Hi => "hi",
            Condition::Ls => "ls",
            Condition::Ge => "ge",
            Condition::Lt => "lt",
            Condition::Gt => "gt",
            Condition::Le => "le",
        }
    }
}

// One variant per assembly line shape. Cross-references are InsnId values
// into the owning function's instruction vector.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Label(Label),
    Data(Data),
    Push {
        registers: Vec<Register>,
    },
    Pop {
        registers: Vec<Register>,
    },
    Stm {
        rn: Register,
        registers: Vec<Register>,
    },
    Op {
        kind: OpKind,
        rd: Register,
        rn: Register,
        rm: Operand,
    },
    Mul {
        rd: Register,
        rn: Register,
        rm: Register,
    },
    Neg {
        rd: Register,
        rm: Register,
    },
    Mov {
        rd: Register,
        rm: Operand,
    },
    Cmp {
        rn: Register,
        rm: Operand,
    },
    Cmn {
        rn: Register,
        rm: Operand,
    },
    Ldr {
        rt: Register,
        rn: Register,
        rm: Option<Operand>,
        size: u8,
        signed: bool,
    },
    Str {
        rt: Register,
        rn: Register,
        rm: Option<Operand>,
        size: u8,
    },
    LdrPc {
        rt: Register,
        label: String,
        offset: u32,
        size: u8,
        signed: bool,
        target: Option<InsnId>,
    },
    Bl {
        callee: String,
    },
    Bx {
        rm: Register,
    },
    Branch {
        condition: Condition,
        label: String,
        target: Option<InsnId>,
    },
    Directive {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub instructions: Vec<Instruction>,
    /// Indices of the Label instructions, in source order.
    pub labels: Vec<InsnId>,
}

impl Function {
    pub fn new(name: String, instructions: Vec<Instruction>) -> Self {
        Self {
            name,
            instructions,
            labels: Vec::new(),
        }
    }

    pub fn label(&self, id: InsnId) -> &Label {
        match &self.instructions[id] {
            Instruction::Label(label) => label,
            other => unreachable!("label index points at {:?}", other),
        }
    }

    pub fn label_mut(&mut self, id: InsnId) -> &mut Label {
        match &mut self.instructions[id] {
            Instruction::Label(label) => label,
            other => unreachable!("label index points at {:?}", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsmFile {
    pub functions: Vec<Function>,
}

impl AsmFile {
    pub fn new(functions: Vec<Function>) -> Self {
        Self { functions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_aliases() {
        assert_eq!(Register::from_name("sb"), Some(Register(9)));
        assert_eq!(Register::from_name("sl"), Some(Register(10)));
        assert_eq!(Register::from_name("ip"), Some(Register(12)));
        assert_eq!(Register::from_name("sp"), Some(Register(13)));
        assert_eq!(Register::from_name("lr"), Some(Register(14)));
        assert_eq!(Register::from_name("pc"), Some(Register(15)));
        assert_eq!(Register::from_name("r7"), Some(Register(7)));
        assert_eq!(Register::from_name("r16"), None);
        assert_eq!(Register::from_name("x3"), None);
    }

    #[test]
    fn test_register_rendering() {
        assert_eq!(Register(9).to_string(), "r9");
        assert_eq!(Register(10).to_string(), "r10");
        assert_eq!(Register(12).to_string(), "r12");
        assert_eq!(Register(13).to_string(), "sp");
        assert_eq!(Register(14).to_string(), "lr");
        assert_eq!(Register(15).to_string(), "pc");
    }

    #[test]
    fn test_constant_rendering() {
        assert_eq!(Operand::Constant(0).to_string(), "#0x0");
        assert_eq!(Operand::Constant(255).to_string(), "#0xff");
        assert_eq!(Operand::Constant(-4).to_string(), "#-0x4");
    }

    #[test]
    fn test_operand_truthiness() {
        assert!(Operand::Register(Register(0)).is_truthy());
        assert!(Operand::Constant(1).is_truthy());
        assert!(!Operand::Constant(0).is_truthy());
    }
}
