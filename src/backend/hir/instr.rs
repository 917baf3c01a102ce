//! HIR instruction set
//!
//! One instruction renders to exactly one output line.

use super::address::{Address, Label};
use crate::common::ast::BinOp;
use std::fmt;

/// Three-address opcodes producing a value into a destination
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    And,
    Or,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl From<BinOp> for Opcode {
    fn from(op: BinOp) -> Self {
        match op {
            BinOp::Add => Opcode::Add,
            BinOp::Sub => Opcode::Sub,
            BinOp::Mul => Opcode::Mult,
            BinOp::Div => Opcode::Div,
            BinOp::Mod => Opcode::Mod,
            BinOp::And => Opcode::And,
            BinOp::Or => Opcode::Or,
            BinOp::Eq => Opcode::Eq,
            BinOp::NotEq => Opcode::Neq,
            BinOp::Lt => Opcode::Lt,
            BinOp::Gt => Opcode::Gt,
            BinOp::Lte => Opcode::Lte,
            BinOp::Gte => Opcode::Gte,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mnemonic = match self {
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mult => "mult",
            Opcode::Div => "div",
            Opcode::Mod => "mod",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Eq => "eq",
            Opcode::Neq => "neq",
            Opcode::Lt => "lt",
            Opcode::Gt => "gt",
            Opcode::Lte => "lte",
            Opcode::Gte => "gte",
        };
        write!(f, "{mnemonic}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instr {
    /// String pool entry: `str ?n, "text"`
    Str { index: u32, text: String },
    Entry { globals: u32 },
    Func { name: String },
    FuncInfo { locals: u32, temps: u32 },
    EndFunc { name: String },
    Move { dst: Address, src: Address },
    Binary {
        op: Opcode,
        dst: Address,
        lhs: Address,
        rhs: Address,
    },
    Not { dst: Address, src: Address },
    Jump { target: Label },
    JumpIfTrue { cond: Address, target: Label },
    Call { name: String, argc: usize },
    CallValue {
        dst: Address,
        name: String,
        argc: usize,
    },
    Arg { value: Address, position: usize },
    Read { dst: Address },
    Write { src: Address },
    Ret { func: String },
    RetValue { func: String, value: Address },
    Label(Label),
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instr::Str { index, text } => write!(f, "str ?{index}, {text}"),
            Instr::Entry { globals } => write!(f, "entry main, {globals}"),
            Instr::Func { name } => write!(f, "func {name}"),
            Instr::FuncInfo { locals, temps } => write!(f, "funci {locals}, {temps}"),
            Instr::EndFunc { name } => write!(f, "efunc {name}"),
            Instr::Move { dst, src } => write!(f, "move {dst}, {src}"),
            Instr::Binary { op, dst, lhs, rhs } => write!(f, "{op} {dst}, {lhs}, {rhs}"),
            Instr::Not { dst, src } => write!(f, "not {dst}, {src}"),
            Instr::Jump { target } => write!(f, "jump {target}"),
            Instr::JumpIfTrue { cond, target } => write!(f, "jt {cond}, {target}"),
            Instr::Call { name, argc } => write!(f, "call {name}, {argc}"),
            Instr::CallValue { dst, name, argc } => write!(f, "callf {dst}, {name}, {argc}"),
            Instr::Arg { value, position } => write!(f, "arg {value}, {position}"),
            Instr::Read { dst } => write!(f, "read {dst}"),
            Instr::Write { src } => write!(f, "write {src}"),
            Instr::Ret { func } => write!(f, "ret {func}"),
            Instr::RetValue { func, value } => write!(f, "retf {func}, {value}"),
            Instr::Label(label) => write!(f, "{label}:"),
        }
    }
}
