//! Instruction buffer
//!
//! An append-only list of rendered lines. Nested buffers are spliced in
//! order, optionally indented one level (function bodies).

use super::address::Label;
use super::instr::Instr;
use std::fmt;
use std::io::{self, Write};

const INDENT: &str = "    ";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBuffer {
    lines: Vec<String>,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn push(&mut self, instr: Instr) {
        self.lines.push(instr.to_string());
    }

    pub fn push_label(&mut self, label: Label) {
        self.push(Instr::Label(label));
    }

    pub fn push_blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Append all lines of `other`, in order
    pub fn append(&mut self, other: CodeBuffer) {
        self.lines.extend(other.lines);
    }

    /// Append all lines of `other`, each prefixed with one indentation unit
    pub fn append_indented(&mut self, other: CodeBuffer) {
        self.lines
            .extend(other.lines.into_iter().map(|line| format!("{INDENT}{line}")));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Flush every line, newline-terminated, to `out`
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

impl fmt::Display for CodeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl From<Instr> for CodeBuffer {
    fn from(instr: Instr) -> Self {
        let mut code = CodeBuffer::new();
        code.push(instr);
        code
    }
}
