use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cpu::Cpu;
use crate::memory::WordMemory;

/// Full state dump: pc, loaded memory range and all registers.
pub fn print_state<W: Write>(out: &mut W, cpu: &Cpu, mem: &WordMemory) -> io::Result<()> {
    writeln!(out, "\n@@@\nstate:")?;
    writeln!(out, "\tpc {}", cpu.pc)?;
    writeln!(out, "\tmemory:")?;
    for (i, w) in mem.loaded_words().iter().enumerate() {
        writeln!(out, "\t\tmem[ {} ] {}", i, w)?;
    }
    writeln!(out, "\tregisters:")?;
    for (i, r) in cpu.reg.iter().enumerate() {
        writeln!(out, "\t\treg[ {} ] {}", i, r)?;
    }
    writeln!(out, "end state")
}

pub fn print_loaded<W: Write>(out: &mut W, mem: &WordMemory) -> io::Result<()> {
    for (i, w) in mem.loaded_words().iter().enumerate() {
        writeln!(out, "memory[{}]={}", i, w)?;
    }
    Ok(())
}

pub fn print_halt<W: Write>(out: &mut W, cpu: &Cpu, mem: &WordMemory) -> io::Result<()> {
    writeln!(out, "machine halted")?;
    writeln!(out, "total of {} instructions executed", cpu.executed)?;
    writeln!(out, "final state of machine:")?;
    print_state(out, cpu, mem)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub pc: i32,
    pub executed: u64,
    pub registers: Vec<i32>,
    pub memory: Vec<i32>,
}

impl Snapshot {
    pub fn capture(cpu: &Cpu, mem: &WordMemory) -> Self {
        Self {
            pc: cpu.pc,
            executed: cpu.executed,
            registers: cpu.reg.to_vec(),
            memory: mem.loaded_words().to_vec(),
        }
    }
}
