use std::io::{self, Write};

use crate::cpu::{Cpu, CpuConfig, RunState, Trap};
use crate::exec::IntExecutor;
use crate::isa::lc2k::Lc2kDecoder;
use crate::memory::{parse_image, LoadError, WordMemory};
use crate::trace::{print_halt, print_loaded, print_state, Snapshot};

#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Trap(#[from] Trap),
    #[error("trace output failed: {0}")]
    Io(#[from] io::Error),
}

/// One machine run: loads an image, then fetch-decode-executes until halt.
pub struct Simulator {
    pub cpu: Cpu,
    pub mem: WordMemory,
    dec: Lc2kDecoder,
    exec: IntExecutor,
}

impl Simulator {
    pub fn new(cfg: CpuConfig) -> Self {
        Self {
            cpu: Cpu::new(cfg),
            mem: WordMemory::new(cfg.num_memory),
            dec: Lc2kDecoder::new(),
            exec: IntExecutor,
        }
    }

    /// Load words at address 0 and enter the running state.
    pub fn load(&mut self, words: &[i32]) -> Result<(), LoadError> {
        self.mem.load(words)?;
        self.cpu.reset(0);
        tracing::debug!(words = words.len(), "image loaded");
        Ok(())
    }

    pub fn load_text(&mut self, text: &str) -> Result<(), LoadError> {
        let words = parse_image(text)?;
        self.load(&words)
    }

    pub fn state(&self) -> RunState {
        self.cpu.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.cpu, &self.mem)
    }

    pub fn step(&mut self) -> Result<(), Trap> {
        self.cpu.step(&mut self.mem, &self.dec, &self.exec)
    }

    /// Run to halt. With `trace` set, the full state is written before every
    /// instruction; the halt summary is always written.
    pub fn run<W: Write>(&mut self, out: &mut W, trace: bool) -> Result<(), SimError> {
        if trace {
            print_loaded(out, &self.mem)?;
        }
        while !self.cpu.halted() {
            if trace {
                print_state(out, &self.cpu, &self.mem)?;
            }
            self.step()?;
        }
        tracing::debug!(executed = self.cpu.executed, pc = self.cpu.pc, "halted");
        print_halt(out, &self.cpu, &self.mem)?;
        Ok(())
    }
}
