use anyhow::Error;
use crate::decoder::Decoder;
use crate::exec::Executor;
use crate::isa::lc2k::NUM_REGS;
use crate::memory::{Bus, NUM_MEMORY};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CpuConfig {
    pub num_memory: usize,
    /// Upper bound on executed instructions before the run is abandoned.
    pub max_steps: u64,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            num_memory: NUM_MEMORY,
            max_steps: 10_000_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Loading,
    Running,
    Halted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cpu {
    pub pc: i32,
    /// r0 is an ordinary register, not hardwired to zero.
    pub reg: [i32; NUM_REGS],
    pub state: RunState,
    /// Instructions fetched and executed, halt included.
    pub executed: u64,
    pub cfg: CpuConfig,
}

#[derive(thiserror::Error, Debug)]
pub enum Trap {
    #[error("Invalid instruction {word:#010x} at pc {pc}")]
    InvalidInstruction { pc: i32, word: u32 },
    #[error("Bus error at address {addr}: {source}")]
    Bus { addr: i32, #[source] source: Error },
    #[error("Step limit of {limit} instructions reached without halting")]
    StepLimit { limit: u64 },
    #[error("Machine is not running")]
    NotRunning,
}

impl Cpu {
    pub fn new(cfg: CpuConfig) -> Self {
        Self {
            pc: 0,
            reg: [0; NUM_REGS],
            state: RunState::Loading,
            executed: 0,
            cfg,
        }
    }

    pub fn reset(&mut self, reset_pc: i32) {
        self.pc = reset_pc;
        self.reg = [0; NUM_REGS];
        self.executed = 0;
        self.state = RunState::Running;
    }

    pub fn halted(&self) -> bool {
        self.state == RunState::Halted
    }

    pub fn step<B: Bus, D: Decoder, X: Executor>(
        &mut self,
        bus: &mut B,
        dec: &D,
        exec: &X,
    ) -> Result<(), Trap> {
        if self.state != RunState::Running {
            return Err(Trap::NotRunning);
        }
        if self.executed >= self.cfg.max_steps {
            return Err(Trap::StepLimit { limit: self.cfg.max_steps });
        }
        let pc = self.pc;
        let word = bus
            .read_word(pc)
            .map_err(|source| Trap::Bus { addr: pc, source })? as u32;
        let d = dec
            .decode(word)
            .ok_or(Trap::InvalidInstruction { pc, word })?;
        tracing::trace!(pc, ?d, "step");
        // Every instruction sees pc already pointing past itself
        self.pc = pc.wrapping_add(1);
        self.executed += 1;
        exec.exec(self, bus, d)
    }
}
