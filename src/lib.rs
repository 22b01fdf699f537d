pub mod cpu;
pub mod decoder;
pub mod exec;
pub mod disasm;
pub mod instructions;
pub mod memory;
pub mod sim;
pub mod trace;

pub mod isa {
    pub mod lc2k;
}

pub use cpu::{Cpu, CpuConfig, RunState, Trap};
pub use memory::{Bus, WordMemory};
pub use sim::{SimError, Simulator};
