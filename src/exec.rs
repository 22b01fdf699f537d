use crate::cpu::{Cpu, RunState, Trap};
use crate::decoder::{Decoded, Op};
use crate::memory::Bus;

pub trait Executor {
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, d: Decoded) -> Result<(), Trap>;
}

/// Integer semantics for the eight LC-2K opcodes. `cpu.pc` already holds
/// the address after the instruction being executed.
pub struct IntExecutor;
impl Executor for IntExecutor {
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, d: Decoded) -> Result<(), Trap> {
        let a = cpu.reg[d.reg_a as usize];
        let b = cpu.reg[d.reg_b as usize];
        match d.op {
            Op::Add => {
                cpu.reg[d.dest as usize] = a.wrapping_add(b);
            }
            Op::Nor => {
                cpu.reg[d.dest as usize] = !(a | b);
            }
            Op::Lw => {
                let addr = a.wrapping_add(d.offset);
                let val = bus
                    .read_word(addr)
                    .map_err(|source| Trap::Bus { addr, source })?;
                cpu.reg[d.reg_b as usize] = val;
            }
            Op::Sw => {
                let addr = a.wrapping_add(d.offset);
                bus
                    .write_word(addr, b)
                    .map_err(|source| Trap::Bus { addr, source })?;
            }
            Op::Beq => {
                if a == b {
                    cpu.pc = cpu.pc.wrapping_add(d.offset);
                }
            }
            Op::Jalr => {
                // target is regB as it was before the link overwrites it;
                // writing the link first would fall through to pc + 1
                let link = cpu.pc;
                cpu.reg[d.reg_b as usize] = link;
                cpu.pc = b;
            }
            Op::Halt => {
                cpu.state = RunState::Halted;
            }
            Op::Noop => {}
        }
        Ok(())
    }
}
