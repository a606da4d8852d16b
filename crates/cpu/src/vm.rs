//! The run loop and primary/extended opcode dispatch.

use tracing::trace;

use crate::arithmetic;
use crate::branch;
use crate::compare;
use crate::decode::Ins;
use crate::diag::Diagnostic;
use crate::logic;
use crate::memops;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::settings::Settings;
use crate::spr;

/// What the run loop should do after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The handler ran normally; advance IAR by one word.
    Advance,
    /// The handler already updated IAR (a taken branch); re-enter the loop
    /// without the standard increment.
    Continue,
    /// Stop the run loop.
    Halt,
}

/// The interpreter: register file, memory regions, and behavior settings.
pub struct Vm {
    pub regs: Registers,
    pub mem: Memory,
    pub settings: Settings,
}

impl Vm {
    pub fn new(mem: Memory, settings: Settings) -> Self {
        Self { regs: Registers::default(), mem, settings }
    }

    /// Executes a single fetch-decode-execute cycle, returning whether the
    /// loop should continue and, if so, how IAR was already adjusted.
    pub fn step(&mut self) -> StepOutcome {
        let Some(word) = self.mem.fetch(self.regs.iar) else {
            tracing::warn!(target: "xenon_cpu::vm", iar = self.regs.iar, "fetch outside image region, halting");
            return StepOutcome::Halt;
        };

        let ins = Ins(word);
        trace!(target: "xenon_cpu::vm", iar = self.regs.iar, word, "fetched");

        let outcome = dispatch(self, ins);
        if outcome == StepOutcome::Advance {
            self.regs.iar = self.regs.iar.wrapping_add(1);
        }
        outcome
    }

    /// Runs until the interpreter halts.
    pub fn run(&mut self) {
        while self.step() != StepOutcome::Halt {}
    }

    /// Runs until halt or until `max_steps` instructions have executed,
    /// whichever comes first. Returns the number of steps actually taken.
    /// A host convenience for bounding runaway programs; not part of the
    /// architected semantics.
    pub fn run_bounded(&mut self, max_steps: u64) -> u64 {
        let mut taken = 0;
        while taken < max_steps {
            taken += 1;
            if self.step() == StepOutcome::Halt {
                break;
            }
        }
        taken
    }
}

fn dispatch(vm: &mut Vm, ins: Ins) -> StepOutcome {
    match ins.opcode() {
        10 => compare::cmpli(vm, ins),
        11 => compare::cmpi(vm, ins),
        14 => arithmetic::addi(vm, ins),
        15 => arithmetic::addis(vm, ins),
        16 => branch::bc(vm, ins),
        17 => spr::sc(vm, ins),
        18 => branch::b(vm, ins),
        19 => dispatch_19(vm, ins),
        31 => dispatch_31(vm, ins),
        32 => memops::lwz(vm, ins),
        36 => memops::stw(vm, ins),
        37 => memops::stwu(vm, ins),
        38 => memops::stb(vm, ins),
        opcode => {
            let outcome = Diagnostic::UnknownPrimaryOpcode { opcode };
            outcome.emit();
            if vm.settings.panic_on_unknown_opcode {
                panic!("unknown primary opcode {opcode}");
            }
            StepOutcome::Halt
        }
    }
}

fn dispatch_19(vm: &mut Vm, ins: Ins) -> StepOutcome {
    match ins.field_xo_xl() {
        16 => branch::bclr(vm, ins),
        extended => unknown_extended(vm, ins.opcode(), extended),
    }
}

fn dispatch_31(vm: &mut Vm, ins: Ins) -> StepOutcome {
    match ins.field_xo_x() {
        0 => compare::cmp(vm, ins),
        32 => compare::cmpl(vm, ins),
        266 => arithmetic::add(vm, ins),
        339 => spr::mfspr(vm, ins),
        444 => logic::or_mr(vm, ins),
        467 => spr::mtspr(vm, ins),
        extended => unknown_extended(vm, ins.opcode(), extended),
    }
}

fn unknown_extended(vm: &mut Vm, opcode: u32, extended: u32) -> StepOutcome {
    Diagnostic::UnknownExtendedOpcode { opcode, extended }.emit();
    if vm.settings.panic_on_unknown_opcode {
        panic!("unknown extended opcode {extended} under primary opcode {opcode}");
    }
    StepOutcome::Halt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Memory;

    fn image_from_words(words: &[u32]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(words.len() * 4);
        for w in words {
            bytes.extend_from_slice(&w.to_be_bytes());
        }
        bytes
    }

    #[test]
    fn unknown_opcode_halts() {
        let image = image_from_words(&[0xFFFF_FFFF]);
        let mem = Memory::new(image, 0, 0, 0x40);
        let mut vm = Vm::new(mem, Settings::default());
        assert_eq!(vm.step(), StepOutcome::Halt);
    }

    #[test]
    fn addi_then_halt_on_bclr_zero_lr() {
        // addi r3, 0, 42 ; bclr (blr, BO=10100)
        let addi = (14u32 << 26) | (3 << 21) | (0 << 16) | 42;
        let bclr = (19u32 << 26) | (20 << 21) | (0 << 16) | (16 << 1);
        let image = image_from_words(&[addi, bclr]);
        let mem = Memory::new(image, 0, 0, 0x40);
        let mut vm = Vm::new(mem, Settings::default());

        vm.run();
        assert_eq!(vm.regs.gpr[3], 42);
        assert_eq!(vm.regs.iar, 1);
    }
}
