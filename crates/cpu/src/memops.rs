//! `lwz`, `stw`, `stb`, and `stwu`.

use crate::decode::{Ins, sign_extend};
use crate::memory::Width;
use crate::vm::{StepOutcome, Vm};

fn effective_address(vm: &Vm, ra: u32, d_raw: u32) -> u32 {
    let offset = sign_extend(d_raw, 16) as i64;
    let base = if ra == 0 { 0 } else { vm.regs.gpr[ra as usize] as i64 };
    (base + offset) as u32
}

pub fn lwz(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let rt = ins.field_rt() as usize;
    let ra = ins.field_ra();
    let ea = effective_address(vm, ra, ins.field_d());
    vm.regs.gpr[rt] = vm.mem.load(ra, ea, Width::Word);
    StepOutcome::Advance
}

pub fn stw(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let rs = ins.field_rs();
    let ra = ins.field_ra();
    let ea = effective_address(vm, ra, ins.field_d());
    vm.mem.store(ra, ea, vm.regs.gpr[rs as usize], Width::Word);
    StepOutcome::Advance
}

pub fn stb(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let rs = ins.field_rs();
    let ra = ins.field_ra();
    let ea = effective_address(vm, ra, ins.field_d());
    vm.mem.store(ra, ea, vm.regs.gpr[rs as usize], Width::Byte);
    StepOutcome::Advance
}

/// `stwu`: store `GPR[RS]` and update `GPR[RA]` with the computed address.
///
/// When `RA==1`, this is "push a stack frame": the new stack pointer is
/// computed first (growing the stack buffer at its low end if it would
/// otherwise underflow), then the *old* `GPR[1]` value is written, 8 bytes
/// little-endian, at the new top of stack. This 8-byte/LE write (rather than
/// the expected 4-byte store of `GPR[RS]`) is preserved from the original
/// implementation's behavior rather than "corrected" to the architecturally
/// expected store, since binaries built against it may depend on it.
pub fn stwu(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let rs = ins.field_rs();
    let ra = ins.field_ra();
    let offset = sign_extend(ins.field_d(), 16) as i64;

    if ra == 1 {
        let current = vm.regs.gpr[1];
        let mut new_sp = current as i64 + offset;
        if new_sp < 0 {
            vm.mem.grow_stack_low((-new_sp) as usize);
            new_sp = 0;
        }
        vm.regs.gpr[1] = new_sp as u64;
        let _ = rs; // RS is unused on this path; the old GPR[1] is what gets saved
        store_old_sp(vm, new_sp as usize, current);
        return StepOutcome::Advance;
    }

    let ea = effective_address(vm, ra, ins.field_d());
    vm.mem.store(ra, ea, vm.regs.gpr[rs as usize], Width::Word);
    vm.regs.gpr[ra as usize] = ea as u64;
    StepOutcome::Advance
}

fn store_old_sp(vm: &mut Vm, index: usize, old_gpr1: u64) {
    let bytes = old_gpr1.to_le_bytes();
    for (i, b) in bytes.iter().enumerate() {
        vm.mem.write_stack(index + i, *b as u64, Width::Byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Memory;
    use crate::settings::Settings;

    fn vm() -> Vm {
        Vm::new(Memory::new(vec![0u8; 0x40], 0, 0, 0x200), Settings::default())
    }

    #[test]
    fn stwu_pushes_frame_and_saves_old_sp() {
        let mut vm = vm();
        vm.regs.gpr[1] = 0x100;
        // stwu r1, -0x20(r1): opcode37, rs=1, ra=1, d=0xFFE0
        let word = (37u32 << 26) | (1 << 21) | (1 << 16) | 0xFFE0;
        stwu(&mut vm, Ins(word));

        assert_eq!(vm.regs.gpr[1], 0xE0);
        assert_eq!(vm.mem.read_stack(0xE0, Width::Word), Some(0x100));
    }

    #[test]
    fn stwu_grows_stack_when_pointer_would_go_negative() {
        let mut vm = Vm::new(Memory::new(vec![0u8; 0x40], 0, 0, 0x10), Settings::default());
        vm.regs.gpr[1] = 0x8;
        // stwu r1, -0x20(r1)
        let word = (37u32 << 26) | (1 << 21) | (1 << 16) | 0xFFE0;
        let before_len = vm.mem.stack_len();
        stwu(&mut vm, Ins(word));

        assert_eq!(vm.regs.gpr[1], 0);
        assert!(vm.mem.stack_len() > before_len);
        assert_eq!(vm.mem.read_stack(0, Width::Word), Some(0x8));
    }

    #[test]
    fn stwu_with_other_ra_stores_and_updates_pointer() {
        let mut vm = vm();
        vm.regs.gpr[3] = 0x10;
        vm.regs.gpr[5] = 0xCAFE;
        // stwu r5, 4(r3): opcode37, rs=5, ra=3, d=4
        let word = (37u32 << 26) | (5 << 21) | (3 << 16) | 4;
        stwu(&mut vm, Ins(word));

        assert_eq!(vm.regs.gpr[3], 0x14);
        assert_eq!(vm.mem.load(3, 0x14, Width::Word), 0xCAFE);
    }

    #[test]
    fn lwz_reads_word_stored_via_stw() {
        let mut vm = vm();
        vm.regs.gpr[4] = 0xDEAD_BEEF;
        // stw r4, 0(0): opcode36, rs=4, ra=0, d=0
        stw(&mut vm, Ins((36u32 << 26) | (4 << 21)));
        // lwz r6, 0(0): opcode32, rt=6, ra=0, d=0
        lwz(&mut vm, Ins((32u32 << 26) | (6 << 21)));
        assert_eq!(vm.regs.gpr[6], 0xDEAD_BEEF);
    }
}
