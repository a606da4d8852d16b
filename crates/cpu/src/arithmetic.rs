//! `addi`, `addis`, and `add`.

use crate::decode::{Ins, sign_extend};
use crate::registers::CrField;
use crate::vm::{StepOutcome, Vm};

fn update_cr0(vm: &mut Vm, result: u64) {
    let low32 = result as u32;
    let lt = (low32 as i32) < 0;
    let eq = low32 == 0;
    let gt = !lt && !eq;
    let so = vm.regs.xer.so();
    vm.regs.cr.set_field(0, CrField::from_comparison(lt, gt, eq, so));
}

/// `addi`: `GPR[RT] = (RA == 0 ? 0 : GPR[RA]) + SIMM`. `li` is the RA=0 alias.
pub fn addi(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let rt = ins.field_rt() as usize;
    let ra = ins.field_ra();
    let simm = sign_extend(ins.field_simm(), 16) as i64 as u64;

    let base = if ra == 0 { 0 } else { vm.regs.gpr[ra as usize] };
    vm.regs.gpr[rt] = base.wrapping_add(simm);
    StepOutcome::Advance
}

/// `addis`: like `addi`, but the immediate occupies the upper 16 bits.
/// `lis` is the RA=0 alias. Unlike `addi`, the result is truncated to the
/// low 32 bits of GPR[RT] — this models the architecture subset as a
/// 32-bit machine even though the register file is stored at 64-bit width.
pub fn addis(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let rt = ins.field_rt() as usize;
    let ra = ins.field_ra();
    let imm = ins.field_simm() << 16;

    let base = if ra == 0 { 0 } else { vm.regs.gpr[ra as usize] as u32 };
    vm.regs.gpr[rt] = base.wrapping_add(imm) as u64;
    StepOutcome::Advance
}

/// `add`, with optional `Rc` (CR0 update) and `OE` (XER.OV + sticky XER.SO).
///
/// Overflow is always tested against the low 32 bits of the operands and
/// result, regardless of the registers' full 64-bit width; this matches the
/// original implementation's fixed-width overflow rule.
pub fn add(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let rt = ins.field_rt() as usize;
    let ra = vm.regs.gpr[ins.field_ra() as usize];
    let rb = vm.regs.gpr[ins.field_rb() as usize];

    let sum = ra.wrapping_add(rb);
    let overflowed = (ra ^ !rb) & (ra ^ sum) & 0x8000_0000 != 0;

    if ins.field_oe() {
        vm.regs.xer.set_ov(overflowed);
        if overflowed {
            vm.regs.xer.set_so(true);
        }
    }

    vm.regs.gpr[rt] = sum;

    if ins.field_rc() {
        update_cr0(vm, sum);
    }

    StepOutcome::Advance
}
