//! The compare family: `cmpi`, `cmpli`, `cmp`, `cmpl`.

use crate::decode::{Ins, sign_extend};
use crate::registers::CrField;
use crate::vm::{StepOutcome, Vm};

fn write_result(vm: &mut Vm, bf: u32, lt: bool, gt: bool, eq: bool) {
    let so = vm.regs.xer.so();
    vm.regs.cr.set_field(bf as u8, CrField::from_comparison(lt, gt, eq, so));
}

/// `cmpi`: signed compare of `GPR[RA]` against a sign-extended immediate.
pub fn cmpi(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let bf = ins.field_crfd();
    let ra = ins.field_ra();
    let simm = sign_extend(ins.field_simm(), 16) as i64;

    let a = if ins.field_l() {
        vm.regs.gpr[ra as usize] as i64
    } else {
        (vm.regs.gpr[ra as usize] as u32) as i32 as i64
    };

    write_result(vm, bf, a < simm, a > simm, a == simm);
    StepOutcome::Advance
}

/// `cmpli`: unsigned compare of `GPR[RA]` against a zero-extended immediate.
pub fn cmpli(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let bf = ins.field_crfd();
    let ra = ins.field_ra();
    let uimm = ins.field_uimm() as u64;

    let a = if ins.field_l() {
        vm.regs.gpr[ra as usize]
    } else {
        (vm.regs.gpr[ra as usize] as u32) as u64
    };

    write_result(vm, bf, a < uimm, a > uimm, a == uimm);
    StepOutcome::Advance
}

/// `cmp`: signed compare of `GPR[RA]` against `GPR[RB]`.
pub fn cmp(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let bf = ins.field_crfd();
    let ra = ins.field_ra();
    let rb = ins.field_rb();

    let (a, b) = if ins.field_l() {
        (vm.regs.gpr[ra as usize] as i64, vm.regs.gpr[rb as usize] as i64)
    } else {
        (
            (vm.regs.gpr[ra as usize] as u32) as i32 as i64,
            (vm.regs.gpr[rb as usize] as u32) as i32 as i64,
        )
    };

    write_result(vm, bf, a < b, a > b, a == b);
    StepOutcome::Advance
}

/// `cmpl`: unsigned compare of `GPR[RA]` against `GPR[RB]`.
pub fn cmpl(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let bf = ins.field_crfd();
    let ra = ins.field_ra();
    let rb = ins.field_rb();

    let (a, b) = if ins.field_l() {
        (vm.regs.gpr[ra as usize], vm.regs.gpr[rb as usize])
    } else {
        (
            (vm.regs.gpr[ra as usize] as u32) as u64,
            (vm.regs.gpr[rb as usize] as u32) as u64,
        )
    };

    write_result(vm, bf, a < b, a > b, a == b);
    StepOutcome::Advance
}
