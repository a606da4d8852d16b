//! Decoding of the BO field shared by `bc` and `bclr`, and the branch
//! handlers themselves.

use bitos::{bitos, integer::u5};

use crate::decode::{Ins, sign_extend};
use crate::vm::{StepOutcome, Vm};

#[bitos(1)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CtrCond {
    NotEqZero = 0,
    EqZero = 1,
}

/// The BO field, decoded per its five documented sub-bits.
#[bitos(5)]
#[derive(Debug, Clone, Copy)]
struct BranchOptions {
    /// Branch prediction hint. Not used by this interpreter; modeled only
    /// so the field layout stays complete.
    #[bits(0)]
    likely: bool,
    #[bits(1)]
    ctr_cond: CtrCond,
    #[bits(2)]
    ignore_ctr: bool,
    #[bits(3)]
    desired_cr: bool,
    #[bits(4)]
    ignore_cr: bool,
}

/// Evaluates whether a conditional branch with the given BO/BI fields is
/// taken, decrementing CTR along the way if the encoding calls for it.
fn evaluate(vm: &mut Vm, bo: u32, bi: u32) -> bool {
    let options = BranchOptions::from_bits(u5::new(bo as u8));

    let mut taken = true;
    if !options.ignore_cr() {
        let field_index = bi / 4;
        let bit_index = bi % 4;
        let field = vm.regs.cr.field(field_index as u8);
        let bit = match bit_index {
            0 => field.lt(),
            1 => field.gt(),
            2 => field.eq(),
            _ => field.so(),
        };
        taken &= bit == options.desired_cr();
    }

    if !options.ignore_ctr() {
        vm.regs.ctr = vm.regs.ctr.wrapping_sub(1);
        let ctr_zero = vm.regs.ctr == 0;
        let ctr_ok = match options.ctr_cond() {
            CtrCond::NotEqZero => !ctr_zero,
            CtrCond::EqZero => ctr_zero,
        };
        taken &= ctr_ok;
    }

    taken
}

/// Unconditional branch (`b`, `ba`, `bl`, `bla`).
pub fn b(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let li = sign_extend(ins.field_li(), 24) as i64;
    let current = vm.regs.iar as i64;

    if ins.field_lk() {
        vm.regs.lr = (current + 1) as u64;
    }

    let target = if ins.field_aa() { li } else { current + li };
    vm.regs.iar = target as u32;
    StepOutcome::Continue
}

/// Conditional branch (`bc` and its mnemonic variants).
pub fn bc(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let taken = evaluate(vm, ins.field_bo(), ins.field_bi());
    if !taken {
        return StepOutcome::Advance;
    }

    let bd = sign_extend(ins.field_bd(), 14) as i64;
    let current = vm.regs.iar as i64;

    if ins.field_lk() {
        vm.regs.lr = (current + 1) as u64;
    }

    let target = if ins.field_aa() { bd } else { current + bd };
    vm.regs.iar = target as u32;
    StepOutcome::Continue
}

/// Branch to LR (`bclr`/`blr`). Returning to LR=0 is this interpreter's
/// convention for "the entry frame returned", and halts the run loop.
pub fn bclr(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let taken = evaluate(vm, ins.field_bo(), ins.field_bi());
    if !taken {
        return StepOutcome::Advance;
    }

    let target = vm.regs.lr;
    if target == 0 {
        return StepOutcome::Halt;
    }

    if ins.field_lk() {
        vm.regs.lr = vm.regs.iar as u64 + 1;
    }
    vm.regs.iar = target as u32;
    StepOutcome::Continue
}
