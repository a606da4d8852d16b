//! `mfspr`, `mtspr`, and the diagnostic-only `sc`.

use crate::decode::Ins;
use crate::diag::Diagnostic;
use crate::registers::Spr;
use crate::vm::{StepOutcome, Vm};

pub fn mfspr(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let rt = ins.field_rt() as usize;
    let raw = ins.field_spr();

    match Spr::from_number(raw) {
        Some(spr) => vm.regs.gpr[rt] = vm.regs.spr(spr),
        None => Diagnostic::UnrecognizedSpr { raw }.emit(),
    }

    StepOutcome::Advance
}

pub fn mtspr(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let rs = ins.field_rs() as usize;
    let raw = ins.field_spr();

    match Spr::from_number(raw) {
        Some(spr) => {
            let value = vm.regs.gpr[rs];
            vm.regs.set_spr(spr, value);
        }
        None => Diagnostic::UnrecognizedSpr { raw }.emit(),
    }

    StepOutcome::Advance
}

/// `sc`: a diagnostic-only system call. No exception is raised and no
/// supervisor state changes; only the call number in `GPR[0]` is logged.
pub fn sc(vm: &mut Vm, _ins: Ins) -> StepOutcome {
    if vm.settings.log_syscalls {
        Diagnostic::Syscall { index: vm.regs.gpr[0] }.emit();
    }
    StepOutcome::Advance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Memory;
    use crate::settings::Settings;

    fn vm() -> Vm {
        Vm::new(Memory::new(vec![0u8; 0x40], 0, 0, 0x40), Settings::default())
    }

    fn mfspr_word(rt: u32, spr: u32) -> u32 {
        let raw = ((spr & 0x1F) << 5) | ((spr >> 5) & 0x1F);
        (31u32 << 26) | (rt << 21) | (raw << 11) | (339 << 1)
    }

    fn mtspr_word(rs: u32, spr: u32) -> u32 {
        let raw = ((spr & 0x1F) << 5) | ((spr >> 5) & 0x1F);
        (31u32 << 26) | (rs << 21) | (raw << 11) | (467 << 1)
    }

    #[test]
    fn lr_round_trips_through_mtspr_mfspr() {
        let mut vm = vm();
        vm.regs.gpr[3] = 0xABCD;
        mtspr(&mut vm, Ins(mtspr_word(3, 8)));
        assert_eq!(vm.regs.lr, 0xABCD);

        mfspr(&mut vm, Ins(mfspr_word(4, 8)));
        assert_eq!(vm.regs.gpr[4], 0xABCD);
    }

    #[test]
    fn xer_round_trips_through_mtspr_mfspr() {
        let mut vm = vm();
        vm.regs.xer.set_so(true);
        vm.regs.xer.set_ov(true);
        let packed = vm.regs.xer.to_bits() as u64;

        mfspr(&mut vm, Ins(mfspr_word(3, 1)));
        assert_eq!(vm.regs.gpr[3], packed);

        vm.regs.gpr[5] = 0;
        mtspr(&mut vm, Ins(mtspr_word(5, 1)));
        assert!(!vm.regs.xer.so());
        assert!(!vm.regs.xer.ov());
    }

    #[test]
    fn unrecognized_spr_is_a_no_op() {
        let mut vm = vm();
        vm.regs.gpr[3] = 42;
        mtspr(&mut vm, Ins(mtspr_word(3, 99)));
        mfspr(&mut vm, Ins(mfspr_word(4, 99)));
        assert_eq!(vm.regs.gpr[4], 0);
    }

    #[test]
    fn sc_does_not_mutate_registers() {
        let mut vm = vm();
        vm.regs.gpr[0] = 7;
        let before = vm.regs.gpr;
        let outcome = sc(&mut vm, Ins(17 << 26));
        assert_eq!(outcome, StepOutcome::Advance);
        assert_eq!(vm.regs.gpr, before);
    }
}
