//! `or`, whose RA==RB encoding is the architectural `mr` (move register) alias.

use crate::decode::Ins;
use crate::registers::CrField;
use crate::vm::{StepOutcome, Vm};

pub fn or_mr(vm: &mut Vm, ins: Ins) -> StepOutcome {
    let rs = ins.field_rs() as usize;
    let ra = ins.field_ra() as usize;
    let rb = ins.field_rb() as usize;

    let result = vm.regs.gpr[rs] | vm.regs.gpr[rb];
    vm.regs.gpr[ra] = result;

    if ins.field_rc() {
        let low32 = result as u32;
        let lt = (low32 as i32) < 0;
        let eq = low32 == 0;
        let gt = !lt && !eq;
        let so = vm.regs.xer.so();
        vm.regs.cr.set_field(0, CrField::from_comparison(lt, gt, eq, so));
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

    #[test]
    fn mr_alias_copies_register() {
        let mut vm = vm();
        vm.regs.gpr[5] = 0x1234;
        // or r3, r5, r5 (mr r3, r5): opcode31, rs=5, ra=3, rb=5, xo=444
        let word = (31 << 26) | (5 << 21) | (3 << 16) | (5 << 11) | (444 << 1);
        or_mr(&mut vm, Ins(word));
        assert_eq!(vm.regs.gpr[3], 0x1234);
    }
}
