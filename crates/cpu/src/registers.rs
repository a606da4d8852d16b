use bitos::bitos;

/// One 4-bit condition field (CR0..CR7), in the bit order this interpreter uses:
/// `lt` is bit 0, `so` is bit 3.
#[bitos(4)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrField {
    #[bits(0)]
    pub lt: bool,
    #[bits(1)]
    pub gt: bool,
    #[bits(2)]
    pub eq: bool,
    #[bits(3)]
    pub so: bool,
}

impl CrField {
    /// Builds a field from a signed comparison outcome plus the sticky XER.SO bit.
    pub fn from_comparison(lt: bool, gt: bool, eq: bool, so: bool) -> Self {
        Self::default().with_lt(lt).with_gt(gt).with_eq(eq).with_so(so)
    }
}

/// The condition register: eight 4-bit fields, CR0 through CR7.
#[bitos(32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionRegister {
    #[bits(..)]
    pub fields: [CrField; 8],
}

impl ConditionRegister {
    pub fn field(&self, index: u8) -> CrField {
        self.fields()[index as usize]
    }

    pub fn set_field(&mut self, index: u8, value: CrField) {
        let mut fields = self.fields();
        fields[index as usize] = value;
        self.set_fields(fields);
    }
}

/// Fixed-point exception register. Only the three bits this interpreter's
/// instruction subset actually touches are modeled.
#[bitos(32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Xer {
    #[bits(0)]
    pub so: bool,
    #[bits(1)]
    pub ov: bool,
    #[bits(2)]
    pub ca: bool,
}

/// Special-purpose registers this interpreter recognizes, addressed through
/// the swapped 10-bit field used by `mfspr`/`mtspr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spr {
    Xer,
    Lr,
    Ctr,
}

impl Spr {
    /// Resolves a raw (already-swapped) SPR number, per the architecture's
    /// recognized subset. Returns `None` for anything else.
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(Self::Xer),
            8 => Some(Self::Lr),
            9 => Some(Self::Ctr),
            _ => None,
        }
    }
}

/// The full architected register file this interpreter operates on.
///
/// GPRs are stored as 64-bit values even though this instruction subset only
/// ever produces 32-bit results; LR and CTR are likewise kept at their full
/// architected width. MSR is opaque here since no bit of it is inspected by
/// any modeled instruction. FPR/FPSCR exist only so the register file shape
/// matches the architecture; nothing in this interpreter reads or writes them.
#[derive(Debug, Clone)]
pub struct Registers {
    pub gpr: [u64; 32],
    /// Instruction address register, held as a *word* index rather than a
    /// byte address.
    pub iar: u32,
    pub lr: u64,
    pub ctr: u64,
    pub xer: Xer,
    pub msr: u64,
    pub cr: ConditionRegister,
    pub fpscr: u32,
    pub fpr: [f64; 32],
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            gpr: [0; 32],
            iar: 0,
            lr: 0,
            ctr: 0,
            xer: Xer::default(),
            msr: 0,
            cr: ConditionRegister::default(),
            fpscr: 0,
            fpr: [0.0; 32],
        }
    }
}

impl Registers {
    pub fn spr(&self, spr: Spr) -> u64 {
        match spr {
            Spr::Xer => self.xer.to_bits() as u64,
            Spr::Lr => self.lr,
            Spr::Ctr => self.ctr,
        }
    }

    pub fn set_spr(&mut self, spr: Spr, value: u64) {
        match spr {
            Spr::Xer => self.xer = Xer::from_bits(value as u32),
            Spr::Lr => self.lr = value,
            Spr::Ctr => self.ctr = value,
        }
    }
}
