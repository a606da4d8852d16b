//! Diagnostics emitted for conditions this interpreter treats as "soft"
//! failures (logged, then either no-op'd or zero-filled) as opposed to the
//! one genuinely fatal condition, an unrecognized primary or extended
//! opcode.

use tracing::{debug, warn};

/// A loggable diagnostic condition raised while stepping the interpreter.
///
/// Conditions that halt the run loop are logged at `WARN`; conditions that
/// are silently absorbed (an unrecognized SPR, a diagnostic-only syscall,
/// an out-of-region access) are logged at `DEBUG` so they don't drown out
/// genuine problems in normal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    UnknownPrimaryOpcode { opcode: u32 },
    UnknownExtendedOpcode { opcode: u32, extended: u32 },
    UnrecognizedSpr { raw: u32 },
    Syscall { index: u64 },
    OutOfRegionRead { address: u32 },
    OutOfRegionWrite { address: u32 },
}

impl Diagnostic {
    pub fn emit(self) {
        match self {
            Diagnostic::UnknownPrimaryOpcode { opcode } => {
                warn!(target: "xenon_cpu::diag", opcode, "unknown primary opcode, halting");
            }
            Diagnostic::UnknownExtendedOpcode { opcode, extended } => {
                warn!(target: "xenon_cpu::diag", opcode, extended, "unknown extended opcode, halting");
            }
            Diagnostic::UnrecognizedSpr { raw } => {
                debug!(target: "xenon_cpu::diag", raw, "unrecognized SPR, ignored");
            }
            Diagnostic::Syscall { index } => {
                debug!(target: "xenon_cpu::diag", index, "syscall (diagnostic only)");
            }
            Diagnostic::OutOfRegionRead { address } => {
                debug!(target: "xenon_cpu::diag", address, "out-of-region read, returning zero");
            }
            Diagnostic::OutOfRegionWrite { address } => {
                debug!(target: "xenon_cpu::diag", address, "out-of-region write, dropped");
            }
        }
    }

    /// Whether this diagnostic corresponds to a condition that halts the
    /// run loop.
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            Diagnostic::UnknownPrimaryOpcode { .. } | Diagnostic::UnknownExtendedOpcode { .. }
        )
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnknownPrimaryOpcode { opcode } => {
                write!(f, "unknown primary opcode {opcode}")
            }
            Diagnostic::UnknownExtendedOpcode { opcode, extended } => {
                write!(f, "unknown extended opcode {extended} under primary opcode {opcode}")
            }
            Diagnostic::UnrecognizedSpr { raw } => write!(f, "unrecognized SPR {raw}"),
            Diagnostic::Syscall { index } => write!(f, "syscall (index={index})"),
            Diagnostic::OutOfRegionRead { address } => {
                write!(f, "out-of-region read at {address:#x}")
            }
            Diagnostic::OutOfRegionWrite { address } => {
                write!(f, "out-of-region write at {address:#x}")
            }
        }
    }
}
