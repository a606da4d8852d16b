/// Tunable interpreter behavior. Mirrors the shape of [`ppcjit`'s `Settings`]
/// in the teacher codebase this interpreter is modeled on, adapted to the
/// conditions this (much smaller) instruction subset actually encounters.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    /// Whether `sc` logs at all (it is always diagnostic-only; this just
    /// controls whether the log line is emitted).
    pub log_syscalls: bool,
    /// Initial byte size of the stack region.
    pub initial_stack_capacity: usize,
    /// If set, an unrecognized primary or extended opcode panics instead of
    /// halting the run loop. Useful for catching decoder gaps in tests.
    pub panic_on_unknown_opcode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_syscalls: true,
            initial_stack_capacity: 64 * 1024,
            panic_on_unknown_opcode: false,
        }
    }
}
