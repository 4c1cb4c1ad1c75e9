use std::collections::HashSet;
use std::fmt;

use primitives::Word256;

use crate::host::Host;
use crate::jumpdest;
use crate::machine_state::{HaltReason, MachineState};
use crate::opcode;
use crate::stack::{Stack, StackError};
use crate::trace::{Trace, TraceEventKind};

/// The configuration accepted by [`Interpreter::new`]: the program to run,
/// its starting gas budget, optional calldata, and the host capability it
/// executes against.
pub struct InterpreterConfig {
    /// The bytecode to execute.
    pub bytecode: Vec<u8>,
    /// The starting gas budget.
    pub initial_gas: u64,
    /// Read-only input data; defaults to empty if not set.
    pub calldata: Vec<u8>,
    /// The host capability backing storage, logs, and the executing
    /// address.
    pub host: Box<dyn Host>,
}

/// `Host` is a trait object here and has no `Debug` impl of its own, so this
/// is hand-written rather than derived; it prints everything but `host`.
impl fmt::Debug for InterpreterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpreterConfig")
            .field("bytecode", &self.bytecode)
            .field("initial_gas", &self.initial_gas)
            .field("calldata", &self.calldata)
            .field("host", &"<dyn Host>")
            .finish()
    }
}

/// Ties together a [`MachineState`], the precomputed jump-destination set,
/// the bytecode and calldata being executed, a [`Trace`] collector, and a
/// [`Host`] capability into one runnable execution.
pub struct Interpreter {
    pub(crate) bytecode: Vec<u8>,
    pub(crate) calldata: Vec<u8>,
    jump_dests: HashSet<usize>,
    pub(crate) state: MachineState,
    pub(crate) trace: Trace,
    pub(crate) host: Box<dyn Host>,
}

/// `Host` is a trait object here and has no `Debug` impl of its own, so this
/// is hand-written rather than derived; it prints everything but `host`.
impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("bytecode", &self.bytecode)
            .field("calldata", &self.calldata)
            .field("jump_dests", &self.jump_dests)
            .field("state", &self.state)
            .field("trace", &self.trace)
            .field("host", &"<dyn Host>")
            .finish()
    }
}

impl Interpreter {
    /// Builds a fresh interpreter from `config`. The jump-destination set is
    /// computed once, up front, and never recomputed.
    pub fn new(config: InterpreterConfig) -> Self {
        let jump_dests = jumpdest::analyze(&config.bytecode);
        Self {
            bytecode: config.bytecode,
            calldata: config.calldata,
            jump_dests,
            state: MachineState::new(config.initial_gas),
            trace: Trace::new(),
            host: config.host,
        }
    }

    /// The current machine state.
    pub fn get_state(&self) -> &MachineState {
        &self.state
    }

    /// The current stack.
    pub fn get_stack(&self) -> &Stack {
        &self.state.stack
    }

    /// The trace recorded so far.
    pub fn get_trace(&self) -> &Trace {
        &self.trace
    }

    /// `true` once execution has reached a terminal state.
    pub fn is_halted(&self) -> bool {
        self.state.is_halted()
    }

    /// The halt reason, if execution has halted.
    pub fn get_halt_reason(&self) -> Option<HaltReason> {
        self.state.halt_reason()
    }

    /// Mutable access to the host capability this interpreter executes
    /// against, for callers that need to inspect accumulated storage/log
    /// side effects after a run.
    pub fn host_mut(&mut self) -> &mut dyn Host {
        self.host.as_mut()
    }

    /// Runs `step()` until it returns `false`.
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Executes exactly one opcode.
    ///
    /// Returns `false` if execution was already halted, or became halted as
    /// a result of this step; `true` if execution may continue.
    pub fn step(&mut self) -> bool {
        if self.state.is_halted() {
            return false;
        }

        if self.state.pc >= self.bytecode.len() {
            self.record_halt(HaltReason::Stop);
            return false;
        }

        let opcode = self.bytecode[self.state.pc];
        let pc = self.state.pc;
        let gas_remaining = self.state.gas_remaining;
        self.trace.record(
            pc,
            gas_remaining,
            TraceEventKind::OpcodeStart {
                opcode,
                name: opcode::mnemonic(opcode),
            },
        );

        self.dispatch(opcode);

        !self.state.is_halted()
    }

    fn dispatch(&mut self, opcode: u8) {
        use crate::instructions::*;

        if opcode::is_push(opcode) {
            return stack_ops::push_n(self, opcode::push_bytes(opcode));
        }
        if opcode::is_dup(opcode) {
            return stack_ops::dup_n(self, opcode::dup_index(opcode));
        }
        if opcode::is_swap(opcode) {
            return stack_ops::swap_n(self, opcode::swap_index(opcode));
        }
        if opcode::is_log(opcode) {
            return log::log_n(self, opcode::log_topic_count(opcode));
        }

        match opcode {
            opcode::STOP => control::stop(self),
            opcode::ADD => arithmetic::add(self),
            opcode::MUL => arithmetic::mul(self),
            opcode::SUB => arithmetic::sub(self),
            opcode::DIV => arithmetic::div(self),
            opcode::POP => stack_ops::pop(self),
            opcode::MLOAD => memory_ops::mload(self),
            opcode::MSTORE => memory_ops::mstore(self),
            opcode::MSTORE8 => memory_ops::mstore8(self),
            opcode::MSIZE => memory_ops::msize(self),
            opcode::SLOAD => storage::sload(self),
            opcode::SSTORE => storage::sstore(self),
            opcode::JUMP => control::jump(self),
            opcode::JUMPI => control::jumpi(self),
            opcode::JUMPDEST => control::jumpdest(self),
            opcode::PC => control::pc(self),
            opcode::CALLDATALOAD => data::calldataload(self),
            opcode::CALLDATASIZE => data::calldatasize(self),
            opcode::CALLDATACOPY => data::calldatacopy(self),
            opcode::RETURN => control::return_(self),
            opcode::REVERT => control::revert(self),
            opcode::INVALID => self.record_halt(HaltReason::InvalidInstruction),
            _ => self.record_halt(HaltReason::InvalidOpcode),
        }
    }

    // --- shared helpers used by `instructions::*` handlers ---

    pub(crate) fn is_valid_jump_dest(&self, target: usize) -> bool {
        self.jump_dests.contains(&target)
    }

    pub(crate) fn record_gas_charge(&mut self, amount: u64, reason: &str) {
        let pc = self.state.pc;
        let gas_remaining = self.state.gas_remaining;
        self.trace.record(
            pc,
            gas_remaining,
            TraceEventKind::GasCharge {
                amount,
                reason: reason.to_owned(),
            },
        );
    }

    pub(crate) fn record_stack_pop(&mut self, value: Word256) {
        let pc = self.state.pc;
        let gas_remaining = self.state.gas_remaining;
        self.trace
            .record(pc, gas_remaining, TraceEventKind::StackPop { value });
    }

    pub(crate) fn record_stack_push(&mut self, value: Word256) {
        let pc = self.state.pc;
        let gas_remaining = self.state.gas_remaining;
        self.trace
            .record(pc, gas_remaining, TraceEventKind::StackPush { value });
    }

    pub(crate) fn record_memory_write(&mut self, offset: usize, data: Vec<u8>) {
        let pc = self.state.pc;
        let gas_remaining = self.state.gas_remaining;
        self.trace
            .record(pc, gas_remaining, TraceEventKind::MemoryWrite { offset, data });
    }

    pub(crate) fn record_memory_read(&mut self, offset: usize, length: usize) {
        let pc = self.state.pc;
        let gas_remaining = self.state.gas_remaining;
        self.trace
            .record(pc, gas_remaining, TraceEventKind::MemoryRead { offset, length });
    }

    pub(crate) fn record_storage_read(&mut self, address: primitives::Address, key: Word256, value: Word256) {
        let pc = self.state.pc;
        let gas_remaining = self.state.gas_remaining;
        self.trace.record(
            pc,
            gas_remaining,
            TraceEventKind::StorageRead { address, key, value },
        );
    }

    pub(crate) fn record_storage_write(&mut self, address: primitives::Address, key: Word256, value: Word256) {
        let pc = self.state.pc;
        let gas_remaining = self.state.gas_remaining;
        self.trace.record(
            pc,
            gas_remaining,
            TraceEventKind::StorageWrite { address, key, value },
        );
    }

    pub(crate) fn record_jump(&mut self, from: usize, to: usize, conditional: bool, taken: bool) {
        let pc = self.state.pc;
        let gas_remaining = self.state.gas_remaining;
        self.trace.record(
            pc,
            gas_remaining,
            TraceEventKind::Jump {
                from,
                to,
                conditional,
                taken,
            },
        );
    }

    pub(crate) fn record_log(&mut self, address: primitives::Address, topics: Vec<Word256>, data: Vec<u8>) {
        let pc = self.state.pc;
        let gas_remaining = self.state.gas_remaining;
        self.trace
            .record(pc, gas_remaining, TraceEventKind::Log { address, topics, data });
    }

    /// Marks the state halted with `reason` (a no-op if already halted) and
    /// records the terminal `Halt` event, reading back whichever reason
    /// actually won (so a deliberate `OutOfGas` halt already applied by
    /// [`MachineState::charge_gas`] is reported consistently).
    pub(crate) fn record_halt(&mut self, reason: HaltReason) {
        self.state.halt(reason);
        let pc = self.state.pc;
        let gas_remaining = self.state.gas_remaining;
        let reason = self.state.halt_reason().expect("just halted");
        self.trace
            .record(pc, gas_remaining, TraceEventKind::Halt { reason });
    }

    /// Translates a [`StackError`] into the matching halt reason and records
    /// it, per the crate's error-translation contract: typed stack errors
    /// never escape the interpreter.
    pub(crate) fn halt_from_stack_error(&mut self, error: StackError) {
        let reason = match error {
            StackError::Underflow => HaltReason::StackUnderflow,
            StackError::Overflow => HaltReason::StackOverflow,
        };
        self.record_halt(reason);
    }

    /// Converts a `Word256` offset/length operand to `usize`, halting with
    /// `OutOfGas` if it does not fit. No realistic gas budget could ever
    /// pay for the memory expansion such a value would demand, so this is
    /// treated the same as genuine gas exhaustion rather than a distinct
    /// error.
    pub(crate) fn word_to_usize_or_halt(&mut self, value: Word256) -> Option<usize> {
        match value.to_usize() {
            Some(v) => Some(v),
            None => {
                self.record_halt(HaltReason::OutOfGas);
                None
            }
        }
    }
}
