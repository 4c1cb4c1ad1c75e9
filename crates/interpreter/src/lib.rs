//! A deterministic, step-wise interpreter for a faithful subset of EVM
//! bytecode whose distinguishing feature is observability: every
//! semantically meaningful action taken during execution is recorded as a
//! structured, append-only [`trace::TraceEvent`] suitable for offline
//! replay.
//!
//! The core building blocks, leaves first:
//! - [`stack::Stack`] and [`memory::Memory`]: the bounded operand stack and
//!   the expandable, word-aligned byte region.
//! - [`machine_state::MachineState`]: program counter, gas budget, and halt
//!   status, tying the two together.
//! - [`trace::Trace`]: the append-only event collector.
//! - [`host::Host`]: the pluggable storage/log capability, with
//!   [`host::MemoryHost`] as a reference in-memory implementation.
//! - [`opcode`] and [`jumpdest`]: mnemonic decoding and the one-pass
//!   jump-destination pre-analysis.
//! - [`instructions`]: one handler module per opcode family.
//! - [`interpreter::Interpreter`]: the fetch/dispatch/record loop tying
//!   everything together.

#[macro_use]
mod macros;

mod host;
mod instructions;
mod interpreter;
mod jumpdest;
mod machine_state;
mod memory;
mod opcode;
mod stack;
mod trace;

pub use host::{Host, LogRecord, MemoryHost};
pub use interpreter::{Interpreter, InterpreterConfig};
pub use machine_state::{HaltReason, MachineState};
pub use memory::Memory;
pub use opcode::mnemonic as opcode_mnemonic;
pub use stack::{Stack, StackError, STACK_LIMIT};
pub use trace::{EventMeta, Trace, TraceEvent, TraceEventKind};
