use primitives::Word256;

use super::gas_cost;
use crate::interpreter::Interpreter;
use crate::machine_state::HaltReason;

/// `STOP`: zero gas, immediate terminal halt. No `GasCharge` event is
/// recorded — a zero-cost charge would be indistinguishable from one that
/// actually happened.
pub(crate) fn stop(interp: &mut Interpreter) {
    interp.record_halt(HaltReason::Stop);
}

/// `JUMPDEST`: a one-gas no-op marker; only meaningful as a jump target.
pub(crate) fn jumpdest(interp: &mut Interpreter) {
    gas!(interp, gas_cost::JUMPDEST, "JUMPDEST");
    interp.state.pc += 1;
}

/// `PC`: pushes the program counter of the `PC` instruction itself, i.e.
/// the value before this handler's own post-increment.
pub(crate) fn pc(interp: &mut Interpreter) {
    gas!(interp, gas_cost::BASE, "PC");
    let here = interp.state.pc;
    push!(interp, Word256::from(here));
    interp.state.pc += 1;
}

/// `JUMP`: unconditional jump. The `Jump` event is recorded before the
/// target is validated, so an invalid target still produces a `Jump` event
/// (with `taken=true`) followed by the terminal `InvalidJump` halt.
pub(crate) fn jump(interp: &mut Interpreter) {
    gas!(interp, gas_cost::JUMP, "JUMP");
    pop!(interp, dest);

    let from = interp.state.pc;
    // A destination that overflows `usize` can never be a member of the
    // (bytecode-length-bounded) jump destination set either way, so it
    // saturates into the same `InvalidJump` path rather than a distinct
    // out-of-gas halt.
    let to = dest.to_usize().unwrap_or(usize::MAX);
    interp.record_jump(from, to, false, true);

    if !interp.is_valid_jump_dest(to) {
        interp.record_halt(HaltReason::InvalidJump);
        return;
    }
    interp.state.pc = to;
}

/// `JUMPI`: conditional jump. Top of stack is the condition, popped before
/// the destination. A zero condition advances the program counter normally
/// without validating `dest` at all; a non-zero condition validates and
/// jumps exactly as `JUMP` does.
pub(crate) fn jumpi(interp: &mut Interpreter) {
    gas!(interp, gas_cost::JUMPI, "JUMPI");
    pop!(interp, condition, dest);

    let from = interp.state.pc;
    let to = dest.to_usize().unwrap_or(usize::MAX);
    let taken = !condition.is_zero();
    interp.record_jump(from, to, true, taken);

    if !taken {
        interp.state.pc += 1;
        return;
    }
    if !interp.is_valid_jump_dest(to) {
        interp.record_halt(HaltReason::InvalidJump);
        return;
    }
    interp.state.pc = to;
}

/// `RETURN`: copies `length` bytes of memory starting at `offset` into
/// `returnData` and halts successfully.
pub(crate) fn return_(interp: &mut Interpreter) {
    pop!(interp, offset, length);
    let Some(offset) = interp.word_to_usize_or_halt(offset) else {
        return;
    };
    let Some(length) = interp.word_to_usize_or_halt(length) else {
        return;
    };
    expand_memory!(interp, offset, length, "RETURN_MEMORY_EXPANSION");

    interp.record_memory_read(offset, length);
    interp.state.return_data = interp.state.memory.load(offset, length);
    interp.record_halt(HaltReason::Return);
}

/// `REVERT`: identical mechanics to `RETURN`, but halts with `Revert`.
pub(crate) fn revert(interp: &mut Interpreter) {
    pop!(interp, offset, length);
    let Some(offset) = interp.word_to_usize_or_halt(offset) else {
        return;
    };
    let Some(length) = interp.word_to_usize_or_halt(length) else {
        return;
    };
    expand_memory!(interp, offset, length, "REVERT_MEMORY_EXPANSION");

    interp.record_memory_read(offset, length);
    interp.state.return_data = interp.state.memory.load(offset, length);
    interp.record_halt(HaltReason::Revert);
}
