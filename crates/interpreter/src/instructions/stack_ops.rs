use primitives::Word256;

use super::gas_cost;
use crate::interpreter::Interpreter;

pub(crate) fn pop(interp: &mut Interpreter) {
    gas!(interp, gas_cost::BASE, "POP");
    pop!(interp, _value);
    interp.state.pc += 1;
}

/// `PUSHn`: reads the `n` bytes immediately following the opcode,
/// big-endian, zero-extending on the right (the low end) if the bytecode
/// ends before `n` bytes are available.
pub(crate) fn push_n(interp: &mut Interpreter, n: usize) {
    gas!(interp, gas_cost::VERYLOW, "PUSH");

    let start = interp.state.pc + 1;
    let window_start = 32 - n;
    let mut bytes = [0u8; 32];
    for i in 0..n {
        let src = start + i;
        if src < interp.bytecode.len() {
            bytes[window_start + i] = interp.bytecode[src];
        }
    }

    push!(interp, Word256::from_be_bytes(bytes));
    interp.state.pc += 1 + n;
}

/// `DUPn`: duplicates the value at depth `n - 1` onto the top of the stack.
pub(crate) fn dup_n(interp: &mut Interpreter, n: usize) {
    gas!(interp, gas_cost::VERYLOW, "DUP");

    if let Err(e) = interp.state.stack.dup(n) {
        interp.halt_from_stack_error(e);
        return;
    }
    let value = interp
        .state
        .stack
        .peek(0)
        .expect("dup just pushed a value");
    interp.record_stack_push(value);
    interp.state.pc += 1;
}

/// `SWAPn`: exchanges the top of the stack with the value `n` slots below
/// it. Neither value leaves the stack, so no `StackPush`/`StackPop` events
/// are recorded beyond the gas charge.
pub(crate) fn swap_n(interp: &mut Interpreter, n: usize) {
    gas!(interp, gas_cost::VERYLOW, "SWAP");

    if let Err(e) = interp.state.stack.swap(n) {
        interp.halt_from_stack_error(e);
        return;
    }
    interp.state.pc += 1;
}
