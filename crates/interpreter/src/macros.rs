//! Local helper macros used by the `instructions` handlers. Each aborts the
//! current handler with `return` as soon as a fallible step fails; the
//! `Interpreter` is left halted with the appropriate reason, and the
//! caller's `step()` loop observes that via `is_halted()`.

/// Charges `$amount` gas, recording a `GasCharge` event, and returns from
/// the enclosing handler if the budget was exceeded.
macro_rules! gas {
    ($interp:expr, $amount:expr, $reason:expr) => {{
        let amount = $amount;
        if $interp.state.charge_gas(amount).is_err() {
            $interp.record_halt($crate::machine_state::HaltReason::OutOfGas);
            return;
        }
        $interp.record_gas_charge(amount, $reason);
    }};
}

/// Expands memory for `(offset, length)`, charging the incremental cost as
/// a `GasCharge` event, and returns from the enclosing handler on
/// out-of-gas.
macro_rules! expand_memory {
    ($interp:expr, $offset:expr, $length:expr, $reason:expr) => {{
        match $interp.state.expand_memory($offset, $length) {
            Ok(cost) => {
                if cost > 0 {
                    $interp.record_gas_charge(cost, $reason);
                }
            }
            Err(_) => {
                $interp.record_halt($crate::machine_state::HaltReason::OutOfGas);
                return;
            }
        }
    }};
}

/// Pops one or more values off the stack, in order, binding each to the
/// given identifier and recording a `StackPop` event per item. Returns from
/// the enclosing handler on underflow.
macro_rules! pop {
    ($interp:expr, $($var:ident),+ $(,)?) => {
        $(
            let $var = match $interp.state.stack.pop() {
                Ok(v) => v,
                Err(e) => {
                    $interp.halt_from_stack_error(e);
                    return;
                }
            };
            $interp.record_stack_pop($var);
        )+
    };
}

/// Pushes `$value` onto the stack, recording a `StackPush` event. Returns
/// from the enclosing handler on overflow.
macro_rules! push {
    ($interp:expr, $value:expr) => {{
        let value = $value;
        if let Err(e) = $interp.state.stack.push(value) {
            $interp.halt_from_stack_error(e);
            return;
        }
        $interp.record_stack_push(value);
    }};
}
