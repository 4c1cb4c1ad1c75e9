use super::gas_cost;
use crate::interpreter::Interpreter;

pub(crate) fn sload(interp: &mut Interpreter) {
    gas!(interp, gas_cost::SLOAD, "SLOAD");
    pop!(interp, key);

    let address = interp.host.get_address();
    let value = interp.host.sload(address, key);
    interp.record_storage_read(address, key, value);

    push!(interp, value);
    interp.state.pc += 1;
}

/// `SSTORE`'s cost is entirely the dynamic zero/non-zero transition charge,
/// so the gas charge happens after popping and after consulting the host
/// for the slot's current value, rather than as a fixed up-front baseline.
pub(crate) fn sstore(interp: &mut Interpreter) {
    pop!(interp, key, value);

    let address = interp.host.get_address();
    let old_value = interp.host.sload(address, key);
    let amount = if old_value.is_zero() && !value.is_zero() {
        gas_cost::SSTORE_SET
    } else {
        gas_cost::SSTORE_RESET
    };
    gas!(interp, amount, "SSTORE");

    interp.record_storage_write(address, key, value);
    interp.host.sstore(address, key, value);
    interp.state.pc += 1;
}
