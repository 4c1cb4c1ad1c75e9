use primitives::Word256;

use super::gas_cost;
use crate::interpreter::Interpreter;

pub(crate) fn mload(interp: &mut Interpreter) {
    gas!(interp, gas_cost::VERYLOW, "MLOAD");
    pop!(interp, offset);
    let Some(offset) = interp.word_to_usize_or_halt(offset) else {
        return;
    };
    expand_memory!(interp, offset, 32, "MLOAD_MEMORY_EXPANSION");
    interp.record_memory_read(offset, 32);
    push!(interp, interp.state.memory.load_word(offset));
    interp.state.pc += 1;
}

pub(crate) fn mstore(interp: &mut Interpreter) {
    gas!(interp, gas_cost::VERYLOW, "MSTORE");
    pop!(interp, offset, value);
    let Some(offset) = interp.word_to_usize_or_halt(offset) else {
        return;
    };
    expand_memory!(interp, offset, 32, "MSTORE_MEMORY_EXPANSION");
    let bytes = value.to_be_bytes();
    interp.state.memory.store(offset, &bytes);
    interp.record_memory_write(offset, bytes.to_vec());
    interp.state.pc += 1;
}

pub(crate) fn mstore8(interp: &mut Interpreter) {
    gas!(interp, gas_cost::VERYLOW, "MSTORE8");
    pop!(interp, offset, value);
    let Some(offset) = interp.word_to_usize_or_halt(offset) else {
        return;
    };
    expand_memory!(interp, offset, 1, "MSTORE8_MEMORY_EXPANSION");
    let byte = value.byte_at(31);
    interp.state.memory.store_byte(offset, byte);
    interp.record_memory_write(offset, std::vec![byte]);
    interp.state.pc += 1;
}

pub(crate) fn msize(interp: &mut Interpreter) {
    gas!(interp, gas_cost::BASE, "MSIZE");
    push!(interp, Word256::from(interp.state.memory.len()));
    interp.state.pc += 1;
}
