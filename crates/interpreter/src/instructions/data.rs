use primitives::Word256;

use super::gas_cost;
use crate::interpreter::Interpreter;

/// Reads up to 32 bytes from `calldata` starting at `offset`, zero-padding
/// bytes that fall past the end. Never panics: `offset` itself may already
/// be past the end of `calldata`.
fn read_calldata_window(calldata: &[u8], offset: usize, length: usize) -> Vec<u8> {
    let mut out = vec![0u8; length];
    for (i, slot) in out.iter_mut().enumerate() {
        if let Some(src) = offset.checked_add(i) {
            if let Some(&byte) = calldata.get(src) {
                *slot = byte;
            }
        }
    }
    out
}

/// `CALLDATALOAD`: reads 32 big-endian bytes from calldata at `offset`;
/// bytes past the end of calldata read as zero.
pub(crate) fn calldataload(interp: &mut Interpreter) {
    gas!(interp, gas_cost::VERYLOW, "CALLDATALOAD");
    pop!(interp, offset);
    let Some(offset) = interp.word_to_usize_or_halt(offset) else {
        return;
    };

    let bytes = read_calldata_window(&interp.calldata, offset, 32);
    let mut array = [0u8; 32];
    array.copy_from_slice(&bytes);
    push!(interp, Word256::from_be_bytes(array));
    interp.state.pc += 1;
}

/// `CALLDATASIZE`: pushes the byte length of the calldata supplied at
/// construction.
pub(crate) fn calldatasize(interp: &mut Interpreter) {
    gas!(interp, gas_cost::BASE, "CALLDATASIZE");
    push!(interp, Word256::from(interp.calldata.len()));
    interp.state.pc += 1;
}

/// `CALLDATACOPY`: copies `length` bytes from calldata at `srcOffset` into
/// memory at `destOffset`, zero-padding past the end of calldata. Charges a
/// flat per-word copy cost in addition to the baseline and memory
/// expansion.
pub(crate) fn calldatacopy(interp: &mut Interpreter) {
    gas!(interp, gas_cost::VERYLOW, "CALLDATACOPY");
    pop!(interp, dest_offset, src_offset, length);

    let Some(dest_offset) = interp.word_to_usize_or_halt(dest_offset) else {
        return;
    };
    let Some(length) = interp.word_to_usize_or_halt(length) else {
        return;
    };
    // `srcOffset` only ever gates a zero-padded read, never memory growth or
    // gas, so an out-of-range value saturates rather than halting.
    let src_offset = src_offset.to_usize().unwrap_or(usize::MAX);

    let word_count = (length as u64).div_ceil(32);
    let copy_cost = gas_cost::CALLDATACOPY_PER_WORD * word_count;
    if copy_cost > 0 {
        gas!(interp, copy_cost, "CALLDATACOPY_WORD_COPY");
    }

    expand_memory!(interp, dest_offset, length, "CALLDATACOPY_MEMORY_EXPANSION");

    let data = read_calldata_window(&interp.calldata, src_offset, length);
    interp.state.memory.store(dest_offset, &data);
    interp.record_memory_write(dest_offset, data);
    interp.state.pc += 1;
}
