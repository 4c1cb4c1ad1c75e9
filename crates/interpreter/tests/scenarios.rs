//! End-to-end scenarios exercising the fetch/dispatch/record loop against
//! literal bytecode, mirroring the reference table of golden traces this
//! interpreter is checked against.

use primitives::{Address, Word256};
use rstest::rstest;

use evmtrace_interpreter::{HaltReason, Host, Interpreter, InterpreterConfig, MemoryHost, TraceEventKind};

fn run(bytecode: Vec<u8>, initial_gas: u64, calldata: Vec<u8>) -> Interpreter {
    let host = MemoryHost::new(Address::ZERO);
    let mut interp = Interpreter::new(InterpreterConfig {
        bytecode,
        initial_gas,
        calldata,
        host: Box::new(host),
    });
    interp.run();
    interp
}

/// A zero-padded 32-byte word whose low bytes are `suffix`, matching the
/// right-zero-padding `CALLDATALOAD` produces past the end of calldata.
fn word_with_suffix(suffix: &[u8]) -> Word256 {
    let mut bytes = [0u8; 32];
    bytes[..suffix.len()].copy_from_slice(suffix);
    Word256::from_be_bytes(bytes)
}

#[rstest]
// 1: (5 + 3) -> 8
#[case::add(vec![0x60, 0x05, 0x60, 0x03, 0x01, 0x00], vec![], 1_000_000, HaltReason::Stop, Some(Word256::from_u64(8)), None, None)]
// 2: ((10 + 5) * 2) - (20 / 4) = 25
#[case::compound_arithmetic(
    vec![0x60, 0x0a, 0x60, 0x05, 0x01, 0x60, 0x02, 0x02, 0x60, 0x14, 0x60, 0x04, 0x04, 0x03, 0x00],
    vec![], 1_000_000, HaltReason::Stop, Some(Word256::from_u64(25)), None, None,
)]
// 3: MAX_UINT256 + 1 wraps to 0
#[case::add_wraps_to_zero(
    {
        let mut bc = vec![0x7f];
        bc.extend(std::iter::repeat(0xFFu8).take(32));
        bc.extend([0x60, 0x01, 0x01, 0x00]);
        bc
    },
    vec![], 1_000_000, HaltReason::Stop, Some(Word256::ZERO), None, None,
)]
// 4: out of gas mid-handler; no STOP, gas budget only covers 2 PUSHes
#[case::out_of_gas_mid_handler(vec![0x60, 0x05, 0x60, 0x03, 0x01], vec![], 7, HaltReason::OutOfGas, None, Some(1), None)]
// 5: ADD with only one operand on the stack
#[case::stack_underflow(vec![0x60, 0x05, 0x01], vec![], 1_000_000, HaltReason::StackUnderflow, None, None, None)]
// 6: JUMP to position 4, which is a PUSH1 opcode byte, not a JUMPDEST
#[case::invalid_jump_target(
    vec![0x60, 0x04, 0x56, 0x00, 0x60, 0x42, 0x00],
    vec![], 1_000_000, HaltReason::InvalidJump, None, None, None,
)]
// 7: JUMPDEST is a no-op once reached by straight-line execution
#[case::jumpdest_is_a_no_op(
    vec![0x60, 0x05, 0x5b, 0x60, 0x03, 0x01, 0x00],
    vec![], 1_000_000, HaltReason::Stop, Some(Word256::from_u64(8)), None, None,
)]
// 8: RETURN copies memory into returnData
#[case::return_copies_memory(
    vec![0x60, 0x2a, 0x60, 0x00, 0x52, 0x60, 0x20, 0x60, 0x00, 0xf3],
    vec![], 1_000_000, HaltReason::Return, None, None, Some(Word256::from_u64(0x2a).to_be_bytes().to_vec()),
)]
// 9: CALLDATALOAD past the end of calldata zero-pads on the right
#[case::calldataload_zero_pads_past_end(
    vec![0x60, 0x00, 0x35, 0x00],
    vec![0x01, 0x02, 0x03, 0x04], 1_000_000, HaltReason::Stop,
    Some(word_with_suffix(&[0x01, 0x02, 0x03, 0x04])), None, None,
)]
// 10: SSTORE then SLOAD of the same slot round-trips through the host
#[case::sstore_then_sload(
    vec![0x60, 0x2a, 0x60, 0x00, 0x55, 0x60, 0x00, 0x54, 0x00],
    vec![], 1_000_000, HaltReason::Stop, Some(Word256::from_u64(42)), None, None,
)]
fn scenario(
    #[case] bytecode: Vec<u8>,
    #[case] calldata: Vec<u8>,
    #[case] gas: u64,
    #[case] expected_halt: HaltReason,
    #[case] expected_top: Option<Word256>,
    #[case] expected_gas_remaining: Option<u64>,
    #[case] expected_return_data: Option<Vec<u8>>,
) {
    let mut interp = run(bytecode, gas, calldata);
    assert_eq!(interp.get_halt_reason(), Some(expected_halt));

    if let Some(expected) = expected_top {
        assert_eq!(interp.get_stack().peek(0).unwrap(), expected);
    }
    if let Some(expected) = expected_gas_remaining {
        assert_eq!(interp.get_state().gas_remaining, expected);
    }
    if let Some(expected) = expected_return_data {
        assert_eq!(interp.get_state().return_data, expected);
    }
}

#[test]
fn scenario_10_storage_mutation_is_visible_directly_on_the_host() {
    let bytecode = vec![
        0x60, 0x2a, // PUSH1 42
        0x60, 0x00, // PUSH1 0
        0x55, // SSTORE
        0x60, 0x00, // PUSH1 0
        0x54, // SLOAD
        0x00, // STOP
    ];
    let mut interp = run(bytecode, 1_000_000, vec![]);
    assert_eq!(interp.get_halt_reason(), Some(HaltReason::Stop));
    let value = interp.host_mut().sload(Address::ZERO, Word256::ZERO);
    assert_eq!(value, Word256::from_u64(42));
}

#[test]
fn scenario_1_trace_shape_and_total_gas() {
    let mut interp = run(vec![0x60, 0x05, 0x60, 0x03, 0x01, 0x00], 1_000_000, vec![]);

    let tags: Vec<&'static str> = interp.get_trace().events().iter().map(|e| e.kind.type_tag()).collect();
    assert_eq!(
        tags,
        vec![
            "opcode.start",
            "gas.charge",
            "stack.push",
            "opcode.start",
            "gas.charge",
            "stack.push",
            "opcode.start",
            "gas.charge",
            "stack.pop",
            "stack.pop",
            "stack.push",
            "opcode.start",
            "halt",
        ]
    );

    let total_charged: u64 = interp
        .get_trace()
        .events()
        .iter()
        .filter_map(|e| match &e.kind {
            TraceEventKind::GasCharge { amount, .. } => Some(*amount),
            _ => None,
        })
        .sum();
    assert_eq!(total_charged, 9);
    assert_eq!(1_000_000 - interp.get_state().gas_remaining, total_charged);

    for (i, event) in interp.get_trace().events().iter().enumerate() {
        assert_eq!(event.meta.index, i as u64);
    }
}

#[test]
fn jumpdest_byte_inside_push_immediate_is_not_a_valid_target() {
    // Position 5 holds the byte 0x5B, but only as PUSH1's immediate data
    // (the PUSH1 itself sits at position 4); jumping there must still fail.
    let bytecode = vec![0x60, 0x05, 0x56, 0x00, 0x60, 0x5b, 0x00];
    let mut interp = run(bytecode, 1_000_000, vec![]);
    assert_eq!(interp.get_halt_reason(), Some(HaltReason::InvalidJump));
}

#[test]
fn jump_then_halt_ordering_is_preserved_on_invalid_target() {
    let bytecode = vec![0x60, 0x63, 0x56]; // PUSH1 99, JUMP (way out of range)
    let mut interp = run(bytecode, 1_000_000, vec![]);
    let kinds: Vec<&'static str> = interp.get_trace().events().iter().map(|e| e.kind.type_tag()).collect();
    let jump_pos = kinds.iter().position(|t| *t == "jump").unwrap();
    let halt_pos = kinds.iter().position(|t| *t == "halt").unwrap();
    assert!(jump_pos < halt_pos);
    assert_eq!(interp.get_halt_reason(), Some(HaltReason::InvalidJump));
}

#[test]
fn pc_beyond_bytecode_halts_with_stop() {
    let mut interp = run(vec![0x60, 0x01], 1_000_000, vec![]); // PUSH1 1, then nothing
    assert_eq!(interp.get_halt_reason(), Some(HaltReason::Stop));
}

#[test]
fn invalid_opcode_byte_halts() {
    let mut interp = run(vec![0x0c, 0x00], 1_000_000, vec![]); // 0x0C is unassigned
    assert_eq!(interp.get_halt_reason(), Some(HaltReason::InvalidOpcode));
}

#[test]
fn explicit_invalid_opcode_is_distinguished() {
    let mut interp = run(vec![0xfe], 1_000_000, vec![]);
    assert_eq!(interp.get_halt_reason(), Some(HaltReason::InvalidInstruction));
}

#[test]
fn log_emits_to_host_in_order() {
    let bytecode = vec![
        0x60, 0x01, // PUSH1 1 (mstore value)
        0x60, 0x00, // PUSH1 0 (mstore offset)
        0x52, // MSTORE -> memory[0..32] = 0x..01
        0x60, 0x07, // PUSH1 7 (topic0, pushed first so it ends up deepest)
        0x60, 0x20, // PUSH1 32 (length)
        0x60, 0x00, // PUSH1 0 (offset, pushed last so it ends on top)
        0xa1, // LOG1
        0x00, // STOP
    ];
    let mut interp = run(bytecode, 1_000_000, vec![]);
    assert_eq!(interp.get_halt_reason(), Some(HaltReason::Stop));
    assert_eq!(interp.host_mut().get_logs().len(), 1);
    assert_eq!(interp.host_mut().get_logs()[0].topics[0], Word256::from_u64(7));
    assert_eq!(interp.host_mut().get_logs()[0].data.len(), 32);
}

#[test]
fn trace_round_trips_through_json() {
    let mut interp = run(vec![0x60, 0x05, 0x60, 0x03, 0x01, 0x00], 1_000_000, vec![]);
    let json = interp.get_trace().to_json().unwrap();
    let restored = evmtrace_interpreter::Trace::from_json(&json).unwrap();
    assert_eq!(restored.events(), interp.get_trace().events());
}
