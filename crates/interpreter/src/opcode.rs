//! Opcode byte values, mnemonic decoding, and `PUSH` immediate-size
//! extraction.

pub const STOP: u8 = 0x00;
pub const ADD: u8 = 0x01;
pub const MUL: u8 = 0x02;
pub const SUB: u8 = 0x03;
pub const DIV: u8 = 0x04;
pub const POP: u8 = 0x50;
pub const MLOAD: u8 = 0x51;
pub const MSTORE: u8 = 0x52;
pub const MSTORE8: u8 = 0x53;
pub const SLOAD: u8 = 0x54;
pub const SSTORE: u8 = 0x55;
pub const JUMP: u8 = 0x56;
pub const JUMPI: u8 = 0x57;
pub const PC: u8 = 0x58;
pub const MSIZE: u8 = 0x59;
pub const JUMPDEST: u8 = 0x5B;
pub const PUSH1: u8 = 0x60;
pub const PUSH32: u8 = 0x7F;
pub const DUP1: u8 = 0x80;
pub const DUP16: u8 = 0x8F;
pub const SWAP1: u8 = 0x90;
pub const SWAP16: u8 = 0x9F;
pub const CALLDATALOAD: u8 = 0x35;
pub const CALLDATASIZE: u8 = 0x36;
pub const CALLDATACOPY: u8 = 0x37;
pub const LOG0: u8 = 0xA0;
pub const LOG4: u8 = 0xA4;
pub const RETURN: u8 = 0xF3;
pub const REVERT: u8 = 0xFD;
pub const INVALID: u8 = 0xFE;

/// Returns `true` if `opcode` is one of `PUSH1`..`PUSH32`.
#[inline]
pub fn is_push(opcode: u8) -> bool {
    (PUSH1..=PUSH32).contains(&opcode)
}

/// Returns `true` if `opcode` is one of `DUP1`..`DUP16`.
#[inline]
pub fn is_dup(opcode: u8) -> bool {
    (DUP1..=DUP16).contains(&opcode)
}

/// Returns `true` if `opcode` is one of `SWAP1`..`SWAP16`.
#[inline]
pub fn is_swap(opcode: u8) -> bool {
    (SWAP1..=SWAP16).contains(&opcode)
}

/// Returns `true` if `opcode` is one of `LOG0`..`LOG4`.
#[inline]
pub fn is_log(opcode: u8) -> bool {
    (LOG0..=LOG4).contains(&opcode)
}

/// The number of immediate bytes a `PUSH` opcode consumes, i.e.
/// `opcode - 0x5F`. Only meaningful when [`is_push`] is `true`.
#[inline]
pub fn push_bytes(opcode: u8) -> usize {
    (opcode - 0x5F) as usize
}

/// The 1-indexed `DUP`/`SWAP` operand, i.e. `opcode - 0x7F` for `DUP` and
/// `opcode - 0x8F` for `SWAP`. Only meaningful when [`is_dup`]/[`is_swap`]
/// is `true`.
#[inline]
pub fn dup_index(opcode: u8) -> usize {
    (opcode - 0x7F) as usize
}

#[inline]
pub fn swap_index(opcode: u8) -> usize {
    (opcode - 0x8F) as usize
}

/// The topic count of a `LOG0`..`LOG4` opcode, i.e. `opcode - 0xA0`. Only
/// meaningful when [`is_log`] is `true`.
#[inline]
pub fn log_topic_count(opcode: u8) -> usize {
    (opcode - LOG0) as usize
}

/// Renders `opcode`'s canonical mnemonic, matching the trace wire format:
/// `PUSH<n>`/`DUP<n>`/`SWAP<n>` for their respective ranges, a fixed name
/// for every other recognized opcode, and `UNKNOWN(0xNN)` otherwise.
pub fn mnemonic(opcode: u8) -> String {
    if is_push(opcode) {
        return std::format!("PUSH{}", push_bytes(opcode));
    }
    if is_dup(opcode) {
        return std::format!("DUP{}", dup_index(opcode));
    }
    if is_swap(opcode) {
        return std::format!("SWAP{}", swap_index(opcode));
    }
    if is_log(opcode) {
        return std::format!("LOG{}", log_topic_count(opcode));
    }

    let name = match opcode {
        STOP => "STOP",
        ADD => "ADD",
        MUL => "MUL",
        SUB => "SUB",
        DIV => "DIV",
        POP => "POP",
        MLOAD => "MLOAD",
        MSTORE => "MSTORE",
        MSTORE8 => "MSTORE8",
        SLOAD => "SLOAD",
        SSTORE => "SSTORE",
        JUMP => "JUMP",
        JUMPI => "JUMPI",
        PC => "PC",
        MSIZE => "MSIZE",
        JUMPDEST => "JUMPDEST",
        CALLDATALOAD => "CALLDATALOAD",
        CALLDATASIZE => "CALLDATASIZE",
        CALLDATACOPY => "CALLDATACOPY",
        RETURN => "RETURN",
        REVERT => "REVERT",
        INVALID => "INVALID",
        _ => return std::format!("UNKNOWN(0x{opcode:02X})"),
    };
    name.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_mnemonic_and_byte_count() {
        assert_eq!(mnemonic(PUSH1), "PUSH1");
        assert_eq!(push_bytes(PUSH1), 1);
        assert_eq!(mnemonic(PUSH32), "PUSH32");
        assert_eq!(push_bytes(PUSH32), 32);
    }

    #[test]
    fn dup_and_swap_mnemonics() {
        assert_eq!(mnemonic(DUP1), "DUP1");
        assert_eq!(dup_index(DUP1), 1);
        assert_eq!(mnemonic(SWAP16), "SWAP16");
        assert_eq!(swap_index(SWAP16), 16);
    }

    #[test]
    fn log_mnemonic_and_topic_count() {
        assert_eq!(mnemonic(LOG0), "LOG0");
        assert_eq!(log_topic_count(LOG0), 0);
        assert_eq!(mnemonic(LOG4), "LOG4");
        assert_eq!(log_topic_count(LOG4), 4);
    }

    #[test]
    fn unknown_byte_is_unknown() {
        assert_eq!(mnemonic(0x0C), "UNKNOWN(0x0C)");
    }
}
