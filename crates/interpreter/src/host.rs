//! The capability surface an [`crate::Interpreter`] needs from its
//! surrounding environment: persistent storage and log emission.

use primitives::{Address, Word256};

/// One `LOG0`..`LOG4` emission, as recorded by a [`Host`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// The emitting contract's address.
    pub address: Address,
    /// Declared-order topics (0 to 4 of them).
    pub topics: Vec<Word256>,
    /// The logged data.
    pub data: Vec<u8>,
}

/// External capabilities required to execute bytecode: persistent
/// key/value storage scoped to a contract address, log emission, and the
/// identity of the contract currently executing.
///
/// Implementations are free to back this with anything: an in-memory map
/// for testing and replay (see [`MemoryHost`]), or a real state database.
pub trait Host {
    /// Reads the value at `key` in `address`'s storage. Unset keys read as
    /// [`Word256::ZERO`].
    fn sload(&mut self, address: Address, key: Word256) -> Word256;

    /// Writes `value` at `key` in `address`'s storage.
    fn sstore(&mut self, address: Address, key: Word256, value: Word256);

    /// Appends a log record.
    fn log(&mut self, record: LogRecord);

    /// Returns every log record appended so far, in emission order.
    fn get_logs(&self) -> &[LogRecord];

    /// The address of the contract currently executing.
    fn get_address(&self) -> Address;
}

/// A reference [`Host`] backed by an in-memory, per-address storage map.
///
/// Storage reads default to zero; writing [`Word256::ZERO`] to a key
/// removes it from the underlying map rather than storing an explicit
/// zero, keeping the map's size proportional to the number of non-zero
/// slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    address: Address,
    storage: std::collections::HashMap<(Address, Word256), Word256>,
    logs: Vec<LogRecord>,
}

impl MemoryHost {
    /// Creates a host executing as `address` with empty storage and no
    /// logs recorded yet.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            storage: std::collections::HashMap::new(),
            logs: Vec::new(),
        }
    }

    /// Directly inspects the value stored at `(address, key)`, bypassing
    /// the interpreter. Returns [`Word256::ZERO`] for unset keys.
    pub fn peek_storage(&self, address: Address, key: Word256) -> Word256 {
        self.storage
            .get(&(address, key))
            .copied()
            .unwrap_or(Word256::ZERO)
    }
}

impl Host for MemoryHost {
    fn sload(&mut self, address: Address, key: Word256) -> Word256 {
        self.peek_storage(address, key)
    }

    fn sstore(&mut self, address: Address, key: Word256, value: Word256) {
        if value.is_zero() {
            self.storage.remove(&(address, key));
        } else {
            self.storage.insert((address, key), value);
        }
    }

    fn log(&mut self, record: LogRecord) {
        self.logs.push(record);
    }

    fn get_logs(&self) -> &[LogRecord] {
        &self.logs
    }

    fn get_address(&self) -> Address {
        self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_key_reads_as_zero() {
        let mut host = MemoryHost::new(Address::ZERO);
        assert_eq!(host.sload(Address::ZERO, Word256::from_u64(1)), Word256::ZERO);
    }

    #[test]
    fn store_then_load_round_trips() {
        let mut host = MemoryHost::new(Address::ZERO);
        let key = Word256::from_u64(7);
        let value = Word256::from_u64(42);
        host.sstore(Address::ZERO, key, value);
        assert_eq!(host.sload(Address::ZERO, key), value);
    }

    #[test]
    fn storing_zero_clears_the_slot() {
        let mut host = MemoryHost::new(Address::ZERO);
        let key = Word256::from_u64(7);
        host.sstore(Address::ZERO, key, Word256::from_u64(1));
        host.sstore(Address::ZERO, key, Word256::ZERO);
        assert_eq!(host.peek_storage(Address::ZERO, key), Word256::ZERO);
    }

    #[test]
    fn logs_accumulate_in_order() {
        let mut host = MemoryHost::new(Address::ZERO);
        host.log(LogRecord {
            address: Address::ZERO,
            topics: vec![Word256::from_u64(1)],
            data: vec![0xaa],
        });
        host.log(LogRecord {
            address: Address::ZERO,
            topics: vec![],
            data: vec![],
        });
        assert_eq!(host.get_logs().len(), 2);
        assert_eq!(host.get_logs()[0].topics[0], Word256::from_u64(1));
    }
}
