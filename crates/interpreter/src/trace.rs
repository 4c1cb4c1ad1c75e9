//! The append-only trace event pipeline: every semantically meaningful
//! action the interpreter takes is recorded here, in order, for offline
//! replay.

use primitives::{Address, Word256};
use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::machine_state::HaltReason;

/// Fields carried by every [`TraceEvent`], regardless of variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMeta {
    /// Monotonically increasing sequence number, starting at `0`.
    pub index: u64,
    /// The program counter at which the event was generated.
    pub pc: usize,
    /// The gas remaining at the moment the event was recorded.
    pub gas_remaining: u64,
}

/// One structured, append-only trace event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// Fields shared by every variant.
    pub meta: EventMeta,
    /// The variant-specific payload.
    pub kind: TraceEventKind,
}

/// The variant-specific payload of a [`TraceEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEventKind {
    /// Emitted once per opcode fetch, before the handler runs.
    OpcodeStart {
        /// The raw opcode byte.
        opcode: u8,
        /// Its mnemonic (or `UNKNOWN(0xNN)` for an unrecognized byte).
        name: String,
    },
    /// Emitted for every value popped from the stack.
    StackPush {
        /// The value pushed.
        value: Word256,
    },
    /// Emitted for every value pushed onto the stack.
    StackPop {
        /// The value popped.
        value: Word256,
    },
    /// Emitted for every memory write.
    MemoryWrite {
        /// Byte offset written.
        offset: usize,
        /// The bytes written.
        data: Vec<u8>,
    },
    /// Emitted for every memory read.
    MemoryRead {
        /// Byte offset read.
        offset: usize,
        /// Number of bytes read.
        length: usize,
    },
    /// Emitted before a storage slot is read via `SLOAD`.
    StorageRead {
        /// The contract address whose storage was read.
        address: Address,
        /// The storage key.
        key: Word256,
        /// The value read.
        value: Word256,
    },
    /// Emitted before a storage slot is written via `SSTORE`, before the
    /// host mutation is committed.
    StorageWrite {
        /// The contract address whose storage was written.
        address: Address,
        /// The storage key.
        key: Word256,
        /// The value written.
        value: Word256,
    },
    /// Emitted for every gas deduction, static or dynamic.
    GasCharge {
        /// The amount charged.
        amount: u64,
        /// The mnemonic or cost category the charge is attributed to.
        reason: String,
    },
    /// Emitted by `JUMP`/`JUMPI`, even when the target turns out to be
    /// invalid (in which case `taken` is still `true` for `JUMP`, and the
    /// terminal `Halt{InvalidJump}` event follows).
    Jump {
        /// PC of the jump instruction.
        from: usize,
        /// The requested target.
        to: usize,
        /// `true` for `JUMPI`, `false` for `JUMP`.
        conditional: bool,
        /// Whether the jump was actually taken.
        taken: bool,
    },
    /// The terminal event of every execution.
    Halt {
        /// Why execution stopped.
        reason: HaltReason,
    },
    /// Emitted by `LOG0`..`LOG4`.
    Log {
        /// The emitting contract's address.
        address: Address,
        /// Declared-order topics.
        topics: Vec<Word256>,
        /// The logged data.
        data: Vec<u8>,
    },
}

impl TraceEventKind {
    /// The wire `type` tag used in trace JSON, e.g. `"stack.push"`.
    pub fn type_tag(&self) -> &'static str {
        match self {
            TraceEventKind::OpcodeStart { .. } => "opcode.start",
            TraceEventKind::StackPush { .. } => "stack.push",
            TraceEventKind::StackPop { .. } => "stack.pop",
            TraceEventKind::MemoryWrite { .. } => "memory.write",
            TraceEventKind::MemoryRead { .. } => "memory.read",
            TraceEventKind::StorageRead { .. } => "storage.read",
            TraceEventKind::StorageWrite { .. } => "storage.write",
            TraceEventKind::GasCharge { .. } => "gas.charge",
            TraceEventKind::Jump { .. } => "jump",
            TraceEventKind::Halt { .. } => "halt",
            TraceEventKind::Log { .. } => "log",
        }
    }
}

fn hex_bytes(data: &[u8]) -> String {
    std::format!("0x{}", hex::encode(data))
}

fn halt_reason_from_wire(s: &str) -> Option<HaltReason> {
    Some(match s {
        "STOP" => HaltReason::Stop,
        "RETURN" => HaltReason::Return,
        "REVERT" => HaltReason::Revert,
        "OUT_OF_GAS" => HaltReason::OutOfGas,
        "INVALID_OPCODE" => HaltReason::InvalidOpcode,
        "STACK_UNDERFLOW" => HaltReason::StackUnderflow,
        "STACK_OVERFLOW" => HaltReason::StackOverflow,
        "INVALID_JUMP" => HaltReason::InvalidJump,
        "INVALID_INSTRUCTION" => HaltReason::InvalidInstruction,
        _ => return None,
    })
}

impl Serialize for TraceEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind.type_tag())?;
        map.serialize_entry("index", &self.meta.index)?;
        map.serialize_entry("pc", &self.meta.pc)?;
        map.serialize_entry("gasRemaining", &self.meta.gas_remaining.to_string())?;

        match &self.kind {
            TraceEventKind::OpcodeStart { opcode, name } => {
                map.serialize_entry("opcode", opcode)?;
                map.serialize_entry("opcodeName", name)?;
            }
            TraceEventKind::StackPush { value } | TraceEventKind::StackPop { value } => {
                map.serialize_entry("value", &value.to_hex())?;
            }
            TraceEventKind::MemoryWrite { offset, data } => {
                map.serialize_entry("offset", offset)?;
                map.serialize_entry("data", &hex_bytes(data))?;
            }
            TraceEventKind::MemoryRead { offset, length } => {
                map.serialize_entry("offset", offset)?;
                map.serialize_entry("length", length)?;
            }
            TraceEventKind::StorageRead { address, key, value }
            | TraceEventKind::StorageWrite { address, key, value } => {
                map.serialize_entry("address", &address.to_hex())?;
                map.serialize_entry("key", &key.to_hex())?;
                map.serialize_entry("value", &value.to_hex())?;
            }
            TraceEventKind::GasCharge { amount, reason } => {
                map.serialize_entry("amount", &amount.to_string())?;
                map.serialize_entry("reason", reason)?;
            }
            TraceEventKind::Jump {
                from,
                to,
                conditional,
                taken,
            } => {
                map.serialize_entry("from", from)?;
                map.serialize_entry("to", to)?;
                map.serialize_entry("conditional", conditional)?;
                map.serialize_entry("taken", taken)?;
            }
            TraceEventKind::Halt { reason } => {
                map.serialize_entry("reason", reason.as_wire_str())?;
            }
            TraceEventKind::Log { address, topics, data } => {
                map.serialize_entry("address", &address.to_hex())?;
                let topics: Vec<String> = topics.iter().map(|t| t.to_hex()).collect();
                map.serialize_entry("topics", &topics)?;
                map.serialize_entry("data", &hex_bytes(data))?;
            }
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for TraceEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let obj = value.as_object().ok_or_else(|| DeError::custom("trace event must be a JSON object"))?;

        let get_str = |key: &str| -> Result<&str, D::Error> {
            obj.get(key)
                .and_then(|v| v.as_str())
                .ok_or_else(|| DeError::custom(std::format!("missing or non-string field `{key}`")))
        };
        let get_u64 = |key: &str| -> Result<u64, D::Error> {
            obj.get(key)
                .and_then(|v| v.as_u64())
                .ok_or_else(|| DeError::custom(std::format!("missing or non-integer field `{key}`")))
        };
        let get_usize = |key: &str| -> Result<usize, D::Error> { get_u64(key).map(|v| v as usize) };
        let get_decimal = |key: &str| -> Result<u64, D::Error> {
            get_str(key)
                .and_then(|s| s.parse::<u64>().map_err(|e| DeError::custom(e.to_string())))
        };
        let get_word = |key: &str| -> Result<Word256, D::Error> {
            Word256::from_hex(get_str(key)?).map_err(|e| DeError::custom(e.to_string()))
        };
        let get_address = |key: &str| -> Result<Address, D::Error> {
            Address::from_hex(get_str(key)?).map_err(|e| DeError::custom(e.to_string()))
        };
        let get_bytes = |key: &str| -> Result<Vec<u8>, D::Error> {
            let s = get_str(key)?;
            let stripped = s.strip_prefix("0x").unwrap_or(s);
            hex::decode(stripped).map_err(|e| DeError::custom(e.to_string()))
        };

        let type_tag = get_str("type")?;
        let meta = EventMeta {
            index: get_u64("index")?,
            pc: get_usize("pc")?,
            gas_remaining: get_decimal("gasRemaining")?,
        };

        let kind = match type_tag {
            "opcode.start" => TraceEventKind::OpcodeStart {
                opcode: get_u64("opcode")? as u8,
                name: get_str("opcodeName")?.to_owned(),
            },
            "stack.push" => TraceEventKind::StackPush {
                value: get_word("value")?,
            },
            "stack.pop" => TraceEventKind::StackPop {
                value: get_word("value")?,
            },
            "memory.write" => TraceEventKind::MemoryWrite {
                offset: get_usize("offset")?,
                data: get_bytes("data")?,
            },
            "memory.read" => TraceEventKind::MemoryRead {
                offset: get_usize("offset")?,
                length: get_usize("length")?,
            },
            "storage.read" => TraceEventKind::StorageRead {
                address: get_address("address")?,
                key: get_word("key")?,
                value: get_word("value")?,
            },
            "storage.write" => TraceEventKind::StorageWrite {
                address: get_address("address")?,
                key: get_word("key")?,
                value: get_word("value")?,
            },
            "gas.charge" => TraceEventKind::GasCharge {
                amount: get_decimal("amount")?,
                reason: get_str("reason")?.to_owned(),
            },
            "jump" => TraceEventKind::Jump {
                from: get_usize("from")?,
                to: get_usize("to")?,
                conditional: obj
                    .get("conditional")
                    .and_then(|v| v.as_bool())
                    .ok_or_else(|| DeError::custom("missing `conditional`"))?,
                taken: obj
                    .get("taken")
                    .and_then(|v| v.as_bool())
                    .ok_or_else(|| DeError::custom("missing `taken`"))?,
            },
            "halt" => TraceEventKind::Halt {
                reason: halt_reason_from_wire(get_str("reason")?)
                    .ok_or_else(|| DeError::custom("unknown halt reason"))?,
            },
            "log" => {
                let topics_value = obj.get("topics").and_then(|v| v.as_array()).ok_or_else(|| DeError::custom("missing `topics`"))?;
                let mut topics = Vec::with_capacity(topics_value.len());
                for t in topics_value {
                    let s = t.as_str().ok_or_else(|| DeError::custom("topic must be a string"))?;
                    topics.push(Word256::from_hex(s).map_err(|e| DeError::custom(e.to_string()))?);
                }
                TraceEventKind::Log {
                    address: get_address("address")?,
                    topics,
                    data: get_bytes("data")?,
                }
            }
            other => return Err(DeError::custom(std::format!("unknown trace event type `{other}`"))),
        };

        Ok(TraceEvent { meta, kind })
    }
}

/// An append-only collector of [`TraceEvent`]s plus a next-index counter.
///
/// Cloning a `Trace` produces an independent collector sharing no state
/// with the original.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    events: Vec<TraceEvent>,
    #[serde(skip)]
    next_index: u64,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and post-increments the next sequence number to use.
    pub fn next_index(&mut self) -> u64 {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    /// Appends `kind` as a new event, stamping it with `pc`, `gas_remaining`,
    /// and the next sequence number.
    pub fn record(&mut self, pc: usize, gas_remaining: u64, kind: TraceEventKind) {
        let index = self.next_index();
        self.events.push(TraceEvent {
            meta: EventMeta {
                index,
                pc,
                gas_remaining,
            },
            kind,
        });
    }

    /// Returns the recorded events in order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Serializes the trace to its JSON array form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.events)
    }

    /// Restores a trace from its JSON array form, re-establishing the
    /// sequence counter to the length of the array.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let events: Vec<TraceEvent> = serde_json::from_str(json)?;
        let next_index = events.len() as u64;
        Ok(Self { events, next_index })
    }
}
