use super::gas_cost;
use crate::host::LogRecord;
use crate::interpreter::Interpreter;

/// `LOG0`..`LOG4`: reads `length` bytes of memory at `offset` and appends a
/// log record carrying `topic_count` topics (popped in declaration order)
/// to the host.
///
/// Gas is charged in two parts: a baseline of `375 + topic_count * 375`,
/// known before anything is popped, and a per-byte data charge of
/// `8 * length` charged once `length` is known (memory expansion is charged
/// separately, between the two).
pub(crate) fn log_n(interp: &mut Interpreter, topic_count: usize) {
    let name = std::format!("LOG{topic_count}");
    let base = gas_cost::LOG_BASE + gas_cost::LOG_PER_TOPIC * topic_count as u64;
    gas!(interp, base, name.as_str());

    pop!(interp, offset, length);
    let mut topics = Vec::with_capacity(topic_count);
    for _ in 0..topic_count {
        pop!(interp, topic);
        topics.push(topic);
    }

    let Some(offset) = interp.word_to_usize_or_halt(offset) else {
        return;
    };
    let Some(length) = interp.word_to_usize_or_halt(length) else {
        return;
    };

    expand_memory!(interp, offset, length, "LOG_MEMORY_EXPANSION");

    let data_cost = gas_cost::LOG_PER_BYTE * length as u64;
    if data_cost > 0 {
        gas!(interp, data_cost, std::format!("{name}_DATA").as_str());
    }

    let data = interp.state.memory.load(offset, length);
    let address = interp.host.get_address();
    interp.record_log(address, topics.clone(), data.clone());
    interp.host.log(LogRecord { address, topics, data });

    interp.state.pc += 1;
}
