use std::fmt::Write as _;

use circular_buffer::CircularBuffer;

pub const MONITOR_LOG_LENGTH: usize = 16;

/// Rolling log of the most recent bridge traffic.
pub struct MessageMonitor {
    pub inbound_log: CircularBuffer<MONITOR_LOG_LENGTH, String>,
    pub outbound_log: CircularBuffer<MONITOR_LOG_LENGTH, String>,
    pub dropped_count: usize,
}

impl Default for MessageMonitor {
    fn default() -> Self {
        MessageMonitor::new()
    }
}

impl MessageMonitor {
    pub fn new() -> Self {
        MessageMonitor {
            inbound_log: CircularBuffer::new(),
            outbound_log: CircularBuffer::new(),
            dropped_count: 0,
        }
    }

    pub fn record_inbound(&mut self, entry: String) {
        self.inbound_log.push_back(entry);
    }

    pub fn record_outbound(&mut self, entry: String) {
        self.outbound_log.push_back(entry);
    }

    pub fn record_dropped(&mut self) {
        self.dropped_count += 1;
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        render_log(&mut out, "received from UI", self.inbound_log.iter());
        render_log(&mut out, "sent to UI", self.outbound_log.iter());
        let _ = writeln!(out, "Dropped: {}", self.dropped_count);
        out
    }
}

fn render_log<'a>(out: &mut String, heading: &str, entries: impl DoubleEndedIterator<Item = &'a String>) {
    let _ = writeln!(
        out,
        "== Last {} (max) messages {}",
        MONITOR_LOG_LENGTH, heading
    );
    let mut any = false;
    for item in entries.rev() {
        any = true;
        let _ = writeln!(out, "{}", item);
    }
    if !any {
        let _ = writeln!(out, "Nothing yet");
    }
}
