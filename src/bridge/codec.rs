//! Text encoding of outbound messages and the base64 payload helpers.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::error;

use super::messages::OutboundMessage;
use crate::error::BridgeError;

pub const DEFAULT_MAX_JS_STRING_LENGTH: usize = 1_048_576;

/// Length of the padded base64 text for `n` input bytes: `4 * ceil(n / 3)`.
pub fn base64_encoded_len(n: usize) -> usize {
    n.div_ceil(3) * 4
}

pub fn base64_encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

pub fn base64_decode(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(text)
}

/// Builds the JavaScript call for `msg`.
///
/// Scripts longer than `max_len` bytes are refused rather than cut short,
/// as a truncated call leaves the UI-side parser out of step.
pub fn encode_outbound(msg: &OutboundMessage, max_len: usize) -> Result<String, BridgeError> {
    let name = msg.function_name();
    let script = match msg {
        OutboundMessage::ControlValue { ctrl_tag, value } => {
            format!("{}({}, {})", name, ctrl_tag, js_number(*value)?)
        }
        OutboundMessage::ControlMessage {
            ctrl_tag,
            msg_tag,
            data,
        } => {
            let b64 = base64_encode(data);
            format!("{}({}, {}, {}, \"{}\")", name, ctrl_tag, msg_tag, b64.len(), b64)
        }
        OutboundMessage::ParameterValue { param_idx, value } => {
            format!("{}({}, {})", name, param_idx, js_number(*value)?)
        }
        OutboundMessage::ArbitraryMessage { msg_tag, data } => {
            let b64 = base64_encode(data);
            format!("{}({}, {}, \"{}\")", name, msg_tag, b64.len(), b64)
        }
        OutboundMessage::Midi(midi) => {
            format!("{}({}, {}, {})", name, midi.status, midi.data1, midi.data2)
        }
    };

    if script.len() > max_len {
        error!(
            "{} script is {} bytes, over the {} byte limit; not sent",
            name,
            script.len(),
            max_len
        );
        return Err(BridgeError::ScriptTooLong {
            len: script.len(),
            max: max_len,
        });
    }
    Ok(script)
}

/// Shortest decimal form that parses back to the same `f64`.
fn js_number(value: f64) -> Result<String, BridgeError> {
    if !value.is_finite() {
        return Err(BridgeError::NonFiniteValue(value));
    }
    Ok(format!("{}", value))
}
