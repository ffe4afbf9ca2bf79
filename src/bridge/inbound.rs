use log::warn;
use serde_json::Value;

use super::{
    codec::base64_decode,
    messages::{InboundMessage, WireMessage, INBOUND_TAGS},
};
use crate::{error::DecodeError, keys::KeyPress, midi::MidiMessage};

/// Parses and validates a JSON message posted by the UI.
pub fn decode_inbound(json: &str) -> Result<InboundMessage, DecodeError> {
    let value: Value = serde_json::from_str(json).map_err(DecodeError::Malformed)?;

    let tag = match value.get("msg").and_then(Value::as_str) {
        Some(tag) => tag.to_owned(),
        None => return Err(DecodeError::MissingTag),
    };
    if !INBOUND_TAGS.contains(&tag.as_str()) {
        return Err(DecodeError::UnknownTag(tag));
    }

    let wire = serde_json::from_value::<WireMessage>(value)
        .map_err(|source| DecodeError::InvalidShape { tag, source })?;

    Ok(match wire {
        WireMessage::SetParamValue { param_idx, value } => {
            InboundMessage::SetParamValue { param_idx, value }
        }
        WireMessage::BeginParamChange { param_idx } => {
            InboundMessage::BeginParamChange { param_idx }
        }
        WireMessage::EndParamChange { param_idx } => InboundMessage::EndParamChange { param_idx },
        WireMessage::ArbitraryMessage {
            msg_tag,
            ctrl_tag,
            data,
            data_size,
        } => InboundMessage::ArbitraryMessage {
            msg_tag,
            ctrl_tag,
            data: decode_payload(&data, data_size),
        },
        WireMessage::Midi {
            status,
            data1,
            data2,
        } => InboundMessage::Midi(MidiMessage::new(status, data1, data2)),
        WireMessage::KeyPress {
            key_code,
            utf8,
            shift,
            ctrl,
            alt,
            is_up,
        } => InboundMessage::KeyPress {
            key: KeyPress::from_dom(key_code, utf8, shift, ctrl, alt),
            is_up,
        },
    })
}

/// Undecodable payloads, or ones whose declared size disagrees with the
/// decoded length, become empty.
fn decode_payload(data: &str, declared_size: Option<usize>) -> Vec<u8> {
    match base64_decode(data) {
        Ok(bytes) => match declared_size {
            Some(size) if size != bytes.len() => {
                warn!(
                    "Payload declares {} bytes but decodes to {}; using empty payload",
                    size,
                    bytes.len()
                );
                Vec::new()
            }
            _ => bytes,
        },
        Err(e) => {
            warn!("Invalid base64 payload ({}); using empty payload", e);
            Vec::new()
        }
    }
}
