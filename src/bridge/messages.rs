use serde::Deserialize;

use crate::{keys::KeyPress, midi::MidiMessage};

/// Native -> UI events. Each variant becomes one JavaScript call.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    ControlValue {
        ctrl_tag: i32,
        value: f64,
    },
    ControlMessage {
        ctrl_tag: i32,
        msg_tag: i32,
        data: Vec<u8>,
    },
    /// `value` is normalized.
    ParameterValue {
        param_idx: usize,
        value: f64,
    },
    ArbitraryMessage {
        msg_tag: i32,
        data: Vec<u8>,
    },
    Midi(MidiMessage),
}

impl OutboundMessage {
    /// Name of the JavaScript function receiving this message.
    pub fn function_name(&self) -> &'static str {
        match self {
            OutboundMessage::ControlValue { .. } => "SCVFD",
            OutboundMessage::ControlMessage { .. } => "SCMFD",
            OutboundMessage::ParameterValue { .. } => "SPVFD",
            OutboundMessage::ArbitraryMessage { .. } => "SAMFD",
            OutboundMessage::Midi(_) => "SMMFD",
        }
    }
}

/// UI -> native events, decoded and validated.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    SetParamValue {
        param_idx: usize,
        value: f64,
    },
    BeginParamChange {
        param_idx: usize,
    },
    EndParamChange {
        param_idx: usize,
    },
    ArbitraryMessage {
        msg_tag: i32,
        ctrl_tag: i32,
        data: Vec<u8>,
    },
    Midi(MidiMessage),
    KeyPress {
        key: KeyPress,
        is_up: bool,
    },
}

/// JSON shape posted by the UI script.
#[derive(Deserialize, Debug)]
#[serde(tag = "msg")]
pub(crate) enum WireMessage {
    #[serde(rename = "SPVFUI")]
    SetParamValue {
        #[serde(rename = "paramIdx")]
        param_idx: usize,
        value: f64,
    },
    #[serde(rename = "BPCFUI")]
    BeginParamChange {
        #[serde(rename = "paramIdx")]
        param_idx: usize,
    },
    #[serde(rename = "EPCFUI")]
    EndParamChange {
        #[serde(rename = "paramIdx")]
        param_idx: usize,
    },
    #[serde(rename = "SAMFUI")]
    ArbitraryMessage {
        #[serde(rename = "msgTag")]
        msg_tag: i32,
        #[serde(rename = "ctrlTag")]
        ctrl_tag: i32,
        data: String,
        #[serde(rename = "dataSize", default)]
        data_size: Option<usize>,
    },
    #[serde(rename = "SMMFUI")]
    Midi {
        #[serde(rename = "statusByte")]
        status: u8,
        #[serde(rename = "dataByte1")]
        data1: u8,
        #[serde(rename = "dataByte2")]
        data2: u8,
    },
    #[serde(rename = "SKPFUI")]
    KeyPress {
        #[serde(rename = "keyCode")]
        key_code: u32,
        utf8: String,
        #[serde(rename = "S")]
        shift: bool,
        #[serde(rename = "C")]
        ctrl: bool,
        #[serde(rename = "A")]
        alt: bool,
        #[serde(rename = "isUp")]
        is_up: bool,
    },
}

pub(crate) const INBOUND_TAGS: [&str; 6] = ["SPVFUI", "BPCFUI", "EPCFUI", "SAMFUI", "SMMFUI", "SKPFUI"];
