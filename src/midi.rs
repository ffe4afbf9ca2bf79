use midi_msg::{Channel, MidiMsg, ReceiverContext};

/// A short (up to three byte) MIDI message as exchanged with the web UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MidiMessage {
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}

impl MidiMessage {
    pub fn new(status: u8, data1: u8, data2: u8) -> Self {
        MidiMessage {
            status,
            data1,
            data2,
        }
    }

    /// Converts a parsed `MidiMsg`. Messages longer than three bytes
    /// (SysEx and friends) have no short form and return `None`.
    pub fn from_midi_msg(msg: &MidiMsg) -> Option<Self> {
        match msg.to_midi().as_slice() {
            [status] => Some(MidiMessage::new(*status, 0, 0)),
            [status, data1] => Some(MidiMessage::new(*status, *data1, 0)),
            [status, data1, data2] => Some(MidiMessage::new(*status, *data1, *data2)),
            _ => None,
        }
    }

    pub fn bytes(&self) -> [u8; 3] {
        [self.status, self.data1, self.data2]
    }

    pub fn to_midi_msg(&self) -> Option<MidiMsg> {
        let mut ctx = ReceiverContext::new();
        MidiMsg::from_midi_with_context(&self.bytes(), &mut ctx)
            .ok()
            .map(|(msg, _len)| msg)
    }

    /// 1-based channel number, for channel voice/mode messages only.
    pub fn channel(&self) -> Option<u8> {
        if (0x80..0xF0).contains(&self.status) {
            Some((self.status & 0x0F) + 1)
        } else {
            None
        }
    }

    /// Human readable form used in logs and the monitor.
    pub fn describe(&self) -> String {
        match self.to_midi_msg() {
            Some(MidiMsg::ChannelVoice { channel, msg }) => {
                format!("ch{} {:?}", channel_to_int(channel), msg)
            }
            Some(msg) => format!("{:?}", msg),
            None => format!(
                "raw [{:#04x} {:#04x} {:#04x}]",
                self.status, self.data1, self.data2
            ),
        }
    }
}

fn channel_to_int(channel: Channel) -> u8 {
    match channel {
        Channel::Ch1 => 1,
        Channel::Ch2 => 2,
        Channel::Ch3 => 3,
        Channel::Ch4 => 4,
        Channel::Ch5 => 5,
        Channel::Ch6 => 6,
        Channel::Ch7 => 7,
        Channel::Ch8 => 8,
        Channel::Ch9 => 9,
        Channel::Ch10 => 10,
        Channel::Ch11 => 11,
        Channel::Ch12 => 12,
        Channel::Ch13 => 13,
        Channel::Ch14 => 14,
        Channel::Ch15 => 15,
        Channel::Ch16 => 16,
    }
}
