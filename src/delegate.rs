use crate::{keys::KeyPress, midi::MidiMessage};

/// Receives events the web UI sends to the plugin.
///
/// Parameter changes arriving here are on the UI thread; forwarding them to
/// an audio engine is up to the implementor.
pub trait EditorDelegate {
    fn send_parameter_value_from_ui(&mut self, param_idx: usize, normalized_value: f64);
    fn begin_inform_host_of_param_change_from_ui(&mut self, param_idx: usize);
    fn end_inform_host_of_param_change_from_ui(&mut self, param_idx: usize);
    fn send_arbitrary_msg_from_ui(&mut self, msg_tag: i32, ctrl_tag: i32, data: &[u8]);
    fn send_midi_msg_from_ui(&mut self, msg: MidiMessage);

    /// Returns `true` if the key was handled.
    fn on_key_down(&mut self, _key: &KeyPress) -> bool {
        false
    }

    fn on_key_up(&mut self, _key: &KeyPress) -> bool {
        false
    }
}
