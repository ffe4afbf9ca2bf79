use std::io::Write;

use log::{debug, error, info};
use webview_bridge::{
    BrowserControl, EditorDelegate, KeyPress, MidiMessage, OutboundMessage,
};

/// Browser stand-in that prints every evaluated script as one line.
pub struct StdoutBrowser<W: Write> {
    out: W,
}

impl<W: Write> StdoutBrowser<W> {
    pub fn new(out: W) -> Self {
        StdoutBrowser { out }
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            error!("failed to write to output: {}", e);
        }
    }
}

impl<W: Write> BrowserControl for StdoutBrowser<W> {
    fn evaluate_javascript(&mut self, script: &str) {
        self.emit(script);
    }

    fn load_html(&mut self, html: &str) {
        info!("load html ({} bytes)", html.len());
    }

    fn load_url(&mut self, url: &str) {
        info!("load url {}", url);
    }

    fn load_file(&mut self, file_name: &str, bundle_id: Option<&str>) {
        info!("load file {} (bundle {:?})", file_name, bundle_id);
    }

    fn close(&mut self) {
        debug!("browser closed");
    }
}

/// Logs what the UI sends and queues echoes for the main loop to send back.
#[derive(Default)]
pub struct LoggingDelegate {
    echoes: Vec<OutboundMessage>,
}

impl LoggingDelegate {
    pub fn drain_echoes(&mut self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.echoes)
    }
}

impl EditorDelegate for LoggingDelegate {
    fn send_parameter_value_from_ui(&mut self, param_idx: usize, normalized_value: f64) {
        info!("param {} = {}", param_idx, normalized_value);
        self.echoes.push(OutboundMessage::ParameterValue {
            param_idx,
            value: normalized_value,
        });
    }

    fn begin_inform_host_of_param_change_from_ui(&mut self, param_idx: usize) {
        info!("begin gesture on param {}", param_idx);
    }

    fn end_inform_host_of_param_change_from_ui(&mut self, param_idx: usize) {
        info!("end gesture on param {}", param_idx);
    }

    fn send_arbitrary_msg_from_ui(&mut self, msg_tag: i32, ctrl_tag: i32, data: &[u8]) {
        match std::str::from_utf8(data) {
            Ok(text) => info!("message {} from control {}: {}", msg_tag, ctrl_tag, text),
            Err(_) => info!(
                "message {} from control {}: {} bytes",
                msg_tag,
                ctrl_tag,
                data.len()
            ),
        }
    }

    fn send_midi_msg_from_ui(&mut self, msg: MidiMessage) {
        info!("MIDI {}", msg.describe());
        self.echoes.push(OutboundMessage::Midi(msg));
    }

    fn on_key_down(&mut self, key: &KeyPress) -> bool {
        debug!("key down {:?}", key);
        false
    }

    fn on_key_up(&mut self, key: &KeyPress) -> bool {
        debug!("key up {:?}", key);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webview_bridge::{ParamList, WebViewEditor};

    #[test]
    fn echoes_parameter_changes_to_output() {
        let mut editor: WebViewEditor<StdoutBrowser<Vec<u8>>, ParamList> =
            WebViewEditor::new(ParamList::builtin().unwrap());
        let request = editor.open().unwrap();
        editor.complete_open(request, Ok::<_, String>(StdoutBrowser::new(Vec::new())));

        let mut delegate = LoggingDelegate::default();
        editor.on_message_from_web_view(r#"{"msg":"SPVFUI","paramIdx":1,"value":0.25}"#, &mut delegate);
        editor.on_message_from_web_view(r#"{"msg":"BPCFUI","paramIdx":1}"#, &mut delegate);
        let echoes = delegate.drain_echoes();
        assert_eq!(
            echoes,
            vec![OutboundMessage::ParameterValue {
                param_idx: 1,
                value: 0.25
            }]
        );
        assert!(delegate.drain_echoes().is_empty());
    }

    #[test]
    fn stdout_browser_writes_one_line_per_script() {
        let mut browser = StdoutBrowser::new(Vec::new());
        browser.evaluate_javascript("SCVFD(1, 0.5)");
        browser.evaluate_javascript("SMMFD(144, 60, 1)");
        assert_eq!(
            String::from_utf8(browser.out).unwrap(),
            "SCVFD(1, 0.5)\nSMMFD(144, 60, 1)\n"
        );
    }
}
