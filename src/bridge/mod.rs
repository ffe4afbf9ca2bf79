use std::{fmt::Display, path::Path};

use log::{debug, error, warn};
use serde_json::{json, Value};

use crate::{
    delegate::EditorDelegate,
    error::BridgeError,
    midi::MidiMessage,
    monitor::MessageMonitor,
    params::ParameterStore,
    session::{BrowserControl, Delivery, OpenRequest, SessionState, WebViewSession},
};

pub mod codec;
pub mod inbound;
pub mod messages;

use self::{
    codec::{encode_outbound, DEFAULT_MAX_JS_STRING_LENGTH},
    inbound::decode_inbound,
    messages::{InboundMessage, OutboundMessage},
};

/// `msgTag` used for JSON sent with [`WebViewEditor::send_json_from_delegate`].
pub const JSON_MSG_TAG: i32 = -1;

type EditorInitHook<B> = Box<dyn FnMut(&mut B)>;
type UiOpenHook = Box<dyn FnMut()>;

/// Web view based editor: owns the session and translates between the
/// UI's JSON messages and the native parameter/MIDI model.
pub struct WebViewEditor<B: BrowserControl, P: ParameterStore> {
    session: WebViewSession<B>,
    params: P,
    max_js_string_length: usize,
    monitor: MessageMonitor,
    editor_init: Option<EditorInitHook<B>>,
    ui_open: Option<UiOpenHook>,
}

impl<B: BrowserControl, P: ParameterStore> WebViewEditor<B, P> {
    pub fn new(params: P) -> Self {
        WebViewEditor {
            session: WebViewSession::new(),
            params,
            max_js_string_length: DEFAULT_MAX_JS_STRING_LENGTH,
            monitor: MessageMonitor::new(),
            editor_init: None,
            ui_open: None,
        }
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn monitor(&self) -> &MessageMonitor {
        &self.monitor
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_ready()
    }

    pub fn set_max_js_string_length(&mut self, length: usize) {
        self.max_js_string_length = length;
    }

    /// Runs once the browser is ready, typically to load the UI content.
    pub fn set_editor_init(&mut self, init: impl FnMut(&mut B) + 'static) {
        self.editor_init = Some(Box::new(init));
    }

    /// Runs once UI content has loaded, after the parameter description
    /// was sent or failed to send.
    pub fn set_ui_open(&mut self, on_open: impl FnMut() + 'static) {
        self.ui_open = Some(Box::new(on_open));
    }

    // ---------------------------------------------------------------------
    // Session

    pub fn open(&mut self) -> Result<OpenRequest, BridgeError> {
        self.session.open()
    }

    /// Called on the UI thread when the browser control creation finishes.
    pub fn complete_open<E: Display>(&mut self, request: OpenRequest, result: Result<B, E>) -> bool {
        if !self.session.complete(request, result) {
            return false;
        }
        if let (Some(init), Some(browser)) = (self.editor_init.as_mut(), self.session.browser_mut()) {
            init(browser);
        }
        true
    }

    pub fn close(&mut self) {
        self.session.close();
    }

    pub fn load_html(&mut self, html: &str) -> Delivery {
        match self.session.browser_mut() {
            Some(browser) => {
                browser.load_html(html);
                Delivery::Sent
            }
            None => Delivery::Dropped,
        }
    }

    pub fn load_url(&mut self, url: &str) -> Delivery {
        match self.session.browser_mut() {
            Some(browser) => {
                browser.load_url(url);
                Delivery::Sent
            }
            None => Delivery::Dropped,
        }
    }

    pub fn load_file(&mut self, file_name: &str, bundle_id: Option<&str>) -> Delivery {
        match self.session.browser_mut() {
            Some(browser) => {
                browser.load_file(file_name, bundle_id);
                Delivery::Sent
            }
            None => Delivery::Dropped,
        }
    }

    /// Loads `index.html`: next to the plugin sources in debug builds,
    /// from the bundle otherwise.
    pub fn load_index_html(&mut self, path_of_plugin_src: &Path, bundle_id: &str) -> Delivery {
        if cfg!(debug_assertions) {
            match index_html_path(path_of_plugin_src) {
                Some(path) => self.load_file(&path, None),
                None => {
                    warn!(
                        "Cannot locate index.html relative to {}",
                        path_of_plugin_src.display()
                    );
                    Delivery::Dropped
                }
            }
        } else {
            self.load_file("index.html", Some(bundle_id))
        }
    }

    // ---------------------------------------------------------------------
    // Native -> UI

    /// Encodes and evaluates `msg`. A no-op returning `Delivery::Dropped`
    /// while the session is not ready.
    pub fn send(&mut self, msg: OutboundMessage) -> Result<Delivery, BridgeError> {
        if !self.session.is_ready() {
            debug!("Not ready; dropping {}", msg.function_name());
            self.monitor.record_dropped();
            return Ok(Delivery::Dropped);
        }
        let script = encode_outbound(&msg, self.max_js_string_length)?;
        let delivery = self.session.evaluate(&script);
        self.monitor.record_outbound(summarize_outbound(&msg));
        Ok(delivery)
    }

    pub fn send_control_value_from_delegate(
        &mut self,
        ctrl_tag: i32,
        normalized_value: f64,
    ) -> Result<Delivery, BridgeError> {
        self.send(OutboundMessage::ControlValue {
            ctrl_tag,
            value: normalized_value,
        })
    }

    pub fn send_control_msg_from_delegate(
        &mut self,
        ctrl_tag: i32,
        msg_tag: i32,
        data: &[u8],
    ) -> Result<Delivery, BridgeError> {
        self.send(OutboundMessage::ControlMessage {
            ctrl_tag,
            msg_tag,
            data: data.to_vec(),
        })
    }

    /// When `normalized` is false, `value` is in the parameter's native range.
    pub fn send_parameter_value_from_delegate(
        &mut self,
        param_idx: usize,
        value: f64,
        normalized: bool,
    ) -> Result<Delivery, BridgeError> {
        let value = if normalized {
            value
        } else {
            self.params
                .param(param_idx)
                .ok_or(BridgeError::UnknownParam(param_idx))?
                .to_normalized(value)
        };
        self.send(OutboundMessage::ParameterValue { param_idx, value })
    }

    pub fn send_arbitrary_msg_from_delegate(
        &mut self,
        msg_tag: i32,
        data: &[u8],
    ) -> Result<Delivery, BridgeError> {
        self.send(OutboundMessage::ArbitraryMessage {
            msg_tag,
            data: data.to_vec(),
        })
    }

    pub fn send_midi_msg_from_delegate(&mut self, msg: MidiMessage) -> Result<Delivery, BridgeError> {
        self.send(OutboundMessage::Midi(msg))
    }

    pub fn send_json_from_delegate(&mut self, json: &Value) -> Result<Delivery, BridgeError> {
        let text = serde_json::to_string(json)?;
        self.send_arbitrary_msg_from_delegate(JSON_MSG_TAG, text.as_bytes())
    }

    /// Sends the description of every parameter once the UI content has
    /// loaded, then runs the UI-open hook.
    pub fn on_web_content_loaded(&mut self) -> Result<Delivery, BridgeError> {
        let params: Vec<Value> = (0..self.params.param_count())
            .filter_map(|idx| self.params.param(idx).map(|p| p.to_json(idx)))
            .collect();
        let result = self.send_json_from_delegate(&json!({
            "id": "params",
            "params": params,
        }));
        if let Err(e) = &result {
            error!("Parameter description not sent: {}", e);
        }
        if let Some(on_open) = self.ui_open.as_mut() {
            on_open();
        }
        result
    }

    // ---------------------------------------------------------------------
    // UI -> native

    /// Decodes a message posted by the UI and forwards it to `delegate`.
    /// Anything that fails to decode is logged and dropped. Returns `true`
    /// if a delegate call was made.
    pub fn on_message_from_web_view<D: EditorDelegate>(&mut self, json: &str, delegate: &mut D) -> bool {
        if !self.session.is_ready() {
            debug!("Not ready; ignoring message from web view");
            self.monitor.record_dropped();
            return false;
        }
        match decode_inbound(json) {
            Ok(msg) => {
                self.monitor.record_inbound(format!("{:?}", msg));
                dispatch(msg, delegate);
                true
            }
            Err(e) => {
                warn!("Dropping message from web view: {}", e);
                self.monitor.record_dropped();
                false
            }
        }
    }
}

fn dispatch<D: EditorDelegate>(msg: InboundMessage, delegate: &mut D) {
    match msg {
        InboundMessage::SetParamValue { param_idx, value } => {
            delegate.send_parameter_value_from_ui(param_idx, value)
        }
        InboundMessage::BeginParamChange { param_idx } => {
            delegate.begin_inform_host_of_param_change_from_ui(param_idx)
        }
        InboundMessage::EndParamChange { param_idx } => {
            delegate.end_inform_host_of_param_change_from_ui(param_idx)
        }
        InboundMessage::ArbitraryMessage {
            msg_tag,
            ctrl_tag,
            data,
        } => delegate.send_arbitrary_msg_from_ui(msg_tag, ctrl_tag, &data),
        InboundMessage::Midi(midi) => delegate.send_midi_msg_from_ui(midi),
        InboundMessage::KeyPress { key, is_up } => {
            let handled = if is_up {
                delegate.on_key_up(&key)
            } else {
                delegate.on_key_down(&key)
            };
            debug!("Key {:?} (up: {}) handled: {}", key.virtual_key, is_up, handled);
        }
    }
}

fn summarize_outbound(msg: &OutboundMessage) -> String {
    match msg {
        OutboundMessage::ControlMessage { data, .. } | OutboundMessage::ArbitraryMessage { data, .. } => {
            format!("{} ({} bytes)", msg.function_name(), data.len())
        }
        OutboundMessage::Midi(midi) => format!("{} {}", msg.function_name(), midi.describe()),
        other => format!("{:?}", other),
    }
}

/// `<dir of plugin src>/Resources/web/index.html`, with separators
/// normalized to `/` before splitting.
pub fn index_html_path(path_of_plugin_src: &Path) -> Option<String> {
    let normalized = path_of_plugin_src.to_string_lossy().replace('\\', "/");
    let (dir, _file) = normalized.rsplit_once('/')?;
    let resolved = format!("{}/Resources/web/index.html", dir);
    if cfg!(windows) {
        Some(resolved.replace('/', "\\"))
    } else {
        Some(resolved)
    }
}
