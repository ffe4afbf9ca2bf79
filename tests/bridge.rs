use std::{cell::RefCell, rc::Rc};

use webview_bridge::{
    BrowserControl, Delivery, EditorDelegate, MidiMessage, OutboundMessage, Param, ParamList,
    SessionState, WebViewEditor,
};

#[derive(Default)]
struct Page {
    scripts: Vec<String>,
    closed: bool,
}

struct FakeBrowser(Rc<RefCell<Page>>);

impl BrowserControl for FakeBrowser {
    fn evaluate_javascript(&mut self, script: &str) {
        self.0.borrow_mut().scripts.push(script.to_owned());
    }
    fn load_html(&mut self, _html: &str) {}
    fn load_url(&mut self, _url: &str) {}
    fn load_file(&mut self, _file_name: &str, _bundle_id: Option<&str>) {}
    fn close(&mut self) {
        self.0.borrow_mut().closed = true;
    }
}

#[derive(Default)]
struct Plugin {
    param_sets: Vec<(usize, f64)>,
    midi: Vec<MidiMessage>,
    other_calls: usize,
}

impl EditorDelegate for Plugin {
    fn send_parameter_value_from_ui(&mut self, param_idx: usize, normalized_value: f64) {
        self.param_sets.push((param_idx, normalized_value));
    }
    fn begin_inform_host_of_param_change_from_ui(&mut self, _param_idx: usize) {
        self.other_calls += 1;
    }
    fn end_inform_host_of_param_change_from_ui(&mut self, _param_idx: usize) {
        self.other_calls += 1;
    }
    fn send_arbitrary_msg_from_ui(&mut self, _msg_tag: i32, _ctrl_tag: i32, _data: &[u8]) {
        self.other_calls += 1;
    }
    fn send_midi_msg_from_ui(&mut self, msg: MidiMessage) {
        self.midi.push(msg);
    }
}

fn editor() -> WebViewEditor<FakeBrowser, ParamList> {
    WebViewEditor::new(ParamList::new(vec![Param::double("Gain", 0.0, 10.0, 5.0)]).unwrap())
}

#[test]
fn set_param_message_dispatches_exactly_once() {
    let mut editor = editor();
    let page = Rc::new(RefCell::new(Page::default()));
    let request = editor.open().unwrap();
    editor.complete_open(request, Ok::<_, String>(FakeBrowser(page.clone())));

    let mut plugin = Plugin::default();
    editor.on_message_from_web_view(r#"{"msg":"SPVFUI","paramIdx":3,"value":0.5}"#, &mut plugin);

    assert_eq!(plugin.param_sets, vec![(3, 0.5)]);
    assert_eq!(plugin.other_calls, 0);
    assert!(plugin.midi.is_empty());
}

#[test]
fn malformed_and_unknown_messages_do_not_dispatch() {
    let mut editor = editor();
    let page = Rc::new(RefCell::new(Page::default()));
    let request = editor.open().unwrap();
    editor.complete_open(request, Ok::<_, String>(FakeBrowser(page.clone())));

    let mut plugin = Plugin::default();
    for json in [r#"{"msg":"#, r#"{"msg":"UNKNOWN"}"#, "null", r#"{"msg":"SMMFUI"}"#] {
        assert!(!editor.on_message_from_web_view(json, &mut plugin));
    }
    assert!(plugin.param_sets.is_empty());
    assert!(plugin.midi.is_empty());
    assert_eq!(plugin.other_calls, 0);
}

#[test]
fn session_that_never_becomes_ready_sends_nothing() {
    let mut editor = editor();
    let page = Rc::new(RefCell::new(Page::default()));

    assert_eq!(editor.send_control_value_from_delegate(0, 0.1).unwrap(), Delivery::Dropped);
    let request = editor.open().unwrap();
    assert_eq!(editor.state(), SessionState::Opening);
    assert_eq!(
        editor.send_midi_msg_from_delegate(MidiMessage::new(0x90, 60, 100)).unwrap(),
        Delivery::Dropped
    );
    editor.close();

    // the browser shows up after the window went away
    assert!(!editor.complete_open(request, Ok::<_, String>(FakeBrowser(page.clone()))));
    assert!(page.borrow().closed);
    assert!(page.borrow().scripts.is_empty());
}

#[test]
fn ready_session_delivers_in_call_order() {
    let mut editor = editor();
    let page = Rc::new(RefCell::new(Page::default()));
    let request = editor.open().unwrap();
    editor.complete_open(request, Ok::<_, String>(FakeBrowser(page.clone())));

    editor.send_control_value_from_delegate(4, 0.25).unwrap();
    editor.send_parameter_value_from_delegate(0, 2.5, false).unwrap();
    editor.send_control_msg_from_delegate(4, 9, b"abc").unwrap();
    editor.send_arbitrary_msg_from_delegate(7, &[]).unwrap();
    editor.send(OutboundMessage::Midi(MidiMessage::new(0xB0, 7, 127))).unwrap();

    assert_eq!(
        page.borrow().scripts,
        vec![
            "SCVFD(4, 0.25)",
            "SPVFD(0, 0.25)",
            "SCMFD(4, 9, 4, \"YWJj\")",
            "SAMFD(7, 0, \"\")",
            "SMMFD(176, 7, 127)",
        ]
    );

    editor.close();
    assert!(page.borrow().closed);
    assert_eq!(editor.state(), SessionState::Closed);
}

#[test]
fn midi_from_ui_reaches_delegate() {
    let mut editor = editor();
    let page = Rc::new(RefCell::new(Page::default()));
    let request = editor.open().unwrap();
    editor.complete_open(request, Ok::<_, String>(FakeBrowser(page)));

    let mut plugin = Plugin::default();
    editor.on_message_from_web_view(
        r#"{"msg":"SMMFUI","statusByte":128,"dataByte1":60,"dataByte2":0}"#,
        &mut plugin,
    );
    assert_eq!(plugin.midi, vec![MidiMessage::new(0x80, 60, 0)]);
    assert!(plugin.midi[0].describe().contains("NoteOff"));
}
