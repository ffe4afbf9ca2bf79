use std::{
    fmt::Display,
    sync::atomic::{AtomicU64, Ordering},
};

use log::{debug, info, warn};

use crate::error::BridgeError;

/// The embedded browser control. Implemented by the platform layer; every
/// call happens on the UI thread.
pub trait BrowserControl {
    fn evaluate_javascript(&mut self, script: &str);
    fn load_html(&mut self, html: &str);
    fn load_url(&mut self, url: &str);
    fn load_file(&mut self, file_name: &str, bundle_id: Option<&str>);
    /// Releases the native control. Called exactly once per browser.
    fn close(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Opening,
    Ready,
}

/// Whether an outbound script reached the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// The session was not `Ready`; nothing was evaluated.
    Dropped,
}

/// Single-shot token handed out by [`WebViewSession::open`] and consumed by
/// [`WebViewSession::complete`] when the browser control has been created.
#[must_use = "the request must be completed once the browser control exists"]
#[derive(Debug)]
pub struct OpenRequest {
    session_id: u64,
    id: u64,
}

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

enum Slot<B> {
    Closed,
    Opening { request_id: u64 },
    Ready(B),
}

/// Owns the browser control and tracks `Closed -> Opening -> Ready -> Closed`.
pub struct WebViewSession<B: BrowserControl> {
    id: u64,
    slot: Slot<B>,
    next_request_id: u64,
}

impl<B: BrowserControl> Default for WebViewSession<B> {
    fn default() -> Self {
        WebViewSession::new()
    }
}

impl<B: BrowserControl> WebViewSession<B> {
    pub fn new() -> Self {
        WebViewSession {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            slot: Slot::Closed,
            next_request_id: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.slot {
            Slot::Closed => SessionState::Closed,
            Slot::Opening { .. } => SessionState::Opening,
            Slot::Ready(_) => SessionState::Ready,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.slot, Slot::Ready(_))
    }

    /// Starts creating the browser surface.
    pub fn open(&mut self) -> Result<OpenRequest, BridgeError> {
        if !matches!(self.slot, Slot::Closed) {
            return Err(BridgeError::AlreadyOpen);
        }
        self.next_request_id += 1;
        let id = self.next_request_id;
        self.slot = Slot::Opening { request_id: id };
        debug!("Web view session opening (request #{})", id);
        Ok(OpenRequest {
            session_id: self.id,
            id,
        })
    }

    /// Resolves an open request. Returns `true` if the session became ready.
    ///
    /// A completion that arrives after the session was closed (or reopened),
    /// or whose request came from another session, is still accepted: its
    /// browser is closed straight away.
    pub fn complete<E: Display>(&mut self, request: OpenRequest, result: Result<B, E>) -> bool {
        if request.session_id != self.id {
            warn!(
                "Request #{} belongs to session {}, not {}",
                request.id, request.session_id, self.id
            );
        }
        let current = request.session_id == self.id
            && matches!(self.slot, Slot::Opening { request_id } if request_id == request.id);

        match (current, result) {
            (true, Ok(browser)) => {
                info!("Web view ready (request #{})", request.id);
                self.slot = Slot::Ready(browser);
                true
            }
            (true, Err(e)) => {
                warn!("Web view creation failed: {}", e);
                self.slot = Slot::Closed;
                false
            }
            (false, Ok(mut browser)) => {
                info!(
                    "Late web view completion for request #{}; closing it",
                    request.id
                );
                browser.close();
                false
            }
            (false, Err(e)) => {
                debug!("Stale request #{} failed: {}", request.id, e);
                false
            }
        }
    }

    pub fn close(&mut self) {
        match std::mem::replace(&mut self.slot, Slot::Closed) {
            Slot::Ready(mut browser) => {
                browser.close();
                info!("Web view closed");
            }
            Slot::Opening { request_id } => {
                debug!("Web view closed while request #{} outstanding", request_id);
            }
            Slot::Closed => {}
        }
    }

    pub fn browser_mut(&mut self) -> Option<&mut B> {
        match &mut self.slot {
            Slot::Ready(browser) => Some(browser),
            _ => None,
        }
    }

    /// Evaluates a script if ready; otherwise a no-op.
    pub fn evaluate(&mut self, script: &str) -> Delivery {
        match self.browser_mut() {
            Some(browser) => {
                browser.evaluate_javascript(script);
                Delivery::Sent
            }
            None => {
                debug!("Session not ready; dropping script {}", script);
                Delivery::Dropped
            }
        }
    }
}

impl<B: BrowserControl> Drop for WebViewSession<B> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    /// Everything a browser was asked to do, shared with the test.
    #[derive(Default, Debug)]
    pub struct BrowserLog {
        pub scripts: Vec<String>,
        pub loads: Vec<String>,
        pub closed: usize,
    }

    pub struct RecordingBrowser(pub Rc<RefCell<BrowserLog>>);

    impl BrowserControl for RecordingBrowser {
        fn evaluate_javascript(&mut self, script: &str) {
            self.0.borrow_mut().scripts.push(script.to_owned());
        }
        fn load_html(&mut self, html: &str) {
            self.0.borrow_mut().loads.push(format!("html:{}", html));
        }
        fn load_url(&mut self, url: &str) {
            self.0.borrow_mut().loads.push(format!("url:{}", url));
        }
        fn load_file(&mut self, file_name: &str, _bundle_id: Option<&str>) {
            self.0.borrow_mut().loads.push(format!("file:{}", file_name));
        }
        fn close(&mut self) {
            self.0.borrow_mut().closed += 1;
        }
    }

    fn recording() -> (RecordingBrowser, Rc<RefCell<BrowserLog>>) {
        let log = Rc::new(RefCell::new(BrowserLog::default()));
        (RecordingBrowser(log.clone()), log)
    }

    #[test]
    fn open_then_complete_reaches_ready() {
        let mut session = WebViewSession::new();
        assert_eq!(session.state(), SessionState::Closed);
        let request = session.open().unwrap();
        assert_eq!(session.state(), SessionState::Opening);
        let (browser, _log) = recording();
        assert!(session.complete(request, Ok::<_, String>(browser)));
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn scripts_dropped_until_ready() {
        let mut session = WebViewSession::new();
        assert_eq!(session.evaluate("a()"), Delivery::Dropped);
        let request = session.open().unwrap();
        assert_eq!(session.evaluate("b()"), Delivery::Dropped);
        let (browser, log) = recording();
        session.complete(request, Ok::<_, String>(browser));
        assert_eq!(session.evaluate("c()"), Delivery::Sent);
        assert_eq!(session.evaluate("d()"), Delivery::Sent);
        assert_eq!(log.borrow().scripts, vec!["c()", "d()"]);
    }

    #[test]
    fn double_open_is_an_error() {
        let mut session: WebViewSession<RecordingBrowser> = WebViewSession::new();
        let _request = session.open().unwrap();
        assert!(matches!(session.open(), Err(BridgeError::AlreadyOpen)));
    }

    #[test]
    fn late_completion_after_close_is_torn_down() {
        let mut session = WebViewSession::new();
        let request = session.open().unwrap();
        session.close();
        let (browser, log) = recording();
        assert!(!session.complete(request, Ok::<_, String>(browser)));
        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(log.borrow().closed, 1);
    }

    #[test]
    fn completion_for_superseded_request_is_torn_down() {
        let mut session = WebViewSession::new();
        let first = session.open().unwrap();
        session.close();
        let second = session.open().unwrap();

        let (old_browser, old_log) = recording();
        assert!(!session.complete(first, Ok::<_, String>(old_browser)));
        assert_eq!(session.state(), SessionState::Opening);
        assert_eq!(old_log.borrow().closed, 1);

        let (browser, log) = recording();
        assert!(session.complete(second, Ok::<_, String>(browser)));
        assert_eq!(log.borrow().closed, 0);
    }

    #[test]
    fn request_from_another_session_is_torn_down() {
        let mut first: WebViewSession<RecordingBrowser> = WebViewSession::new();
        let mut second: WebViewSession<RecordingBrowser> = WebViewSession::new();
        let first_request = first.open().unwrap();
        let second_request = second.open().unwrap();

        let (browser, log) = recording();
        assert!(!second.complete(first_request, Ok::<_, String>(browser)));
        assert_eq!(second.state(), SessionState::Opening);
        assert_eq!(first.state(), SessionState::Opening);
        assert_eq!(log.borrow().closed, 1);

        let (browser, log) = recording();
        assert!(second.complete(second_request, Ok::<_, String>(browser)));
        assert_eq!(log.borrow().closed, 0);
    }

    #[test]
    fn failed_creation_returns_to_closed() {
        let mut session: WebViewSession<RecordingBrowser> = WebViewSession::new();
        let request = session.open().unwrap();
        assert!(!session.complete(request, Err("no runtime")));
        assert_eq!(session.state(), SessionState::Closed);
        assert!(session.open().is_ok());
    }

    #[test]
    fn close_and_drop_release_browser_once() {
        let (browser, log) = recording();
        {
            let mut session = WebViewSession::new();
            let request = session.open().unwrap();
            session.complete(request, Ok::<_, String>(browser));
            session.close();
            session.close();
        }
        assert_eq!(log.borrow().closed, 1);

        let (browser, log) = recording();
        {
            let mut session = WebViewSession::new();
            let request = session.open().unwrap();
            session.complete(request, Ok::<_, String>(browser));
        }
        assert_eq!(log.borrow().closed, 1);
    }
}
