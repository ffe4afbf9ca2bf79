//! Bridge between a web view hosted plugin UI and the native parameter and
//! MIDI model.
//!
//! Outbound events become JavaScript calls (`SCVFD`, `SCMFD`, `SPVFD`,
//! `SAMFD`, `SMMFD`) evaluated in the page; the page posts JSON messages
//! back, which are decoded and forwarded to an [`EditorDelegate`].

pub mod bridge;
pub mod delegate;
pub mod error;
pub mod keys;
pub mod midi;
pub mod monitor;
pub mod params;
pub mod session;

pub use bridge::{
    codec::{base64_decode, base64_encode, encode_outbound},
    inbound::decode_inbound,
    messages::{InboundMessage, OutboundMessage},
    WebViewEditor,
};
pub use delegate::EditorDelegate;
pub use error::{BridgeError, DecodeError, ParamError};
pub use keys::{KeyPress, VirtualKey};
pub use midi::MidiMessage;
pub use params::{Param, ParamKind, ParamList, ParamShape, ParameterStore};
pub use session::{BrowserControl, Delivery, OpenRequest, SessionState, WebViewSession};
