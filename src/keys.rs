//! Key events forwarded from the web UI.
//!
//! Browsers report the legacy DOM `keyCode`, which is translated here into
//! the virtual key codes the native editor understands.

/// Virtual key code. Values follow the Windows virtual-key table, which the
/// DOM key codes were modelled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VirtualKey(pub u32);

impl VirtualKey {
    pub const NONE: VirtualKey = VirtualKey(0);
    pub const BACK: VirtualKey = VirtualKey(0x08);
    pub const TAB: VirtualKey = VirtualKey(0x09);
    pub const CLEAR: VirtualKey = VirtualKey(0x0C);
    pub const RETURN: VirtualKey = VirtualKey(0x0D);
    pub const SHIFT: VirtualKey = VirtualKey(0x10);
    pub const CONTROL: VirtualKey = VirtualKey(0x11);
    pub const MENU: VirtualKey = VirtualKey(0x12);
    pub const PAUSE: VirtualKey = VirtualKey(0x13);
    pub const CAPITAL: VirtualKey = VirtualKey(0x14);
    pub const ESCAPE: VirtualKey = VirtualKey(0x1B);
    pub const SPACE: VirtualKey = VirtualKey(0x20);
    pub const PRIOR: VirtualKey = VirtualKey(0x21);
    pub const NEXT: VirtualKey = VirtualKey(0x22);
    pub const END: VirtualKey = VirtualKey(0x23);
    pub const HOME: VirtualKey = VirtualKey(0x24);
    pub const LEFT: VirtualKey = VirtualKey(0x25);
    pub const UP: VirtualKey = VirtualKey(0x26);
    pub const RIGHT: VirtualKey = VirtualKey(0x27);
    pub const DOWN: VirtualKey = VirtualKey(0x28);
    pub const SELECT: VirtualKey = VirtualKey(0x29);
    pub const PRINT: VirtualKey = VirtualKey(0x2A);
    pub const SNAPSHOT: VirtualKey = VirtualKey(0x2C);
    pub const INSERT: VirtualKey = VirtualKey(0x2D);
    pub const DELETE: VirtualKey = VirtualKey(0x2E);
    pub const HELP: VirtualKey = VirtualKey(0x2F);
    pub const KEY_0: VirtualKey = VirtualKey(0x30);
    pub const KEY_A: VirtualKey = VirtualKey(0x41);
    pub const LWIN: VirtualKey = VirtualKey(0x5B);
    pub const NUMPAD0: VirtualKey = VirtualKey(0x60);
    pub const MULTIPLY: VirtualKey = VirtualKey(0x6A);
    pub const ADD: VirtualKey = VirtualKey(0x6B);
    pub const SEPARATOR: VirtualKey = VirtualKey(0x6C);
    pub const SUBTRACT: VirtualKey = VirtualKey(0x6D);
    pub const DECIMAL: VirtualKey = VirtualKey(0x6E);
    pub const DIVIDE: VirtualKey = VirtualKey(0x6F);
    pub const F1: VirtualKey = VirtualKey(0x70);
    pub const F24: VirtualKey = VirtualKey(0x87);
    pub const NUMLOCK: VirtualKey = VirtualKey(0x90);
    pub const SCROLL: VirtualKey = VirtualKey(0x91);
}

/// Maps a DOM `keyCode` to a virtual key, or `VirtualKey::NONE` when the
/// key has no native counterpart.
pub fn dom_key_to_virtual_key(dom_code: u32) -> VirtualKey {
    match dom_code {
        8 => VirtualKey::BACK,
        9 => VirtualKey::TAB,
        12 => VirtualKey::CLEAR,
        13 => VirtualKey::RETURN,
        16 => VirtualKey::SHIFT,
        17 => VirtualKey::CONTROL,
        18 => VirtualKey::MENU,
        19 => VirtualKey::PAUSE,
        20 => VirtualKey::CAPITAL,
        27 => VirtualKey::ESCAPE,
        32 => VirtualKey::SPACE,
        33 => VirtualKey::PRIOR,
        34 => VirtualKey::NEXT,
        35 => VirtualKey::END,
        36 => VirtualKey::HOME,
        37 => VirtualKey::LEFT,
        38 => VirtualKey::UP,
        39 => VirtualKey::RIGHT,
        40 => VirtualKey::DOWN,
        41 => VirtualKey::SELECT,
        42 => VirtualKey::PRINT,
        44 => VirtualKey::SNAPSHOT,
        45 => VirtualKey::INSERT,
        46 => VirtualKey::DELETE,
        47 => VirtualKey::HELP,
        // digits and letters share their ASCII values
        48..=57 => VirtualKey(dom_code),
        65..=90 => VirtualKey(dom_code),
        91 | 92 => VirtualKey::LWIN,
        96..=105 => VirtualKey(dom_code),
        106 => VirtualKey::MULTIPLY,
        107 => VirtualKey::ADD,
        108 => VirtualKey::SEPARATOR,
        109 => VirtualKey::SUBTRACT,
        110 => VirtualKey::DECIMAL,
        111 => VirtualKey::DIVIDE,
        112..=135 => VirtualKey(dom_code),
        144 => VirtualKey::NUMLOCK,
        145 => VirtualKey::SCROLL,
        _ => VirtualKey::NONE,
    }
}

/// A key event decoded from the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Text produced by the key, possibly empty.
    pub utf8: String,
    pub dom_key_code: u32,
    pub virtual_key: VirtualKey,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyPress {
    pub fn from_dom(dom_key_code: u32, utf8: String, shift: bool, ctrl: bool, alt: bool) -> Self {
        KeyPress {
            utf8,
            dom_key_code,
            virtual_key: dom_key_to_virtual_key(dom_key_code),
            shift,
            ctrl,
            alt,
        }
    }
}
