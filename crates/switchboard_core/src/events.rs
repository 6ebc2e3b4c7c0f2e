//! Event model
//!
//! Platform-agnostic description of the interactions the widget engine
//! reacts to. Events are delivered to the engine synchronously, one at a
//! time, exactly like handlers running on a browser event loop.

use serde::Deserialize;

/// The interaction kinds the engine dispatches on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Primary-button click (bubbles)
    Click,
    /// Key pressed while the document has focus
    KeyDown,
    /// Pointer entered an element (does not bubble)
    PointerEnter,
    /// Pointer left an element (does not bubble)
    PointerLeave,
}

impl EventType {
    /// Whether the event walks up the ancestor chain during delegation
    pub const fn bubbles(self) -> bool {
        matches!(self, EventType::Click | EventType::KeyDown)
    }
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Raw key of the node the event originated on
    pub target: u64,
    pub data: EventData,
    pub timestamp_ms: u64,
    pub propagation_stopped: bool,
}

impl Event {
    /// Create an event with no payload
    pub fn new(event_type: EventType, target: u64) -> Self {
        Self {
            event_type,
            target,
            data: EventData::None,
            timestamp_ms: 0,
            propagation_stopped: false,
        }
    }

    /// Create a click event at the given page position
    pub fn click(target: u64, x: f32, y: f32) -> Self {
        Self {
            data: EventData::Pointer { x, y, button: 0 },
            ..Self::new(EventType::Click, target)
        }
    }

    /// Create a key-down event
    pub fn key_down(target: u64, key: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            data: EventData::Key {
                key,
                modifiers,
                repeat: false,
            },
            ..Self::new(EventType::KeyDown, target)
        }
    }

    pub fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// The key carried by a keyboard event
    pub fn key(&self) -> Option<KeyCode> {
        match self.data {
            EventData::Key { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
        button: u8,
    },
    Key {
        /// Virtual key code (use KeyCode constants)
        key: KeyCode,
        /// Keyboard modifier flags
        modifiers: Modifiers,
        /// Whether this is a repeat event
        repeat: bool,
    },
    None,
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct KeyCode(pub u32);

impl KeyCode {
    // Special keys
    pub const BACKSPACE: KeyCode = KeyCode(0x08);
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);
    pub const DELETE: KeyCode = KeyCode(0x7F);

    // Arrow keys
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    // Navigation keys
    pub const HOME: KeyCode = KeyCode(0x24);
    pub const END: KeyCode = KeyCode(0x23);

    // Unknown/unmapped key
    pub const UNKNOWN: KeyCode = KeyCode(0);

    const NAMED: [(&'static str, KeyCode); 12] = [
        ("Backspace", KeyCode::BACKSPACE),
        ("Tab", KeyCode::TAB),
        ("Enter", KeyCode::ENTER),
        ("Escape", KeyCode::ESCAPE),
        (" ", KeyCode::SPACE),
        ("Delete", KeyCode::DELETE),
        ("ArrowLeft", KeyCode::LEFT),
        ("ArrowUp", KeyCode::UP),
        ("ArrowRight", KeyCode::RIGHT),
        ("ArrowDown", KeyCode::DOWN),
        ("Home", KeyCode::HOME),
        ("End", KeyCode::END),
    ];

    /// Resolve a DOM `KeyboardEvent.key` name
    ///
    /// Single printable characters map to their uppercase code point, which
    /// matches the virtual-key numbering for letters and digits.
    pub fn from_name(name: &str) -> Option<KeyCode> {
        match name {
            "Esc" => return Some(KeyCode::ESCAPE),
            "Space" | "Spacebar" => return Some(KeyCode::SPACE),
            _ => {}
        }
        if let Some((_, code)) = Self::NAMED.iter().find(|(n, _)| *n == name) {
            return Some(*code);
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphanumeric() => {
                Some(KeyCode(c.to_ascii_uppercase() as u32))
            }
            _ => None,
        }
    }

    /// The DOM key name, when this code has one
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(_, code)| *code == self)
            .map(|(n, _)| *n)
    }
}

impl TryFrom<String> for KeyCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        KeyCode::from_name(&value).ok_or_else(|| format!("unknown key name '{value}'"))
    }
}

/// Keyboard modifier flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { bits: 0 };
    pub const SHIFT: u8 = 0b0001;
    pub const CTRL: u8 = 0b0010;
    pub const ALT: u8 = 0b0100;
    pub const META: u8 = 0b1000;

    /// Create new modifiers from flags
    pub const fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        if meta {
            bits |= Self::META;
        }
        Self { bits }
    }

    pub const fn shift(&self) -> bool {
        self.bits & Self::SHIFT != 0
    }

    pub const fn ctrl(&self) -> bool {
        self.bits & Self::CTRL != 0
    }

    pub const fn alt(&self) -> bool {
        self.bits & Self::ALT != 0
    }

    pub const fn meta(&self) -> bool {
        self.bits & Self::META != 0
    }

    /// Check if any modifier is pressed
    pub const fn any(&self) -> bool {
        self.bits != 0
    }
}
