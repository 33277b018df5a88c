//! Keystroke session for position-code input.
//!
//! `InputSession` turns a stream of key events into actions for the host:
//! digits accumulate in a four-slot buffer, the fourth digit resolves the
//! code immediately, and keys the session does not interpret are handed
//! back. The host owns the text being edited; the session only owns its
//! digit buffer.
//!
//! ```text
//! Empty --Digit--> Accumulating(1..=3) --4th Digit--> [resolve] --> Empty
//!   ^                  |  ^                                          |
//!   |                  |  +--Delete (len > 1)                        |
//!   +----Delete/Clear--+                                             |
//!   +----------------------------------------------------------------+
//! ```
//!
//! Every event has a defined effect; the session never returns an error.

use crate::codec::PositionCodec;
use crate::input_buffer::{Digit, InputBuffer};
use crate::position::{in_range, split_code, CharacterEntry};
use crate::Config;
use tracing::{debug, trace};

/// Keys that the session hands back to the host untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassthroughKey {
    Space,
    Newline,
    /// Request to switch to the next keyboard / input method.
    ModeSwitch,
}

impl PassthroughKey {
    /// Text the host inserts for this key, if any.
    pub fn text(&self) -> Option<&'static str> {
        match self {
            PassthroughKey::Space => Some(" "),
            PassthroughKey::Newline => Some("\n"),
            PassthroughKey::ModeSwitch => None,
        }
    }
}

/// Key events accepted by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// A decimal digit key
    Digit(Digit),
    /// Backspace
    Delete,
    /// Space, return or the keyboard switch key
    Other(PassthroughKey),
    /// Reset the session (e.g. the host switched text fields)
    Clear,
}

impl KeyEvent {
    /// Digit event from a numeric value; `None` unless 0..=9.
    pub fn digit(value: u8) -> Option<Self> {
        Digit::new(value).map(KeyEvent::Digit)
    }

    /// Map a typed character to an event.
    ///
    /// ASCII digits, backspace (`\u{8}` / `\u{7f}`), space and newline are
    /// recognised. Other characters are not events of this keyboard.
    pub fn from_char(ch: char) -> Option<Self> {
        if let Some(digit) = Digit::from_char(ch) {
            return Some(KeyEvent::Digit(digit));
        }
        match ch {
            '\u{8}' | '\u{7f}' => Some(KeyEvent::Delete),
            ' ' => Some(KeyEvent::Other(PassthroughKey::Space)),
            '\n' | '\r' => Some(KeyEvent::Other(PassthroughKey::Newline)),
            _ => None,
        }
    }
}

/// Live view of a partially typed code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    /// Digits typed so far
    pub input: String,
    /// Zone named by the first two digits, when it is in 1..=94
    pub zone: Option<u8>,
    /// First character whose code starts with the typed digits
    pub candidate: Option<CharacterEntry>,
}

impl Preview {
    /// True when there is nothing to show besides the raw digits.
    pub fn is_empty(&self) -> bool {
        self.candidate.is_none()
    }
}

/// What the host should do after a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Buffer changed; refresh the display
    Preview(Preview),
    /// Insert this character
    Commit(CharacterEntry),
    /// Four digits were typed but name no character; nothing is inserted
    CommitFailed { code: String },
    /// Buffer was empty; delete backwards in the host's own text
    PassthroughDelete,
    /// Apply the key to the host's own text. `discarded` is set when the
    /// pending digits were dropped along the way.
    Passthrough { key: PassthroughKey, discarded: bool },
    /// Buffer was reset by `Clear`
    Cleared,
    /// Digit arrived while the buffer was full; nothing changed
    Ignored,
}

/// Coarse session state derived from the buffer length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Accumulating,
}

/// One keyboard session.
///
/// Single writer: events must arrive one at a time, in order.
#[derive(Debug, Clone, Default)]
pub struct InputSession {
    codec: PositionCodec,
    buffer: InputBuffer,
    clear_on_passthrough: bool,
}

impl InputSession {
    /// Create a new empty session using the default codec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session around a specific codec.
    pub fn with_codec(codec: PositionCodec) -> Self {
        Self {
            codec,
            ..Self::default()
        }
    }

    /// Create a session honouring the charset and passthrough policy of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            codec: PositionCodec::with_charset(config.charset),
            buffer: InputBuffer::new(),
            clear_on_passthrough: config.clear_on_passthrough,
        }
    }

    pub fn codec(&self) -> &PositionCodec {
        &self.codec
    }

    /// Get the digit buffer.
    pub fn input_buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    pub fn state(&self) -> SessionState {
        if self.buffer.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Accumulating
        }
    }

    /// Process one key event and report what the host should do.
    pub fn process_key(&mut self, key: KeyEvent) -> Action {
        trace!(?key, buffer = self.buffer.text(), "process key");
        match key {
            KeyEvent::Digit(digit) => self.push_digit(digit),
            KeyEvent::Delete => {
                if self.buffer.pop() {
                    Action::Preview(self.preview())
                } else {
                    Action::PassthroughDelete
                }
            }
            KeyEvent::Other(key) => {
                let discarded = self.clear_on_passthrough && !self.buffer.is_empty();
                if discarded {
                    debug!(buffer = self.buffer.text(), "pending code discarded");
                    self.buffer.clear();
                }
                Action::Passthrough { key, discarded }
            }
            KeyEvent::Clear => {
                self.clear();
                Action::Cleared
            }
        }
    }

    /// Feed several events, collecting the actions in order.
    pub fn process_keys<I>(&mut self, keys: I) -> Vec<Action>
    where
        I: IntoIterator<Item = KeyEvent>,
    {
        keys.into_iter().map(|key| self.process_key(key)).collect()
    }

    fn push_digit(&mut self, digit: Digit) -> Action {
        if !self.buffer.push(digit) {
            return Action::Ignored;
        }
        if self.buffer.is_full() {
            self.resolve_buffer()
        } else {
            Action::Preview(self.preview())
        }
    }

    /// Resolve the four buffered digits and reset the buffer.
    fn resolve_buffer(&mut self) -> Action {
        let code = self.buffer.take();
        let resolved = split_code(&code)
            .and_then(|(zone, position)| self.codec.resolve(zone, position));
        match resolved {
            Ok(entry) => {
                debug!(code = %code, character = %entry.character, "commit");
                Action::Commit(entry)
            }
            Err(err) => {
                debug!(code = %code, error = %err, "position code did not resolve");
                Action::CommitFailed { code }
            }
        }
    }

    /// Preview of the current buffer.
    ///
    /// Zones 00 and 95-99 give no preview rather than an error.
    pub fn preview(&self) -> Preview {
        let input = self.buffer.text().to_string();
        let zone = self
            .buffer
            .zone()
            .filter(|&zone| in_range(zone))
            .map(|zone| zone as u8);
        let candidate = zone.and_then(|_| self.codec.entries_with_prefix(&input).into_iter().next());
        Preview {
            input,
            zone,
            candidate,
        }
    }

    /// Every character the typed digits can still complete to.
    ///
    /// Empty until a valid zone has been typed.
    pub fn candidates(&self) -> Vec<CharacterEntry> {
        match self.buffer.zone() {
            Some(zone) if in_range(zone) => self.codec.entries_with_prefix(self.buffer.text()),
            _ => Vec::new(),
        }
    }

    /// Reset to `Empty` regardless of the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
