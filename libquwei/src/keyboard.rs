//! Terminal stand-in for the position-code keyboard.
//!
//! `Keyboard` plays the host role around an `InputSession`: it maps typed
//! characters to key events, folds the resulting actions into a
//! `QuweiContext` for display, and applies commits and deletes to the text
//! document it owns (the "text field" the keyboard types into).

use libquwei_core::{Action, Config, InputSession, KeyEvent, PassthroughKey, QuweiContext};
use tracing::debug;

/// Map a terminal character to a keyboard event.
///
/// Besides what `KeyEvent::from_char` accepts, `-` deletes, `~` is the
/// keyboard switch (the long-press on `0` of the on-screen keyboard) and
/// `!` clears the pending code.
pub fn key_for_char(ch: char) -> Option<KeyEvent> {
    match ch {
        '-' => Some(KeyEvent::Delete),
        '~' => Some(KeyEvent::Other(PassthroughKey::ModeSwitch)),
        '!' => Some(KeyEvent::Clear),
        _ => KeyEvent::from_char(ch),
    }
}

/// Banner of the interactive keyboard, listing the keys `key_for_char` maps.
pub const HELP: &str = "quwei keyboard: type position codes and press Enter
Example: 1601 5448 for 啊中
'-' deletes, '!' clears the pending code, '~' switches keyboards.
Ctrl-D to exit.";

/// A session, its display context and the document being edited.
#[derive(Debug, Clone)]
pub struct Keyboard {
    session: InputSession,
    context: QuweiContext,
    document: String,
    switches: usize,
}

impl Keyboard {
    pub fn new(config: &Config) -> Self {
        Self {
            session: config.session(),
            context: config.context(),
            document: String::new(),
            switches: 0,
        }
    }

    /// Press one key; the document is updated before this returns.
    pub fn press(&mut self, key: KeyEvent) -> Action {
        let action = self.session.process_key(key);
        self.context.apply(&action);

        for _ in 0..self.context.take_deletes() {
            self.document.pop();
        }
        self.document.push_str(&self.context.take_commit());
        if self.context.take_switch_request() {
            self.switches += 1;
            debug!(switches = self.switches, "keyboard switch requested");
        }
        action
    }

    /// Type a line of terminal input. Unknown characters are skipped.
    pub fn type_str(&mut self, input: &str) -> Vec<Action> {
        input
            .chars()
            .filter_map(key_for_char)
            .map(|key| self.press(key))
            .collect()
    }

    /// Text committed so far.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Take the document, leaving it empty.
    pub fn take_document(&mut self) -> String {
        std::mem::take(&mut self.document)
    }

    pub fn context(&self) -> &QuweiContext {
        &self.context
    }

    pub fn session(&self) -> &InputSession {
        &self.session
    }

    /// How many times the switch key was pressed.
    pub fn switch_count(&self) -> usize {
        self.switches
    }

    /// Status line in the style of the on-screen keyboard:
    /// `区位码: 160  啊  16区01位`.
    pub fn status_line(&self) -> String {
        let mut line = format!("区位码: {}", self.context.preedit_text);
        if !self.context.candidate_text.is_empty() {
            line.push_str("  ");
            line.push_str(&self.context.candidate_text);
        }
        if !self.context.auxiliary_text.is_empty() {
            line.push_str("  ");
            line.push_str(&self.context.auxiliary_text);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes_into_document() {
        let mut kb = Keyboard::new(&Config::default());
        kb.type_str("16015448");
        assert_eq!(kb.document(), "啊中");
        kb.type_str(" 3021");
        assert_eq!(kb.document(), "啊中 镜");
    }

    #[test]
    fn test_delete_edits_buffer_then_document() {
        let mut kb = Keyboard::new(&Config::default());
        kb.type_str("1601");
        kb.type_str("54-");
        assert_eq!(kb.session().input_buffer().text(), "5");
        kb.type_str("--");
        assert_eq!(kb.document(), "");
    }

    #[test]
    fn test_status_line() {
        let mut kb = Keyboard::new(&Config::default());
        kb.type_str("16");
        assert_eq!(kb.status_line(), "区位码: 16  啊  16区01位");
        kb.type_str("!");
        assert_eq!(kb.status_line(), "区位码: ");
        kb.type_str("0101");
        assert_eq!(kb.status_line(), "区位码:   0101 未找到");
    }

    #[test]
    fn test_help_banner() {
        assert!(HELP.starts_with("quwei keyboard: "));
        assert!(!HELP.contains('\u{2014}'));
        assert_eq!(key_for_char('-'), Some(KeyEvent::Delete));
        assert_eq!(key_for_char('!'), Some(KeyEvent::Clear));
        assert_eq!(
            key_for_char('~'),
            Some(KeyEvent::Other(PassthroughKey::ModeSwitch))
        );

        let mut kb = Keyboard::new(&Config::default());
        kb.type_str("16015448");
        assert_eq!(kb.document(), "啊中");
    }

    #[test]
    fn test_switch_key() {
        let mut kb = Keyboard::new(&Config::default());
        kb.type_str("~x~");
        assert_eq!(kb.switch_count(), 2);
        assert_eq!(kb.document(), "");
    }
}
