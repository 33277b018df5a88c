//! Display context for platform communication.
//!
//! The `QuweiContext` struct is a plain data container the host keyboard
//! reads after each key event: the digits being composed, the previewed
//! character, text to insert and a status line. It folds the session's
//! actions into those fields so a front end only has to render them.
//!
//! Design philosophy: zero abstraction, just data transfer. Platform code
//! reads fields directly and consumes `commit_text` / `pending_deletes`.

use crate::session::{Action, PassthroughKey};

/// Indicator shown after a code that names no character.
pub const DEFAULT_NOT_FOUND_TEXT: &str = "未找到";

/// Keyboard display state.
///
/// # Fields
///
/// - `preedit_text`: digits typed so far (e.g. "160")
/// - `candidate_text`: previewed character, empty when there is none
/// - `commit_text`: text the host should insert (consume and clear)
/// - `pending_deletes`: backward deletes the host should apply to its text
/// - `auxiliary_text`: status line, e.g. "16区01位" or the not-found text
/// - `switch_requested`: the user asked for the next keyboard
#[derive(Debug, Clone)]
pub struct QuweiContext {
    pub preedit_text: String,
    pub candidate_text: String,
    pub commit_text: String,
    pub pending_deletes: usize,
    pub auxiliary_text: String,
    pub switch_requested: bool,
    not_found_text: String,
}

impl Default for QuweiContext {
    fn default() -> Self {
        Self::with_not_found_text(DEFAULT_NOT_FOUND_TEXT)
    }
}

impl QuweiContext {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom not-found indicator.
    pub fn with_not_found_text(text: impl Into<String>) -> Self {
        Self {
            preedit_text: String::new(),
            candidate_text: String::new(),
            commit_text: String::new(),
            pending_deletes: 0,
            auxiliary_text: String::new(),
            switch_requested: false,
            not_found_text: text.into(),
        }
    }

    /// Fold one session action into the display state.
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::Preview(preview) => {
                self.preedit_text = preview.input.clone();
                match &preview.candidate {
                    Some(entry) => {
                        self.candidate_text = entry.character.clone();
                        self.auxiliary_text = entry.code_description();
                    }
                    None => {
                        self.candidate_text.clear();
                        self.auxiliary_text.clear();
                    }
                }
            }
            Action::Commit(entry) => {
                self.clear();
                self.commit_text.push_str(&entry.character);
            }
            Action::CommitFailed { code } => {
                self.clear();
                self.auxiliary_text = format!("{} {}", code, self.not_found_text);
            }
            Action::PassthroughDelete => {
                if self.commit_text.pop().is_none() {
                    self.pending_deletes += 1;
                }
            }
            Action::Passthrough { key, discarded } => {
                if *discarded {
                    self.clear();
                }
                match key {
                    PassthroughKey::ModeSwitch => self.switch_requested = true,
                    _ => {
                        if let Some(text) = key.text() {
                            self.commit_text.push_str(text);
                        }
                    }
                }
            }
            Action::Cleared => self.clear(),
            Action::Ignored => {}
        }
    }

    /// Clear the visible state (preedit, candidate, auxiliary).
    /// Does NOT clear commit text or pending deletes (the host consumes those).
    pub fn clear(&mut self) {
        self.preedit_text.clear();
        self.candidate_text.clear();
        self.auxiliary_text.clear();
    }

    /// Take the commit text, leaving it empty.
    pub fn take_commit(&mut self) -> String {
        std::mem::take(&mut self.commit_text)
    }

    /// Take the pending delete count, leaving it zero.
    pub fn take_deletes(&mut self) -> usize {
        std::mem::take(&mut self.pending_deletes)
    }

    /// Take the keyboard switch request.
    pub fn take_switch_request(&mut self) -> bool {
        std::mem::take(&mut self.switch_requested)
    }

    /// Check if there's any visible state.
    pub fn has_visible_state(&self) -> bool {
        !self.preedit_text.is_empty() || !self.candidate_text.is_empty()
    }

    /// Check if there's text to commit.
    pub fn has_commit(&self) -> bool {
        !self.commit_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{InputSession, KeyEvent};

    fn passthrough(key: PassthroughKey) -> Action {
        Action::Passthrough {
            key,
            discarded: false,
        }
    }

    fn feed(session: &mut InputSession, ctx: &mut QuweiContext, input: &str) {
        for key in input.chars().filter_map(KeyEvent::from_char) {
            let action = session.process_key(key);
            ctx.apply(&action);
        }
    }

    #[test]
    fn test_preview_then_commit() {
        let mut session = InputSession::new();
        let mut ctx = QuweiContext::new();

        feed(&mut session, &mut ctx, "16");
        assert_eq!(ctx.preedit_text, "16");
        assert_eq!(ctx.candidate_text, "啊");
        assert_eq!(ctx.auxiliary_text, "16区01位");
        assert!(ctx.has_visible_state());

        feed(&mut session, &mut ctx, "01");
        assert!(!ctx.has_visible_state());
        assert_eq!(ctx.take_commit(), "啊");
        assert!(!ctx.has_commit());
    }

    #[test]
    fn test_failed_commit_shows_indicator() {
        let mut session = InputSession::new();
        let mut ctx = QuweiContext::with_not_found_text("not found");
        feed(&mut session, &mut ctx, "0101");
        assert_eq!(ctx.auxiliary_text, "0101 not found");
        assert!(!ctx.has_commit());
    }

    #[test]
    fn test_passthrough_keys() {
        let mut ctx = QuweiContext::new();
        ctx.apply(&passthrough(PassthroughKey::Space));
        ctx.apply(&passthrough(PassthroughKey::Newline));
        assert_eq!(ctx.commit_text, " \n");

        ctx.apply(&Action::PassthroughDelete);
        assert_eq!(ctx.commit_text, " ");
        ctx.take_commit();
        ctx.apply(&Action::PassthroughDelete);
        assert_eq!(ctx.take_deletes(), 1);
        assert_eq!(ctx.pending_deletes, 0);

        ctx.apply(&passthrough(PassthroughKey::ModeSwitch));
        assert!(ctx.take_switch_request());
        assert!(!ctx.switch_requested);
    }

    #[test]
    fn test_discarding_passthrough_clears_display() {
        let config = crate::Config {
            clear_on_passthrough: true,
            ..crate::Config::default()
        };
        let mut session = config.session();
        let mut ctx = config.context();

        feed(&mut session, &mut ctx, "16 ");
        assert!(!ctx.has_visible_state());
        assert!(ctx.auxiliary_text.is_empty());
        assert_eq!(ctx.take_commit(), " ");

        // without the policy the preview survives the space
        let mut session = InputSession::new();
        let mut ctx = QuweiContext::new();
        feed(&mut session, &mut ctx, "16 ");
        assert_eq!(ctx.preedit_text, "16");
        assert_eq!(ctx.candidate_text, "啊");
    }
}
