//! libquwei crate root
//!
//! Front ends for position-code (区位码) input built on `libquwei-core`: a
//! terminal keyboard that plays the host role around an `InputSession`, text
//! rendering of the code table, and the front-end configuration.
//!
//! Public API exported here:
//! - `QuweiConfig` from `config`
//! - `Keyboard` from `keyboard`
//! - grid/detail rendering from `table`

pub mod config;
pub mod keyboard;
pub mod table;

// Re-export the core types callers need alongside the front ends.
pub use libquwei_core::{
    Action, CharacterEntry, Charset, CodeError, Config, Digit, InputSession, KeyEvent,
    PassthroughKey, PositionCode, PositionCodec, Preview, QuweiContext, SessionState,
};

pub use config::QuweiConfig;
pub use keyboard::{key_for_char, Keyboard};
pub use table::{render_detail, render_grid, zone_label};

/// Create a keyboard from a front-end configuration.
pub fn create_keyboard(config: &QuweiConfig) -> Keyboard {
    Keyboard::new(config.base())
}
