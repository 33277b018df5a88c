//! libquwei-core
//!
//! Position-code (区位码) lookup and keystroke handling shared by the
//! libquwei front ends.
//!
//! A position code is four digits: a two-digit zone and a two-digit position,
//! each 01-94, naming a cell of the GB 2312 grid. This crate translates codes
//! to characters and turns digit keystrokes into committed characters.
//!
//! Public API:
//! - `PositionCodec` - Stateless code ⇄ character translation and table queries
//! - `PositionCode`, `CharacterEntry` - Validated codes and resolved table cells
//! - `InputSession` - Keystroke state machine emitting `Action`s for the host
//! - `QuweiContext` - Display state folded from session actions
//! - `Config` - Charset and session options
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::CodeError;

pub mod position;
pub use position::{CharacterEntry, PositionCode};

pub mod codec;
pub use codec::{Charset, PositionCodec};

pub mod input_buffer;
pub use input_buffer::{Digit, InputBuffer};

pub mod session;
pub use session::{Action, InputSession, KeyEvent, PassthroughKey, Preview, SessionState};

pub mod context;
pub use context::QuweiContext;

/// Generic configuration for the position-code core.
///
/// Front-end options (grid layout, logging) belong in `QuweiConfig` in the
/// `libquwei` crate, which flattens this struct.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Which decoded cells count as characters ("gb18030" or "gb2312")
    pub charset: Charset,

    /// Zone a table browser opens on (16 is the first hanzi zone)
    pub default_zone: u8,

    /// Discard a partially typed code when space/return/switch is pressed
    pub clear_on_passthrough: bool,

    /// Indicator shown when a typed code names no character
    pub not_found_text: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            charset: Charset::Gb18030,
            default_zone: 16,
            clear_on_passthrough: false,
            not_found_text: context::DEFAULT_NOT_FOUND_TEXT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Reject a default zone outside 1..=94.
    pub fn validate(&self) -> Result<(), CodeError> {
        if !position::in_range(self.default_zone as u32) {
            return Err(CodeError::OutOfRange {
                zone: self.default_zone as u32,
                position: position::MIN_COORD,
            });
        }
        Ok(())
    }

    /// Codec matching this configuration.
    pub fn codec(&self) -> PositionCodec {
        PositionCodec::with_charset(self.charset)
    }

    /// Fresh keystroke session matching this configuration.
    pub fn session(&self) -> InputSession {
        InputSession::from_config(self)
    }

    /// Display context using the configured not-found indicator.
    pub fn context(&self) -> QuweiContext {
        QuweiContext::with_not_found_text(self.not_found_text.clone())
    }
}
