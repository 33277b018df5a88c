//! Bounded digit buffer for position-code input.
//!
//! The buffer holds the raw digits typed so far (e.g. "160") and nothing
//! else. It never grows past four digits; interpreting the digits is the
//! session's job.

use crate::error::CodeError;
use crate::position::CODE_LEN;

/// A single validated decimal digit key.
///
/// Constructed only through [`Digit::new`] or [`Digit::from_char`], so a
/// non-digit payload is rejected before it reaches the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    /// Accept values 0..=9.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    /// Accept ASCII `'0'..='9'`.
    pub fn from_char(ch: char) -> Option<Self> {
        Self::try_from(ch).ok()
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn as_char(&self) -> char {
        (b'0' + self.0) as char
    }
}

impl TryFrom<char> for Digit {
    type Error = CodeError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        ch.to_digit(10)
            .map(|d| Self(d as u8))
            .ok_or(CodeError::InvalidDigit(ch))
    }
}

/// Up to four typed digits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    digits: String,
}

impl InputBuffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self {
            digits: String::with_capacity(CODE_LEN),
        }
    }

    /// The digits typed so far.
    pub fn text(&self) -> &str {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// True once four digits are present.
    pub fn is_full(&self) -> bool {
        self.digits.len() >= CODE_LEN
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Append a digit. Returns false (and leaves the buffer unchanged) when
    /// the buffer is already full.
    pub fn push(&mut self, digit: Digit) -> bool {
        if self.is_full() {
            return false;
        }
        self.digits.push(digit.as_char());
        true
    }

    /// Remove the last digit (backspace). Returns true if one was removed.
    pub fn pop(&mut self) -> bool {
        self.digits.pop().is_some()
    }

    /// Take the contents, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.digits)
    }

    /// The two-digit zone group, once at least two digits are present.
    pub fn zone(&self) -> Option<u32> {
        self.digits.get(..2).and_then(|s| s.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: u8) -> Digit {
        Digit::new(v).unwrap()
    }

    #[test]
    fn test_digit_validation() {
        assert_eq!(Digit::new(9).map(|d| d.value()), Some(9));
        assert!(Digit::new(10).is_none());
        assert_eq!(Digit::from_char('7').map(|d| d.as_char()), Some('7'));
        assert!(Digit::from_char('a').is_none());
        assert!(Digit::from_char('٣').is_none());
        assert_eq!(Digit::try_from('x'), Err(CodeError::InvalidDigit('x')));
    }

    #[test]
    fn test_push_is_bounded() {
        let mut buf = InputBuffer::new();
        for v in [1, 6, 0, 1] {
            assert!(buf.push(d(v)));
        }
        assert!(buf.is_full());
        assert!(!buf.push(d(5)));
        assert_eq!(buf.text(), "1601");
    }

    #[test]
    fn test_pop_and_take() {
        let mut buf = InputBuffer::new();
        assert!(!buf.pop());
        buf.push(d(3));
        buf.push(d(0));
        assert!(buf.pop());
        assert_eq!(buf.text(), "3");
        buf.push(d(0));
        assert_eq!(buf.take(), "30");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_zone_group() {
        let mut buf = InputBuffer::new();
        buf.push(d(5));
        assert_eq!(buf.zone(), None);
        buf.push(d(4));
        assert_eq!(buf.zone(), Some(54));
        buf.push(d(4));
        assert_eq!(buf.zone(), Some(54));
    }
}
