//! Keyboard shortcuts for history navigation.
//!
//! `Ctrl+Z` undoes, `Ctrl+Shift+Z` redoes. Nothing else is bound.

use std::fmt;
use std::str::FromStr;

use crate::EditorError;

/// Editor action a key combo maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Undo,
    Redo,
}

/// A pressed key with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    /// Lowercased key character
    pub key: char,
}

impl KeyCombo {
    pub fn new(key: char) -> Self {
        Self {
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
            key: key.to_ascii_lowercase(),
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn command(&self) -> Option<EditorCommand> {
        if !self.ctrl || self.alt || self.meta || self.key != 'z' {
            return None;
        }
        if self.shift {
            Some(EditorCommand::Redo)
        } else {
            Some(EditorCommand::Undo)
        }
    }
}

impl FromStr for KeyCombo {
    type Err = EditorError;

    /// Parses combos like `ctrl+shift+z`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EditorError::InvalidKeyCombo(s.to_string());

        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key = parts.pop().ok_or_else(invalid)?;

        let mut chars = key.chars();
        let (Some(key), None) = (chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let mut combo = KeyCombo::new(key);
        for modifier in parts {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => combo.ctrl = true,
                "shift" => combo.shift = true,
                "alt" | "option" => combo.alt = true,
                "meta" | "cmd" | "super" => combo.meta = true,
                _ => return Err(invalid()),
            }
        }

        Ok(combo)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.shift {
            f.write_str("shift+")?;
        }
        if self.alt {
            f.write_str("alt+")?;
        }
        if self.meta {
            f.write_str("meta+")?;
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_bindings() {
        assert_eq!(KeyCombo::new('z').ctrl().command(), Some(EditorCommand::Undo));
        assert_eq!(
            KeyCombo::new('Z').ctrl().shift().command(),
            Some(EditorCommand::Redo)
        );
        assert_eq!(KeyCombo::new('z').command(), None);
        assert_eq!(KeyCombo::new('y').ctrl().command(), None);
    }

    #[test]
    fn test_parse_combo() {
        let combo: KeyCombo = "Ctrl+Shift+Z".parse().unwrap();
        assert_eq!(combo, KeyCombo::new('z').ctrl().shift());
        assert_eq!(combo.to_string(), "ctrl+shift+z");

        assert!("ctrl+hyper+z".parse::<KeyCombo>().is_err());
        assert!("ctrl+zz".parse::<KeyCombo>().is_err());
        assert!("".parse::<KeyCombo>().is_err());
    }
}
