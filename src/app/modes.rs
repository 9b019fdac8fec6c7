//! Input mode and surface focus state types.
//!
//! The plugin operates in one of two input modes:
//! - **Normal**: keys are commands (move, tap, filter chips, quit)
//! - **Search**: keys edit the search text, or navigate the filtered cards
//!
//! Independently, one of the two rendering surfaces holds keyboard focus:
//! the map (cursor over markers) or the card list (cursor over cards).
//!
//! # Example
//!
//! ```rust
//! use truckmap::app::modes::{InputMode, SearchFocus, Surface};
//!
//! let input_mode = InputMode::Search(SearchFocus::Typing);
//! assert_eq!(Surface::Map.toggle(), Surface::List);
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts characters, backspace, and enter (to switch to Navigating).
    Typing,

    /// User is moving through the filtered cards.
    ///
    /// Accepts h/l for movement, enter to tap, and / to return to Typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default command mode.
    Normal,

    /// Active search with focus state.
    Search(SearchFocus),
}

/// Rendering surface holding the keyboard cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    /// Cursor moves between map markers; Enter is a marker tap.
    Map,
    /// Cursor moves between cards; Enter is a card tap.
    #[default]
    List,
}

impl Surface {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Map => Self::List,
            Self::List => Self::Map,
        }
    }
}
