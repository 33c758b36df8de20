//! Realises parsed VT commands on a Windows-style console.
//!
//! The console subsystem has no native notion of scroll regions, deferred
//! wrap margins or SGR sequences, so [`WinConsoleActor`] bridges the two
//! models: it buffers printable output, simulates line feeds against the
//! active scrolling region, defers the wrap caused by printing in the last
//! column, and folds SGR parameters into console attribute words. All
//! console access goes through the [`ConsoleBackend`] capability, which
//! keeps the Win32 bindings themselves out of this crate.

mod actor;
mod attributes;
mod backend;
mod cursor;
mod erase;
mod error;
mod scroll;

#[cfg(test)]
pub(crate) mod test_console;

pub use actor::{ScrollRegion, WinConsoleActor};
pub use attributes::{
    ansi_to_windows, invert_attributes, BACKGROUND_BLUE, BACKGROUND_GREEN,
    BACKGROUND_INTENSITY, BACKGROUND_RED, COMMON_LVB_UNDERSCORE,
    FOREGROUND_BLUE, FOREGROUND_GREEN, FOREGROUND_INTENSITY, FOREGROUND_RED,
};
pub use backend::{
    CharInfo, ConsoleBackend, Coord, ScreenBufferInfo, SmallRect,
};
pub use error::{Error, Result};
