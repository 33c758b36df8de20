//! The capability surface the adapter needs from a console.
//!
//! The value types mirror the Win32 console shapes (`COORD`, `SMALL_RECT`,
//! `CHAR_INFO`, `CONSOLE_SCREEN_BUFFER_INFO`) so a real backend is a thin
//! forwarding layer over the system calls, while tests can supply an
//! in-memory model.

use std::io;

/// A buffer coordinate. The console origin is the top-left of the backing
/// buffer, not of the visible window.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Coord {
    pub x: i16,
    pub y: i16,
}

impl Coord {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// An inclusive rectangle of buffer cells.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SmallRect {
    pub left: i16,
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
}

/// One glyph cell: a UTF-16 code unit plus its attribute word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharInfo {
    pub unicode_char: u16,
    pub attributes: u16,
}

/// Snapshot of the console state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScreenBufferInfo {
    /// Size of the backing buffer in cells.
    pub size: Coord,
    /// Current cursor position in buffer coordinates.
    pub cursor_position: Coord,
    /// Attribute word applied to newly written glyphs.
    pub attributes: u16,
    /// The portion of the buffer currently visible.
    pub window: SmallRect,
}

/// Console operations the adapter depends on.
///
/// Each method corresponds to one Win32 console call plus the ordinary
/// stream write of the attached file. Failures map onto [`io::Error`] the
/// way the bindings report them.
pub trait ConsoleBackend {
    /// `GetConsoleScreenBufferInfo`.
    fn screen_buffer_info(&mut self) -> io::Result<ScreenBufferInfo>;

    /// `SetConsoleCursorPosition`.
    fn set_cursor_position(&mut self, position: Coord) -> io::Result<()>;

    /// `SetConsoleTextAttribute`.
    fn set_text_attribute(&mut self, attributes: u16) -> io::Result<()>;

    /// `ScrollConsoleScreenBuffer`: move the cells of `scroll` to
    /// `destination`, limited to `clip`, filling vacated cells with `fill`.
    fn scroll_screen_buffer(
        &mut self,
        scroll: SmallRect,
        clip: SmallRect,
        destination: Coord,
        fill: CharInfo,
    ) -> io::Result<()>;

    /// `WriteConsoleOutput`: paint a rectangle of glyph cells without moving
    /// the cursor. `chars` is a `buffer_size`-shaped grid read starting at
    /// `buffer_coord`.
    fn write_output(
        &mut self,
        chars: &[CharInfo],
        buffer_size: Coord,
        buffer_coord: Coord,
        region: SmallRect,
    ) -> io::Result<()>;

    /// Write bytes to the underlying console file, with the console applying
    /// its usual output processing (auto-wrap, scrolling at the bottom).
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}
