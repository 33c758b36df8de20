//! Callbacks invoked by the escape sequence parser.
//!
//! The [`Parser`](crate::Parser) walks through a byte stream and translates
//! it into terminal commands with pre-decoded arguments. Those commands are
//! handed over to an [`Actor`] implementation that is responsible for
//! producing the visible effect: repositioning a cursor, erasing cells,
//! changing text attributes, or simply re-encoding the commands for a
//! downstream terminal. Implementations should be prepared to receive any
//! sequence of calls that is valid according to the virtual terminal
//! protocol, and should avoid performing additional parsing themselves.
//!
//! Numeric arguments arrive with their per-command defaults already applied
//! (an omitted cursor count is `1`, an omitted erase mode is `0`, and so on).
//! Row and column arguments are 1-based as transmitted on the wire; actors
//! translate to their own coordinate space.
//!
//! Every method returns a result carrying the actor's own error type. The
//! parser never fails on input bytes; the only errors that escape
//! [`Parser::advance`](crate::Parser::advance) are the ones an actor raises
//! here.

/// Consumer-facing interface for terminal commands emitted by the parser.
pub trait Actor {
    /// Error raised by a failed command realisation.
    type Error;

    /// A run of printable bytes. The run is emitted before any control byte
    /// or escape sequence executes, so actors may buffer it internally.
    fn print(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// A C0 control byte to execute immediately (BEL, BS, HT, LF, CR, ...).
    fn execute(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Cursor up (CUU).
    fn cuu(&mut self, rows: i64) -> Result<(), Self::Error>;

    /// Cursor down (CUD).
    fn cud(&mut self, rows: i64) -> Result<(), Self::Error>;

    /// Cursor forward (CUF).
    fn cuf(&mut self, cols: i64) -> Result<(), Self::Error>;

    /// Cursor backward (CUB).
    fn cub(&mut self, cols: i64) -> Result<(), Self::Error>;

    /// Cursor to beginning of next line, `rows` down (CNL).
    fn cnl(&mut self, rows: i64) -> Result<(), Self::Error>;

    /// Cursor to beginning of previous line, `rows` up (CPL).
    fn cpl(&mut self, rows: i64) -> Result<(), Self::Error>;

    /// Cursor horizontal absolute; `col` is 1-based (CHA).
    fn cha(&mut self, col: i64) -> Result<(), Self::Error>;

    /// Cursor position; `row` and `col` are 1-based (CUP).
    fn cup(&mut self, row: i64, col: i64) -> Result<(), Self::Error>;

    /// Horizontal and vertical position, same coordinates as [`Actor::cup`]
    /// (HVP).
    fn hvp(&mut self, row: i64, col: i64) -> Result<(), Self::Error>;

    /// Vertical position absolute; `row` is 1-based (VPA).
    fn vpa(&mut self, row: i64) -> Result<(), Self::Error>;

    /// Text cursor enable mode: show or hide the cursor (DECTCEM).
    fn dectcem(&mut self, visible: bool) -> Result<(), Self::Error>;

    /// Erase in display. Mode 0 erases from the cursor to the end of the
    /// screen, 1 from the start of the screen to the cursor, 2 and 3 the
    /// whole screen (ED).
    fn ed(&mut self, mode: i64) -> Result<(), Self::Error>;

    /// Erase in line, with the same mode shapes as [`Actor::ed`] applied to
    /// the cursor line (EL).
    fn el(&mut self, mode: i64) -> Result<(), Self::Error>;

    /// Insert blank lines at the cursor (IL).
    fn il(&mut self, rows: i64) -> Result<(), Self::Error>;

    /// Delete lines at the cursor (DL).
    fn dl(&mut self, rows: i64) -> Result<(), Self::Error>;

    /// Select graphic rendition. An empty slice is a full reset (SGR).
    fn sgr(&mut self, params: &[i64]) -> Result<(), Self::Error>;

    /// Scroll the page up (SU).
    fn su(&mut self, rows: i64) -> Result<(), Self::Error>;

    /// Scroll the page down (SD).
    fn sd(&mut self, rows: i64) -> Result<(), Self::Error>;

    /// Device attributes request, with the raw parameter tokens (DA).
    fn da(&mut self, params: &[&[u8]]) -> Result<(), Self::Error>;

    /// Set the scrolling region; `top` and `bottom` are 1-based rows
    /// (DECSTBM).
    fn decstbm(&mut self, top: i64, bottom: i64) -> Result<(), Self::Error>;

    /// Reverse index: cursor up one line, scrolling at the top margin (RI).
    fn ri(&mut self) -> Result<(), Self::Error>;

    /// Index: cursor down one line, scrolling at the bottom margin (IND).
    fn ind(&mut self) -> Result<(), Self::Error>;

    /// A collected operating system command payload. Semantics beyond
    /// collection are out of scope, so the default discards it.
    fn osc(&mut self, _payload: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Synchronise any buffered output with the underlying device. Called
    /// whenever pending print data must be realised before a command, and by
    /// clients at end of stream.
    fn flush(&mut self) -> Result<(), Self::Error>;
}
