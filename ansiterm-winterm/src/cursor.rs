//! Cursor motion helpers.
//!
//! All relative motions read the live console state: the commands that use
//! them have already flushed buffered output, so the physical cursor is
//! authoritative. Targets are clamped into the visible window, never
//! wrapped.

use crate::actor::WinConsoleActor;
use crate::backend::{ConsoleBackend, Coord, SmallRect};
use crate::error::Result;

impl<B: ConsoleBackend> WinConsoleActor<B> {
    /// Clamp `position` into `window` and move the cursor there.
    pub(crate) fn set_cursor(
        &mut self,
        mut position: Coord,
        window: SmallRect,
    ) -> Result<()> {
        position.x = position.x.clamp(window.left, window.right);
        position.y = position.y.clamp(window.top, window.bottom);
        self.backend.set_cursor_position(position)?;
        Ok(())
    }

    pub(crate) fn move_cursor_vertical(&mut self, rows: i16) -> Result<()> {
        let info = self.backend.screen_buffer_info()?;
        let mut position = info.cursor_position;
        position.y = position.y.saturating_add(rows);
        self.set_cursor(position, info.window)
    }

    pub(crate) fn move_cursor_horizontal(&mut self, cols: i16) -> Result<()> {
        let info = self.backend.screen_buffer_info()?;
        let mut position = info.cursor_position;
        position.x = position.x.saturating_add(cols);
        self.set_cursor(position, info.window)
    }

    /// Move `rows` lines and return to the first column.
    pub(crate) fn move_cursor_line(&mut self, rows: i16) -> Result<()> {
        let info = self.backend.screen_buffer_info()?;
        let mut position = info.cursor_position;
        position.x = 0;
        position.y = position.y.saturating_add(rows);
        self.set_cursor(position, info.window)
    }

    /// Move to the 1-based column `col` of the current line.
    pub(crate) fn move_cursor_column(&mut self, col: i16) -> Result<()> {
        let info = self.backend.screen_buffer_info()?;
        let mut position = info.cursor_position;
        position.x = info.window.left.saturating_add(col - 1);
        self.set_cursor(position, info.window)
    }
}
