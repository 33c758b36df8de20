//! Cell clearing for the erase commands.
//!
//! The console has no "erase" call; cells are blanked by painting rectangles
//! of spaces carrying the requested attributes. An arbitrary start-to-end
//! span decomposes into at most three rectangles: a partial leading line, a
//! block of full lines, and a partial trailing line.

use crate::actor::WinConsoleActor;
use crate::backend::{CharInfo, ConsoleBackend, Coord, SmallRect};
use crate::error::Result;

impl<B: ConsoleBackend> WinConsoleActor<B> {
    /// Blank every cell between `from` and `to` (inclusive, reading order)
    /// within `window`.
    pub(crate) fn clear_range(
        &mut self,
        attributes: u16,
        from: Coord,
        to: Coord,
        window: SmallRect,
    ) -> Result<()> {
        // Ignore an invalid (negative area) request.
        if to.y < from.y {
            return Ok(());
        }

        let mut x = from.x;
        let mut y = from.y;

        // Partial leading line.
        if x > window.left {
            let end_x = if y == to.y { to.x } else { window.right };
            self.clear_rect(attributes, Coord::new(x, y), Coord::new(end_x, y))?;
            if y == to.y {
                return Ok(());
            }
            x = window.left;
            y += 1;
        }

        // Block of full lines.
        let last_full = if to.x == window.right { to.y } else { to.y - 1 };
        if y <= last_full {
            self.clear_rect(
                attributes,
                Coord::new(x, y),
                Coord::new(window.right, last_full),
            )?;
            y = last_full + 1;
        }

        // Partial trailing line.
        if y <= to.y {
            self.clear_rect(
                attributes,
                Coord::new(window.left, y),
                Coord::new(to.x, y),
            )?;
        }

        Ok(())
    }

    /// Paint one rectangle of blanks.
    pub(crate) fn clear_rect(
        &mut self,
        attributes: u16,
        from: Coord,
        to: Coord,
    ) -> Result<()> {
        if to.x < from.x || to.y < from.y {
            return Ok(());
        }

        let width = (to.x - from.x + 1) as usize;
        let height = (to.y - from.y + 1) as usize;
        let fill = CharInfo {
            unicode_char: u16::from(b' '),
            attributes,
        };
        let cells = vec![fill; width * height];
        let region = SmallRect {
            left: from.x,
            top: from.y,
            right: to.x,
            bottom: to.y,
        };

        self.backend.write_output(
            &cells,
            Coord::new(width as i16, height as i16),
            Coord::new(0, 0),
            region,
        )?;
        Ok(())
    }
}
