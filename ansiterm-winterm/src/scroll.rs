//! Scrolling primitives over the active region or the whole window.

use log::debug;

use crate::actor::{ScrollRegion, WinConsoleActor};
use crate::backend::{CharInfo, ConsoleBackend, Coord, SmallRect};
use crate::error::Result;

impl<B: ConsoleBackend> WinConsoleActor<B> {
    /// Shift the contents of `region` by `delta` lines (negative is up).
    /// The region doubles as the clipping rectangle, so content neither
    /// leaves it nor is pulled in from outside; vacated lines fill with
    /// blanks in the current attributes.
    pub(crate) fn scroll(
        &mut self,
        delta: i16,
        region: ScrollRegion,
    ) -> Result<()> {
        let info = self.backend.screen_buffer_info()?;
        debug!(
            "scroll: delta {delta}, region {}..{}",
            region.top, region.bottom
        );

        let window = info.window;
        let rect = SmallRect {
            left: window.left,
            right: window.right,
            top: region.top,
            bottom: region.bottom,
        };
        let destination =
            Coord::new(window.left, region.top.saturating_add(delta));
        let fill = CharInfo {
            unicode_char: u16::from(b' '),
            attributes: self.attributes,
        };

        self.backend.scroll_screen_buffer(rect, rect, destination, fill)?;
        Ok(())
    }

    pub(crate) fn scroll_up(&mut self, rows: i16) -> Result<()> {
        let info = self.backend.screen_buffer_info()?;
        let sr = self.effective_sr(info.window);
        self.scroll(-rows, sr)
    }

    pub(crate) fn scroll_down(&mut self, rows: i16) -> Result<()> {
        let info = self.backend.screen_buffer_info()?;
        let sr = self.effective_sr(info.window);
        self.scroll(rows, sr)
    }

    pub(crate) fn scroll_page_up(&mut self, rows: i16) -> Result<()> {
        let info = self.backend.screen_buffer_info()?;
        let window = ScrollRegion {
            top: info.window.top,
            bottom: info.window.bottom,
        };
        self.scroll(-rows, window)
    }

    pub(crate) fn scroll_page_down(&mut self, rows: i16) -> Result<()> {
        let info = self.backend.screen_buffer_info()?;
        let window = ScrollRegion {
            top: info.window.top,
            bottom: info.window.bottom,
        };
        self.scroll(rows, window)
    }
}
