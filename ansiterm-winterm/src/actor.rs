use log::debug;

use ansiterm_vte::Actor;

use crate::attributes::{ansi_to_windows, invert_attributes};
use crate::backend::{CharInfo, ConsoleBackend, Coord, ScreenBufferInfo, SmallRect};
use crate::error::{Error, Result};

/// A scrolling region, 0-indexed from the top of the visible window. The
/// stored values may be out of bounds or inverted; [`WinConsoleActor`] clamps
/// them against the live window before use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRegion {
    pub top: i16,
    pub bottom: i16,
}

/// Realises parsed VT commands on a console reached through a
/// [`ConsoleBackend`].
///
/// Printable output is buffered and written in runs; every command that
/// depends on the physical cursor flushes the buffer first. Two pieces of
/// emulation sit on top of that:
///
/// - the *deferred wrap*: printing in the last column leaves the cursor in
///   the margin cell until the next printable arrives, which the console
///   cannot express, so the margin byte is held back (and painted without
///   cursor motion on flush);
/// - the *scrolling region*: the console only scrolls the whole window, so
///   line feeds on the bottom margin of a sub-window region scroll that
///   region by hand.
pub struct WinConsoleActor<B: ConsoleBackend> {
    pub(crate) backend: B,
    /// Current SGR-derived attribute word, before inversion.
    pub(crate) attributes: u16,
    /// Whether reverse video is active.
    pub(crate) inverted: bool,
    /// Console state captured at construction; the attribute reset target.
    pub(crate) info_reset: ScreenBufferInfo,
    /// The requested scrolling region, as set by DECSTBM.
    pub(crate) sr: ScrollRegion,
    /// Bytes pending a write to the console file.
    pub(crate) buffer: Vec<u8>,
    /// The last printable landed in the margin cell; the next one wraps.
    pub(crate) wrap_next: bool,
    /// Whether the margin byte has already been painted on screen.
    pub(crate) drew_margin_byte: bool,
    /// The byte held back by the deferred wrap.
    pub(crate) margin_byte: u8,
    /// Cached console snapshot, valid until the next flush.
    pub(crate) cur_info: Option<ScreenBufferInfo>,
    /// Cached cursor position tracking the effect of buffered output.
    pub(crate) cur_pos: Coord,
}

impl<B: ConsoleBackend> WinConsoleActor<B> {
    /// Wrap a console backend, capturing its current attributes as the
    /// reset state for `SGR 0`.
    pub fn new(mut backend: B) -> Result<Self> {
        let info_reset = backend.screen_buffer_info()?;

        Ok(Self {
            backend,
            attributes: info_reset.attributes,
            inverted: false,
            info_reset,
            sr: ScrollRegion::default(),
            buffer: Vec::new(),
            wrap_next: false,
            drew_margin_byte: false,
            margin_byte: 0,
            cur_info: None,
            cur_pos: Coord::default(),
        })
    }

    /// Give the backend back, dropping any buffered output.
    pub fn into_inner(self) -> B {
        self.backend
    }

    /// Current cursor position and console snapshot, reading them from the
    /// backend if the cache is cold.
    pub(crate) fn current(&mut self) -> Result<(Coord, ScreenBufferInfo)> {
        match self.cur_info {
            Some(info) => Ok((self.cur_pos, info)),
            None => {
                let info = self.backend.screen_buffer_info()?;
                self.cur_info = Some(info);
                self.cur_pos = info.cursor_position;
                Ok((info.cursor_position, info))
            },
        }
    }

    /// Track a cursor move caused by buffered output. Only meaningful while
    /// the snapshot is warm.
    pub(crate) fn update_pos(&mut self, pos: Coord) {
        debug_assert!(
            self.cur_info.is_some(),
            "cursor cache must be primed before update_pos"
        );
        self.cur_pos = pos;
    }

    pub(crate) fn clear_wrap(&mut self) {
        self.wrap_next = false;
        self.drew_margin_byte = false;
    }

    /// Write buffered output to the console file and invalidate the cached
    /// snapshot. If a margin byte is pending and has not been painted yet,
    /// paint it in place (no cursor motion) so it becomes visible without
    /// triggering the console's auto-wrap.
    pub(crate) fn flush(&mut self) -> Result<()> {
        self.cur_info = None;

        if !self.buffer.is_empty() {
            debug!("flush: {} bytes", self.buffer.len());
            self.backend.write(&self.buffer)?;
            self.buffer.clear();
        }

        if self.wrap_next && !self.drew_margin_byte {
            debug!("flush: painting margin byte {:#04x}", self.margin_byte);
            let info = self.backend.screen_buffer_info()?;
            let cell = [CharInfo {
                unicode_char: u16::from(self.margin_byte),
                attributes: info.attributes,
            }];
            let region = SmallRect {
                left: info.cursor_position.x,
                top: info.cursor_position.y,
                right: info.cursor_position.x,
                bottom: info.cursor_position.y,
            };
            self.backend.write_output(
                &cell,
                Coord::new(1, 1),
                Coord::new(0, 0),
                region,
            )?;
            self.drew_margin_byte = true;
        }

        Ok(())
    }

    /// Queue one printable byte, honouring the deferred wrap margin.
    fn print_byte(&mut self, byte: u8) -> Result<()> {
        if self.wrap_next {
            // Release the held-back margin byte through the normal write
            // path so the console performs the wrap, then line-feed against
            // the scrolling region.
            self.buffer.push(self.margin_byte);
            self.clear_wrap();
            self.simulate_lf(true)?;
        }

        let (pos, info) = self.current()?;
        if pos.x == info.size.x - 1 {
            self.wrap_next = true;
            self.margin_byte = byte;
        } else {
            self.update_pos(Coord::new(pos.x + 1, pos.y));
            self.buffer.push(byte);
        }

        Ok(())
    }

    /// The requested scrolling region clamped into `window`. Degenerate or
    /// inverted requests select the whole window.
    pub(crate) fn effective_sr(&self, window: SmallRect) -> ScrollRegion {
        let top = window
            .top
            .saturating_add(self.sr.top)
            .clamp(window.top, window.bottom);
        let bottom = window
            .top
            .saturating_add(self.sr.bottom)
            .clamp(window.top, window.bottom);

        if top >= bottom {
            ScrollRegion {
                top: window.top,
                bottom: window.bottom,
            }
        } else {
            ScrollRegion { top, bottom }
        }
    }

    /// Simulate a LF (or CR+LF) against the scrolling region.
    ///
    /// Returns `true` when the line feed was fully realised here. A `false`
    /// return means no special handling was needed: the caller emits the
    /// control bytes and lets the console wrap or scroll on its own.
    pub(crate) fn simulate_lf(&mut self, include_cr: bool) -> Result<bool> {
        if self.wrap_next {
            self.flush()?;
            self.clear_wrap();
        }

        let (mut pos, info) = self.current()?;
        let sr = self.effective_sr(info.window);

        if pos.y == sr.bottom {
            if sr.top == info.window.top && sr.bottom == info.window.bottom {
                // Full-window region: the console scrolls by itself.
                if include_cr {
                    pos.x = 0;
                    self.update_pos(pos);
                }
                return Ok(false);
            }

            // A custom region is active; scroll it by hand.
            self.flush()?;
            self.scroll_up(1)?;
            if include_cr {
                self.backend.set_cursor_position(Coord::new(0, pos.y))?;
            }
            Ok(true)
        } else if pos.y < info.window.bottom {
            // The console handles the line feed.
            pos.y += 1;
            if include_cr {
                pos.x = 0;
            }
            self.update_pos(pos);
            Ok(false)
        } else {
            // At the bottom of the window but below the scrolling region;
            // the line feed is dropped.
            if include_cr {
                self.flush()?;
                self.backend.set_cursor_position(Coord::new(0, pos.y))?;
            }
            Ok(true)
        }
    }

    /// IND and the LF-alike C0 controls: cursor down one line, keeping the
    /// column.
    fn index(&mut self) -> Result<()> {
        if !self.simulate_lf(false)? {
            // The console resets the column when it processes the LF, so
            // restore it afterwards.
            let (pos, _) = self.current()?;
            self.buffer.push(b'\n');
            if pos.x != 0 {
                self.flush()?;
                self.backend.set_cursor_position(pos)?;
            }
        }

        Ok(())
    }

    fn execute_byte(&mut self, byte: u8) -> Result<()> {
        match byte {
            // BEL: preserving the wrap state through the buffer is not
            // possible, so flush and write it straight through.
            0x07 => {
                self.flush()?;
                self.backend.write(&[0x07])?;
                Ok(())
            },
            // BS
            0x08 => {
                if self.wrap_next {
                    self.flush()?;
                    self.clear_wrap();
                }
                let (pos, _) = self.current()?;
                if pos.x > 0 {
                    self.update_pos(Coord::new(pos.x - 1, pos.y));
                }
                self.buffer.push(0x08);
                Ok(())
            },
            // HT: next multiple of 8, stopping at the margin cell.
            0x09 => {
                if self.wrap_next {
                    return Ok(());
                }
                let (pos, info) = self.current()?;
                let mut x = (pos.x + 8) - pos.x % 8;
                if x >= info.size.x {
                    x = info.size.x - 1;
                }
                self.flush()?;
                self.backend.set_cursor_position(Coord::new(x, pos.y))?;
                Ok(())
            },
            // LF: simulate CR+LF. There is no way to tell from the byte
            // stream whether the CR is wanted, and more breaks without it
            // than with it.
            0x0a => {
                if !self.simulate_lf(true)? {
                    self.buffer.push(b'\n');
                }
                Ok(())
            },
            // VT and FF behave as a true line feed.
            0x0b | 0x0c => self.index(),
            // CR
            0x0d => {
                if self.wrap_next {
                    self.flush()?;
                    self.clear_wrap();
                }
                let (pos, _) = self.current()?;
                self.update_pos(Coord::new(0, pos.y));
                self.buffer.push(b'\r');
                Ok(())
            },
            _ => Ok(()),
        }
    }
}

/// Clamp a decoded command argument into the console's 16-bit coordinate
/// space.
pub(crate) fn to_short(value: i64) -> i16 {
    value.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
}

impl<B: ConsoleBackend> Actor for WinConsoleActor<B> {
    type Error = Error;

    fn print(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.print_byte(byte)?;
        }
        Ok(())
    }

    fn execute(&mut self, byte: u8) -> Result<()> {
        self.execute_byte(byte)
    }

    fn cuu(&mut self, rows: i64) -> Result<()> {
        self.flush()?;
        debug!("CUU: [{rows}]");
        self.clear_wrap();
        self.move_cursor_vertical(-to_short(rows))
    }

    fn cud(&mut self, rows: i64) -> Result<()> {
        self.flush()?;
        debug!("CUD: [{rows}]");
        self.clear_wrap();
        self.move_cursor_vertical(to_short(rows))
    }

    fn cuf(&mut self, cols: i64) -> Result<()> {
        self.flush()?;
        debug!("CUF: [{cols}]");
        self.clear_wrap();
        self.move_cursor_horizontal(to_short(cols))
    }

    fn cub(&mut self, cols: i64) -> Result<()> {
        self.flush()?;
        debug!("CUB: [{cols}]");
        self.clear_wrap();
        self.move_cursor_horizontal(-to_short(cols))
    }

    fn cnl(&mut self, rows: i64) -> Result<()> {
        self.flush()?;
        debug!("CNL: [{rows}]");
        self.clear_wrap();
        self.move_cursor_line(to_short(rows))
    }

    fn cpl(&mut self, rows: i64) -> Result<()> {
        self.flush()?;
        debug!("CPL: [{rows}]");
        self.clear_wrap();
        self.move_cursor_line(-to_short(rows))
    }

    fn cha(&mut self, col: i64) -> Result<()> {
        self.flush()?;
        debug!("CHA: [{col}]");
        self.clear_wrap();
        self.move_cursor_column(to_short(col))
    }

    fn cup(&mut self, row: i64, col: i64) -> Result<()> {
        self.flush()?;
        debug!("CUP: [{row} {col}]");
        self.clear_wrap();

        let info = self.backend.screen_buffer_info()?;
        let window = info.window;
        let position = Coord::new(
            window.left.saturating_add(to_short(col) - 1),
            window.top.saturating_add(to_short(row) - 1),
        );
        self.set_cursor(position, window)
    }

    fn hvp(&mut self, row: i64, col: i64) -> Result<()> {
        debug!("HVP: [{row} {col}]");
        self.cup(row, col)
    }

    fn vpa(&mut self, row: i64) -> Result<()> {
        self.flush()?;
        debug!("VPA: [{row}]");
        self.clear_wrap();

        let info = self.backend.screen_buffer_info()?;
        let position = Coord::new(
            info.cursor_position.x,
            info.window.top.saturating_add(to_short(row) - 1),
        );
        self.set_cursor(position, info.window)
    }

    fn dectcem(&mut self, visible: bool) -> Result<()> {
        // No portable console primitive for cursor visibility; synchronise
        // and carry on.
        self.flush()?;
        debug!("DECTCEM: [{visible}]");
        self.clear_wrap();
        Ok(())
    }

    fn ed(&mut self, mode: i64) -> Result<()> {
        self.flush()?;
        debug!("ED: [{mode}]");
        self.clear_wrap();

        let info = self.backend.screen_buffer_info()?;
        let window = info.window;

        let (start, end) = match mode {
            0 => (
                info.cursor_position,
                Coord::new(window.right, window.bottom),
            ),
            1 => (Coord::new(window.left, window.top), info.cursor_position),
            2 | 3 => (
                Coord::new(window.left, window.top),
                Coord::new(window.right, window.bottom),
            ),
            _ => return Ok(()),
        };

        self.clear_range(self.attributes, start, end, window)?;

        if mode == 2 || mode == 3 {
            self.set_cursor(Coord::new(0, 0), window)?;
        }

        Ok(())
    }

    fn el(&mut self, mode: i64) -> Result<()> {
        self.flush()?;
        debug!("EL: [{mode}]");
        self.clear_wrap();

        let info = self.backend.screen_buffer_info()?;
        let window = info.window;
        let pos = info.cursor_position;

        let (start, end) = match mode {
            0 => (pos, Coord::new(window.right, pos.y)),
            1 => (Coord::new(window.left, pos.y), pos),
            2 => (
                Coord::new(window.left, pos.y),
                Coord::new(window.right, pos.y),
            ),
            _ => return Ok(()),
        };

        self.clear_range(self.attributes, start, end, window)
    }

    fn il(&mut self, rows: i64) -> Result<()> {
        self.flush()?;
        debug!("IL: [{rows}]");
        self.clear_wrap();
        self.scroll_down(to_short(rows))?;
        // Blank the line opened up at the cursor.
        self.el(2)
    }

    fn dl(&mut self, rows: i64) -> Result<()> {
        self.flush()?;
        debug!("DL: [{rows}]");
        self.clear_wrap();
        self.scroll_up(to_short(rows))
    }

    fn sgr(&mut self, params: &[i64]) -> Result<()> {
        self.flush()?;
        debug!("SGR: {params:?}");

        if params.is_empty() {
            self.attributes = self.info_reset.attributes;
            self.inverted = false;
        } else {
            for &param in params {
                if param == 0 {
                    self.attributes = self.info_reset.attributes;
                    self.inverted = false;
                } else {
                    let (attributes, inverted) = ansi_to_windows(
                        self.attributes,
                        self.inverted,
                        self.info_reset.attributes,
                        param,
                    );
                    self.attributes = attributes;
                    self.inverted = inverted;
                }
            }
        }

        let mut effective = self.attributes;
        if self.inverted {
            effective = invert_attributes(effective);
        }
        self.backend.set_text_attribute(effective)?;

        Ok(())
    }

    fn su(&mut self, rows: i64) -> Result<()> {
        self.flush()?;
        debug!("SU: [{rows}]");
        self.clear_wrap();
        self.scroll_page_up(to_short(rows))
    }

    fn sd(&mut self, rows: i64) -> Result<()> {
        self.flush()?;
        debug!("SD: [{rows}]");
        self.clear_wrap();
        self.scroll_page_down(to_short(rows))
    }

    fn da(&mut self, params: &[&[u8]]) -> Result<()> {
        // A response would have to reach the application's input stream,
        // which the console cannot do.
        debug!("DA: {params:?} (not supported)");
        Ok(())
    }

    fn decstbm(&mut self, top: i64, bottom: i64) -> Result<()> {
        self.flush()?;
        debug!("DECSTBM: [{top} {bottom}]");

        // The wire values are 1-indexed.
        self.sr.top = to_short(top) - 1;
        self.sr.bottom = to_short(bottom) - 1;

        // This command also homes the cursor.
        self.clear_wrap();
        let info = self.backend.screen_buffer_info()?;
        self.set_cursor(Coord::new(0, 0), info.window)
    }

    fn ri(&mut self) -> Result<()> {
        self.flush()?;
        debug!("RI");
        self.clear_wrap();

        let info = self.backend.screen_buffer_info()?;
        let sr = self.effective_sr(info.window);
        if info.cursor_position.y == sr.top {
            self.scroll_down(1)
        } else {
            self.move_cursor_vertical(-1)
        }
    }

    fn ind(&mut self) -> Result<()> {
        debug!("IND");
        self.index()
    }

    fn flush(&mut self) -> Result<()> {
        WinConsoleActor::flush(self)
    }
}
