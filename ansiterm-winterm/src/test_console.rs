//! An in-memory console model for adapter tests.
//!
//! Reproduces the observable behaviour the adapter depends on: processed
//! output (`\r`, `\n`, backspace), immediate auto-wrap past the last column,
//! scrolling when the cursor passes the bottom of the buffer, rectangle
//! writes that leave the cursor alone, and clipped buffer scrolls. The
//! window always spans the whole buffer, which matches a console that has
//! never been resized or scrolled back.

use std::io;

use crate::backend::{
    CharInfo, ConsoleBackend, Coord, ScreenBufferInfo, SmallRect,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cell {
    pub ch: u8,
    pub attributes: u16,
}

pub(crate) struct TestConsole {
    pub size: Coord,
    pub cursor: Coord,
    pub attributes: u16,
    pub grid: Vec<Vec<Cell>>,
    /// Raw bytes accepted through the stream write.
    pub written: Vec<u8>,
    /// Names of the console calls made, for interaction assertions.
    pub calls: Vec<String>,
}

impl TestConsole {
    pub fn new(width: i16, height: i16) -> Self {
        let blank = Cell {
            ch: b' ',
            attributes: 0x07,
        };
        Self {
            size: Coord::new(width, height),
            cursor: Coord::new(0, 0),
            attributes: 0x07,
            grid: vec![vec![blank; width as usize]; height as usize],
            written: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn window(&self) -> SmallRect {
        SmallRect {
            left: 0,
            top: 0,
            right: self.size.x - 1,
            bottom: self.size.y - 1,
        }
    }

    /// The glyphs of one row as a string.
    pub fn row_text(&self, y: i16) -> String {
        self.grid[y as usize].iter().map(|cell| cell.ch as char).collect()
    }

    pub fn cell(&self, x: i16, y: i16) -> Cell {
        self.grid[y as usize][x as usize]
    }

    fn blank(&self) -> Cell {
        Cell {
            ch: b' ',
            attributes: self.attributes,
        }
    }

    fn scroll_buffer_up(&mut self) {
        self.grid.remove(0);
        let width = self.size.x as usize;
        self.grid.push(vec![self.blank(); width]);
    }

    fn advance_line(&mut self) {
        self.cursor.y += 1;
        if self.cursor.y >= self.size.y {
            self.scroll_buffer_up();
            self.cursor.y = self.size.y - 1;
        }
    }

    fn put_processed(&mut self, byte: u8) {
        match byte {
            b'\n' => {
                // Processed output treats LF as CR+LF.
                self.cursor.x = 0;
                self.advance_line();
            },
            b'\r' => self.cursor.x = 0,
            0x08 => {
                if self.cursor.x > 0 {
                    self.cursor.x -= 1;
                }
            },
            0x07 => {},
            _ => {
                self.grid[self.cursor.y as usize][self.cursor.x as usize] =
                    Cell {
                        ch: byte,
                        attributes: self.attributes,
                    };
                self.cursor.x += 1;
                if self.cursor.x >= self.size.x {
                    self.cursor.x = 0;
                    self.advance_line();
                }
            },
        }
    }

    fn contains(rect: SmallRect, x: i16, y: i16) -> bool {
        x >= rect.left && x <= rect.right && y >= rect.top && y <= rect.bottom
    }
}

impl ConsoleBackend for TestConsole {
    fn screen_buffer_info(&mut self) -> io::Result<ScreenBufferInfo> {
        Ok(ScreenBufferInfo {
            size: self.size,
            cursor_position: self.cursor,
            attributes: self.attributes,
            window: self.window(),
        })
    }

    fn set_cursor_position(&mut self, position: Coord) -> io::Result<()> {
        self.calls.push(format!(
            "set_cursor_position({},{})",
            position.x, position.y
        ));
        self.cursor = position;
        Ok(())
    }

    fn set_text_attribute(&mut self, attributes: u16) -> io::Result<()> {
        self.calls.push(format!("set_text_attribute({attributes:#06x})"));
        self.attributes = attributes;
        Ok(())
    }

    fn scroll_screen_buffer(
        &mut self,
        scroll: SmallRect,
        clip: SmallRect,
        destination: Coord,
        fill: CharInfo,
    ) -> io::Result<()> {
        self.calls.push(format!(
            "scroll_screen_buffer({}..{} -> {})",
            scroll.top, scroll.bottom, destination.y
        ));

        let snapshot = self.grid.clone();
        let dx = destination.x - scroll.left;
        let dy = destination.y - scroll.top;
        let fill_cell = Cell {
            ch: fill.unicode_char as u8,
            attributes: fill.attributes,
        };

        for y in clip.top..=clip.bottom {
            for x in clip.left..=clip.right {
                let src_x = x - dx;
                let src_y = y - dy;
                let cell = if Self::contains(scroll, src_x, src_y)
                    && Self::contains(clip, src_x, src_y)
                {
                    snapshot[src_y as usize][src_x as usize]
                } else {
                    fill_cell
                };
                self.grid[y as usize][x as usize] = cell;
            }
        }

        Ok(())
    }

    fn write_output(
        &mut self,
        chars: &[CharInfo],
        buffer_size: Coord,
        buffer_coord: Coord,
        region: SmallRect,
    ) -> io::Result<()> {
        self.calls.push(format!(
            "write_output({},{})..({},{})",
            region.left, region.top, region.right, region.bottom
        ));

        for y in region.top..=region.bottom {
            for x in region.left..=region.right {
                let src_y = buffer_coord.y + (y - region.top);
                let src_x = buffer_coord.x + (x - region.left);
                let index = (src_y * buffer_size.x + src_x) as usize;
                let Some(info) = chars.get(index) else { continue };
                if !Self::contains(self.window(), x, y) {
                    continue;
                }
                self.grid[y as usize][x as usize] = Cell {
                    ch: info.unicode_char as u8,
                    attributes: info.attributes,
                };
            }
        }

        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.calls.push(format!("write({} bytes)", bytes.len()));
        self.written.extend_from_slice(bytes);
        for &byte in bytes {
            self.put_processed(byte);
        }
        Ok(())
    }
}
