//! A pass-through actor that re-encodes commands as ANSI bytes.
//!
//! Useful on hosts whose terminal already understands the sequences: the
//! parser still validates and normalises the stream, and the writer puts the
//! commands back on the wire unchanged in meaning. It also serves as the
//! reference for what each command looks like in its canonical encoding.

use std::io::{self, Write};

use crate::actor::Actor;

/// Re-encodes every command onto an [`io::Write`].
pub struct AnsiWriter<W: Write> {
    out: W,
}

impl<W: Write> AnsiWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Actor for AnsiWriter<W> {
    type Error = io::Error;

    fn print(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)
    }

    fn execute(&mut self, byte: u8) -> io::Result<()> {
        self.out.write_all(&[byte])
    }

    fn cuu(&mut self, rows: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{rows}A")
    }

    fn cud(&mut self, rows: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{rows}B")
    }

    fn cuf(&mut self, cols: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{cols}C")
    }

    fn cub(&mut self, cols: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{cols}D")
    }

    fn cnl(&mut self, rows: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{rows}E")
    }

    fn cpl(&mut self, rows: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{rows}F")
    }

    fn cha(&mut self, col: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{col}G")
    }

    fn cup(&mut self, row: i64, col: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{row};{col}H")
    }

    fn hvp(&mut self, row: i64, col: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{row};{col}f")
    }

    fn vpa(&mut self, row: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{row}d")
    }

    fn dectcem(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            self.out.write_all(b"\x1b[?25h")
        } else {
            self.out.write_all(b"\x1b[?25l")
        }
    }

    fn ed(&mut self, mode: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{mode}J")
    }

    fn el(&mut self, mode: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{mode}K")
    }

    fn il(&mut self, rows: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{rows}L")
    }

    fn dl(&mut self, rows: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{rows}M")
    }

    fn sgr(&mut self, params: &[i64]) -> io::Result<()> {
        if params.is_empty() {
            return self.out.write_all(b"\x1b[m");
        }

        let body = params
            .iter()
            .map(|param| param.to_string())
            .collect::<Vec<_>>()
            .join(";");
        write!(self.out, "\x1b[{body}m")
    }

    fn su(&mut self, rows: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{rows}S")
    }

    fn sd(&mut self, rows: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{rows}T")
    }

    fn da(&mut self, params: &[&[u8]]) -> io::Result<()> {
        // With no channel back to the application's input, echo the
        // attribute report on the output stream instead.
        let secondary =
            params.first().is_some_and(|token| token.first() == Some(&b'>'));
        if secondary {
            // VT220 version 1.0, no options.
            self.out.write_all(b"\x1b[>1;10;0c\r\n")
        } else {
            // Service class 2 terminal with the classic option set.
            self.out.write_all(b"\x1b[?62;1;2;6;7;8;9c\r\n")
        }
    }

    fn decstbm(&mut self, top: i64, bottom: i64) -> io::Result<()> {
        write!(self.out, "\x1b[{top};{bottom}r")
    }

    fn ri(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x1bM")
    }

    fn ind(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x1bD")
    }

    fn osc(&mut self, payload: &[u8]) -> io::Result<()> {
        self.out.write_all(b"\x1b]")?;
        self.out.write_all(payload)?;
        self.out.write_all(b"\x07")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
