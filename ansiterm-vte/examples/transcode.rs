//! Run a demo byte stream through the parser and re-encode it to stdout.
use ansiterm_vte::{AnsiWriter, Parser};

fn main() -> std::io::Result<()> {
    let bytes = b"Hello \x1b[1;31mansiterm\x1b[m!\n\x1b[5;10Hplaced\x1b[;5Hdefaulted\n";

    let mut parser = Parser::new();
    let mut writer = AnsiWriter::new(std::io::stdout().lock());
    parser.advance(bytes, &mut writer)?;
    parser.flush(&mut writer)
}
