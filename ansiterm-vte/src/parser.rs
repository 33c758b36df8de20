use log::debug;

use crate::actor::Actor;
use crate::class::{classify, ByteClass};
use crate::params::{erase_param, single, split_params, to_ints};
use crate::state::{Action, State};
use crate::transitions;

/// Buffers owned by the parser while a sequence is being collected.
#[derive(Debug, Default)]
struct Context {
    /// Raw CSI parameter bytes, separators and private markers included.
    param_buffer: Vec<u8>,
    /// Intermediate bytes of the sequence in progress.
    inter_buffer: Vec<u8>,
    /// Printable bytes pending emission as a single print run.
    print_buffer: Vec<u8>,
    /// Collected OSC payload.
    osc_buffer: Vec<u8>,
    /// The byte currently being processed.
    current_char: u8,
}

/// Byte-driven DEC/VT escape sequence parser.
///
/// Feed it bytes with [`Parser::advance`]; chunk boundaries are irrelevant,
/// one byte at a time produces the same command sequence as one large slice.
/// The parser itself never fails on input: malformed sequences are consumed
/// and dropped, and the only errors surfaced are the ones the [`Actor`]
/// raises while realising a command. Call [`Parser::flush`] at end of stream
/// so a trailing print run reaches the actor.
#[derive(Debug, Default)]
pub struct Parser {
    state: State,
    ctx: Context,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the parser with a new chunk of bytes.
    pub fn advance<A: Actor>(
        &mut self,
        bytes: &[u8],
        actor: &mut A,
    ) -> Result<(), A::Error> {
        for &byte in bytes {
            self.process_byte(byte, actor)?;
        }

        Ok(())
    }

    /// Emit any pending print run and synchronise the actor. Required at end
    /// of stream; harmless at any other time.
    pub fn flush<A: Actor>(&mut self, actor: &mut A) -> Result<(), A::Error> {
        self.emit_print(actor)?;
        actor.flush()
    }

    fn process_byte<A: Actor>(
        &mut self,
        byte: u8,
        actor: &mut A,
    ) -> Result<(), A::Error> {
        self.ctx.current_char = byte;
        let (next_state, action) = transitions::transit(self.state, byte);

        if next_state == self.state {
            return self.perform(action, actor);
        }

        // CAN and SUB abort the sequence with no dispatch, so the abandoned
        // state's exit action (OSC dispatch in particular) must not fire.
        if classify(self.state, byte) != ByteClass::ToGround {
            self.perform(transitions::exit_action(self.state), actor)?;
        }
        self.perform(action, actor)?;
        self.state = next_state;
        self.perform(transitions::entry_action(next_state), actor)
    }

    fn perform<A: Actor>(
        &mut self,
        action: Action,
        actor: &mut A,
    ) -> Result<(), A::Error> {
        use Action::*;

        match action {
            None | Ignore => Ok(()),
            Print => {
                self.ctx.print_buffer.push(self.ctx.current_char);
                Ok(())
            },
            Execute => {
                self.emit_print(actor)?;
                actor.execute(self.ctx.current_char)
            },
            Collect => {
                self.ctx.inter_buffer.push(self.ctx.current_char);
                Ok(())
            },
            Param => {
                self.ctx.param_buffer.push(self.ctx.current_char);
                Ok(())
            },
            Clear => {
                self.ctx.param_buffer.clear();
                self.ctx.inter_buffer.clear();
                Ok(())
            },
            Flush => {
                self.emit_print(actor)?;
                actor.flush()
            },
            CsiDispatch => self.csi_dispatch(actor),
            EscDispatch => self.esc_dispatch(actor),
            OscStart => {
                self.ctx.osc_buffer.clear();
                Ok(())
            },
            OscPut => {
                self.ctx.osc_buffer.push(self.ctx.current_char);
                Ok(())
            },
            OscEnd => actor.osc(&self.ctx.osc_buffer),
        }
    }

    fn emit_print<A: Actor>(&mut self, actor: &mut A) -> Result<(), A::Error> {
        if self.ctx.print_buffer.is_empty() {
            return Ok(());
        }

        actor.print(&self.ctx.print_buffer)?;
        self.ctx.print_buffer.clear();
        Ok(())
    }

    fn csi_dispatch<A: Actor>(
        &mut self,
        actor: &mut A,
    ) -> Result<(), A::Error> {
        let params = split_params(&self.ctx.param_buffer);
        let byte = self.ctx.current_char;

        let result = match byte {
            b'A' => actor.cuu(single(&params, 1)),
            b'B' => actor.cud(single(&params, 1)),
            b'C' => actor.cuf(single(&params, 1)),
            b'D' => actor.cub(single(&params, 1)),
            b'E' => actor.cnl(single(&params, 1)),
            b'F' => actor.cpl(single(&params, 1)),
            b'G' => actor.cha(single(&params, 1)),
            b'H' => {
                let ints = to_ints(&params, 2, 1);
                actor.cup(ints[0], ints[1])
            },
            b'f' => {
                let ints = to_ints(&params, 2, 1);
                actor.hvp(ints[0], ints[1])
            },
            b'd' => actor.vpa(single(&params, 1)),
            b'J' => actor.ed(erase_param(&params)),
            b'K' => actor.el(erase_param(&params)),
            b'L' => actor.il(single(&params, 1)),
            b'M' => actor.dl(single(&params, 1)),
            b'S' => actor.su(single(&params, 1)),
            b'T' => actor.sd(single(&params, 1)),
            b'm' => actor.sgr(&to_ints(&params, 0, 0)),
            // The only recognised mode is DEC private 25, the text cursor.
            b'h' if params == [&b"?25"[..]] => actor.dectcem(true),
            b'l' if params == [&b"?25"[..]] => actor.dectcem(false),
            b'h' | b'l' => {
                debug!("ignoring unrecognised mode: {params:?}");
                Ok(())
            },
            b'c' => actor.da(&params),
            b'r' => {
                let ints = to_ints(&params, 2, 1);
                actor.decstbm(ints[0], ints[1])
            },
            _ => {
                debug!("unhandled csi terminator: {:#04x}", byte);
                Ok(())
            },
        };

        self.ctx.param_buffer.clear();
        self.ctx.inter_buffer.clear();
        result
    }

    fn esc_dispatch<A: Actor>(
        &mut self,
        actor: &mut A,
    ) -> Result<(), A::Error> {
        let result = match self.ctx.current_char {
            b'M' => actor.ri(),
            b'D' => actor.ind(),
            byte => {
                debug!("unhandled escape dispatch: {byte:#04x}");
                Ok(())
            },
        };

        self.ctx.param_buffer.clear();
        self.ctx.inter_buffer.clear();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Print(Vec<u8>),
        Execute(u8),
        Cuu(i64),
        Cud(i64),
        Cuf(i64),
        Cub(i64),
        Cnl(i64),
        Cpl(i64),
        Cha(i64),
        Cup(i64, i64),
        Hvp(i64, i64),
        Vpa(i64),
        Dectcem(bool),
        Ed(i64),
        El(i64),
        Il(i64),
        Dl(i64),
        Sgr(Vec<i64>),
        Su(i64),
        Sd(i64),
        Da(Vec<Vec<u8>>),
        Decstbm(i64, i64),
        Ri,
        Ind,
        Osc(Vec<u8>),
        Flush,
    }

    #[derive(Default)]
    struct CollectingActor {
        events: Vec<Event>,
    }

    impl Actor for CollectingActor {
        type Error = Infallible;

        fn print(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
            self.events.push(Event::Print(bytes.to_vec()));
            Ok(())
        }

        fn execute(&mut self, byte: u8) -> Result<(), Infallible> {
            self.events.push(Event::Execute(byte));
            Ok(())
        }

        fn cuu(&mut self, rows: i64) -> Result<(), Infallible> {
            self.events.push(Event::Cuu(rows));
            Ok(())
        }

        fn cud(&mut self, rows: i64) -> Result<(), Infallible> {
            self.events.push(Event::Cud(rows));
            Ok(())
        }

        fn cuf(&mut self, cols: i64) -> Result<(), Infallible> {
            self.events.push(Event::Cuf(cols));
            Ok(())
        }

        fn cub(&mut self, cols: i64) -> Result<(), Infallible> {
            self.events.push(Event::Cub(cols));
            Ok(())
        }

        fn cnl(&mut self, rows: i64) -> Result<(), Infallible> {
            self.events.push(Event::Cnl(rows));
            Ok(())
        }

        fn cpl(&mut self, rows: i64) -> Result<(), Infallible> {
            self.events.push(Event::Cpl(rows));
            Ok(())
        }

        fn cha(&mut self, col: i64) -> Result<(), Infallible> {
            self.events.push(Event::Cha(col));
            Ok(())
        }

        fn cup(&mut self, row: i64, col: i64) -> Result<(), Infallible> {
            self.events.push(Event::Cup(row, col));
            Ok(())
        }

        fn hvp(&mut self, row: i64, col: i64) -> Result<(), Infallible> {
            self.events.push(Event::Hvp(row, col));
            Ok(())
        }

        fn vpa(&mut self, row: i64) -> Result<(), Infallible> {
            self.events.push(Event::Vpa(row));
            Ok(())
        }

        fn dectcem(&mut self, visible: bool) -> Result<(), Infallible> {
            self.events.push(Event::Dectcem(visible));
            Ok(())
        }

        fn ed(&mut self, mode: i64) -> Result<(), Infallible> {
            self.events.push(Event::Ed(mode));
            Ok(())
        }

        fn el(&mut self, mode: i64) -> Result<(), Infallible> {
            self.events.push(Event::El(mode));
            Ok(())
        }

        fn il(&mut self, rows: i64) -> Result<(), Infallible> {
            self.events.push(Event::Il(rows));
            Ok(())
        }

        fn dl(&mut self, rows: i64) -> Result<(), Infallible> {
            self.events.push(Event::Dl(rows));
            Ok(())
        }

        fn sgr(&mut self, params: &[i64]) -> Result<(), Infallible> {
            self.events.push(Event::Sgr(params.to_vec()));
            Ok(())
        }

        fn su(&mut self, rows: i64) -> Result<(), Infallible> {
            self.events.push(Event::Su(rows));
            Ok(())
        }

        fn sd(&mut self, rows: i64) -> Result<(), Infallible> {
            self.events.push(Event::Sd(rows));
            Ok(())
        }

        fn da(&mut self, params: &[&[u8]]) -> Result<(), Infallible> {
            self.events.push(Event::Da(
                params.iter().map(|token| token.to_vec()).collect(),
            ));
            Ok(())
        }

        fn decstbm(&mut self, top: i64, bottom: i64) -> Result<(), Infallible> {
            self.events.push(Event::Decstbm(top, bottom));
            Ok(())
        }

        fn ri(&mut self) -> Result<(), Infallible> {
            self.events.push(Event::Ri);
            Ok(())
        }

        fn ind(&mut self) -> Result<(), Infallible> {
            self.events.push(Event::Ind);
            Ok(())
        }

        fn osc(&mut self, payload: &[u8]) -> Result<(), Infallible> {
            self.events.push(Event::Osc(payload.to_vec()));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            self.events.push(Event::Flush);
            Ok(())
        }
    }

    fn parse(bytes: &[u8]) -> Vec<Event> {
        let mut parser = Parser::new();
        let mut actor = CollectingActor::default();
        parser.advance(bytes, &mut actor).unwrap();
        parser.flush(&mut actor).unwrap();
        actor.events
    }

    /// Like [`parse`], but with the noise of flush synchronisation filtered
    /// out so command-table tests stay readable.
    fn parse_commands(bytes: &[u8]) -> Vec<Event> {
        parse(bytes)
            .into_iter()
            .filter(|event| !matches!(event, Event::Flush))
            .collect()
    }

    #[test]
    fn plain_text_is_buffered_until_flushed() {
        let mut parser = Parser::new();
        let mut actor = CollectingActor::default();
        parser.advance(b"hello", &mut actor).unwrap();
        assert!(actor.events.is_empty());

        parser.flush(&mut actor).unwrap();
        assert_eq!(
            actor.events,
            vec![Event::Print(b"hello".to_vec()), Event::Flush]
        );
    }

    #[test]
    fn executor_flushes_print_run_first() {
        assert_eq!(
            parse_commands(b"hi\x07there\x0a"),
            vec![
                Event::Print(b"hi".to_vec()),
                Event::Execute(0x07),
                Event::Print(b"there".to_vec()),
                Event::Execute(0x0a),
            ]
        );
    }

    #[test]
    fn sgr_and_print_interleave() {
        // CSI 31m, "A", CSI 0m and an empty-parameter reset.
        assert_eq!(
            parse_commands(b"\x1b[31mA\x1b[0m\x1b[m"),
            vec![
                Event::Sgr(vec![31]),
                Event::Print(b"A".to_vec()),
                Event::Sgr(vec![0]),
                Event::Sgr(vec![]),
            ]
        );
    }

    #[test]
    fn cursor_commands_decode_defaults() {
        assert_eq!(
            parse_commands(b"\x1b[A\x1b[3B\x1b[;5H\x1b[2;7f\x1b[d"),
            vec![
                Event::Cuu(1),
                Event::Cud(3),
                Event::Cup(1, 5),
                Event::Hvp(2, 7),
                Event::Vpa(1),
            ]
        );
    }

    #[test]
    fn full_command_table() {
        assert_eq!(
            parse_commands(
                b"\x1b[2C\x1b[2D\x1b[2E\x1b[2F\x1b[4G\x1b[2J\x1b[1K\
                  \x1b[2L\x1b[2M\x1b[3S\x1b[3T\x1b[5;10r"
            ),
            vec![
                Event::Cuf(2),
                Event::Cub(2),
                Event::Cnl(2),
                Event::Cpl(2),
                Event::Cha(4),
                Event::Ed(2),
                Event::El(1),
                Event::Il(2),
                Event::Dl(2),
                Event::Su(3),
                Event::Sd(3),
                Event::Decstbm(5, 10),
            ]
        );
    }

    #[test]
    fn erase_mode_out_of_range_falls_back() {
        assert_eq!(parse_commands(b"\x1b[8J"), vec![Event::Ed(0)]);
    }

    #[test]
    fn private_mode_cursor_visibility() {
        assert_eq!(
            parse_commands(b"\x1b[?25h\x1b[?25l"),
            vec![Event::Dectcem(true), Event::Dectcem(false)]
        );
        // Other modes are consumed without dispatch.
        assert_eq!(parse_commands(b"\x1b[?1049h\x1b[4l"), vec![]);
    }

    #[test]
    fn device_attributes_keeps_raw_params() {
        assert_eq!(
            parse_commands(b"\x1b[c\x1b[>0c"),
            vec![
                Event::Da(vec![]),
                Event::Da(vec![b">0".to_vec()]),
            ]
        );
    }

    #[test]
    fn escape_dispatch() {
        assert_eq!(
            parse_commands(b"\x1bM\x1bD"),
            vec![Event::Ri, Event::Ind]
        );
        // Unhandled escape finals are dropped.
        assert_eq!(parse_commands(b"\x1b7"), vec![]);
    }

    #[test]
    fn eight_bit_csi_entry() {
        assert_eq!(parse_commands(b"\x9b31m"), vec![Event::Sgr(vec![31])]);
    }

    #[test]
    fn osc_terminated_by_bel() {
        assert_eq!(
            parse_commands(b"\x1b]0;title\x07"),
            vec![Event::Osc(b"0;title".to_vec())]
        );
    }

    #[test]
    fn osc_terminated_by_st() {
        assert_eq!(
            parse_commands(b"\x1b]woot\x9c"),
            vec![Event::Osc(b"woot".to_vec())]
        );
    }

    #[test]
    fn can_and_sub_abort_without_dispatch() {
        assert_eq!(parse_commands(b"\x1b[31\x18m"), vec![Event::Print(b"m".to_vec())]);
        assert_eq!(parse_commands(b"\x1b[31\x1am"), vec![Event::Print(b"m".to_vec())]);
        assert_eq!(parse_commands(b"\x1b\x18A"), vec![Event::Print(b"A".to_vec())]);
        // An aborted OSC string drops its partial payload.
        assert_eq!(
            parse_commands(b"\x1b]0;title\x18ok"),
            vec![Event::Print(b"ok".to_vec())]
        );
        assert_eq!(
            parse_commands(b"\x1b]0;title\x1aok"),
            vec![Event::Print(b"ok".to_vec())]
        );
    }

    #[test]
    fn esc_preempts_unfinished_sequence() {
        // The second ESC abandons the first CSI sequence; the following `M`
        // is an escape final, not a CSI terminator.
        assert_eq!(parse_commands(b"\x1b[31\x1bM"), vec![Event::Ri]);
    }

    #[test]
    fn malformed_csi_is_ignored_and_recovers() {
        // A private marker after numeric parameters drops the sequence.
        assert_eq!(parse_commands(b"\x1b[31?5mok"), vec![Event::Print(b"ok".to_vec())]);
        // A parameter after an intermediate likewise.
        assert_eq!(parse_commands(b"\x1b[1 5mok"), vec![Event::Print(b"ok".to_vec())]);
    }

    #[test]
    fn executors_run_inside_sequences() {
        assert_eq!(
            parse_commands(b"\x1b[31\x07m"),
            vec![Event::Execute(0x07), Event::Sgr(vec![31])]
        );
    }

    #[test]
    fn buffers_are_empty_after_dispatch() {
        let mut parser = Parser::new();
        let mut actor = CollectingActor::default();
        parser.advance(b"\x1b[5;10H\x1b(0", &mut actor).unwrap();
        assert!(parser.ctx.param_buffer.is_empty());
        assert!(parser.ctx.inter_buffer.is_empty());
        assert_eq!(parser.state, State::Ground);
    }

    #[test]
    fn high_bytes_print_verbatim() {
        assert_eq!(
            parse_commands(b"\xa0\xff"),
            vec![Event::Print(b"\xa0\xff".to_vec())]
        );
    }

    #[test]
    fn byte_at_a_time_matches_single_call() {
        let input: &[u8] =
            b"He\x1b[31mllo\x0a\x1b]0;t\x07\x1b[?25l\x1b[2J\x9b1;2H\x1bM";

        let whole = parse(input);

        let mut parser = Parser::new();
        let mut actor = CollectingActor::default();
        for &byte in input {
            parser.advance(&[byte], &mut actor).unwrap();
        }
        parser.flush(&mut actor).unwrap();

        assert_eq!(whole, actor.events);
    }
}
