/// The [`State`] enum captures the current position in the parser's control
/// flow. It mirrors the state machine defined by DEC/ECMA-48 terminals where
/// input bytes drive transitions between ground text handling, escape
/// sequences, control sequence introducer (CSI) parsing and operating system
/// commands (OSC).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// The parser's default, steady-state mode. Printable bytes accumulate
    /// into the pending print run, C0 controls are executed immediately, and
    /// ESC / CSI lead bytes transition into the structured sequence states.
    #[default]
    Ground,
    /// Entry state after the C0 `ESC` (0x1B). The next byte selects the
    /// sequence family: `[` starts a CSI sequence, `]` an OSC string, an
    /// intermediate byte moves to [`State::EscapeIntermediate`], and any
    /// other final byte dispatches a plain escape sequence.
    Escape,
    /// Collects the optional `0x20..=0x2F` bytes that appear between `ESC`
    /// and the final byte of a plain escape sequence.
    EscapeIntermediate,
    /// First byte after a CSI introducer (`ESC [` or the 8-bit `0x9B`).
    /// Parameter and private-marker bytes move to [`State::CsiParam`],
    /// intermediates to [`State::CsiIntermediate`], and a final byte
    /// dispatches immediately.
    CsiEntry,
    /// Accumulates CSI parameter bytes (digits, `;` separators and the
    /// private markers already collected on entry). A private marker seen
    /// here is malformed and drops the sequence into [`State::CsiIgnore`].
    CsiParam,
    /// Collects CSI intermediate bytes after the parameters. A parameter
    /// byte in this position is malformed.
    CsiIntermediate,
    /// Error-recovery state for malformed CSI sequences. Consumes bytes
    /// until a final byte is seen, then returns to ground without dispatch.
    CsiIgnore,
    /// Collects an OSC payload after `ESC ]` until terminated by BEL or ST
    /// (`ESC \` or the 8-bit `0x9C`). The payload is dispatched on exit.
    OscString,
}

/// The [`Action`] enum accompanies the state machine. Each parsed byte maps
/// to a transition and an action telling the parser how to process the byte
/// (buffer printable data, accumulate parameters, dispatch a sequence, and
/// so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// No side effects required.
    None,
    /// Byte is ignored entirely.
    Ignore,
    /// Printable byte joins the pending print run.
    Print,
    /// C0 control is executed immediately, after the print run is emitted.
    Execute,
    /// Reset the parameter and intermediate buffers.
    Clear,
    /// Collect an intermediate byte.
    Collect,
    /// Collect a parameter byte.
    Param,
    /// Emit the pending print run and synchronise the actor.
    Flush,
    /// Dispatch a CSI sequence to the actor.
    CsiDispatch,
    /// Dispatch a plain escape sequence to the actor.
    EscDispatch,
    /// Begin collecting an OSC payload.
    OscStart,
    /// Append a byte to the OSC payload buffer.
    OscPut,
    /// Finalize the OSC payload and dispatch it.
    OscEnd,
}
