//! Transition helpers for the escape sequence finite state machine.
//!
//! The parser is driven by a table of state transitions that mirrors the
//! DEC/ECMA-48 specification. Each function in this module is responsible for
//! a specific parser state: given an input byte it returns the next [`State`]
//! and the [`Action`] the parser should perform. This keeps the machine
//! table-driven and makes it straightforward to audit coverage for the
//! different control-sequence families (ESC, CSI and OSC).

use crate::class::{classify, ByteClass};
use crate::state::{Action, State};

/// Transition that applies from any state when processing the preempting
/// byte set (CAN, SUB, ESC, 8-bit CSI and ST).
#[inline(always)]
const fn anywhere(state: State, byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        // CAN and SUB abort the sequence in progress with no dispatch.
        0x18 | 0x1a => (Ground, Ignore),
        0x1b => (Escape, None),
        0x9b => (CsiEntry, None),
        0x9c => (Ground, None),
        _ => (state, None),
    }
}

/// Ground state handling printable data and C0 controls.
#[inline(always)]
const fn ground(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match classify(Ground, byte) {
        ByteClass::Printable => (Ground, Print),
        ByteClass::Executor => (Ground, Execute),
        ByteClass::Ignore => (Ground, Ignore),
        _ => anywhere(Ground, byte),
    }
}

/// ESC state waiting for the next byte to identify the sequence family.
#[inline(always)]
const fn escape(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match classify(Escape, byte) {
        ByteClass::Executor => (Escape, Execute),
        ByteClass::Intermediate => (EscapeIntermediate, Collect),
        ByteClass::CsiEntry => (CsiEntry, None),
        ByteClass::OscEntry => (OscString, None),
        ByteClass::EscTerminator => (Ground, EscDispatch),
        ByteClass::Ignore => (Escape, Ignore),
        _ => anywhere(Escape, byte),
    }
}

/// ESC state that collects intermediate bytes before dispatch.
#[inline(always)]
const fn escape_intermediate(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match classify(EscapeIntermediate, byte) {
        ByteClass::Executor => (EscapeIntermediate, Execute),
        ByteClass::Intermediate => (EscapeIntermediate, Collect),
        ByteClass::EscTerminator => (Ground, EscDispatch),
        ByteClass::Ignore => (EscapeIntermediate, Ignore),
        _ => anywhere(EscapeIntermediate, byte),
    }
}

/// CSI entry point that validates and routes subsequent parameter bytes.
#[inline(always)]
const fn csi_entry(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match classify(CsiEntry, byte) {
        ByteClass::Executor => (CsiEntry, Execute),
        ByteClass::CsiParam => (CsiParam, Param),
        // Private markers qualify the whole sequence and travel with the
        // parameters.
        ByteClass::CsiPrivate => (CsiParam, Param),
        ByteClass::Intermediate => (CsiIntermediate, Collect),
        ByteClass::CsiTerminator => (Ground, CsiDispatch),
        ByteClass::Ignore => (CsiEntry, Ignore),
        _ => anywhere(CsiEntry, byte),
    }
}

/// CSI parameter collection handling numeric fields and separators.
#[inline(always)]
const fn csi_param(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match classify(CsiParam, byte) {
        ByteClass::Executor => (CsiParam, Execute),
        ByteClass::CsiParam => (CsiParam, Param),
        // A private marker after ordinary parameters is malformed.
        ByteClass::CsiPrivate => (CsiIgnore, Ignore),
        ByteClass::Intermediate => (CsiIntermediate, Collect),
        ByteClass::CsiTerminator => (Ground, CsiDispatch),
        ByteClass::Ignore => (CsiParam, Ignore),
        _ => anywhere(CsiParam, byte),
    }
}

/// CSI intermediate state collecting extra bytes prior to dispatch.
#[inline(always)]
const fn csi_intermediate(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match classify(CsiIntermediate, byte) {
        ByteClass::Executor => (CsiIntermediate, Execute),
        ByteClass::Intermediate => (CsiIntermediate, Collect),
        ByteClass::CsiParam | ByteClass::CsiPrivate => (CsiIgnore, Ignore),
        ByteClass::CsiTerminator => (Ground, CsiDispatch),
        ByteClass::Ignore => (CsiIntermediate, Ignore),
        _ => anywhere(CsiIntermediate, byte),
    }
}

/// CSI ignore state consuming bytes after a malformed introducer.
#[inline(always)]
const fn csi_ignore(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match classify(CsiIgnore, byte) {
        ByteClass::Executor => (CsiIgnore, Execute),
        ByteClass::CsiTerminator => (Ground, None),
        ByteClass::Ignore => (CsiIgnore, Ignore),
        _ => anywhere(CsiIgnore, byte),
    }
}

/// OSC payload collection until BEL or ST is observed.
#[inline(always)]
const fn osc_string(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match classify(OscString, byte) {
        ByteClass::Bel => (Ground, None),
        ByteClass::Printable => (OscString, OscPut),
        ByteClass::Executor | ByteClass::Ignore => (OscString, Ignore),
        _ => anywhere(OscString, byte),
    }
}

/// Action to trigger upon entering a new state before reading the next byte.
#[inline(always)]
pub(crate) const fn entry_action(state: State) -> Action {
    use Action::*;
    use State::*;

    match state {
        Ground => None,
        Escape => Clear,
        EscapeIntermediate => None,
        CsiEntry => Clear,
        CsiParam => None,
        CsiIntermediate => None,
        CsiIgnore => None,
        OscString => OscStart,
    }
}

/// Action to trigger after leaving a state, typically to finalize buffers.
#[inline(always)]
pub(crate) const fn exit_action(state: State) -> Action {
    use Action::*;
    use State::*;

    match state {
        // Leaving ground means a command is about to execute, so the pending
        // print run must reach the actor first.
        Ground => Flush,
        Escape => None,
        EscapeIntermediate => None,
        CsiEntry => None,
        CsiParam => None,
        CsiIntermediate => None,
        CsiIgnore => None,
        OscString => OscEnd,
    }
}

/// Core transition table that delegates to state-specific helpers.
#[inline(always)]
pub(crate) const fn transit(state: State, byte: u8) -> (State, Action) {
    use State::*;

    match state {
        Ground => ground(byte),
        Escape => escape(byte),
        EscapeIntermediate => escape_intermediate(byte),
        CsiEntry => csi_entry(byte),
        CsiParam => csi_param(byte),
        CsiIntermediate => csi_intermediate(byte),
        CsiIgnore => csi_ignore(byte),
        OscString => osc_string(byte),
    }
}
