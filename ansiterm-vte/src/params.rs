//! Decoding of raw CSI parameter bytes into command arguments.
//!
//! Parameters stay as raw bytes (separators and private markers included)
//! while a sequence is being collected; only the dispatch site knows how many
//! arguments a command wants and what its defaults are.

/// Split a raw parameter buffer on `;`, keeping empty tokens so that an
/// omitted parameter can take its default in place (`CSI ;5H` addresses row
/// 1, column 5).
pub(crate) fn split_params(buffer: &[u8]) -> Vec<&[u8]> {
    if buffer.is_empty() {
        return Vec::new();
    }

    buffer.split(|&byte| byte == b';').collect()
}

/// Decode tokens as base-10 integers, padding with `default` up to
/// `min_count`. Empty and malformed tokens decode to `default`.
pub(crate) fn to_ints(
    params: &[&[u8]],
    min_count: usize,
    default: i64,
) -> Vec<i64> {
    let mut ints: Vec<i64> = params
        .iter()
        .map(|token| decode_int(token, default))
        .collect();

    while ints.len() < min_count {
        ints.push(default);
    }

    ints
}

/// Decode the single expected parameter of a command.
pub(crate) fn single(params: &[&[u8]], default: i64) -> i64 {
    to_ints(params, 1, default)[0]
}

/// Erase commands accept modes 0 through 3; anything else falls back to 0.
pub(crate) fn erase_param(params: &[&[u8]]) -> i64 {
    let mode = single(params, 0);
    if (0..=3).contains(&mode) {
        mode
    } else {
        0
    }
}

fn decode_int(token: &[u8], default: i64) -> i64 {
    if token.is_empty() {
        return default;
    }

    let mut value = 0i64;
    for &byte in token {
        if !byte.is_ascii_digit() {
            return default;
        }
        value = value.saturating_mul(10).saturating_add((byte - b'0') as i64);
    }

    value
}
