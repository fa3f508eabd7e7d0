//! Rewrites the postfix repetition marker into explicit `<…>` notation.

use tracing::debug;

/// Postfix marker: repeat the balanced group just before it.
pub const REPEAT_MARKER: char = '*';
pub const REPEAT_OPEN: char = '<';
pub const REPEAT_CLOSE: char = '>';

/// Rewrite the first `*` in `input` so that `(…)*` becomes `<(…)>`.
///
/// Only the first marker is rewritten. When no balanced group precedes the
/// marker it still becomes `>` and no `<` is inserted, which the parser then
/// rejects as an unmatched `>`.
pub fn preprocess(input: &str) -> String {
    let mut chars: Vec<char> = input.chars().collect();
    let Some(marker) = chars.iter().position(|&c| c == REPEAT_MARKER) else {
        return input.to_string();
    };
    chars[marker] = REPEAT_CLOSE;

    let mut opens = 0usize;
    let mut closes = 0usize;
    for j in (0..marker).rev() {
        match chars[j] {
            ')' => closes += 1,
            '(' => opens += 1,
            _ => {}
        }
        if opens == closes && opens > 0 {
            chars.insert(j, REPEAT_OPEN);
            break;
        }
    }

    let output: String = chars.into_iter().collect();
    debug!(input, %output, "rewrote repetition marker");
    output
}
