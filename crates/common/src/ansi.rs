// ANSI escape stripping for log display

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

// Generalized C1 control-sequence matcher, not just SGR color codes:
// ESC, a byte in @-_, parameters in 0-?, intermediates in SP-/, and a
// final byte in @-~.
const ANSI_PATTERN: &str = r"\x1B[@-_][0-?]*[ -/]*[@-~]";

fn ansi_regex() -> &'static Regex {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    ANSI.get_or_init(|| Regex::new(ANSI_PATTERN).expect("ANSI pattern is valid"))
}

/// Remove every ANSI escape sequence from a log line. A line without
/// escapes is returned borrowed and unchanged.
pub fn strip_ansi_codes(text: &str) -> Cow<'_, str> {
    ansi_regex().replace_all(text, "")
}
