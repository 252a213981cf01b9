use regex::Regex;

use super::rules::builtin_regex;

/// Strips ANSI CSI sequences (`ESC [ params letter`): colors, cursor moves.
#[derive(Debug, Clone)]
pub struct AnsiStripper {
    csi: Regex,
}

impl AnsiStripper {
    pub fn new() -> Self {
        Self {
            csi: builtin_regex(r"\x1B\[[0-9;]*[A-Za-z]"),
        }
    }

    pub fn strip(&self, line: String) -> String {
        if line.contains('\x1B') {
            self.csi.replace_all(&line, "").into_owned()
        } else {
            line
        }
    }
}

impl Default for AnsiStripper {
    fn default() -> Self {
        Self::new()
    }
}
