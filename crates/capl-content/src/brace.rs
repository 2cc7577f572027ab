//! Brace matching over line buffers
//!
//! Finds the closing line of a brace-delimited block by depth counting.
//! Characters inside string literals and after a `//` comment marker are
//! structurally insignificant and never counted.

/// The structurally significant characters of one line.
///
/// Skips the contents of single- and double-quoted string literals
/// (honoring backslash escapes) and everything after a `//` marker.
/// Quote state does not persist across lines.
fn structural_chars(line: &str) -> Vec<char> {
    let mut out = Vec::new();
    let mut chars = line.chars().peekable();
    let mut quote: Option<char> = None;
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '/' if chars.peek() == Some(&'/') => break,
                _ => out.push(c),
            },
        }
    }
    out
}

/// Find the line of the closing brace matching the block opened at
/// `start_line`.
///
/// The opening brace may sit on `start_line` itself or on a later line
/// (blank lines between header and brace are common in CAPL). Returns the
/// index of the first line on which the depth returns to zero after having
/// been nonzero, inclusive. Returns `None` if the buffer ends first — the
/// block is unterminated and the caller decides how to recover.
pub fn find_block_end(lines: &[String], start_line: usize) -> Option<usize> {
    let mut depth: usize = 0;
    let mut opened = false;
    for (offset, line) in lines.get(start_line..)?.iter().enumerate() {
        for c in structural_chars(line) {
            match c {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        if opened && depth == 0 {
            return Some(start_line + offset);
        }
    }
    None
}

/// Whether the construct starting at `start_line` opens a block.
///
/// Scans forward for the first structural `{` or `;`. A header terminated
/// by `;` before any `{` is a call or declaration, not a block.
pub fn opens_block(lines: &[String], start_line: usize) -> bool {
    for line in lines.get(start_line..).unwrap_or_default() {
        for c in structural_chars(line) {
            match c {
                '{' => return true,
                ';' => return false,
                _ => {}
            }
        }
    }
    false
}
