//! Terminal escape stripping for untrusted tool output.

/// Remove ANSI escape sequences from `text`.
///
/// Drops CSI sequences (`ESC [` or the 8-bit `0x9B`, then parameter bytes,
/// intermediate bytes and one final byte), OSC sequences (`ESC ]` up to BEL,
/// `ESC \` or the next line break) and any other bare ESC. A malformed CSI
/// ends at the first byte that cannot belong to it, and that byte is kept.
/// Every other character is kept as-is.
pub fn sanitize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => match chars.peek() {
                Some('[') => {
                    chars.next();
                    skip_csi(&mut chars);
                }
                Some(']') => {
                    chars.next();
                    skip_osc(&mut chars);
                }
                _ => {}
            },
            '\u{9b}' => skip_csi(&mut chars),
            _ => result.push(ch),
        }
    }

    result
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

/// Consume the body of a CSI sequence (ECMA-48 5.4).
fn skip_csi(chars: &mut Chars<'_>) {
    let mut seen_intermediate = false;
    while let Some(&next_ch) = chars.peek() {
        match next_ch {
            // Parameter bytes only before any intermediate byte
            '\x30'..='\x3f' if !seen_intermediate => {
                chars.next();
            }
            '\x20'..='\x2f' => {
                seen_intermediate = true;
                chars.next();
            }
            '\x40'..='\x7e' => {
                chars.next();
                return;
            }
            _ => return,
        }
    }
}

/// Consume an OSC string up to BEL or ST (`ESC \`).
///
/// A line break ends an unterminated string and is kept.
fn skip_osc(chars: &mut Chars<'_>) {
    while let Some(&next_ch) = chars.peek() {
        match next_ch {
            '\n' | '\r' => return,
            '\x07' => {
                chars.next();
                return;
            }
            '\x1b' => {
                chars.next();
                if chars.peek() == Some(&'\\') {
                    chars.next();
                }
                return;
            }
            _ => {
                chars.next();
            }
        }
    }
}
