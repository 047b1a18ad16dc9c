//! Comment and literal masking
//!
//! Probes run over a [`MaskedSource`]: the fixture text with the bodies of
//! comments, string literals, char literals and text blocks overwritten by
//! spaces. Quote delimiters and newlines survive, and every masked character
//! becomes as many spaces as it had UTF-8 bytes, so byte offsets and line
//! numbers of the masked text match the original.

/// Fixture text with comments and literal bodies blanked out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedSource {
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Str,
    Char,
    TextBlock,
}

impl MaskedSource {
    /// Mask `source`
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut out = String::with_capacity(source.len());
        let mut state = State::Code;
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match state {
                State::Code => match c {
                    '/' if chars.peek() == Some(&'/') => {
                        chars.next();
                        out.push_str("  ");
                        state = State::LineComment;
                    }
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        out.push_str("  ");
                        state = State::BlockComment;
                    }
                    '"' => {
                        out.push('"');
                        if source_continues_with(&mut chars, "\"\"") {
                            out.push_str("\"\"");
                            state = State::TextBlock;
                        } else {
                            state = State::Str;
                        }
                    }
                    '\'' => {
                        out.push('\'');
                        state = State::Char;
                    }
                    _ => out.push(c),
                },
                State::LineComment => {
                    if c == '\n' {
                        out.push('\n');
                        state = State::Code;
                    } else {
                        blank(&mut out, c);
                    }
                }
                State::BlockComment => {
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        out.push_str("  ");
                        state = State::Code;
                    } else {
                        blank(&mut out, c);
                    }
                }
                State::Str | State::Char => {
                    let close = if state == State::Str { '"' } else { '\'' };
                    if c == '\\' {
                        blank(&mut out, c);
                        if let Some(escaped) = chars.next() {
                            blank(&mut out, escaped);
                        }
                    } else if c == close {
                        out.push(close);
                        state = State::Code;
                    } else if c == '\n' {
                        // unterminated literal; resume scanning code
                        out.push('\n');
                        state = State::Code;
                    } else {
                        blank(&mut out, c);
                    }
                }
                State::TextBlock => {
                    if c == '\\' {
                        blank(&mut out, c);
                        if let Some(escaped) = chars.next() {
                            blank(&mut out, escaped);
                        }
                    } else if c == '"' && source_continues_with(&mut chars, "\"\"") {
                        out.push_str("\"\"\"");
                        state = State::Code;
                    } else {
                        blank(&mut out, c);
                    }
                }
            }
        }

        Self { text: out }
    }

    /// Masked text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Masked lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

impl AsRef<str> for MaskedSource {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

fn blank(out: &mut String, c: char) {
    if c == '\n' {
        out.push('\n');
    } else {
        out.extend(std::iter::repeat(' ').take(c.len_utf8()));
    }
}

/// Consume `expected` from `chars` if it comes next
fn source_continues_with<I>(chars: &mut std::iter::Peekable<I>, expected: &str) -> bool
where
    I: Iterator<Item = char> + Clone,
{
    let mut lookahead = chars.clone();
    for want in expected.chars() {
        if lookahead.next() != Some(want) {
            return false;
        }
    }
    for _ in expected.chars() {
        chars.next();
    }
    true
}
