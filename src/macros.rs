//! Token construction shortcuts for the lexer.

/// Builds a `Token` from a kind, its source text and a 1-based line.
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), 3);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $line:expr) => {
        Token {
            kind: $kind,
            value: $value,
            line: $line,
        }
    };
}

/// Handler for a pattern that always lexes to the same fixed text, such as
/// `==` or `{`. Emits one token on the current line and skips its text.
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            let line = lexer.line;
            lexer.push(MK_TOKEN!($kind, String::from($value), line));
            lexer.advance_n($value.len());
        }
    };
}
