use crate::BindError;

/// Piece of a statement template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'s> {
    /// Verbatim SQL, including quoted literals and comments.
    Text(&'s str),
    /// Generic positional `?`.
    Placeholder,
    /// `:name`, only produced when named parameters are requested.
    Named(&'s str),
}

/// Split `sql` into text and placeholder tokens.
///
/// A `?` (or `:name`) inside a string literal, a quoted identifier or a comment
/// is plain text. Unterminated quoting makes the placeholder positions
/// unknowable, so it is rejected.
///
/// Quoting follows the SQLite and ANSI rules: `'`, `"` and `` ` `` quotes are
/// escaped only by doubling them. Backslash escapes (MySQL) and `$$` dollar
/// quoting (Postgres) are not recognized, a backslash is an ordinary character
/// and `$$` is plain text.
pub(crate) fn tokenize(sql: &str, named: bool) -> Result<Vec<Token<'_>>, BindError> {
    let bytes = sql.as_bytes();
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' | b'`' => i = skip_quoted(bytes, i)?,
            b'-' if bytes.get(i + 1) == Some(&b'-') => i = skip_line_comment(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i)?,
            b'?' => {
                if start < i {
                    tokens.push(Token::Text(&sql[start..i]));
                }
                tokens.push(Token::Placeholder);
                i += 1;
                start = i;
            }
            b':' if named => {
                if bytes.get(i + 1) == Some(&b':') {
                    // Type cast
                    i += 2;
                    continue;
                }
                let len = name_len(&bytes[i + 1..]);
                if len == 0 {
                    i += 1;
                    continue;
                }
                if start < i {
                    tokens.push(Token::Text(&sql[start..i]));
                }
                tokens.push(Token::Named(&sql[i + 1..i + 1 + len]));
                i += 1 + len;
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        tokens.push(Token::Text(&sql[start..]));
    }
    Ok(tokens)
}

fn skip_quoted(bytes: &[u8], begin: usize) -> Result<usize, BindError> {
    let quote = bytes[begin];
    let mut i = begin + 1;
    loop {
        match bytes[i..].iter().position(|b| *b == quote) {
            Some(found) => {
                let end = i + found;
                if bytes.get(end + 1) == Some(&quote) {
                    // Doubled quote is an escaped quote
                    i = end + 2;
                    continue;
                }
                return Ok(end + 1);
            }
            None => {
                return Err(BindError::MalformedTemplate {
                    offset: begin,
                    reason: if quote == b'\'' {
                        "unterminated string literal"
                    } else {
                        "unterminated quoted identifier"
                    },
                });
            }
        }
    }
}

fn skip_line_comment(bytes: &[u8], begin: usize) -> usize {
    bytes[begin..]
        .iter()
        .position(|b| *b == b'\n')
        .map_or(bytes.len(), |end| begin + end + 1)
}

fn skip_block_comment(bytes: &[u8], begin: usize) -> Result<usize, BindError> {
    bytes[begin + 2..]
        .windows(2)
        .position(|w| w == b"*/")
        .map(|end| begin + 2 + end + 2)
        .ok_or(BindError::MalformedTemplate {
            offset: begin,
            reason: "unterminated block comment",
        })
}

fn name_len(bytes: &[u8]) -> usize {
    match bytes.first() {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => bytes
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{Token, tokenize};
    use crate::BindError;

    #[test]
    fn placeholders_outside_quotes() {
        let tokens = tokenize("select '?' from \"a?\" where x = ? -- ?\nand y = ?", false)
            .expect("valid template");
        assert_eq!(
            tokens,
            [
                Token::Text("select '?' from \"a?\" where x = "),
                Token::Placeholder,
                Token::Text(" -- ?\nand y = "),
                Token::Placeholder,
            ]
        );
    }

    #[test]
    fn doubled_quotes_do_not_terminate() {
        let tokens = tokenize("select 'it''s ?', ?", false).expect("valid template");
        assert_eq!(
            tokens,
            [Token::Text("select 'it''s ?', "), Token::Placeholder]
        );
    }

    #[test]
    fn named_and_casts() {
        let tokens = tokenize("select :a::text, ':b' /* :c */ where x = :d_1", true)
            .expect("valid template");
        assert_eq!(
            tokens,
            [
                Token::Text("select "),
                Token::Named("a"),
                Token::Text("::text, ':b' /* :c */ where x = "),
                Token::Named("d_1"),
            ]
        );
    }

    #[test]
    fn unterminated() {
        assert_eq!(
            tokenize("select 'abc", false),
            Err(BindError::MalformedTemplate {
                offset: 7,
                reason: "unterminated string literal"
            })
        );
        assert!(matches!(
            tokenize("select /* ?", false),
            Err(BindError::MalformedTemplate { offset: 7, .. })
        ));
        assert!(matches!(
            tokenize("select `x", true),
            Err(BindError::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn only_doubled_quotes_escape() {
        assert!(matches!(
            tokenize(r"select * from t where a = 'it\'s' and id in (?)", false),
            Err(BindError::MalformedTemplate {
                reason: "unterminated string literal",
                ..
            })
        ));
        let tokens = tokenize("select $$ ? $$, ?", false).expect("valid template");
        assert_eq!(
            tokens,
            [
                Token::Text("select $$ "),
                Token::Placeholder,
                Token::Text(" $$, "),
                Token::Placeholder,
            ]
        );
    }
}
