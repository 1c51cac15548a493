use crate::{
    BindError,
    scan::{Token, tokenize},
};
use std::fmt::Write;

/// Native placeholder syntax of a driver.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindStyle {
    /// `?` (MySQL, SQLite)
    #[default]
    Question,
    /// `$1`, `$2` (Postgres)
    Dollar,
    /// `:arg1`, `:arg2` (Oracle, SQLite)
    Named,
    /// `@p1`, `@p2` (SQL Server)
    At,
}

impl BindStyle {
    /// Write the placeholder number `index` (from 1).
    pub fn write_placeholder(&self, out: &mut String, index: usize) {
        let _ = match self {
            BindStyle::Question => out.write_char('?'),
            BindStyle::Dollar => write!(out, "${index}"),
            BindStyle::Named => write!(out, ":arg{index}"),
            BindStyle::At => write!(out, "@p{index}"),
        };
    }
}

/// Rewrite every generic `?` placeholder of `sql` into `style`, numbering them
/// from left to right.
///
/// Placeholders inside quoted text and comments are left alone. A statement that
/// was already rebound contains no generic placeholder anymore and comes back
/// unchanged, so rebinding twice is harmless.
pub fn rebind(style: BindStyle, sql: &str) -> Result<String, BindError> {
    let tokens = tokenize(sql, false)?;
    if style == BindStyle::Question {
        return Ok(sql.to_owned());
    }
    let mut out = String::with_capacity(sql.len() + sql.len() / 4);
    let mut index = 0;
    for token in tokens {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Placeholder => {
                index += 1;
                style.write_placeholder(&mut out, index);
            }
            Token::Named(name) => {
                out.push(':');
                out.push_str(name);
            }
        }
    }
    Ok(out)
}
