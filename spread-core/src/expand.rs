use crate::{
    Arg, BindError, Value,
    scan::{Token, tokenize},
    separated_by,
};
use std::fmt::{Display, Write};

/// Expand the multi-value placeholders of `template`.
///
/// Arguments are matched with the `?` placeholders from left to right. A
/// [`Arg::Scalar`] keeps its placeholder, a [`Arg::List`] of `k` elements turns
/// it into `k` comma separated placeholders. The flat argument list returned is
/// aligned one to one with the placeholders of the expanded statement.
///
/// ```rust
/// use spread_core::{Arg, Value, expand};
/// let (sql, args) = expand("select * from t where id in (?)", [Arg::list([1, 2, 3])]).unwrap();
/// assert_eq!(sql, "select * from t where id in (?,?,?)");
/// assert_eq!(args.len(), 3);
/// ```
pub fn expand(
    template: &str,
    args: impl IntoIterator<Item = Arg>,
) -> Result<(String, Vec<Value>), BindError> {
    let tokens = tokenize(template, false)?;
    let args = args.into_iter().collect::<Vec<_>>();
    let expected = tokens
        .iter()
        .filter(|t| matches!(t, Token::Placeholder))
        .count();
    if expected != args.len() {
        return Err(BindError::ArityMismatch {
            expected,
            given: args.len(),
        });
    }
    let extra = args
        .iter()
        .map(|arg| match arg {
            Arg::Scalar(..) => 0,
            Arg::List(values) => values.len().saturating_sub(1),
        })
        .sum::<usize>();
    let mut sql = String::with_capacity(template.len() + extra * 2);
    let mut flat = Vec::with_capacity(args.len() + extra);
    let mut args = args.into_iter().enumerate();
    for token in tokens {
        match token {
            Token::Text(text) => sql.push_str(text),
            Token::Placeholder => match args.next() {
                Some((_, Arg::Scalar(value))) => {
                    sql.push('?');
                    flat.push(value);
                }
                Some((position, Arg::List(values))) => {
                    if values.is_empty() {
                        return Err(BindError::EmptyList { position });
                    }
                    write_placeholders(&mut sql, values.len());
                    flat.extend(values);
                }
                None => {
                    return Err(BindError::ArityMismatch {
                        expected,
                        given: flat.len(),
                    });
                }
            },
            Token::Named(name) => {
                sql.push(':');
                sql.push_str(name);
            }
        }
    }
    Ok((sql, flat))
}

/// Write `count` generic placeholders separated by a comma.
pub fn write_placeholders(out: &mut String, count: usize) {
    separated_by(out, 0..count, |out, _| out.push('?'), ",");
}

/// Comma joined list of `values`, the ordinal string that drives an
/// order-preserving fetch (`FIND_IN_SET(id, '21,30,22')`).
pub fn ordinal_list<T: Display>(values: impl IntoIterator<Item = T>) -> String {
    let mut out = String::new();
    separated_by(
        &mut out,
        values,
        |out, v| {
            let _ = write!(out, "{v}");
        },
        ",",
    );
    out
}
