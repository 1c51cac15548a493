use crate::{
    Arg, BindError,
    scan::{Token, tokenize},
};
use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

/// Source of values for `:name` parameters.
///
/// Implemented for string keyed maps. Records implement it to be usable directly
/// as the parameter source of a named statement.
pub trait NamedArgs {
    fn named_arg(&self, name: &str) -> Option<Arg>;
}

impl<K, V> NamedArgs for HashMap<K, V>
where
    K: Borrow<str> + Hash + Eq,
    V: Clone + Into<Arg>,
{
    fn named_arg(&self, name: &str) -> Option<Arg> {
        self.get(name).cloned().map(Into::into)
    }
}

impl<K, V> NamedArgs for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: Clone + Into<Arg>,
{
    fn named_arg(&self, name: &str) -> Option<Arg> {
        self.get(name).cloned().map(Into::into)
    }
}

impl<T: NamedArgs + ?Sized> NamedArgs for &T {
    fn named_arg(&self, name: &str) -> Option<Arg> {
        (**self).named_arg(name)
    }
}

/// Rewrite the `:name` parameters of `template` into generic `?` placeholders.
///
/// Returns the rewritten statement and the parameter names in placeholder order,
/// a name used twice appears twice. `::` casts, quoted text and comments are
/// left untouched.
pub fn compile_named(template: &str) -> Result<(String, Vec<String>), BindError> {
    let tokens = tokenize(template, true)?;
    let mut sql = String::with_capacity(template.len());
    let mut names = Vec::new();
    for token in tokens {
        match token {
            Token::Text(text) => sql.push_str(text),
            Token::Placeholder => sql.push('?'),
            Token::Named(name) => {
                sql.push('?');
                names.push(name.to_owned());
            }
        }
    }
    Ok((sql, names))
}

/// Resolve the `names` against `source`, in order.
pub fn resolve_named(names: &[String], source: &impl NamedArgs) -> Result<Vec<Arg>, BindError> {
    names
        .iter()
        .map(|name| {
            source
                .named_arg(name)
                .ok_or_else(|| BindError::MissingNamedArg(name.clone()))
        })
        .collect()
}
