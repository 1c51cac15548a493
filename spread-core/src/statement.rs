use crate::{
    Arg, BindError, BindStyle, NamedArgs, Value, compile_named, expand, rebind, resolve_named,
    truncate_long,
};
use std::fmt::{self, Display};

/// An expanded statement: generic `?` placeholders and the flat, positionally
/// aligned argument list.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<Value>,
}

impl Statement {
    /// Expand `template` with `args`, see [`expand`].
    pub fn new(
        template: impl AsRef<str>,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<Self, BindError> {
        let (sql, args) = expand(template.as_ref(), args)?;
        Ok(Self { sql, args })
    }

    /// Statement without arguments.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    /// Build a statement from a template with `:name` parameters, values are
    /// looked up in `source`. A parameter resolving to a list expands like a
    /// positional one.
    pub fn named(template: impl AsRef<str>, source: &impl NamedArgs) -> Result<Self, BindError> {
        let (sql, names) = compile_named(template.as_ref())?;
        let args = resolve_named(&names, source)?;
        Self::new(sql, args)
    }

    /// Multi-row insert: `head VALUES (?,?),(?,?)` with one placeholder group per
    /// row.
    ///
    /// Every row must have the same number of values as the first one.
    pub fn insert_rows<R, V>(head: impl AsRef<str>, rows: R) -> Result<Self, BindError>
    where
        R: IntoIterator<Item = V>,
        V: IntoIterator<Item = Value>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let Some(width) = rows.first().map(Vec::len) else {
            return Err(BindError::EmptyList { position: 0 });
        };
        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            return Err(BindError::ArityMismatch {
                expected: width,
                given: row.len(),
            });
        }
        let mut template = String::with_capacity(head.as_ref().len() + 8 + rows.len() * 4);
        template.push_str(head.as_ref().trim_end());
        template.push_str(" VALUES ");
        for i in 0..rows.len() {
            if i > 0 {
                template.push(',');
            }
            template.push_str("(?)");
        }
        Self::new(template, rows.into_iter().map(Arg::List))
    }

    /// Number of generic placeholders, equal to `args.len()`.
    pub fn placeholders(&self) -> usize {
        self.args.len()
    }

    /// The SQL with placeholders in the driver syntax.
    pub fn rebind(&self, style: BindStyle) -> Result<String, BindError> {
        rebind(style, &self.sql)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql))?;
        if !self.args.is_empty() {
            f.write_str(" [")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}
