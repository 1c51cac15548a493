use crate::{AsValue, Value};

/// A statement argument before expansion.
///
/// A `List` stands for a multi-value placeholder: the `?` it is bound to expands
/// into one placeholder per element, `IN (?)` becoming `IN (?,?,?)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Scalar(Value),
    List(Vec<Value>),
}

impl Arg {
    pub fn list<T: AsValue>(values: impl IntoIterator<Item = T>) -> Self {
        Arg::List(values.into_iter().map(AsValue::as_value).collect())
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Arg::List(..))
    }
}

impl<T: AsValue> From<T> for Arg {
    fn from(value: T) -> Self {
        Arg::Scalar(value.as_value())
    }
}

impl<T: AsValue> FromIterator<T> for Arg {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Arg::list(iter)
    }
}

/// Build a `Vec<Arg>` from heterogeneous expressions.
///
/// ```rust
/// use spread_core::{Arg, args};
/// let args = args![5, "name", Arg::list([1, 2, 3])];
/// assert_eq!(args.len(), 3);
/// assert!(args[2].is_list());
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),*]
    };
}
