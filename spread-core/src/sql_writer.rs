/// Dialect printer for the few SQL fragments that differ between backends.
///
/// Defaults use ANSI identifier quoting and the MySQL extensions
/// (`AUTO_INCREMENT`, `FIND_IN_SET`).
pub trait SqlWriter {
    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', "\"\"");
        out.push('"');
    }

    /// Column definition of an integer primary key assigned by the database.
    fn write_primary_key_autoincrement(&self, out: &mut String, column: &str) {
        self.write_identifier_quoted(out, column);
        out.push_str(" INTEGER PRIMARY KEY AUTO_INCREMENT");
    }

    /// Expression giving the position of `column` inside a comma separated
    /// ordinal list bound to a single placeholder. Used in `ORDER BY` to keep the
    /// order of the identifiers the rows were fetched by.
    fn write_ordinal_lookup(&self, out: &mut String, column: &str) {
        out.push_str("FIND_IN_SET(");
        self.write_identifier_quoted(out, column);
        out.push_str(", ?)");
    }

    /// Emit DROP TABLE.
    fn write_drop_table(&self, out: &mut String, table: &str, if_exists: bool) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("DROP TABLE ");
        if if_exists {
            out.push_str("IF EXISTS ");
        }
        self.write_identifier_quoted(out, table);
        out.push(';');
    }

    /// Emit BEGIN statement.
    fn write_transaction_begin(&self, out: &mut String) {
        out.push_str("BEGIN;");
    }

    /// Emit COMMIT statement.
    fn write_transaction_commit(&self, out: &mut String) {
        out.push_str("COMMIT;");
    }

    /// Emit ROLLBACK statement.
    fn write_transaction_rollback(&self, out: &mut String) {
        out.push_str("ROLLBACK;");
    }
}

/// Writer using every default of [`SqlWriter`].
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter {}

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {}
