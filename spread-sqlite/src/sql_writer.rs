use spread_core::SqlWriter;

#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteSqlWriter {}

impl SqlWriter for SqliteSqlWriter {
    fn write_primary_key_autoincrement(&self, out: &mut String, column: &str) {
        self.write_identifier_quoted(out, column);
        out.push_str(" INTEGER PRIMARY KEY AUTOINCREMENT");
    }

    fn write_ordinal_lookup(&self, out: &mut String, column: &str) {
        // Sqlite has no FIND_IN_SET, the position of ",id," inside ",list," gives the same order
        out.push_str("instr(',' || ? || ',', ',' || ");
        self.write_identifier_quoted(out, column);
        out.push_str(" || ',')");
    }

    fn write_transaction_begin(&self, out: &mut String) {
        out.push_str("BEGIN DEFERRED;");
    }
}
