use crate::{CBox, error_message_from_ptr};
use libsqlite3_sys::*;
use spread_core::{AsValue, Error, Prepared, Result, Value, truncate_long};
use std::{
    ffi::{CStr, c_int},
    fmt::{self, Display},
    os::raw::{c_char, c_void},
};

pub struct SqlitePrepared {
    pub(crate) statement: CBox<sqlite3_stmt>,
    pub(crate) index: u64,
}

impl SqlitePrepared {
    pub(crate) fn new(statement: CBox<sqlite3_stmt>) -> Self {
        unsafe {
            sqlite3_clear_bindings(*statement);
        }
        Self {
            statement,
            index: 1,
        }
    }

    /// The SQL text the statement was prepared from.
    pub fn sql(&self) -> String {
        statement_sql(*self.statement)
    }

    fn bind_text(&self, index: c_int, value: &str) -> c_int {
        unsafe {
            sqlite3_bind_text(
                *self.statement,
                index,
                value.as_ptr() as *const c_char,
                value.len() as c_int,
                SQLITE_TRANSIENT(),
            )
        }
    }
}

pub(crate) fn statement_sql(statement: *mut sqlite3_stmt) -> String {
    unsafe {
        let sql = sqlite3_sql(statement);
        if sql.is_null() {
            return String::new();
        }
        CStr::from_ptr(sql).to_string_lossy().into_owned()
    }
}

impl Prepared for SqlitePrepared {
    fn bind(&mut self, value: impl AsValue) -> Result<&mut Self> {
        let index = self.index;
        self.bind_index(value, index)
    }

    fn bind_index(&mut self, value: impl AsValue, index: u64) -> Result<&mut Self> {
        let value = value.as_value();
        let position = index as c_int;
        let rc = unsafe {
            match &value {
                v if v.is_null() => sqlite3_bind_null(*self.statement, position),
                Value::Boolean(Some(v)) => {
                    sqlite3_bind_int(*self.statement, position, *v as c_int)
                }
                Value::Int32(Some(v)) => sqlite3_bind_int(*self.statement, position, *v),
                Value::Int64(Some(v)) => sqlite3_bind_int64(*self.statement, position, *v),
                Value::Float64(Some(v)) => sqlite3_bind_double(*self.statement, position, *v),
                Value::Varchar(Some(v)) => self.bind_text(position, v),
                Value::Blob(Some(v)) => sqlite3_bind_blob(
                    *self.statement,
                    position,
                    v.as_ptr() as *const c_void,
                    v.len() as c_int,
                    SQLITE_TRANSIENT(),
                ),
                _ => sqlite3_bind_null(*self.statement, position),
            }
        };
        if rc != SQLITE_OK {
            let error = unsafe {
                let db = sqlite3_db_handle(*self.statement);
                Error::msg(error_message_from_ptr(sqlite3_errmsg(db))).context(format!(
                    "Cannot bind parameter {} ({}) to query:\n{}",
                    index,
                    value,
                    truncate_long!(self.sql())
                ))
            };
            log::error!("{:#}", error);
            return Err(error);
        }
        self.index = index + 1;
        Ok(self)
    }

    fn clear_bindings(&mut self) -> Result<&mut Self> {
        unsafe {
            sqlite3_reset(*self.statement);
            sqlite3_clear_bindings(*self.statement);
        }
        self.index = 1;
        Ok(self)
    }

    fn parameter_count(&self) -> usize {
        unsafe { sqlite3_bind_parameter_count(*self.statement) as usize }
    }
}

impl Display for SqlitePrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql()))
    }
}
