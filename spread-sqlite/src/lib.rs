mod cbox;
mod connection;
mod driver;
mod extract;
mod prepared;
mod sql_writer;
mod transaction;

use libsqlite3_sys::{sqlite3, sqlite3_errmsg, sqlite3_errstr};
use std::ffi::{CStr, c_char, c_int};

pub(crate) use cbox::*;
pub use connection::*;
pub use driver::*;
pub use prepared::*;
pub use sql_writer::*;
pub use transaction::*;

pub(crate) fn error_message_from_ptr(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return "Unknown error (could not extract the error message)".into();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Message of the last error on `connection`, or the generic description of
/// `rc` when there is no connection to ask.
pub(crate) fn error_message(connection: *mut sqlite3, rc: c_int) -> String {
    let message = if !connection.is_null() {
        unsafe { sqlite3_errmsg(connection) }
    } else {
        unsafe { sqlite3_errstr(rc) }
    };
    error_message_from_ptr(message)
}
