mod user;

pub use spread_core::*;
pub use user::*;
