mod check_connection;

pub use check_connection::*;
