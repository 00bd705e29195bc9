//! Warehouse helpers.
//!
//! The SQL driver is not part of this crate. Callers plug one in through the
//! [`Connector`] / [`Connection`] traits; this crate supplies the rest:
//!
//! - [`ConnectionParams`] -- parse `host=… dbname=… user=… password=… port=…`
//!   strings, typically from an environment variable
//! - [`read_sql`] -- load a `.sql` file into a single statement string
//! - [`execute_sql`] -- run a statement, commit, and shape the result

pub mod error;
pub mod execute;
pub mod params;
pub mod sql_file;

pub use error::{WarehouseError, WarehouseResult};
pub use execute::{execute_sql, Connection, Connector, QueryDict, QueryOutput, ReturnMode, RowSet};
pub use params::ConnectionParams;
pub use sql_file::read_sql;
