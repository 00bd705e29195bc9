use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{WarehouseError, WarehouseResult};
use crate::params::ConnectionParams;

/// Rows and column names returned by a statement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// An open warehouse session provided by a driver.
pub trait Connection {
    /// Run one statement. Returns `Ok(None)` for statements without a result
    /// set (DDL, COPY, UNLOAD, ...).
    fn execute(&mut self, sql: &str) -> WarehouseResult<Option<RowSet>>;

    /// Commit the current transaction.
    fn commit(&mut self) -> WarehouseResult<()>;
}

/// Opens [`Connection`]s from parsed parameters.
pub trait Connector {
    type Conn: Connection;

    fn connect(&self, params: &ConnectionParams) -> WarehouseResult<Self::Conn>;
}

/// What [`execute_sql`] should hand back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReturnMode {
    /// Run for side effects only.
    #[default]
    Nothing,
    /// Rows and column names.
    Rows,
    /// A `{data, columns}` record ready for dataframe construction.
    Dict,
}

/// Column-oriented view handed to dataframe libraries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDict {
    pub data: Vec<Vec<Value>>,
    pub columns: Vec<String>,
}

/// Result of [`execute_sql`].
#[derive(Clone, Debug, PartialEq)]
pub enum QueryOutput {
    None,
    Rows {
        rows: Vec<Vec<Value>>,
        columns: Vec<String>,
    },
    Dict(QueryDict),
}

/// Execute `sql`, commit, and shape the result according to `mode`.
///
/// Statement errors surface as [`WarehouseError::Programming`]; every other
/// driver failure as [`WarehouseError::Sql`].
pub fn execute_sql<C: Connector>(
    connector: &C,
    params: &ConnectionParams,
    sql: &str,
    mode: ReturnMode,
) -> WarehouseResult<QueryOutput> {
    if sql.trim().is_empty() {
        return Err(WarehouseError::InvalidArgument("sql must not be empty".into()));
    }

    let mut conn = connector.connect(params).map_err(as_sql_error)?;
    debug!(host = params.host().unwrap_or("?"), ?mode, "executing statement");
    let result = conn.execute(sql).map_err(as_sql_error)?;

    let output = match mode {
        ReturnMode::Nothing => QueryOutput::None,
        ReturnMode::Rows | ReturnMode::Dict => {
            let RowSet { columns, rows } = result.ok_or_else(|| {
                WarehouseError::Sql("statement did not return any rows".into())
            })?;
            if mode == ReturnMode::Dict {
                QueryOutput::Dict(QueryDict { data: rows, columns })
            } else {
                QueryOutput::Rows { rows, columns }
            }
        }
    };
    conn.commit().map_err(as_sql_error)?;
    Ok(output)
}

fn as_sql_error(err: WarehouseError) -> WarehouseError {
    match err {
        WarehouseError::Programming(_) | WarehouseError::Sql(_) => err,
        other => WarehouseError::Sql(other.to_string()),
    }
}
