use std::fs;
use std::path::Path;

use crate::error::{WarehouseError, WarehouseResult};

/// Load a SQL file as one statement string.
///
/// Lines are joined with a single space and keep their own line endings, so
/// `--` comments still end where they did in the file.
pub fn read_sql(path: impl AsRef<Path>) -> WarehouseResult<String> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(WarehouseError::InvalidArgument(
            "sql file name must not be empty".into(),
        ));
    }
    let contents = fs::read_to_string(path)?;
    Ok(contents.split_inclusive('\n').collect::<Vec<_>>().join(" "))
}
