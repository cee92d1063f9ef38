//! PostgreSQL script loader.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::{Result, SalesCentralError};
use crate::schema::{ColumnTypes, split_using};
use crate::table::{Table, Value};

use super::{Loader, check_primary_key, flatten};

/// Rows per `INSERT` statement.
const INSERT_BATCH: usize = 500;

/// Quote an identifier for PostgreSQL.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Render a cell as a SQL literal. Everything is text until retyped.
pub fn quote_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        other => format!("'{}'", other.to_string().replace('\'', "''")),
    }
}

#[derive(Debug, Default)]
struct Destination {
    columns: Vec<String>,
    statements: Vec<String>,
}

/// Writes the warehouse load as a SQL script.
///
/// Each upload replaces the statements for its destination; the script
/// file is rewritten after every call.
pub struct SqlScriptLoader {
    path: PathBuf,
    destinations: IndexMap<String, Destination>,
}

impl SqlScriptLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            destinations: IndexMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full script as it stands.
    pub fn script(&self) -> String {
        let mut script = String::new();
        for (name, destination) in &self.destinations {
            script.push_str(&format!("-- {}\n", name));
            for statement in &destination.statements {
                script.push_str(statement);
                script.push('\n');
            }
            script.push('\n');
        }
        script
    }

    fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SalesCentralError::io(parent, e))?;
        }
        fs::write(&self.path, self.script()).map_err(|e| SalesCentralError::io(&self.path, e))
    }
}

fn create_statements(table: &Table, destination: &str, primary_key: Option<&str>) -> Vec<String> {
    let name = quote_identifier(destination);
    let columns: Vec<String> = table.columns.iter().map(|c| quote_identifier(c)).collect();

    let mut statements = vec![
        format!("DROP TABLE IF EXISTS {};", name),
        format!(
            "CREATE TABLE {} ({});",
            name,
            columns
                .iter()
                .map(|c| format!("{} TEXT", c))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    ];

    for batch in table.rows.chunks(INSERT_BATCH) {
        let values: Vec<String> = batch
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.cells.iter().map(quote_literal).collect();
                format!("  ({})", cells.join(", "))
            })
            .collect();
        statements.push(format!(
            "INSERT INTO {} ({}) VALUES\n{};",
            name,
            columns.join(", "),
            values.join(",\n")
        ));
    }

    if let Some(pk) = primary_key {
        statements.push(format!(
            "ALTER TABLE {} ADD PRIMARY KEY ({});",
            name,
            quote_identifier(pk)
        ));
    }

    statements
}

/// `ALTER COLUMN … TYPE` for one column. Text needs an explicit cast, so a
/// type without its own `USING` clause gets one.
fn alter_statement(destination: &str, column: &str, sql_type: &str) -> String {
    let (base, using) = split_using(sql_type);
    let column_name = quote_identifier(column);
    let cast = match using {
        Some(expr) => expr.to_string(),
        None => format!("{}::{}", column_name, base),
    };
    format!(
        "ALTER TABLE {} ALTER COLUMN {} TYPE {} USING {};",
        quote_identifier(destination),
        column_name,
        base,
        cast
    )
}

impl Loader for SqlScriptLoader {
    fn upload(
        &mut self,
        table: &Table,
        destination: &str,
        primary_key: Option<&str>,
    ) -> Result<()> {
        let table = flatten(table);
        check_primary_key(&table, destination, primary_key)?;

        let statements = create_statements(&table, destination, primary_key);
        debug!(destination, statements = statements.len(), "Rendered upload");

        self.destinations.insert(
            destination.to_string(),
            Destination {
                columns: table.columns.clone(),
                statements,
            },
        );
        self.write()?;

        info!(
            destination,
            rows = table.row_count(),
            path = %self.path.display(),
            "Data uploaded"
        );
        Ok(())
    }

    fn retype(&mut self, destination: &str, column_types: &ColumnTypes) -> Result<()> {
        let entry = self
            .destinations
            .get_mut(destination)
            .ok_or_else(|| SalesCentralError::Load {
                destination: destination.to_string(),
                message: "table has not been uploaded".to_string(),
            })?;

        for (column, sql_type) in column_types.iter() {
            if !entry.columns.iter().any(|c| c == column) {
                return Err(SalesCentralError::Load {
                    destination: destination.to_string(),
                    message: format!("cannot retype missing column '{}'", column),
                });
            }
            entry
                .statements
                .push(alter_statement(destination, column, sql_type));
        }
        self.write()?;

        info!(destination, columns = column_types.len(), "Data types altered");
        Ok(())
    }
}
