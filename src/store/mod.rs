//! SQLite persistence for the area hierarchy and the forecast tables.

pub mod hierarchy;
pub mod views;

use std::{fs, path::Path};

use rusqlite::{params, params_from_iter, Connection};
use tracing::debug;

use crate::{
    error::Result,
    feed::AreaPath,
    tables::{Table, TableSpec, ALL_TABLES},
};

pub use hierarchy::Region;
pub use views::{Scope, View, ViewTable};

const AREAS_TABLE: &str = "CREATE TABLE IF NOT EXISTS areas (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    centers_name TEXT,
    centers_id TEXT,
    offices_name TEXT,
    offices_id TEXT,
    class10s_name TEXT,
    class10s_id TEXT,
    class15s_name TEXT,
    class15s_id TEXT,
    class20s_name TEXT,
    class20s_id TEXT
)";

fn create_table_sql(spec: &TableSpec) -> String {
    let columns: Vec<String> = spec
        .columns
        .iter()
        .map(|column| format!("{} TEXT", column.name()))
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT, {})",
        spec.name,
        columns.join(", ")
    )
}

fn insert_sql(table: &Table) -> String {
    let names: Vec<&str> = table.columns.iter().map(|column| column.name()).collect();
    let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{}", i)).collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.name,
        names.join(", "),
        placeholders.join(", ")
    )
}

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) the database file and makes sure every table exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(AREAS_TABLE, [])?;
        for spec in ALL_TABLES {
            self.conn.execute(&create_table_sql(spec), [])?;
        }
        Ok(())
    }

    /// Drops and recreates the `areas` table.
    pub fn reset_areas(&self) -> Result<()> {
        self.conn.execute("DROP TABLE IF EXISTS areas", [])?;
        self.conn.execute(AREAS_TABLE, [])?;
        Ok(())
    }

    pub fn insert_areas(&mut self, paths: &[AreaPath]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                    INSERT INTO areas (
                        centers_name, centers_id, offices_name, offices_id,
                        class10s_name, class10s_id, class15s_name, class15s_id,
                        class20s_name, class20s_id
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )?;

            for path in paths {
                stmt.execute(params![
                    path.center.name,
                    path.center.id,
                    path.office.name,
                    path.office.id,
                    path.class10.name,
                    path.class10.id,
                    path.class15.name,
                    path.class15.id,
                    path.class20.name,
                    path.class20.id,
                ])?;
            }
        }
        tx.commit()?;

        debug!(rows = paths.len(), "Inserted areas");
        Ok(paths.len())
    }

    /// Drops and recreates every forecast table.
    pub fn reset_forecasts(&self) -> Result<()> {
        for spec in ALL_TABLES {
            self.conn
                .execute(&format!("DROP TABLE IF EXISTS {}", spec.name), [])?;
            self.conn.execute(&create_table_sql(spec), [])?;
        }
        Ok(())
    }

    /// Inserts a materialized table in one transaction; empty tables are skipped.
    pub fn insert_table(&mut self, table: &Table) -> Result<usize> {
        if table.is_empty() || table.columns.is_empty() {
            return Ok(0);
        }

        let sql = insert_sql(table);
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for row in &table.rows {
                stmt.execute(params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;

        debug!(table = table.name, rows = table.rows.len(), "Inserted rows");
        Ok(table.rows.len())
    }

    /// Row count of `areas` followed by every forecast table.
    pub fn counts(&self) -> Result<Vec<(&'static str, usize)>> {
        let names = std::iter::once("areas").chain(ALL_TABLES.into_iter().map(|spec| spec.name));

        names
            .map(|name| -> Result<(&'static str, usize)> {
                let count: i64 = self.conn.query_row(
                    &format!("SELECT COUNT(*) FROM {}", name),
                    [],
                    |row| row.get(0),
                )?;
                Ok((name, count as usize))
            })
            .collect()
    }

    /// Distinct office codes in hierarchy order.
    pub fn office_codes(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT offices_id, MIN(id) AS first FROM areas GROUP BY offices_id ORDER BY first",
        )?;
        let codes = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(codes)
    }
}

// -- Tests -------------------------------------------------------------------
