//! Versioned SQL migrations
//!
//! Applies `{version}_{name}.up.sql` files from a directory in version order.
//! The tracking table holds a single `(version, dirty)` row, the same layout
//! golang-migrate uses, so either tool can pick up where the other left off.
//!
//! A failing file rolls back with its transaction, so this runner never marks
//! the database dirty itself. The dirty check only trips on a database that
//! golang-migrate left dirty.

use std::path::Path;

use crate::error::{DbError, DbResult};
use crate::DbPool;

const UP_SUFFIX: &str = ".up.sql";

/// A single migration file
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub sql: String,
}

/// Outcome of a migration run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Versions applied by this run, in order
    pub applied: Vec<i64>,
    /// Schema version after the run, `None` for an untouched empty database
    pub current_version: Option<i64>,
}

impl MigrationReport {
    /// Whether the run found nothing to do
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Migration runner bound to a tracking table
#[derive(Debug, Clone)]
pub struct Migrator {
    table: String,
    migrations: Vec<Migration>,
}

impl Migrator {
    /// Default tracking table name
    pub const DEFAULT_TABLE: &'static str = "migrations";

    /// Load every `*.up.sql` file under `dir`.
    ///
    /// `table` is interpolated into SQL, so only plain identifiers are accepted.
    pub fn from_dir(dir: impl AsRef<Path>, table: impl Into<String>) -> DbResult<Self> {
        let table = table.into();
        if !is_plain_identifier(&table) {
            return Err(DbError::Migration(format!(
                "invalid migrations table name: {table:?}"
            )));
        }

        let mut migrations = Vec::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let Some(stem) = file_name.strip_suffix(UP_SUFFIX) else {
                continue;
            };
            let (version, name) = parse_stem(stem).ok_or_else(|| {
                DbError::Migration(format!("invalid migration file name: {file_name}"))
            })?;
            let sql = std::fs::read_to_string(entry.path())?;
            migrations.push(Migration { version, name, sql });
        }

        migrations.sort_by_key(|m| m.version);
        if let Some(pair) = migrations.windows(2).find(|w| w[0].version == w[1].version) {
            return Err(DbError::Migration(format!(
                "duplicate migration version {}",
                pair[0].version
            )));
        }

        Ok(Self { table, migrations })
    }

    /// Loaded migrations, sorted by version
    pub fn migrations(&self) -> &[Migration] {
        &self.migrations
    }

    /// Apply all pending migrations.
    ///
    /// Each migration runs in its own transaction together with the version
    /// bump, so a failing file leaves the previous version in place.
    pub async fn run(&self, pool: &DbPool) -> DbResult<MigrationReport> {
        let table = &self.table;

        sqlx::raw_sql(&format!(
            r#"CREATE TABLE IF NOT EXISTS "{table}" (version INTEGER NOT NULL, dirty BOOLEAN NOT NULL);
               CREATE UNIQUE INDEX IF NOT EXISTS "{table}_version_unique" ON "{table}" (version);"#
        ))
        .execute(pool)
        .await?;

        let current: Option<(i64, bool)> =
            sqlx::query_as(&format!(r#"SELECT version, dirty FROM "{table}" LIMIT 1"#))
                .fetch_optional(pool)
                .await?;

        if let Some((version, true)) = current {
            return Err(DbError::Migration(format!(
                "database is dirty at version {version}, fix it manually before migrating"
            )));
        }

        let mut report = MigrationReport {
            applied: Vec::new(),
            current_version: current.map(|(version, _)| version),
        };

        for migration in &self.migrations {
            if report.current_version.is_some_and(|v| migration.version <= v) {
                continue;
            }

            let mut tx = pool.begin().await?;
            sqlx::raw_sql(&migration.sql).execute(&mut *tx).await.map_err(|e| {
                tracing::error!(
                    version = migration.version,
                    name = %migration.name,
                    "migration failed: {}",
                    e
                );
                DbError::from(e)
            })?;
            sqlx::query(&format!(r#"DELETE FROM "{table}""#))
                .execute(&mut *tx)
                .await?;
            sqlx::query(&format!(
                r#"INSERT INTO "{table}" (version, dirty) VALUES (?, FALSE)"#
            ))
            .bind(migration.version)
            .execute(&mut *tx)
            .await?;
            tx.commit().await?;

            tracing::info!(version = migration.version, name = %migration.name, "applied migration");
            report.applied.push(migration.version);
            report.current_version = Some(migration.version);
        }

        Ok(report)
    }
}

fn parse_stem(stem: &str) -> Option<(i64, String)> {
    let (version, name) = stem.split_once('_').unwrap_or((stem, ""));
    let version = version.parse::<i64>().ok()?;
    Some((version, name.to_string()))
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
