// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! `cargo xtask <command>` wraps the checks CI runs so they can be run the
//! same way locally, and starts a development server.
//!
//! ### Schema Verification
//!
//! `cargo xtask verify-schema` applies the persistence migrations to an
//! in-memory `SQLite` database and compares the resulting schema with the
//! layout the persistence crate's Diesel table definition expects. No
//! external services are needed.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{io, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use diesel::sql_types::{Integer, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, test, schema)
    CI,

    /// Run cargo check on every target
    #[command(visible_alias = "c")]
    Check,

    /// Lint clippy, formatting, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Apply clippy suggestions and rustfmt
    #[command(visible_alias = "f")]
    Fix,

    /// Run tests, optionally for one workspace crate
    #[command(visible_alias = "t")]
    Test {
        /// Workspace crate to test, e.g. `fairway-api`
        #[arg(short, long)]
        package: Option<String>,
    },

    /// Run the server against a development database under `target/`
    #[command(visible_alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,

        /// Seconds between status refreshes (0 disables the task)
        #[arg(long, default_value_t = 60)]
        refresh_interval_secs: u64,
    },

    /// Verify the migrated `SQLite` schema matches the Diesel table layout
    #[command(visible_alias = "vs")]
    VerifySchema,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Check => run_cargo(&["check", "--workspace", "--all-targets"]),
            Self::Lint => lint(),
            Self::Fix => fix(),
            Self::Test { package } => test(package.as_deref()),
            Self::Serve {
                port,
                refresh_interval_secs,
            } => serve(port, refresh_interval_secs),
            Self::VerifySchema => verify_schema(),
        }
    }
}

/// The server binary's package name.
const SERVER_PACKAGE: &str = "fairway-server";

/// Where `serve` keeps its database between runs.
const DEV_DATABASE: &str = "target/fairway-dev.sqlite";

/// Run CI checks (lint, test, schema)
fn ci() -> Result<()> {
    lint()?;
    test(None)?;
    verify_schema()
}

fn lint() -> Result<()> {
    run_cargo(&[
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ])?;
    run_cargo(&["fmt", "--all", "--check"])?;
    cmd!("cargo", "doc", "--workspace", "--no-deps")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run_with_trace()?;
    Ok(())
}

fn fix() -> Result<()> {
    run_cargo(&[
        "clippy",
        "--workspace",
        "--all-targets",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
    ])?;
    run_cargo(&["fmt", "--all"])
}

/// Runs the test suite, including doc tests. A named package must be one
/// of this workspace's crates.
fn test(package: Option<&str>) -> Result<()> {
    let Some(package) = package else {
        return run_cargo(&["test", "--workspace"]);
    };

    let members: Vec<String> = workspace_packages()?;
    if !members.iter().any(|member| member == package) {
        return Err(color_eyre::eyre::eyre!(
            "'{package}' is not a workspace crate (expected one of: {})",
            members.join(", ")
        ));
    }
    run_cargo(&["test", "--package", package])
}

/// Names of the workspace's member packages.
fn workspace_packages() -> Result<Vec<String>> {
    let meta = MetadataCommand::new()
        .no_deps()
        .exec()
        .wrap_err("failed to get cargo metadata")?;
    Ok(meta
        .workspace_packages()
        .into_iter()
        .map(|package| package.name.to_string())
        .collect())
}

/// Starts the server with a file-backed database so data survives restarts.
fn serve(port: u16, refresh_interval_secs: u64) -> Result<()> {
    tracing::info!(database = DEV_DATABASE, port, "Starting development server");
    cmd!("cargo", "run", "--package", SERVER_PACKAGE)
        .env("FAIRWAY_DATABASE", DEV_DATABASE)
        .env("FAIRWAY_PORT", port.to_string())
        .env(
            "FAIRWAY_REFRESH_INTERVAL_SECS",
            refresh_interval_secs.to_string(),
        )
        .run_with_trace()?;
    Ok(())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    cmd("cargo", args.iter().copied()).run_with_trace()?;
    Ok(())
}

/// Verify that the migrations produce the schema the persistence crate reads.
///
/// The persistence crate maps the `events` table through a hand-written
/// `diesel::table!` definition. A migration that renames, drops or retypes
/// one of those columns still compiles but fails at runtime, so this
/// command checks the migrated database directly. It also checks that the
/// table's CHECK constraints admit every event type and status the domain
/// writes, and nothing else.
///
/// ## Usage
///
/// ```bash
/// cargo xtask verify-schema
/// ```
fn verify_schema() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{embed_migrations, MigrationHarness};

    tracing::info!("Starting schema verification");

    #[allow(clippy::items_after_statements)]
    const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
        embed_migrations!("../crates/persistence/migrations");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply migrations: {}", e))?;
    tracing::info!("Migrations applied successfully");

    let actual = introspect_sqlite_schema(&mut conn)?;
    let mut errors: Vec<String> = schema_differences(&expected_schema(), &actual);
    errors.extend(verify_event_constraints(&mut conn));
    report(&errors)?;

    tracing::info!("✓ Schema verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    indexes: BTreeSet<Index>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    name: String,
    normalized_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Index {
    name: String,
    columns: Vec<String>,
}

/// The layout of `crates/persistence/src/diesel_schema.rs` plus the
/// listing index.
fn expected_schema() -> Schema {
    let text_column = |name: &str| Column {
        name: name.to_string(),
        normalized_type: String::from("TEXT"),
        nullable: false,
    };

    let columns: BTreeMap<String, Column> = [
        "event_id",
        "event_type",
        "name",
        "status",
        "body_json",
        "updated_at",
    ]
    .into_iter()
    .map(|name| (name.to_string(), text_column(name)))
    .collect();

    let events = Table {
        columns,
        primary_keys: BTreeSet::from([String::from("event_id")]),
        indexes: BTreeSet::from([Index {
            name: String::from("idx_events_type_status"),
            columns: vec![String::from("event_type"), String::from("status")],
        }]),
    };

    Schema {
        tables: BTreeMap::from([(String::from("events"), events)]),
    }
}

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct ColumnRow {
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    r#type: String,
    #[diesel(sql_type = Integer)]
    notnull: i32,
    #[diesel(sql_type = Integer)]
    pk: i32,
}

#[derive(QueryableByName)]
struct IndexRow {
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    origin: String,
}

/// Reads every application table the migrations created.
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    let tables: Vec<NameRow> = diesel::sql_query(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' \
         AND name NOT LIKE 'sqlite_%' \
         AND name != '__diesel_schema_migrations' \
         ORDER BY name",
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };
    for table in tables {
        let introspected: Table = introspect_table(conn, &table.name)?;
        schema.tables.insert(table.name, introspected);
    }
    Ok(schema)
}

fn introspect_table(conn: &mut SqliteConnection, table: &str) -> Result<Table> {
    let rows: Vec<ColumnRow> = diesel::sql_query(format!("PRAGMA table_info({table})"))
        .load(conn)
        .wrap_err_with(|| format!("Failed to get columns for table {table}"))?;

    let primary_keys: BTreeSet<String> = rows
        .iter()
        .filter(|row| row.pk > 0)
        .map(|row| row.name.clone())
        .collect();
    let columns: BTreeMap<String, Column> = rows
        .into_iter()
        .map(|row| {
            let column = Column {
                name: row.name.clone(),
                normalized_type: row.r#type.to_uppercase(),
                nullable: row.notnull == 0,
            };
            (row.name, column)
        })
        .collect();

    Ok(Table {
        columns,
        primary_keys,
        indexes: introspect_indexes(conn, table)?,
    })
}

/// Explicitly created indexes. Primary key and unique autoindexes are
/// covered by the column checks.
fn introspect_indexes(conn: &mut SqliteConnection, table: &str) -> Result<BTreeSet<Index>> {
    let listed: Vec<IndexRow> = diesel::sql_query(format!("PRAGMA index_list({table})"))
        .load(conn)
        .wrap_err_with(|| format!("Failed to get indexes for table {table}"))?;

    let mut indexes: BTreeSet<Index> = BTreeSet::new();
    for index in listed.into_iter().filter(|index| index.origin == "c") {
        let columns: Vec<NameRow> =
            diesel::sql_query(format!("PRAGMA index_info({})", index.name))
                .load(conn)
                .wrap_err_with(|| format!("Failed to get index columns for {}", index.name))?;
        indexes.insert(Index {
            name: index.name,
            columns: columns.into_iter().map(|column| column.name).collect(),
        });
    }
    Ok(indexes)
}

/// Checks that the `events` CHECK constraints accept exactly the event
/// types and statuses the domain serializes.
///
/// Every probe row is inserted inside a transaction that is rolled back.
fn verify_event_constraints(conn: &mut SqliteConnection) -> Vec<String> {
    const EVENT_TYPES: [&str; 3] = ["tournament", "tour", "round"];
    const STATUSES: [&str; 3] = ["upcoming", "active", "completed"];

    let mut errors: Vec<String> = Vec::new();
    for event_type in EVENT_TYPES {
        if !insert_accepted(conn, event_type, STATUSES[0]) {
            errors.push(format!("events rejects event_type '{event_type}'"));
        }
    }
    for status in STATUSES {
        if !insert_accepted(conn, EVENT_TYPES[0], status) {
            errors.push(format!("events rejects status '{status}'"));
        }
    }
    if insert_accepted(conn, "league", STATUSES[0]) {
        errors.push(String::from("events accepts unknown event_type 'league'"));
    }
    if insert_accepted(conn, EVENT_TYPES[0], "cancelled") {
        errors.push(String::from("events accepts unknown status 'cancelled'"));
    }
    errors
}

fn insert_accepted(conn: &mut SqliteConnection, event_type: &str, status: &str) -> bool {
    use diesel::Connection;

    let mut accepted: bool = false;
    let _ = conn.transaction::<(), diesel::result::Error, _>(|conn| {
        accepted = diesel::sql_query(
            "INSERT INTO events (event_id, event_type, name, status, body_json, updated_at) \
             VALUES ('constraint-check', ?, 'Check', ?, '{}', '2026-01-01T00:00:00Z')",
        )
        .bind::<Text, _>(event_type)
        .bind::<Text, _>(status)
        .execute(conn)
        .is_ok();
        Err(diesel::result::Error::RollbackTransaction)
    });
    accepted
}

/// Every difference between the expected and migrated schemas.
fn schema_differences(expected: &Schema, actual: &Schema) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();

    let expected_tables: BTreeSet<&String> = expected.tables.keys().collect();
    let actual_tables: BTreeSet<&String> = actual.tables.keys().collect();

    for missing in expected_tables.difference(&actual_tables) {
        errors.push(format!("Table '{missing}' is missing from the migrated schema"));
    }
    for extra in actual_tables.difference(&expected_tables) {
        errors.push(format!(
            "Table '{extra}' exists in the migrated schema but has no Diesel definition"
        ));
    }

    for (table_name, expected_table) in &expected.tables {
        let Some(actual_table) = actual.tables.get(table_name) else {
            continue;
        };

        for (column_name, expected_column) in &expected_table.columns {
            match actual_table.columns.get(column_name) {
                None => errors.push(format!(
                    "Table '{table_name}': column '{column_name}' is missing"
                )),
                Some(actual_column) if actual_column != expected_column => {
                    errors.push(format!(
                        "Table '{table_name}': column '{column_name}' differs: expected {expected_column:?}, found {actual_column:?}"
                    ));
                }
                Some(_) => {}
            }
        }
        for column_name in actual_table.columns.keys() {
            if !expected_table.columns.contains_key(column_name) {
                errors.push(format!(
                    "Table '{table_name}': column '{column_name}' has no Diesel definition"
                ));
            }
        }

        if expected_table.primary_keys != actual_table.primary_keys {
            errors.push(format!(
                "Table '{table_name}': primary key mismatch: expected {:?}, found {:?}",
                expected_table.primary_keys, actual_table.primary_keys
            ));
        }

        for index in expected_table.indexes.difference(&actual_table.indexes) {
            errors.push(format!(
                "Table '{table_name}': index '{}' on {:?} is missing",
                index.name, index.columns
            ));
        }
    }

    errors
}

fn report(errors: &[String]) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    for error in errors {
        tracing::error!("{error}");
    }
    Err(color_eyre::eyre::eyre!(
        "Schema verification failed with {} error(s)",
        errors.len()
    ))
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_schema_has_no_differences_with_itself() {
        assert!(schema_differences(&expected_schema(), &expected_schema()).is_empty());
    }

    #[test]
    fn test_dropped_column_and_index_are_reported() {
        let mut actual: Schema = expected_schema();
        let events: &mut Table = actual.tables.get_mut("events").expect("events table");
        events.columns.remove("status");
        events.indexes.clear();

        let errors: Vec<String> = schema_differences(&expected_schema(), &actual);

        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("'status' is missing"));
        assert!(errors[1].contains("idx_events_type_status"));
    }

    #[test]
    fn test_report_fails_only_on_errors() {
        assert!(report(&[]).is_ok());
        assert!(report(&[String::from("events rejects status 'active'")]).is_err());
    }
}
