// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Wraps the cargo invocations used locally and in CI, plus a migration
//! check for the simulator's `SQLite` schema.
//!
//! - `cargo xtask ci` runs lints, build, tests and `verify-migrations`
//! - `cargo xtask verify-migrations` applies the embedded migrations to an
//!   in-memory database, checks the expected tables and constraints, then
//!   reverts everything and checks the database is empty again

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
use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

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
    /// Run CI checks (lint, build, test, migrations)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Apply and revert the `SQLite` migrations and check the resulting schema
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Coverage => coverage(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test, migrations)
fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Generate code coverage report
fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Lint formatting, typos, clippy, and docs
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors for every default package
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo(vec!["fmt", "--all"])
}

/// Check for typos in the project using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

/// Run lib tests, then doc tests
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // slowest, so last
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Applies the embedded migrations to an in-memory database and checks the
/// schema the persistence layer relies on.
///
/// ## Checks
///
/// - `employees`, `simulations` and `movements` exist with their columns
/// - `movements.simulation_id` cascades on simulation delete
/// - `movements` references `employees` for origin and destination ids
/// - `(simulation_id, sequence)` is unique in `movements`
/// - reverting every migration leaves no application tables behind
fn verify_migrations() -> Result<()> {
    tracing::info!("Applying SQLite migrations to an in-memory database");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply SQLite migrations: {e}"))?;

    let schema = introspect_schema(&mut conn)?;
    check_schema(&schema, &expected_schema())?;
    tracing::info!("Schema matches the expected layout");

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert SQLite migrations: {e}"))?;

    let leftover = introspect_schema(&mut conn)?;
    if !leftover.tables.is_empty() {
        let names: Vec<&str> = leftover.tables.keys().map(String::as_str).collect();
        return Err(eyre!(
            "Reverting migrations left tables behind: {}",
            names.join(", ")
        ));
    }

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

/// Introspected schema, keyed by table name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Table {
    columns: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
    on_delete: String,
}

impl ForeignKey {
    fn new(from_column: &str, to_table: &str, to_column: &str, on_delete: &str) -> Self {
        Self {
            from_column: from_column.to_string(),
            to_table: to_table.to_string(),
            to_column: to_column.to_string(),
            on_delete: on_delete.to_string(),
        }
    }
}

fn table(columns: &[&str], foreign_keys: Vec<ForeignKey>, unique: &[&[&str]]) -> Table {
    Table {
        columns: columns.iter().map(ToString::to_string).collect(),
        foreign_keys: foreign_keys.into_iter().collect(),
        unique_constraints: unique
            .iter()
            .map(|cols| cols.iter().map(ToString::to_string).collect())
            .collect(),
    }
}

/// The schema the persistence crate's queries are written against.
fn expected_schema() -> Schema {
    let mut tables = BTreeMap::new();

    tables.insert(
        String::from("employees"),
        table(
            &[
                "employee_id",
                "badge",
                "name",
                "title",
                "salary",
                "is_active",
                "created_at",
                "updated_at",
            ],
            vec![],
            &[&["badge"]],
        ),
    );

    tables.insert(
        String::from("simulations"),
        table(
            &[
                "simulation_id",
                "name",
                "description",
                "status",
                "created_at",
                "updated_at",
            ],
            vec![],
            &[],
        ),
    );

    tables.insert(
        String::from("movements"),
        table(
            &[
                "movement_id",
                "simulation_id",
                "sequence",
                "event_kind",
                "origin_employee_id",
                "origin_snapshot_json",
                "destination_employee_id",
                "destination_snapshot_json",
                "new_title",
                "new_salary",
                "movement_kind",
                "new_hire_title",
                "new_hire_salary",
                "exit_reason",
                "note",
                "created_at",
            ],
            vec![
                ForeignKey::new("simulation_id", "simulations", "simulation_id", "CASCADE"),
                ForeignKey::new("origin_employee_id", "employees", "employee_id", "NO ACTION"),
                ForeignKey::new(
                    "destination_employee_id",
                    "employees",
                    "employee_id",
                    "NO ACTION",
                ),
            ],
            &[&["simulation_id", "sequence"]],
        ),
    );

    Schema { tables }
}

/// Compares the introspected schema against the expected one and reports
/// every difference at once.
fn check_schema(actual: &Schema, expected: &Schema) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    for (name, expected_table) in &expected.tables {
        let Some(actual_table) = actual.tables.get(name) else {
            errors.push(format!("  - Table '{name}' is missing"));
            continue;
        };

        for column in expected_table.columns.difference(&actual_table.columns) {
            errors.push(format!("  - Column '{name}.{column}' is missing"));
        }
        for column in actual_table.columns.difference(&expected_table.columns) {
            errors.push(format!("  - Column '{name}.{column}' is unexpected"));
        }

        for fk in expected_table
            .foreign_keys
            .difference(&actual_table.foreign_keys)
        {
            errors.push(format!(
                "  - Foreign key '{name}.{}' -> '{}.{}' (ON DELETE {}) is missing",
                fk.from_column, fk.to_table, fk.to_column, fk.on_delete
            ));
        }

        for unique in expected_table
            .unique_constraints
            .difference(&actual_table.unique_constraints)
        {
            errors.push(format!(
                "  - Unique constraint on '{name}' ({}) is missing",
                unique.join(", ")
            ));
        }
    }

    for name in actual.tables.keys() {
        if !expected.tables.contains_key(name) {
            errors.push(format!("  - Table '{name}' is unexpected"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(eyre!(
            "❌ Migration verification FAILED\n{}",
            errors.join("\n")
        ))
    }
}

/// Introspect the `SQLite` schema through its pragmas
fn introspect_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
        #[diesel(sql_type = Text)]
        on_delete: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Integer)]
        unique: i32,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema::default();

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' \
         AND name != '__diesel_schema_migrations' ORDER BY name",
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table::default();

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;
        table_info.columns = columns.into_iter().map(|c| c.name).collect();

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;
        table_info.foreign_keys = fks
            .into_iter()
            .map(|fk| ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
                on_delete: fk.on_delete,
            })
            .collect();

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        for idx in indexes.into_iter().filter(|idx| idx.unique == 1) {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;
            table_info
                .unique_constraints
                .insert(index_columns.into_iter().map(|c| c.name).collect());
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
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
