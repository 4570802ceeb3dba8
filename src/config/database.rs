//! Database configuration module for the deposit compliance engine.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{Deposit, Filing, LookbackPeriod, SafeHarbor, ScheduleB, ScheduleHistory};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// Loads `.env` first so deployments can keep the URL out of the process
/// environment, then falls back to a default local `SQLite` file.
pub fn get_database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/deposit_compliance.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct
/// definitions. It creates tables for lookback periods, schedule history, safe harbor
/// tracking, Schedule B entries, filings, and deposits.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let lookback_table = schema.create_table_from_entity(LookbackPeriod);
    let history_table = schema.create_table_from_entity(ScheduleHistory);
    let safe_harbor_table = schema.create_table_from_entity(SafeHarbor);
    let schedule_b_table = schema.create_table_from_entity(ScheduleB);
    let filing_table = schema.create_table_from_entity(Filing);
    let deposit_table = schema.create_table_from_entity(Deposit);

    db.execute(builder.build(&lookback_table)).await?;
    db.execute(builder.build(&history_table)).await?;
    db.execute(builder.build(&safe_harbor_table)).await?;
    db.execute(builder.build(&schedule_b_table)).await?;
    db.execute(builder.build(&filing_table)).await?;
    db.execute(builder.build(&deposit_table)).await?;

    Ok(())
}
