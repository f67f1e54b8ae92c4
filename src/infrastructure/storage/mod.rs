//! Storage infrastructure - connection pooling and migrations

mod migrations;
mod postgres;

pub use migrations::{all_migrations, Migration, PostgresMigrator};
pub use postgres::{connect, PostgresConfig};
