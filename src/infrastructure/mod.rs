pub mod database;

pub use database::{create_schema, init_db};
