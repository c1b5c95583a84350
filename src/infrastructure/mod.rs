pub mod schema;
pub mod sqlite_repo;
