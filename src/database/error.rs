pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// An error returned by the database.
#[derive(Debug, Display, Error, From)]
#[display("database error: {_0}")]
pub struct DatabaseError(sqlx::Error);

/// An error that occurred while applying migrations.
#[derive(Debug, Display, Error, From)]
#[display("failed to run database migrations: {_0}")]
pub struct MigrationError(sqlx::migrate::MigrateError);
