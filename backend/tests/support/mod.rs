//! Shared helpers for the database-backed integration tests.

/// Render a `postgres` error with its SQLSTATE and server message.
///
/// `postgres::Error`'s `Display` often collapses to a bare `db error`, which
/// hides the cause in CI logs.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// True when the opt-in embedded PostgreSQL suites should run.
pub fn embedded_postgres_enabled() -> bool {
    if std::env::var("RUN_PG_EMBEDDED").as_deref() == Ok("1") {
        return true;
    }
    eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
    false
}
