use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

/// Bootstrap script, executed at every start
pub const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/schema.sql"));

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    run_schema(&db).await?;

    Ok(db)
}

async fn run_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    for sql in schema_statements(SCHEMA_SQL) {
        db.execute(Statement::from_string(db.get_database_backend(), sql))
            .await?;
    }
    tracing::debug!("Schema bootstrap complete");
    Ok(())
}

/// Split a script into statements, dropping `--` comment lines.
/// Statements are separated by `;`, which therefore must not appear in comments.
fn schema_statements(script: &str) -> Vec<String> {
    let without_comments: String = script
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
