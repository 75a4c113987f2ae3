// src/database.rs
use crate::models::{PointsRecord, UserTotal};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Opens the ledger at `database_url`, creating the file and its directory
/// if needed, and applies migrations.
pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if let Some(db_path) = get_db_path(database_url)? {
        // Create parent directory BEFORE attempting to connect
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
        }
        println!("📦 Database file path: {}", db_path.display());
    }

    let pool = connect(database_url, 5).await?;
    println!("✅ Database connected and migrated");
    Ok(pool)
}

/// Connects a pool and runs the migrations in `./migrations`.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// File behind a `sqlite:` URL, or `None` for in-memory databases.
fn get_db_path(database_url: &str) -> Result<Option<PathBuf>, sqlx::Error> {
    let rest = database_url.strip_prefix("sqlite:").ok_or_else(|| {
        sqlx::Error::Configuration("DATABASE_URL must start with 'sqlite:'".into())
    })?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path == ":memory:" {
        return Ok(None);
    }
    Ok(Some(PathBuf::from(path)))
}

/// Records `points` for a (user, problem) pair, keeping the best score.
///
/// Inserts the pair if it is new; otherwise overwrites only when `points` is
/// strictly greater than what is stored. The comparison happens inside the one
/// statement, so concurrent submissions cannot lower a score.
/// Returns whether the stored value changed.
pub async fn record_score(
    pool: &SqlitePool,
    id_user: &str,
    id_problem: &str,
    points: i64,
) -> Result<bool, sqlx::Error> {
    let now = chrono::Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO points (user_id, problem_id, points, updated_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(user_id, problem_id) DO UPDATE SET
            points = excluded.points,
            updated_at = excluded.updated_at
        WHERE excluded.points > points.points
        "#
    )
    .bind(id_user)
    .bind(id_problem)
    .bind(points)
    .bind(&now)
    .execute(pool)
    .await?;

    let changed = result.rows_affected() > 0;
    if changed {
        log::debug!("Stored {} point(s) for user {} on {}", points, id_user, id_problem);
    }
    Ok(changed)
}

/// Per-user point totals, ordered by user ID.
pub async fn get_user_totals(pool: &SqlitePool) -> Result<Vec<UserTotal>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT user_id, SUM(points)
        FROM points
        GROUP BY user_id
        ORDER BY user_id ASC
        "#
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|row| UserTotal {
        id_user: row.get(0),
        points: row.get(1),
    }).collect())
}

pub async fn get_points(
    pool: &SqlitePool,
    id_user: &str,
    id_problem: &str,
) -> Result<Option<PointsRecord>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT user_id, problem_id, points, updated_at
        FROM points
        WHERE user_id = ? AND problem_id = ?
        "#
    )
    .bind(id_user)
    .bind(id_problem)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| PointsRecord {
        id_user: row.get(0),
        id_problem: row.get(1),
        points: row.get(2),
        updated_at: row.get(3),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path_forms() {
        assert_eq!(get_db_path("sqlite:data/points.db").unwrap(), Some(PathBuf::from("data/points.db")));
        assert_eq!(get_db_path("sqlite:///tmp/p.db?mode=rwc").unwrap(), Some(PathBuf::from("/tmp/p.db")));
        assert_eq!(get_db_path("sqlite::memory:").unwrap(), None);
        assert!(get_db_path("postgres://x").is_err());
    }
}
