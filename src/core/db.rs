//! Database connection and schema migrations
use anyhow::Result;
use rusqlite::Connection;

// Each entry is applied once, in order. The index of the last applied
// migration + 1 is stored in `PRAGMA user_version`.
const MIGRATIONS: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        google_id TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL,
        name TEXT,
        profile_picture TEXT,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    ",
    r"
    CREATE TABLE IF NOT EXISTS forum_posts (
        post_id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        content TEXT NOT NULL,
        timestamp TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        additional_metadata TEXT
    );
    CREATE INDEX IF NOT EXISTS ix_forum_posts_user_id ON forum_posts(user_id);
    CREATE INDEX IF NOT EXISTS ix_forum_posts_timestamp ON forum_posts(timestamp);
    ",
    r"
    CREATE TABLE IF NOT EXISTS meetings (
        meeting_id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        time TEXT NOT NULL,
        location TEXT NOT NULL CHECK (location <> ''),
        participants TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS ix_meetings_user_id ON meetings(user_id);
    ",
];

/// Open an async connection to the sqlite file at `db_path`
pub async fn async_db(db_path: &str) -> Result<tokio_rusqlite::Connection> {
    let db = tokio_rusqlite::Connection::open(db_path).await?;
    Ok(db)
}

/// Apply any migrations that have not run yet. Returns the number of
/// migrations applied.
pub fn migrate_db(conn: &mut Connection) -> rusqlite::Result<usize> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    let pending = MIGRATIONS.iter().enumerate().skip(version.max(0) as usize);

    let mut applied = 0;
    for (idx, sql) in pending {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", (idx + 1) as i64)?;
        tx.commit()?;
        tracing::debug!("Applied migration {}", idx + 1);
        applied += 1;
    }

    Ok(applied)
}
