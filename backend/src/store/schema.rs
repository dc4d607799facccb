use rusqlite::Connection;

/// Creates the tables if they are missing. Existing tables are left as they are.
pub(super) fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS uploads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            file_name TEXT NOT NULL,
            uploaded_at TEXT NOT NULL,
            total_rows INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(trim(name)) > 0),
            age INTEGER NOT NULL CHECK (age > 0),
            city TEXT NOT NULL CHECK (length(trim(city)) > 0),
            upload_id INTEGER NOT NULL REFERENCES uploads(id)
        );

        CREATE INDEX IF NOT EXISTS records_upload_id ON records(upload_id);
        "#,
    )
}
