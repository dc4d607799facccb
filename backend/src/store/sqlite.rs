use super::schema::init_schema;
use super::{BatchStore, BatchWriter};
use crate::error::StoreError;
use chrono::Utc;
use common::model::batch::{BatchId, UploadBatch};
use common::model::record::{NewRecord, Record, RecordId};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// SQLite-backed store shared by every request.
///
/// Cloning is cheap and every clone talks to the same connection. The lock is
/// held for one transaction or one query at a time, never across requests.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the database file and makes sure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!("Opening SQLite database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// Creates a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Current database time, used as a connectivity probe.
    pub fn now(&self) -> Result<String, StoreError> {
        let conn = self.lock()?;
        let now = conn.query_row("SELECT datetime('now')", [], |row| row.get(0))?;
        Ok(now)
    }

    /// All batches, newest first.
    pub fn list_batches(&self) -> Result<Vec<UploadBatch>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, file_name, uploaded_at, total_rows FROM uploads \
             ORDER BY uploaded_at DESC, id DESC",
        )?;
        let batches = stmt
            .query_map([], batch_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(batches)
    }

    /// Records created by one batch, in insertion order.
    pub fn records_for_batch(&self, batch_id: BatchId) -> Result<Vec<Record>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, age, city, upload_id FROM records \
             WHERE upload_id = ?1 ORDER BY id ASC",
        )?;
        let records = stmt
            .query_map(params![batch_id], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    pub fn list_records(&self) -> Result<Vec<Record>, StoreError> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT id, name, age, city, upload_id FROM records ORDER BY id")?;
        let records = stmt
            .query_map([], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Replaces the fields of a record. Returns `None` if it does not exist.
    pub fn update_record(
        &self,
        id: RecordId,
        row: &NewRecord,
    ) -> Result<Option<Record>, StoreError> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                "UPDATE records SET name = ?1, age = ?2, city = ?3 WHERE id = ?4 \
                 RETURNING id, name, age, city, upload_id",
                params![row.name, row.age, row.city, id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Deletes a record and returns it. The owning batch is left untouched.
    pub fn delete_record(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                "DELETE FROM records WHERE id = ?1 RETURNING id, name, age, city, upload_id",
                params![id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }
}

impl BatchStore for SqliteStore {
    fn transaction<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut dyn BatchWriter) -> Result<T, StoreError>,
    {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        // Dropping `tx` without commit rolls back.
        let output = work(&mut SqliteBatchWriter { conn: &tx })?;
        tx.commit()?;
        Ok(output)
    }
}

struct SqliteBatchWriter<'t> {
    conn: &'t Connection,
}

impl BatchWriter for SqliteBatchWriter<'_> {
    fn create_batch(&mut self, label: &str) -> Result<BatchId, StoreError> {
        self.conn.execute(
            "INSERT INTO uploads (file_name, uploaded_at, total_rows) VALUES (?1, ?2, 0)",
            params![label, Utc::now()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn bulk_insert_records(
        &mut self,
        batch_id: BatchId,
        rows: &[NewRecord],
    ) -> Result<usize, StoreError> {
        let mut inserted = 0usize;
        {
            let mut stmt = self.conn.prepare_cached(
                "INSERT INTO records (name, age, city, upload_id) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                inserted += stmt.execute(params![row.name, row.age, row.city, batch_id])?;
            }
        }
        self.conn.execute(
            "UPDATE uploads SET total_rows = total_rows + ?1 WHERE id = ?2",
            params![inserted as i64, batch_id],
        )?;
        Ok(inserted)
    }
}

fn batch_from_row(row: &Row<'_>) -> rusqlite::Result<UploadBatch> {
    Ok(UploadBatch {
        id: row.get(0)?,
        file_name: row.get(1)?,
        uploaded_at: row.get(2)?,
        total_rows: row.get(3)?,
    })
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        city: row.get(3)?,
        upload_id: row.get(4)?,
    })
}
