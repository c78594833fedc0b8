//! Record store over the workspace SQLite database.
//!
//! Each operation opens its own connection, so concurrent requests reach
//! SQLite as independent clients and all mutual exclusion for the check-in
//! race happens inside the database.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

use crate::db;
use crate::model::Student;

#[derive(Debug, Clone)]
pub struct Store {
    db_path: PathBuf,
    busy_timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
    Unchanged,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertCounts {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl Store {
    /// Runs schema setup for `workspace` and returns a store bound to it.
    pub fn open(workspace: &Path, busy_timeout: Duration) -> anyhow::Result<Self> {
        drop(db::open_db(workspace)?);
        Ok(Self::at(db::db_path(workspace), busy_timeout))
    }

    /// Binds to a database file without touching it.
    pub fn at(db_path: impl Into<PathBuf>, busy_timeout: Duration) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout,
        }
    }

    fn connect(&self) -> anyhow::Result<Connection> {
        db::connect(&self.db_path, self.busy_timeout)
    }

    /// Sets `check_in` on the record for `student_number` if and only if it is
    /// still unset, returning the post-update record.
    ///
    /// This is one `UPDATE ... RETURNING` statement: the predicate and the write
    /// are evaluated under the same write lock, so at most one caller per record
    /// ever gets `Some`.
    pub fn find_and_set_if_unset(&self, student_number: &str) -> anyhow::Result<Option<Student>> {
        let conn = self.connect()?;
        let updated = conn
            .query_row(
                "UPDATE students
                 SET check_in = 1, updated_at = ?2
                 WHERE student_number = ?1 AND check_in = 0
                 RETURNING name, student_number, check_in",
                params![student_number, now_stamp()],
                student_from_row,
            )
            .optional()?;
        Ok(updated)
    }

    pub fn find_by_key(&self, student_number: &str) -> anyhow::Result<Option<Student>> {
        let conn = self.connect()?;
        let found = conn
            .query_row(
                "SELECT name, student_number, check_in
                 FROM students
                 WHERE student_number = ?",
                [student_number],
                student_from_row,
            )
            .optional()?;
        Ok(found)
    }

    pub fn list_all_sorted_by_key(&self) -> anyhow::Result<Vec<Student>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT name, student_number, check_in
             FROM students
             ORDER BY student_number",
        )?;
        let students = stmt
            .query_map([], student_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(students)
    }

    /// Upserts every record in one immediate transaction; either all land or
    /// none do.
    pub fn upsert_batch(&self, students: &[Student]) -> anyhow::Result<UpsertCounts> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut counts = UpsertCounts::default();
        for student in students {
            match upsert_by_key(&tx, student)? {
                UpsertOutcome::Inserted => counts.inserted += 1,
                UpsertOutcome::Updated => counts.updated += 1,
                UpsertOutcome::Unchanged => counts.unchanged += 1,
            }
        }
        tx.commit()?;
        Ok(counts)
    }
}

/// Writes `student` keyed by its number: update if the number exists, insert
/// otherwise. Callers are expected to hold a write transaction.
pub fn upsert_by_key(conn: &Connection, student: &Student) -> anyhow::Result<UpsertOutcome> {
    let existing: Option<(String, String, bool)> = conn
        .query_row(
            "SELECT id, name, check_in FROM students WHERE student_number = ?",
            [&student.student_number],
            |row| {
                let check_in: i64 = row.get(2)?;
                Ok((row.get(0)?, row.get(1)?, check_in != 0))
            },
        )
        .optional()?;

    let Some((id, name, check_in)) = existing else {
        conn.execute(
            "INSERT INTO students(id, name, student_number, check_in, updated_at)
             VALUES(?, ?, ?, ?, ?)",
            params![
                Uuid::new_v4().to_string(),
                student.name,
                student.student_number,
                student.check_in as i64,
                now_stamp()
            ],
        )?;
        return Ok(UpsertOutcome::Inserted);
    };

    if name == student.name && check_in == student.check_in {
        return Ok(UpsertOutcome::Unchanged);
    }

    conn.execute(
        "UPDATE students SET name = ?, check_in = ?, updated_at = ? WHERE id = ?",
        params![student.name, student.check_in as i64, now_stamp(), id],
    )?;
    Ok(UpsertOutcome::Updated)
}

fn student_from_row(row: &rusqlite::Row) -> rusqlite::Result<Student> {
    let check_in: i64 = row.get(2)?;
    Ok(Student {
        name: row.get(0)?,
        student_number: row.get(1)?,
        check_in: check_in != 0,
    })
}

fn now_stamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
