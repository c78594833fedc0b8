//! Bulk roster import.
//!
//! Accepts either a bare array of student-like objects or `{ "students": [...] }`.
//! Field names are matched loosely (`name`/`StudentName`,
//! `studentNumber`/`StudentNumber`, `checkIn`/`checkin`); values are
//! stringified and trimmed. Entries missing a name or number are dropped
//! individually and never fail the batch.

use anyhow::{anyhow, Context};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

use crate::model::Student;
use crate::store::Store;

const NAME_KEYS: &[&str] = &["name", "StudentName"];
const NUMBER_KEYS: &[&str] = &["studentNumber", "StudentNumber"];
const CHECK_IN_KEYS: &[&str] = &["checkIn", "checkin"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub processed: usize,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub discarded: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRoster {
    pub students: Vec<Student>,
    pub discarded: usize,
}

pub fn import_file(store: &Store, path: &Path) -> anyhow::Result<ImportSummary> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.to_string_lossy()))?;
    import_str(store, &raw)
}

pub fn import_str(store: &Store, raw: &str) -> anyhow::Result<ImportSummary> {
    let roster = parse_roster(raw)?;
    if roster.discarded > 0 {
        warn!(discarded = roster.discarded, "skipped entries without a name or student number");
    }

    let counts = store.upsert_batch(&roster.students)?;
    let summary = ImportSummary {
        processed: roster.students.len(),
        inserted: counts.inserted,
        updated: counts.updated,
        unchanged: counts.unchanged,
        discarded: roster.discarded,
    };
    info!(
        processed = summary.processed,
        inserted = summary.inserted,
        updated = summary.updated,
        "imported students"
    );
    Ok(summary)
}

pub fn parse_roster(raw: &str) -> anyhow::Result<ParsedRoster> {
    let parsed: Value = serde_json::from_str(raw).context("import file is not valid JSON")?;

    let entries = match &parsed {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("students") {
            Some(Value::Array(items)) => items,
            _ => return Err(anyhow!("JSON must be an array or an object with a students array.")),
        },
        _ => return Err(anyhow!("JSON must be an array or an object with a students array.")),
    };

    let students: Vec<Student> = entries.iter().filter_map(clean_entry).collect();
    if students.is_empty() {
        return Err(anyhow!("No valid students found in JSON file."));
    }

    Ok(ParsedRoster {
        discarded: entries.len() - students.len(),
        students,
    })
}

pub fn clean_entry(entry: &Value) -> Option<Student> {
    let obj = entry.as_object()?;

    let name = first_present(obj, NAME_KEYS).map(stringify).unwrap_or_default();
    let student_number = first_present(obj, NUMBER_KEYS)
        .map(stringify)
        .unwrap_or_default();
    let name = name.trim();
    let student_number = student_number.trim();
    if name.is_empty() || student_number.is_empty() {
        return None;
    }

    // Only a real boolean counts; "true" strings fall back to not checked in.
    let check_in = CHECK_IN_KEYS
        .iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_bool))
        .unwrap_or(false);

    Some(Student::new(name, student_number, check_in))
}

/// First key whose value is present and not null.
fn first_present<'a>(obj: &'a serde_json::Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

fn stringify(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Whole-valued floats print without a fraction (`20240017.0` -> `"20240017"`),
/// as JS `String()` does below 1e21.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                f.to_string()
            }
        }
        _ => n.to_string(),
    }
}
