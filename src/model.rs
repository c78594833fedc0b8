use serde::{Deserialize, Serialize};

/// A roster entry as callers see it. Storage-only columns (`id`, `updated_at`)
/// never make it into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub name: String,
    pub student_number: String,
    pub check_in: bool,
}

impl Student {
    pub fn new(name: impl Into<String>, student_number: impl Into<String>, check_in: bool) -> Self {
        Self {
            name: name.into(),
            student_number: student_number.into(),
            check_in,
        }
    }
}
