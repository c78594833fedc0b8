use tracing::debug;

use crate::model::Student;
use crate::store::Store;

/// Result of a check-in attempt. Storage failures are not outcomes; they come
/// back as the `Err` side of [`CheckInService::check_in`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// This call performed the false -> true transition.
    CheckedIn(Student),
    /// The record exists but someone already checked it in.
    AlreadyCheckedIn(Student),
    NotFound,
}

impl CheckInOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            CheckInOutcome::CheckedIn(_) => "checked_in",
            CheckInOutcome::AlreadyCheckedIn(_) => "already_checked_in",
            CheckInOutcome::NotFound => "not_found",
        }
    }

    pub fn student(&self) -> Option<&Student> {
        match self {
            CheckInOutcome::CheckedIn(s) | CheckInOutcome::AlreadyCheckedIn(s) => Some(s),
            CheckInOutcome::NotFound => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckInService {
    store: Store,
}

impl CheckInService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn list_students(&self) -> anyhow::Result<Vec<Student>> {
        self.store.list_all_sorted_by_key()
    }

    /// Checks in `student_number`, matched exactly as given.
    pub fn check_in(&self, student_number: &str) -> anyhow::Result<CheckInOutcome> {
        if let Some(student) = self.store.find_and_set_if_unset(student_number)? {
            return Ok(CheckInOutcome::CheckedIn(student));
        }

        // Lost the race or was already set; tell those apart from a missing key.
        match self.store.find_by_key(student_number)? {
            Some(student) => {
                debug!(student_number, "student already checked in");
                Ok(CheckInOutcome::AlreadyCheckedIn(student))
            }
            None => {
                debug!(student_number, "student not found");
                Ok(CheckInOutcome::NotFound)
            }
        }
    }
}
