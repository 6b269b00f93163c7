use chrono::{
    DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc,
};

use crate::model::task::{Task, TaskList};

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task text cannot be empty")]
    EmptyText,
    #[error("a deadline is required")]
    MissingDeadline,
    #[error("could not parse deadline '{0}' (expected e.g. 2025-01-01T10:00)")]
    InvalidDeadline(String),
    #[error("no task at index {0}")]
    IndexOutOfRange(usize),
}

// ---------------------------------------------------------------------------
// Deadlines
// ---------------------------------------------------------------------------

/// Naive formats interpreted in local time, tried in order
const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a user-supplied deadline.
///
/// Accepts RFC 3339, the `datetime-local` form `YYYY-MM-DDTHH:MM` and a few
/// close variants (local time), or a bare date (local midnight).
pub fn parse_deadline(input: &str) -> Result<DateTime<Utc>, TaskError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TaskError::MissingDeadline);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| TaskError::InvalidDeadline(input.to_string()))?;

    resolve_local(&Local, &naive).ok_or_else(|| TaskError::InvalidDeadline(input.to_string()))
}

/// Pin a wall-clock time in `tz` to an instant.
///
/// An ambiguous time takes the earlier instant. A time skipped by a DST gap
/// is read with the offset in force before the gap, so it lands past the
/// transition by the same amount.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
        LocalResult::None => {
            let before = tz
                .from_local_datetime(&(*naive - TimeDelta::days(1)))
                .earliest()?;
            let offset = before.offset().fix();
            offset
                .from_local_datetime(naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
        }
    }
}

fn check_text(text: &str) -> Result<(), TaskError> {
    if text.trim().is_empty() {
        Err(TaskError::EmptyText)
    } else {
        Ok(())
    }
}

fn check_index(list: &TaskList, index: usize) -> Result<(), TaskError> {
    if index < list.len() {
        Ok(())
    } else {
        Err(TaskError::IndexOutOfRange(index))
    }
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Append a new pending task. Returns its index.
///
/// The text is stored as entered; only the emptiness check trims it.
pub fn add_task(
    list: &mut TaskList,
    text: &str,
    deadline: &str,
    now: DateTime<Utc>,
) -> Result<usize, TaskError> {
    check_text(text)?;
    let deadline = parse_deadline(deadline)?;
    list.tasks
        .push(Task::new(text.to_string(), now, Some(deadline)));
    Ok(list.len() - 1)
}

/// Replace the text of the task at `index`, keeping everything else.
pub fn update_task(list: &mut TaskList, index: usize, text: &str) -> Result<(), TaskError> {
    check_text(text)?;
    check_index(list, index)?;
    list.tasks[index].text = text.to_string();
    Ok(())
}

/// Flip the completion flag. Returns the new value.
pub fn toggle_complete(list: &mut TaskList, index: usize) -> Result<bool, TaskError> {
    let task = list
        .tasks
        .get_mut(index)
        .ok_or(TaskError::IndexOutOfRange(index))?;
    task.completed = !task.completed;
    Ok(task.completed)
}

/// Remove the task at `index`; later tasks shift down by one.
pub fn delete_task(list: &mut TaskList, index: usize) -> Result<Task, TaskError> {
    check_index(list, index)?;
    Ok(list.tasks.remove(index))
}

/// Remove every task. Returns how many were removed.
pub fn delete_all(list: &mut TaskList) -> usize {
    let count = list.len();
    list.tasks.clear();
    count
}

/// Set every task's completion flag to `done`.
pub fn mark_all(list: &mut TaskList, done: bool) {
    for task in &mut list.tasks {
        task.completed = done;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 30, 8, 0, 0).unwrap()
    }

    fn list_of(texts: &[&str]) -> TaskList {
        let mut list = TaskList::new();
        for t in texts {
            add_task(&mut list, t, "2025-01-01T10:00", now()).unwrap();
        }
        list
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut list = TaskList::new();
        assert_eq!(
            add_task(&mut list, "   ", "2025-01-01T10:00", now()),
            Err(TaskError::EmptyText)
        );
        assert_eq!(add_task(&mut list, "", "2025-01-01", now()), Err(TaskError::EmptyText));
        assert!(list.is_empty());
    }

    #[test]
    fn add_requires_deadline() {
        let mut list = TaskList::new();
        assert_eq!(
            add_task(&mut list, "Buy milk", "  ", now()),
            Err(TaskError::MissingDeadline)
        );
        assert!(matches!(
            add_task(&mut list, "Buy milk", "tomorrow", now()),
            Err(TaskError::InvalidDeadline(_))
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn add_appends_pending_task() {
        let mut list = list_of(&["first"]);
        let idx = add_task(&mut list, " Write report ", "2025-01-01T10:00", now()).unwrap();
        assert_eq!(idx, 1);
        let task = list.get(1).unwrap();
        assert_eq!(task.text, " Write report ");
        assert!(!task.completed);
        assert_eq!(task.created_at, now());
        assert!(task.deadline.is_some());
    }

    #[test]
    fn update_preserves_other_fields() {
        let mut list = list_of(&["a", "b"]);
        toggle_complete(&mut list, 1).unwrap();
        let before = list.get(1).unwrap().clone();
        update_task(&mut list, 1, "b2").unwrap();
        let after = list.get(1).unwrap();
        assert_eq!(after.text, "b2");
        assert_eq!(after.completed, before.completed);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.deadline, before.deadline);
    }

    #[test]
    fn update_rejects_blank_and_out_of_range() {
        let mut list = list_of(&["a"]);
        assert_eq!(update_task(&mut list, 0, " "), Err(TaskError::EmptyText));
        assert_eq!(
            update_task(&mut list, 3, "x"),
            Err(TaskError::IndexOutOfRange(3))
        );
        assert_eq!(list.get(0).unwrap().text, "a");
    }

    #[test]
    fn toggle_is_self_inverse() {
        let mut list = list_of(&["a", "b"]);
        let original = list.clone();
        assert_eq!(toggle_complete(&mut list, 0), Ok(true));
        assert_eq!(toggle_complete(&mut list, 0), Ok(false));
        assert_eq!(list, original);
        assert_eq!(
            toggle_complete(&mut list, 2),
            Err(TaskError::IndexOutOfRange(2))
        );
    }

    #[test]
    fn delete_shifts_later_tasks() {
        let mut list = list_of(&["a", "b", "c"]);
        let removed = delete_task(&mut list, 1).unwrap();
        assert_eq!(removed.text, "b");
        let texts: Vec<_> = list.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
        assert_eq!(
            delete_task(&mut list, 2),
            Err(TaskError::IndexOutOfRange(2))
        );
    }

    #[test]
    fn delete_all_empties_list() {
        let mut list = list_of(&["a", "b"]);
        assert_eq!(delete_all(&mut list), 2);
        assert!(list.is_empty());
    }

    #[test]
    fn mark_all_sets_uniformly() {
        let mut list = list_of(&["a", "b", "c"]);
        toggle_complete(&mut list, 1).unwrap();
        mark_all(&mut list, true);
        assert!(list.iter().all(|t| t.completed));
        mark_all(&mut list, false);
        assert!(list.iter().all(|t| !t.completed));
    }

    #[test]
    fn parse_deadline_formats() {
        let rfc = parse_deadline("2025-01-01T10:00:00Z").unwrap();
        assert_eq!(rfc, Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap());

        let local = parse_deadline("2025-01-01T10:00").unwrap();
        let expected = Local
            .with_ymd_and_hms(2025, 1, 1, 10, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(local, expected);

        assert_eq!(parse_deadline("2025-01-01 10:00").unwrap(), expected);

        let date_only = parse_deadline("2025-06-15").unwrap().with_timezone(&Local);
        assert_eq!(date_only.hour(), 0);
        assert_eq!(date_only.minute(), 0);
    }

    /// UTC+0 until 2025-03-30 01:00 UTC, then UTC+1. Wall-clock times from
    /// 01:00 to 02:00 that day never happen.
    #[derive(Debug, Clone, Copy)]
    struct GapZone;

    fn switch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 30)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap()
    }

    fn hour(h: i32) -> FixedOffset {
        FixedOffset::east_opt(h * 3600).unwrap()
    }

    impl TimeZone for GapZone {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            GapZone
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            if *local < switch() {
                LocalResult::Single(hour(0))
            } else if *local < switch() + TimeDelta::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(hour(1))
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < switch() { hour(0) } else { hour(1) }
        }
    }

    #[test]
    fn resolve_local_outside_gap() {
        let before = switch() - TimeDelta::minutes(30);
        assert_eq!(
            resolve_local(&GapZone, &before),
            Some(Utc.with_ymd_and_hms(2025, 3, 30, 0, 30, 0).unwrap())
        );
        let after = switch() + TimeDelta::hours(2);
        assert_eq!(
            resolve_local(&GapZone, &after),
            Some(Utc.with_ymd_and_hms(2025, 3, 30, 2, 0, 0).unwrap())
        );
    }

    #[test]
    fn resolve_local_moves_gap_times_forward() {
        // 01:30 never happens; it reads as 02:30 local, 01:30 UTC
        let skipped = switch() + TimeDelta::minutes(30);
        let resolved = resolve_local(&GapZone, &skipped).unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2025, 3, 30, 1, 30, 0).unwrap());
        assert_eq!(
            resolved.with_timezone(&GapZone).naive_local(),
            skipped + TimeDelta::hours(1)
        );
    }

    #[test]
    fn resolve_local_fixed_offset() {
        let naive = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(
            resolve_local(&hour(2), &naive),
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap())
        );
    }
}
