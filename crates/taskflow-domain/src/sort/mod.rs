//! Task sorting.
//!
//! Every sort here is stable: tasks that compare equal under the selected key
//! keep their incoming relative order.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::Task;

/// Ordering selected in the board header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Stored position order.
    #[default]
    Manual,
    /// Urgent, High, Medium, Low.
    Priority,
    /// Earliest due date first; tasks without one go last.
    DueDate,
    /// Newest first.
    CreatedDate,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Manual => "manual",
            SortKey::Priority => "priority",
            SortKey::DueDate => "dueDate",
            SortKey::CreatedDate => "createdDate",
        }
    }

    /// Total order for this key; `Manual` treats everything as equal.
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::Manual => Ordering::Equal,
            SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
            SortKey::DueDate => match (a.due_date, b.due_date) {
                (Some(ad), Some(bd)) => ad.cmp(&bd),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortKey::CreatedDate => b.created_at.cmp(&a.created_at),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "manual" => Ok(SortKey::Manual),
            "priority" => Ok(SortKey::Priority),
            "duedate" => Ok(SortKey::DueDate),
            "createddate" => Ok(SortKey::CreatedDate),
            _ => Err(format!("unknown sort key '{}'", s)),
        }
    }
}

/// Sort a slice in place. Works with both `&Task` and `Task` elements.
pub fn sort_tasks<T: Borrow<Task>>(tasks: &mut [T], key: SortKey) {
    if key == SortKey::Manual {
        return;
    }
    tasks.sort_by(|a, b| key.compare(a.borrow(), b.borrow()));
}

/// Return a sorted copy, leaving the input untouched.
pub fn sorted<'a>(tasks: &[&'a Task], key: SortKey) -> Vec<&'a Task> {
    let mut out = tasks.to_vec();
    sort_tasks(&mut out, key);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskPriority;
    use chrono::{DateTime, Utc};

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn task(title: &str) -> Task {
        Task::new("b".into(), "c".into(), title.into(), 0)
    }

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_due_date_sort_puts_missing_last() {
        let none = task("none");
        let mut march = task("march");
        march.due_date = Some(at("2024-03-01T00:00:00Z"));
        let mut january = task("january");
        january.due_date = Some(at("2024-01-01T00:00:00Z"));

        let result = sorted(&[&none, &march, &january], SortKey::DueDate);
        assert_eq!(titles(&result), vec!["january", "march", "none"]);
    }

    #[test]
    fn test_priority_sort_is_stable() {
        let mut a = task("a");
        a.priority = TaskPriority::Low;
        let mut b = task("b");
        b.priority = TaskPriority::Urgent;
        let mut c = task("c");
        c.priority = TaskPriority::Low;
        let mut d = task("d");
        d.priority = TaskPriority::Urgent;

        let result = sorted(&[&a, &b, &c, &d], SortKey::Priority);
        assert_eq!(titles(&result), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_created_date_sort_newest_first() {
        let mut old = task("old");
        old.created_at = at("2023-01-01T00:00:00Z");
        let mut new = task("new");
        new.created_at = at("2024-06-01T00:00:00Z");
        let mut mid = task("mid");
        mid.created_at = at("2023-09-01T00:00:00Z");

        let result = sorted(&[&old, &new, &mid], SortKey::CreatedDate);
        assert_eq!(titles(&result), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_manual_sort_returns_input_order() {
        let a = task("a");
        let b = task("b");
        let input = [&b, &a];

        let result = sorted(&input, SortKey::Manual);
        assert_eq!(titles(&result), vec!["b", "a"]);
        assert_eq!(titles(&input), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_owned_tasks_in_place() {
        let mut a = task("a");
        a.priority = TaskPriority::Low;
        let mut b = task("b");
        b.priority = TaskPriority::High;
        let mut tasks = vec![a, b];

        sort_tasks(&mut tasks, SortKey::Priority);
        assert_eq!(tasks[0].title, "b");
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("dueDate".parse::<SortKey>(), Ok(SortKey::DueDate));
        assert_eq!("created-date".parse::<SortKey>(), Ok(SortKey::CreatedDate));
        assert_eq!("Manual".parse::<SortKey>(), Ok(SortKey::Manual));
        assert!("random".parse::<SortKey>().is_err());
    }
}
