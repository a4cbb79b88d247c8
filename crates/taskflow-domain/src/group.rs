//! Grouping of an already filtered and sorted task list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Task, TaskPriority, TaskStatus};

pub const UNASSIGNED_GROUP: &str = "Unassigned";
pub const UNLABELED_GROUP: &str = "No label";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupKey {
    #[default]
    Status,
    Priority,
    Assignee,
    Label,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupKey::Status => "status",
            GroupKey::Priority => "priority",
            GroupKey::Assignee => "assignee",
            GroupKey::Label => "label",
        };
        f.write_str(name)
    }
}

impl FromStr for GroupKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "status" => Ok(GroupKey::Status),
            "priority" => Ok(GroupKey::Priority),
            "assignee" => Ok(GroupKey::Assignee),
            "label" | "labels" => Ok(GroupKey::Label),
            _ => Err(format!("unknown group key '{}'", s)),
        }
    }
}

/// One bucket of tasks sharing a group value.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskGroup<'a> {
    pub name: String,
    pub tasks: Vec<&'a Task>,
}

/// Split `tasks` into non-empty groups.
///
/// Status and priority groups follow their fixed order (priority from Urgent
/// down). Assignee and label groups follow first appearance, with the
/// catch-all bucket last. A task with several assignees or labels lands in
/// each of their groups. Tasks keep their input order inside a group.
pub fn group_tasks<'a>(tasks: &[&'a Task], key: GroupKey) -> Vec<TaskGroup<'a>> {
    match key {
        GroupKey::Status => TaskStatus::ALL
            .iter()
            .map(|status| TaskGroup {
                name: status.label().to_string(),
                tasks: tasks.iter().copied().filter(|t| t.status == *status).collect(),
            })
            .filter(|g| !g.tasks.is_empty())
            .collect(),
        GroupKey::Priority => TaskPriority::ALL
            .iter()
            .map(|priority| TaskGroup {
                name: priority.to_string(),
                tasks: tasks
                    .iter()
                    .copied()
                    .filter(|t| t.priority == *priority)
                    .collect(),
            })
            .filter(|g| !g.tasks.is_empty())
            .collect(),
        GroupKey::Assignee => group_by_many(tasks, UNASSIGNED_GROUP, |t| {
            t.assignees.iter().map(String::as_str).collect()
        }),
        GroupKey::Label => group_by_many(tasks, UNLABELED_GROUP, |t| t.label_names().collect()),
    }
}

fn group_by_many<'a, F>(tasks: &[&'a Task], fallback: &str, values: F) -> Vec<TaskGroup<'a>>
where
    F: Fn(&'a Task) -> Vec<&'a str>,
{
    let mut groups: Vec<TaskGroup<'a>> = Vec::new();
    let mut rest: Vec<&'a Task> = Vec::new();

    for task in tasks.iter().copied() {
        let names = values(task);
        if names.is_empty() {
            rest.push(task);
            continue;
        }
        for name in names {
            match groups.iter_mut().find(|g| g.name == name) {
                Some(group) => {
                    if !group.tasks.iter().any(|t| t.id == task.id) {
                        group.tasks.push(task);
                    }
                }
                None => groups.push(TaskGroup {
                    name: name.to_string(),
                    tasks: vec![task],
                }),
            }
        }
    }

    if !rest.is_empty() {
        groups.push(TaskGroup {
            name: fallback.to_string(),
            tasks: rest,
        });
    }
    groups
}
