use serde::Serialize;
use taskflow_core::Repository;
use taskflow_domain::{
    Board, BoardSnapshot, GroupKey, SortKey, Task, TaskFilters, TaskPriority, TaskStatus,
};
use taskflow_dnd::ViewComposer;

use super::{parse_all, parse_value};
use crate::cli::ShowArgs;
use crate::context::CliContext;
use crate::json_store::JsonFileRepository;
use crate::output;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupedView<'a> {
    board: &'a Board,
    sort: SortKey,
    group_by: GroupKey,
    active_filter_count: usize,
    groups: Vec<GroupOutput<'a>>,
}

#[derive(Serialize)]
struct GroupOutput<'a> {
    name: String,
    count: usize,
    tasks: Vec<&'a Task>,
}

pub fn init(file_path: &str, name: String) -> anyhow::Result<()> {
    let repo = JsonFileRepository::new(file_path);
    if repo.exists() {
        anyhow::bail!("Board file already exists: {}", file_path);
    }
    let snapshot = BoardSnapshot::new(Board::new(name));
    repo.save(&snapshot)?;
    tracing::info!("Created new board file: {}", file_path);
    output::output_success(&snapshot.board)
}

pub fn show(ctx: &CliContext, args: ShowArgs) -> anyhow::Result<()> {
    let filters = build_filters(&args)?;
    let sort = match &args.sort {
        Some(sort) => parse_value("sort", sort)?,
        None => ctx.default_sort(),
    };

    let mut composer = ViewComposer::new();
    let view = composer.compose(&ctx.state, &filters, sort, None);

    match &args.group {
        None => output::output_success(&view),
        Some(group) => {
            let group_by: GroupKey = parse_value("group", group)?;
            let groups = view
                .groups(group_by)
                .into_iter()
                .map(|g| GroupOutput {
                    name: g.name,
                    count: g.tasks.len(),
                    tasks: g.tasks,
                })
                .collect();
            output::output_success(GroupedView {
                board: view.board,
                sort,
                group_by,
                active_filter_count: view.active_filter_count,
                groups,
            })
        }
    }
}

fn build_filters(args: &ShowArgs) -> anyhow::Result<TaskFilters> {
    let mut filters = TaskFilters::new();
    if let Some(search) = &args.search {
        filters.search = search.clone();
    }
    filters
        .statuses
        .extend(parse_all::<TaskStatus>("status", &args.status)?);
    filters
        .priorities
        .extend(parse_all::<TaskPriority>("priority", &args.priority)?);
    filters.assignees.extend(args.assignee.iter().cloned());
    filters.labels.extend(args.label.iter().cloned());
    Ok(filters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ShowArgs {
        ShowArgs {
            search: None,
            status: Vec::new(),
            priority: Vec::new(),
            assignee: Vec::new(),
            label: Vec::new(),
            sort: None,
            group: None,
        }
    }

    #[test]
    fn test_build_filters() {
        let mut show = args();
        show.search = Some("login".into());
        show.priority = vec!["urgent".into(), "high".into()];
        show.status = vec!["in-progress".into()];
        show.label = vec!["bug".into()];

        let filters = build_filters(&show).unwrap();
        assert_eq!(filters.active_filter_count(), 4);
        assert!(filters.priorities.contains(&TaskPriority::Urgent));
        assert!(filters.statuses.contains(&TaskStatus::InProgress));
    }

    #[test]
    fn test_build_filters_rejects_unknown_priority() {
        let mut show = args();
        show.priority = vec!["someday".into()];
        assert!(build_filters(&show).is_err());
    }
}
