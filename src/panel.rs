//! The presentation engine: turns a task snapshot into aligned, style-tagged
//! text rows for a character-grid panel.
//!
//! Body markup is deliberately small: each line is `[<tag>]<columns>[/]`
//! where `<tag>` is `selected` for the selected row and `row` otherwise, and
//! a literal `[` inside cell text is doubled (`[[`) so it renders as itself.
//!
//! Everything here is a pure function of its inputs. No I/O happens in this
//! module, and identical inputs produce byte-identical output.

use crate::model::{DisplaySettings, TaskRecord};
use crate::util::text::{char_len, pad_right, truncate_chars};

/// Panel title shown in the host's border.
pub const PANEL_TITLE: &str = "TaskWarrior";

/// Body shown when the fetch succeeded but nothing is actionable.
pub const EMPTY_BODY: &str = "No data";

/// Style tag attached to a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Normal,
    Selected,
}

impl RowStyle {
    pub fn tag(self) -> &'static str {
        match self {
            RowStyle::Normal => "row",
            RowStyle::Selected => "selected",
        }
    }
}

/// One formatted panel row. Regenerated on every render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub index: usize,
    pub style: RowStyle,
    pub text: String,
}

/// The render result handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelContent {
    pub title: String,
    pub body: String,
    pub is_error: bool,
}

/// Computed column widths for one render pass, already clamped to the
/// configured bounds.
struct ColumnWidths {
    id: usize,
    description: usize,
    project: usize,
    urgency: usize,
}

/// Filter to actionable tasks and order them most-urgent-first.
///
/// The sort is stable: tasks with equal urgency keep their export order, so
/// repeated renders of the same snapshot produce identical row order.
pub fn visible_tasks(tasks: &[TaskRecord]) -> Vec<&TaskRecord> {
    let mut visible: Vec<&TaskRecord> = tasks.iter().filter(|t| t.status.is_actionable()).collect();
    visible.sort_by(|a, b| b.urgency.total_cmp(&a.urgency));
    visible
}

/// Format the visible tasks into aligned rows.
///
/// Columns are {id, description, project, urgency}, each left-justified and
/// padded to one more than its computed width, joined by single spaces.
/// Description and project are hard-truncated to their configured bounds.
pub fn build_rows(
    visible: &[&TaskRecord],
    display: &DisplaySettings,
    selected: Option<usize>,
) -> Vec<Row> {
    let widths = column_widths(visible, display);

    visible
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let style = if selected == Some(index) {
                RowStyle::Selected
            } else {
                RowStyle::Normal
            };
            let text = format!(
                "{} {} {} {}",
                pad_right(&task.id.to_string(), widths.id + 1),
                pad_right(
                    truncate_chars(&task.description, widths.description),
                    widths.description + 1,
                ),
                pad_right(
                    truncate_chars(&task.project, widths.project),
                    widths.project + 1,
                ),
                pad_right(&format_urgency(task.urgency), widths.urgency + 1),
            );
            Row { index, style, text }
        })
        .collect()
}

/// Render a task snapshot into panel content.
pub fn render(
    tasks: &[TaskRecord],
    display: &DisplaySettings,
    selected: Option<usize>,
) -> PanelContent {
    let visible = visible_tasks(tasks);
    if visible.is_empty() {
        return PanelContent {
            title: PANEL_TITLE.to_string(),
            body: EMPTY_BODY.to_string(),
            is_error: false,
        };
    }

    let body = build_rows(&visible, display, selected)
        .iter()
        .map(markup_line)
        .collect::<Vec<_>>()
        .join("\n");

    PanelContent {
        title: PANEL_TITLE.to_string(),
        body,
        is_error: false,
    }
}

/// Render an upstream failure. The message comes pre-formed from the fetch
/// stage; this module never builds those errors itself.
pub fn render_error(message: &str) -> PanelContent {
    PanelContent {
        title: PANEL_TITLE.to_string(),
        body: message.to_string(),
        is_error: true,
    }
}

fn format_urgency(urgency: f64) -> String {
    format!("{urgency:.2}")
}

fn column_widths(visible: &[&TaskRecord], display: &DisplaySettings) -> ColumnWidths {
    let mut widths = ColumnWidths {
        id: 0,
        description: 0,
        project: 0,
        urgency: 0,
    };
    for task in visible {
        widths.id = widths.id.max(task.id.to_string().len());
        widths.description = widths.description.max(char_len(&task.description));
        widths.project = widths.project.max(char_len(&task.project));
        widths.urgency = widths.urgency.max(format_urgency(task.urgency).len());
    }
    widths.description = widths.description.min(display.max_description_length);
    widths.project = widths.project.min(display.max_project_length);
    widths
}

/// Wrap a row in its style tag, escaping literal `[` so cell text renders
/// as-is. Escaping happens after padding; doubled brackets render as one
/// character, so column alignment is unchanged.
fn markup_line(row: &Row) -> String {
    format!("[{}]{}[/]", row.style.tag(), row.text.replace('[', "[["))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;
    use pretty_assertions::assert_eq;

    fn task(id: u32, description: &str, project: &str, urgency: f64) -> TaskRecord {
        TaskRecord {
            id,
            description: description.to_string(),
            project: project.to_string(),
            status: TaskStatus::Pending,
            urgency,
            ..TaskRecord::default()
        }
    }

    fn with_status(mut t: TaskRecord, status: TaskStatus) -> TaskRecord {
        t.status = status;
        t
    }

    fn settings() -> DisplaySettings {
        DisplaySettings::default()
    }

    #[test]
    fn only_pending_tasks_are_visible() {
        let tasks = vec![
            task(1, "keep", "", 1.0),
            with_status(task(2, "done", "", 99.0), TaskStatus::Completed),
            with_status(task(3, "gone", "", 99.0), TaskStatus::Deleted),
            with_status(task(4, "later", "", 99.0), TaskStatus::Waiting),
        ];
        let visible = visible_tasks(&tasks);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn visible_tasks_sort_by_urgency_descending() {
        let tasks = vec![
            task(1, "low", "", 1.0),
            task(2, "high", "", 12.1),
            task(3, "mid", "", 9.8),
        ];
        let ids: Vec<u32> = visible_tasks(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn equal_urgency_keeps_input_order() {
        let tasks = vec![
            task(5, "a", "", 3.0),
            task(1, "b", "", 3.0),
            task(9, "c", "", 3.0),
        ];
        let ids: Vec<u32> = visible_tasks(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5, 1, 9]);
    }

    #[test]
    fn rows_are_aligned_and_padded() {
        let tasks = vec![
            task(1, "Water the plants", "home", 9.8),
            task(2, "File the taxes", "finance", 12.1),
        ];
        let visible = visible_tasks(&tasks);
        let rows = build_rows(&visible, &settings(), None);
        assert_eq!(rows[0].text, "2  File the taxes    finance  12.10 ");
        assert_eq!(rows[1].text, "1  Water the plants  home     9.80  ");
    }

    #[test]
    fn long_description_is_hard_truncated_and_padded() {
        let tasks = vec![task(1, &"d".repeat(75), "p", 1.0)];
        let visible = visible_tasks(&tasks);
        let rows = build_rows(&visible, &settings(), None);
        let expected = format!("1  {}  p  1.00 ", "d".repeat(60));
        assert_eq!(rows[0].text, expected);
        assert!(!rows[0].text.contains(&"d".repeat(61)));
    }

    #[test]
    fn project_bound_is_respected() {
        let display = DisplaySettings {
            max_description_length: 60,
            max_project_length: 5,
        };
        let tasks = vec![task(1, "x", "averylongprojectname", 1.0)];
        let visible = visible_tasks(&tasks);
        let rows = build_rows(&visible, &display, None);
        assert!(rows[0].text.contains("avery "));
        assert!(!rows[0].text.contains("averyl"));
    }

    #[test]
    fn urgency_column_width_comes_from_formatted_values() {
        // "123.46" is six characters wide, "9.80" four
        let tasks = vec![task(1, "a", "", 123.456), task(2, "b", "", 9.8)];
        let visible = visible_tasks(&tasks);
        let rows = build_rows(&visible, &settings(), None);
        assert!(rows[0].text.ends_with("123.46 "));
        assert!(rows[1].text.ends_with("9.80   "));
    }

    #[test]
    fn selected_row_gets_the_selected_style() {
        let tasks = vec![task(1, "a", "", 2.0), task(2, "b", "", 1.0)];
        let visible = visible_tasks(&tasks);
        let rows = build_rows(&visible, &settings(), Some(1));
        assert_eq!(rows[0].style, RowStyle::Normal);
        assert_eq!(rows[1].style, RowStyle::Selected);
    }

    #[test]
    fn no_selection_renders_all_rows_normal() {
        let tasks = vec![task(1, "a", "", 2.0)];
        let visible = visible_tasks(&tasks);
        let rows = build_rows(&visible, &settings(), None);
        assert_eq!(rows[0].style, RowStyle::Normal);
    }

    #[test]
    fn render_wraps_rows_in_style_tags() {
        let tasks = vec![task(1, "a", "", 2.0), task(2, "b", "", 1.0)];
        let content = render(&tasks, &settings(), Some(0));
        let lines: Vec<&str> = content.body.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[selected]"));
        assert!(lines[0].ends_with("[/]"));
        assert!(lines[1].starts_with("[row]"));
        assert_eq!(content.title, PANEL_TITLE);
        assert!(!content.is_error);
    }

    #[test]
    fn literal_brackets_are_escaped_in_markup() {
        let tasks = vec![task(1, "fix [urgent] bug", "", 1.0)];
        let content = render(&tasks, &settings(), None);
        assert!(content.body.contains("fix [[urgent] bug"));
    }

    #[test]
    fn empty_after_filtering_is_no_data_not_error() {
        let tasks = vec![with_status(task(1, "done", "", 5.0), TaskStatus::Completed)];
        let content = render(&tasks, &settings(), None);
        assert_eq!(content.body, EMPTY_BODY);
        assert!(!content.is_error);
    }

    #[test]
    fn empty_input_is_no_data() {
        let content = render(&[], &settings(), None);
        assert_eq!(content.body, EMPTY_BODY);
        assert!(!content.is_error);
    }

    #[test]
    fn render_error_carries_the_message() {
        let content = render_error("`task` exited with exit status: 1: oops");
        assert_eq!(content.body, "`task` exited with exit status: 1: oops");
        assert!(content.is_error);
        assert_eq!(content.title, PANEL_TITLE);
    }

    #[test]
    fn render_is_idempotent() {
        let tasks = vec![
            task(1, "Water the plants", "home", 9.8),
            task(2, "File the taxes", "finance", 9.8),
            task(3, "fix [urgent] bug", "", 1.0),
        ];
        let first = render(&tasks, &settings(), Some(1));
        let second = render(&tasks, &settings(), Some(1));
        assert_eq!(first, second);
    }
}
