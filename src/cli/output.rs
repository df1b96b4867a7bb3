// Output formatting utilities

use std::io::IsTerminal;
use crate::models::{display_name, OutcomeGroup, PodOutcomeMap, TaskEntry};
use crate::report::{PodAccess, PodProgress, StarredTask};

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_DIM: &str = "\x1b[2m";
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate, falling back to the COLUMNS environment
/// variable and then a fixed default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

/// Rendering options shared by the text formatters
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub is_tty: bool,
    pub width: usize,
}

impl OutputOptions {
    pub fn detect() -> Self {
        Self {
            is_tty: is_tty(),
            width: get_terminal_width(),
        }
    }

    /// Plain output at a fixed width (pipes and tests)
    pub fn plain(width: usize) -> Self {
        Self { is_tty: false, width }
    }
}

fn style(text: &str, code: &str, opts: OutputOptions) -> String {
    if opts.is_tty {
        format!("{}{}{}", code, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

/// Truncate to `max` characters, marking the cut with "..."
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut cut: String = text.chars().take(max - 3).collect();
    cut.push_str("...");
    cut
}

fn percent(checked: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        checked * 100 / total
    }
}

/// One task line: checkbox, star, label, and approval state
fn format_task_line(task: &TaskEntry, opts: OutputOptions) -> String {
    let checkbox = if task.checked { "[x]" } else { "[ ]" };
    let star = if task.star_is_filled { "*" } else { " " };
    let suffix = if task.is_awaiting_approval() {
        " (awaiting approval)"
    } else if task.is_locked() {
        " (verified)"
    } else {
        ""
    };
    let prefix_len = 4 + checkbox.len() + 1 + star.len() + 1;
    let label_max = opts.width.saturating_sub(prefix_len + suffix.len()).max(10);
    let label = truncate(&task.key, label_max);
    let line = format!("    {} {} {}{}", checkbox, star, label, suffix);
    if task.is_locked() {
        style(&line, ANSI_DIM, opts)
    } else {
        line
    }
}

fn format_group(group: &OutcomeGroup, opts: OutputOptions) -> String {
    let mut out = String::new();
    let header = format!(
        "  {} [{}]  {}/{}{}",
        group.title,
        group.id,
        group.checked_count(),
        group.content.len(),
        if group.completed { "  achieved" } else { "" }
    );
    out.push_str(&style(&header, ANSI_BOLD, opts));
    out.push('\n');
    if group.content.is_empty() {
        out.push_str("    (no tasks)\n");
    }
    for task in &group.content {
        out.push_str(&format_task_line(task, opts));
        out.push('\n');
    }
    out
}

/// Format the pod -> outcome -> task tree
pub fn format_goals(map: &PodOutcomeMap, opts: OutputOptions) -> String {
    if map.is_empty() {
        return "No pods found.\n".to_string();
    }

    let mut out = String::new();
    for (i, (pod_name, groups)) in map.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&style(display_name(pod_name), ANSI_BOLD, opts));
        out.push('\n');
        if groups.is_empty() {
            out.push_str("  No outcomes.\n");
        }
        for group in groups {
            out.push_str(&format_group(group, opts));
        }
    }
    out
}

/// Format starred tasks awaiting approval
pub fn format_starred(starred: &[StarredTask], opts: OutputOptions) -> String {
    if starred.is_empty() {
        return "No starred tasks awaiting approval.\n".to_string();
    }

    let pod_width = starred.iter().map(|s| s.pod.len()).max().unwrap_or(3).max(3);
    let outcome_width = starred
        .iter()
        .map(|s| s.outcome.chars().count())
        .max()
        .unwrap_or(7)
        .clamp(7, 30);
    let task_max = opts
        .width
        .saturating_sub(pod_width + outcome_width + 4)
        .max(10);

    let mut out = String::new();
    let header = format!("{:<pw$}  {:<ow$}  {}", "Pod", "Outcome", "Task", pw = pod_width, ow = outcome_width);
    out.push_str(&style(&header, ANSI_BOLD, opts));
    out.push('\n');
    for item in starred {
        let suffix = if item.accessible { "" } else { " (locked)" };
        out.push_str(&format!(
            "{:<pw$}  {:<ow$}  {}{}\n",
            item.pod,
            truncate(&item.outcome, outcome_width),
            truncate(&item.task.key, task_max.saturating_sub(suffix.len()).max(10)),
            suffix,
            pw = pod_width,
            ow = outcome_width
        ));
    }
    out
}

/// Format per-pod progress summaries
pub fn format_progress(rows: &[(String, PodProgress)], opts: OutputOptions) -> String {
    if rows.is_empty() {
        return "No pods found.\n".to_string();
    }

    let mut out = String::new();
    for (pod_name, progress) in rows {
        let header = format!(
            "{}  {}/{} tasks ({}%), {}/{} outcomes achieved",
            display_name(pod_name),
            progress.checked,
            progress.total,
            percent(progress.checked, progress.total),
            progress.completed_outcomes,
            progress.total_outcomes
        );
        out.push_str(&style(&header, ANSI_BOLD, opts));
        out.push('\n');
        for outcome in &progress.outcomes {
            out.push_str(&format!(
                "  {:<5} {:>3}%  {}/{}  {}\n",
                outcome.id,
                percent(outcome.checked, outcome.total),
                outcome.checked,
                outcome.total,
                truncate(&outcome.title, opts.width.saturating_sub(24).max(10))
            ));
        }
    }
    out
}

/// Format pod unlock status
pub fn format_access(access: &[PodAccess], opts: OutputOptions) -> String {
    let mut out = String::new();
    for entry in access {
        let line = format!(
            "{:<10} {:<8} {}{}",
            entry.pod.as_str(),
            entry.status.as_str(),
            if entry.completed { "completed" } else { "in progress" },
            if entry.current { "  <- current" } else { "" }
        );
        if entry.current {
            out.push_str(&style(&line, ANSI_FG_YELLOW, opts));
        } else {
            out.push_str(&line);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pod;
    use crate::report::{pod_access, pod_progress, starred_tasks, AccessStatus};

    fn sample_map() -> PodOutcomeMap {
        let mut group = OutcomeGroup::new("CAR".into(), "Career Pathway".into(), false);
        let mut resume = TaskEntry::new(
            "CAR_Youth_Resume__c".into(),
            "resume".into(),
            "Draft a resume".into(),
            true,
        );
        resume.star_is_filled = true;
        resume.ydm_approved = false;
        group.content.push(resume);
        group.content.push(TaskEntry::new(
            "CAR_Youth_Interview__c".into(),
            "interview".into(),
            "Mock interview".into(),
            false,
        ));

        let mut map = PodOutcomeMap::new();
        map.insert("Trainee_POD_Map__c".into(), vec![group]);
        map.insert("Associate_POD_Map__c".into(), vec![]);
        map
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long task name", 10), "a long ...");
        assert_eq!(truncate("abcdef", 3), "abc");
    }

    #[test]
    fn test_format_goals_plain() {
        let out = format_goals(&sample_map(), OutputOptions::plain(80));
        assert!(out.contains("Trainee\n"));
        assert!(out.contains("  Career Pathway [CAR]  1/2"));
        assert!(out.contains("    [x] * Draft a resume (awaiting approval)"));
        assert!(out.contains("    [ ]   Mock interview"));
        assert!(out.contains("Associate\n  No outcomes."));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_format_goals_tty_uses_ansi() {
        let opts = OutputOptions { is_tty: true, width: 80 };
        assert!(format_goals(&sample_map(), opts).contains(ANSI_BOLD));
    }

    #[test]
    fn test_format_goals_empty() {
        assert_eq!(format_goals(&PodOutcomeMap::new(), OutputOptions::plain(80)), "No pods found.\n");
    }

    #[test]
    fn test_format_starred() {
        let starred = starred_tasks(&sample_map());
        let out = format_starred(&starred, OutputOptions::plain(80));
        assert!(out.starts_with("Pod"));
        assert!(out.contains("Trainee"));
        assert!(out.contains("Draft a resume"));
        assert!(!out.contains("Mock interview"));
        assert!(!out.contains("(locked)"));

        let mut locked = starred.clone();
        locked[0].accessible = false;
        let out = format_starred(&locked, OutputOptions::plain(80));
        assert!(out.contains("Draft a resume (locked)"));
        assert_eq!(format_starred(&[], OutputOptions::plain(80)), "No starred tasks awaiting approval.\n");
    }

    #[test]
    fn test_format_progress() {
        let map = sample_map();
        let rows: Vec<(String, PodProgress)> = map
            .iter()
            .map(|(name, groups)| (name.to_string(), pod_progress(groups)))
            .collect();
        let out = format_progress(&rows, OutputOptions::plain(80));
        assert!(out.contains("Trainee  1/2 tasks (50%), 0/1 outcomes achieved"));
        assert!(out.contains("  CAR    50%  1/2  Career Pathway"));
        assert!(out.contains("Associate  0/0 tasks (0%), 0/0 outcomes achieved"));
    }

    #[test]
    fn test_format_access() {
        let access = pod_access(&sample_map());
        assert_eq!(access[2].pod, Pod::Partner);
        assert_eq!(access[2].status, AccessStatus::Missing);
        let out = format_access(&access, OutputOptions::plain(80));
        assert!(out.contains("Trainee    allowed  in progress"));
        assert!(out.contains("Associate  locked   completed"));
        assert!(out.contains("Partner    missing  in progress"));
    }
}
