//! Pure display derivations. Every function here is total: no panics, no
//! partial failure, defined output for empty input.

use crate::models::ProjectStatus;

/// Translate a wire task status into the view spelling.
/// Only `in_progress` differs; anything else passes through unchanged.
pub fn api_to_ui_status(status: &str) -> &str {
    match status {
        "in_progress" => "in-progress",
        other => other,
    }
}

/// Inverse of [`api_to_ui_status`].
pub fn ui_to_api_status(status: &str) -> &str {
    match status {
        "in-progress" => "in_progress",
        other => other,
    }
}

/// Avatar-fallback initials: first letter of the first and last words,
/// uppercased. A single word yields one letter; absent or empty input
/// yields `"?"`.
pub fn initials(name_or_email: Option<&str>) -> String {
    let mut words = name_or_email.unwrap_or_default().split_whitespace();

    let Some(first) = words.next() else {
        return "?".to_string();
    };
    let letters = first.chars().next().into_iter().chain(
        // `last` is None for a single-word name.
        words.last().and_then(|w| w.chars().next()),
    );
    letters.flat_map(char::to_uppercase).collect()
}

/// Completed-over-total as a mathematically rounded percentage.
///
/// Zero when `total` is zero (no tasks means no progress, not a division
/// error). Not clamped: `completed > total` yields a value over 100, which
/// callers surface rather than hide.
pub fn progress_percentage(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

/// Badge label for a project status chip.
pub fn status_badge(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Active => "Active",
        ProjectStatus::Completed => "Completed",
        ProjectStatus::Overdue => "Overdue",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_zero_for_empty_projects() {
        assert_eq!(progress_percentage(0, 0), 0);
        assert_eq!(progress_percentage(5, 0), 0);
    }

    #[test]
    fn progress_rounds_mathematically() {
        assert_eq!(progress_percentage(1, 3), 33);
        assert_eq!(progress_percentage(2, 3), 67);
        assert_eq!(progress_percentage(1, 2), 50);
        assert_eq!(progress_percentage(18, 18), 100);
    }

    #[test]
    fn progress_over_100_is_preserved() {
        assert_eq!(progress_percentage(3, 2), 150);
    }

    #[test]
    fn initials_handles_absent_and_empty_input() {
        assert_eq!(initials(None), "?");
        assert_eq!(initials(Some("")), "?");
        assert_eq!(initials(Some("   ")), "?");
    }

    #[test]
    fn initials_single_and_multi_word() {
        assert_eq!(initials(Some("Alice")), "A");
        assert_eq!(initials(Some("Alice Johnson")), "AJ");
        assert_eq!(initials(Some("alice de la cruz")), "AC");
        assert_eq!(initials(Some("bob@company.com")), "B");
    }

    #[test]
    fn status_mapping_round_trips() {
        for s in ["todo", "in-progress", "done"] {
            assert_eq!(api_to_ui_status(ui_to_api_status(s)), s);
        }
        assert_eq!(api_to_ui_status("in_progress"), "in-progress");
        assert_eq!(ui_to_api_status("in-progress"), "in_progress");
    }

    #[test]
    fn badge_labels() {
        assert_eq!(status_badge(ProjectStatus::Active), "Active");
        assert_eq!(status_badge(ProjectStatus::Completed), "Completed");
        assert_eq!(status_badge(ProjectStatus::Overdue), "Overdue");
    }
}
