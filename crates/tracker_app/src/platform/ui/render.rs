use tracker_core::{AlertView, AppViewModel, FormView, JobRowView, Severity};

use super::format::{format_date, truncate_text};

const TITLE_WIDTH: usize = 40;
const CELL_WIDTH: usize = 24;

/// Lines to print for `view`.
///
/// The whole page is printed when there is no previous view or the address
/// changed; otherwise only the sections that differ.
pub fn render(view: &AppViewModel, previous: Option<&AppViewModel>) -> Vec<String> {
    let previous = match previous {
        Some(previous) if previous.page_url == view.page_url => previous,
        _ => return render_page(view),
    };

    let mut lines = Vec::new();
    if previous.alert != view.alert {
        match &view.alert {
            Some(alert) => lines.push(alert_line(alert)),
            None if previous.alert.is_some() => lines.push("(notification closed)".to_string()),
            None => {}
        }
    }
    if previous.form != view.form {
        if let Some(form) = &view.form {
            lines.push(form_line(form));
        }
    }
    if previous.jobs != view.jobs {
        lines.extend(job_lines(&view.jobs));
    }
    lines
}

pub fn render_page(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![format!("== {} ==", view.page_url)];
    if let Some(alert) = &view.alert {
        lines.push(alert_line(alert));
    }
    if let Some(form) = &view.form {
        lines.push(form_line(form));
    }
    if !view.jobs.is_empty() {
        lines.extend(job_lines(&view.jobs));
    }
    if let Some(query) = &view.search_query {
        lines.push(format!("Search: [{query}]"));
    }
    if !view.pagination.is_empty() {
        let links: Vec<String> = view
            .pagination
            .iter()
            .map(|link| format!("({}) {}", link.index + 1, link.label))
            .collect();
        lines.push(format!("Pages: {}", links.join("  ")));
    }
    if view.refresh_available {
        lines.push("Type 'refresh' to reload the list.".to_string());
    }
    lines
}

fn alert_line(alert: &AlertView) -> String {
    let tag = match alert.severity {
        Severity::Info => "INFO",
        Severity::Success => "OK",
        Severity::Warning => "WARNING",
        Severity::Danger => "ERROR",
    };
    format!("[{tag}] {}", alert.message)
}

fn form_line(form: &FormView) -> String {
    let state = if form.button_enabled { "" } else { " (disabled)" };
    format!("URL: [{}]  <{}>{}", form.input, form.button_label, state)
}

fn job_lines(jobs: &[JobRowView]) -> Vec<String> {
    let visible: Vec<&JobRowView> = jobs.iter().filter(|job| job.visible).collect();
    let mut lines: Vec<String> = visible.iter().map(|job| job_line(job)).collect();
    if visible.len() == jobs.len() {
        lines.push(format!("{} job(s)", jobs.len()));
    } else {
        lines.push(format!("Showing {} of {} job(s)", visible.len(), jobs.len()));
    }
    lines
}

fn job_line(job: &JobRowView) -> String {
    format!(
        "{:>6}  {:<title$}  {:<cell$}  {:<cell$}  {}",
        job.job_id.as_deref().unwrap_or("-"),
        truncate_text(&job.title, TITLE_WIDTH),
        truncate_text(&job.company, CELL_WIDTH),
        truncate_text(&job.location, CELL_WIDTH),
        job.posted.as_deref().map(format_date).unwrap_or_default(),
        title = TITLE_WIDTH + 3,
        cell = CELL_WIDTH + 3,
    )
}
