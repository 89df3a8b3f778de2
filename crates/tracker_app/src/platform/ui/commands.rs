use tracker_core::{AppViewModel, Msg};

pub const HELP: &str = "\
Commands:
  url <text>      type into the crawl URL field
  submit [url]    submit the crawl form (optionally typing <url> first)
  delete <jobId>  delete a job posting
  search <text>   filter the job list (empty text shows all)
  refresh         reload the current page
  page <n>        follow pagination link n
  show            print the page again
  dismiss         close the notification
  help            show this list
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    EditUrl(String),
    Submit(Option<String>),
    Delete(String),
    Search(String),
    Refresh,
    /// Zero-based pagination link index.
    Page(usize),
    Show,
    Dismiss,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<UserCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "url" => Ok(UserCommand::EditUrl(rest.to_string())),
        "submit" => Ok(UserCommand::Submit(
            (!rest.is_empty()).then(|| rest.to_string()),
        )),
        "delete" if rest.is_empty() => Err("Usage: delete <jobId>".to_string()),
        "delete" => Ok(UserCommand::Delete(rest.to_string())),
        "search" => Ok(UserCommand::Search(rest.to_string())),
        "refresh" => Ok(UserCommand::Refresh),
        "page" => match rest.parse::<usize>() {
            Ok(number) if number >= 1 => Ok(UserCommand::Page(number - 1)),
            _ => Err("Usage: page <n> (n starts at 1)".to_string()),
        },
        "show" => Ok(UserCommand::Show),
        "dismiss" => Ok(UserCommand::Dismiss),
        "help" | "?" => Ok(UserCommand::Help),
        "quit" | "exit" => Ok(UserCommand::Quit),
        "" => Err(String::new()),
        other => Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
    }
}

/// Translates a page command into the messages the controls would raise.
///
/// Commands aimed at controls the current page does not have are refused
/// here, since there is nothing on the page to click.
pub fn messages_for(command: UserCommand, view: &AppViewModel) -> Result<Vec<Msg>, String> {
    match command {
        UserCommand::EditUrl(text) => {
            require_form(view)?;
            Ok(vec![Msg::UrlInputChanged(text)])
        }
        UserCommand::Submit(text) => {
            let form = require_form(view)?;
            if !form.button_enabled {
                return Err(format!("'{}' is in progress.", form.button_label));
            }
            let mut msgs = Vec::new();
            if let Some(text) = text {
                msgs.push(Msg::UrlInputChanged(text));
            }
            msgs.push(Msg::UrlFormSubmitted);
            Ok(msgs)
        }
        UserCommand::Delete(job_id) => view
            .delete_controls
            .iter()
            .find(|control| control.job_id == job_id)
            .map(|control| vec![Msg::Clicked(control.target.clone())])
            .ok_or_else(|| format!("No delete control for job {job_id} on this page.")),
        UserCommand::Search(query) => {
            if view.search_query.is_none() {
                return Err("This page has no search box.".to_string());
            }
            Ok(vec![Msg::SearchChanged(query)])
        }
        UserCommand::Refresh => {
            if !view.refresh_available {
                return Err("This page has no refresh control.".to_string());
            }
            Ok(vec![Msg::RefreshClicked])
        }
        UserCommand::Page(index) => {
            if index >= view.pagination.len() {
                return Err(format!(
                    "This page has {} pagination link(s).",
                    view.pagination.len()
                ));
            }
            Ok(vec![Msg::PageLinkClicked { index }])
        }
        UserCommand::Dismiss => Ok(vec![Msg::AlertDismissed]),
        UserCommand::Show | UserCommand::Help | UserCommand::Quit => Ok(Vec::new()),
    }
}

fn require_form(view: &AppViewModel) -> Result<&tracker_core::FormView, String> {
    view.form
        .as_ref()
        .ok_or_else(|| "This page has no crawl form.".to_string())
}
