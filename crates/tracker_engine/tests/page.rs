use pretty_assertions::assert_eq;
use tracker_engine::{read_page, ParsedForm, ParsedLink};

const JOBS_PAGE: &str = r#"
<!doctype html>
<html>
<body>
  <div class="container">
    <form id="url-form">
      <input id="url-input" type="url" value="">
      <button id="submit-btn" type="submit">
        Start crawling
      </button>
    </form>
    <input id="job-search" value="">
    <button id="refresh-jobs">Refresh</button>
    <table>
      <thead><tr><th>Title</th><th></th></tr></thead>
      <tbody>
        <tr class="job-item">
          <td class="job-title">Backend Engineer</td>
          <td class="job-company">Acme</td>
          <td class="job-location">Seoul</td>
          <td class="job-date">2026-10-01</td>
          <td><button class="btn btn-sm delete-job-btn" data-job-id="42"
                      data-job-title="Backend Engineer">Delete</button></td>
        </tr>
        <tr class="job-item">
          <td class="job-title">Nurse</td>
          <td class="job-company">Acme</td>
          <td class="job-location">Busan</td>
          <td><button class="delete-job-btn" data-job-id="43"
                      data-job-title="Nurse">Delete</button></td>
        </tr>
      </tbody>
    </table>
    <ul class="pagination">
      <li><a class="page-link" href="?page=1">1</a></li>
      <li><a class="page-link" href="/jobs?page=2">2</a></li>
      <li><a class="page-link">...</a></li>
    </ul>
  </div>
</body>
</html>
"#;

#[test]
fn reads_form_controls_and_hosts() {
    let page = read_page(JOBS_PAGE, "http://127.0.0.1:8000/jobs");

    assert_eq!(
        page.form,
        Some(ParsedForm {
            input_value: String::new(),
            button_label: "Start crawling".to_string(),
        })
    );
    assert!(page.has_container);
    assert!(page.has_refresh);
    assert_eq!(page.search_value, Some(String::new()));
}

#[test]
fn reads_job_rows_with_their_tagged_ids() {
    let page = read_page(JOBS_PAGE, "http://127.0.0.1:8000/jobs");

    assert_eq!(page.rows.len(), 2);
    let first = &page.rows[0];
    assert!(first.table_row);
    assert!(first.job_item);
    assert_eq!(first.job_ids, vec!["42".to_string()]);
    assert_eq!(first.title, "Backend Engineer");
    assert_eq!(first.company, "Acme");
    assert_eq!(first.location, "Seoul");
    assert_eq!(first.posted.as_deref(), Some("2026-10-01"));
    assert_eq!(page.rows[1].posted, None);
}

#[test]
fn reads_delete_control_attributes() {
    let page = read_page(JOBS_PAGE, "http://127.0.0.1:8000/jobs");

    assert_eq!(page.delete_controls.len(), 2);
    let control = &page.delete_controls[0];
    assert!(control.classes.iter().any(|class| class == "delete-job-btn"));
    assert_eq!(control.data.get("job-id").map(String::as_str), Some("42"));
    assert_eq!(
        control.data.get("job-title").map(String::as_str),
        Some("Backend Engineer")
    );
}

#[test]
fn resolves_pagination_links_against_page_url() {
    let page = read_page(JOBS_PAGE, "http://127.0.0.1:8000/jobs");

    assert_eq!(
        page.pagination,
        vec![
            ParsedLink {
                label: "1".to_string(),
                href: Some("http://127.0.0.1:8000/jobs?page=1".to_string()),
            },
            ParsedLink {
                label: "2".to_string(),
                href: Some("http://127.0.0.1:8000/jobs?page=2".to_string()),
            },
            ParsedLink {
                label: "...".to_string(),
                href: None,
            },
        ]
    );
}

#[test]
fn nested_rows_own_only_their_own_ids() {
    let html = r#"
        <table><tr data-job-id="1"><td>
          <table><tr><td><button class="delete-job-btn" data-job-id="2">x</button></td></tr></table>
        </td></tr></table>
    "#;
    let page = read_page(html, "http://localhost/jobs");

    let ids: Vec<_> = page.rows.iter().map(|row| row.job_ids.clone()).collect();
    assert_eq!(ids, vec![vec!["1".to_string()], vec!["2".to_string()]]);
}

#[test]
fn bare_page_reports_everything_absent() {
    let page = read_page("<html><body><p>Not found</p></body></html>", "http://localhost/x");

    assert_eq!(page.form, None);
    assert!(!page.has_container);
    assert!(page.rows.is_empty());
    assert!(page.delete_controls.is_empty());
    assert_eq!(page.search_value, None);
    assert!(!page.has_refresh);
    assert!(page.pagination.is_empty());
}
