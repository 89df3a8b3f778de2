use std::collections::BTreeMap;

use ego_tree::{NodeId, NodeRef};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use tracker_logging::tracker_debug;
use url::Url;

const FORM: &str = "#url-form";
const URL_INPUT: &str = "#url-input";
const SUBMIT_BUTTON: &str = "#submit-btn";
const CONTAINER: &str = ".container";
const DELETE_CONTROL: &str = ".delete-job-btn";
const ROW_CANDIDATES: &str = "tr, .job-item";
const JOB_ITEM_CLASS: &str = "job-item";
const JOB_TITLE: &str = ".job-title";
const JOB_COMPANY: &str = ".job-company";
const JOB_LOCATION: &str = ".job-location";
const JOB_DATE: &str = ".job-date";
const SEARCH_INPUT: &str = "#job-search";
const REFRESH_CONTROL: &str = "#refresh-jobs";
const PAGE_LINKS: &str = ".pagination .page-link";
const JOB_ID_ATTR: &str = "data-job-id";

/// What the controller needs from a server-rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPage {
    pub url: String,
    pub form: Option<ParsedForm>,
    pub has_container: bool,
    pub rows: Vec<ParsedRow>,
    pub delete_controls: Vec<ParsedControl>,
    pub search_value: Option<String>,
    pub has_refresh: bool,
    pub pagination: Vec<ParsedLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedForm {
    pub input_value: String,
    pub button_label: String,
}

/// A table row or job card, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedRow {
    pub table_row: bool,
    pub job_item: bool,
    /// `data-job-id` values whose nearest enclosing row is this element.
    pub job_ids: Vec<String>,
    pub title: String,
    pub company: String,
    pub location: String,
    pub posted: Option<String>,
}

/// Class list and `data-*` attributes (prefix stripped) of a delete control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedControl {
    pub classes: Vec<String>,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLink {
    pub label: String,
    /// Resolved against the page address; `None` when the link has no `href`.
    pub href: Option<String>,
}

/// Reads the controller's view of a page from its markup.
///
/// Missing pieces are reported as absent, never as errors.
pub fn read_page(html: &str, page_url: &str) -> ParsedPage {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let base = Url::parse(page_url).ok();

    let page = ParsedPage {
        url: page_url.to_string(),
        form: read_form(root),
        has_container: first(root, CONTAINER).is_some(),
        rows: read_rows(root),
        delete_controls: select_all(root, DELETE_CONTROL)
            .into_iter()
            .map(read_control)
            .collect(),
        search_value: first(root, SEARCH_INPUT)
            .map(|input| input.value().attr("value").unwrap_or_default().to_string()),
        has_refresh: first(root, REFRESH_CONTROL).is_some(),
        pagination: select_all(root, PAGE_LINKS)
            .into_iter()
            .map(|link| ParsedLink {
                label: text_of(link),
                href: link
                    .value()
                    .attr("href")
                    .and_then(|href| resolve_href(base.as_ref(), href)),
            })
            .collect(),
    };

    tracker_debug!(
        "Read page {}: form={} rows={} delete_controls={} page_links={}",
        page.url,
        page.form.is_some(),
        page.rows.len(),
        page.delete_controls.len(),
        page.pagination.len()
    );
    page
}

fn read_form(root: ElementRef<'_>) -> Option<ParsedForm> {
    first(root, FORM)?;
    let input = first(root, URL_INPUT)?;
    let button = first(root, SUBMIT_BUTTON)?;
    Some(ParsedForm {
        input_value: input.value().attr("value").unwrap_or_default().to_string(),
        button_label: text_of(button),
    })
}

fn read_rows(root: ElementRef<'_>) -> Vec<ParsedRow> {
    select_all(root, ROW_CANDIDATES)
        .into_iter()
        .filter_map(|element| {
            let node: NodeRef<'_, Node> = *element;
            let table_row = element.value().name().eq_ignore_ascii_case("tr");
            let job_item = element.value().classes().any(|class| class == JOB_ITEM_CLASS);
            let job_ids = if table_row {
                tagged_ids(node)
            } else {
                Vec::new()
            };
            // Header and layout rows carry nothing the controller acts on.
            if !job_item && job_ids.is_empty() {
                return None;
            }

            let field = |css: &str| first(element, css).map(text_of).unwrap_or_default();
            Some(ParsedRow {
                table_row,
                job_item,
                job_ids,
                title: field(JOB_TITLE),
                company: field(JOB_COMPANY),
                location: field(JOB_LOCATION),
                posted: first(element, JOB_DATE)
                    .map(text_of)
                    .filter(|text| !text.is_empty()),
            })
        })
        .collect()
}

/// Ids tagged on `row` or its descendants, excluding those inside a nested row.
fn tagged_ids(row: NodeRef<'_, Node>) -> Vec<String> {
    row.descendants()
        .filter_map(ElementRef::wrap)
        .filter_map(|element| {
            let id = element.value().attr(JOB_ID_ATTR)?;
            (nearest_row(*element) == Some(row.id())).then(|| id.to_string())
        })
        .collect()
}

fn nearest_row(node: NodeRef<'_, Node>) -> Option<NodeId> {
    std::iter::once(node)
        .chain(node.ancestors())
        .find(|candidate| {
            candidate
                .value()
                .as_element()
                .is_some_and(|element| element.name().eq_ignore_ascii_case("tr"))
        })
        .map(|candidate| candidate.id())
}

fn read_control(element: ElementRef<'_>) -> ParsedControl {
    ParsedControl {
        classes: element.value().classes().map(str::to_string).collect(),
        data: element
            .value()
            .attrs()
            .filter_map(|(name, value)| {
                name.strip_prefix("data-")
                    .map(|key| (key.to_string(), value.to_string()))
            })
            .collect(),
    }
}

fn resolve_href(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let resolved = match base {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    Some(resolved.to_string())
}

fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => scope.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    let found = scope.select(&selector).next();
    found
}

fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
