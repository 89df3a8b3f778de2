/// Searchable text of a rendered job item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobFields {
    pub title: String,
    pub company: String,
    pub location: String,
}

impl JobFields {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            location: location.into(),
        }
    }
}

/// Case-insensitive substring match over title, company and location.
pub fn search_matches(fields: &JobFields, query: &str) -> bool {
    matches_lowered(fields, &query.to_lowercase())
}

/// `needle` must already be lowercase.
fn matches_lowered(fields: &JobFields, needle: &str) -> bool {
    [&fields.title, &fields.company, &fields.location]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Document-order position of a row when the page was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRow {
    pub key: RowKey,
    /// A table row, as opposed to a standalone job card.
    pub table_row: bool,
    /// `data-job-id` values of elements whose nearest row is this one.
    pub job_ids: Vec<String>,
    /// Present when the element is a searchable job item.
    pub fields: Option<JobFields>,
    pub posted: Option<String>,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobTable {
    rows: Vec<JobRow>,
}

impl JobTable {
    pub fn new(rows: Vec<JobRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[JobRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes the first table row tagged with `job_id`. A miss is not an error.
    pub fn remove_row_tagged(&mut self, job_id: &str) -> Option<JobRow> {
        let position = self
            .rows
            .iter()
            .position(|row| row.table_row && row.job_ids.iter().any(|id| id == job_id))?;
        Some(self.rows.remove(position))
    }

    /// Recomputes visibility of every job item. Returns how many are visible.
    pub fn apply_search(&mut self, query: &str) -> usize {
        let needle = query.to_lowercase();
        let mut shown = 0;
        for row in &mut self.rows {
            if let Some(fields) = &row.fields {
                row.visible = matches_lowered(fields, &needle);
            }
            if row.visible {
                shown += 1;
            }
        }
        shown
    }
}

/// A pagination link; `href` is already resolved against the page address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub label: String,
    pub href: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: usize, table_row: bool, ids: &[&str]) -> JobRow {
        JobRow {
            key: RowKey(key),
            table_row,
            job_ids: ids.iter().map(|id| id.to_string()).collect(),
            fields: None,
            posted: None,
            visible: true,
        }
    }

    #[test]
    fn removal_skips_cards_and_takes_first_tagged_row() {
        let mut table = JobTable::new(vec![
            row(0, false, &["7"]),
            row(1, true, &["7"]),
            row(2, true, &["7"]),
        ]);

        let removed = table.remove_row_tagged("7").expect("row removed");
        assert_eq!(removed.key, RowKey(1));
        assert_eq!(table.len(), 2);
        assert!(table.remove_row_tagged("8").is_none());
    }

    #[test]
    fn search_leaves_rows_without_fields_alone() {
        let mut table = JobTable::new(vec![row(0, true, &["1"])]);
        assert_eq!(table.apply_search("nothing matches"), 1);
    }

    #[test]
    fn mixed_case_query_filters_job_items() {
        let mut card = row(0, false, &[]);
        card.fields = Some(JobFields::new("Rust Engineer", "Acme", "Berlin"));
        let mut other = row(1, false, &[]);
        other.fields = Some(JobFields::new("Designer", "Globex", "Remote"));
        let mut table = JobTable::new(vec![card, other]);

        assert_eq!(table.apply_search("rUsT"), 1);
        assert!(table.rows()[0].visible);
        assert!(!table.rows()[1].visible);
        assert_eq!(table.apply_search("BERLIN"), 1);
    }
}
