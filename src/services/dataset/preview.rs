use super::types::{DEFAULT_PAGE_SIZE, MAX_CELL_CHARS, MAX_VISIBLE_PAGES};
use super::utils::truncate_cell;
use crate::models::Table;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewQuery {
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(default)]
    pub search: String,
    pub page_size: Option<usize>,
}

fn first_page() -> usize {
    1
}

impl Default for PreviewQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            page_size: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPage {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub page: usize,
    pub total_pages: usize,
    pub page_numbers: SmallVec<[usize; MAX_VISIBLE_PAGES]>,
    pub total_matches: usize,
}

/// One page of records matching `query.search`, rendered as display strings.
pub fn preview(table: &Table, query: &PreviewQuery) -> PreviewPage {
    let page_size = query.page_size.filter(|&n| n > 0).unwrap_or(DEFAULT_PAGE_SIZE);
    let needle = query.search.to_lowercase();

    let matches: Vec<Vec<String>> = table
        .records()
        .map(|record| record.values().iter().map(|v| v.to_string()).collect::<Vec<_>>())
        .filter(|cells| {
            needle.is_empty() || cells.iter().any(|cell| cell.to_lowercase().contains(&needle))
        })
        .collect();

    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(page_size);
    let page = query.page.clamp(1, total_pages.max(1));

    let rows = matches
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .map(|cells| cells.iter().map(|c| truncate_cell(c, MAX_CELL_CHARS)).collect())
        .collect();

    PreviewPage {
        columns: table.columns().to_vec(),
        rows,
        page,
        total_pages,
        page_numbers: page_window(page, total_pages),
        total_matches,
    }
}

/// Up to five page numbers centred on `current` where the bounds allow.
fn page_window(current: usize, total_pages: usize) -> SmallVec<[usize; MAX_VISIBLE_PAGES]> {
    let half = MAX_VISIBLE_PAGES / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = total_pages.min(start + MAX_VISIBLE_PAGES - 1);
    if end + 1 < start + MAX_VISIBLE_PAGES {
        start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
    }
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dataset::processor::DatasetProcessor;
    use crate::services::dataset::types::DatasetFormat;

    fn numbered_table(rows: usize) -> Table {
        let mut content = String::from("id,label\n");
        for i in 1..=rows {
            content.push_str(&format!("{},row{}\n", i, i));
        }
        DatasetProcessor.process(&content, DatasetFormat::Csv).unwrap()
    }

    #[test]
    fn first_page_by_default() {
        let page = preview(&numbered_table(25), &PreviewQuery::default());
        assert_eq!(page.columns, ["id", "label"]);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_matches, 25);
        assert_eq!(page.rows.len(), 10);
        assert_eq!(page.rows[0], ["1", "row1"]);
        assert_eq!(page.page_numbers.as_slice(), [1, 2, 3]);
    }

    #[test]
    fn page_is_clamped() {
        let table = numbered_table(25);
        let last = preview(&table, &PreviewQuery { page: 9, ..Default::default() });
        assert_eq!(last.page, 3);
        assert_eq!(last.rows.len(), 5);

        let first = preview(&table, &PreviewQuery { page: 0, ..Default::default() });
        assert_eq!(first.page, 1);
    }

    #[test]
    fn search_is_case_insensitive_across_cells() {
        let table = numbered_table(25);
        let page = preview(
            &table,
            &PreviewQuery {
                search: "ROW2".into(),
                ..Default::default()
            },
        );
        // row2 and row20..row25
        assert_eq!(page.total_matches, 7);
        assert_eq!(page.total_pages, 1);

        let none = preview(&table, &PreviewQuery { search: "zzz".into(), ..Default::default() });
        assert_eq!(none.total_matches, 0);
        assert_eq!(none.total_pages, 0);
        assert_eq!(none.page, 1);
        assert!(none.rows.is_empty());
        assert!(none.page_numbers.is_empty());
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "x".repeat(60);
        let table = DatasetProcessor
            .process(&format!("note\n{}\n", long), DatasetFormat::Csv)
            .unwrap();
        let page = preview(&table, &PreviewQuery::default());
        assert_eq!(page.rows[0][0], format!("{}...", "x".repeat(50)));
    }

    #[test]
    fn page_window_slides_with_current_page() {
        assert_eq!(page_window(1, 20).as_slice(), [1, 2, 3, 4, 5]);
        assert_eq!(page_window(10, 20).as_slice(), [8, 9, 10, 11, 12]);
        assert_eq!(page_window(20, 20).as_slice(), [16, 17, 18, 19, 20]);
        assert_eq!(page_window(19, 20).as_slice(), [16, 17, 18, 19, 20]);
        assert_eq!(page_window(2, 3).as_slice(), [1, 2, 3]);
    }

    #[test]
    fn custom_page_size() {
        let page = preview(
            &numbered_table(25),
            &PreviewQuery {
                page: 2,
                page_size: Some(20),
                ..Default::default()
            },
        );
        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.rows[0], ["21", "row21"]);
    }
}
