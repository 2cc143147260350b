//! In-memory resource store loaded from a worksheet CSV export.

use std::io::Read;
use std::path::Path;

use uxsearch_core::{AppError, AppResult, SheetColumns};

use crate::types::ResourceRecord;

/// Process-lifetime snapshot of the resource worksheet.
///
/// The store is built once at startup and never mutated afterwards, so it can
/// be shared across request handlers behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    records: Vec<ResourceRecord>,
}

/// Column positions resolved against a header row.
struct ColumnIndex {
    title: Option<usize>,
    link: Option<usize>,
    category: Option<usize>,
    author: Option<usize>,
    main_tag: Option<usize>,
    sub_tag: Option<usize>,
    summary: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, columns: &SheetColumns) -> Self {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name.trim());

        let index = Self {
            title: position(&columns.title),
            link: position(&columns.link),
            category: position(&columns.category),
            author: position(&columns.author),
            main_tag: position(&columns.main_tag),
            sub_tag: position(&columns.sub_tag),
            summary: position(&columns.summary),
        };

        if index.title.is_none() || index.link.is_none() {
            tracing::warn!(
                "Resource sheet is missing '{}' or '{}' column; values will be empty",
                columns.title,
                columns.link
            );
        }

        index
    }
}

fn cell(row: &csv::StringRecord, index: Option<usize>) -> &str {
    index.and_then(|i| row.get(i)).unwrap_or("")
}

impl ResourceStore {
    /// Build a store from already constructed records.
    pub fn from_records(records: Vec<ResourceRecord>) -> Self {
        Self { records }
    }

    /// Parse a CSV export (header row first) into a store.
    ///
    /// Headers are trimmed before matching, rows may be ragged, and rows whose
    /// cells are all blank are skipped. Missing columns yield empty strings.
    pub fn from_csv_reader<R: Read>(reader: R, columns: &SheetColumns) -> AppResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| AppError::Resource(format!("Failed to read sheet header: {}", e)))?
            .clone();
        let index = ColumnIndex::resolve(&headers, columns);

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let row = result.map_err(|e| {
                AppError::Resource(format!("Failed to read sheet row {}: {}", row_idx + 2, e))
            })?;

            if row.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            records.push(ResourceRecord::new(
                cell(&row, index.title),
                cell(&row, index.link),
                cell(&row, index.category),
                cell(&row, index.author),
                cell(&row, index.main_tag),
                cell(&row, index.sub_tag),
                cell(&row, index.summary),
            ));
        }

        Ok(Self { records })
    }

    /// Parse CSV text into a store.
    pub fn from_csv_str(content: &str, columns: &SheetColumns) -> AppResult<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        Self::from_csv_reader(content.as_bytes(), columns)
    }

    /// Load the store from a CSV export URL or a local file path.
    ///
    /// Any failure here is fatal for the service: it should not start
    /// serving without its resource list.
    pub async fn load(source: &str, columns: &SheetColumns) -> AppResult<Self> {
        tracing::info!("Loading resources from {}", source);

        let content = if is_url(source) {
            fetch_csv(source).await?
        } else {
            read_csv_file(Path::new(source)).await?
        };

        let store = Self::from_csv_str(&content, columns)?;
        tracing::info!("Loaded {} resources", store.len());

        Ok(store)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in sheet order.
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// Iterate records in sheet order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResourceRecord> {
        self.records.iter()
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn fetch_csv(url: &str) -> AppResult<String> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| AppError::Resource(format!("Failed to fetch resource sheet: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::Resource(format!(
            "Resource sheet request failed with status {}",
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| AppError::Resource(format!("Failed to read resource sheet body: {}", e)))
}

async fn read_csv_file(path: &Path) -> AppResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Resource(format!("Failed to read resource sheet {:?}: {}", path, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SHEET: &str = "\
 Headline ,Button,Category,Author,Main-tag,Sub-tag,General Summary
Usability Testing 101,https://example.com/ut,Articles,Ana,\"Research, Testing\",Usability,Intro to testing
Design Systems,https://example.com/ds,Talks,Ben,UI,\"Components, Tokens\",Scaling UI
,,,,,,
Untagged,https://example.com/x,Books,Cy,,,Nothing to match
";

    #[test]
    fn test_from_csv_str_maps_columns() {
        let store = ResourceStore::from_csv_str(SHEET, &SheetColumns::default()).unwrap();
        assert_eq!(store.len(), 3);

        let first = &store.records()[0];
        assert_eq!(first.title, "Usability Testing 101");
        assert_eq!(first.link, "https://example.com/ut");
        assert_eq!(first.category, "Articles");
        assert_eq!(first.author, "Ana");
        assert_eq!(first.summary, "Intro to testing");
        assert_eq!(first.tags, vec!["research", "testing", "usability"]);
    }

    #[test]
    fn test_blank_rows_skipped_and_empty_tags_allowed() {
        let store = ResourceStore::from_csv_str(SHEET, &SheetColumns::default()).unwrap();
        let titles: Vec<_> = store.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Usability Testing 101", "Design Systems", "Untagged"]
        );
        assert!(store.records()[2].tags.is_empty());
    }

    #[test]
    fn test_missing_columns_yield_empty_strings() {
        let csv = "Headline,Button\nOnly Title,https://example.com\n";
        let store = ResourceStore::from_csv_str(csv, &SheetColumns::default()).unwrap();
        let record = &store.records()[0];
        assert_eq!(record.title, "Only Title");
        assert_eq!(record.author, "");
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_ragged_rows() {
        let csv = "Headline,Button,Main-tag\nShort,https://example.com\n";
        let store = ResourceStore::from_csv_str(csv, &SheetColumns::default()).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.records()[0].tags.is_empty());
    }

    #[test]
    fn test_custom_columns() {
        let columns = SheetColumns {
            title: "Name".to_string(),
            link: "URL".to_string(),
            ..SheetColumns::default()
        };
        let csv = "Name,URL,Main-tag\nPersonas,https://example.com/p,Research\n";
        let store = ResourceStore::from_csv_str(csv, &columns).unwrap();
        assert_eq!(store.records()[0].title, "Personas");
        assert_eq!(store.records()[0].tags, vec!["research"]);
    }

    #[test]
    fn test_byte_order_mark_stripped() {
        let csv = "\u{feff}Headline,Button\nA,https://a\n";
        let store = ResourceStore::from_csv_str(csv, &SheetColumns::default()).unwrap();
        assert_eq!(store.records()[0].title, "A");
    }

    #[test]
    fn test_header_only_sheet_is_empty() {
        let store =
            ResourceStore::from_csv_str("Headline,Button\n", &SheetColumns::default()).unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resources.csv");
        fs::write(&path, SHEET).unwrap();

        let store = ResourceStore::load(path.to_str().unwrap(), &SheetColumns::default())
            .await
            .unwrap();
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_resource_error() {
        let result =
            ResourceStore::load("/nonexistent/resources.csv", &SheetColumns::default()).await;
        assert!(matches!(result, Err(AppError::Resource(_))));
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://docs.google.com/spreadsheets/d/x/export?format=csv"));
        assert!(is_url("http://localhost/sheet.csv"));
        assert!(!is_url("./resources.csv"));
    }
}
