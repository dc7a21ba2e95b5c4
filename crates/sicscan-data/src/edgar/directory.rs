//! EDGAR company browser harvesting.
//!
//! The company browser lists the companies of a state and SIC code as an HTML table, at most one
//! page of `count` rows per request. Pages are requested at increasing `start` offsets until a
//! page comes back short. A page counts as short by its table rows, not by the entries parsed
//! from them.

use crate::edgar::{Cik, EdgarClient};
use crate::error::{DataError, Result};
use crate::source::{Directory, DirectoryEntry, DirectorySource};
use async_trait::async_trait;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// One parsed company browser page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryPage {
    /// Entries of the rows that carry a CIK
    pub entries: Vec<DirectoryEntry>,
    /// Rows with at least two cells, including rows without a CIK
    pub rows: usize,
}

impl DirectoryPage {
    /// Page where every row yielded an entry.
    pub fn from_entries(entries: Vec<DirectoryEntry>) -> Self {
        Self {
            rows: entries.len(),
            entries,
        }
    }
}

/// Harvests the EDGAR company directory.
#[derive(Debug, Clone)]
pub struct EdgarDirectory {
    client: EdgarClient,
}

impl EdgarDirectory {
    /// Creates a directory source on top of the client.
    pub const fn new(client: EdgarClient) -> Self {
        Self { client }
    }

    /// Fetches and parses one page starting at `offset`.
    ///
    /// # Errors
    ///
    /// Transport and HTTP errors, or `DataError::Parse` if the page cannot be parsed.
    pub async fn fetch_page(
        &self,
        jurisdiction: &str,
        classification: &str,
        offset: usize,
    ) -> Result<DirectoryPage> {
        let config = self.client.config();
        let start = offset.to_string();
        let count = config.page_size.to_string();
        let query = [
            ("action", "getcompany"),
            ("SIC", classification),
            ("State", jurisdiction),
            ("owner", "exclude"),
            ("match", ""),
            ("start", start.as_str()),
            ("count", count.as_str()),
        ];

        let body = self
            .client
            .get_text(&config.directory_url, &query)
            .await?
            .ok_or_else(|| {
                DataError::Http(format!("{} returned HTTP 404", config.directory_url))
            })?;

        parse_directory_page(&body)
    }
}

#[async_trait]
impl DirectorySource for EdgarDirectory {
    async fn list_companies(&self, jurisdiction: &str, classification: &str) -> Result<Directory> {
        let jurisdiction = jurisdiction.trim();
        let classification = classification.trim();
        if jurisdiction.is_empty() {
            return Err(DataError::InvalidParameter("empty state code".to_string()));
        }
        if classification.is_empty() {
            return Err(DataError::InvalidParameter("empty SIC code".to_string()));
        }

        let config = self.client.config();
        let directory = harvest_pages(config.page_size, config.page_delay, |offset| {
            self.fetch_page(jurisdiction, classification, offset)
        })
        .await?;

        info!(
            jurisdiction,
            classification,
            companies = directory.len(),
            "Directory harvested"
        );
        Ok(directory)
    }
}

/// Requests pages at offsets `0, page_size, 2 * page_size, ...` and merges them into one
/// directory.
///
/// Stops after the first page holding fewer than `page_size` rows, even a non-empty one.
/// Sleeps `page_delay` between requests. Entries of later pages replace earlier ones with the
/// same CIK.
pub async fn harvest_pages<F, Fut>(
    page_size: usize,
    page_delay: Duration,
    mut fetch_page: F,
) -> Result<Directory>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<DirectoryPage>>,
{
    let page_size = page_size.max(1);
    let mut directory = Directory::new();
    let mut offset = 0;

    loop {
        let page = fetch_page(offset).await?;
        let rows = page.rows;
        debug!(offset, rows, entries = page.entries.len(), "Directory page");

        directory.extend(page.entries.into_iter().map(|entry| (entry.cik, entry)));

        if rows < page_size {
            break;
        }
        offset += page_size;
        sleep(page_delay).await;
    }

    Ok(directory)
}

/// Parses one company browser page.
///
/// Reads the first `<table>`. Every row with at least two `<td>` cells yields an entry: CIK,
/// name and, when present, location. Cell text stops at the first `<br>`. Rows whose first cell
/// is not a CIK are skipped but still counted in [`DirectoryPage::rows`]. A page without a table
/// yields no entries.
pub fn parse_directory_page(html: &str) -> Result<DirectoryPage> {
    let document = Html::parse_document(html);
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let Some(table) = document.select(&table_selector).next() else {
        return Ok(DirectoryPage::default());
    };

    let mut page = DirectoryPage::default();
    for row in table.select(&row_selector) {
        let cells: Vec<String> = row.select(&cell_selector).map(cell_text).collect();
        if cells.len() < 2 {
            continue;
        }
        page.rows += 1;

        let cik = match cells[0].parse::<Cik>() {
            Ok(cik) => cik,
            Err(_) => {
                debug!(cell = cells[0].as_str(), "Skipping row without CIK");
                continue;
            }
        };

        let location = cells.get(2).filter(|l| !l.is_empty()).cloned();
        page.entries.push(DirectoryEntry::new(cik, cells[1].clone(), location));
    }

    Ok(page)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::Parse(format!("Invalid selector {css}: {e}")))
}

/// Text of a cell up to its first `<br>`, each text fragment trimmed.
fn cell_text(cell: ElementRef<'_>) -> String {
    let mut text = String::new();

    for child in cell.children() {
        match child.value() {
            Node::Element(element) if element.name() == "br" => break,
            Node::Text(fragment) => text.push_str(fragment.trim()),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    text.extend(element.text().map(str::trim));
                }
            }
            _ => {}
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn entry(cik: u64) -> DirectoryEntry {
        let cik = Cik::new(cik).unwrap();
        DirectoryEntry::new(cik, format!("Company {cik}"), Some("NY".to_string()))
    }

    fn page(start: u64, len: usize) -> DirectoryPage {
        DirectoryPage::from_entries((start..start + len as u64).map(entry).collect())
    }

    #[tokio::test]
    async fn test_harvest_stops_on_short_page() {
        let requested = RefCell::new(Vec::new());

        let directory = harvest_pages(100, Duration::ZERO, |offset| {
            requested.borrow_mut().push(offset);
            let entries = match offset {
                0 => page(1, 100),
                100 => page(101, 100),
                _ => page(201, 37),
            };
            async move { Ok(entries) }
        })
        .await
        .unwrap();

        assert_eq!(*requested.borrow(), vec![0, 100, 200]);
        assert_eq!(directory.len(), 237);
    }

    #[tokio::test]
    async fn test_harvest_single_short_page() {
        let calls = RefCell::new(0);

        let directory = harvest_pages(100, Duration::ZERO, |_| {
            *calls.borrow_mut() += 1;
            async { Ok(page(1, 1)) }
        })
        .await
        .unwrap();

        assert_eq!(*calls.borrow(), 1);
        assert_eq!(directory.len(), 1);
    }

    #[tokio::test]
    async fn test_harvest_empty_first_page() {
        let directory = harvest_pages(100, Duration::ZERO, |_| async {
            Ok(DirectoryPage::default())
        })
            .await
            .unwrap();
        assert!(directory.is_empty());
    }

    #[tokio::test]
    async fn test_harvest_later_page_overwrites_duplicate() {
        let directory = harvest_pages(2, Duration::ZERO, |offset| {
            let entries = if offset == 0 {
                page(1, 2)
            } else {
                DirectoryPage::from_entries(vec![DirectoryEntry::new(
                    Cik::new(2).unwrap(),
                    "Renamed",
                    None,
                )])
            };
            async move { Ok(entries) }
        })
        .await
        .unwrap();

        assert_eq!(directory.len(), 2);
        assert_eq!(directory[&Cik::new(2).unwrap()].name, "Renamed");
    }

    #[tokio::test]
    async fn test_harvest_continues_past_row_without_cik() {
        let mut first = String::from("<table>");
        for i in 1..=100 {
            let cik = if i == 50 { "CIK-50".to_string() } else { i.to_string() };
            first.push_str(&format!("<tr><td>{cik}</td><td>Company {i}</td></tr>"));
        }
        first.push_str("</table>");

        let parsed = parse_directory_page(&first).unwrap();
        assert_eq!(parsed.rows, 100);
        assert_eq!(parsed.entries.len(), 99);

        let requested = RefCell::new(Vec::new());
        let directory = harvest_pages(100, Duration::ZERO, |offset| {
            requested.borrow_mut().push(offset);
            let entries = if offset == 0 {
                parsed.clone()
            } else {
                page(101, 3)
            };
            async move { Ok(entries) }
        })
        .await
        .unwrap();

        assert_eq!(*requested.borrow(), vec![0, 100]);
        assert_eq!(directory.len(), 102);
    }

    #[tokio::test]
    async fn test_harvest_propagates_page_error() {
        let result = harvest_pages(100, Duration::ZERO, |_| async {
            Err(DataError::Http("HTTP 503".to_string()))
        })
        .await;
        assert!(matches!(result, Err(DataError::Http(_))));
    }

    #[test]
    fn test_cell_text_stops_at_line_break() {
        let html = r#"<table><tr>
            <td><a href="/cgi-bin/browse-edgar?CIK=0001800">0001800</a></td>
            <td><strong>Acme</strong> Widgets Inc<br>formerly: Acme Corp (until 2019)</td>
            <td>NY</td>
        </tr></table>"#;

        let entries = parse_directory_page(html).unwrap().entries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].cik.to_string(), "0000001800");
        assert_eq!(entries[0].name, "AcmeWidgets Inc");
        assert_eq!(entries[0].location.as_deref(), Some("NY"));
    }
}
