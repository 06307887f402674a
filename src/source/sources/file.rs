//! Pages over the non-empty lines of a local text file.
//!
//! The file is re-read on every fetch so edits show up after a reload. An
//! optional latency makes the loading state visible when browsing small files.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio_util::sync::CancellationToken;

use crate::source::{Entry, FetchError, Page, PageSource};

pub struct FileSource {
    path: PathBuf,
    page_size: usize,
    latency: Duration,
    label: String,
}

impl FileSource {
    pub fn new(path: PathBuf, page_size: usize) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            label: format!("Loading {name}..."),
            path,
            page_size: page_size.max(1),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// Slices one page out of the file's lines.
fn page_of(contents: &str, start_index: usize, page_size: usize) -> Page<Entry> {
    let lines: Vec<&str> = contents
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect();

    let items: Vec<Entry> = lines
        .iter()
        .skip(start_index)
        .take(page_size)
        .map(|l| Entry::new(*l))
        .collect();

    let next_start = start_index + items.len();
    Page::new(items, next_start < lines.len(), next_start)
}

#[async_trait]
impl PageSource<Entry> for FileSource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn fetch(
        &self,
        start_index: usize,
        cancel: &CancellationToken,
    ) -> Result<Page<Entry>, FetchError> {
        if !self.latency.is_zero() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(FetchError::Cancelled),
                _ = tokio::time::sleep(self.latency) => {}
            }
        }

        let contents = tokio::fs::read_to_string(&self.path).await?;
        let page = page_of(&contents, start_index, self.page_size);
        debug!(
            "{}: start={} returned {} lines (has_more={})",
            self.path.display(),
            start_index,
            page.items.len(),
            page.has_more
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(page: &Page<Entry>) -> Vec<&str> {
        page.items.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_page_of_skips_blank_lines() {
        let page = page_of("a\n\n  \nb\nc\n", 0, 2);
        assert_eq!(titles(&page), vec!["a", "b"]);
        assert!(page.has_more);
        assert_eq!(page.next_start, 2);
    }

    #[test]
    fn test_page_of_last_page() {
        let page = page_of("a\nb\nc", 2, 2);
        assert_eq!(titles(&page), vec!["c"]);
        assert!(!page.has_more);
        assert_eq!(page.next_start, 3);
    }

    #[test]
    fn test_page_of_exact_boundary_has_no_more() {
        let page = page_of("a\nb", 0, 2);
        assert_eq!(page.items.len(), 2);
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_of_empty_file() {
        let page = page_of("", 0, 10);
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_label_uses_file_name() {
        let source = FileSource::new(PathBuf::from("/tmp/some/list.txt"), 5);
        assert_eq!(source.label(), "Loading list.txt...");
    }

    #[tokio::test]
    async fn test_fetch_reads_file() {
        let path = std::env::temp_dir().join(format!("pagewise-file-{}.txt", std::process::id()));
        tokio::fs::write(&path, "one\ntwo\nthree\n").await.unwrap();

        let source = FileSource::new(path.clone(), 2);
        let first = source.fetch(0, &CancellationToken::new()).await.unwrap();
        let second = source
            .fetch(first.next_start, &CancellationToken::new())
            .await
            .unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(titles(&first), vec!["one", "two"]);
        assert!(first.has_more);
        assert_eq!(titles(&second), vec!["three"]);
        assert!(!second.has_more);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = FileSource::new(PathBuf::from("/definitely/not/here.txt"), 2);
        let result = source.fetch(0, &CancellationToken::new()).await;
        assert!(matches!(result, Err(FetchError::Io(_))));
    }

    #[tokio::test]
    async fn test_latency_observes_cancellation() {
        let source = FileSource::new(PathBuf::from("/definitely/not/here.txt"), 2)
            .with_latency(Duration::from_secs(60));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = source.fetch(0, &cancel).await;
        assert!(matches!(result, Err(FetchError::Cancelled)));
    }
}
