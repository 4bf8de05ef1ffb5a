//! Generic traversal over cursor-paginated query interfaces.
//!
//! A [`PageSource`] describes one paginated collection through three contract
//! points: how to fetch a page for a cursor, how to extract that page's items,
//! and how to derive the next cursor. A [`Paginator`] drives the source with
//! an explicit loop carrying the running cursor, so arbitrarily long
//! collections never grow the call stack. Pages are fetched strictly
//! sequentially since each fetch depends on the previous page's cursor.

use futures_util::Stream;
use futures_util::stream;

/// A cursor-paginated collection.
///
/// Bounded-ness is the source's contract: a source whose `next_cursor` never
/// yields `None` produces an unbounded traversal.
#[async_trait::async_trait]
pub trait PageSource {
    type Page: Send;
    type Item: Send;
    type Cursor: Send + Sync;
    type Error: Send;

    /// Fetch the page starting after the given cursor, or the first page
    /// when no cursor is supplied.
    async fn fetch_page(
        &mut self,
        cursor: Option<&Self::Cursor>,
    ) -> Result<Self::Page, Self::Error>;

    /// Extract the ordered items from a fetched page.
    fn page_items(&self, page: &Self::Page) -> Vec<Self::Item>;

    /// Derive the cursor for the page after this one. `None` signals that
    /// the collection is exhausted. `previous` is the cursor the page was
    /// fetched with, for sources that advance by stride rather than by the
    /// page's own content.
    fn next_cursor(
        &self,
        previous: Option<&Self::Cursor>,
        page: &Self::Page,
    ) -> Option<Self::Cursor>;
}

/// Lazy, single-pass, forward-only traversal over a [`PageSource`].
///
/// At most one page is in flight or buffered at any time. Consumers pull one
/// batch at a time with [`next_batch`](Paginator::next_batch) and may stop
/// early without causing further fetches. A fetch error is yielded once and
/// exhausts the paginator; no retry or buffering happens at this layer.
pub struct Paginator<S: PageSource> {
    source: S,
    cursor: Option<S::Cursor>,
    exhausted: bool,
}

impl<S: PageSource> Paginator<S> {
    /// Create a paginator that starts from the beginning of the collection.
    #[allow(dead_code)]
    pub fn new(source: S) -> Self {
        Self::with_start(source, None)
    }

    /// Create a paginator that starts after the given cursor.
    pub fn with_start(source: S, start: Option<S::Cursor>) -> Self {
        Self {
            source,
            cursor: start,
            exhausted: false,
        }
    }

    /// Fetch and yield the next batch of items.
    ///
    /// Returns `None` once the source reported an absent next cursor, or
    /// after a fetch error has been yielded.
    pub async fn next_batch(&mut self) -> Option<Result<Vec<S::Item>, S::Error>> {
        if self.exhausted {
            return None;
        }

        let page = match self.source.fetch_page(self.cursor.as_ref()).await {
            Ok(page) => page,
            Err(e) => {
                self.exhausted = true;
                return Some(Err(e));
            }
        };

        let batch = self.source.page_items(&page);

        match self.source.next_cursor(self.cursor.as_ref(), &page) {
            Some(next) => self.cursor = Some(next),
            None => self.exhausted = true,
        }

        Some(Ok(batch))
    }

    /// Drain every remaining batch into one ordered sequence.
    ///
    /// Convenience over [`next_batch`](Paginator::next_batch); fetches pages
    /// until the collection is exhausted or a fetch fails.
    #[allow(dead_code)]
    pub async fn collect_all(mut self) -> Result<Vec<S::Item>, S::Error> {
        let mut items = Vec::new();

        while let Some(batch) = self.next_batch().await {
            items.extend(batch?);
        }

        Ok(items)
    }

    /// Expose the remaining batches as a lazy stream.
    #[allow(dead_code)]
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<S::Item>, S::Error>>
    where
        S: Send,
    {
        stream::unfold(self, |mut paginator| async move {
            paginator.next_batch().await.map(|batch| (batch, paginator))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    /// Source backed by canned pages, counting fetch calls and recording
    /// the cursor each fetch was issued with.
    struct CannedSource {
        pages: Vec<(Vec<u32>, Option<u64>)>,
        fetch_calls: usize,
        fetched_cursors: Vec<Option<u64>>,
        fail_on_call: Option<usize>,
    }

    impl CannedSource {
        fn new(pages: Vec<(Vec<u32>, Option<u64>)>) -> Self {
            Self {
                pages,
                fetch_calls: 0,
                fetched_cursors: Vec::new(),
                fail_on_call: None,
            }
        }
    }

    #[async_trait::async_trait]
    impl PageSource for CannedSource {
        type Page = (Vec<u32>, Option<u64>);
        type Item = u32;
        type Cursor = u64;
        type Error = String;

        async fn fetch_page(&mut self, cursor: Option<&u64>) -> Result<Self::Page, String> {
            if self.fail_on_call == Some(self.fetch_calls) {
                return Err("fetch failed".to_string());
            }
            let page = self.pages[self.fetch_calls].clone();
            self.fetch_calls += 1;
            self.fetched_cursors.push(cursor.copied());
            Ok(page)
        }

        fn page_items(&self, page: &Self::Page) -> Vec<u32> {
            page.0.clone()
        }

        fn next_cursor(&self, _previous: Option<&u64>, page: &Self::Page) -> Option<u64> {
            page.1
        }
    }

    #[tokio::test]
    async fn test_items_concatenate_in_fetch_order() {
        let source = CannedSource::new(vec![
            (vec![1, 2, 3], Some(3)),
            (vec![4, 5], Some(5)),
            (vec![6], None),
        ]);

        let items = Paginator::new(source).collect_all().await.unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_fetch_count_equals_pages_before_absent_cursor() {
        let source = CannedSource::new(vec![(vec![1], Some(1)), (vec![2], None)]);
        let mut paginator = Paginator::new(source);

        let mut batches = 0;
        while let Some(batch) = paginator.next_batch().await {
            batch.unwrap();
            batches += 1;
        }

        assert_eq!(batches, 2);
        assert_eq!(paginator.source.fetch_calls, 2);
        // A further pull must not fetch again.
        assert!(paginator.next_batch().await.is_none());
        assert_eq!(paginator.source.fetch_calls, 2);
    }

    #[tokio::test]
    async fn test_cursor_threads_through_sequential_fetches() {
        let source = CannedSource::new(vec![
            (vec![1], Some(10)),
            (vec![2], Some(20)),
            (vec![3], None),
        ]);
        let mut paginator = Paginator::new(source);

        while let Some(batch) = paginator.next_batch().await {
            batch.unwrap();
        }

        assert_eq!(paginator.source.fetched_cursors, vec![None, Some(10), Some(20)]);
    }

    #[tokio::test]
    async fn test_with_start_passes_initial_cursor() {
        let source = CannedSource::new(vec![(vec![1], None)]);
        let mut paginator = Paginator::with_start(source, Some(42));

        paginator.next_batch().await.unwrap().unwrap();

        assert_eq!(paginator.source.fetched_cursors, vec![Some(42)]);
    }

    #[tokio::test]
    async fn test_single_page_without_next_cursor_terminates() {
        let source = CannedSource::new(vec![(vec![7, 8], None)]);
        let mut paginator = Paginator::new(source);

        assert_eq!(paginator.next_batch().await.unwrap().unwrap(), vec![7, 8]);
        assert!(paginator.next_batch().await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_error_propagates_and_exhausts() {
        let mut source = CannedSource::new(vec![(vec![1], Some(1)), (vec![2], None)]);
        source.fail_on_call = Some(1);
        let mut paginator = Paginator::new(source);

        assert_eq!(paginator.next_batch().await.unwrap().unwrap(), vec![1]);
        assert_eq!(
            paginator.next_batch().await.unwrap().unwrap_err(),
            "fetch failed"
        );
        assert!(paginator.next_batch().await.is_none());
    }

    #[tokio::test]
    async fn test_early_stop_fetches_no_further_pages() {
        let source = CannedSource::new(vec![
            (vec![1], Some(1)),
            (vec![2], Some(2)),
            (vec![3], None),
        ]);
        let mut paginator = Paginator::new(source);

        paginator.next_batch().await.unwrap().unwrap();

        assert_eq!(paginator.source.fetch_calls, 1);
    }

    #[tokio::test]
    async fn test_stream_adapter_yields_batches_lazily() {
        let source = CannedSource::new(vec![(vec![1, 2], Some(2)), (vec![3], None)]);
        let stream = Paginator::new(source).into_stream();
        tokio::pin!(stream);

        assert_eq!(stream.next().await.unwrap().unwrap(), vec![1, 2]);
        assert_eq!(stream.next().await.unwrap().unwrap(), vec![3]);
        assert!(stream.next().await.is_none());
    }
}
