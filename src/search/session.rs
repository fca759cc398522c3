use crate::search::{ImageProvider, ImageRecord, ProviderId, ProviderRegistry, SearchError};
use std::sync::Arc;

/// Search session state: query text, selected provider, current results and
/// the in-flight marker.
///
/// The session never performs network work itself. [`SearchSession::begin_search`]
/// validates the request and hands out a [`SearchTicket`]; the caller runs the
/// ticket (typically on a spawned task) and feeds the outcome back through
/// [`SearchSession::complete`].
///
/// Overlapping searches are allowed. Every search gets a fresh sequence
/// number and only the completion matching the most recent one is applied;
/// anything else is discarded as stale. This replaces the last-response-wins
/// race a naive shared flag would have.
pub struct SearchSession {
    /// Currently selected provider
    pub provider: ProviderId,
    /// Text of the most recently submitted search
    pub query: String,
    /// Results of the most recent successful search, in provider order
    pub results: Vec<ImageRecord>,
    /// Sequence number of the search awaiting a response, if any
    in_flight: Option<u64>,
    /// Monotonic counter tagging each search
    next_seq: u64,
}

/// Everything needed to run one search outside the session
#[derive(Debug)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
    pub provider: Arc<dyn ImageProvider>,
}

impl SearchTicket {
    /// Perform the provider call, yielding the tagged outcome
    pub async fn run(self) -> (u64, Result<Vec<ImageRecord>, SearchError>) {
        let outcome = self.provider.search(&self.query).await;
        (self.seq, outcome)
    }
}

impl SearchSession {
    pub fn new(provider: ProviderId) -> Self {
        Self {
            provider,
            query: String::new(),
            results: Vec::new(),
            in_flight: None,
            next_seq: 0,
        }
    }

    /// True from search start until the matching completion arrives
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn select_provider(&mut self, provider: ProviderId) {
        self.provider = provider;
    }

    /// Start a search against the selected provider.
    ///
    /// A blank query is rejected without touching session state. On success
    /// the previous results are cleared immediately, not on completion.
    pub fn begin_search(
        &mut self,
        registry: &ProviderRegistry,
        query: &str,
    ) -> Result<SearchTicket, SearchError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let provider = registry.get(self.provider)?;

        self.query = trimmed.to_string();
        self.results.clear();
        self.next_seq += 1;
        self.in_flight = Some(self.next_seq);

        tracing::debug!(
            seq = self.next_seq,
            provider = self.provider.as_str(),
            query = %self.query,
            "search started"
        );

        Ok(SearchTicket {
            seq: self.next_seq,
            query: self.query.clone(),
            provider,
        })
    }

    /// Apply a search outcome.
    ///
    /// Returns `None` when the outcome belongs to a superseded search and was
    /// discarded. Otherwise clears the in-flight marker and returns the
    /// result count on success, or the error for the caller to surface.
    pub fn complete(
        &mut self,
        seq: u64,
        outcome: Result<Vec<ImageRecord>, SearchError>,
    ) -> Option<Result<usize, SearchError>> {
        if self.in_flight != Some(seq) {
            tracing::debug!(seq, "discarding stale search response");
            return None;
        }

        self.in_flight = None;
        match outcome {
            Ok(records) => {
                let count = records.len();
                self.results = records;
                Some(Ok(count))
            }
            Err(err) => {
                tracing::warn!(seq, error = %err, "search failed");
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider double that counts calls and returns a canned batch
    struct StubProvider {
        id: ProviderId,
        calls: AtomicUsize,
        records: Vec<ImageRecord>,
    }

    impl StubProvider {
        fn new(id: ProviderId, records: Vec<ImageRecord>) -> Self {
            Self {
                id,
                calls: AtomicUsize::new(0),
                records,
            }
        }
    }

    #[async_trait::async_trait]
    impl ImageProvider for StubProvider {
        fn id(&self) -> ProviderId {
            self.id
        }

        async fn search(&self, _query: &str) -> Result<Vec<ImageRecord>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.records.clone())
        }
    }

    fn record(id: &str) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            url: format!("https://img.test/{id}.jpg"),
            alt_text: "a test image".to_string(),
            attribution: "tester".to_string(),
            original_url: format!("https://img.test/{id}"),
            source_name: "Pixabay".to_string(),
        }
    }

    fn registry_with(stub: Arc<StubProvider>) -> ProviderRegistry {
        ProviderRegistry::with_providers(vec![stub])
    }

    #[test]
    fn test_blank_query_rejected_without_state_change() {
        let stub = Arc::new(StubProvider::new(ProviderId::Pixabay, vec![record("1")]));
        let registry = registry_with(stub.clone());
        let mut session = SearchSession::new(ProviderId::Pixabay);

        for query in ["", "   ", "\t\n"] {
            let err = session.begin_search(&registry, query).unwrap_err();
            assert!(matches!(err, SearchError::EmptyQuery));
        }

        assert!(!session.is_loading());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_loading_flag_spans_exactly_one_search() {
        let stub = Arc::new(StubProvider::new(
            ProviderId::Pixabay,
            vec![record("1"), record("2")],
        ));
        let registry = registry_with(stub);
        let mut session = SearchSession::new(ProviderId::Pixabay);

        assert!(!session.is_loading());

        let ticket = session.begin_search(&registry, "  nature  ").unwrap();
        assert!(session.is_loading());
        assert_eq!(session.query, "nature");
        assert!(session.results.is_empty());

        let (seq, outcome) = ticket.run().await;
        let applied = session.complete(seq, outcome).unwrap();
        assert_eq!(applied.unwrap(), 2);
        assert!(!session.is_loading());
        assert_eq!(session.results.len(), 2);
    }

    #[test]
    fn test_failure_clears_loading_and_keeps_results_empty() {
        let stub = Arc::new(StubProvider::new(ProviderId::Pixabay, vec![record("1")]));
        let registry = registry_with(stub);
        let mut session = SearchSession::new(ProviderId::Pixabay);

        let ticket = session.begin_search(&registry, "nature").unwrap();
        let applied = session
            .complete(
                ticket.seq,
                Err(SearchError::RequestFailed {
                    provider: "Pixabay",
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                }),
            )
            .unwrap();

        assert!(applied.is_err());
        assert!(!session.is_loading());
        assert!(session.results.is_empty());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let stub = Arc::new(StubProvider::new(ProviderId::Pixabay, vec![]));
        let registry = registry_with(stub);
        let mut session = SearchSession::new(ProviderId::Pixabay);

        let first = session.begin_search(&registry, "cats").unwrap();
        let second = session.begin_search(&registry, "dogs").unwrap();

        // First search finishes after the second one started; it must not win.
        assert!(session
            .complete(first.seq, Ok(vec![record("stale")]))
            .is_none());
        assert!(session.is_loading());
        assert!(session.results.is_empty());

        let applied = session
            .complete(second.seq, Ok(vec![record("fresh")]))
            .unwrap();
        assert_eq!(applied.unwrap(), 1);
        assert_eq!(session.results[0].id, "fresh");
        assert!(!session.is_loading());
    }

    #[test]
    fn test_unregistered_provider_never_searches() {
        let stub = Arc::new(StubProvider::new(ProviderId::Pixabay, vec![record("1")]));
        let registry = registry_with(stub.clone());
        let mut session = SearchSession::new(ProviderId::Pexels);

        let err = session.begin_search(&registry, "nature").unwrap_err();
        assert!(matches!(err, SearchError::UnknownProvider(_)));
        assert!(!session.is_loading());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }
}
