//! Tools for running tests

use crate::utils::{fixtures, metrics::MetricsWatcher};
use oboro_settings::Settings;
use oboro_stores::{
    MemoryAnswerHistory, MemoryMetadata, MemoryQueryLog, MemoryQuestionBank, MemoryVocabulary,
};
use oboro_suggest_traits::StoreSet;
use reqwest::{redirect, Client, ClientBuilder, RequestBuilder};
use std::{future::Future, net::TcpListener, sync::Arc};
use tracing_futures::{Instrument, WithSubscriber};
use tracing_subscriber::EnvFilter;

/// Run a test with a fully configured Oboro server.
///
/// The server will listen on a port assigned arbitrarily by the OS, and its
/// stores hold the data from [`fixtures`].
///
/// A suite of tools will be passed to the test function in the form of an
/// instance of [`TestingTools`]. It includes an HTTP client configured to use
/// the test server, a metrics collector, and handles to the stores the server
/// writes to.
///
/// # Example
///
/// ```
/// # use oboro_integration_tests::{oboro_test, TestingTools};
/// #[actix_rt::test]
/// async fn a_test() {
///     oboro_test(
///         |settings| settings.debug = false,
///         |TestingTools { test_client, .. }| async move {
///             assert!(true) // Test goes here
///         }
///     ).await
/// }
/// ```
///
/// # Panics
/// May panic if tests could not be set up correctly.
pub async fn oboro_test<FSettings, FTest, Fut>(settings_changer: FSettings, test: FTest) -> Fut::Output
where
    FSettings: FnOnce(&mut Settings),
    FTest: Fn(TestingTools) -> Fut,
    Fut: Future,
{
    let test_span = tracing::info_span!("oboro_test");

    let settings = Settings::load_for_tests(settings_changer);

    // Set up logging
    let env_filter: EnvFilter = (&settings.logging.levels).into();
    let tracing_subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .finish();
    let _tracing_subscriber_guard = tracing::subscriber::set_default(tracing_subscriber);

    // Setup metrics
    let (metrics_watcher, metrics_client) = MetricsWatcher::new_with_client();

    // Set up stores, keeping handles to the ones the server writes to
    let answer_history = Arc::new(MemoryAnswerHistory::default());
    let query_log = Arc::new(MemoryQueryLog::default());
    let metadata = Arc::new(MemoryMetadata::new(fixtures::metadata()));
    let stores = StoreSet {
        vocabulary: Arc::new(MemoryVocabulary::new(fixtures::terms())),
        questions: Arc::new(MemoryQuestionBank::new(fixtures::questions())),
        metadata: metadata.clone(),
        answers: answer_history.clone(),
        queries: query_log.clone(),
    };

    // Run server in the background
    let listener = TcpListener::bind(settings.http.listen).expect("Failed to bind to a port");
    let address = listener.local_addr().unwrap().to_string();
    let server = oboro_web::run(listener, settings, metrics_client, stores)
        .expect("Failed to start server");
    let server_handle = tokio::spawn(server.with_current_subscriber());
    let test_client = TestReqwestClient::new(address);

    // Assemble the tools
    let tools = TestingTools {
        test_client,
        metrics_watcher,
        answer_history,
        query_log,
        metadata,
    };
    // Run the test
    let rv = test(tools).instrument(test_span).await;
    server_handle.abort();
    rv
}

/// A set of tools for tests, including mock servers and logging helpers.
///
/// The fields of this struct are marked as non-exhaustive, meaning that any
/// destructuring of this struct will require a `..` "and the rest" entry, even
/// if all present items are named. This makes adding tools in the future easier,
/// since old tests won't need to be rewritten to account for the added tools.
#[non_exhaustive]
pub struct TestingTools {
    /// A wrapper around a `reqwest::client` that automatically uses the Oboro
    /// server under test.
    pub test_client: TestReqwestClient,

    /// To make assertions about metrics.
    pub metrics_watcher: MetricsWatcher,

    /// The answer history the server records to.
    pub answer_history: Arc<MemoryAnswerHistory>,

    /// The query log the server records to.
    pub query_log: Arc<MemoryQueryLog>,

    /// The resource metadata the server reads and records favorites to.
    pub metadata: Arc<MemoryMetadata>,
}

/// A wrapper around a `[reqwest::client]` that automatically sends requests to
/// the test server.
///
/// The client is configured to not follow any redirects.
pub struct TestReqwestClient {
    /// The wrapped client.
    client: Client,

    /// The server address to implicitly use for all requests.
    address: String,
}

impl TestReqwestClient {
    /// Construct a new test client that uses `address` for every request given.
    pub fn new(address: String) -> Self {
        let client = ClientBuilder::new()
            .redirect(redirect::Policy::none())
            .build()
            .expect("Could not build test client");
        Self { client, address }
    }

    /// Build the full URL for `path`, which should start with `/`.
    fn url(&self, path: &str) -> String {
        assert!(path.starts_with('/'));
        format!("http://{}{}", &self.address, path)
    }

    /// Start building a GET request to the test server with the path specified.
    ///
    /// The path should start with `/`, such as `/__heartbeat__`.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    /// Start building a POST request to the test server with the path specified.
    ///
    /// The path should start with `/`, such as `/api/v1/question`.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }
}
