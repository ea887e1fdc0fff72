//! Friends-list demo binary
//!
//! Walks the canonical fetch lifecycle against a local mock server: one
//! successful fetch, then a transport failure, printing every action a
//! store would receive.

use fetchkit_core::{make_fetcher, Dispatch, FetchAction, FetcherConfig, HttpTransport};
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A stand-in store front-end that prints each dispatched action.
struct PrintingStore;

impl Dispatch<String> for PrintingStore {
    fn dispatch(&self, action: FetchAction<String>) {
        match (action.result(), action.error()) {
            (Some(result), _) => println!("  {} key={} result={result:?}", action.kind(), action.key()),
            (_, Some(error)) => println!("  {} key={} error={error}", action.kind(), action.key()),
            _ => println!("  {} key={}", action.kind(), action.key()),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "friends_demo=debug,fetchkit_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Friends Demo: Fetch Lifecycle Actions ===\n");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alice/friends/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["bob", "carol"])))
        .mount(&server)
        .await;

    let base = server.uri();
    let fetch_friends = make_fetcher("FETCH_FRIENDS", move |_success: fetchkit_core::SuccessDispatch<String>| {
        let base = base.clone();
        FetcherConfig::new(move |key: &String| format!("{base}/api/{key}/friends/"))
    })
    .with_transport(Arc::new(HttpTransport::new()));

    let dispatch: Arc<dyn Dispatch<String>> = Arc::new(PrintingStore);

    println!(">>> Fetching friends for key \"alice\"");
    fetch_friends
        .run("alice".to_string(), Arc::clone(&dispatch))
        .await;

    // Same family, but pointed at a port with nothing listening.
    let broken = make_fetcher("FETCH_FRIENDS", |_success: fetchkit_core::SuccessDispatch<String>| {
        FetcherConfig::new(|key: &String| format!("http://127.0.0.1:9/api/{key}/friends/"))
    })
    .with_transport(Arc::new(HttpTransport::new()));

    println!("\n>>> Fetching friends against a dead endpoint");
    broken.run("alice".to_string(), dispatch).await;

    println!("\nDone.");
}
