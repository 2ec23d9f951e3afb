use std::time::Duration;

use async_trait::async_trait;
use menu::{LocalRanker, MenuItem, Ranker, RemoteRanker, SearchError, SmartSearch};

fn item(id: &str, name: &str, price: f64, tags: &[&str]) -> MenuItem {
    MenuItem {
        id: id.into(),
        name: name.into(),
        price,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        available: None,
    }
}

fn sample_menu() -> Vec<MenuItem> {
    vec![
        item("a", "Veg Thali", 80.0, &["veg", "meal"]),
        item("b", "Chicken Roll", 60.0, &["non-veg", "chicken", "snack"]),
        item("c", "Paneer Wrap", 70.0, &["veg", "snack"]),
    ]
}

/// Always answers like a proxy that is up but unhappy.
struct UnhappyProxy;

#[async_trait]
impl Ranker for UnhappyProxy {
    async fn rank(
        &self,
        _query: &str,
        _candidates: &[MenuItem],
    ) -> Result<Vec<MenuItem>, SearchError> {
        Err(SearchError::Upstream { status: 503 })
    }
}

/// Always answers with a fixed list, standing in for the model.
struct CannedProxy(Vec<MenuItem>);

#[async_trait]
impl Ranker for CannedProxy {
    async fn rank(
        &self,
        _query: &str,
        _candidates: &[MenuItem],
    ) -> Result<Vec<MenuItem>, SearchError> {
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn transport_failure_falls_back_to_local_ranking() {
    // Nothing listens on the discard port, so the request fails on connect.
    let remote = RemoteRanker::with_timeout(
        "http://127.0.0.1:9/smart-search",
        Duration::from_secs(2),
    );
    let search = SmartSearch::with_remote(remote);

    let menu = sample_menu();
    let results = search.search("cheap veg snack", &menu).await.unwrap();

    assert_eq!(results, LocalRanker.rank("cheap veg snack", &menu));
}

#[tokio::test]
async fn upstream_failure_falls_back_to_local_ranking() {
    let search = SmartSearch::with_remote(UnhappyProxy);

    let menu = sample_menu();
    let results = search.search("non veg snack", &menu).await.unwrap();

    assert_eq!(results, LocalRanker.rank("non veg snack", &menu));
}

#[tokio::test]
async fn successful_remote_answer_is_used_verbatim() {
    let canned = vec![item("b", "Chicken Roll", 60.0, &["non-veg"])];
    let search = SmartSearch::with_remote(CannedProxy(canned.clone()));

    let results = search.search("anything", &sample_menu()).await.unwrap();

    assert_eq!(results, canned);
}

#[tokio::test]
async fn remote_results_are_capped_at_five() {
    let oversized: Vec<MenuItem> = (0..7)
        .map(|i| item(&format!("id{i}"), &format!("Samosa {i}"), 30.0, &["snack"]))
        .collect();
    let body = serde_json::to_string(&oversized).unwrap();

    // One-shot HTTP listener that over-answers the contract.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            // Request body is a JSON object, so this marks the end.
            if request.windows(4).any(|w| w == b"\r\n\r\n") && request.ends_with(b"}") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
    });

    let remote = RemoteRanker::new(format!("http://{addr}/smart-search"));
    let results = remote.rank("samosa", &sample_menu()).await.unwrap();

    assert_eq!(results.len(), 5);
}

#[tokio::test]
async fn empty_query_is_rejected_before_any_ranking() {
    let search = SmartSearch::with_remote(UnhappyProxy);

    let err = search.search("", &sample_menu()).await.unwrap_err();
    assert!(matches!(err, SearchError::Validation(_)));
}

#[tokio::test]
async fn overlong_query_is_rejected_before_any_ranking() {
    let search = SmartSearch::with_remote(UnhappyProxy);
    let query = "a".repeat(101);

    let err = search.search(&query, &sample_menu()).await.unwrap_err();
    assert!(matches!(err, SearchError::Validation(_)));
}
