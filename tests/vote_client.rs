use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use utility_filter::votes::{VoteCache, VoteClient, VoteData, VoteError};

#[derive(Deserialize)]
struct VotesQuery {
    #[serde(rename = "videoId")]
    video_id: String,
}

#[derive(Clone)]
struct Upstream {
    hits: Arc<AtomicUsize>,
    delay: Duration,
}

async fn votes(
    State(upstream): State<Upstream>,
    Query(query): Query<VotesQuery>,
) -> Result<Json<VoteData>, (StatusCode, String)> {
    upstream.hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(upstream.delay).await;
    if query.video_id == "missing" {
        return Err((StatusCode::NOT_FOUND, "Not Found".to_string()));
    }
    Ok(Json(VoteData {
        likes: 9_000,
        dislikes: 1_000,
        view_count: 500_000,
    }))
}

async fn spawn_upstream(delay: Duration) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new().route("/Votes", get(votes)).with_state(Upstream {
        hits: hits.clone(),
        delay,
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), hits)
}

fn client(endpoint: String, ttl: Duration) -> VoteClient {
    VoteClient::new(endpoint, Duration::from_secs(5), ttl).unwrap()
}

#[tokio::test]
async fn decodes_vote_payload() {
    let (endpoint, _) = spawn_upstream(Duration::ZERO).await;
    let votes = client(endpoint, Duration::from_secs(60))
        .fetch("dQw4w9WgXcQ")
        .await
        .unwrap();
    assert_eq!(
        votes,
        VoteData {
            likes: 9_000,
            dislikes: 1_000,
            view_count: 500_000
        }
    );
}

#[tokio::test]
async fn repeated_lookups_within_ttl_hit_cache() {
    let (endpoint, hits) = spawn_upstream(Duration::ZERO).await;
    let client = client(endpoint, Duration::from_secs(60));
    for _ in 0..3 {
        client.fetch("abc").await.unwrap();
    }
    client.fetch("  abc  ").await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    client.fetch("other").await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(client.cache().len().await, 2);
}

#[tokio::test]
async fn concurrent_lookups_share_one_request() {
    let (endpoint, hits) = spawn_upstream(Duration::from_millis(200)).await;
    let client = client(endpoint, Duration::from_secs(60));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move { client.fetch("shared").await }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().likes, 9_000);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn expired_entries_are_refetched() {
    let (endpoint, hits) = spawn_upstream(Duration::ZERO).await;
    let client = client(endpoint, Duration::ZERO);
    client.fetch("abc").await.unwrap();
    client.fetch("abc").await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(client.cache().purge_expired().await, 1);
    assert_eq!(client.cache().len().await, 0);
}

#[tokio::test]
async fn upstream_errors_are_reported_and_not_cached() {
    let (endpoint, hits) = spawn_upstream(Duration::ZERO).await;
    let client = client(endpoint, Duration::from_secs(60));

    for _ in 0..2 {
        match client.fetch("missing").await {
            Err(VoteError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "Not Found");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(client.cache().len().await, 0);
}

#[tokio::test]
async fn failed_lookups_leave_no_slots() {
    let cache = VoteCache::new(Duration::from_secs(60));
    for id in 0..1_000 {
        let key = format!("video-{}", id);
        let result = cache
            .get_or_fetch(&key, || async { Err::<VoteData, _>(VoteError::InvalidId(String::new())) })
            .await;
        assert!(result.is_err());
    }
    assert_eq!(cache.len().await, 0);

    let votes = cache
        .get_or_fetch("video-0", || async {
            Ok::<_, VoteError>(VoteData {
                likes: 1,
                dislikes: 0,
                view_count: 10,
            })
        })
        .await
        .unwrap();
    assert_eq!(votes.likes, 1);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn sweeper_drops_expired_slots() {
    let cache = Arc::new(VoteCache::new(Duration::ZERO));
    for id in ["a", "b", "c"] {
        cache
            .get_or_fetch(id, || async {
                Ok::<_, VoteError>(VoteData {
                    likes: 0,
                    dislikes: 0,
                    view_count: 0,
                })
            })
            .await
            .unwrap();
    }
    assert_eq!(cache.len().await, 3);

    let sweeper = cache.spawn_sweeper(Duration::ZERO);
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(cache.len().await, 0);
    sweeper.abort();
}

#[tokio::test]
async fn blank_ids_are_rejected_without_a_request() {
    let (endpoint, hits) = spawn_upstream(Duration::ZERO).await;
    let client = client(endpoint, Duration::from_secs(60));
    assert!(matches!(client.fetch("   ").await, Err(VoteError::InvalidId(_))));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreachable_service_is_a_request_error() {
    let client = client("http://127.0.0.1:1".to_string(), Duration::from_secs(60));
    assert!(matches!(client.fetch("abc").await, Err(VoteError::Request(_))));
}
