//! OpenAI-compatible embedder against a local mock server.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use layercut_core::{ChunkConfig, RecursiveChunker};
use layercut_ingest::{Embedder, EmbeddingError, IngestPipeline, OpenAiEmbedder};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

/// Answers with items in reverse order; each vector is `[index, input chars, 0.5]`.
async fn reversed_embeddings(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    recorded.requests.lock().unwrap().push((auth, body.clone()));

    let inputs = body["input"].as_array().cloned().unwrap_or_default();
    let data: Vec<Value> = inputs
        .iter()
        .enumerate()
        .rev()
        .map(|(i, text)| {
            let chars = text.as_str().unwrap_or("").chars().count();
            json!({ "object": "embedding", "index": i, "embedding": [i as f32, chars as f32, 0.5] })
        })
        .collect();
    Json(json!({ "object": "list", "data": data, "model": body["model"] }))
}

/// Claims index 0 for every input.
async fn duplicate_indices(Json(body): Json<Value>) -> Json<Value> {
    let count = body["input"].as_array().map_or(0, Vec::len);
    let data: Vec<Value> = (0..count)
        .map(|i| json!({ "object": "embedding", "index": 0, "embedding": [i as f32] }))
        .collect();
    Json(json!({ "object": "list", "data": data }))
}

async fn unauthorized() -> (StatusCode, &'static str) {
    (StatusCode::UNAUTHORIZED, "invalid api key")
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn mock_server() -> (SocketAddr, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/v1/embeddings", post(reversed_embeddings))
        .with_state(recorded.clone());
    (spawn(app).await, recorded)
}

fn embedder(addr: SocketAddr, api_key: Option<&str>, dimensions: Option<usize>) -> OpenAiEmbedder {
    OpenAiEmbedder::new(
        "nomic-embed-text".to_string(),
        api_key.map(str::to_string),
        Some(format!("http://{addr}/v1/")),
        dimensions,
    )
}

#[tokio::test]
async fn vectors_come_back_in_input_order() {
    let (addr, recorded) = mock_server().await;
    let embedder = embedder(addr, None, Some(3));

    let vectors = embedder.embed_batch(&["one", "three", "ab"]).await.unwrap();
    assert_eq!(vectors[0], vec![0.0, 3.0, 0.5]);
    assert_eq!(vectors[1], vec![1.0, 5.0, 0.5]);
    assert_eq!(vectors[2], vec![2.0, 2.0, 0.5]);

    let requests = recorded.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert!(auth.is_none());
    assert_eq!(body["model"], "nomic-embed-text");
    assert_eq!(body["input"], json!(["one", "three", "ab"]));
}

#[tokio::test]
async fn api_key_is_sent_as_bearer_token() {
    let (addr, recorded) = mock_server().await;
    let embedder = embedder(addr, Some("sk-test"), None);

    let vector = embedder.embed("hello").await.unwrap();
    assert_eq!(vector, vec![0.0, 5.0, 0.5]);

    let requests = recorded.requests.lock().unwrap();
    assert_eq!(requests[0].0.as_deref(), Some("Bearer sk-test"));
}

#[tokio::test]
async fn error_status_is_reported() {
    let addr = spawn(Router::new().route("/v1/embeddings", post(unauthorized))).await;
    let embedder = embedder(addr, Some("wrong"), None);

    let err = embedder.embed_batch(&["x"]).await.unwrap_err();
    match err {
        EmbeddingError::Api(msg) => {
            assert!(msg.contains("401"), "{msg}");
            assert!(msg.contains("invalid api key"), "{msg}");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_response_indices_are_rejected() {
    let addr = spawn(Router::new().route("/v1/embeddings", post(duplicate_indices))).await;
    let embedder = embedder(addr, None, None);

    let err = embedder.embed_batch(&["first", "second"]).await.unwrap_err();
    match err {
        EmbeddingError::Api(msg) => assert!(msg.contains("expected indices 0..2"), "{msg}"),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_dimensions_are_rejected() {
    let (addr, _) = mock_server().await;
    let embedder = embedder(addr, None, Some(768));

    let err = embedder.embed_batch(&["x"]).await.unwrap_err();
    assert!(matches!(
        err,
        EmbeddingError::DimensionMismatch { expected: 768, actual: 3 }
    ));
}

#[tokio::test]
async fn pipeline_embeds_a_text_file() {
    let (addr, recorded) = mock_server().await;
    let chunker = RecursiveChunker::new(ChunkConfig::new(12, 0));
    let pipeline = IngestPipeline::new(chunker, Arc::new(embedder(addr, None, Some(3))), 2, 32);

    let text = "First line.\n\nSecond line.\n\nThird.";
    let out = pipeline.run(text.as_bytes(), "notes.txt").await.unwrap();

    let contents: Vec<&str> = out.iter().map(|e| e.chunk.content.as_str()).collect();
    assert_eq!(contents, vec!["First line.", "Second line.", "Third."]);
    assert_eq!(out[1].embedding, vec![1.0, 12.0, 0.5]);
    // Third chunk is alone in the second batch.
    assert_eq!(out[2].embedding, vec![0.0, 6.0, 0.5]);
    assert_eq!(recorded.requests.lock().unwrap().len(), 2);

    let line = serde_json::to_value(&out[0]).unwrap();
    assert_eq!(line["index"], 0);
    assert_eq!(line["page_number"], 1);
    assert_eq!(line["char_count"], 11);
    assert_eq!(line["content"], "First line.");
    assert_eq!(line["embedding"], json!([0.0, 11.0, 0.5]));
}
