use anyhow::Result;
use ingest_log::adapters::http;
use ingest_log::{FileSink, IngestService, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::oneshot;

struct TestServer {
    addr: SocketAddr,
    matrix_log: PathBuf,
    timestamp_log: PathBuf,
    shutdown: Option<oneshot::Sender<()>>,
    _temp_dir: TempDir,
}

impl TestServer {
    async fn start() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let matrix_log = temp_dir.path().join("matrices_log_ui.txt");
        let timestamp_log = temp_dir.path().join("timestamp_log_ui.txt");

        let router = Arc::new(Router::new(IngestService::new(
            FileSink::open(&matrix_log)?,
            FileSink::open(&timestamp_log)?,
        )));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            http::serve(listener, router, shutdown).await
        });

        Ok(Self {
            addr,
            matrix_log,
            timestamp_log,
            shutdown: Some(tx),
            _temp_dir: temp_dir,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    fn matrix_log(&self) -> String {
        std::fs::read_to_string(&self.matrix_log).unwrap_or_default()
    }

    fn timestamp_log(&self) -> String {
        std::fs::read_to_string(&self.timestamp_log).unwrap_or_default()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn post_json(url: &str, body: &Value) -> Result<(u16, Value)> {
    let response = reqwest::Client::new().post(url).json(body).send().await?;
    let status = response.status().as_u16();
    let body = response.json::<Value>().await?;
    Ok((status, body))
}

#[tokio::test]
async fn test_receive_matrix_logs_both_tables() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, body) = post_json(
        &server.url("/receive_matrix"),
        &json!({"originalMatrix": [[1, 2], [3, 4]], "transformedMatrix": [[2, 4], [6, 8]]}),
    )
    .await?;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"message": "Matrices received and logged successfully"})
    );

    let expected = "\
Original Matrix:

╒═══╤═══╕
│ 1 │ 2 │
├───┼───┤
│ 3 │ 4 │
╘═══╧═══╛

Transformed Matrix:

╒═══╤═══╕
│ 2 │ 4 │
├───┼───┤
│ 6 │ 8 │
╘═══╧═══╛

";
    assert_eq!(server.matrix_log(), expected);
    assert_eq!(server.timestamp_log(), "");
    Ok(())
}

#[tokio::test]
async fn test_receive_matrix_missing_keys() -> Result<()> {
    let server = TestServer::start().await?;

    for payload in [
        json!({"foo": "bar"}),
        json!({"originalMatrix": [[1]]}),
        json!({"transformedMatrix": [[1]]}),
    ] {
        let (status, body) = post_json(&server.url("/receive_matrix"), &payload).await?;
        assert_eq!(status, 400);
        assert_eq!(
            body,
            json!({"error": "Invalid data format. Expected 'originalMatrix' and 'transformedMatrix' keys."})
        );
    }

    assert_eq!(server.matrix_log(), "");
    Ok(())
}

#[tokio::test]
async fn test_receive_matrix_mismatched_shapes_accepted() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, _) = post_json(
        &server.url("/receive_matrix"),
        &json!({"originalMatrix": [[1, 2, 3]], "transformedMatrix": [["x"], [1.5, null]]}),
    )
    .await?;

    assert_eq!(status, 200);
    let log = server.matrix_log();
    assert!(log.contains("│ 1 │ 2 │ 3 │"));
    assert!(log.contains("│ x   │  │"));
    Ok(())
}

#[tokio::test]
async fn test_receive_timestamp_appends_one_line_per_request() -> Result<()> {
    let server = TestServer::start().await?;

    for _ in 0..2 {
        let (status, body) = post_json(
            &server.url("/receive_timestamp"),
            &json!({"timestamp": "2024-01-01T00:00:00Z"}),
        )
        .await?;
        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({"message": "Timestamp received and logged successfully"})
        );
    }

    let (status, _) = post_json(
        &server.url("/receive_timestamp"),
        &json!({"timestamp": 1704067200}),
    )
    .await?;
    assert_eq!(status, 200);

    assert_eq!(
        server.timestamp_log(),
        "2024-01-01T00:00:00Z\n2024-01-01T00:00:00Z\n1704067200\n"
    );
    assert_eq!(server.matrix_log(), "");
    Ok(())
}

#[tokio::test]
async fn test_receive_timestamp_missing_key() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, body) =
        post_json(&server.url("/receive_timestamp"), &json!({"time": "now"})).await?;

    assert_eq!(status, 400);
    assert_eq!(
        body,
        json!({"error": "Invalid data format. Expected 'timestamp' key."})
    );
    assert_eq!(server.timestamp_log(), "");
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_and_unknown_routes() -> Result<()> {
    let server = TestServer::start().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/receive_timestamp"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 400);

    let response = client.get(server.url("/receive_matrix")).send().await?;
    assert_eq!(response.status().as_u16(), 405);

    let response = client.post(server.url("/elsewhere")).send().await?;
    assert_eq!(response.status().as_u16(), 404);

    let response = client.get(server.url("/health")).send().await?;
    assert_eq!(response.status().as_u16(), 200);
    let body = response.json::<Value>().await?;
    assert_eq!(body["status"], "healthy");

    assert_eq!(server.timestamp_log(), "");
    assert_eq!(server.matrix_log(), "");
    Ok(())
}

#[tokio::test]
async fn test_concurrent_matrix_blocks_stay_contiguous() -> Result<()> {
    let server = TestServer::start().await?;
    let url = server.url("/receive_matrix");

    let mut handles = Vec::new();
    for i in 0..8 {
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            post_json(
                &url,
                &json!({"originalMatrix": [[i]], "transformedMatrix": [[i * 10]]}),
            )
            .await
        }));
    }
    for handle in handles {
        let (status, _) = handle.await??;
        assert_eq!(status, 200);
    }

    let log = server.matrix_log();
    let labels: Vec<&str> = log
        .lines()
        .filter(|line| line.ends_with("Matrix:"))
        .collect();
    assert_eq!(labels.len(), 16);
    for pair in labels.chunks(2) {
        assert_eq!(pair, ["Original Matrix:", "Transformed Matrix:"]);
    }
    Ok(())
}

#[tokio::test]
async fn test_non_grid_matrix_is_server_error_and_not_logged() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, body) = post_json(
        &server.url("/receive_matrix"),
        &json!({"originalMatrix": 5, "transformedMatrix": [[1]]}),
    )
    .await?;

    assert_eq!(status, 500);
    assert_eq!(body, json!({"error": "Internal server error"}));
    assert_eq!(server.matrix_log(), "");
    Ok(())
}

#[tokio::test]
async fn test_float_and_boolean_cells_match_table_format() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, _) = post_json(
        &server.url("/receive_matrix"),
        &json!({"originalMatrix": [[1.0, 2.0]], "transformedMatrix": [[true, "3"]]}),
    )
    .await?;

    assert_eq!(status, 200);
    let log = server.matrix_log();
    assert!(log.contains("│ 1 │ 2 │"));
    assert!(log.contains("│ True │ 3 │"));
    Ok(())
}
