//! HTTP oracle against a minimal local server.

use std::time::Duration;
use strictly_games::{HttpOracle, MoveOracle, MoveSourceError, RemoteMoveRequest, RemotePlayer};
use strictly_sos::{GameState, Letter, Move, Variant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves one request with `status` and `body`, returning the request body.
async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/move", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let request_body = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(split) = text.find("\r\n\r\n") {
                let length = text[..split]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if buf.len() >= split + 4 + length {
                    break text[split + 4..split + 4 + length].to_string();
                }
            }
            if n == 0 {
                break String::new();
            }
        };

        let response = format!(
            "HTTP/1.1 {}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request_body
    });

    (url, handle)
}

#[tokio::test]
async fn test_posts_request_and_reads_result() {
    let (url, server) = serve_once("200 OK", r#"{"result":"R1C1LO"}"#).await;
    let oracle = HttpOracle::new(url, Duration::from_secs(5)).unwrap();
    let game = GameState::new(3, Variant::General).unwrap();

    let mut player = RemotePlayer::new("Http", Box::new(oracle));
    let mv = player.get_move(&game).await.unwrap();
    assert_eq!(mv, Move::new(1, 1, Letter::O));

    let sent: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
    assert_eq!(sent["moves"].as_array().unwrap().len(), 18);
    assert_eq!(sent["board"][0][0], "_");
    assert!(sent["prompt"].as_str().unwrap().contains("3x3"));
}

#[tokio::test]
async fn test_error_reply_is_unavailable() {
    let (url, _server) = serve_once("400 Bad Request", r#"{"error":"No available moves."}"#).await;
    let oracle = HttpOracle::new(url, Duration::from_secs(5)).unwrap();
    let game = GameState::new(3, Variant::General).unwrap();

    let err = oracle
        .ask(&RemoteMoveRequest::for_state(&game))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        MoveSourceError::RemoteUnavailable {
            reason: "No available moves.".to_string()
        }
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_unavailable() {
    // Bind and drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/move", listener.local_addr().unwrap());
    drop(listener);

    let oracle = HttpOracle::new(url, Duration::from_secs(2)).unwrap();
    let game = GameState::new(3, Variant::General).unwrap();
    let err = oracle
        .ask(&RemoteMoveRequest::for_state(&game))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert!(matches!(err, MoveSourceError::RemoteUnavailable { .. }));
}
