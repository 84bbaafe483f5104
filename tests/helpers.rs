// Shared test helpers for upstream servers and client setup.
//
// wiremock covers well-behaved upstreams; the raw TCP servers here cover
// responses wiremock cannot produce (chunked bodies without Content-Length,
// bodies shorter than advertised).

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use mini_proxy::{ClientConfig, FetchClient};

#[allow(dead_code)]
pub const MIB: usize = 1024 * 1024;

/// Builds a fetch client, panicking on configuration errors.
#[allow(dead_code)] // Used by other test files
pub fn fetch_client(config: ClientConfig) -> FetchClient {
    FetchClient::new(&config).expect("Failed to build fetch client")
}

/// Builds a fetch client with a response size cap.
#[allow(dead_code)]
pub fn capped_client(max_response_size_bytes: usize) -> FetchClient {
    fetch_client(ClientConfig {
        max_response_size_bytes: Some(max_response_size_bytes as i64),
        ..Default::default()
    })
}

/// Encodes query parameters into a `/?..` request target.
#[allow(dead_code)]
pub fn query_uri(params: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    format!("/?{}", serializer.finish())
}

async fn read_request_head(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut byte = [0u8; 1];
    while !buf.ends_with(b"\r\n\r\n") {
        match stream.read(&mut byte).await {
            Ok(0) | Err(_) => return,
            Ok(_) => buf.push(byte[0]),
        }
    }
}

/// Serves `total_bytes` of `x` with chunked encoding and no Content-Length.
///
/// Returns the base URL. Write errors are ignored: the client is expected to
/// hang up early when it enforces a size cap.
#[allow(dead_code)]
pub async fn start_chunked_server(total_bytes: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind chunked server");
    let addr: SocketAddr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request_head(&mut stream).await;
                let head = "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n";
                if stream.write_all(head.as_bytes()).await.is_err() {
                    return;
                }

                let chunk = vec![b'x'; 64 * 1024];
                let mut remaining = total_bytes;
                while remaining > 0 {
                    let size = remaining.min(chunk.len());
                    let frame = format!("{:x}\r\n", size);
                    if stream.write_all(frame.as_bytes()).await.is_err()
                        || stream.write_all(&chunk[..size]).await.is_err()
                        || stream.write_all(b"\r\n").await.is_err()
                    {
                        return;
                    }
                    remaining -= size;
                }
                let _ = stream.write_all(b"0\r\n\r\n").await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

/// Advertises a 100 byte body, sends 10 bytes and closes the connection.
#[allow(dead_code)]
pub async fn start_truncated_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind truncated server");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request_head(&mut stream).await;
                let response = "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 100\r\nConnection: close\r\n\r\n0123456789";
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}
