use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A single-connection HTTP server on 127.0.0.1 that answers with a canned response.
///
/// Written on a bare socket so tests can control exactly when bytes stop flowing.
pub struct OneShotServer {
    pub addr: SocketAddr,
    handle: Option<JoinHandle<()>>,
}

impl OneShotServer {
    /// Serve `body` with the given status line, e.g. `"200 OK"`.
    pub fn start(status: &str, body: &[u8]) -> Self {
        let mut response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: audio/mpeg\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(body);
        Self::serve(response, Duration::ZERO)
    }

    /// Answer `200 OK` with an unbounded body, send `prefix`, then keep the
    /// connection open without sending anything for `stall`.
    pub fn stalling(prefix: &[u8], stall: Duration) -> Self {
        let mut response =
            b"HTTP/1.1 200 OK\r\nContent-Type: audio/mpeg\r\nConnection: close\r\n\r\n".to_vec();
        response.extend_from_slice(prefix);
        Self::serve(response, stall)
    }

    fn serve(response: Vec<u8>, hold_open: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            if let Ok((mut socket, _)) = listener.accept() {
                // Consume the request head before answering
                let mut request = Vec::new();
                let mut chunk = [0u8; 512];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }
                let _ = socket.write_all(&response);
                let _ = socket.flush();
                thread::sleep(hold_open);
            }
        });

        OneShotServer {
            addr,
            handle: Some(handle),
        }
    }

    /// The server address without a scheme, e.g. `127.0.0.1:4321/live`.
    pub fn bare_url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap();
        }
    }
}

/// An address on 127.0.0.1 with nothing listening.
pub fn closed_local_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
