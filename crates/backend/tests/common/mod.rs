//! Test helpers: an in-process stand-in for the REST backend and a log
//! capture for asserting what the client traced.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use axum::Router;
use tracing::subscriber::DefaultGuard;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub backend address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub backend");
    });
    format!("http://{addr}")
}

/// Log lines emitted by `quickdeck_backend` while the guard is alive.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    /// Install a thread-local subscriber that records every event from
    /// this crate. Tests run on a current-thread runtime, so the client's
    /// events land here.
    pub fn install() -> (Self, DefaultGuard) {
        let logs = Self::default();
        let sink = Arc::clone(&logs.0);
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("quickdeck_backend=trace"))
            .with_ansi(false)
            .with_writer(move || CapturedWriter(Arc::clone(&sink)))
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub fn lines(&self) -> Vec<String> {
        let raw = self.0.lock().unwrap();
        String::from_utf8_lossy(&raw)
            .lines()
            .map(str::to_string)
            .collect()
    }
}
