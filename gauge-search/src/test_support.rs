//! Fakes shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::domain::{LatLong, Notation, StationLocation, StationRecord};
use crate::geocode::{GeocodeError, Geocoder};
use crate::source::{SourceError, StationQuery, StationSource};

/// A station with just a notation and label.
pub fn station(notation: &str, label: &str) -> StationRecord {
    StationRecord::new(Notation::parse(notation).unwrap(), label)
}

/// A station at a point.
pub fn station_at(notation: &str, label: &str, lat: f64, long: f64) -> StationRecord {
    let mut record = station(notation, label);
    record.location = StationLocation::from_parts(Some(LatLong::new(lat, long)), None);
    record
}

/// Path to the bundled sample dataset.
pub fn sample_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/data/stations.json")
}

#[derive(Default)]
struct Calls {
    fetch_all: AtomicUsize,
    failing_fetches: AtomicUsize,
    queries: Mutex<Vec<StationQuery>>,
}

/// In-memory station source that records how it was used.
///
/// Structured queries are answered from `query_results` when a canned
/// answer was registered, otherwise they return nothing.
#[derive(Clone)]
pub struct CountingSource {
    stations: Arc<Vec<StationRecord>>,
    query_results: Arc<Vec<(StationQuery, Vec<StationRecord>)>>,
    delay: Duration,
    fail_queries: bool,
    calls: Arc<Calls>,
}

impl CountingSource {
    pub fn new(stations: Vec<StationRecord>) -> Self {
        Self {
            stations: Arc::new(stations),
            query_results: Arc::new(Vec::new()),
            delay: Duration::ZERO,
            fail_queries: false,
            calls: Arc::new(Calls::default()),
        }
    }

    /// Delay every fetch so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make the next `n` full fetches fail.
    pub fn failing_fetches(self, n: usize) -> Self {
        self.calls.failing_fetches.store(n, Ordering::SeqCst);
        self
    }

    /// Make every structured query fail.
    pub fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    /// Register the answer to a structured query.
    pub fn with_query_result(mut self, query: StationQuery, result: Vec<StationRecord>) -> Self {
        Arc::make_mut(&mut self.query_results).push((query, result));
        self
    }

    pub fn fetch_all_calls(&self) -> usize {
        self.calls.fetch_all.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<StationQuery> {
        self.calls.queries.lock().unwrap().clone()
    }
}

impl StationSource for CountingSource {
    async fn fetch_all(&self) -> Result<Vec<StationRecord>, SourceError> {
        self.calls.fetch_all.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let should_fail = self
            .calls
            .failing_fetches
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(SourceError::Api {
                status: 503,
                message: "Service Unavailable".into(),
            });
        }

        Ok(self.stations.as_ref().clone())
    }

    async fn fetch_by_query(&self, query: &StationQuery) -> Result<Vec<StationRecord>, SourceError> {
        self.calls.queries.lock().unwrap().push(query.clone());
        if self.fail_queries {
            return Err(SourceError::Api {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }

        Ok(self
            .query_results
            .iter()
            .find(|(q, _)| q == query)
            .map(|(_, r)| r.clone())
            .unwrap_or_default())
    }
}

/// Geocoder answering from a fixed table. Unknown text is a miss.
#[derive(Clone, Default)]
pub struct ScriptedGeocoder {
    places: Arc<HashMap<String, LatLong>>,
    fail: bool,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, text: &str, point: LatLong) -> Self {
        Arc::make_mut(&mut self.places).insert(text.to_string(), point);
        self
    }

    /// Make every lookup fail with a transport-style error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl Geocoder for ScriptedGeocoder {
    async fn lookup(&self, text: &str) -> Result<Option<LatLong>, GeocodeError> {
        self.lookups.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(GeocodeError::Api {
                status: 503,
                message: "Service Unavailable".into(),
            });
        }
        Ok(self.places.get(text).copied())
    }
}

/// An HTTP server on loopback that answers exactly one request.
pub struct CannedServer {
    /// `http://127.0.0.1:<port>`
    pub base_url: String,
    request: JoinHandle<String>,
}

impl CannedServer {
    /// Serve `body` with the given status line, e.g. `"404 Not Found"`.
    pub async fn start(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let request = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });

        Self { base_url, request }
    }

    /// The request line the server received, e.g. `GET /path HTTP/1.1`.
    pub async fn request_line(self) -> String {
        let head = self.request.await.unwrap();
        head.lines().next().unwrap_or_default().to_string()
    }
}
