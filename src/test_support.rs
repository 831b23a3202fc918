//! Fixtures shared by unit tests.

use crate::chain::domain::ChainPost;
use crate::task::codec::EncodedTask;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rand::{SeedableRng, rngs::StdRng};
use std::io;
use std::sync::{Arc, Mutex};

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 2024-05-01T12:00:00.123Z
pub(crate) fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .and_then(|base| base.checked_add_signed(chrono::Duration::milliseconds(123)))
        .expect("valid fixed instant")
}

pub(crate) fn fixed_clock() -> FixedClock {
    FixedClock(fixed_instant())
}

pub(crate) fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

/// Builds the post a node would return for an encoded task.
pub(crate) fn task_post(encoded: &EncodedTask) -> ChainPost {
    ChainPost {
        author: encoded.record.requester.clone(),
        permlink: encoded.permlink.clone(),
        parent_permlink: "datacomb33".to_owned(),
        title: encoded.title.clone(),
        body: encoded.body.clone(),
        json_metadata: encoded.json_metadata.clone(),
        created: "2024-05-01T12:00:00".to_owned(),
        ..ChainPost::default()
    }
}

/// Builds a direct reply to `parent`.
pub(crate) fn reply_to(parent: &ChainPost, author: &str, permlink: &str, body: &str) -> ChainPost {
    ChainPost {
        author: author.to_owned(),
        permlink: permlink.to_owned(),
        parent_author: parent.author.clone(),
        parent_permlink: parent.permlink.clone(),
        body: body.to_owned(),
        created: "2024-05-02T08:00:00".to_owned(),
        ..ChainPost::default()
    }
}

/// In-memory sink for formatted log lines.
#[derive(Debug, Clone, Default)]
pub(crate) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|err| io::Error::other(err.to_string()))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `action` under a plain-text subscriber and returns what it logged.
pub(crate) fn capture_logs(action: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, action);
    let bytes = buffer.0.lock().expect("log buffer lock").clone();
    String::from_utf8_lossy(&bytes).into_owned()
}
