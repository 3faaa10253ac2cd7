use std::io;

use sensewire_codec::Record;
use tracing::warn;

use crate::router::Router;
use crate::topic::Topic;

/// Where decoded records go.
///
/// The sink owns persistence and output formatting (CSV rows, datastore
/// appends...); the routing core never writes to files or streams itself.
pub trait RecordSink {
    fn emit(&mut self, topic: &Topic, record: &Record) -> io::Result<()>;
}

/// Drives a sink from an inbound feed, applying the delivery policy: every
/// (topic, payload) pair is routed independently, decode failures are
/// logged and the single message dropped, and sink I/O failures propagate
/// to the transport owner.
pub struct Dispatcher<S> {
    router: Router,
    sink: S,
    emitted: u64,
    dropped: u64,
}

impl<S: RecordSink> Dispatcher<S> {
    pub fn new(router: Router, sink: S) -> Self {
        Self {
            router,
            sink,
            emitted: 0,
            dropped: 0,
        }
    }

    /// Route one message and emit it on success.
    ///
    /// Returns whether a record reached the sink. A routing failure is not
    /// an error here — it is logged with the offending topic and counted,
    /// and delivery of subsequent messages is unaffected.
    pub fn ingest(&mut self, topic: &str, payload: &[u8]) -> io::Result<bool> {
        match self.router.route(topic, payload) {
            Ok(inbound) => {
                self.sink.emit(&inbound.topic, &inbound.record)?;
                self.emitted += 1;
                Ok(true)
            }
            Err(err) => {
                warn!(topic, error = %err, "dropping undecodable message");
                self.dropped += 1;
                Ok(false)
            }
        }
    }

    /// Records emitted to the sink so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Messages dropped so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// The router driving this dispatcher.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Hand the sink back, e.g. to flush or close it.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
