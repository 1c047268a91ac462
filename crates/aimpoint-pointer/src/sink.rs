use std::sync::mpsc::{Sender, SyncSender};

use crate::{PointerError, PointerSample};

/// A destination for pointer samples.
///
/// The tracker hands every sample it produces to a sink instead of writing
/// to shared state. Channel senders implement it so the tracking loop and the
/// consumer can run on different threads.
pub trait SampleSink {
    /// Delivers one sample.
    fn send_sample(&mut self, sample: PointerSample) -> Result<(), PointerError>;
}

impl SampleSink for Sender<PointerSample> {
    fn send_sample(&mut self, sample: PointerSample) -> Result<(), PointerError> {
        self.send(sample).map_err(|_| PointerError::SinkClosed)
    }
}

impl SampleSink for SyncSender<PointerSample> {
    fn send_sample(&mut self, sample: PointerSample) -> Result<(), PointerError> {
        self.send(sample).map_err(|_| PointerError::SinkClosed)
    }
}

impl SampleSink for Vec<PointerSample> {
    fn send_sample(&mut self, sample: PointerSample) -> Result<(), PointerError> {
        self.push(sample);
        Ok(())
    }
}
