//! Capture-side driver: one recorder per recorded actor.

use ghostline_core::{CodecConfig, StreamWriter};

use crate::capture::{capture, SnapshotSource};
use crate::error::PlaybackError;
use crate::io::{Compressor, Saver};

#[derive(Debug)]
pub struct Recorder {
    writer: StreamWriter,
}

impl Recorder {
    pub fn new(config: &CodecConfig) -> Result<Self, PlaybackError> {
        Ok(Self {
            writer: StreamWriter::new(config)?,
        })
    }

    /// Capture `source` at `time`. Returns whether a record was written.
    pub fn capture_tick<S: SnapshotSource + ?Sized>(
        &mut self,
        time: f32,
        source: &S,
    ) -> Result<bool, PlaybackError> {
        let snapshot = capture(source, time)?;
        Ok(self.writer.push(time, &snapshot))
    }

    pub fn record_count(&self) -> usize {
        self.writer.record_count()
    }

    /// Serialized stream, uncompressed.
    pub fn finish(self) -> Result<Vec<u8>, PlaybackError> {
        Ok(self.writer.finish()?)
    }

    /// Finish the stream and hand it to `saver`. Returns the number of bytes saved.
    pub async fn save(
        self,
        saver: &dyn Saver,
        compressor: Option<&dyn Compressor>,
    ) -> Result<usize, PlaybackError> {
        let records = self.record_count();
        let bytes = self.finish()?;
        let bytes = match compressor {
            Some(c) => c.compress(&bytes).await?,
            None => bytes,
        };
        saver.save(&bytes).await?;
        log::debug!("saved {records} records ({} bytes)", bytes.len());
        Ok(bytes.len())
    }
}
