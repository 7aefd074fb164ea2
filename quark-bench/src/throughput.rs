//! Throughput measurement for decode passes.

use std::time::{Duration, Instant};

use quark_core::MultiBufferInput;
use quark_tlv::{TlvError, ValueIter};

/// Result of a throughput run.
#[derive(Debug, Clone)]
pub struct ThroughputResult {
    /// Total values decoded.
    pub values: u64,
    /// Total bytes consumed.
    pub bytes: u64,
    /// Values that came back as owned copies.
    pub copied: u64,
    /// Total duration.
    pub duration: Duration,
}

impl ThroughputResult {
    /// Returns values per second.
    #[must_use]
    pub fn values_per_second(&self) -> f64 {
        self.values as f64 / self.duration.as_secs_f64()
    }

    /// Returns megabytes per second.
    #[must_use]
    pub fn mb_per_second(&self) -> f64 {
        self.bytes as f64 / self.duration.as_secs_f64() / (1024.0 * 1024.0)
    }

    /// Returns the share of values that needed an owned copy.
    #[must_use]
    pub fn copy_ratio(&self) -> f64 {
        if self.values == 0 {
            0.0
        } else {
            self.copied as f64 / self.values as f64
        }
    }
}

/// Decodes `data` split into `chunk_size` chunks, `passes` times over.
///
/// # Errors
/// Returns the first decode error.
pub fn run_decode_throughput(
    data: &[u8],
    chunk_size: usize,
    passes: u64,
) -> Result<ThroughputResult, TlvError> {
    let chunks = crate::workload::split_chunks(data, chunk_size);
    let mut values = 0u64;
    let mut copied = 0u64;

    let start = Instant::now();
    for _ in 0..passes {
        for value in ValueIter::new(MultiBufferInput::new(chunks.iter().copied())) {
            if let quark_tlv::Value::String(payload) = value? {
                copied += u64::from(!payload.is_borrowed());
            }
            values += 1;
        }
    }
    let duration = start.elapsed();

    Ok(ThroughputResult {
        values,
        bytes: data.len() as u64 * passes,
        copied,
        duration,
    })
}
