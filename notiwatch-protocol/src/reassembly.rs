//! Offset-write reassembly
//!
//! The GATT server hands over each write together with its byte offset.
//! Writes at a non-zero offset are staged; a write at offset 0 marks the
//! logical frame as complete and releases it for decoding.
//!
//! Note that offset 0 terminates a frame, it does not start one. The phone
//! sends the tail fragments first and the head last. Any transport change
//! must keep that ordering.
//!
//! Every byte of a released frame was written since the previous frame
//! completed. A frame with unwritten holes is discarded.

/// Reassembly buffer capacity (bytes)
pub const REASSEMBLY_BUFFER_SIZE: usize = 512;

const COVERAGE_WORDS: usize = REASSEMBLY_BUFFER_SIZE / 32;

/// Errors raised while staging a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReassemblyError {
    /// `offset + len` would run past the end of the buffer
    Overflow { offset: u16, len: u16 },
    /// The completed frame has no data at `offset`
    Gap { offset: u16 },
}

/// Fixed-size staging buffer for fragmented frames
#[derive(Debug, Clone)]
pub struct Reassembler {
    buffer: [u8; REASSEMBLY_BUFFER_SIZE],
    /// High-water mark of staged bytes
    filled: usize,
    /// One bit per buffer byte written for the current frame
    covered: [u32; COVERAGE_WORDS],
}

impl Default for Reassembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Reassembler {
    /// Create an empty reassembler
    pub const fn new() -> Self {
        Self {
            buffer: [0; REASSEMBLY_BUFFER_SIZE],
            filled: 0,
            covered: [0; COVERAGE_WORDS],
        }
    }

    /// Drop any staged bytes
    pub fn reset(&mut self) {
        self.buffer = [0; REASSEMBLY_BUFFER_SIZE];
        self.filled = 0;
        self.covered = [0; COVERAGE_WORDS];
    }

    /// Number of bytes staged so far
    pub fn staged(&self) -> usize {
        self.filled
    }

    /// Stage one GATT write
    ///
    /// Returns `Ok(Some(frame))` when the write was at offset 0 and the
    /// frame is complete, `Ok(None)` while fragments are still being
    /// staged. On overflow, or when the completed frame has a hole, the
    /// partial buffer is discarded.
    pub fn write(&mut self, offset: u16, data: &[u8]) -> Result<Option<&[u8]>, ReassemblyError> {
        let start = offset as usize;
        let end = start + data.len();

        if end > REASSEMBLY_BUFFER_SIZE {
            error!(
                "Reassembly overflow: offset={}, len={}, max={}",
                offset,
                data.len(),
                REASSEMBLY_BUFFER_SIZE
            );
            self.reset();
            return Err(ReassemblyError::Overflow {
                offset,
                len: data.len() as u16,
            });
        }

        self.buffer[start..end].copy_from_slice(data);
        self.cover(start, end);
        self.filled = self.filled.max(end);
        trace!("Staged {} bytes at offset {}", data.len(), offset);

        if offset != 0 {
            return Ok(None);
        }

        let len = self.filled;
        let gap = self.first_gap(len);
        self.filled = 0;
        self.covered = [0; COVERAGE_WORDS];

        if let Some(at) = gap {
            warn!("Frame of {} bytes has no data at offset {}", len, at);
            return Err(ReassemblyError::Gap { offset: at as u16 });
        }
        Ok(Some(&self.buffer[..len]))
    }

    fn cover(&mut self, start: usize, end: usize) {
        for i in start..end {
            self.covered[i / 32] |= 1u32 << (i % 32);
        }
    }

    fn first_gap(&self, len: usize) -> Option<usize> {
        (0..len).find(|&i| self.covered[i / 32] & (1u32 << (i % 32)) == 0)
    }
}
