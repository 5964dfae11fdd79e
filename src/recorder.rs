//! Audio capture state machine.
//!
//! Recording follows an explicit two-state machine, Idle -> Recording ->
//! Idle, driven by a single control. While Recording, captured chunks are
//! buffered; stop finalizes the buffer into an immutable clip. A single
//! recorder instance means no concurrent recordings are possible.

use std::io::Read;

use log::{debug, info};

use crate::{AudioClip, NoteError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
}

/// Buffers captured audio between start and stop.
pub struct AudioRecorder {
    state: RecorderState,
    buffer: Vec<u8>,
}

impl Default for AudioRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioRecorder {
    pub fn new() -> Self {
        AudioRecorder {
            state: RecorderState::Idle,
            buffer: Vec::new(),
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Begins recording. Starting while already recording is a no-op; the
    /// single control can only toggle.
    pub fn start(&mut self) {
        if self.state == RecorderState::Recording {
            debug!("Recorder already recording, ignoring start");
            return;
        }
        self.buffer.clear();
        self.state = RecorderState::Recording;
        debug!("Recorder started");
    }

    /// Buffers a captured chunk. Chunks arriving while Idle are dropped.
    pub fn push_chunk(&mut self, chunk: &[u8]) {
        if self.state != RecorderState::Recording {
            debug!("Dropping {} bytes received while idle", chunk.len());
            return;
        }
        self.buffer.extend_from_slice(chunk);
    }

    /// Finalizes the buffered data into an immutable clip and returns to
    /// Idle. Stopping while Idle yields nothing.
    pub fn stop(&mut self) -> Option<AudioClip> {
        if self.state != RecorderState::Recording {
            return None;
        }
        self.state = RecorderState::Idle;
        let clip = AudioClip::new(std::mem::take(&mut self.buffer));
        info!("Recorded {} bytes of audio", clip.len());
        Some(clip)
    }

    /// Drains a capture source into a finished clip.
    ///
    /// Failures to read from the source surface as `MediaAccess` and leave
    /// the recorder back in Idle.
    pub fn capture(&mut self, mut source: impl Read) -> Result<AudioClip> {
        self.start();
        let mut chunk = [0u8; 8192];
        loop {
            match source.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => self.push_chunk(&chunk[..n]),
                Err(e) => {
                    self.state = RecorderState::Idle;
                    self.buffer.clear();
                    return Err(NoteError::MediaAccess {
                        message: format!("failed to read capture source: {e}"),
                    });
                }
            }
        }
        self.stop().ok_or_else(|| NoteError::MediaAccess {
            message: "capture finished with no recording in progress".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn follows_idle_recording_idle() {
        let mut rec = AudioRecorder::new();
        assert_eq!(rec.state(), RecorderState::Idle);

        rec.start();
        assert_eq!(rec.state(), RecorderState::Recording);
        rec.push_chunk(b"abc");
        rec.push_chunk(b"def");

        let clip = rec.stop().unwrap();
        assert_eq!(rec.state(), RecorderState::Idle);
        assert_eq!(clip.as_bytes(), b"abcdef");
    }

    #[test]
    fn stop_while_idle_yields_nothing() {
        let mut rec = AudioRecorder::new();
        assert!(rec.stop().is_none());
    }

    #[test]
    fn chunks_while_idle_are_dropped() {
        let mut rec = AudioRecorder::new();
        rec.push_chunk(b"ignored");
        rec.start();
        rec.push_chunk(b"kept");
        assert_eq!(rec.stop().unwrap().as_bytes(), b"kept");
    }

    #[test]
    fn restarting_clears_the_previous_buffer() {
        let mut rec = AudioRecorder::new();
        rec.start();
        rec.push_chunk(b"first");
        rec.stop();
        rec.start();
        rec.push_chunk(b"second");
        assert_eq!(rec.stop().unwrap().as_bytes(), b"second");
    }

    #[test]
    fn capture_drains_a_source() {
        let mut rec = AudioRecorder::new();
        let clip = rec.capture(io::Cursor::new(vec![7u8; 20000])).unwrap();
        assert_eq!(clip.len(), 20000);
        assert_eq!(rec.state(), RecorderState::Idle);
    }

    struct FailingSource;

    impl io::Read for FailingSource {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "device busy"))
        }
    }

    #[test]
    fn capture_failure_surfaces_media_access_and_resets() {
        let mut rec = AudioRecorder::new();
        let err = rec.capture(FailingSource);
        assert!(matches!(err, Err(NoteError::MediaAccess { .. })));
        assert_eq!(rec.state(), RecorderState::Idle);
    }
}
