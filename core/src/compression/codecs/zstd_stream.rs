//! codecs/zstd_stream.rs
//! Incremental Zstandard compression over chunked buffers.
//!
//! Design notes:
//! - `ZstdStreamSession` drives `zstd::stream::raw` contexts one fragment at
//!   a time; the input is never made contiguous.
//! - The session is an explicit state machine:
//!   `Idle -> Compressing -> Finalized` or `Idle -> Decompressing -> Finalized`.
//!   Calls outside their state fail with `CompressionError::InvalidState`.
//! - The decoder accepts input split at any boundary.
//! - Dropping a session in any state just frees its zstd context.

use std::io;

use tracing::{debug, trace, warn};
use zstd::stream::raw::{Decoder, Encoder, InBuffer, Operation, OutBuffer};

use crate::buffer::ChunkedBuffer;
use crate::compression::constants::{default_stream_output_chunk, DEFAULT_LEVEL_ZSTD};
use crate::compression::types::{Codec, CodecId, CompressionError, StreamState};

enum Engine {
    Idle,
    Compressing(Encoder<'static>),
    Decompressing {
        decoder: Decoder<'static>,
        seen_input: bool,
        frame_complete: bool,
    },
    Finalized,
}

pub struct ZstdStreamSession {
    engine: Engine,
    level: i32,
    scratch: Vec<u8>,
    output: ChunkedBuffer,
}

impl ZstdStreamSession {
    pub fn new(level: i32, output_chunk: usize) -> Self {
        Self {
            engine: Engine::Idle,
            level,
            scratch: vec![0u8; output_chunk.max(1)],
            output: ChunkedBuffer::new(),
        }
    }

    pub fn state(&self) -> StreamState {
        match self.engine {
            Engine::Idle => StreamState::Idle,
            Engine::Compressing(_) => StreamState::Compressing,
            Engine::Decompressing { .. } => StreamState::Decompressing,
            Engine::Finalized => StreamState::Finalized,
        }
    }

    /// Bytes produced so far and not yet handed out by `finish`.
    pub fn pending_output(&self) -> usize {
        self.output.size_bytes()
    }

    fn require_idle(&self, op: &'static str) -> Result<(), CompressionError> {
        match self.state() {
            StreamState::Idle => Ok(()),
            state => Err(CompressionError::InvalidState { state, op }),
        }
    }

    pub fn begin_compress(&mut self) -> Result<(), CompressionError> {
        self.require_idle("begin_compress")?;
        let encoder = Encoder::new(self.level)
            .map_err(|e| CompressionError::process_failed(CodecId::ZstdStream, e))?;
        self.engine = Engine::Compressing(encoder);
        debug!(codec = "zstd-stream", level = self.level, "session compressing");
        Ok(())
    }

    pub fn begin_decompress(&mut self) -> Result<(), CompressionError> {
        self.require_idle("begin_decompress")?;
        let decoder = Decoder::new()
            .map_err(|e| CompressionError::process_failed(CodecId::ZstdStream, e))?;
        self.engine = Engine::Decompressing {
            decoder,
            seen_input: false,
            frame_complete: false,
        };
        debug!(codec = "zstd-stream", "session decompressing");
        Ok(())
    }

    /// Push one slice through the active direction.
    pub fn feed(&mut self, data: &[u8]) -> Result<(), CompressionError> {
        let state = self.state();
        match &mut self.engine {
            Engine::Compressing(encoder) => {
                encode_step(encoder, data, &mut self.scratch, &mut self.output)
                    .map_err(|e| CompressionError::process_failed(CodecId::ZstdStream, e))
            }
            Engine::Decompressing { decoder, seen_input, frame_complete } => {
                if data.is_empty() {
                    return Ok(());
                }
                *seen_input = true;
                decode_step(decoder, data, &mut self.scratch, &mut self.output, frame_complete)
                    .map_err(|e| {
                        warn!(codec = "zstd-stream", error = %e, "rejecting corrupt frame");
                        CompressionError::corrupt(CodecId::ZstdStream, e)
                    })
            }
            Engine::Idle | Engine::Finalized => {
                Err(CompressionError::InvalidState { state, op: "feed" })
            }
        }
    }

    /// Push every fragment of `buf`, in order.
    pub fn feed_buffer(&mut self, buf: &ChunkedBuffer) -> Result<(), CompressionError> {
        for frag in buf.fragments() {
            self.feed(frag)?;
        }
        Ok(())
    }

    /// Flush the active direction, move to `Finalized`, and return the output.
    ///
    /// # Errors
    /// - `InvalidState` when not compressing or decompressing.
    /// - `Corrupt` when decompressing and the last frame never completed.
    pub fn finish(&mut self) -> Result<ChunkedBuffer, CompressionError> {
        let state = self.state();
        match std::mem::replace(&mut self.engine, Engine::Finalized) {
            Engine::Compressing(mut encoder) => {
                encode_finish(&mut encoder, &mut self.scratch, &mut self.output)
                    .map_err(|e| CompressionError::process_failed(CodecId::ZstdStream, e))?;
            }
            Engine::Decompressing { seen_input, frame_complete, .. } => {
                if !seen_input {
                    warn!(codec = "zstd-stream", "rejecting empty frame");
                    return Err(CompressionError::corrupt(CodecId::ZstdStream, "empty frame"));
                }
                if !frame_complete {
                    warn!(codec = "zstd-stream", "rejecting truncated frame");
                    return Err(CompressionError::corrupt(CodecId::ZstdStream, "truncated frame"));
                }
            }
            other => {
                self.engine = other;
                return Err(CompressionError::InvalidState { state, op: "finish" });
            }
        }

        debug!(codec = "zstd-stream", from = %state, output_len = self.output.size_bytes(), "session finalized");
        Ok(std::mem::take(&mut self.output))
    }
}

fn encode_step(
    encoder: &mut Encoder<'static>,
    data: &[u8],
    scratch: &mut [u8],
    out: &mut ChunkedBuffer,
) -> io::Result<()> {
    let mut input = InBuffer::around(data);
    while input.pos < data.len() {
        let written = {
            let mut output = OutBuffer::around(&mut *scratch);
            encoder.run(&mut input, &mut output)?;
            output.pos()
        };
        out.append(&scratch[..written]);
    }
    Ok(())
}

fn encode_finish(
    encoder: &mut Encoder<'static>,
    scratch: &mut [u8],
    out: &mut ChunkedBuffer,
) -> io::Result<()> {
    loop {
        let (written, remaining) = {
            let mut output = OutBuffer::around(&mut *scratch);
            let remaining = encoder.finish(&mut output, true)?;
            (output.pos(), remaining)
        };
        out.append(&scratch[..written]);
        if remaining == 0 {
            return Ok(());
        }
    }
}

fn decode_step(
    decoder: &mut Decoder<'static>,
    data: &[u8],
    scratch: &mut [u8],
    out: &mut ChunkedBuffer,
    frame_complete: &mut bool,
) -> io::Result<()> {
    let mut input = InBuffer::around(data);
    loop {
        let (written, hint) = {
            let mut output = OutBuffer::around(&mut *scratch);
            let hint = decoder.run(&mut input, &mut output)?;
            (output.pos(), hint)
        };
        out.append(&scratch[..written]);

        // hint == 0: frame fully decoded and flushed
        *frame_complete = hint == 0;
        let consumed = input.pos == data.len();
        if consumed && (hint == 0 || written < scratch.len()) {
            return Ok(());
        }
    }
}

/// `Codec` front end: one session per call.
pub struct ZstdStreamCodec {
    level: i32,
    output_chunk: usize,
}

impl ZstdStreamCodec {
    pub fn new(level: i32, output_chunk: usize) -> Self {
        Self { level, output_chunk }
    }

    /// Fresh `Idle` session with this codec's settings.
    pub fn session(&self) -> ZstdStreamSession {
        ZstdStreamSession::new(self.level, self.output_chunk)
    }
}

impl Default for ZstdStreamCodec {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_ZSTD, default_stream_output_chunk())
    }
}

impl Codec for ZstdStreamCodec {
    fn id(&self) -> CodecId {
        CodecId::ZstdStream
    }

    fn compress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        let mut session = self.session();
        session.begin_compress()?;
        session.feed_buffer(&input)?;
        let out = session.finish()?;

        trace!(codec = "zstd-stream", input_len = input.size_bytes(), output_len = out.size_bytes(), "compressed");
        Ok(out)
    }

    fn decompress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        let mut session = self.session();
        session.begin_decompress()?;
        session.feed_buffer(&input)?;
        let out = session.finish()?;

        trace!(codec = "zstd-stream", input_len = input.size_bytes(), output_len = out.size_bytes(), "decompressed");
        Ok(out)
    }
}
