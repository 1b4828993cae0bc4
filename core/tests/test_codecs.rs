// Round-trip and corruption behaviour for every codec adapter, over sizes
// that straddle the fragment size classes.

mod common;

#[cfg(test)]
mod tests {
    use codec_core::buffer::ChunkedBuffer;
    use codec_core::compression::codecs::{
        GzipCodec, Lz4FrameCodec, SnappyJavaCodec, SnappyStandardCodec, ZstdBlockCodec, ZstdStreamCodec,
    };
    use codec_core::compression::{
        Codec, CodecId, CodecRegistry, CompressionError, DEFAULT_MAX_DECOMPRESSED_SIZE, MAX_SNAPPY_JAVA_BLOCK_SIZE,
        SNAPPY_JAVA_MAGIC,
    };

    use crate::common::{gen, test_sizes};

    fn roundtrip(codec: &dyn Codec) {
        for size in test_sizes() {
            let mut buf = gen(size);
            let cbuf = codec
                .compress(buf.share(0, size).unwrap())
                .unwrap_or_else(|e| panic!("{} compress of {} bytes: {}", codec.id(), size, e));
            let dbuf = codec
                .decompress(cbuf)
                .unwrap_or_else(|e| panic!("{} decompress of {} bytes: {}", codec.id(), size, e));
            assert_eq!(dbuf, buf, "{} round trip of {} bytes", codec.id(), size);
            assert_eq!(buf.size_bytes(), size);
        }
    }

// # ✅ Round trips across the size spectrum

    #[test]
    fn gzip_roundtrip() {
        roundtrip(&GzipCodec::default());
    }

    #[test]
    fn lz4_frame_roundtrip() {
        roundtrip(&Lz4FrameCodec::default());
        roundtrip(&Lz4FrameCodec::new(false));
    }

    #[test]
    fn snappy_java_roundtrip() {
        roundtrip(&SnappyJavaCodec::default());
        roundtrip(&SnappyJavaCodec::new(1000, DEFAULT_MAX_DECOMPRESSED_SIZE));
    }

    #[test]
    fn snappy_standard_roundtrip() {
        roundtrip(&SnappyStandardCodec::new());
    }

    #[test]
    fn zstd_block_roundtrip() {
        roundtrip(&ZstdBlockCodec::default());
    }

    #[test]
    fn zstd_stream_roundtrip() {
        roundtrip(&ZstdStreamCodec::default());
        // tiny scratch forces many output steps per fragment
        roundtrip(&ZstdStreamCodec::new(3, 7));
    }

// # ✅ Empty input compresses to a frame that decodes to empty

    #[test]
    fn empty_input_roundtrips_for_every_codec() {
        let registry = CodecRegistry::default();
        for id in CodecId::ALL {
            let frame = registry.compress(id, ChunkedBuffer::new()).unwrap();
            assert!(!frame.is_empty(), "{} produced no frame for empty input", id);
            let out = registry.decompress(id, frame).unwrap();
            assert!(out.is_empty(), "{} did not round trip empty input", id);
        }
    }

    #[test]
    fn empty_frame_is_corrupt_for_every_codec() {
        let registry = CodecRegistry::default();
        for id in CodecId::ALL {
            let err = registry.decompress(id, ChunkedBuffer::new()).unwrap_err();
            assert!(err.is_corruption(), "{}: {}", id, err);
        }
    }

// # ✅ Sharing is non-destructive

    #[test]
    fn compressing_a_shared_view_leaves_source_intact() {
        let registry = CodecRegistry::default();
        let mut src = gen(20_000);
        let snapshot = src.to_vec();
        for id in CodecId::ALL {
            let frame = registry.compress(id, src.share(0, snapshot.len()).unwrap()).unwrap();
            let out = registry.decompress(id, frame).unwrap();
            assert_eq!(out, snapshot);
            assert_eq!(src, snapshot);
            assert_eq!(src.size_bytes(), snapshot.len());
        }
    }

    #[test]
    fn compressing_a_subrange() {
        let registry = CodecRegistry::default();
        let mut src = gen(9000);
        let snapshot = src.to_vec();
        for id in CodecId::ALL {
            let frame = registry.compress(id, src.share(1234, 5000).unwrap()).unwrap();
            let out = registry.decompress(id, frame).unwrap();
            assert_eq!(out, snapshot[1234..6234].to_vec(), "{}", id);
        }
    }

// # ✅ Decoders do not depend on how the frame is fragmented

    #[test]
    fn decompress_refragmented_frames() {
        let registry = CodecRegistry::default();
        let data = gen(30_000);
        for id in CodecId::ALL {
            let frame = registry.compress(id, data.copy()).unwrap().to_vec();
            let mut pieces = ChunkedBuffer::new();
            for chunk in frame.chunks(3) {
                pieces.append_bytes(bytes::Bytes::copy_from_slice(chunk));
            }
            assert_eq!(registry.decompress(id, pieces).unwrap(), data, "{}", id);
        }
    }

// # ✅ Codecs are not interchangeable on the wire

    #[test]
    fn gzip_frame_rejected_by_lz4() {
        let frame = GzipCodec::default().compress(gen(4096)).unwrap();
        let err = Lz4FrameCodec::default().decompress(frame).unwrap_err();
        assert!(matches!(err, CompressionError::Corrupt { codec: CodecId::Lz4Frame, .. }), "{}", err);
    }

    #[test]
    fn cross_codec_frames_rejected() {
        let registry = CodecRegistry::default();
        let framed = [CodecId::Gzip, CodecId::Lz4Frame, CodecId::SnappyJava, CodecId::ZstdBlock, CodecId::ZstdStream];
        for &producer in &framed {
            for &consumer in &framed {
                let is_zstd_pair = matches!(producer, CodecId::ZstdBlock | CodecId::ZstdStream)
                    && matches!(consumer, CodecId::ZstdBlock | CodecId::ZstdStream);
                if producer == consumer || is_zstd_pair {
                    continue;
                }
                let frame = registry.compress(producer, gen(2048)).unwrap();
                let err = registry.decompress(consumer, frame).unwrap_err();
                assert!(err.is_corruption(), "{} -> {}: {}", producer, consumer, err);
            }
        }
    }

    #[test]
    fn zstd_block_and_stream_share_a_frame_format() {
        let data = gen(10_000);
        let frame = ZstdStreamCodec::default().compress(data.copy()).unwrap();
        assert_eq!(ZstdBlockCodec::default().decompress(frame).unwrap(), data);

        let frame = ZstdBlockCodec::default().compress(data.copy()).unwrap();
        assert_eq!(ZstdStreamCodec::default().decompress(frame).unwrap(), data);
    }

// # ✅ Truncated and damaged frames

    #[test]
    fn truncated_frames_are_corrupt() {
        let registry = CodecRegistry::default();
        for id in CodecId::ALL {
            let mut frame = registry.compress(id, gen(8192)).unwrap();
            let cut = frame.size_bytes() / 2;
            frame.trim_back(cut).unwrap();
            let err = registry.decompress(id, frame).unwrap_err();
            assert!(err.is_corruption(), "{}: {}", id, err);
        }
    }

    #[test]
    fn gzip_checksum_mismatch_is_corrupt() {
        let mut frame = GzipCodec::default().compress(gen(4096)).unwrap().to_vec();
        let len = frame.len();
        // CRC32 sits in the 8-byte trailer
        frame[len - 8] ^= 0xff;
        let err = GzipCodec::default().decompress(ChunkedBuffer::from(frame)).unwrap_err();
        assert!(err.is_corruption(), "{}", err);
    }

    #[test]
    fn snappy_java_frame_layout() {
        let frame = SnappyJavaCodec::default().compress(ChunkedBuffer::new()).unwrap().to_vec();
        assert_eq!(frame.len(), 16);
        assert_eq!(frame[..8], SNAPPY_JAVA_MAGIC);
        assert_eq!(frame[8..12], 1i32.to_be_bytes());
        assert_eq!(frame[12..16], 1i32.to_be_bytes());

        let mut bad = frame.clone();
        bad[1] = b'X';
        let err = SnappyJavaCodec::default().decompress(ChunkedBuffer::from(bad)).unwrap_err();
        assert!(err.is_corruption());
    }

    #[test]
    fn snappy_java_splits_into_blocks() {
        let codec = SnappyJavaCodec::new(1024, DEFAULT_MAX_DECOMPRESSED_SIZE);
        let frame = codec.compress(gen(4096)).unwrap().to_vec();
        let mut rest = &frame[16..];
        let mut blocks = 0;
        while !rest.is_empty() {
            let len = i32::from_be_bytes(rest[..4].try_into().unwrap()) as usize;
            rest = &rest[4 + len..];
            blocks += 1;
        }
        assert_eq!(blocks, 4);
    }

    #[test]
    fn zstd_block_rejects_oversized_declared_content() {
        let frame = ZstdBlockCodec::default().compress(gen(4096)).unwrap();
        let err = ZstdBlockCodec::new(3, 1024).decompress(frame).unwrap_err();
        assert!(err.is_corruption(), "{}", err);
    }

    #[test]
    fn snappy_java_rejects_oversized_declared_block() {
        let mut frame = SnappyJavaCodec::default().compress(ChunkedBuffer::new()).unwrap().to_vec();
        frame.extend_from_slice(&6i32.to_be_bytes());
        // varint length 0xFFFFFFFF, then one literal tag byte
        frame.extend_from_slice(&[0xff, 0xff, 0xff, 0xff, 0x0f, 0x00]);

        let started = std::time::Instant::now();
        let err = SnappyJavaCodec::default().decompress(ChunkedBuffer::from(frame)).unwrap_err();
        assert!(err.is_corruption(), "{}", err);
        assert!(err.to_string().contains("limit"), "{}", err);
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn snappy_java_enforces_total_output_limit() {
        let frame = SnappyJavaCodec::new(1024, DEFAULT_MAX_DECOMPRESSED_SIZE).compress(gen(4096)).unwrap();
        let err = SnappyJavaCodec::new(1024, 2000).decompress(frame.copy()).unwrap_err();
        assert!(err.is_corruption(), "{}", err);
        let out = SnappyJavaCodec::new(1024, 4096).decompress(frame).unwrap();
        assert_eq!(out.size_bytes(), 4096);
    }

    #[test]
    fn snappy_java_block_size_is_bounded() {
        let codec = SnappyJavaCodec::new(usize::MAX, DEFAULT_MAX_DECOMPRESSED_SIZE);
        assert_eq!(codec.block_size(), MAX_SNAPPY_JAVA_BLOCK_SIZE);
        assert_eq!(SnappyJavaCodec::new(0, DEFAULT_MAX_DECOMPRESSED_SIZE).block_size(), 1);
    }

// # ✅ Nothing may follow the last frame

    #[test]
    fn trailing_bytes_after_frame_are_corrupt() {
        let registry = CodecRegistry::default();
        for id in [
            CodecId::Gzip,
            CodecId::Lz4Frame,
            CodecId::SnappyJava,
            CodecId::ZstdBlock,
            CodecId::ZstdStream,
        ] {
            let mut frame = registry.compress(id, ChunkedBuffer::from(&b"hello"[..])).unwrap();
            frame.append(b"GARBAGE!!");
            match registry.decompress(id, frame) {
                Err(err) => assert!(err.is_corruption(), "{}: {}", id, err),
                Ok(out) => panic!("{} accepted trailing bytes, decoded {:?}", id, out.to_vec()),
            }
        }
    }

    #[test]
    fn trailing_zero_padding_after_gzip_is_corrupt() {
        let codec = GzipCodec::default();
        let mut frame = codec.compress(gen(1000)).unwrap();
        frame.append(&[0u8; 4]);
        assert!(codec.decompress(frame).unwrap_err().is_corruption());
    }

    #[test]
    fn gzip_multi_member_stream_decodes_every_member() {
        let codec = GzipCodec::default();
        let first = gen(3000);
        let second = gen(5000);

        let mut frame = codec.compress(first.copy()).unwrap();
        frame.append_buffer(codec.compress(second.copy()).unwrap());

        let mut expected = first.to_vec();
        expected.extend_from_slice(&second.to_vec());
        assert_eq!(codec.decompress(frame).unwrap(), expected);
    }

    #[test]
    fn lz4_concatenated_frames_are_rejected() {
        let codec = Lz4FrameCodec::default();
        let mut frame = codec.compress(gen(100)).unwrap();
        frame.append_buffer(codec.compress(gen(100)).unwrap());
        assert!(codec.decompress(frame).unwrap_err().is_corruption());
    }

// # ✅ End-to-end: zstd-stream then gzip over the same 6 KiB input

    #[test]
    fn end_to_end_zstd_stream_and_gzip() {
        let registry = CodecRegistry::default();
        let mut input = gen(6144);

        let zstd_frame = registry.compress(CodecId::ZstdStream, input.share(0, 6144).unwrap()).unwrap();
        let zstd_bytes = zstd_frame.to_vec();
        let out = registry.decompress(CodecId::ZstdStream, zstd_frame).unwrap();
        assert_eq!(out, input);

        let gzip_frame = registry.compress(CodecId::Gzip, input.share(0, 6144).unwrap()).unwrap();
        assert_ne!(gzip_frame.to_vec(), zstd_bytes);
        assert_eq!(registry.decompress(CodecId::Gzip, gzip_frame).unwrap(), input);
    }
}
