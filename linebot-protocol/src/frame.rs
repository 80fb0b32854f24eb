//! Bridge frame codec.
//!
//! On the wire a frame is
//!
//! ```text
//! 0xA5 | LEN | TYPE | PAYLOAD (LEN bytes, LEN <= 250) | CRC
//! ```
//!
//! where CRC is CRC-8 (polynomial 0x07, init 0x00, no reflection) over
//! LEN, TYPE and the payload. The start byte is not covered.

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xA5;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 250;

/// Bytes around the payload: start, length, type and CRC
const OVERHEAD: usize = 4;

/// Largest frame on the wire
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + OVERHEAD;

const CRC8_POLY: u8 = 0x07;

/// Fold one byte into a running CRC-8
pub const fn crc8_update(crc: u8, byte: u8) -> u8 {
    let mut crc = crc ^ byte;
    let mut bit = 0;
    while bit < 8 {
        crc = if crc & 0x80 != 0 {
            (crc << 1) ^ CRC8_POLY
        } else {
            crc << 1
        };
        bit += 1;
    }
    crc
}

/// CRC-8 of a byte slice
pub fn crc8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |crc, &b| crc8_update(crc, b))
}

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Trailing CRC does not match the frame contents
    CrcMismatch,
    /// Invalid frame structure or unknown message type
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given message type and payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Size of this frame on the wire
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + OVERHEAD
    }

    /// CRC this frame carries on the wire
    pub fn crc(&self) -> u8 {
        let head = crc8_update(crc8_update(0, self.payload.len() as u8), self.msg_type);
        self.payload.iter().fold(head, |crc, &b| crc8_update(crc, b))
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = buffer.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;

        let (header, rest) = out.split_at_mut(3);
        header.copy_from_slice(&[FRAME_START, self.payload.len() as u8, self.msg_type]);
        let (body, tail) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        tail[0] = self.crc();

        Ok(len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

/// Where the parser is within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Hunting for the start byte
    Sync,
    /// Next byte is LEN
    Length,
    /// Next byte is TYPE
    Type { len: u8 },
    /// Collecting payload bytes
    Body { len: u8, msg_type: u8 },
    /// Next byte is the CRC
    Crc { msg_type: u8 },
}

/// Byte-at-a-time frame parser
///
/// The CRC is accumulated while bytes arrive so the final check is a
/// single compare.
#[derive(Debug, Clone)]
pub struct FrameParser {
    stage: Stage,
    crc: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            stage: Stage::Sync,
            crc: 0,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame and hunt for the next start byte
    pub fn reset(&mut self) {
        self.stage = Stage::Sync;
        self.crc = 0;
        self.payload.clear();
    }

    fn fail(&mut self, error: FrameError) -> Result<Option<Frame>, FrameError> {
        self.reset();
        Err(error)
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    /// After an error the parser is back to hunting for START.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        self.stage = match self.stage {
            // Line noise between frames is dropped
            Stage::Sync if byte == FRAME_START => Stage::Length,
            Stage::Sync => Stage::Sync,
            Stage::Length if byte as usize > MAX_PAYLOAD_SIZE => {
                return self.fail(FrameError::InvalidFrame);
            }
            Stage::Length => {
                self.crc = crc8_update(0, byte);
                Stage::Type { len: byte }
            }
            Stage::Type { len } => {
                self.crc = crc8_update(self.crc, byte);
                self.payload.clear();
                match len {
                    0 => Stage::Crc { msg_type: byte },
                    _ => Stage::Body {
                        len,
                        msg_type: byte,
                    },
                }
            }
            Stage::Body { len, msg_type } => {
                self.crc = crc8_update(self.crc, byte);
                if self.payload.push(byte).is_err() {
                    return self.fail(FrameError::PayloadTooLarge);
                }
                if self.payload.len() == len as usize {
                    Stage::Crc { msg_type }
                } else {
                    Stage::Body { len, msg_type }
                }
            }
            Stage::Crc { msg_type } => {
                if byte != self.crc {
                    return self.fail(FrameError::CrcMismatch);
                }
                let frame = Frame {
                    msg_type,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                return Ok(Some(frame));
            }
        };
        Ok(None)
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crc8_check_value() {
        // CRC-8/SMBUS catalogue check
        assert_eq!(crc8(b"123456789"), 0xF4);
        assert_eq!(crc8(&[]), 0);
    }

    #[test]
    fn test_ping_on_the_wire() {
        let frame = Frame::empty(0x02);
        let mut buffer = [0u8; 10];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(&buffer[..4], &[FRAME_START, 0, 0x02, 0x0E]);
    }

    #[test]
    fn test_set_frame_layout() {
        // SET /robot/speed = 90
        let frame = Frame::new(0x01, b"\x0c/robot/speed90").unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        assert_eq!(encoded.len(), 4 + 15);
        assert_eq!(&encoded[..4], &[FRAME_START, 15, 0x01, 12]);
        assert_eq!(encoded[encoded.len() - 1], crc8(&encoded[1..encoded.len() - 1]));
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x20, &[1, 2, 3]).unwrap();
        let mut buffer = [0u8; 6];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_corrupt_crc_then_recover() {
        let mut encoded = Frame::empty(0x02).encode_to_vec().unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Err(FrameError::CrcMismatch));

        let good = Frame::empty(0x02).encode_to_vec().unwrap();
        assert!(parser.feed_bytes(&good).unwrap().is_some());
    }

    #[test]
    fn test_reordered_payload_is_rejected() {
        // A byte-parity check would accept this
        let sent = Frame::new(0x01, b"\x03ab1").unwrap().encode_to_vec().unwrap();
        let mut garbled = sent.clone();
        garbled.swap(5, 6);
        assert_ne!(sent, garbled);

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&garbled), Err(FrameError::CrcMismatch));
    }

    #[test]
    fn test_resync_after_garbage() {
        let encoded = Frame::empty(0x21).encode_to_vec().unwrap();

        let mut data = Vec::<u8, 20>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x12, 0x34]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&data).unwrap().unwrap();
        assert_eq!(parsed.msg_type, 0x21);
    }

    #[test]
    fn test_oversized_length_byte() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(FRAME_START), Ok(None));
        assert_eq!(parser.feed(251), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_back_to_back_frames() {
        let a = Frame::new(0x01, &[3, b'a', b'b', b'c', b'1']).unwrap();
        let b = Frame::empty(0x02);
        let mut stream = Vec::<u8, 32>::new();
        stream.extend_from_slice(&a.encode_to_vec().unwrap()).unwrap();
        stream.extend_from_slice(&b.encode_to_vec().unwrap()).unwrap();

        let mut parser = FrameParser::new();
        let mut frames = Vec::<Frame, 2>::new();
        for &byte in stream.iter() {
            if let Some(frame) = parser.feed(byte).unwrap() {
                frames.push(frame).unwrap();
            }
        }
        assert_eq!(frames.as_slice(), &[a, b]);
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(
            Frame::new(0x20, &large_payload),
            Err(FrameError::PayloadTooLarge)
        );
    }

    proptest! {
        #[test]
        fn prop_noise_never_panics(noise in proptest::collection::vec(any::<u8>(), 0..600)) {
            let mut parser = FrameParser::new();
            for byte in noise {
                let _ = parser.feed(byte);
            }
        }

        #[test]
        fn prop_single_bit_flip_is_caught(
            payload in proptest::collection::vec(any::<u8>(), 1..32),
            index in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let mut wire = Frame::new(0x20, &payload).unwrap().encode_to_vec().unwrap();
            // Flip a bit inside TYPE, PAYLOAD or CRC
            let at = 2 + index.index(wire.len() - 2);
            wire[at] ^= 1 << bit;

            let mut parser = FrameParser::new();
            prop_assert_eq!(parser.feed_bytes(&wire), Err(FrameError::CrcMismatch));
        }

        #[test]
        fn prop_frame_survives_leading_noise(
            noise in proptest::collection::vec(any::<u8>().prop_filter("not START", |b| *b != FRAME_START), 0..32),
            msg_type in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..MAX_PAYLOAD_SIZE),
        ) {
            let frame = Frame::new(msg_type, &payload).unwrap();
            let mut parser = FrameParser::new();
            prop_assert_eq!(parser.feed_bytes(&noise), Ok(None));
            prop_assert_eq!(parser.feed_bytes(&frame.encode_to_vec().unwrap()), Ok(Some(frame)));
        }
    }
}
