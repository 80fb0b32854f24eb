//! Message types for the bridge protocol
//!
//! Message types are divided into two categories:
//! - Bridge → Robot: key writes from the cloud, heartbeat requests
//! - Robot → Bridge: key publications, heartbeat responses

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use heapless::Vec;

// Message type IDs: Bridge → Robot
pub const MSG_SET: u8 = 0x01;
pub const MSG_PING: u8 = 0x02;

// Message type IDs: Robot → Bridge
pub const MSG_PUBLISH: u8 = 0x20;
pub const MSG_PONG: u8 = 0x21;

/// Longest key path that fits the one-byte length prefix
pub const MAX_PATH_LEN: usize = 64;

/// Encode `[path_len][path][value]`
fn key_value_frame(msg_type: u8, path: &str, value: &str) -> Result<Frame, FrameError> {
    if path.len() > MAX_PATH_LEN {
        return Err(FrameError::PayloadTooLarge);
    }

    let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
    payload
        .push(path.len() as u8)
        .map_err(|_| FrameError::PayloadTooLarge)?;
    payload
        .extend_from_slice(path.as_bytes())
        .map_err(|_| FrameError::PayloadTooLarge)?;
    payload
        .extend_from_slice(value.as_bytes())
        .map_err(|_| FrameError::PayloadTooLarge)?;

    Frame::new(msg_type, &payload)
}

/// Decode `[path_len][path][value]`
fn split_key_value(payload: &[u8]) -> Result<(&str, &str), FrameError> {
    let (&path_len, rest) = payload.split_first().ok_or(FrameError::InvalidFrame)?;
    let path_len = path_len as usize;
    if path_len > rest.len() {
        return Err(FrameError::InvalidFrame);
    }

    let (path, value) = rest.split_at(path_len);
    let path = core::str::from_utf8(path).map_err(|_| FrameError::InvalidFrame)?;
    let value = core::str::from_utf8(value).map_err(|_| FrameError::InvalidFrame)?;
    Ok((path, value))
}

/// Messages from the robot to the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RobotMessage<'a> {
    /// Write a value under a database path
    Publish { path: &'a str, value: &'a str },
    /// Heartbeat response
    Pong,
}

impl<'a> RobotMessage<'a> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            RobotMessage::Publish { path, value } => key_value_frame(MSG_PUBLISH, path, value),
            RobotMessage::Pong => Ok(Frame::empty(MSG_PONG)),
        }
    }

    /// Parse a message from a frame (for testing or simulation)
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_PUBLISH => {
                let (path, value) = split_key_value(&frame.payload)?;
                Ok(RobotMessage::Publish { path, value })
            }
            MSG_PONG => Ok(RobotMessage::Pong),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

/// Commands parsed from bridge-originated frames
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeCommand<'a> {
    /// A database path changed
    Set { path: &'a str, value: &'a str },
    /// Heartbeat request
    Ping,
}

impl<'a> BridgeCommand<'a> {
    /// Parse a command from a frame
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_SET => {
                let (path, value) = split_key_value(&frame.payload)?;
                Ok(BridgeCommand::Set { path, value })
            }
            MSG_PING => Ok(BridgeCommand::Ping),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this command into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            BridgeCommand::Set { path, value } => key_value_frame(MSG_SET, path, value),
            BridgeCommand::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_layout() {
        let msg = RobotMessage::Publish {
            path: "/robot/status",
            value: "moving",
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_PUBLISH);
        assert_eq!(frame.payload[0], 13);
        assert_eq!(&frame.payload[1..14], b"/robot/status");
        assert_eq!(&frame.payload[14..], b"moving");
    }

    #[test]
    fn test_pong() {
        let frame = RobotMessage::Pong.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_PONG);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_bridge_set() {
        let frame = Frame::new(MSG_SET, b"\x0b/robot/modeautonomous").unwrap();
        let cmd = BridgeCommand::from_frame(&frame).unwrap();
        assert_eq!(
            cmd,
            BridgeCommand::Set {
                path: "/robot/mode",
                value: "autonomous"
            }
        );
    }

    #[test]
    fn test_bridge_set_empty_value() {
        let frame = Frame::new(MSG_SET, b"\x0e/robot/command").unwrap();
        let cmd = BridgeCommand::from_frame(&frame).unwrap();
        assert_eq!(
            cmd,
            BridgeCommand::Set {
                path: "/robot/command",
                value: ""
            }
        );
    }

    #[test]
    fn test_bridge_ping() {
        let frame = Frame::empty(MSG_PING);
        assert_eq!(BridgeCommand::from_frame(&frame), Ok(BridgeCommand::Ping));
    }

    #[test]
    fn test_malformed_key_value() {
        // Path length past the end
        let frame = Frame::new(MSG_SET, &[20, b'/', b'r']).unwrap();
        assert_eq!(BridgeCommand::from_frame(&frame), Err(FrameError::InvalidFrame));

        // Empty payload
        let frame = Frame::empty(MSG_SET);
        assert_eq!(BridgeCommand::from_frame(&frame), Err(FrameError::InvalidFrame));

        // Invalid UTF-8
        let frame = Frame::new(MSG_SET, &[1, b'/', 0xFF]).unwrap();
        assert_eq!(BridgeCommand::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_unknown_type() {
        let frame = Frame::empty(0x7F);
        assert_eq!(BridgeCommand::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_path_too_long() {
        let path = "/robot/aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
        let msg = RobotMessage::Publish { path, value: "x" };
        assert_eq!(msg.to_frame(), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_set_through_wire() {
        let original = BridgeCommand::Set {
            path: "/robot/speed",
            value: "200",
        };
        let bytes = original.to_frame().unwrap().encode_to_vec().unwrap();

        let mut parser = crate::frame::FrameParser::new();
        let frame = parser.feed_bytes(&bytes).unwrap().unwrap();
        assert_eq!(BridgeCommand::from_frame(&frame).unwrap(), original);
    }
}
