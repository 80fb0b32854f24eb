//! Bridge UART receive task
//!
//! Receives frames from the network bridge, parses key writes into
//! remote updates and records heartbeats.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use linebot_hal::MonotonicClock;
use linebot_hal_rp2040::EmbassyClock;
use linebot_protocol::{parse_update, BridgeCommand, FrameParser, UpdateError};

use crate::channels::PONG_REQUEST;
use crate::context::SyncContext;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Bridge RX task - receives and parses frames from the bridge
#[embassy_executor::task]
pub async fn bridge_rx_task(mut rx: BufferedUartRx, ctx: &'static SyncContext) {
    info!("Bridge RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match BridgeCommand::from_frame(&frame) {
                            Ok(cmd) => handle_bridge_command(cmd, ctx),
                            Err(e) => warn!("Failed to parse bridge command: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("UART read error: {:?}", e),
        }
    }
}

/// Handle a parsed bridge command
fn handle_bridge_command(cmd: BridgeCommand<'_>, ctx: &SyncContext) {
    match cmd {
        BridgeCommand::Ping => {
            trace!("PING received");
            ctx.heartbeat();
            PONG_REQUEST.signal(());
        }
        BridgeCommand::Set { path, value } => match parse_update(path, value) {
            Ok(update) => {
                debug!("Remote update: {:?}", update);
                ctx.apply(update, EmbassyClock.now_ms());
            }
            // Our own status writes come back through the bridge
            Err(UpdateError::InvalidStatus) => trace!("Status echo: {}", value),
            Err(e) => warn!("Rejected write to {}: {:?}", path, e),
        },
    }
}
