//! Bridge UART transmit task
//!
//! Publishes the boot values once, then telemetry at a fixed interval,
//! and answers heartbeats. `/robot/status` is only rewritten when it
//! changes, or after the link comes back.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;

use linebot_hal::MonotonicClock;
use linebot_hal_rp2040::EmbassyClock;
use linebot_protocol::frame::MAX_FRAME_SIZE;
use linebot_protocol::keys::{
    initial_publications, telemetry_publications, Publications, StatusLatch,
};
use linebot_protocol::RobotMessage;

use crate::channels::PONG_REQUEST;
use crate::context::SyncContext;

/// Bridge TX task - sends publications and heartbeat responses
#[embassy_executor::task]
pub async fn bridge_tx_task(
    mut tx: BufferedUartTx,
    ctx: &'static SyncContext,
    interval_ms: u32,
    cruise_speed: u8,
) {
    info!("Bridge TX task started");

    publish_all(&mut tx, &initial_publications(cruise_speed)).await;
    info!("Initial values published");

    let clock = EmbassyClock;
    let mut ticker = Ticker::every(Duration::from_millis(interval_ms as u64));
    let mut last_tick_ms = clock.now_ms();
    let mut link_up = false;
    let mut status = StatusLatch::new();

    loop {
        match select(PONG_REQUEST.wait(), ticker.next()).await {
            Either::First(()) => {
                send(&mut tx, &RobotMessage::Pong).await;
                trace!("PONG sent");
            }
            Either::Second(()) => {
                let now_ms = clock.now_ms();
                let healthy = ctx.tick_link(now_ms.wrapping_sub(last_tick_ms));
                last_tick_ms = now_ms;

                if healthy != link_up {
                    if healthy {
                        info!("Bridge link up");
                        status.forget();
                    } else {
                        warn!("Bridge link lost");
                    }
                    link_up = healthy;
                }

                if let Some(telemetry) = ctx.latest_telemetry() {
                    publish_all(&mut tx, &telemetry_publications(&telemetry, &mut status)).await;
                }
            }
        }
    }
}

/// Send every key/value pair of a batch
async fn publish_all(tx: &mut BufferedUartTx, batch: &Publications) {
    for (path, value) in batch.iter() {
        send(
            tx,
            &RobotMessage::Publish {
                path: *path,
                value: value.as_str(),
            },
        )
        .await;
    }
}

/// Encode and write one message
async fn send(tx: &mut BufferedUartTx, msg: &RobotMessage<'_>) {
    let frame = match msg.to_frame() {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Failed to encode bridge message: {:?}", e);
            return;
        }
    };

    let mut buf = [0u8; MAX_FRAME_SIZE];
    if let Ok(len) = frame.encode(&mut buf) {
        if let Err(e) = tx.write_all(&buf[..len]).await {
            warn!("Bridge write failed: {:?}", e);
        }
    }
}
