/*!
    The background reader loop.

    One dedicated thread per open input. The loop pulls packets from the
    container, classifies each read (data, transient, end-of-container, fatal)
    and pushes tracked packets into the bounded output queue. Backpressure is
    the blocking push — there is no other rate limiting.
*/

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, warn};

use crate::abort::AbortGuard;
use crate::container::Container;
use crate::demuxer::ReadOutcome;
use crate::graph::{Graph, INPUT_BUFFER_TAG, SEEK_TAG};
use crate::queue::{PacketQueue, PushResult};

/**
    State shared between the facade and the reader thread.

    Field order matters in one place: the queue is declared before the
    container so packets are dropped before the demuxer handle they may
    reference.
*/
pub(crate) struct Shared {
    pub(crate) queue: PacketQueue,
    pub(crate) container: Mutex<Container>,
    pub(crate) paused: AtomicBool,
    pub(crate) eof: AtomicBool,
    pub(crate) abort: AbortGuard,
    /// Idle-wait lock for the condvar below; never held while reading.
    pub(crate) wake: Mutex<()>,
    pub(crate) cond: Condvar,
    pub(crate) graph: Arc<dyn Graph>,
    pub(crate) name: String,
}

impl Shared {
    /**
        Wake the reader from a paused or EOF idle wait so it re-checks the
        flags.
    */
    pub(crate) fn notify(&self) {
        let _guard = self.wake.lock();
        self.cond.notify_all();
    }

    fn state(&self) -> ReaderState {
        if self.abort.is_set() {
            ReaderState::Aborted
        } else if self.paused.load(Ordering::Acquire) {
            ReaderState::Paused
        } else if self.eof.load(Ordering::Acquire) {
            ReaderState::Eof
        } else {
            ReaderState::Reading
        }
    }
}

/// Loop and bounds configuration, fixed at open.
#[derive(Clone, Debug)]
pub(crate) struct ReaderConfig {
    pub(crate) loop_playback: bool,
    pub(crate) start: Option<Duration>,
    pub(crate) end: Option<Duration>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReaderState {
    Paused,
    Reading,
    Eof,
    Aborted,
}

pub(crate) fn run(shared: Arc<Shared>, config: ReaderConfig) {
    debug!(input = %shared.name, "reader loop started");

    loop {
        match shared.state() {
            ReaderState::Aborted => break,
            ReaderState::Paused | ReaderState::Eof => idle(&shared),
            ReaderState::Reading => read_step(&shared, &config),
        }
    }

    debug!(input = %shared.name, "reader loop stopped");
}

/// Wait until unpaused, seeked out of EOF, or aborted.
fn idle(shared: &Shared) {
    let mut guard = shared.wake.lock();
    while matches!(shared.state(), ReaderState::Paused | ReaderState::Eof) {
        shared.cond.wait(&mut guard);
    }
}

fn read_step(shared: &Shared, config: &ReaderConfig) {
    let mut container = shared.container.lock();
    // Snapshot under the container lock: any flush that happens after this
    // point bumps the epoch and the in-flight packet is dropped in push.
    let epoch = shared.queue.epoch();

    match container.read() {
        Ok(ReadOutcome::Packet(packet)) => {
            if !container.is_tracked(packet.stream_index) {
                return;
            }
            if past_end(config, &container, &packet) {
                end_of_container(shared, config, &mut container);
                return;
            }
            // Release the container lock before the potentially long block in
            // push, so seek and metadata calls stay responsive.
            drop(container);
            if shared.queue.push(packet, epoch) == PushResult::Pushed {
                shared
                    .graph
                    .update_value(INPUT_BUFFER_TAG, shared.queue.fill_ratio());
            }
        }
        Ok(ReadOutcome::Again) => {
            // Transient; retry on the next pass.
        }
        Ok(ReadOutcome::Eof) => end_of_container(shared, config, &mut container),
        Err(error) => {
            // No synchronous caller on this thread: log and end the stream.
            warn!(input = %shared.name, %error, "fatal read error, forcing end of stream");
            shared.eof.store(true, Ordering::Release);
        }
    }
}

/// A configured end bound turns the packet that crosses it into EOF.
fn past_end(
    config: &ReaderConfig,
    container: &Container,
    packet: &avsource_types::Packet,
) -> bool {
    let Some(end) = config.end else {
        return false;
    };
    packet.stream_index == container.default_stream()
        && packet.presentation_time().is_some_and(|pts| pts >= end)
}

fn end_of_container(shared: &Shared, config: &ReaderConfig, container: &mut Container) {
    if config.loop_playback {
        let start = config.start.unwrap_or(Duration::ZERO);
        match container.seek_to(start, true) {
            Ok(()) => {
                shared.queue.flush();
                shared.graph.add_tag(SEEK_TAG);
                debug!(input = %shared.name, "looped back to start");
            }
            Err(error) => {
                warn!(input = %shared.name, %error, "loop seek failed, forcing end of stream");
                shared.eof.store(true, Ordering::Release);
            }
        }
    } else {
        debug!(input = %shared.name, "end of container");
        shared.eof.store(true, Ordering::Release);
    }
}
