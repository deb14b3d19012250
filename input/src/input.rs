/*!
    The input facade.
*/

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use tracing::info;

use avsource_types::{Error, Packet, Result};

use crate::abort::AbortGuard;
use crate::container::Container;
use crate::demuxer::{Demuxer, DemuxerOpener};
use crate::graph::{Color, Graph, INPUT_BUFFER_TAG, NoopGraph, SEEK_TAG};
use crate::queue::PacketQueue;
use crate::reader::{self, ReaderConfig, Shared};
use crate::seek;

/**
    Options for opening an [`Input`].

    Inputs start paused by default: nothing is read until the first
    `set_paused(false)`, mirroring real-time playout control where production
    begins on an explicit cue.
*/
#[derive(Clone, Debug)]
pub struct InputOptions {
    /// Seek back to `start` instead of ending when the container runs out.
    pub loop_playback: bool,
    /// Position to seek to before reading begins.
    pub start: Option<Duration>,
    /// Position at which reading is treated as end-of-container.
    pub end: Option<Duration>,
    /// Output queue capacity in packets.
    pub queue_capacity: usize,
    /// Whether the reader starts suspended.
    pub start_paused: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            loop_playback: false,
            start: None,
            end: None,
            queue_capacity: 64,
            start_paused: true,
        }
    }
}

/**
    An open media container with a dedicated background reader.

    The reader thread demuxes the container into packets and buffers them in a
    bounded queue; the consumer drains that queue on its own schedule via
    [`Input::drain`]. Dropping the input aborts the reader and joins it —
    teardown completes in bounded time even with a full queue and no consumer,
    because the blocking push observes the abort flag.
*/
pub struct Input {
    shared: Arc<Shared>,
    opener: Box<DemuxerOpener>,
    config: ReaderConfig,
    thread: Option<JoinHandle<()>>,
}

impl Input {
    /**
        Open a container and start the reader thread.

        `opener` is kept so [`Input::reset`] can reopen the container from
        scratch. `name` only labels logs and instrumentation. If the opener
        fails or no usable stream is found, no thread is started.
    */
    pub fn open<O>(name: impl Into<String>, opener: O, options: InputOptions) -> Result<Self>
    where
        O: Fn() -> Result<Box<dyn Demuxer>> + Send + Sync + 'static,
    {
        Self::open_with_graph(name, opener, options, Arc::new(NoopGraph))
    }

    /**
        Like [`Input::open`], with an instrumentation graph attached.
    */
    pub fn open_with_graph<O>(
        name: impl Into<String>,
        opener: O,
        options: InputOptions,
        graph: Arc<dyn Graph>,
    ) -> Result<Self>
    where
        O: Fn() -> Result<Box<dyn Demuxer>> + Send + Sync + 'static,
    {
        let name = name.into();

        if options.queue_capacity == 0 {
            return Err(Error::open("queue capacity must be non-zero"));
        }
        if let Some(end) = options.end {
            if end <= options.start.unwrap_or(Duration::ZERO) {
                return Err(Error::open("end position must be after start position"));
            }
        }

        let opener: Box<DemuxerOpener> = Box::new(opener);
        let abort = AbortGuard::new();

        let mut container = Container::open(&*opener, abort.poll())?;
        if let Some(start) = options.start {
            if start > Duration::ZERO {
                container.seek_to(start, true)?;
            }
        }

        graph.set_color(INPUT_BUFFER_TAG, Color::new(1.0, 1.0, 0.0));
        graph.set_color(SEEK_TAG, Color::new(0.5, 1.0, 0.5));

        let shared = Arc::new(Shared {
            queue: PacketQueue::new(options.queue_capacity, abort.clone()),
            container: Mutex::new(container),
            paused: AtomicBool::new(options.start_paused),
            eof: AtomicBool::new(false),
            abort,
            wake: Mutex::new(()),
            cond: Condvar::new(),
            graph,
            name: name.clone(),
        });

        let config = ReaderConfig {
            loop_playback: options.loop_playback,
            start: options.start,
            end: options.end,
        };

        let thread = {
            let shared = Arc::clone(&shared);
            let config = config.clone();
            thread::spawn(move || reader::run(shared, config))
        };

        info!(input = %name, "started");

        Ok(Self {
            shared,
            opener,
            config,
            thread: Some(thread),
        })
    }

    /**
        Drain queued packets into `sink`.

        Pops packets in read order while the queue is non-empty and `sink`
        returns `true`; returns the number of packets handed over. Never
        blocks — an empty queue yields zero immediately, so consumers can poll
        this once per output tick. Flush markers are delivered (and counted)
        like any other packet.
    */
    pub fn drain(&self, mut sink: impl FnMut(Packet) -> bool) -> usize {
        let mut consumed = 0;
        while let Some(packet) = self.shared.queue.try_pop() {
            consumed += 1;
            if !sink(packet) {
                break;
            }
        }
        consumed
    }

    /**
        Container start time, if reported. Stable until `reset()`.
    */
    pub fn start_time(&self) -> Option<Duration> {
        self.shared.container.lock().start_time()
    }

    /**
        Container duration, if reported. Unaffected by seeks.
    */
    pub fn duration(&self) -> Option<Duration> {
        self.shared.container.lock().duration()
    }

    pub fn paused(&self) -> bool {
        self.shared.paused.load(Ordering::Acquire)
    }

    /**
        Suspend or resume production. Pausing halts further reads without
        discarding queued packets; they stay poppable through `drain`.
    */
    pub fn set_paused(&self, paused: bool) {
        self.shared.paused.store(paused, Ordering::Release);
        if !paused {
            self.shared.notify();
        }
    }

    /**
        True once the reader has hit end-of-container (or a fatal read error)
        with looping disabled. Cleared by `seek()` and `reset()`.
    */
    pub fn eof(&self) -> bool {
        self.shared.eof.load(Ordering::Acquire)
    }

    /// Number of packets currently buffered.
    pub fn buffered(&self) -> usize {
        self.shared.queue.len()
    }

    /**
        Reposition the container.

        With `flush`, the queue is atomically cleared and a flush marker
        queued so downstream consumers reset their state. On error nothing
        changes. A successful seek clears `eof`.
    */
    pub fn seek(&self, target: Duration, flush: bool) -> Result<()> {
        seek::seek(&self.shared, target, flush)
    }

    /**
        Tear the container down and reopen it from scratch, reapplying the
        configured start position. Clears `eof` and flushes the queue.
    */
    pub fn reset(&self) -> Result<()> {
        let mut container = self.shared.container.lock();

        let mut reopened = Container::open(&*self.opener, self.shared.abort.poll())?;
        if let Some(start) = self.config.start {
            if start > Duration::ZERO {
                reopened.seek_to(start, true)?;
            }
        }
        *container = reopened;

        self.shared.eof.store(false, Ordering::Release);
        self.shared.queue.flush();
        drop(container);

        self.shared.notify();
        info!(input = %self.shared.name, "reset");
        Ok(())
    }
}

impl Drop for Input {
    fn drop(&mut self) {
        self.shared.abort.set();
        self.shared.queue.wake_producer();
        self.shared.notify();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        info!(input = %self.shared.name, "stopped");
    }
}
