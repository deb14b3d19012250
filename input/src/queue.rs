/*!
    The bounded output queue between the reader loop and the consumer.
*/

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

use avsource_types::Packet;

use crate::abort::AbortGuard;

struct QueueInner {
    packets: VecDeque<Packet>,
    capacity: usize,
    /// Bumped on every flush. Packets read before a flush carry the old epoch
    /// and are dropped instead of being delivered after the marker.
    epoch: u64,
}

/**
    What became of a push attempt.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushResult {
    /// The packet was enqueued.
    Pushed,
    /// The queue was flushed after the packet was read; the packet was dropped.
    Stale,
    /// Abort was requested while waiting for space; the packet was dropped.
    Aborted,
}

/**
    A thread-safe bounded FIFO of packets.

    Single producer (the reader loop), consumer calls from the facade.
    `push` blocks while the queue is at capacity; `try_pop` never blocks.
    Length never exceeds the capacity fixed at construction.
*/
pub struct PacketQueue {
    inner: Mutex<QueueInner>,
    not_full: Condvar,
    abort: AbortGuard,
}

impl PacketQueue {
    /**
        Create a queue. `capacity` must be non-zero — a zero-capacity queue
        could never accept a packet.
    */
    pub fn new(capacity: usize, abort: AbortGuard) -> Self {
        assert!(capacity > 0, "packet queue capacity must be non-zero");
        Self {
            inner: Mutex::new(QueueInner {
                packets: VecDeque::with_capacity(capacity),
                capacity,
                epoch: 0,
            }),
            not_full: Condvar::new(),
            abort,
        }
    }

    /**
        The current flush epoch. The producer snapshots this while it still
        holds the container lock, so a seek that flushes in between is
        detected and the stale packet discarded.
    */
    pub fn epoch(&self) -> u64 {
        self.inner.lock().epoch
    }

    /**
        Enqueue a packet, blocking while the queue is full.

        Wakes on consumer pops, on flush, and on abort. Returns without
        inserting if abort was requested or the queue was flushed since
        `epoch` was taken.
    */
    pub fn push(&self, packet: Packet, epoch: u64) -> PushResult {
        let mut inner = self.inner.lock();

        // A flush may refill the queue with its marker before the producer
        // wakes, so the epoch is part of the wait predicate: a stale producer
        // must exit rather than re-block on the post-flush contents.
        while inner.packets.len() >= inner.capacity
            && !self.abort.is_set()
            && inner.epoch == epoch
        {
            self.not_full.wait(&mut inner);
        }

        if self.abort.is_set() {
            return PushResult::Aborted;
        }
        if inner.epoch != epoch {
            return PushResult::Stale;
        }

        inner.packets.push_back(packet);
        PushResult::Pushed
    }

    /**
        Dequeue the oldest packet, or `None` if the queue is empty.
        Never blocks.
    */
    pub fn try_pop(&self) -> Option<Packet> {
        let mut inner = self.inner.lock();
        let packet = inner.packets.pop_front();
        if packet.is_some() {
            self.not_full.notify_one();
        }
        packet
    }

    /**
        Atomically drop all queued packets and enqueue a single flush marker.
        Wakes a blocked producer.
    */
    pub fn flush(&self) {
        let mut inner = self.inner.lock();
        inner.packets.clear();
        inner.packets.push_back(Packet::flush_marker());
        inner.epoch += 1;
        self.not_full.notify_all();
    }

    /**
        Wake a producer blocked in `push` so it can observe the abort flag.
    */
    pub fn wake_producer(&self) {
        let _inner = self.inner.lock();
        self.not_full.notify_all();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().packets.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity
    }

    /**
        Fill ratio in `[0, 1]`, for instrumentation.
    */
    pub fn fill_ratio(&self) -> f64 {
        let inner = self.inner.lock();
        inner.packets.len() as f64 / inner.capacity as f64
    }
}
