/*!
    The boundary to the native container/codec library.

    Demuxing itself is out of scope for this crate: containers are parsed by
    an opaque native library behind the [`Demuxer`] trait. The trait mirrors
    the shape of that boundary — open, enumerate streams, read interleaved
    packets, seek, and register an interrupt poll so blocking I/O (e.g. a
    network-backed container) can be cancelled promptly.
*/

use std::time::Duration;

use avsource_types::{Packet, Result, StreamInfo};

use crate::abort::InterruptPoll;

/**
    The result of one read attempt against a container.
*/
#[derive(Clone, Debug)]
pub enum ReadOutcome {
    /// One demuxed packet, in file order, interleaved between streams.
    Packet(Packet),
    /// A transient condition (EAGAIN-style). The caller should retry.
    Again,
    /// End of container. Recoverable via seek.
    Eof,
}

/**
    An opened media container.

    Implementations wrap a native demuxing library. All mutation goes through
    `&mut self`; the ingestion layer serializes access behind its container
    lock and never exposes the handle to consumer threads.

    Fatal read failures are reported as `Err`; transient ones as
    [`ReadOutcome::Again`].
*/
pub trait Demuxer: Send {
    /// The streams found in this container.
    fn streams(&self) -> &[StreamInfo];

    /// Container start time, if reported.
    fn start_time(&self) -> Option<Duration>;

    /// Container duration, if reported.
    fn duration(&self) -> Option<Duration>;

    /// Read the next interleaved packet.
    fn read_packet(&mut self) -> Result<ReadOutcome>;

    /**
        Reposition the container.

        `ts` is expressed in the time base of `stream_index`. `backward`
        requests the nearest preceding keyframe. On error the read position is
        unchanged.
    */
    fn seek(&mut self, stream_index: usize, ts: i64, backward: bool) -> Result<()>;

    /**
        Register an interrupt poll with the native I/O layer.

        Implementations that cannot interrupt blocking I/O may ignore this;
        teardown latency is then bounded by one full native read instead.
    */
    fn set_interrupt(&mut self, poll: InterruptPoll) {
        let _ = poll;
    }
}

/**
    Opens a demuxer. Held by the facade so `reset()` can reopen the container
    from scratch.
*/
pub type DemuxerOpener = dyn Fn() -> Result<Box<dyn Demuxer>> + Send + Sync;
