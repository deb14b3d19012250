/*!
    Bounded-buffer media container ingestion.

    This crate provides the single-container, single-reader-thread ingestion
    primitive of the avsource ecosystem: open a container, demux it on a
    dedicated background thread, and hand packets to the consumer through a
    capacity-limited queue with backpressure.

    The container format itself is parsed by an opaque native library behind
    the [`Demuxer`] trait; this crate owns the concurrency contract around it:
    pause, seek with flush, loop playback, EOF handling, and bounded-time
    teardown.

    ```no_run
    use avsource_input::{Input, InputOptions};
    # fn demo(opener: impl Fn() -> avsource_types::Result<Box<dyn avsource_input::Demuxer>> + Send + Sync + 'static) -> avsource_types::Result<()> {
    let input = Input::open("clip.mov", opener, InputOptions::default())?;
    input.set_paused(false);

    // Once per output tick:
    let mut bytes = 0;
    input.drain(|packet| {
        bytes += packet.len();
        true
    });
    # Ok(())
    # }
    ```
*/

mod abort;
mod container;
mod demuxer;
mod graph;
mod input;
mod queue;
mod reader;
mod seek;

pub use abort::{AbortGuard, InterruptPoll};
pub use demuxer::{Demuxer, DemuxerOpener, ReadOutcome};
pub use graph::{Color, Graph, INPUT_BUFFER_TAG, NoopGraph, SEEK_TAG};
pub use input::{Input, InputOptions};
pub use queue::{PacketQueue, PushResult};

pub use avsource_types::{Error, Packet, Result};
