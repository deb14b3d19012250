/*!
    Seek control.

    Translates a wall-clock target into the container's native units, issues
    the native seek, and keeps the queue and EOF flag consistent with the new
    position. On failure nothing is touched — the queue keeps its packets and
    the read position stays where it was.
*/

use std::sync::atomic::Ordering;
use std::time::Duration;

use avsource_types::Result;
use tracing::debug;

use crate::graph::SEEK_TAG;
use crate::reader::Shared;

pub(crate) fn seek(shared: &Shared, target: Duration, flush: bool) -> Result<()> {
    let mut container = shared.container.lock();
    container.seek_to(target, true)?;

    // Order matters: EOF is cleared and the queue flushed while still holding
    // the container lock, so no pre-seek packet can land after the marker.
    shared.eof.store(false, Ordering::Release);
    if flush {
        shared.queue.flush();
    }
    drop(container);

    shared.graph.add_tag(SEEK_TAG);
    shared.notify();
    debug!(input = %shared.name, ?target, flush, "seeked");
    Ok(())
}
