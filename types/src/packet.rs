/*!
    The demuxed packet type.
*/

use std::sync::Arc;
use std::time::Duration;

use crate::{Rational, StreamType};

/**
    A single demuxed unit: an opaque, immutable, reference-counted payload
    tagged with a stream index and timestamps.

    Packets are produced by the reader loop, buffered in the output queue and
    handed to the consumer on pop. Cloning is cheap — the payload is shared.

    A zero-length *flush marker* (see [`Packet::flush_marker`]) signals a
    position discontinuity to downstream consumers: decoders should drop any
    partially-assembled state when they see one. Markers belong to no stream,
    so consumers must check [`Packet::is_flush`] before interpreting the
    stream or timestamp fields.
*/
#[derive(Clone, Debug)]
pub struct Packet {
    data: Arc<[u8]>,
    flush: bool,
    /// Stream index within the container.
    pub stream_index: usize,
    /// Whether this packet belongs to a video or audio stream.
    pub stream_type: StreamType,
    /// Presentation timestamp in `time_base` ticks, if the container reported one.
    pub pts: Option<i64>,
    /// Decode timestamp in `time_base` ticks, if the container reported one.
    pub dts: Option<i64>,
    /// Playout duration of this packet, if known.
    pub duration: Option<Duration>,
    /// Time base the timestamps are expressed in.
    pub time_base: Rational,
    /// Whether this packet starts a keyframe.
    pub is_keyframe: bool,
}

impl Packet {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        data: Vec<u8>,
        stream_index: usize,
        stream_type: StreamType,
        pts: Option<i64>,
        dts: Option<i64>,
        duration: Option<Duration>,
        time_base: Rational,
        is_keyframe: bool,
    ) -> Self {
        Self {
            data: data.into(),
            flush: false,
            stream_index,
            stream_type,
            pts,
            dts,
            duration,
            time_base,
            is_keyframe,
        }
    }

    /**
        Create a flush marker: a payload-less packet signalling a discontinuity.

        The marker applies to every stream in the container. Its stream index
        matches no real stream, and its remaining fields are placeholders —
        check [`Packet::is_flush`] before reading them.
    */
    pub fn flush_marker() -> Self {
        Self {
            data: Vec::new().into(),
            flush: true,
            stream_index: usize::MAX,
            stream_type: StreamType::Video,
            pts: None,
            dts: None,
            duration: None,
            time_base: Rational::new(1, 1),
            is_keyframe: false,
        }
    }

    /**
        Returns true if this packet is a flush marker rather than media data.
    */
    pub fn is_flush(&self) -> bool {
        self.flush
    }

    /**
        The packet payload. Empty for flush markers.
    */
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /**
        The presentation timestamp as a wall-clock position, if present.
    */
    pub fn presentation_time(&self) -> Option<Duration> {
        self.pts.map(|pts| self.time_base.ts_to_duration(pts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_marker_is_empty_and_flagged() {
        let marker = Packet::flush_marker();
        assert!(marker.is_flush());
        assert!(marker.is_empty());
        assert_eq!(marker.presentation_time(), None);
    }

    #[test]
    fn flush_marker_matches_no_real_stream() {
        // An audio-only consumer filtering on stream index must not be able
        // to mistake the marker for a media packet of some stream.
        let marker = Packet::flush_marker();
        assert_eq!(marker.stream_index, usize::MAX);
    }

    #[test]
    fn presentation_time_uses_time_base() {
        let packet = Packet::new(
            vec![0u8; 16],
            0,
            StreamType::Video,
            Some(90000),
            None,
            None,
            Rational::new(1, 90000),
            true,
        );
        assert!(!packet.is_flush());
        assert_eq!(packet.presentation_time(), Some(Duration::from_secs(1)));
        assert_eq!(packet.len(), 16);
    }

    #[test]
    fn clones_share_payload() {
        let packet = Packet::new(
            vec![1, 2, 3],
            1,
            StreamType::Audio,
            Some(0),
            Some(0),
            None,
            Rational::new(1, 48000),
            false,
        );
        let clone = packet.clone();
        assert_eq!(packet.data().as_ptr(), clone.data().as_ptr());
    }
}
