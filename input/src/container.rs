/*!
    The opened container resource.

    Wraps the demuxer handle together with the per-stream metadata the
    ingestion layer needs: which stream indices are tracked, which stream
    drives seeks, and the cached start time / duration snapshot. The raw
    handle is never exposed outside the crate; all access goes through the
    facade's container lock.
*/

use std::time::Duration;

use avsource_types::{Error, Rational, Result, StreamType};

use crate::abort::InterruptPoll;
use crate::demuxer::{Demuxer, DemuxerOpener, ReadOutcome};

pub(crate) struct Container {
    demuxer: Box<dyn Demuxer>,
    video_index: Option<usize>,
    audio_index: Option<usize>,
    /// The stream whose time base seek targets are converted into. Video if
    /// present, otherwise audio.
    default_stream: usize,
    default_time_base: Rational,
    start_time: Option<Duration>,
    duration: Option<Duration>,
}

impl Container {
    /**
        Open the container and select the tracked streams.

        The first video and first audio stream are tracked; everything else is
        discarded at read time. Fails with a stream-info error if neither
        exists.
    */
    pub fn open(opener: &DemuxerOpener, interrupt: InterruptPoll) -> Result<Self> {
        let mut demuxer = opener()?;
        demuxer.set_interrupt(interrupt);

        let mut video: Option<(usize, Rational)> = None;
        let mut audio: Option<(usize, Rational)> = None;
        for info in demuxer.streams() {
            match info.stream_type {
                StreamType::Video if video.is_none() => {
                    video = Some((info.index, info.time_base));
                }
                StreamType::Audio if audio.is_none() => {
                    audio = Some((info.index, info.time_base));
                }
                _ => {}
            }
        }

        let (default_stream, default_time_base) = video
            .or(audio)
            .ok_or_else(|| Error::stream_info("container has no video or audio stream"))?;

        let start_time = demuxer.start_time();
        let duration = demuxer.duration();

        Ok(Self {
            demuxer,
            video_index: video.map(|(index, _)| index),
            audio_index: audio.map(|(index, _)| index),
            default_stream,
            default_time_base,
            start_time,
            duration,
        })
    }

    pub fn read(&mut self) -> Result<ReadOutcome> {
        self.demuxer.read_packet()
    }

    /**
        Convert `target` into the default stream's time base and reposition
        the container. On error the read position is unchanged.
    */
    pub fn seek_to(&mut self, target: Duration, backward: bool) -> Result<()> {
        let ts = self.default_time_base.duration_to_ts(target);
        self.demuxer.seek(self.default_stream, ts, backward)
    }

    /// Whether packets from this stream index should be delivered.
    pub fn is_tracked(&self, index: usize) -> bool {
        self.video_index == Some(index) || self.audio_index == Some(index)
    }

    pub fn default_stream(&self) -> usize {
        self.default_stream
    }

    pub fn start_time(&self) -> Option<Duration> {
        self.start_time
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}
