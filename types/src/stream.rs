/*!
    Stream information types.
*/

use std::time::Duration;

/**
    A rational number, used for stream time bases.

    A time base of `1/90000` means timestamps count in 90 kHz ticks.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    /**
        Create a new rational. `den` must be non-zero.
    */
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /**
        Returns the rational as a float.
    */
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /**
        Rescale a wall-clock duration into ticks of this time base.

        This is the conversion a seek performs: a target position expressed as
        a `Duration` becomes a timestamp in the stream's native units.
    */
    pub fn duration_to_ts(self, duration: Duration) -> i64 {
        (duration.as_secs_f64() * self.den as f64 / self.num as f64).round() as i64
    }

    /**
        Convert a timestamp in ticks of this time base into a duration.

        Negative timestamps saturate to zero.
    */
    pub fn ts_to_duration(self, ts: i64) -> Duration {
        let seconds = ts as f64 * self.num as f64 / self.den as f64;
        if seconds <= 0.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(seconds)
        }
    }
}

/**
    The kind of elementary stream a packet belongs to.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamType {
    Video,
    Audio,
}

/**
    Codecs commonly encountered at the demux boundary.

    This is a subset; containers carrying anything else report `Unknown` and
    rely on `extradata` for decoder setup.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecId {
    H264,
    H265,
    Vp8,
    Vp9,
    Av1,
    Mpeg2,
    Aac,
    Ac3,
    Eac3,
    Mp3,
    Opus,
    Vorbis,
    Flac,
    Pcm,
    Unknown,
}

/**
    Per-stream decode metadata reported by a container.

    The codec parameters are opaque to the ingestion layer — they are carried
    through to whatever decoder consumes the packets.
*/
#[derive(Clone, Debug)]
pub struct StreamInfo {
    /// Stream index within the container.
    pub index: usize,
    /// Whether this is a video or audio stream.
    pub stream_type: StreamType,
    /// Time base for this stream's timestamps.
    pub time_base: Rational,
    /// Stream start time, if the container reports one.
    pub start_time: Option<Duration>,
    /// Stream duration, if the container reports one.
    pub duration: Option<Duration>,
    /// Codec used.
    pub codec_id: CodecId,
    /// Codec extradata (SPS/PPS for H.264, AudioSpecificConfig for AAC, etc.).
    pub extradata: Option<Vec<u8>>,
}
