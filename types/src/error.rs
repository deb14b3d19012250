/*!
    Error types shared across the avsource ecosystem.
*/

use thiserror::Error;

/**
    Convenience alias used throughout the ecosystem.
*/
pub type Result<T> = std::result::Result<T, Error>;

/**
    Errors surfaced at the demux boundary.

    `Open` and `StreamInfo` can only occur while opening or resetting a
    container. `Seek` leaves the container and any queued packets untouched.
    `Read` is the *fatal* read error; transient read conditions are not errors
    at all — the demuxer reports them as a retryable outcome instead.
*/
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The container could not be opened: unreadable path or unrecognized format.
    #[error("failed to open container: {0}")]
    Open(String),

    /// The container opened, but no usable audio or video stream was found.
    #[error("no usable audio or video stream: {0}")]
    StreamInfo(String),

    /// A fatal demux read failure. Ends playback as if the stream had ended.
    #[error("demux read failed: {0}")]
    Read(String),

    /// The container rejected a seek target.
    #[error("seek rejected: {0}")]
    Seek(String),

    /// An I/O error from the underlying resource.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /**
        Create an `Open` error from any message.
    */
    pub fn open(msg: impl Into<String>) -> Self {
        Self::Open(msg.into())
    }

    /**
        Create a `StreamInfo` error from any message.
    */
    pub fn stream_info(msg: impl Into<String>) -> Self {
        Self::StreamInfo(msg.into())
    }

    /**
        Create a `Read` error from any message.
    */
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    /**
        Create a `Seek` error from any message.
    */
    pub fn seek(msg: impl Into<String>) -> Self {
        Self::Seek(msg.into())
    }
}
