/*!
    Shared types for the avsource crate ecosystem.

    This crate defines the vocabulary of the ecosystem — the types that cross
    crate boundaries. It carries no demuxing logic and no native-library
    dependency, so consumers can depend on it without pulling in anything
    heavier than `thiserror`.
*/

mod error;
mod packet;
mod stream;

pub use error::{Error, Result};
pub use packet::Packet;
pub use stream::{CodecId, Rational, StreamInfo, StreamType};
