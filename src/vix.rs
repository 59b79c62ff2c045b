pub mod error;
pub mod extract;
pub mod player;
pub mod repair;
pub mod structs;

pub use error::{Error, Result, TransportError};
pub use extract::{Block, BlockExtractor, PatternExtractor, extract_block};
pub use player::VixPlayer;
pub use repair::repair_object_literal;
pub use structs::{
    PlaybackResult, PlaylistAuth, PlaylistRef, StreamEntry, VideoMetadata, build_playback_result,
};

/// Language requested when the caller doesn't pick one
pub const DEFAULT_LANG: &str = "en";

pub const DEFAULT_BASE_URL: &str = "https://vixsrc.to";
