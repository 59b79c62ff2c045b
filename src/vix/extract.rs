use std::{fmt, sync::LazyLock};

use regex::bytes::Regex;

use super::error::{Error, Result};

// `-u` lets `.` match arbitrary bytes, the page is not guaranteed to be valid UTF-8
static VIDEO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s-u)window\.video\s*=\s*(\{.*?\});").unwrap());
static STREAMS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s-u)window\.streams\s*=\s*(\[\{.*?\}\]);").unwrap());
// Greedy and without a trailing `;`, the object is the last statement of its script
static MASTER_PLAYLIST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s-u)window\.masterPlaylist\s*=\s*(\{.*\})\s").unwrap());

/// Script-embedded data blocks found on a player page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    /// `window.video`, a JSON object
    Video,
    /// `window.streams`, a JSON array of objects
    Streams,
    /// `window.masterPlaylist`, a JS object literal
    MasterPlaylist,
}

impl Block {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Streams => "streams",
            Self::MasterPlaylist => "masterPlaylist",
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Self::Video => &VIDEO_REGEX,
            Self::Streams => &STREAMS_REGEX,
            Self::MasterPlaylist => &MASTER_PLAYLIST_REGEX,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy used to pull a [`Block`]'s literal out of a player page
pub trait BlockExtractor: Send + Sync {
    /// Returns the literal assigned to `block`, borrowed from `body`
    ///
    /// # Errors
    /// [`Error::Extraction`] when the block is not present
    fn extract<'a>(&self, body: &'a [u8], block: Block) -> Result<&'a [u8]>;
}

/// Regex-based extractor matching the assignments verbatim
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternExtractor;

impl BlockExtractor for PatternExtractor {
    fn extract<'a>(&self, body: &'a [u8], block: Block) -> Result<&'a [u8]> {
        extract_block(body, block)
    }
}

/// Finds the first `window.<block> = <literal>` assignment and returns the literal
///
/// # Errors
/// [`Error::Extraction`] when no assignment matches
pub fn extract_block(body: &[u8], block: Block) -> Result<&[u8]> {
    block
        .regex()
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_bytes())
        .ok_or(Error::Extraction { block })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &[u8] = b"<script>
        window.video = {\"id\":1,\"name\":\"a\"};
        window.streams = [{\"name\":\"Server1\",\"active\":true,\"url\":\"https://x/1\"},
            {\"name\":\"Server2\",\"active\":false,\"url\":\"https://x/2\"}];
        window.masterPlaylist = {
            params: {
                'token': 'abc',
                'expires': '123',
            },
            url: 'https://x/playlist/1',
        }
        window.canPlayFHD = true
    </script>";

    #[test]
    fn extracts_video_object() {
        assert_eq!(
            extract_block(PAGE, Block::Video).unwrap(),
            b"{\"id\":1,\"name\":\"a\"}"
        );
    }

    #[test]
    fn extracts_streams_across_lines() {
        let streams = extract_block(PAGE, Block::Streams).unwrap();
        assert!(streams.starts_with(b"[{\"name\":\"Server1\""));
        assert!(streams.ends_with(b"\"url\":\"https://x/2\"}]"));
    }

    #[test]
    fn extracts_master_playlist_without_semicolon() {
        let master = extract_block(PAGE, Block::MasterPlaylist).unwrap();
        assert!(master.starts_with(b"{\n            params:"));
        assert!(master.ends_with(b"'https://x/playlist/1',\n        }"));
    }

    #[test]
    fn first_match_wins() {
        let page = b"window.video = {\"id\":1}; window.video = {\"id\":2};";
        assert_eq!(extract_block(page, Block::Video).unwrap(), b"{\"id\":1}");
    }

    #[test]
    fn missing_block_is_reported_by_name() {
        let page = b"window.video = {\"id\":1};";
        let err = extract_block(page, Block::Streams).unwrap_err();
        assert!(matches!(
            err,
            Error::Extraction {
                block: Block::Streams
            }
        ));
    }

    #[test]
    fn tolerates_invalid_utf8() {
        let page = b"\xff\xfe window.video = {\"name\":\"\xc3\x28\"};";
        assert_eq!(
            extract_block(page, Block::Video).unwrap(),
            b"{\"name\":\"\xc3\x28\"}"
        );
    }
}
