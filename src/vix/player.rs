use std::sync::Arc;

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

use super::{
    error::{Error, Result, TransportError},
    extract::{Block, BlockExtractor, PatternExtractor},
    repair::repair_object_literal,
    structs::{PlaybackResult, PlaylistRef, StreamEntry, VideoMetadata, build_playback_result},
};
use crate::util::{init_http_client, truncate_string};

/// Longest slice of an undecodable block that gets logged
const DECODE_LOG_PREVIEW_LEN: usize = 512;

/// Resolves movies and episodes hosted on a vixsrc-style player into their HLS playlist
///
/// Cloning is cheap, the underlying [`Client`] is a pooled handle.
#[derive(Clone)]
pub struct VixPlayer {
    base_url: String,
    client: Client,
    extractor: Arc<dyn BlockExtractor>,
}

impl VixPlayer {
    /// Creates a player for `base_url`, e.g. `https://vixsrc.to`
    ///
    /// Passing `None` as the client builds one via [`init_http_client`].
    /// Timeouts are whatever the client is configured with.
    ///
    /// # Panics
    /// When no client is given and the default one cannot be built
    pub fn new(base_url: impl Into<String>, client: Option<Client>) -> Self {
        Self {
            base_url: base_url.into(),
            client: client.unwrap_or_else(init_http_client),
            extractor: Arc::new(PatternExtractor),
        }
    }

    /// Replaces the default regex-based block extraction
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl BlockExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the HLS stream of a movie by its TMDB ID
    ///
    /// `lang` can be any language code supported upstream; empty means `en`.
    ///
    /// # Errors
    /// [`Error::NotFound`] when the movie does not exist upstream, other
    /// variants on network failure or when the page cannot be understood
    pub async fn get_movie(&self, tmdb_id: &str, lang: &str) -> Result<PlaybackResult> {
        let player_url = format!("{}/movie/{tmdb_id}", self.base_url);
        self.get_hls_from_player(&player_url, lang).await
    }

    /// Fetches the HLS stream of a show's episode by its TMDB ID
    ///
    /// `lang` can be any language code supported upstream; empty means `en`.
    ///
    /// # Errors
    /// See [`VixPlayer::get_movie`]
    pub async fn get_show(
        &self,
        tmdb_id: &str,
        season: u32,
        episode: u32,
        lang: &str,
    ) -> Result<PlaybackResult> {
        let player_url = format!("{}/tv/{tmdb_id}/{season}/{episode}", self.base_url);
        self.get_hls_from_player(&player_url, lang).await
    }

    #[instrument(skip(self))]
    async fn get_hls_from_player(&self, player_url: &str, lang: &str) -> Result<PlaybackResult> {
        let body = self.fetch_page(player_url).await?;

        let video = self.extractor.extract(&body, Block::Video)?;
        let streams = self.extractor.extract(&body, Block::Streams)?;
        let master = self.extractor.extract(&body, Block::MasterPlaylist)?;
        debug!("Found all player blocks");

        let video = decode::<VideoMetadata>(video, Block::Video)?;
        let streams = decode::<Vec<StreamEntry>>(streams, Block::Streams)?;
        let master = decode::<PlaylistRef>(&repair_object_literal(master), Block::MasterPlaylist)?;
        debug!(
            video_id = video.id,
            streams = streams.len(),
            "Decoded player data"
        );

        Ok(build_playback_result(video, streams, master, lang))
    }

    /// Fetches a player page, returning its raw body
    ///
    /// # Errors
    /// [`Error::NotFound`] on 404, [`Error::Transport`] on any other non-200
    /// status or network failure
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, url: &str) -> Result<Bytes> {
        let res = self.client.get(url).send().await?;

        match res.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(Error::NotFound),
            status => return Err(TransportError::Status(status).into()),
        }

        let body = res.bytes().await?;
        debug!("Fetched player page ({} bytes)", body.len());
        Ok(body)
    }
}

impl std::fmt::Debug for VixPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VixPlayer")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Strictly decodes a block, keeping the offending text around on failure
///
/// # Errors
/// [`Error::Decode`] when `raw` is not valid JSON of shape `T`
pub fn decode<T: DeserializeOwned>(raw: &[u8], block: Block) -> Result<T> {
    serde_json::from_slice(raw).map_err(|source| {
        let raw = String::from_utf8_lossy(raw).into_owned();
        error!(
            %block,
            raw = %truncate_string(&raw, DECODE_LOG_PREVIEW_LEN),
            "Unable to decode player block: {source}"
        );
        Error::Decode { block, raw, source }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_keeps_raw_text() {
        let err = decode::<VideoMetadata>(b"{\"id\":\"nope\"}", Block::Video).unwrap_err();
        let Error::Decode { block, raw, .. } = err else {
            panic!("expected a decode error");
        };
        assert_eq!(block, Block::Video);
        assert_eq!(raw, "{\"id\":\"nope\"}");
    }

    #[test]
    fn decode_streams_in_source_order() {
        let streams = decode::<Vec<StreamEntry>>(
            br#"[{"name":"B","active":false,"url":"b"},{"name":"A","active":true,"url":"a"}]"#,
            Block::Streams,
        )
        .unwrap();
        assert_eq!(
            streams.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            ["B", "A"]
        );
    }

    #[test]
    fn debug_omits_client() {
        let player = VixPlayer::new("https://vixsrc.to", Some(Client::new()));
        assert_eq!(
            format!("{player:?}"),
            "VixPlayer { base_url: \"https://vixsrc.to\", .. }"
        );
    }
}
