use serde::{Deserialize, Serialize};

/// Contents of `window.video`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub id: u64,
    pub name: String,
    pub filename: String,
    pub size: u64,
    pub quality: u32,
    pub duration: u64,
    pub views: u64,
    pub is_viewable: u8,
    pub status: String,
    pub fps: u32,
    pub legacy: u8,
    pub folder_id: Option<String>,
    /// Human readable age, e.g. `2 months ago`
    pub created_at_diff: String,
}

/// A delivery server entry out of `window.streams`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEntry {
    pub name: String,
    pub active: bool,
    pub url: String,
}

/// Short-lived access parameters guarding the master playlist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistAuth {
    pub token: String,
    pub expires: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asn: Option<String>,
}

/// Contents of `window.masterPlaylist`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRef {
    #[serde(rename = "params")]
    pub auth: PlaylistAuth,
    pub url: String,
}

impl PlaylistRef {
    /// Builds the signed master playlist URL for the given language.
    /// An empty `lang` falls back to [`DEFAULT_LANG`](super::DEFAULT_LANG).
    ///
    /// Values are inserted verbatim, nothing is URL-encoded.
    #[must_use]
    pub fn playback_url(&self, lang: &str) -> String {
        let lang = if lang.is_empty() {
            super::DEFAULT_LANG
        } else {
            lang
        };

        let mut url = format!(
            "{}?token={}&expires={}&h=1&lang={lang}",
            self.url, self.auth.token, self.auth.expires
        );
        if let Some(asn) = self.auth.asn.as_deref().filter(|a| !a.is_empty()) {
            url.push_str("&asn=");
            url.push_str(asn);
        }

        url
    }
}

/// Everything a player page tells us about a single title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackResult {
    pub video: VideoMetadata,
    pub streams: Vec<StreamEntry>,
    pub master_playlist: PlaylistRef,
    pub master_url: String,
}

/// Assembles the final result, deriving the playback URL from `playlist`
#[must_use]
pub fn build_playback_result(
    video: VideoMetadata,
    streams: Vec<StreamEntry>,
    playlist: PlaylistRef,
    lang: &str,
) -> PlaybackResult {
    let master_url = playlist.playback_url(lang);

    PlaybackResult {
        video,
        streams,
        master_playlist: playlist,
        master_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(asn: Option<&str>) -> PlaylistRef {
        PlaylistRef {
            auth: PlaylistAuth {
                token: "T".to_string(),
                expires: "E".to_string(),
                asn: asn.map(ToString::to_string),
            },
            url: "https://cdn/master.m3u8".to_string(),
        }
    }

    #[test]
    fn empty_lang_defaults_to_english() {
        assert_eq!(
            playlist(None).playback_url(""),
            "https://cdn/master.m3u8?token=T&expires=E&h=1&lang=en"
        );
    }

    #[test]
    fn asn_is_appended_after_lang() {
        assert_eq!(
            playlist(Some("100")).playback_url(""),
            "https://cdn/master.m3u8?token=T&expires=E&h=1&lang=en&asn=100"
        );
        assert_eq!(
            playlist(Some("100")).playback_url("it"),
            "https://cdn/master.m3u8?token=T&expires=E&h=1&lang=it&asn=100"
        );
    }

    #[test]
    fn empty_asn_is_omitted() {
        assert_eq!(
            playlist(Some("")).playback_url("en"),
            playlist(None).playback_url("en")
        );
    }

    #[test]
    fn values_are_not_encoded() {
        let mut p = playlist(None);
        p.auth.token = "a+b/c=".to_string();
        assert_eq!(
            p.playback_url("pt-BR"),
            "https://cdn/master.m3u8?token=a+b/c=&expires=E&h=1&lang=pt-BR"
        );
    }

    #[test]
    fn serializes_with_original_key_names() {
        let result = build_playback_result(
            VideoMetadata {
                id: 1,
                name: "n".to_string(),
                filename: "f".to_string(),
                size: 0,
                quality: 1080,
                duration: 60,
                views: 0,
                is_viewable: 1,
                status: "public".to_string(),
                fps: 24,
                legacy: 0,
                folder_id: None,
                created_at_diff: "now".to_string(),
            },
            vec![],
            playlist(None),
            "",
        );
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["masterUrl"], result.master_url.as_str());
        assert_eq!(value["masterPlaylist"]["params"]["token"], "T");
        assert!(value["masterPlaylist"]["params"].get("asn").is_none());
    }
}
