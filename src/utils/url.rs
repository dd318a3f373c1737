//! Player script URL validation

use crate::error::ProbeError;
use regex::Regex;
use std::fmt;

/// Only remote player scripts served from the canonical player path are accepted.
/// The single capture is the player build id.
const PLAYER_URL_PATTERN: &str = r"^https://www\.youtube\.com/s/player/([A-Za-z0-9_\-]+)/.+\.js$";

/// A player script URL that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerUrl {
    url: String,
    player_id: String,
}

impl PlayerUrl {
    /// Validate a raw `--player` value
    pub fn parse(raw: &str) -> Result<Self, ProbeError> {
        let player_id = extract_player_id(raw)?;
        Ok(Self {
            url: raw.to_string(),
            player_id,
        })
    }

    /// URL handed to the library, unchanged from the input
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Opaque player build id (`/s/player/<id>/...`)
    pub fn player_id(&self) -> &str {
        &self.player_id
    }
}

impl fmt::Display for PlayerUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Check a URL against the player script pattern
pub fn is_player_url(url: &str) -> Result<bool, ProbeError> {
    let regex = Regex::new(PLAYER_URL_PATTERN)?;
    Ok(regex.is_match(url))
}

/// Extract the player id segment from a player script URL.
///
/// The raw string is matched as is; dot segments are not resolved.
pub fn extract_player_id(url: &str) -> Result<String, ProbeError> {
    let regex = Regex::new(PLAYER_URL_PATTERN)?;

    regex
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| ProbeError::InvalidPlayerUrl(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_base_js() {
        let url = "https://www.youtube.com/s/player/abc123/base.js";
        let player = PlayerUrl::parse(url).unwrap();
        assert_eq!(player.as_str(), url);
        assert_eq!(player.to_string(), url);
        assert_eq!(player.player_id(), "abc123");
    }

    #[test]
    fn test_parse_accepts_nested_path() {
        let url = "https://www.youtube.com/s/player/6e1dd460/player_ias.vflset/en_US/base.js";
        let player = PlayerUrl::parse(url).unwrap();
        assert_eq!(player.player_id(), "6e1dd460");

        let url = "https://www.youtube.com/s/player/a_b-C9/tv-player-ias.vflset/tv-player-ias.js";
        assert_eq!(PlayerUrl::parse(url).unwrap().player_id(), "a_b-C9");
    }

    #[test]
    fn test_parse_keeps_dot_segments() {
        for url in [
            "https://www.youtube.com/s/player/abc123/../../base.js",
            "https://www.youtube.com/s/player/abc123/../base.js",
            "https://www.youtube.com/s/player/abc123/./base.js",
        ] {
            assert!(is_player_url(url).unwrap());
            let player = PlayerUrl::parse(url).unwrap();
            assert_eq!(player.as_str(), url);
            assert_eq!(player.player_id(), "abc123", "{url}");
        }
    }

    #[test]
    fn test_parse_rejects_wrong_suffix() {
        let err = PlayerUrl::parse("https://www.youtube.com/s/player/abc123/base.txt").unwrap_err();
        assert!(err.is_usage_error());
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        let rejected = [
            "",
            "base.js",
            "http://www.youtube.com/s/player/abc123/base.js",
            "https://youtube.com/s/player/abc123/base.js",
            "https://m.youtube.com/s/player/abc123/base.js",
            "https://www.youtube.com/s/player/abc123/.js",
            "https://www.youtube.com/s/player//base.js",
            "https://www.youtube.com/s/player/abc.123/base.js",
            "https://www.youtube.com/s/player/abc123/base.js?x=1",
            "https://www.youtube.com/player/abc123/base.js",
            " https://www.youtube.com/s/player/abc123/base.js",
        ];
        for url in rejected {
            assert!(!is_player_url(url).unwrap(), "{url} should not match");
            assert!(
                matches!(PlayerUrl::parse(url), Err(ProbeError::InvalidPlayerUrl(_))),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn test_extract_player_id() {
        assert_eq!(
            extract_player_id("https://www.youtube.com/s/player/3bb1f723/player_ias.vflset/en_US/base.js")
                .unwrap(),
            "3bb1f723"
        );
        assert!(extract_player_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").is_err());
        assert!(extract_player_id("not a url").is_err());
    }
}
