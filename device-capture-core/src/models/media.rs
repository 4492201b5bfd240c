use serde::{Deserialize, Serialize};

/// What a recorder captures. Fixed per recorder instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "audio")]
    Audio,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "audio/video")]
    AudioVideo,
}

impl MediaKind {
    /// Track kinds to request from the media provider.
    pub fn constraints(self) -> StreamConstraints {
        StreamConstraints {
            audio: matches!(self, Self::Audio | Self::AudioVideo),
            video: self.has_video(),
        }
    }

    pub fn has_video(self) -> bool {
        matches!(self, Self::Video | Self::AudioVideo)
    }

    /// Container MIME type for captured output.
    pub fn mime_type(self) -> &'static str {
        if self.has_video() {
            "video/webm"
        } else {
            "audio/ogg"
        }
    }

    /// File extension matching `mime_type`, without the leading dot.
    pub fn file_extension(self) -> &'static str {
        if self.has_video() {
            "webm"
        } else {
            "ogg"
        }
    }
}

/// Kind of a single track within an acquired stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Audio,
    Video,
}

/// Which track kinds to acquire from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreamConstraints {
    pub audio: bool,
    pub video: bool,
}

/// File extension for a recordable container MIME type, without the
/// leading dot. `None` for types no recorder here produces.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime {
        "audio/mpeg" => Some("mp3"),
        "audio/ogg" => Some("ogg"),
        "audio/wav" => Some("wav"),
        "audio/webm" => Some("webm"),
        "audio/aac" => Some("aac"),
        "audio/flac" => Some("flac"),
        "audio/x-m4a" => Some("m4a"),
        "video/mp4" => Some("mp4"),
        "video/ogg" => Some("ogg"),
        "video/webm" => Some("webm"),
        "video/x-msvideo" => Some("avi"),
        "video/x-flv" => Some("flv"),
        "video/quicktime" => Some("mov"),
        "video/x-matroska" => Some("mkv"),
        _ => None,
    }
}

/// Opaque handle to an assembled capture resource.
///
/// Dereferenceable by the host (download link, playback source) until the
/// allocator revokes it; revocation is outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHandle {
    pub url: String,
}

/// Summary produced when a capture session completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingResult {
    pub resource: ResourceHandle,
    /// Public name of the capture, `<base>.<extension>`.
    pub file_name: String,
    pub byte_len: u64,
    pub chunk_count: usize,
    /// SHA-256 of the assembled bytes, lowercase hex.
    pub checksum: String,
    pub duration_secs: f64,
    /// RFC 3339 wall-clock time of assembly.
    pub created_at: String,
}
