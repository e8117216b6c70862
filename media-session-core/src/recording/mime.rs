use crate::traits::recorder_backend::RecorderBackend;

/// Negotiated container/codec label for recorded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeType {
    WebmOpus,
    Webm,
    Mp4,
    /// No probed format was supported; the recorder picks its own.
    PlatformDefault,
}

impl MimeType {
    /// Probe order, first supported format wins.
    const PREFERENCE: [MimeType; 3] = [Self::WebmOpus, Self::Webm, Self::Mp4];

    /// Negotiate a format against the recorder's supported set.
    pub fn negotiate(recorder: &dyn RecorderBackend) -> Self {
        Self::PREFERENCE
            .into_iter()
            .find(|mime| recorder.supports_mime(mime.as_str()))
            .unwrap_or(Self::PlatformDefault)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebmOpus => "audio/webm;codecs=opus",
            Self::Webm => "audio/webm",
            Self::Mp4 => "audio/mp4",
            Self::PlatformDefault => "",
        }
    }

    /// Hint passed to the recorder, `None` when the platform decides.
    pub fn recorder_hint(&self) -> Option<&'static str> {
        match self {
            Self::PlatformDefault => None,
            other => Some(other.as_str()),
        }
    }

    /// Container label attached to the assembled clip. The platform
    /// default falls back to plain webm.
    pub fn container_label(&self) -> &'static str {
        match self {
            Self::Mp4 => "audio/mp4",
            Self::WebmOpus => "audio/webm;codecs=opus",
            Self::Webm | Self::PlatformDefault => "audio/webm",
        }
    }

    /// Conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            _ => "webm",
        }
    }
}
