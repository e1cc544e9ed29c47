//! JSON frame configuration.
//!
//! A config is the named-frame-value map the tag engine consumes:
//!
//! ```json
//! {
//!     "frames": {
//!         "TALB": { "information": "Album Name" },
//!         "TIT2": { "information": "Track Title" }
//!     }
//! }
//! ```
//!
//! Only the text-information kinds can be set this way, mirroring what
//! [`FrameCollection::apply`](crate::id3v2::FrameCollection::apply)
//! supports. Entries keep the order they were written in.

use crate::id3v2::frames::{kind_for_id, FrameBody, FrameId, TextInformationFrame};
use indexmap::IndexMap;
use serde::Deserialize;
use std::error;
use std::fmt::{self, Display, Formatter};

pub struct Config {
    pub frames: IndexMap<FrameId, FrameBody>,
}

impl Config {
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(data)?;

        let mut frames = IndexMap::new();

        for (id, frame) in raw.frames {
            let id: FrameId = id.parse().map_err(|_| ConfigError::InvalidId(id.clone()))?;

            match kind_for_id(id) {
                Some(kind) if kind.is_text() => {
                    let body = FrameBody::Text(TextInformationFrame::new(&frame.information));
                    frames.insert(id, body);
                }
                _ => return Err(ConfigError::UnsupportedFrame(id)),
            }
        }

        Ok(Config { frames })
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl IntoIterator for Config {
    type Item = (FrameId, FrameBody);
    type IntoIter = indexmap::map::IntoIter<FrameId, FrameBody>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    frames: IndexMap<String, RawFrame>,
}

#[derive(Deserialize)]
struct RawFrame {
    information: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    InvalidId(String),
    UnsupportedFrame(FrameId),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ConfigError::Json(err) => write!(f, "{}", err),
            ConfigError::InvalidId(id) => write!(f, "invalid frame ID {:?}", id),
            ConfigError::UnsupportedFrame(id) => {
                write!(f, "frame {} cannot be set from a config", id)
            }
        }
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ConfigError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}
