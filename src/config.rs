use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::core::FRAME_EPSILON;
use crate::foundation::error::TvgResult;

/// Options controlling [`AnimationTexture`](crate::AnimationTexture) behavior.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionOpts {
    /// Frame changes below this tolerance are ignored.
    pub frame_epsilon: f32,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            frame_epsilon: FRAME_EPSILON,
        }
    }
}

/// Options for the built-in SVG engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SvgEngineOpts {
    /// Target DPI used to resolve physical units.
    pub dpi: f32,
    /// Directory relative `href`s in the SVG resolve against.
    pub resources_dir: Option<PathBuf>,
    /// Load system fonts at engine start, needed for `<text>` content.
    pub load_system_fonts: bool,
    /// If set, each draw clears the canvas to this straight-alpha RGBA8 color first.
    pub background: Option<[u8; 4]>,
}

impl Default for SvgEngineOpts {
    fn default() -> Self {
        Self {
            dpi: 96.0,
            resources_dir: None,
            load_system_fonts: false,
            background: None,
        }
    }
}

/// Top-level configuration, loadable from a JSON file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: SvgEngineOpts,
    pub session: SessionOpts,
}

impl Config {
    pub fn from_json_str(s: &str) -> TvgResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: &Path) -> TvgResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        Ok(serde_json::from_reader(BufReader::new(f))?)
    }
}
