use std::path::Path;

use crate::{
    composition::model::Category,
    foundation::color::Color,
    foundation::core::{Canvas, Fps},
    foundation::error::{KineoError, KineoResult},
};

/// Output aspect ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    /// Widescreen landscape.
    #[default]
    #[serde(rename = "16:9")]
    Landscape16x9,
    /// Vertical stories/reels format.
    #[serde(rename = "9:16")]
    Portrait9x16,
    /// Square social post.
    #[serde(rename = "1:1")]
    Square1x1,
    /// Portrait feed post.
    #[serde(rename = "4:5")]
    Portrait4x5,
}

impl AspectRatio {
    /// `(width, height)` ratio terms.
    pub fn terms(self) -> (u32, u32) {
        match self {
            Self::Landscape16x9 => (16, 9),
            Self::Portrait9x16 => (9, 16),
            Self::Square1x1 => (1, 1),
            Self::Portrait4x5 => (4, 5),
        }
    }
}

/// Resolution tier, named after the short edge in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Resolution {
    /// 720 px short edge.
    #[default]
    #[serde(rename = "720p")]
    Hd720,
    /// 1080 px short edge.
    #[serde(rename = "1080p")]
    FullHd1080,
    /// 2160 px short edge.
    #[serde(rename = "2160p")]
    Uhd2160,
}

impl Resolution {
    /// Short edge in pixels.
    pub fn short_edge(self) -> u32 {
        match self {
            Self::Hd720 => 720,
            Self::FullHd1080 => 1080,
            Self::Uhd2160 => 2160,
        }
    }
}

/// Supported playback/export frame rates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FrameRate {
    /// 24 fps.
    Fps24,
    /// 30 fps.
    #[default]
    Fps30,
    /// 60 fps.
    Fps60,
}

impl FrameRate {
    /// Frames per second as an integer.
    pub fn per_second(self) -> u32 {
        match self {
            Self::Fps24 => 24,
            Self::Fps30 => 30,
            Self::Fps60 => 60,
        }
    }

    /// As a rational [`Fps`].
    pub fn fps(self) -> Fps {
        Fps {
            num: self.per_second(),
            den: 1,
        }
    }
}

impl TryFrom<u32> for FrameRate {
    type Error = String;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        match v {
            24 => Ok(Self::Fps24),
            30 => Ok(Self::Fps30),
            60 => Ok(Self::Fps60),
            other => Err(format!("unsupported frame rate {other} (expected 24, 30 or 60)")),
        }
    }
}

impl From<FrameRate> for u32 {
    fn from(v: FrameRate) -> Self {
        v.per_second()
    }
}

/// Project background fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackgroundFill {
    /// One color over the whole surface.
    Solid {
        /// Fill color.
        color: Color,
    },
    /// Two-stop linear gradient from top to bottom.
    Gradient {
        /// Color at the top edge.
        top: Color,
        /// Color at the bottom edge.
        bottom: Color,
    },
}

impl Default for BackgroundFill {
    fn default() -> Self {
        Self::Gradient {
            top: Color::rgb(0x0f, 0x17, 0x2a),
            bottom: Color::rgb(0x02, 0x06, 0x17),
        }
    }
}

/// Project-wide configuration. Nothing derived is cached here.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Output aspect ratio.
    pub aspect_ratio: AspectRatio,
    /// Output resolution tier.
    pub resolution: Resolution,
    /// Frame rate used for the timecode and live playback.
    pub fps: FrameRate,
    /// Background fill drawn under every layer.
    pub background: BackgroundFill,
    /// Composition duration in seconds.
    pub duration_secs: f64,
    /// Active template category.
    pub category: Category,
    /// Active template id, if one was selected.
    pub template_id: Option<String>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::default(),
            resolution: Resolution::default(),
            fps: FrameRate::default(),
            background: BackgroundFill::default(),
            duration_secs: 5.0,
            category: Category::TitleCards,
            template_id: None,
        }
    }
}

/// Upper bound on composition duration, in seconds.
pub const MAX_DURATION_SECS: f64 = 600.0;

impl ProjectSettings {
    /// Native export size in pixels for the configured aspect ratio and tier.
    pub fn canvas(&self) -> Canvas {
        let short = self.resolution.short_edge();
        let (rw, rh) = self.aspect_ratio.terms();
        if rw >= rh {
            Canvas {
                width: short * rw / rh,
                height: short,
            }
        } else {
            Canvas {
                width: short,
                height: short * rh / rw,
            }
        }
    }

    /// Validate numeric invariants.
    pub fn validate(&self) -> KineoResult<()> {
        if !self.duration_secs.is_finite()
            || self.duration_secs <= 0.0
            || self.duration_secs > MAX_DURATION_SECS
        {
            return Err(KineoError::validation(format!(
                "duration_secs must be in (0, {MAX_DURATION_SECS}], got {}",
                self.duration_secs
            )));
        }
        Ok(())
    }

    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> KineoResult<Self> {
        let settings: Self =
            serde_json::from_str(s).map_err(|e| KineoError::serde(format!("settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a settings JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> KineoResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            KineoError::validation(format!("failed to read settings '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/settings.rs"]
mod tests;
