// SPDX-License-Identifier: MIT
//! Named output shapes and the built-in social post presets.

use std::fmt;
use std::str::FromStr;

use crate::error::CropError;

/// Width/height pair in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Real-valued `w / h`.
    pub fn ratio(self) -> f64 {
        f64::from(self.w) / f64::from(self.h)
    }

    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// A named output shape, e.g. `Square 1080x1080`.
///
/// Targets are configuration, not user content: once built they are never
/// mutated, and both dimensions are guaranteed positive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetSpec {
    name: String,
    size: Size,
}

impl TargetSpec {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Result<Self, CropError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CropError::invalid("name", "target name must not be empty"));
        }
        if width == 0 || height == 0 {
            return Err(CropError::invalid(
                "size",
                format!("target {name} must have positive dimensions, got {width}x{height}"),
            ));
        }
        Ok(Self {
            name,
            size: Size::new(width, height),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.size.w
    }

    pub fn height(&self) -> u32 {
        self.size.h
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Output label, `"{name}_{w}x{h}"`. Unique per distinct target.
    pub fn label(&self) -> String {
        format!("{}_{}", self.name, self.size)
    }

    /// File name used for per-image outputs and archive entries.
    pub fn file_name(&self) -> String {
        label_file_name(&self.label())
    }
}

/// `"Square_1080x1080"` becomes `"square_1080x1080.png"`.
pub fn label_file_name(label: &str) -> String {
    format!("{}.png", label.to_lowercase())
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.size)
    }
}

/// Parses the command-line form `Name=WIDTHxHEIGHT`.
impl FromStr for TargetSpec {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, dims) = s.split_once('=').ok_or_else(|| {
            CropError::invalid("target", format!("expected Name=WIDTHxHEIGHT, got {s:?}"))
        })?;
        let (w, h) = dims
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| CropError::invalid("target", format!("missing 'x' in {dims:?}")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|_| CropError::invalid("target", format!("invalid dimension {v:?}")))
        };
        TargetSpec::new(name.trim(), parse(w)?, parse(h)?)
    }
}

/// The three post shapes produced when no targets are configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PostPreset {
    /// 1080×1080 feed post
    Square,
    /// 1080×1350 tall feed post
    Portrait,
    /// 1080×1920 full-screen story
    Story,
}

impl PostPreset {
    pub const ALL: [PostPreset; 3] = [PostPreset::Square, PostPreset::Portrait, PostPreset::Story];

    pub fn name(self) -> &'static str {
        match self {
            PostPreset::Square => "Square",
            PostPreset::Portrait => "Portrait",
            PostPreset::Story => "Story",
        }
    }

    pub fn size(self) -> Size {
        match self {
            PostPreset::Square => Size::new(1080, 1080),
            PostPreset::Portrait => Size::new(1080, 1350),
            PostPreset::Story => Size::new(1080, 1920),
        }
    }

    pub fn to_target(self) -> TargetSpec {
        let size = self.size();
        TargetSpec {
            name: self.name().to_string(),
            size,
        }
    }
}

/// Square, Portrait, Story, in that order.
pub fn default_targets() -> Vec<TargetSpec> {
    PostPreset::ALL.iter().map(|p| p.to_target()).collect()
}
