//! Fitting an arbitrary source image onto the card canvas.
//!
//! `cover` scales the source until it fills the canvas and crops the overflow at an anchor;
//! `contain` scales it until it fits and places it at an anchor, leaving the rest of the canvas
//! untouched. Both are computed up front by [`place_background`] so the math can be checked
//! without touching pixels.

use crate::assets::color::Color;
use crate::foundation::core::{Position, Size};
use crate::foundation::error::CardResult;
use crate::foundation::math::div_floor;
use crate::raster::canvas::Raster;

/// Gamma applied to darkened or colorized backgrounds before the tint goes on.
pub const TINT_GAMMA: f64 = 1.2;
/// Opacity of the dark overlay used by `darken`.
pub const DARKEN_ALPHA: u8 = 50;
/// Opacity of the scheme-color overlay used by `colorize`.
pub const COLORIZE_ALPHA: u8 = 30;

/// Background sizing strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitMode {
    /// Scale to fill the canvas and crop the overflow.
    Cover,
    /// Scale to fit inside the canvas.
    Contain,
    /// Paste at natural size in the top-left corner.
    Natural,
}

impl FitMode {
    /// `cover` and `contain` are recognised; anything else keeps the natural size.
    pub fn parse(token: &str) -> Self {
        match token {
            "cover" => Self::Cover,
            "contain" => Self::Contain,
            _ => Self::Natural,
        }
    }
}

/// Horizontal anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HAlign {
    /// Unknown tokens anchor left.
    pub fn parse(token: &str) -> Self {
        match token {
            "center" => Self::Center,
            "right" => Self::Right,
            _ => Self::Left,
        }
    }

    /// Offset into `free` pixels of slack.
    pub fn offset(self, free: i32) -> i32 {
        match self {
            Self::Left => 0,
            Self::Center => div_floor(free, 2),
            Self::Right => free,
        }
    }
}

/// Vertical anchor. The two intermediate thirds only affect `cover` crops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VAlign {
    #[default]
    Top,
    UpperCenter,
    Center,
    LowerCenter,
    Bottom,
}

impl VAlign {
    /// Unknown tokens anchor to the top.
    pub fn parse(token: &str) -> Self {
        match token {
            "uppercenter" => Self::UpperCenter,
            "center" => Self::Center,
            "lowercenter" => Self::LowerCenter,
            "bottom" => Self::Bottom,
            _ => Self::Top,
        }
    }

    /// Offset into `free` pixels of slack for a crop window.
    pub fn crop_offset(self, free: i32) -> i32 {
        match self {
            Self::Top => 0,
            Self::UpperCenter => div_floor(free, 3),
            Self::Center => div_floor(free, 2),
            Self::LowerCenter => div_floor(free, 3) * 2,
            Self::Bottom => free,
        }
    }

    /// Offset into `free` pixels of slack for placement; thirds snap to the top.
    pub fn place_offset(self, free: i32) -> i32 {
        match self {
            Self::Center => div_floor(free, 2),
            Self::Bottom => free,
            _ => 0,
        }
    }
}

/// Resolved background options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackgroundSpec {
    pub fit: FitMode,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub darken: bool,
    pub colorize: bool,
    pub blur: bool,
}

/// Where and how a background source lands on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Size the source is resampled to.
    pub resized: Size,
    /// Crop window inside the resampled source, for `cover`.
    pub crop: Option<(Position, Size)>,
    /// Paste position on the canvas.
    pub position: Position,
}

/// Compute resize, crop and paste position for `source` on `canvas`.
pub fn place_background(
    source: Size,
    canvas: Size,
    fit: FitMode,
    h_align: HAlign,
    v_align: VAlign,
) -> Placement {
    let source_aspect = source.aspect();
    let canvas_aspect = canvas.aspect();
    let width_driven = source_aspect <= canvas_aspect;

    match fit {
        FitMode::Cover => {
            let resized = if width_driven {
                Size::new(canvas.width, scaled(canvas.width, 1.0 / source_aspect, canvas.height))
            } else {
                Size::new(scaled(canvas.height, source_aspect, canvas.width), canvas.height)
            };
            let origin = if width_driven {
                Position::new(0, v_align.crop_offset(resized.h() - canvas.h()))
            } else {
                Position::new(h_align.offset(resized.w() - canvas.w()), 0)
            };
            Placement {
                resized,
                crop: Some((origin, canvas)),
                position: Position::origin(),
            }
        }
        FitMode::Contain => {
            let resized = if width_driven {
                Size::new(scaled(canvas.height, source_aspect, 1), canvas.height)
            } else {
                Size::new(canvas.width, scaled(canvas.width, 1.0 / source_aspect, 1))
            };
            Placement {
                resized,
                crop: None,
                position: Position::new(
                    h_align.offset(canvas.w() - resized.w()),
                    v_align.place_offset(canvas.h() - resized.h()),
                ),
            }
        }
        FitMode::Natural => Placement {
            resized: source,
            crop: None,
            position: Position::origin(),
        },
    }
}

/// `extent * factor`, truncated, never below `floor`.
fn scaled(extent: u32, factor: f64, floor: u32) -> u32 {
    // Tolerate float error so exact ratios do not lose a pixel.
    let v = (f64::from(extent) * factor + 1e-9).floor();
    (v.max(0.0) as u32).max(floor)
}

/// Fit `source` onto `canvas`, then apply the optional filters and tint overlays.
pub fn apply_background(
    canvas: &mut Raster,
    source: &Raster,
    spec: &BackgroundSpec,
    scheme: Color,
) -> CardResult<()> {
    let placement = place_background(
        source.size(),
        canvas.size(),
        spec.fit,
        spec.h_align,
        spec.v_align,
    );

    let mut image = source.resized(placement.resized);
    if let Some((origin, size)) = placement.crop {
        image = image.cropped(origin, size);
    }
    if spec.darken || spec.colorize {
        image.gamma(TINT_GAMMA);
    }
    if spec.blur {
        image.blur()?;
    }
    canvas.paste(&image, placement.position);

    if spec.darken {
        canvas.tint(Color::rgb(0x22, 0x22, 0x22).with_alpha(DARKEN_ALPHA));
    }
    if spec.colorize {
        canvas.tint(scheme.with_alpha(COLORIZE_ALPHA));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/background.rs"]
mod tests;
