//! statcard renders fixed-size raster "cards" (compact statistics badges) from a layout id,
//! an option tree and a data tree.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: option and data trees are addressed by dotted paths ([`Tree`]); style tokens
//!    are resolved once per render ([`StyleTokens`]).
//! 2. **Compose**: a [`Layout`] fills a canvas: background fit and tints, header/footer
//!    gradients, corner areas flowed left to right ([`render_area`]) and center columns packed
//!    with thumbnails ([`pack_grid`]).
//! 3. **Persist**: [`Card`] encodes the canvas (PNG or JPEG), writes it under the output
//!    directory and reuses it while it is younger than the cache lifetime.
//!
//! Rendering is synchronous and deterministic for identical inputs. Missing or broken images
//! and fonts never fail a render; the affected element is left out and a `tracing` warning is
//! emitted.
#![forbid(unsafe_code)]

mod assets;
mod card;
mod foundation;
mod layout;
mod raster;
mod tree;

pub use crate::assets::color::Color;
pub use crate::assets::loader::{AssetLoader, FsAssetLoader, MemoryAssetLoader};
pub use crate::assets::text::{BlockTypesetter, ParleyTypesetter, TextRun, Typesetter};
pub use crate::card::request::Card;
pub use crate::card::store;
pub use crate::foundation::core::{Position, Rect, Size};
pub use crate::foundation::error::{CardError, CardResult};
pub use crate::layout::area::render_area;
pub use crate::layout::background::{
    BackgroundSpec, FitMode, HAlign, Placement, VAlign, apply_background, place_background,
};
pub use crate::layout::classic::{CLASSIC_ID, Classic};
pub use crate::layout::element::{Element, ElementKind};
pub use crate::layout::grid::{GridItem, GridPlan, pack_grid, plan_grid};
pub use crate::layout::retro::{AStatsRetro, RETRO_ID};
pub use crate::layout::style::{GridStyle, MAX_LENGTH, MIN_EXTENT, StyleDefaults, StyleTokens, TextStyle};
pub use crate::layout::{DEFAULT_LAYOUT, Layout, LayoutFactory, LayoutRegistry, RenderContext};
pub use crate::raster::canvas::{OutputFormat, Raster};
pub use crate::tree::resolve::{Tree, resolve, resolve_or};
