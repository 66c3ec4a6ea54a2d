use serde::Deserialize;
use serde_json::Value;

use crate::assets::color::Color;
use crate::assets::loader::AssetLoader;
use crate::foundation::core::{Position, Size};
use crate::foundation::error::CardResult;
use crate::foundation::math::div_floor;
use crate::layout::paint::{absorb, add_image};
use crate::layout::style::GridStyle;
use crate::raster::canvas::Raster;

/// Tallest a grid cell may get, border included.
pub const MAX_ITEM_HEIGHT: i32 = 42;

/// One thumbnail: an image reference plus an optional border color.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GridItem {
    pub image: Option<String>,
    pub color: Option<String>,
}

impl GridItem {
    /// Read an item leniently; anything that is not an item map becomes an empty item.
    pub fn from_value(v: &Value) -> Self {
        serde_json::from_value(v.clone()).unwrap_or_default()
    }
}

/// Cell geometry for a grid pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridPlan {
    /// Cell size, border included.
    pub item: Size,
    /// Image size inside the border.
    pub image: Size,
    /// Top-left corner of every placed cell, in reading order.
    pub cells: Vec<Position>,
    /// Bounding box of the placed cells.
    pub trim: Size,
}

/// Place up to `count` cells of uniform height into `region`.
///
/// The cell width follows `aspect` (the probe image's width / height). Cells wrap to a new row
/// when the next one would cross the right edge; placement stops at the first row that would
/// cross the bottom edge. Returns `None` when no cell is placed, so an empty pass takes no space.
pub fn plan_grid(
    region: Size,
    aspect: f64,
    count: usize,
    rows: u32,
    style: &GridStyle,
) -> Option<GridPlan> {
    let rows = i32::try_from(rows.max(1)).unwrap_or(i32::MAX);
    let margin = style.margin;
    let border = style.border_size;

    let gaps = margin.saturating_mul(rows.saturating_add(1));
    let item_h = MAX_ITEM_HEIGHT.min(div_floor(region.h().saturating_sub(gaps), rows));
    let image_h = item_h.saturating_sub(border.saturating_mul(2));
    if image_h <= 0 || !aspect.is_finite() {
        return None;
    }
    let image_w = (f64::from(image_h) * aspect) as i32;
    if image_w <= 0 {
        return None;
    }
    let item_w = image_w.saturating_add(border.saturating_mul(2));
    if item_w > region.w() {
        return None;
    }

    let mut cells = Vec::new();
    let (mut trim_w, mut trim_h) = (0, 0);
    let (mut x, mut y): (i32, i32) = (0, 0);
    for _ in 0..count {
        if x.saturating_add(item_w) > region.w() {
            x = 0;
            y = y.saturating_add(item_h).saturating_add(margin);
        }
        if y.saturating_add(item_h) > region.h() {
            break;
        }
        cells.push(Position::new(x, y));
        trim_w = trim_w.max(x + item_w);
        trim_h = trim_h.max(y + item_h);
        x = x.saturating_add(item_w).saturating_add(margin);
    }
    if cells.is_empty() {
        return None;
    }

    Some(GridPlan {
        item: Size::from_i32(item_w, item_h),
        image: Size::from_i32(image_w, image_h),
        cells,
        trim: Size::from_i32(trim_w, trim_h),
    })
}

/// Pack `items` into a transparent `region` and trim it to the used extent.
///
/// Returns `None` (nothing drawn) when no cell fits, the list is empty or the first item has
/// no loadable image, since that image decides the cell aspect ratio. Items whose image fails to load keep
/// their border and leave the cell empty.
pub fn pack_grid(
    assets: &mut dyn AssetLoader,
    region: Size,
    items: &[Value],
    rows: u32,
    style: &GridStyle,
) -> CardResult<Option<Raster>> {
    let items: Vec<GridItem> = items.iter().map(GridItem::from_value).collect();
    let Some(probe_ref) = items.first().and_then(|i| i.image.as_deref()) else {
        return Ok(None);
    };
    let Some(probe) = absorb(assets.load(probe_ref), probe_ref)? else {
        return Ok(None);
    };
    let Some(plan) = plan_grid(region, probe.size().aspect(), items.len(), rows, style) else {
        return Ok(None);
    };

    let mut area = Raster::transparent(region);
    for (item, cell) in items.iter().zip(&plan.cells) {
        if style.border_size > 0 {
            let border = item
                .color
                .as_deref()
                .and_then(|c| Color::parse(c, style.border_alpha).ok())
                .unwrap_or(style.border_color.with_alpha(style.border_alpha));
            area.fill_rect(*cell, plan.item, border);
        }
        let Some(reference) = item.image.as_deref() else {
            continue;
        };
        if let Some(image) = absorb(assets.load(reference), reference)? {
            let at = cell.offset(style.border_size, style.border_size);
            add_image(&mut area, &image.resized(plan.image), at, false);
        }
    }

    tracing::trace!(placed = plan.cells.len(), total = items.len(), "packed grid");
    Ok(Some(area.cropped(Position::origin(), plan.trim)))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
