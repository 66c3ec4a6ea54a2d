use crate::assets::color::Color;
use crate::foundation::core::{Position, Size};
use crate::foundation::error::CardResult;
use crate::layout::area::render_area;
use crate::layout::background::{HAlign, VAlign, apply_background};
use crate::layout::element::Element;
use crate::layout::grid::pack_grid;
use crate::layout::paint::{absorb, add_gradient};
use crate::layout::style::StyleTokens;
use crate::layout::{Layout, RenderContext};
use crate::raster::canvas::Raster;
use crate::tree::resolve::Tree;

pub const CLASSIC_ID: &str = "classic";

/// Opacity of the scheme color at the inner edge of the header/footer gradients.
const OVERLAY_SCHEME_ALPHA: u8 = 30;
/// Opacity of the dark outer edge of the header/footer gradients.
const OVERLAY_SHADE_ALPHA: u8 = 65;

/// Header/footer strips with four corner areas and flexible center columns.
///
/// Options beyond the shared style tokens: `topAreaHeight` (30), `bottomAreaHeight` (15),
/// `areas.top.left`, `areas.top.right`, `areas.bottom.left`, `areas.bottom.right` (element
/// lists) and `areas.center` (a list of columns, each a list of elements).
#[derive(Clone, Copy, Debug, Default)]
pub struct Classic;

impl Layout for Classic {
    fn id(&self) -> &str {
        CLASSIC_ID
    }

    #[tracing::instrument(skip(self, ctx), fields(layout = CLASSIC_ID))]
    fn draw(&self, ctx: &mut RenderContext<'_>) -> CardResult<Raster> {
        let style = StyleTokens::from_options(ctx.options);
        let bands = Bands::resolve(ctx.options, style.size);

        let mut canvas = Raster::new(style.size, style.background_color);
        add_background(ctx, &style, &mut canvas)?;
        add_overlays(&style, bands, &mut canvas);
        add_corners(ctx, &style, bands, &mut canvas)?;
        add_center(ctx, &style, bands, &mut canvas)?;
        Ok(canvas)
    }
}

#[derive(Clone, Copy, Debug)]
struct Bands {
    top: i32,
    bottom: i32,
}

impl Bands {
    /// Strip heights, each limited to the canvas height.
    fn resolve(options: &Tree, canvas: Size) -> Self {
        let limit = i64::from(canvas.h());
        let band = |path: &str, default: i64| options.int_or(path, default).clamp(0, limit) as i32;
        Self {
            top: band("topAreaHeight", 30),
            bottom: band("bottomAreaHeight", 15),
        }
    }
}

/// Background image reference: the literal `background.value`, else the data at the path
/// named by `background.data`.
fn background_reference(ctx: &RenderContext<'_>) -> Option<String> {
    ctx.options.string("background.value").or_else(|| {
        let path = ctx.options.string("background.data")?;
        ctx.data.string(&path)
    })
}

fn add_background(ctx: &mut RenderContext<'_>, style: &StyleTokens, canvas: &mut Raster) -> CardResult<()> {
    let Some(reference) = background_reference(ctx) else {
        return Ok(());
    };
    let Some(source) = absorb(ctx.assets.load(&reference), &reference)? else {
        return Ok(());
    };
    apply_background(canvas, &source, &style.background, style.scheme)
}

fn add_overlays(style: &StyleTokens, bands: Bands, canvas: &mut Raster) {
    let cp = style.card_padding;
    let width = style.size.w() - cp * 2;
    let start = style.scheme.with_alpha(OVERLAY_SCHEME_ALPHA);
    let end = Color::rgb(0x11, 0x11, 0x11).with_alpha(OVERLAY_SHADE_ALPHA);

    let top = Size::from_i32(width, bands.top);
    add_gradient(canvas, Position::new(cp, cp), top, start, end, true);

    let bottom = Size::from_i32(width, bands.bottom);
    let y = style.size.h() - bands.bottom - cp;
    add_gradient(canvas, Position::new(cp, y), bottom, start, end, true);
}

/// Render the four corner areas. Right and bottom corners align by their trimmed size.
fn add_corners(
    ctx: &mut RenderContext<'_>,
    style: &StyleTokens,
    bands: Bands,
    canvas: &mut Raster,
) -> CardResult<()> {
    let cp = style.card_padding;
    let (w, h) = (style.size.w(), style.size.h());
    let inner = w - cp * 2;

    for (path, band, top, right) in [
        ("areas.top.left", bands.top, true, false),
        ("areas.top.right", bands.top, true, true),
        ("areas.bottom.left", bands.bottom, false, false),
        ("areas.bottom.right", bands.bottom, false, true),
    ] {
        let region = Size::from_i32(inner, band);
        if region.is_empty() {
            continue;
        }
        let elements = Element::list_from(ctx.options.list(path));
        let area = render_area(ctx, style, region, &elements, top)?;
        let size = area.size();
        let x = if right { (w - size.w() - cp).max(0) } else { cp };
        let y = if top { cp } else { (h - size.h() - cp).max(0) };
        canvas.paste(&area, Position::new(x, y));
    }
    Ok(())
}

/// Render `areas.center`: columns of equal width, each element spanning `span` columns and
/// aligned inside them.
fn add_center(
    ctx: &mut RenderContext<'_>,
    style: &StyleTokens,
    bands: Bands,
    canvas: &mut Raster,
) -> CardResult<()> {
    let columns = ctx.options.list("areas.center");
    if columns.is_empty() {
        return Ok(());
    }
    let (cp, ap) = (style.card_padding, style.area_padding);
    let column_w = style.size.w() / columns.len() as i32;
    let available_h = style.size.h() - bands.top - bands.bottom - cp * 2 - ap * 2;
    let top = bands.top + cp + ap;
    if column_w <= 0 || available_h <= 0 {
        return Ok(());
    }

    for (index, column) in columns.iter().enumerate() {
        let Some(entries) = column.as_array() else {
            continue;
        };
        let column_x = index as i32 * column_w;
        for element in Element::list_from(entries) {
            let span = element.span.clamp(1, columns.len() as u32) as i32;
            let span_w = column_w * span;
            let region = Size::from_i32(span_w, available_h);
            let area = match element.grid_items(ctx.data) {
                Some(items) => {
                    match pack_grid(ctx.assets, region, items, element.rows, &style.grid)? {
                        Some(area) => area,
                        None => continue,
                    }
                }
                None => render_area(ctx, style, region, std::slice::from_ref(&element), true)?,
            };

            let size = area.size();
            let y = match element.vertical {
                VAlign::Top => top,
                VAlign::Bottom => top + available_h - size.h(),
                _ => top + (available_h - size.h()) / 2,
            };
            let x = match element.align {
                HAlign::Left => column_x + ap,
                HAlign::Right => column_x + span_w - size.w() - ap,
                HAlign::Center => column_x + (span_w - size.w()) / 2,
            };
            canvas.paste(&area, Position::new(x, y));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/classic.rs"]
mod tests;
