use crate::assets::color::Color;
use crate::assets::text::TextRun;
use crate::foundation::core::{Position, Size};
use crate::foundation::error::CardResult;
use crate::layout::RenderContext;
use crate::layout::element::{Element, ElementKind};
use crate::layout::grid::pack_grid;
use crate::layout::paint::{add_image, add_text, load_scaled, measure, shadow_color};
use crate::layout::style::StyleTokens;
use crate::raster::canvas::Raster;

/// Render `elements` left to right into a transparent area of `size`, then trim the area to
/// the width actually used.
///
/// `vertical_preferred` applies the header preset: text is two points larger and text with a
/// label is stacked as [`ElementKind::TextVertical`]. An empty element list yields the full,
/// untrimmed transparent area.
pub fn render_area(
    ctx: &mut RenderContext<'_>,
    style: &StyleTokens,
    size: Size,
    elements: &[Element],
    vertical_preferred: bool,
) -> CardResult<Raster> {
    let mut flow = AreaFlow::new(style, size, vertical_preferred);
    if elements.is_empty() {
        return Ok(flow.area);
    }
    for element in elements {
        flow.place(ctx, element)?;
    }
    Ok(flow.finish())
}

/// Resolved per-element settings.
struct Piece<'e> {
    element: &'e Element,
    kind: ElementKind,
    value: Option<String>,
    font_size: i32,
    label_size: i32,
    icon_size: i32,
    label_space: i32,
    padding: i32,
    color: Color,
    label_color: Color,
    icon_color: Color,
    shadow: Option<Color>,
}

/// Horizontal cursor over one area.
///
/// The cursor only moves when an element places content: the first placed element starts at
/// its padding, later ones one item margin after the previous end.
pub(crate) struct AreaFlow<'s> {
    style: &'s StyleTokens,
    area: Raster,
    size: Size,
    vertical_preferred: bool,
    cursor: Option<i32>,
}

impl<'s> AreaFlow<'s> {
    pub(crate) fn new(style: &'s StyleTokens, size: Size, vertical_preferred: bool) -> Self {
        Self {
            style,
            area: Raster::transparent(size),
            size,
            vertical_preferred,
            cursor: None,
        }
    }

    /// Right edge of the last placed element, `0` before anything was placed.
    pub(crate) fn cursor(&self) -> i32 {
        self.cursor.unwrap_or(0)
    }

    pub(crate) fn place(&mut self, ctx: &mut RenderContext<'_>, element: &Element) -> CardResult<()> {
        let piece = self.resolve(ctx, element);
        let start = match self.cursor {
            None => piece.padding,
            Some(end) => end.saturating_add(self.style.item_margin),
        };
        let end = match piece.kind {
            ElementKind::Text => self.text(ctx, &piece, start)?,
            ElementKind::TextVertical => self.text_vertical(ctx, &piece, start)?,
            ElementKind::Image | ElementKind::Avatar => self.image(ctx, &piece, start)?,
            ElementKind::Username => self.username(ctx, &piece, start)?,
            ElementKind::Grid => self.grid(ctx, &piece, start)?,
        };
        if let Some(end) = end {
            self.cursor = Some(end);
        }
        Ok(())
    }

    /// Crop to the used width plus trailing padding, limited to the area width minus padding.
    pub(crate) fn finish(self) -> Raster {
        let padding = self.style.area_padding;
        let limit = (self.size.w() - padding).max(1);
        let width = (self.cursor() + padding).max(1).min(limit);
        self.area
            .cropped(Position::origin(), Size::from_i32(width, self.size.h()))
    }

    fn resolve<'e>(&self, ctx: &RenderContext<'_>, element: &'e Element) -> Piece<'e> {
        let text = &self.style.text;
        let alpha = element.alpha;
        let tinted = |token: &Option<String>, fallback: Color| {
            token
                .as_deref()
                .and_then(|t| Color::parse(t, alpha).ok())
                .unwrap_or(fallback.with_alpha(alpha))
        };

        let mut kind = element.kind;
        let mut font_size = element.font_size.unwrap_or(text.size);
        if self.vertical_preferred && kind == ElementKind::Text {
            font_size = element.font_size.unwrap_or(text.size + 2);
            if element.label.is_some() {
                kind = ElementKind::TextVertical;
            }
        }
        let shadow = match kind {
            ElementKind::Image => element.shadow.unwrap_or(false),
            ElementKind::Avatar => element.shadow.unwrap_or(true),
            _ => element.shadow.unwrap_or(text.shadow),
        };

        Piece {
            element,
            kind,
            value: element.text(ctx.data),
            font_size,
            label_size: element.label_font_size.unwrap_or(text.label_size),
            icon_size: element.icon_font_size.unwrap_or(text.icon_size),
            label_space: element.label_space.unwrap_or(text.label_space),
            padding: element.padding.unwrap_or(self.style.area_padding),
            color: tinted(&element.color, text.color),
            label_color: tinted(&element.label_color, text.label_color),
            icon_color: tinted(&element.icon_color, text.icon_color),
            shadow: shadow_color(shadow, self.style.scheme),
        }
    }

    /// Icon, label and value side by side; each piece is skipped if it would overflow.
    fn text(&mut self, ctx: &mut RenderContext<'_>, p: &Piece<'_>, start: i32) -> CardResult<Option<i32>> {
        let fonts = &self.style.text;
        let h = self.size.h();
        let mut x = start;
        let mut placed = false;

        if let Some(icon) = p.element.icon.as_deref() {
            let run = TextRun::new(icon, &fonts.icon_font, p.icon_size as f32);
            if let Some(w) = measure(ctx.text, &run)?
                && x.saturating_add(w) <= self.size.w()
            {
                let at = Position::new(x, (h - p.icon_size) / 2);
                add_text(ctx.text, &mut self.area, &run, p.icon_color, at, p.shadow)?;
                x = (x + w).saturating_add(p.label_space);
                placed = true;
            }
        }

        if let Some(label) = p.element.label.as_deref() {
            let run = TextRun::new(label, &fonts.font, fonts.size as f32);
            if let Some(w) = measure(ctx.text, &run)?
                && x.saturating_add(w) <= self.size.w()
            {
                let at = Position::new(x, (h - fonts.size) / 2);
                add_text(ctx.text, &mut self.area, &run, p.label_color, at, p.shadow)?;
                x = (x + w).saturating_add(p.label_space);
                placed = true;
            }
        }

        if let Some(value) = p.value.as_deref() {
            let run = TextRun::new(value, &fonts.font, p.font_size as f32);
            if let Some(w) = measure(ctx.text, &run)?
                && x.saturating_add(w) <= self.size.w()
            {
                let at = Position::new(x, (h - p.font_size) / 2);
                add_text(ctx.text, &mut self.area, &run, p.color, at, p.shadow)?;
                x += w + i32::from(p.shadow.is_some());
                placed = true;
            }
        }

        Ok(placed.then_some(x))
    }

    /// Value above label, icon inline before the value, both lines centered on the wider one.
    fn text_vertical(
        &mut self,
        ctx: &mut RenderContext<'_>,
        p: &Piece<'_>,
        start: i32,
    ) -> CardResult<Option<i32>> {
        let fonts = &self.style.text;
        let h = self.size.h();
        let lift = i32::from(p.shadow.is_some());

        let value_run = p
            .value
            .as_deref()
            .map(|v| TextRun::new(v, &fonts.font, p.font_size as f32));
        let icon_run = p
            .element
            .icon
            .as_deref()
            .map(|i| TextRun::new(i, &fonts.icon_font, p.icon_size as f32));
        let label_run = p
            .element
            .label
            .as_deref()
            .map(|l| TextRun::new(l, &fonts.font, p.label_size as f32));

        let value_w = match &value_run {
            Some(run) => measure(ctx.text, run)?,
            None => None,
        };
        let icon_w = match &icon_run {
            Some(run) => measure(ctx.text, run)?,
            None => None,
        };
        let label_w = match &label_run {
            Some(run) => measure(ctx.text, run)?,
            None => None,
        };
        if value_w.is_none() && icon_w.is_none() && label_w.is_none() {
            return Ok(None);
        }

        let mut text_w = value_w.unwrap_or(0);
        if let Some(iw) = icon_w {
            text_w = text_w.saturating_add(iw).saturating_add(p.label_space);
        }
        let mut offset_y = (h - p.font_size) / 2;
        if label_w.is_some() {
            offset_y = (h - p.font_size - p.label_size - p.label_space) / 2;
        }
        let element_w = text_w.max(label_w.unwrap_or(0)).saturating_add(1);
        if start.saturating_add(element_w) > self.size.w() {
            return Ok(None);
        }

        let text_x = start + (element_w - text_w) / 2;
        if let Some(run) = &icon_run
            && icon_w.is_some()
        {
            let at = Position::new(text_x, offset_y - lift);
            add_text(ctx.text, &mut self.area, run, p.icon_color, at, p.shadow)?;
        }
        if let Some(run) = &value_run
            && value_w.is_some()
        {
            let x = text_x + icon_w.map_or(0, |iw| iw + p.label_space);
            let at = Position::new(x, offset_y - lift);
            add_text(ctx.text, &mut self.area, run, p.color, at, p.shadow)?;
            offset_y += p.font_size + p.label_space;
        }
        if let (Some(run), Some(lw)) = (&label_run, label_w) {
            let at = Position::new(start + (element_w - lw) / 2, offset_y - lift);
            add_text(ctx.text, &mut self.area, run, p.label_color, at, p.shadow)?;
        }

        Ok(Some(start + element_w))
    }

    /// Height-fitted image, vertically centered, optionally with a backdrop.
    fn image(&mut self, ctx: &mut RenderContext<'_>, p: &Piece<'_>, start: i32) -> CardResult<Option<i32>> {
        let Some(reference) = p.value.as_deref() else {
            return Ok(None);
        };
        let image_h = self.size.h() - p.padding * 2;
        let Some(image) = load_scaled(ctx.assets, reference, image_h)? else {
            return Ok(None);
        };
        let w = image.size().w();
        if start.saturating_add(w) > self.size.w() {
            return Ok(None);
        }
        let at = Position::new(start, (self.size.h() - image_h) / 2);
        add_image(&mut self.area, &image, at, p.shadow.is_some());
        Ok(Some(start + w))
    }

    /// Value in the bold font, one pixel above the text line.
    fn username(&mut self, ctx: &mut RenderContext<'_>, p: &Piece<'_>, start: i32) -> CardResult<Option<i32>> {
        let Some(value) = p.value.as_deref() else {
            return Ok(None);
        };
        let run = TextRun::new(value, &self.style.text.bold_font, p.font_size as f32);
        let Some(w) = measure(ctx.text, &run)? else {
            return Ok(None);
        };
        if start.saturating_add(w) > self.size.w() {
            return Ok(None);
        }
        let at = Position::new(start, (self.size.h() - p.font_size) / 2 - 1);
        add_text(ctx.text, &mut self.area, &run, p.color, at, p.shadow)?;
        Ok(Some(start + w + i32::from(p.shadow.is_some())))
    }

    /// Thumbnails packed into the remaining width.
    fn grid(&mut self, ctx: &mut RenderContext<'_>, p: &Piece<'_>, start: i32) -> CardResult<Option<i32>> {
        let Some(items) = p.element.grid_items(ctx.data) else {
            return Ok(None);
        };
        let region = Size::from_i32(self.size.w() - start, self.size.h() - p.padding * 2);
        if region.is_empty() {
            return Ok(None);
        }
        let Some(packed) = pack_grid(ctx.assets, region, items, p.element.rows, &self.style.grid)? else {
            return Ok(None);
        };
        let w = packed.size().w();
        if w == 0 || start.saturating_add(w) > self.size.w() {
            return Ok(None);
        }
        self.area.paste(&packed, Position::new(start, p.padding));
        Ok(Some(start + w))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/area.rs"]
mod tests;
