use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::assets::color::Color;
use crate::foundation::core::{Position, Rect, Size};
use crate::foundation::error::{CardError, CardResult};
use crate::raster::canvas::Raster;

/// One line of text to measure or draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextRun<'a> {
    /// The text itself.
    pub text: &'a str,
    /// Font identifier (a font file name for [`ParleyTypesetter`]).
    pub font: &'a str,
    /// Font size in pixels.
    pub size: f32,
}

impl<'a> TextRun<'a> {
    /// Construct a run.
    pub fn new(text: &'a str, font: &'a str, size: f32) -> Self {
        Self { text, font, size }
    }
}

/// Text metrics and glyph rendering.
///
/// `measure` returns the bounding box relative to the draw origin (the top-left of the line box);
/// `x1` is the advance width the flow layout consumes.
pub trait Typesetter {
    /// Bounding box of `run` when drawn at the origin.
    fn measure(&mut self, run: &TextRun<'_>) -> CardResult<Rect>;

    /// Draw `run` onto `target` with its line box's top-left corner at `at`.
    fn draw(
        &mut self,
        target: &mut Raster,
        run: &TextRun<'_>,
        color: Color,
        at: Position,
    ) -> CardResult<()>;
}

/// Pixel advance of a measured run, rounded up.
pub(crate) fn advance(bounds: Rect) -> i32 {
    bounds.x1.max(0.0).ceil() as i32
}

/// Parley brush. Glyph color is set on the render context when runs are filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrush;

#[derive(Clone)]
struct LoadedFace {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// Shapes text with Parley and rasterizes glyphs with `vello_cpu`.
///
/// Fonts are loaded on first use by file name from a font directory.
pub struct ParleyTypesetter {
    font_dir: PathBuf,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    faces: HashMap<String, LoadedFace>,
}

impl ParleyTypesetter {
    /// Create a typesetter reading font files from `font_dir`.
    pub fn new(font_dir: impl AsRef<Path>) -> Self {
        Self {
            font_dir: font_dir.as_ref().to_path_buf(),
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    fn face(&mut self, font_id: &str) -> CardResult<LoadedFace> {
        if let Some(face) = self.faces.get(font_id) {
            return Ok(face.clone());
        }

        let path = if Path::new(font_id).is_absolute() {
            PathBuf::from(font_id)
        } else {
            self.font_dir.join(font_id)
        };
        let bytes = std::fs::read(&path)
            .map_err(|e| CardError::asset_load(format!("font '{}': {e}", path.display())))?;

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CardError::asset_load(format!("no font families in '{}'", path.display()))
        })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::asset_load("registered font family has no name"))?
            .to_string();

        let face = LoadedFace {
            family,
            data: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
        };
        tracing::debug!(font = font_id, family = %face.family, "loaded font");
        self.faces.insert(font_id.to_owned(), face.clone());
        Ok(face)
    }

    fn layout(
        &mut self,
        run: &TextRun<'_>,
    ) -> CardResult<(parley::Layout<TextBrush>, LoadedFace)> {
        if !run.size.is_finite() || run.size <= 0.0 {
            return Err(CardError::render("text size must be finite and > 0"));
        }
        let face = self.face(run.font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, run.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(run.size));

        let mut layout: parley::Layout<TextBrush> = builder.build(run.text);
        layout.break_all_lines(None);
        Ok((layout, face))
    }
}

fn layout_extent(layout: &parley::Layout<TextBrush>) -> (f64, f64) {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(f64::from(m.advance));
        h += f64::from(m.ascent + m.descent + m.leading);
    }
    (w, h)
}

impl Typesetter for ParleyTypesetter {
    fn measure(&mut self, run: &TextRun<'_>) -> CardResult<Rect> {
        let (layout, _) = self.layout(run)?;
        let (w, h) = layout_extent(&layout);
        Ok(Rect::new(0.0, 0.0, w, h))
    }

    fn draw(
        &mut self,
        target: &mut Raster,
        run: &TextRun<'_>,
        color: Color,
        at: Position,
    ) -> CardResult<()> {
        let (layout, face) = self.layout(run)?;
        let (w, h) = layout_extent(&layout);

        // One pixel of slack on each side for antialiased glyph edges.
        let pw: u16 = (w.ceil() as u32 + 2)
            .try_into()
            .map_err(|_| CardError::render("text surface width exceeds u16"))?;
        let ph: u16 = (h.ceil() as u32 + 2)
            .try_into()
            .map_err(|_| CardError::render("text surface height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(pw, ph);
        let [r, g, b, a] = color.to_rgba8();
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let glyphs = glyph_run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&face.data)
                    .font_size(glyph_run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(pw, ph);
        ctx.render_to_pixmap(&mut pixmap);
        let glyphs = Raster::from_premul_rgba8(
            Size::new(u32::from(pw), u32::from(ph)),
            pixmap.data_as_u8_slice(),
        )?;
        target.paste(&glyphs, at);
        Ok(())
    }
}

/// Font-free typesetter: every character advances by `0.6 × size` and non-whitespace
/// characters are drawn as solid boxes.
///
/// Output depends only on the text and size, which makes it suitable for headless
/// environments without font files and for pixel-exact tests.
#[derive(Clone, Debug, Default)]
pub struct BlockTypesetter {
    measured: usize,
    drawn: usize,
}

impl BlockTypesetter {
    /// Create a block typesetter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `measure` calls served.
    pub fn measured(&self) -> usize {
        self.measured
    }

    /// Number of `draw` calls served.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    fn glyph_advance(size: f32) -> i32 {
        ((size * 0.6).round() as i32).max(1)
    }
}

impl Typesetter for BlockTypesetter {
    fn measure(&mut self, run: &TextRun<'_>) -> CardResult<Rect> {
        self.measured += 1;
        let n = run.text.chars().count() as f64;
        let adv = f64::from(Self::glyph_advance(run.size));
        Ok(Rect::new(0.0, 0.0, n * adv, f64::from(run.size.ceil())))
    }

    fn draw(
        &mut self,
        target: &mut Raster,
        run: &TextRun<'_>,
        color: Color,
        at: Position,
    ) -> CardResult<()> {
        self.drawn += 1;
        let adv = Self::glyph_advance(run.size);
        let height = run.size.ceil().max(1.0) as u32;
        let glyph = Size::new((adv - 1).max(1) as u32, height);
        for (i, c) in run.text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            target.fill_rect(at.offset(i as i32 * adv, 0), glyph, color);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
