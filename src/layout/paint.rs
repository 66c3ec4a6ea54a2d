use crate::assets::color::Color;
use crate::assets::loader::AssetLoader;
use crate::assets::text::{TextRun, Typesetter, advance};
use crate::foundation::core::{Position, Size};
use crate::foundation::error::{CardError, CardResult};
use crate::raster::canvas::Raster;

/// Opacity of the text drop shadow, in percent.
pub const SHADOW_ALPHA: u8 = 60;
/// Gamma applied to the copy painted behind an image with a backdrop.
pub const BACKDROP_GAMMA: f64 = 0.4;

/// Downgrade an [`CardError::AssetLoad`] to `None` with a warning; other errors pass through.
pub(crate) fn absorb<T>(result: CardResult<T>, what: &str) -> CardResult<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(CardError::AssetLoad(msg)) => {
            tracing::warn!(what, error = %msg, "skipping unavailable asset");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Advance width of `run`, or `None` when its font cannot be loaded.
pub(crate) fn measure(text: &mut dyn Typesetter, run: &TextRun<'_>) -> CardResult<Option<i32>> {
    if run.text.is_empty() || run.size <= 0.0 {
        return Ok(None);
    }
    Ok(absorb(text.measure(run), run.font)?.map(advance))
}

/// Draw `run` at `at`, preceded by a copy at (+1, +1) in `shadow` when given.
pub(crate) fn add_text(
    text: &mut dyn Typesetter,
    target: &mut Raster,
    run: &TextRun<'_>,
    color: Color,
    at: Position,
    shadow: Option<Color>,
) -> CardResult<()> {
    if let Some(shadow) = shadow {
        absorb(text.draw(target, run, shadow, at.offset(1, 1)), run.font)?;
    }
    absorb(text.draw(target, run, color, at), run.font)?;
    Ok(())
}

/// Shadow color for text drawn in `scheme`, or `None` when shadows are off.
pub(crate) fn shadow_color(enabled: bool, scheme: Color) -> Option<Color> {
    enabled.then(|| scheme.with_alpha(SHADOW_ALPHA))
}

/// Load `reference` scaled to `height`, keeping its aspect ratio.
pub(crate) fn load_scaled(
    assets: &mut dyn AssetLoader,
    reference: &str,
    height: i32,
) -> CardResult<Option<Raster>> {
    if height <= 0 {
        return Ok(None);
    }
    let Some(image) = absorb(assets.load(reference), reference)? else {
        return Ok(None);
    };
    Ok(Some(image.resized_to_height(height as u32)))
}

/// Paste `image` at `at`, optionally behind a darkened copy offset by one pixel down-right.
pub(crate) fn add_image(target: &mut Raster, image: &Raster, at: Position, backdrop: bool) {
    if backdrop {
        let mut copy = image.clone();
        copy.gamma(BACKDROP_GAMMA);
        target.paste(&copy, at.offset(1, 1));
    }
    target.paste(image, at);
}

/// Blend a vertical gradient strip over `target`, optionally flipped so `end` is on top.
pub(crate) fn add_gradient(
    target: &mut Raster,
    at: Position,
    size: Size,
    start: Color,
    end: Color,
    flip: bool,
) {
    if size.is_empty() {
        return;
    }
    let mut gradient = Raster::vertical_gradient(size, start, end);
    if flip {
        gradient.flip_vertical();
    }
    target.paste(&gradient, at);
}

#[cfg(test)]
#[path = "../../tests/unit/layout/paint.rs"]
mod tests;
