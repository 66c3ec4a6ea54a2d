use crate::assets::color::Color;
use crate::foundation::core::Size;
use crate::layout::background::{BackgroundSpec, FitMode, HAlign, VAlign};
use crate::tree::resolve::Tree;

/// Hard-coded fallbacks a layout hands to [`StyleTokens::resolve`].
#[derive(Clone, Debug, PartialEq)]
pub struct StyleDefaults {
    /// Canvas size before clamping.
    pub size: Size,
    /// Canvas fill color.
    pub background: &'static str,
    /// Body text color.
    pub text_color: &'static str,
    /// Body font identifier.
    pub font: &'static str,
    /// Body font size in pixels.
    pub font_size: i64,
    /// Accent color used for shadows, gradients and colorize tints.
    pub scheme: &'static str,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            size: Size::new(MIN_EXTENT, MIN_EXTENT),
            background: "#000000",
            text_color: "#FFFFFF",
            font: "fontawesome-webfont.ttf",
            font_size: 8,
            scheme: "#6699CC",
        }
    }
}

/// Smallest canvas extent a layout may produce.
pub const MIN_EXTENT: u32 = 10;

/// Upper bound for canvas extents and every length read from options.
pub const MAX_LENGTH: u32 = u16::MAX as u32;

/// Typography tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub label_color: Color,
    pub icon_color: Color,
    pub shadow: bool,
    pub label_space: i32,
    pub font: String,
    pub bold_font: String,
    pub icon_font: String,
    pub size: i32,
    pub icon_size: i32,
    pub label_size: i32,
}

/// Grid thumbnail tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    pub border_size: i32,
    pub border_color: Color,
    pub border_alpha: u8,
    pub margin: i32,
}

/// Every style token a layout draws with, resolved once from the option tree.
///
/// Unparseable or wrongly typed options fall back to the default instead of failing the render.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleTokens {
    pub size: Size,
    pub card_padding: i32,
    pub area_padding: i32,
    pub item_margin: i32,
    pub background_color: Color,
    pub background: BackgroundSpec,
    pub grid: GridStyle,
    pub text: TextStyle,
    pub scheme: Color,
}

impl StyleTokens {
    /// Resolve every token from `options`, falling back to `defaults`.
    pub fn resolve(options: &Tree, defaults: &StyleDefaults) -> Self {
        let width = options.int_or("width", i64::from(defaults.size.width));
        let height = options.int_or("height", i64::from(defaults.size.height));
        let size = Size::new(clamp_extent(width), clamp_extent(height));

        let background_alpha = percent(options.int_or("background.alpha", 100));
        let font = options.string_or("text.font", defaults.font);

        Self {
            size,
            card_padding: non_negative(options.int_or("cardPadding", 1)),
            area_padding: non_negative(options.int_or("areaPadding", 4)),
            item_margin: non_negative(options.int_or("itemMargin", 8)),
            background_color: color(options, "background.color", defaults.background, background_alpha),
            background: BackgroundSpec {
                fit: FitMode::parse(&options.string_or("background.size", "cover")),
                h_align: HAlign::parse(&options.string_or("background.align", "left")),
                v_align: VAlign::parse(&options.string_or("background.vertical", "center")),
                darken: options.bool_or("background.darken", false),
                colorize: options.bool_or("background.colorize", false),
                blur: options.bool_or("background.blur", false),
            },
            grid: GridStyle {
                border_size: non_negative(options.int_or("gridItem.borderSize", 1)),
                border_color: color(options, "gridItem.borderColor", "#000000", 100),
                border_alpha: percent(options.int_or("gridItem.borderAlpha", 100)),
                margin: non_negative(options.int_or("gridItem.margin", 1)),
            },
            text: TextStyle {
                color: color(options, "text.color", defaults.text_color, 100),
                label_color: color(options, "text.labelColor", "#CCCCCC", 100),
                icon_color: color(options, "text.iconColor", "#CCCCCC", 100),
                shadow: options.bool_or("text.shadow", true),
                label_space: non_negative(options.int_or("text.labelSpace", 4)),
                bold_font: options.string_or("text.boldFont", &font),
                icon_font: options.string_or("text.iconFont", "fontawesome-webfont.ttf"),
                font,
                size: non_negative(options.int_or("text.size", defaults.font_size)),
                icon_size: non_negative(options.int_or("font.iconSize", 10)),
                label_size: non_negative(options.int_or("font.labelSize", 5)),
            },
            scheme: color(options, "color", defaults.scheme, 100),
        }
    }

    /// Resolve with the stock defaults.
    pub fn from_options(options: &Tree) -> Self {
        Self::resolve(options, &StyleDefaults::default())
    }
}

fn clamp_extent(v: i64) -> u32 {
    v.clamp(i64::from(MIN_EXTENT), i64::from(MAX_LENGTH)) as u32
}

pub(crate) fn non_negative(v: i64) -> i32 {
    v.clamp(0, i64::from(MAX_LENGTH)) as i32
}

fn percent(v: i64) -> u8 {
    v.clamp(0, 100) as u8
}

/// Color at `path`, falling back to `default` when missing or unparseable.
pub(crate) fn color(options: &Tree, path: &str, default: &str, alpha: u8) -> Color {
    options
        .string(path)
        .and_then(|token| Color::parse(&token, alpha).ok())
        .or_else(|| Color::parse(default, alpha).ok())
        .unwrap_or(Color::rgb(0, 0, 0).with_alpha(alpha))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/style.rs"]
mod tests;
