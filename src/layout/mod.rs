//! Card layouts: style tokens, the area flow, the grid packer and the concrete designs.

pub(crate) mod area;
pub(crate) mod background;
pub(crate) mod classic;
pub(crate) mod element;
pub(crate) mod grid;
pub(crate) mod paint;
pub(crate) mod retro;
pub(crate) mod style;

use std::collections::BTreeMap;

use crate::assets::loader::AssetLoader;
use crate::assets::text::Typesetter;
use crate::foundation::error::CardResult;
use crate::raster::canvas::Raster;
use crate::tree::resolve::Tree;

/// Everything a layout reads or draws with during one render.
pub struct RenderContext<'a> {
    /// Style and placement options.
    pub options: &'a Tree,
    /// Content data.
    pub data: &'a Tree,
    /// Image source for backgrounds, element images and thumbnails.
    pub assets: &'a mut dyn AssetLoader,
    /// Text metrics and glyph rendering.
    pub text: &'a mut dyn Typesetter,
}

/// One concrete visual design.
pub trait Layout {
    /// Identifier used for registry lookup and the filename suffix.
    fn id(&self) -> &str;

    /// Composite a full canvas from the context's options and data.
    fn draw(&self, ctx: &mut RenderContext<'_>) -> CardResult<Raster>;
}

/// Constructor stored in a [`LayoutRegistry`].
pub type LayoutFactory = fn() -> Box<dyn Layout>;

/// Layout identifier used when nothing else is requested or an identifier is unknown.
pub const DEFAULT_LAYOUT: &str = classic::CLASSIC_ID;

/// Maps layout identifiers to factories, with a fixed default.
#[derive(Clone, Debug)]
pub struct LayoutRegistry {
    factories: BTreeMap<String, LayoutFactory>,
    default_id: String,
}

impl LayoutRegistry {
    /// Registry containing only the default layout.
    pub fn new() -> Self {
        let mut factories: BTreeMap<String, LayoutFactory> = BTreeMap::new();
        factories.insert(DEFAULT_LAYOUT.to_owned(), || Box::new(classic::Classic));
        Self {
            factories,
            default_id: DEFAULT_LAYOUT.to_owned(),
        }
    }

    /// Registry with every layout shipped by this crate.
    pub fn builtin() -> Self {
        Self::new().with(retro::RETRO_ID, || Box::new(retro::AStatsRetro))
    }

    /// Register `factory` under `id`, replacing any previous entry.
    pub fn with(mut self, id: impl Into<String>, factory: LayoutFactory) -> Self {
        self.register(id, factory);
        self
    }

    /// Register `factory` under `id`, replacing any previous entry.
    pub fn register(&mut self, id: impl Into<String>, factory: LayoutFactory) {
        self.factories.insert(id.into(), factory);
    }

    /// Registered identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Build the layout registered under `id`, falling back to the default layout.
    pub fn create(&self, id: &str) -> Box<dyn Layout> {
        if let Some(factory) = self.factories.get(id) {
            return factory();
        }
        tracing::debug!(requested = id, fallback = %self.default_id, "unknown layout");
        match self.factories.get(&self.default_id) {
            Some(factory) => factory(),
            None => Box::new(classic::Classic),
        }
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/registry.rs"]
mod tests;
