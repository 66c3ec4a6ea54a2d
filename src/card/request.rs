use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use base64::Engine as _;
use serde_json::Value;

use crate::assets::loader::{AssetLoader, FsAssetLoader};
use crate::assets::text::{ParleyTypesetter, Typesetter};
use crate::card::store;
use crate::foundation::error::{CardError, CardResult};
use crate::layout::{DEFAULT_LAYOUT, Layout, LayoutRegistry, RenderContext};
use crate::raster::canvas::OutputFormat;
use crate::tree::resolve::Tree;

enum LayoutChoice {
    Id(String),
    Instance(Box<dyn Layout>),
}

/// One card render request.
///
/// Configure it with the by-value builder methods, then call [`Card::render`],
/// [`Card::show`] or [`Card::to_base64`]. The request can be reused to render again, for
/// example after pointing it at a different filename.
///
/// ```no_run
/// use serde_json::json;
///
/// let bytes = statcard::Card::new()
///     .output_directory("cards")
///     .filename("p1", false)
///     .options(json!({"width": 200, "height": 60, "areas": {"top": {"left": [{"data": "name"}]}}}))
///     .data(json!({"name": "Ada"}))
///     .render()?;
/// # Ok::<(), statcard::CardError>(())
/// ```
pub struct Card {
    output_dir: PathBuf,
    filename: String,
    add_suffix: bool,
    format: String,
    cache_lifetime: Option<Duration>,
    layout: LayoutChoice,
    options: Tree,
    data: Tree,
    registry: LayoutRegistry,
    assets: Box<dyn AssetLoader>,
    text: Box<dyn Typesetter>,
}

impl Card {
    /// Request with defaults: current directory, `png`, no caching, the `classic` layout,
    /// images from the current directory and fonts from `./fonts`.
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            filename: String::new(),
            add_suffix: false,
            format: "png".to_owned(),
            cache_lifetime: None,
            layout: LayoutChoice::Id(DEFAULT_LAYOUT.to_owned()),
            options: Tree::default(),
            data: Tree::default(),
            registry: LayoutRegistry::builtin(),
            assets: Box::new(FsAssetLoader::new(".")),
            text: Box::new(ParleyTypesetter::new("fonts")),
        }
    }

    /// Directory the card file is written to.
    pub fn output_directory(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Base file name; with `add_suffix` the layout id is appended (`name-classic.png`).
    pub fn filename(mut self, name: impl Into<String>, add_suffix: bool) -> Self {
        self.filename = name.into();
        self.add_suffix = add_suffix;
        self
    }

    /// Output format token (`png`, `jpg`, `jpeg`). Checked when rendering.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Reuse a persisted card younger than `seconds`. Zero disables the cache.
    pub fn cache_lifetime(mut self, seconds: u64) -> Self {
        self.cache_lifetime = (seconds > 0).then(|| Duration::from_secs(seconds));
        self
    }

    /// Select a registered layout by identifier; unknown ids render the default layout.
    pub fn layout_id(mut self, id: impl Into<String>) -> Self {
        self.layout = LayoutChoice::Id(id.into());
        self
    }

    /// Use a layout instance directly.
    pub fn layout(mut self, layout: Box<dyn Layout>) -> Self {
        self.layout = LayoutChoice::Instance(layout);
        self
    }

    /// Replace the layout registry consulted by [`Card::layout_id`].
    pub fn registry(mut self, registry: LayoutRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Style and placement options.
    pub fn options(mut self, options: impl Into<Tree>) -> Self {
        self.options = options.into();
        self
    }

    /// Content data.
    pub fn data(mut self, data: impl Into<Tree>) -> Self {
        self.data = data.into();
        self
    }

    /// Image source for backgrounds, element images and thumbnails.
    pub fn asset_loader(mut self, assets: Box<dyn AssetLoader>) -> Self {
        self.assets = assets;
        self
    }

    /// Text metrics and glyph rendering.
    pub fn typesetter(mut self, text: Box<dyn Typesetter>) -> Self {
        self.text = text;
        self
    }

    /// Option value at `path`, or `default`. The strings `"true"` and `"false"` read as booleans.
    pub fn option(&self, path: &str, default: Value) -> Value {
        match self.options.get_or(path, default) {
            Value::String(s) if s == "true" => Value::Bool(true),
            Value::String(s) if s == "false" => Value::Bool(false),
            other => other,
        }
    }

    /// Data value at `path`.
    pub fn data_value(&self, path: &str) -> Option<&Value> {
        self.data.get(path)
    }

    /// Identifier of the layout that will draw this card.
    pub fn resolved_layout_id(&self) -> String {
        match &self.layout {
            LayoutChoice::Instance(layout) => layout.id().to_owned(),
            LayoutChoice::Id(id) => self.registry.create(id).id().to_owned(),
        }
    }

    /// Where the card is persisted: `dir/filename[-layout].ext`.
    pub fn output_path(&self) -> CardResult<PathBuf> {
        let format = self.validate()?;
        Ok(self.path_for(&self.resolved_layout_id(), format))
    }

    fn validate(&self) -> CardResult<OutputFormat> {
        if self.filename.trim().is_empty() {
            return Err(CardError::configuration(format!(
                "invalid filename \"{}\"",
                self.filename
            )));
        }
        OutputFormat::parse(&self.format)
    }

    fn path_for(&self, layout_id: &str, format: OutputFormat) -> PathBuf {
        let mut name = self.filename.clone();
        if self.add_suffix {
            name.push('-');
            name.push_str(layout_id);
        }
        name.push('.');
        name.push_str(format.extension());
        self.output_dir.join(name)
    }

    /// Render (or reuse a fresh cached copy of) the card and return the encoded bytes.
    ///
    /// The persisted file is overwritten on every fresh render.
    #[tracing::instrument(skip(self), fields(filename = %self.filename, format = %self.format))]
    pub fn render(&mut self) -> CardResult<Vec<u8>> {
        let format = self.validate()?;

        let created;
        let layout: &dyn Layout = match &self.layout {
            LayoutChoice::Instance(layout) => layout.as_ref(),
            LayoutChoice::Id(id) => {
                created = self.registry.create(id);
                created.as_ref()
            }
        };
        let path = self.path_for(layout.id(), format);

        if let Some(lifetime) = self.cache_lifetime {
            match store::read_fresh(&path, lifetime) {
                Ok(Some(bytes)) => {
                    tracing::debug!(path = %path.display(), "cache hit");
                    return Ok(bytes);
                }
                Ok(None) => tracing::debug!(path = %path.display(), "cache miss"),
                Err(e) => tracing::warn!(error = %e, "cached card unreadable, rendering fresh"),
            }
        }

        let mut ctx = RenderContext {
            options: &self.options,
            data: &self.data,
            assets: self.assets.as_mut(),
            text: self.text.as_mut(),
        };
        let canvas = layout.draw(&mut ctx)?;
        let bytes = canvas.encode(format)?;
        store::write(&path, &bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "card written");
        Ok(bytes)
    }

    /// Render and write the encoded card to `out`.
    pub fn show<W: Write>(&mut self, out: &mut W) -> CardResult<()> {
        let bytes = self.render()?;
        out.write_all(&bytes).context("write card to output")?;
        Ok(())
    }

    /// Render and return the encoded card as standard base64.
    pub fn to_base64(&mut self) -> CardResult<String> {
        let bytes = self.render()?;
        Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/request.rs"]
mod tests;
