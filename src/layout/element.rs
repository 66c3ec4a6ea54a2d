use serde_json::Value;

use crate::layout::background::{HAlign, VAlign};
use crate::layout::style::non_negative;
use crate::tree::resolve::{Tree, scalar_bool, scalar_int, scalar_string};

/// What an element draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ElementKind {
    /// Icon, label and value side by side on one line.
    #[default]
    Text,
    /// Value above label, icon inline before the value.
    TextVertical,
    /// A height-fitted image.
    Image,
    /// A height-fitted image with a drop shadow.
    Avatar,
    /// Value in the bold font, nudged up by one pixel.
    Username,
    /// Thumbnails packed by the grid packer.
    Grid,
}

impl ElementKind {
    /// Unknown or missing types render as plain text.
    pub fn parse(token: &str) -> Self {
        match token {
            "text-vertical" => Self::TextVertical,
            "image" => Self::Image,
            "avatar" => Self::Avatar,
            "username" => Self::Username,
            "grid" => Self::Grid,
            _ => Self::Text,
        }
    }
}

/// One declared element with every per-element override it may carry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    /// Literal value; wins over `data`.
    pub value: Option<Value>,
    /// Dotted path into the data tree.
    pub data: Option<String>,
    /// Literal grid items; wins over `data`.
    pub items: Option<Value>,
    pub label: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub label_color: Option<String>,
    pub icon_color: Option<String>,
    /// Opacity percentage for every piece of the element.
    pub alpha: u8,
    pub shadow: Option<bool>,
    pub font_size: Option<i32>,
    pub label_font_size: Option<i32>,
    pub icon_font_size: Option<i32>,
    pub label_space: Option<i32>,
    pub padding: Option<i32>,
    /// Center columns merged by this element.
    pub span: u32,
    /// Grid rows.
    pub rows: u32,
    pub align: HAlign,
    pub vertical: VAlign,
}

impl Element {
    /// Read an element from its option-tree map. Anything but a map yields `None`.
    pub fn from_value(v: &Value) -> Option<Self> {
        let Value::Object(map) = v else {
            return None;
        };
        let get = |key: &str| map.get(key).filter(|v| !v.is_null());
        let string = |key: &str| get(key).and_then(scalar_string);
        let int = |key: &str| get(key).and_then(scalar_int).map(non_negative);
        let count = |key: &str| get(key).and_then(scalar_int).filter(|v| *v > 0).map(|v| v.min(i64::from(u32::MAX)) as u32);

        Some(Self {
            kind: string("type").map(|t| ElementKind::parse(&t)).unwrap_or_default(),
            value: get("value")
                .filter(|v| !matches!(v, Value::String(s) if s.is_empty()))
                .cloned(),
            data: string("data"),
            items: get("items").cloned(),
            label: string("label"),
            icon: string("icon"),
            color: string("color"),
            label_color: string("labelColor"),
            icon_color: string("iconColor"),
            alpha: get("alpha")
                .and_then(scalar_int)
                .map(|a| a.clamp(0, 100) as u8)
                .unwrap_or(100),
            shadow: get("shadow").and_then(scalar_bool),
            font_size: int("fontSize"),
            label_font_size: int("labelFontSize"),
            icon_font_size: int("iconFontSize"),
            label_space: int("labelSpace"),
            padding: int("padding"),
            span: count("span").unwrap_or(1),
            rows: count("rows").unwrap_or(1),
            align: match string("align").as_deref() {
                Some("left") => HAlign::Left,
                Some("right") => HAlign::Right,
                _ => HAlign::Center,
            },
            vertical: match string("vertical").as_deref() {
                Some("top") => VAlign::Top,
                Some("bottom") => VAlign::Bottom,
                _ => VAlign::Center,
            },
        })
    }

    /// Read a list of elements, skipping entries that are not maps.
    pub fn list_from(values: &[Value]) -> Vec<Self> {
        values.iter().filter_map(Self::from_value).collect()
    }

    /// The element's value: the literal if present, otherwise the data path's target.
    pub fn resolve<'a>(&'a self, data: &'a Tree) -> Option<&'a Value> {
        if let Some(v) = &self.value {
            return Some(v);
        }
        data.get(self.data.as_deref()?)
    }

    /// The value rendered as display text.
    pub fn text(&self, data: &Tree) -> Option<String> {
        self.resolve(data).and_then(scalar_string)
    }

    /// Grid items: the literal list if present, otherwise the data path's target.
    pub fn grid_items<'a>(&'a self, data: &'a Tree) -> Option<&'a [Value]> {
        let source = match &self.items {
            Some(v) => v,
            None => self.resolve(data)?,
        };
        match source {
            Value::Array(items) if !items.is_empty() => Some(items),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/element.rs"]
mod tests;
