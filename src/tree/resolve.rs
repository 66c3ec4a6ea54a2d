use serde_json::Value;

/// Walk `tree` along a dotted `path` (`"areas.top.left"`).
///
/// Numeric segments index into lists. Empty segments are skipped, so an empty path addresses
/// the whole tree. Returns `None` as soon as a segment is missing, the current node cannot be
/// indexed, or a `null` is met. Containers are returned as-is.
pub fn resolve<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = tree;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if current.is_null() { None } else { Some(current) }
}

/// [`resolve`] with a caller-supplied default. Never fails.
pub fn resolve_or(tree: &Value, path: &str, default: Value) -> Value {
    resolve(tree, path).cloned().unwrap_or(default)
}

/// Immutable option or data tree addressed by dotted paths.
///
/// Scalars are read leniently: `"true"`/`"false"` are booleans, numeric strings are numbers and
/// the empty string counts as absent. A value of the wrong type yields the caller's default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tree {
    root: Value,
}

impl Tree {
    /// Wrap a JSON value.
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Borrow the underlying value.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Return `true` when the tree holds nothing addressable.
    pub fn is_empty(&self) -> bool {
        match &self.root {
            Value::Null => true,
            Value::Object(m) => m.is_empty(),
            Value::Array(v) => v.is_empty(),
            _ => false,
        }
    }

    /// Raw lookup; empty strings count as absent.
    pub fn get(&self, path: &str) -> Option<&Value> {
        match resolve(&self.root, path)? {
            Value::String(s) if s.is_empty() => None,
            v => Some(v),
        }
    }

    /// Lookup with a default, cloning the result.
    pub fn get_or(&self, path: &str, default: Value) -> Value {
        self.get(path).cloned().unwrap_or(default)
    }

    /// String scalar at `path`; numbers and booleans are stringified.
    pub fn string(&self, path: &str) -> Option<String> {
        scalar_string(self.get(path)?)
    }

    /// [`Tree::string`] with a default.
    pub fn string_or(&self, path: &str, default: &str) -> String {
        self.string(path).unwrap_or_else(|| default.to_owned())
    }

    /// Integer scalar at `path`; floats and numeric strings are truncated toward zero.
    pub fn int(&self, path: &str) -> Option<i64> {
        scalar_int(self.get(path)?)
    }

    /// [`Tree::int`] with a default.
    pub fn int_or(&self, path: &str, default: i64) -> i64 {
        self.int(path).unwrap_or(default)
    }

    /// Boolean at `path` using loose truthiness.
    pub fn bool_or(&self, path: &str, default: bool) -> bool {
        self.get(path).and_then(scalar_bool).unwrap_or(default)
    }

    /// List at `path`, or an empty slice.
    pub fn list(&self, path: &str) -> &[Value] {
        match self.get(path) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }
}

impl From<Value> for Tree {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

pub(crate) fn scalar_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn scalar_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

pub(crate) fn scalar_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.as_str() {
            "true" => Some(true),
            "false" | "0" | "" => Some(false),
            _ => Some(true),
        },
        Value::Array(items) => Some(!items.is_empty()),
        Value::Object(map) => Some(!map.is_empty()),
        Value::Null => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/resolve.rs"]
mod tests;
