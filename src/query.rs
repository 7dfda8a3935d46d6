//! Breakpoint descriptors and their compilation into media-query strings.
//!
//! A [`QueryDescriptor`] is one conjunctive rule, e.g. "at least 750 pixels
//! wide *and* landscape". A [`QuerySet`] holds one or more descriptors that are
//! OR-ed together. Compiling a set yields a [`CompiledQuery`]:
//!
//! ```rust
//! use floem_areas::query::{QueryDescriptor, QuerySet};
//!
//! let set = QuerySet::from(QueryDescriptor::new().min_width(750).orientation("landscape"));
//! assert_eq!(set.compile().as_str(), "(min-width:750px) and (orientation:landscape)");
//! ```

use std::fmt;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::unit::{DEFAULT_UNIT, Value, dashed};

/// A set of named conditions which must all hold for the rule to match.
///
/// Conditions keep the order they were added in, compiled output depends on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDescriptor {
    conditions: IndexMap<String, Option<Value>>,
}

impl QueryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition. `name` may be camelCase (`minWidth`) or dashed (`min-width`).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.insert(name.into(), Some(value.into()));
        self
    }

    /// Add a condition whose value may be absent. Absent conditions are kept as
    /// keys but left out of the compiled query.
    pub fn with_optional<V: Into<Value>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        self.conditions.insert(name.into(), value.map(Into::into));
        self
    }

    pub fn min_width(self, value: impl Into<Value>) -> Self {
        self.with("minWidth", value)
    }

    pub fn max_width(self, value: impl Into<Value>) -> Self {
        self.with("maxWidth", value)
    }

    pub fn width(self, value: impl Into<Value>) -> Self {
        self.with("width", value)
    }

    pub fn min_height(self, value: impl Into<Value>) -> Self {
        self.with("minHeight", value)
    }

    pub fn max_height(self, value: impl Into<Value>) -> Self {
        self.with("maxHeight", value)
    }

    pub fn height(self, value: impl Into<Value>) -> Self {
        self.with("height", value)
    }

    pub fn orientation(self, value: impl Into<Value>) -> Self {
        self.with("orientation", value)
    }

    /// Condition names as they were given, including ones with absent values.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }

    /// Conditions that carry a value, in insertion order.
    pub fn conditions(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.conditions
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|value| (name.as_str(), value)))
    }

    /// True when no condition carries a value.
    pub fn is_empty(&self) -> bool {
        self.conditions().next().is_none()
    }

    /// Compile this descriptor into an AND-joined fragment.
    ///
    /// Returns `None` for an empty descriptor so it can be skipped instead of
    /// producing an empty `()`.
    pub fn compile(&self, unit: &str) -> Option<String> {
        let mut fragment = String::new();
        for (name, value) in self.conditions() {
            if !fragment.is_empty() {
                fragment.push_str(" and ");
            }
            fragment.push('(');
            fragment.push_str(&dashed(name));
            fragment.push(':');
            fragment.push_str(&value.resolve(unit));
            fragment.push(')');
        }
        (!fragment.is_empty()).then_some(fragment)
    }
}

impl<K, V> FromIterator<(K, V)> for QueryDescriptor
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(QueryDescriptor::new(), |descriptor, (name, value)| {
                descriptor.with(name, value)
            })
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for QueryDescriptor
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(conditions: [(K, V); N]) -> Self {
        conditions.into_iter().collect()
    }
}

/// The key shape of a [`QuerySet`]: condition names per descriptor.
///
/// Observers compare shapes to decide whether they need to resubscribe.
pub type QueryShape = SmallVec<[Vec<String>; 1]>;

/// One or more descriptors, matched when any of them matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySet {
    descriptors: SmallVec<[QueryDescriptor; 1]>,
}

impl QuerySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, descriptor: QueryDescriptor) {
        self.descriptors.push(descriptor);
    }

    pub fn descriptors(&self) -> &[QueryDescriptor] {
        &self.descriptors
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.iter().all(QueryDescriptor::is_empty)
    }

    pub fn shape(&self) -> QueryShape {
        self.descriptors
            .iter()
            .map(|descriptor| descriptor.keys().map(str::to_string).collect())
            .collect()
    }

    /// Compile with the default `px` unit.
    pub fn compile(&self) -> CompiledQuery {
        self.compile_with_unit(DEFAULT_UNIT)
    }

    pub fn compile_with_unit(&self, unit: &str) -> CompiledQuery {
        let fragments: SmallVec<[String; 2]> = self
            .descriptors
            .iter()
            .filter_map(|descriptor| descriptor.compile(unit))
            .collect();
        CompiledQuery(fragments.join(","))
    }
}

impl From<QueryDescriptor> for QuerySet {
    fn from(descriptor: QueryDescriptor) -> Self {
        let mut set = QuerySet::new();
        set.push(descriptor);
        set
    }
}

impl From<Vec<QueryDescriptor>> for QuerySet {
    fn from(descriptors: Vec<QueryDescriptor>) -> Self {
        descriptors.into_iter().collect()
    }
}

impl<const N: usize> From<[QueryDescriptor; N]> for QuerySet {
    fn from(descriptors: [QueryDescriptor; N]) -> Self {
        descriptors.into_iter().collect()
    }
}

impl FromIterator<QueryDescriptor> for QuerySet {
    fn from_iter<I: IntoIterator<Item = QueryDescriptor>>(iter: I) -> Self {
        Self {
            descriptors: iter.into_iter().collect(),
        }
    }
}

/// A media-query string ready to hand to a [`MediaPlatform`](crate::observer::MediaPlatform).
///
/// An empty query means "no active query", never "matches everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CompiledQuery(String);

impl CompiledQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CompiledQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for CompiledQuery {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryDescriptor, QuerySet};

    #[test]
    fn single_descriptor_is_and_joined() {
        let set = QuerySet::from(QueryDescriptor::new().min_width(750).orientation("landscape"));
        assert_eq!(set.compile(), "(min-width:750px) and (orientation:landscape)");
    }

    #[test]
    fn list_is_or_joined() {
        let set = QuerySet::from([
            QueryDescriptor::new().min_width(400),
            QueryDescriptor::new().min_width(800),
        ]);
        assert_eq!(set.compile(), "(min-width:400px),(min-width:800px)");
    }

    #[test]
    fn condition_order_is_kept() {
        let set = QuerySet::from(QueryDescriptor::from([
            ("orientation", "portrait"),
            ("maxWidth", "600"),
            ("minWidth", "300"),
        ]));
        assert_eq!(
            set.compile(),
            "(orientation:portrait) and (max-width:600px) and (min-width:300px)"
        );
    }

    #[test]
    fn empty_inputs() {
        assert!(QuerySet::new().compile().is_empty());
        assert!(QuerySet::from(Vec::new()).compile().is_empty());

        let set = QuerySet::from([
            QueryDescriptor::new(),
            QueryDescriptor::new().max_width(575),
            QueryDescriptor::new().with_optional::<i32>("minWidth", None),
        ]);
        assert_eq!(set.compile(), "(max-width:575px)");
    }

    #[test]
    fn absent_values_are_dropped() {
        let descriptor = QueryDescriptor::new()
            .with_optional("minWidth", Some(576))
            .with_optional::<i32>("maxWidth", None);
        assert_eq!(descriptor.compile("px").as_deref(), Some("(min-width:576px)"));
        assert_eq!(descriptor.keys().collect::<Vec<_>>(), ["minWidth", "maxWidth"]);
    }

    #[test]
    fn custom_unit_and_expressions() {
        let set = QuerySet::from(
            QueryDescriptor::new()
                .min_width(48)
                .max_width("calc(100em - 1px)")
                .with("minResolution", "2dppx"),
        );
        assert_eq!(
            set.compile_with_unit("em"),
            "(min-width:48em) and (max-width:calc(100em - 1px)) and (min-resolution:2dppx)"
        );
    }

    #[test]
    fn shape_tracks_keys_not_values() {
        let a = QuerySet::from(QueryDescriptor::new().min_width(400));
        let b = QuerySet::from(QueryDescriptor::new().min_width(800));
        let c = QuerySet::from(QueryDescriptor::new().max_width(400));
        assert_eq!(a.shape(), b.shape());
        assert_ne!(a.shape(), c.shape());
    }
}
