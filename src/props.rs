//! Props accepted by a [`Composition`](crate::composition::Composition).
//!
//! Props are split into the options the composition itself understands
//! (template areas and `inline`) and a passthrough bag that is handed to the
//! [`Styler`](crate::style::Styler) untouched.

use indexmap::IndexMap;

use crate::{
    responsive::{Behavior, Breakpoint, ScreenSize, split_breakpoint_suffix},
    unit::Value,
};

/// A loosely typed prop value, as produced by [`CompositionProps::set`].
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Number(f64),
    Text(String),
    Bool(bool),
    List(Vec<String>),
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Number(value as f64)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<Vec<String>> for PropValue {
    fn from(value: Vec<String>) -> Self {
        PropValue::List(value)
    }
}

impl<const N: usize> From<[&str; N]> for PropValue {
    fn from(value: [&str; N]) -> Self {
        PropValue::List(value.iter().map(|name| name.to_string()).collect())
    }
}

/// Where the area names of one template variant come from.
#[derive(Debug, Clone, PartialEq)]
pub enum AreaSource {
    /// Names declared directly, without grid placement.
    Names(Vec<String>),
    /// A grid-template-areas style string, e.g. `'header header' 'aside main'`.
    Template(String),
}

impl AreaSource {
    pub fn is_template(&self) -> bool {
        matches!(self, AreaSource::Template(_))
    }
}

impl From<&str> for AreaSource {
    fn from(template: &str) -> Self {
        AreaSource::Template(template.to_string())
    }
}

impl From<String> for AreaSource {
    fn from(template: String) -> Self {
        AreaSource::Template(template)
    }
}

impl From<Vec<String>> for AreaSource {
    fn from(names: Vec<String>) -> Self {
        AreaSource::Names(names)
    }
}

impl<const N: usize> From<[&str; N]> for AreaSource {
    fn from(names: [&str; N]) -> Self {
        AreaSource::Names(names.iter().map(|name| name.to_string()).collect())
    }
}

/// One `areas`/`template` prop, optionally bound to a breakpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateVariant {
    pub breakpoint: Option<Breakpoint>,
    /// `None` falls back to [`LayoutOptions::default_behavior`](crate::config::LayoutOptions).
    pub behavior: Option<Behavior>,
    pub source: AreaSource,
}

impl TemplateVariant {
    /// Breakpoints this variant applies to. Variants without a breakpoint
    /// apply everywhere.
    pub fn coverage(&self, default_behavior: Behavior) -> ScreenSize {
        match self.breakpoint {
            Some(bp) => ScreenSize::for_behavior(bp, self.behavior.unwrap_or(default_behavior)),
            None => ScreenSize::ALL,
        }
    }
}

/// All template variants of a composition, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateProps {
    variants: Vec<TemplateVariant>,
}

impl TemplateProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, variant: TemplateVariant) {
        self.variants.push(variant);
    }

    pub fn variants(&self) -> &[TemplateVariant] {
        &self.variants
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Passthrough style props, keyed by name in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleProps(IndexMap<String, Value>);

impl StyleProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Props of a composition wrapper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositionProps {
    pub templates: TemplateProps,
    /// Render as `inline-grid` instead of `grid`.
    pub inline: bool,
    pub style: StyleProps,
}

impl CompositionProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Areas that apply at every breakpoint.
    pub fn areas(mut self, source: impl Into<AreaSource>) -> Self {
        self.templates.push(TemplateVariant {
            breakpoint: None,
            behavior: None,
            source: source.into(),
        });
        self
    }

    /// Areas for `breakpoint`, extended by `behavior` or the configured default.
    pub fn areas_at(
        mut self,
        breakpoint: Breakpoint,
        behavior: Option<Behavior>,
        source: impl Into<AreaSource>,
    ) -> Self {
        self.templates.push(TemplateVariant {
            breakpoint: Some(breakpoint),
            behavior,
            source: source.into(),
        });
        self
    }

    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    pub fn style(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.style.insert(name, value);
        self
    }

    /// Set a prop by name.
    ///
    /// `areas`/`template` keys, optionally suffixed with a breakpoint and a
    /// behavior (`areasMd`, `templateLgDown`), become template variants.
    /// `inline` sets the display mode. Everything else is passed through to
    /// the styler, so grid props such as `templateColumns` are unaffected.
    /// Passthrough props may carry a breakpoint suffix too (`gapMd`); the
    /// styler scopes those to that breakpoint.
    pub fn set(mut self, key: &str, value: impl Into<PropValue>) -> Self {
        let value = value.into();
        if let Some((breakpoint, behavior)) = parse_template_key(key) {
            let source = match value {
                PropValue::Text(template) => AreaSource::Template(template),
                PropValue::List(names) => AreaSource::Names(names),
                other => {
                    tracing::debug!(key, value = ?other, "ignoring non-template value of template prop");
                    return self;
                }
            };
            self.templates.push(TemplateVariant {
                breakpoint,
                behavior,
                source,
            });
            return self;
        }

        match (key, value) {
            ("inline", PropValue::Bool(inline)) => self.inline = inline,
            (_, PropValue::Number(n)) => self.style.insert(key, n),
            (_, PropValue::Text(text)) => self.style.insert(key, text),
            (_, PropValue::Bool(flag)) => self.style.insert(key, flag.to_string()),
            (_, PropValue::List(items)) => self.style.insert(key, items.join(" ")),
        }
        self
    }
}

impl<K: AsRef<str>, V: Into<PropValue>> FromIterator<(K, V)> for CompositionProps {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CompositionProps::new(), |props, (key, value)| {
                props.set(key.as_ref(), value)
            })
    }
}

/// Recognize `areas`/`template` keys with optional `<Breakpoint><Behavior>` suffix.
fn parse_template_key(key: &str) -> Option<(Option<Breakpoint>, Option<Behavior>)> {
    let is_template = |name: &str| matches!(name, "areas" | "template");
    if is_template(key) {
        return Some((None, None));
    }
    let (base, breakpoint, behavior) = split_breakpoint_suffix(key)?;
    is_template(base).then_some((Some(breakpoint), behavior))
}

#[cfg(test)]
mod tests {
    use super::{AreaSource, CompositionProps, PropValue, parse_template_key};
    use crate::{
        responsive::{Behavior, Breakpoint},
        unit::Value,
    };

    #[test]
    fn template_keys() {
        assert_eq!(parse_template_key("areas"), Some((None, None)));
        assert_eq!(parse_template_key("template"), Some((None, None)));
        assert_eq!(parse_template_key("areasMd"), Some((Some(Breakpoint::Md), None)));
        assert_eq!(
            parse_template_key("templateLgDown"),
            Some((Some(Breakpoint::Lg), Some(Behavior::Down)))
        );
        assert_eq!(
            parse_template_key("areasXxlOnly"),
            Some((Some(Breakpoint::Xxl), Some(Behavior::Only)))
        );
        assert_eq!(parse_template_key("templateColumns"), None);
        assert_eq!(parse_template_key("areasDown"), None);
        assert_eq!(parse_template_key("areasmd"), None);
        assert_eq!(parse_template_key("gap"), None);
    }

    #[test]
    fn set_splits_recognized_and_passthrough() {
        let props: CompositionProps = [
            ("areas", PropValue::from("header main")),
            ("areasMd", PropValue::from(["header", "aside", "main"])),
            ("inline", PropValue::from(true)),
            ("gap", PropValue::from(10)),
            ("templateColumns", PropValue::from("1fr 2fr")),
        ]
        .into_iter()
        .collect();

        assert!(props.inline);
        let variants = props.templates.variants();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].source, AreaSource::Template("header main".into()));
        assert_eq!(variants[1].breakpoint, Some(Breakpoint::Md));
        assert!(!variants[1].source.is_template());
        assert_eq!(props.style.get("gap"), Some(&Value::Number(10.0)));
        assert_eq!(props.style.get("templateColumns"), Some(&Value::Text("1fr 2fr".into())));
    }

    #[test]
    fn non_text_template_value_is_ignored() {
        let props = CompositionProps::new().set("areas", 42);
        assert!(props.templates.is_empty());
        assert!(props.style.is_empty());
    }
}
