//! Parsing of grid template-area descriptions into area descriptors.
//!
//! A template lists area names row by row, the way `grid-template-areas` does:
//!
//! ```text
//! 'header header'
//! 'aside  main'
//! '.      footer'
//! ```
//!
//! Each distinct name becomes one [`AreaDescriptor`], in the order it first
//! appears. `.` (or any run of dots) marks an empty cell.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::{
    config::LayoutOptions,
    error::TemplateError,
    props::{AreaSource, TemplateProps},
    responsive::{Breakpoint, ScreenSize},
};

/// A named area discovered while parsing a composition's templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaDescriptor {
    pub name: String,
    /// Whether the name came from a template string rather than a plain list.
    pub occurs_in_template: bool,
    /// Breakpoints at which the area is part of the effective template.
    pub presence: ScreenSize,
}

impl AreaDescriptor {
    /// True when the area is rendered at some breakpoints but not others.
    pub fn is_responsive(&self) -> bool {
        !self.presence.is_all()
    }
}

/// Split a template into area-name tokens, dropping quotes and filler cells.
pub fn tokenize(template: &str) -> Result<Vec<&str>, TemplateError> {
    check_quotes(template)?;
    template
        .split(|c: char| c.is_whitespace() || is_quote(c))
        .filter(|token| !token.is_empty() && !is_filler(token))
        .map(|token| {
            if is_area_name(token) {
                Ok(token)
            } else {
                Err(TemplateError::InvalidAreaName {
                    token: token.to_string(),
                })
            }
        })
        .collect()
}

/// The distinct area names of one template, in first-occurrence order.
pub fn parse_template(template: &str) -> Result<Vec<String>, TemplateError> {
    let mut names: Vec<String> = Vec::new();
    for token in tokenize(template)? {
        if !names.iter().any(|name| name == token) {
            names.push(token.to_string());
        }
    }
    Ok(names)
}

struct ParsedVariant {
    coverage: ScreenSize,
    names: Vec<String>,
    from_template: bool,
}

/// Collect the areas declared by every template variant.
///
/// Names are deduplicated across rows and variants and keep the order in
/// which they were first seen. A malformed template contributes no areas.
///
/// Where variants overlap, the one covering the fewest breakpoints decides
/// which areas are present, with later declarations winning ties. So `areas`
/// is overridden by `areasMd`, which is in turn overridden by `areasMdOnly`.
pub fn parse_templates(props: &TemplateProps, options: &LayoutOptions) -> Vec<AreaDescriptor> {
    let parsed: Vec<ParsedVariant> = props
        .variants()
        .iter()
        .map(|variant| {
            let names = match &variant.source {
                AreaSource::Names(names) => names
                    .iter()
                    .filter(|name| is_area_name(name))
                    .cloned()
                    .collect(),
                AreaSource::Template(template) => match parse_template(template) {
                    Ok(names) => names,
                    Err(err) => {
                        tracing::debug!(
                            %err,
                            breakpoint = ?variant.breakpoint,
                            "template has no usable areas"
                        );
                        Vec::new()
                    }
                },
            };
            ParsedVariant {
                coverage: variant.coverage(options.default_behavior),
                names,
                from_template: variant.source.is_template(),
            }
        })
        .collect();

    let mut areas: IndexMap<&str, AreaDescriptor, FxBuildHasher> = IndexMap::default();
    for variant in &parsed {
        for name in &variant.names {
            let area = areas.entry(name.as_str()).or_insert_with(|| AreaDescriptor {
                name: name.clone(),
                occurs_in_template: false,
                presence: ScreenSize::NONE,
            });
            area.occurs_in_template |= variant.from_template;
        }
    }

    for bp in Breakpoint::ALL {
        let effective = parsed
            .iter()
            .rev()
            .filter(|variant| variant.coverage.contains(bp))
            .min_by_key(|variant| variant.coverage.len());
        let Some(effective) = effective else {
            continue;
        };
        for name in &effective.names {
            if let Some(area) = areas.get_mut(name.as_str()) {
                area.presence.insert(bp);
            }
        }
    }

    areas.into_values().collect()
}

fn check_quotes(template: &str) -> Result<(), TemplateError> {
    let mut open: Option<(char, usize)> = None;
    for (offset, c) in template.char_indices() {
        if !is_quote(c) {
            continue;
        }
        match open {
            Some((quote, _)) if quote == c => open = None,
            Some(_) => {}
            None => open = Some((c, offset)),
        }
    }
    match open {
        Some((quote, offset)) => Err(TemplateError::UnterminatedRow { quote, offset }),
        None => Ok(()),
    }
}

fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '"' | '`')
}

fn is_filler(token: &str) -> bool {
    token.chars().all(|c| c == '.')
}

/// A CSS identifier: letters, digits, `-` and `_`, not starting with a digit
/// (or a `-` followed by a digit).
fn is_area_name(token: &str) -> bool {
    let mut chars = token.chars();
    let valid_char = |c: char| c.is_alphanumeric() || c == '-' || c == '_';
    match chars.next() {
        Some('-') => chars
            .clone()
            .next()
            .is_some_and(|c| !c.is_ascii_digit() && valid_char(c))
            && chars.all(valid_char),
        Some(c) if c.is_ascii_digit() => false,
        Some(c) => valid_char(c) && chars.all(valid_char),
        None => false,
    }
}
