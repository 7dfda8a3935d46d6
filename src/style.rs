use indexmap::IndexMap;

use crate::{
    config::LayoutOptions,
    props::{AreaSource, CompositionProps, StyleProps},
    query::{CompiledQuery, QuerySet},
    responsive::{Behavior, Breakpoint, split_breakpoint_suffix},
    unit::dashed,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Grid,
    InlineGrid,
}

impl Display {
    pub fn as_css(self) -> &'static str {
        match self {
            Display::Grid => "grid",
            Display::InlineGrid => "inline-grid",
        }
    }
}

/// Declarations that only apply while `query` matches.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsiveRule {
    pub query: CompiledQuery,
    pub declarations: IndexMap<String, String>,
}

/// Resolved visual rules of one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub display: Option<Display>,
    pub declarations: IndexMap<String, String>,
    pub responsive: Vec<ResponsiveRule>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    pub fn declare(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.insert(property.into(), value.into());
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    /// Resolve passthrough props into declarations, appending `unit` to bare numbers.
    pub fn apply_props(mut self, props: &StyleProps, unit: &str) -> Self {
        for (name, value) in props.iter() {
            self.declarations
                .insert(property_name(name), value.resolve(unit));
        }
        self
    }

    /// Declarations applying while `query` matches. An empty query matches
    /// everywhere, so those go to the base declarations.
    pub fn declarations_for(&mut self, query: CompiledQuery) -> &mut IndexMap<String, String> {
        if query.is_empty() {
            return &mut self.declarations;
        }
        let index = match self.responsive.iter().position(|rule| rule.query == query) {
            Some(index) => index,
            None => {
                self.responsive.push(ResponsiveRule {
                    query,
                    declarations: IndexMap::new(),
                });
                self.responsive.len() - 1
            }
        };
        &mut self.responsive[index].declarations
    }
}

/// Turns composition props into a [`Style`].
pub trait Styler {
    fn apply(&self, props: &CompositionProps, options: &LayoutOptions) -> Style;
}

/// Grid styling: display mode, passthrough props and `grid-template-areas`.
///
/// Breakpoint-bound templates and breakpoint-suffixed props (`gapMd`) share
/// one responsive rule per breakpoint query.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridStyler;

impl Styler for GridStyler {
    fn apply(&self, props: &CompositionProps, options: &LayoutOptions) -> Style {
        let display = if props.inline {
            Display::InlineGrid
        } else {
            Display::Grid
        };
        let mut style = Style::new().display(display);

        for (name, value) in props.style.iter() {
            let value = value.resolve(&options.default_unit);
            let (name, query) = match split_breakpoint_suffix(name) {
                Some((base, bp, behavior)) => (base, breakpoint_query(options, bp, behavior)),
                None => (name, CompiledQuery::default()),
            };
            style.declarations_for(query).insert(property_name(name), value);
        }

        for variant in props.templates.variants() {
            let AreaSource::Template(template) = &variant.source else {
                continue;
            };
            let query = match variant.breakpoint {
                Some(bp) => breakpoint_query(options, bp, variant.behavior),
                None => CompiledQuery::default(),
            };
            style
                .declarations_for(query)
                .insert("grid-template-areas".to_string(), template_areas_value(template));
        }
        style
    }
}

/// Breakpoints are in pixels whatever the default unit is.
fn breakpoint_query(
    options: &LayoutOptions,
    bp: Breakpoint,
    behavior: Option<Behavior>,
) -> CompiledQuery {
    let behavior = behavior.unwrap_or(options.default_behavior);
    QuerySet::from(options.breakpoints.query(bp, behavior)).compile()
}

/// Grid props are written without their `grid` prefix (`templateColumns`, `autoFlow`).
fn property_name(name: &str) -> String {
    const GRID_PROPS: [&str; 8] = [
        "templateColumns",
        "templateRows",
        "autoColumns",
        "autoRows",
        "autoFlow",
        "column",
        "row",
        "area",
    ];
    match name {
        "templateCols" => "grid-template-columns".to_string(),
        name if GRID_PROPS.contains(&name) => format!("grid-{}", dashed(name)),
        name => dashed(name).into_owned(),
    }
}

/// Format a template as a `grid-template-areas` value: one quoted string per row.
///
/// Rows that are already quoted are kept, otherwise every non-blank line is a row.
fn template_areas_value(template: &str) -> String {
    let quoted = template.contains(['\'', '"', '`']);
    if quoted {
        return template
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .replace(['\'', '`'], "\"");
    }
    template
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("\"{}\"", line.split_whitespace().collect::<Vec<_>>().join(" ")))
        .collect::<Vec<_>>()
        .join(" ")
}
