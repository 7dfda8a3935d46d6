//! A grid wrapper whose children address template areas by name.
//!
//! ```rust
//! use floem_areas::prelude::*;
//!
//! let composition = Composition::new(
//!     CompositionProps::new().areas("'header header' 'aside main'").style("gap", 8),
//!     Children::dynamic(|areas| {
//!         Node::fragment([
//!             areas["header"].render(BoxProps::new().child("Title")),
//!             areas["aside"].render(BoxProps::new()),
//!             areas["main"].render(BoxProps::new().child("Content")),
//!         ])
//!     }),
//! );
//! let node = composition.render(&Env::default());
//! assert!(node.find_area("main").is_some());
//! ```

use std::{fmt, rc::Rc};

use crate::{
    areas::{AreasMap, create_area_component, generate_components, with_placeholder},
    config::LayoutOptions,
    diagnostics::{Diagnostics, TracingDiagnostics},
    node::{Element, ElementKind, Node},
    props::CompositionProps,
    style::{GridStyler, Styler},
    template::parse_templates,
};

/// Content of a composition: prebuilt, or built from the generated areas.
pub enum Children {
    Static(Node),
    Dynamic(Box<dyn Fn(&AreasMap) -> Node>),
}

impl Children {
    pub fn dynamic(f: impl Fn(&AreasMap) -> Node + 'static) -> Self {
        Children::Dynamic(Box::new(f))
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Children::Dynamic(_))
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Children::Static(_) => "static content",
            Children::Dynamic(_) => "function",
        }
    }
}

impl fmt::Debug for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Children::Static(node) => f.debug_tuple("Static").field(node).finish(),
            Children::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<Node> for Children {
    fn from(node: Node) -> Self {
        Children::Static(node)
    }
}

impl From<&str> for Children {
    fn from(text: &str) -> Self {
        Children::Static(Node::text(text))
    }
}

impl From<String> for Children {
    fn from(text: String) -> Self {
        Children::Static(Node::Text(text))
    }
}

/// Collaborators used while rendering.
#[derive(Clone)]
pub struct Env {
    pub options: LayoutOptions,
    pub styler: Rc<dyn Styler>,
    pub diagnostics: Rc<dyn Diagnostics>,
}

impl Default for Env {
    fn default() -> Self {
        Self {
            options: LayoutOptions::default(),
            styler: Rc::new(GridStyler),
            diagnostics: Rc::new(TracingDiagnostics),
        }
    }
}

impl Env {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn styler(mut self, styler: Rc<dyn Styler>) -> Self {
        self.styler = styler;
        self
    }

    pub fn diagnostics(mut self, diagnostics: Rc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

#[derive(Debug)]
pub struct Composition {
    pub props: CompositionProps,
    pub children: Children,
}

impl Composition {
    pub fn new(props: CompositionProps, children: impl Into<Children>) -> Self {
        Self {
            props,
            children: children.into(),
        }
    }

    /// Parse the templates and bind one component per area.
    pub fn areas(&self, env: &Env) -> AreasMap {
        let areas = parse_templates(&self.props.templates, &env.options);
        let unit = env.options.default_unit.as_str();
        let breakpoints = &env.options.breakpoints;
        generate_components(
            &areas,
            |name| create_area_component(name, unit),
            |component, area| with_placeholder(component, area, breakpoints),
        )
    }

    pub fn render(&self, env: &Env) -> Node {
        let areas = self.areas(env);
        let has_areas = !areas.is_empty();

        env.diagnostics.warn(
            !(has_areas && !self.children.is_dynamic()),
            &format!(
                "Failed to render 'Composition' with template areas [\"{}\"]: expected children to be a function, but got: {}. Please provide render function as children, or remove assigned template props.",
                areas.keys().collect::<Vec<_>>().join("\", \""),
                self.children.kind_name(),
            ),
        );

        let content = match &self.children {
            Children::Dynamic(children) if has_areas => children(&areas),
            Children::Static(node) => node.clone(),
            // Without areas a render function has nothing to render.
            Children::Dynamic(_) => Node::Empty,
        };

        Node::Element(Element {
            kind: ElementKind::Composition,
            area: None,
            style: env.styler.apply(&self.props, &env.options),
            children: vec![content],
        })
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{Children, Composition, Env};
    use crate::{
        diagnostics::DiagnosticsLog,
        node::{BoxProps, Node},
        props::CompositionProps,
        style::Display,
    };

    fn env_with_log() -> (Env, Rc<DiagnosticsLog>) {
        let log = Rc::new(DiagnosticsLog::new());
        (Env::default().diagnostics(log.clone()), log)
    }

    #[test]
    fn dynamic_children_receive_areas() {
        let (env, log) = env_with_log();
        let composition = Composition::new(
            CompositionProps::new().areas("a b a"),
            Children::dynamic(|areas| {
                Node::fragment(areas.iter().map(|(_, area)| area.render(BoxProps::new())))
            }),
        );
        let node = composition.render(&env);
        assert!(node.find_area("a").is_some());
        assert!(node.find_area("b").is_some());
        assert!(log.warnings().is_empty());
    }

    #[test]
    fn static_children_with_areas_warn() {
        let (env, log) = env_with_log();
        let composition = Composition::new(CompositionProps::new().areas("header main"), "hello");
        let node = composition.render(&env);

        let wrapper = node.as_element().unwrap();
        assert_eq!(wrapper.children, [Node::text("hello")]);

        let calls = log.calls();
        assert_eq!(calls.len(), 1);
        assert!(!calls[0].0);
        assert!(calls[0].1.contains(r#"["header", "main"]"#));
        assert!(calls[0].1.contains("static content"));
    }

    #[test]
    fn no_areas_renders_as_is() {
        let (env, log) = env_with_log();
        let node = Composition::new(CompositionProps::new().inline(true), "plain").render(&env);
        let wrapper = node.as_element().unwrap();
        assert_eq!(wrapper.children, [Node::text("plain")]);
        assert_eq!(wrapper.style.display, Some(Display::InlineGrid));
        assert!(log.warnings().is_empty());

        let node = Composition::new(
            CompositionProps::new(),
            Children::dynamic(|_| Node::text("never")),
        )
        .render(&env);
        assert_eq!(node.as_element().unwrap().children, [Node::Empty]);
        assert!(log.warnings().is_empty());
    }

    #[test]
    fn malformed_template_is_not_an_error() {
        let (env, log) = env_with_log();
        let node = Composition::new(CompositionProps::new().areas("'oops"), "ok").render(&env);
        assert_eq!(node.as_element().unwrap().children, [Node::text("ok")]);
        assert!(log.warnings().is_empty());
    }
}
