//! Components bound to named grid areas.

use std::{fmt, ops::Index, rc::Rc};

use indexmap::IndexMap;

use crate::{
    node::{BoxProps, Element, ElementKind, Node},
    responsive::GridBreakpoints,
    style::Style,
    template::AreaDescriptor,
};

/// A renderable bound to one area name.
#[derive(Clone)]
pub struct AreaComponent {
    name: Rc<str>,
    render: Rc<dyn Fn(BoxProps) -> Node>,
}

impl AreaComponent {
    pub fn new(name: &str, render: impl Fn(BoxProps) -> Node + 'static) -> Self {
        Self {
            name: Rc::from(name),
            render: Rc::new(render),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self, props: BoxProps) -> Node {
        (self.render)(props)
    }

    /// Keep the area name, post-process the rendered output.
    pub fn map(self, f: impl Fn(Node) -> Node + 'static) -> Self {
        let inner = self.render;
        Self {
            name: self.name,
            render: Rc::new(move |props| f(inner(props))),
        }
    }

    /// Whether both handles share the same render function.
    pub fn ptr_eq(&self, other: &AreaComponent) -> bool {
        Rc::ptr_eq(&self.render, &other.render)
    }
}

impl fmt::Debug for AreaComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AreaComponent")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Area components keyed by area name, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct AreasMap(IndexMap<String, AreaComponent>);

impl AreasMap {
    pub fn get(&self, name: &str) -> Option<&AreaComponent> {
        self.0.get(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AreaComponent)> {
        self.0.iter().map(|(name, component)| (name.as_str(), component))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<&str> for AreasMap {
    type Output = AreaComponent;

    fn index(&self, name: &str) -> &AreaComponent {
        &self.0[name]
    }
}

/// Build one component per area: `wrap(factory(name), area)`.
///
/// The map is rebuilt from scratch on every call.
pub fn generate_components<F, W>(areas: &[AreaDescriptor], factory: F, wrap: W) -> AreasMap
where
    F: Fn(&str) -> AreaComponent,
    W: Fn(AreaComponent, &AreaDescriptor) -> AreaComponent,
{
    AreasMap(
        areas
            .iter()
            .map(|area| (area.name.clone(), wrap(factory(&area.name), area)))
            .collect(),
    )
}

/// The box primitive: an element placed in grid area `area`.
pub fn area_box(area: &str, props: BoxProps, unit: &str) -> Node {
    let style = Style::new()
        .declare("grid-area", area)
        .apply_props(&props.style, unit);
    Node::Element(Element {
        kind: ElementKind::Area,
        area: Some(area.to_string()),
        style,
        children: props.children,
    })
}

/// Default factory: a component rendering [`area_box`] for `name`.
pub fn create_area_component(name: &str, unit: &str) -> AreaComponent {
    let area = name.to_string();
    let unit = unit.to_string();
    AreaComponent::new(name, move |props| area_box(&area, props, &unit))
}

/// Restrict a component to the breakpoints its area is present at.
///
/// Areas present everywhere are returned untouched. Others render inside a
/// [`Node::Conditional`] for their breakpoints, or as nothing if the area is
/// present at none.
pub fn with_placeholder(
    component: AreaComponent,
    area: &AreaDescriptor,
    breakpoints: &GridBreakpoints,
) -> AreaComponent {
    if !area.is_responsive() {
        return component;
    }
    if area.presence.is_empty() {
        return component.map(|_| Node::Empty);
    }
    let query = breakpoints.query_for(area.presence).compile();
    component.map(move |node| Node::Conditional {
        query: query.clone(),
        child: Box::new(node),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::{AreaComponent, create_area_component, generate_components, with_placeholder};
    use crate::{
        node::{BoxProps, Node},
        responsive::{GridBreakpoints, ScreenSize},
        template::AreaDescriptor,
    };

    fn area(name: &str, presence: ScreenSize) -> AreaDescriptor {
        AreaDescriptor {
            name: name.to_string(),
            occurs_in_template: true,
            presence,
        }
    }

    #[test]
    fn generates_fresh_maps() {
        let areas = [area("a", ScreenSize::ALL), area("b", ScreenSize::ALL)];
        let calls = Rc::new(Cell::new(0));
        let factory = |name: &str| {
            calls.set(calls.get() + 1);
            let bound = name.to_string();
            AreaComponent::new(name, move |_| Node::text(bound.clone()))
        };

        let first = generate_components(&areas, factory, |c, _| c);
        let second = generate_components(&areas, factory, |c, _| c);

        assert_eq!(first.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(
            first.keys().collect::<Vec<_>>(),
            second.keys().collect::<Vec<_>>()
        );
        assert_eq!(calls.get(), 4);
        for (name, component) in first.iter() {
            assert_eq!(component.name(), name);
            assert_eq!(component.render(BoxProps::new()), Node::text(name));
            assert!(!component.ptr_eq(&second[name]));
        }
    }

    #[test]
    fn empty_areas_empty_map() {
        let map = generate_components(&[], |name| create_area_component(name, "px"), |c, _| c);
        assert!(map.is_empty());
    }

    #[test]
    fn area_box_carries_name_and_props() {
        let component = create_area_component("header", "px");
        let node = component.render(BoxProps::new().style("padding", 8).child("Title"));
        let element = node.as_element().unwrap();
        assert_eq!(element.area.as_deref(), Some("header"));
        assert_eq!(element.style.get("grid-area"), Some("header"));
        assert_eq!(element.style.get("padding"), Some("8px"));
        assert_eq!(element.children, [Node::text("Title")]);
    }

    #[test]
    fn placeholder_wraps_responsive_areas() {
        let breakpoints = GridBreakpoints::default();
        let everywhere = with_placeholder(
            create_area_component("main", "px"),
            &area("main", ScreenSize::ALL),
            &breakpoints,
        );
        assert!(everywhere.render(BoxProps::new()).as_element().is_some());

        let aside = with_placeholder(
            create_area_component("aside", "px"),
            &area("aside", ScreenSize::MD | ScreenSize::LG),
            &breakpoints,
        );
        assert_eq!(aside.name(), "aside");
        match aside.render(BoxProps::new()) {
            Node::Conditional { query, child } => {
                assert_eq!(query, "(min-width:768px) and (max-width:1199.98px)");
                assert!(child.find_area("aside").is_some());
            }
            other => panic!("expected a conditional node, got {other:?}"),
        }

        let hidden = with_placeholder(
            create_area_component("gone", "px"),
            &area("gone", ScreenSize::NONE),
            &breakpoints,
        );
        assert!(hidden.render(BoxProps::new()).is_empty());
    }
}
