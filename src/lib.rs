//! # Floem areas
//! Named grid-area compositions and responsive media queries.
//!
//! The crate has two independent halves.
//!
//! ## Compositions
//!
//! A [`Composition`](composition::Composition) takes a template that names the
//! areas of a grid, the way `grid-template-areas` does, and hands its children
//! one [`AreaComponent`](areas::AreaComponent) per area:
//!
//! ```rust
//! use floem_areas::prelude::*;
//!
//! let page = Composition::new(
//!     CompositionProps::new()
//!         .areas("header\ncontent\nfooter")
//!         .areas_at(Breakpoint::Md, None, "'header header' 'menu content' 'footer footer'")
//!         .style("gap", 16),
//!     Children::dynamic(|areas| {
//!         Node::fragment([
//!             areas["header"].render(BoxProps::new().child("Title")),
//!             areas["menu"].render(BoxProps::new().child("Links")),
//!             areas["content"].render(BoxProps::new().child("Body")),
//!             areas["footer"].render(BoxProps::new()),
//!         ])
//!     }),
//! );
//!
//! let node = page.render(&Env::default());
//! // `menu` only exists from `md` up, so it renders behind a media query.
//! assert!(node.find_area("menu").is_some());
//! ```
//!
//! Templates may be bound to breakpoints (`areasMd`, `areasLgDown`, ...), and
//! areas missing from some of them are wrapped so they only render where they
//! belong. Using static children together with template areas is reported
//! through [`Diagnostics`](diagnostics::Diagnostics) rather than failing.
//!
//! ## Media queries
//!
//! A [`QueryDescriptor`](query::QueryDescriptor) describes one breakpoint rule,
//! which compiles to a media-query string. A
//! [`QueryObserver`](observer::QueryObserver) keeps track of whether it
//! matches on a [`MediaPlatform`](observer::MediaPlatform), and
//! [`use_media_query`](reactive::use_media_query) exposes that as a signal:
//!
//! ```rust
//! use std::rc::Rc;
//! use floem_areas::prelude::*;
//!
//! let viewport = Rc::new(Viewport::new(1024.0, 768.0));
//! let landscape = use_media_query(
//!     viewport.clone(),
//!     || QueryDescriptor::new().min_width(750).orientation("landscape"),
//!     false,
//! );
//! assert!(landscape.get_untracked());
//!
//! viewport.set_size(600.0, 800.0);
//! assert!(!landscape.get_untracked());
//! ```

pub mod areas;
pub mod composition;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod node;
pub mod observer;
pub mod props;
pub mod query;
pub mod reactive;
pub mod responsive;
pub mod style;
pub mod template;
pub mod unit;
pub mod viewport;

pub use floem_reactive;

pub mod prelude {
    pub use crate::areas::{AreaComponent, AreasMap};
    pub use crate::composition::{Children, Composition, Env};
    pub use crate::config::LayoutOptions;
    pub use crate::diagnostics::{Diagnostics, TracingDiagnostics};
    pub use crate::node::{BoxProps, Node};
    pub use crate::observer::{MediaPlatform, QueryObserver};
    pub use crate::props::CompositionProps;
    pub use crate::query::{CompiledQuery, QueryDescriptor, QuerySet};
    pub use crate::reactive::{MediaQuerySignal, use_media_query};
    pub use crate::responsive::{Behavior, Breakpoint, ScreenSize};
    pub use crate::viewport::Viewport;
}
