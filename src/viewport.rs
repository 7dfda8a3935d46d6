//! A [`MediaPlatform`] backed by a window size.
//!
//! Hosts feed window resizes into [`Viewport::set_size`]; subscribed
//! listeners are told about every query whose match state flips.

use std::cell::{Cell, RefCell};

use indexmap::IndexMap;

use crate::{
    observer::{Listener, MediaPlatform, SubscriptionId},
    query::CompiledQuery,
    responsive::{Breakpoint, GridBreakpoints},
};

struct Subscription {
    query: CompiledQuery,
    listener: Listener,
    matched: bool,
}

pub struct Viewport {
    size: Cell<(f64, f64)>,
    next_id: Cell<u64>,
    subscriptions: RefCell<IndexMap<u64, Subscription>>,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Cell::new((width, height)),
            next_id: Cell::new(0),
            subscriptions: RefCell::new(IndexMap::new()),
        }
    }

    pub fn size(&self) -> (f64, f64) {
        self.size.get()
    }

    pub fn breakpoint(&self, breakpoints: &GridBreakpoints) -> Breakpoint {
        breakpoints.breakpoint_for_width(self.size.get().0)
    }

    /// Number of attached listeners.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Resize and notify listeners whose query changed, in subscription order.
    pub fn set_size(&self, width: f64, height: f64) {
        self.size.set((width, height));

        let changed: Vec<(Listener, bool)> = self
            .subscriptions
            .borrow_mut()
            .values_mut()
            .filter_map(|subscription| {
                let matches = evaluate(subscription.query.as_str(), width, height);
                if matches == subscription.matched {
                    return None;
                }
                subscription.matched = matches;
                Some((subscription.listener.clone(), matches))
            })
            .collect();

        // Listeners may subscribe or unsubscribe, so call them without the borrow.
        for (listener, matches) in changed {
            listener(matches);
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl MediaPlatform for Viewport {
    fn matches(&self, query: &CompiledQuery) -> bool {
        let (width, height) = self.size.get();
        evaluate(query.as_str(), width, height)
    }

    fn subscribe(&self, query: &CompiledQuery, listener: Listener) -> SubscriptionId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let matched = self.matches(query);
        self.subscriptions.borrow_mut().insert(
            id,
            Subscription {
                query: query.clone(),
                listener,
                matched,
            },
        );
        SubscriptionId(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.borrow_mut().shift_remove(&id.0);
    }
}

/// Evaluate a compiled query against a viewport size.
///
/// Supports `width`, `height` (plain, `min-` and `max-`) in `px` and
/// `orientation`. Unsupported or malformed conditions never match.
pub fn evaluate(query: &str, width: f64, height: f64) -> bool {
    !query.is_empty()
        && query.split(',').any(|rule| {
            rule.split(" and ")
                .all(|condition| evaluate_condition(condition.trim(), width, height))
        })
}

fn evaluate_condition(condition: &str, width: f64, height: f64) -> bool {
    let Some((name, value)) = condition
        .strip_prefix('(')
        .and_then(|c| c.strip_suffix(')'))
        .and_then(|c| c.split_once(':'))
    else {
        return false;
    };
    let (name, value) = (name.trim(), value.trim());

    if name == "orientation" {
        let portrait = height >= width;
        return match value {
            "portrait" => portrait,
            "landscape" => !portrait,
            _ => false,
        };
    }

    let Some(px) = value
        .strip_suffix("px")
        .and_then(|n| n.parse::<f64>().ok())
    else {
        return false;
    };
    match name {
        "width" => width == px,
        "min-width" => width >= px,
        "max-width" => width <= px,
        "height" => height == px,
        "min-height" => height >= px,
        "max-height" => height <= px,
        _ => false,
    }
}
