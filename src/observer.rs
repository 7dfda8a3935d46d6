//! Tracking whether a media query currently matches.
//!
//! A [`QueryObserver`] owns one boolean match state. It compiles a
//! [`QuerySet`], reads the platform's current answer for it and subscribes to
//! change notifications. Replacing the set (or stopping the observer) detaches
//! the previous subscription first, and a notification that still arrives for
//! a detached subscription is ignored.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    query::{CompiledQuery, QuerySet, QueryShape},
    unit::DEFAULT_UNIT,
};

/// Callback receiving the new match state of a query.
pub type Listener = Rc<dyn Fn(bool)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// The platform side of media queries.
pub trait MediaPlatform {
    /// Whether `query` matches right now.
    fn matches(&self, query: &CompiledQuery) -> bool;

    /// Call `listener` whenever the match state of `query` changes.
    fn subscribe(&self, query: &CompiledQuery, listener: Listener) -> SubscriptionId;

    /// Detach a listener. Unknown or already removed ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

impl<P: MediaPlatform + ?Sized> MediaPlatform for Rc<P> {
    fn matches(&self, query: &CompiledQuery) -> bool {
        (**self).matches(query)
    }

    fn subscribe(&self, query: &CompiledQuery, listener: Listener) -> SubscriptionId {
        (**self).subscribe(query, listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        (**self).unsubscribe(id)
    }
}

struct Active {
    query: CompiledQuery,
    shape: QueryShape,
    subscription: Option<SubscriptionId>,
    /// Cleared on teardown so late notifications are dropped.
    live: Rc<Cell<bool>>,
}

struct MatchState {
    matches: Cell<bool>,
    on_change: RefCell<Option<Rc<dyn Fn(bool)>>>,
}

impl MatchState {
    fn apply(&self, matches: bool) {
        if self.matches.replace(matches) == matches {
            return;
        }
        // Release the borrow first, the callback may install a new one.
        let on_change = self.on_change.borrow().clone();
        if let Some(on_change) = on_change {
            on_change(matches);
        }
    }
}

pub struct QueryObserver<P: MediaPlatform> {
    platform: P,
    unit: String,
    state: Rc<MatchState>,
    active: Option<Active>,
}

impl<P: MediaPlatform> QueryObserver<P> {
    /// An observer with no query yet; [`matches`](Self::matches) reports `initial`.
    pub fn new(platform: P, initial: bool) -> Self {
        Self {
            platform,
            unit: DEFAULT_UNIT.to_string(),
            state: Rc::new(MatchState {
                matches: Cell::new(initial),
                on_change: RefCell::new(None),
            }),
            active: None,
        }
    }

    /// Compile `set` and start observing it immediately.
    pub fn observe(platform: P, set: impl Into<QuerySet>, initial: bool) -> Self {
        let mut observer = Self::new(platform, initial);
        observer.start(set);
        observer
    }

    /// Unit for bare numbers in descriptors. Takes effect on the next query change.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Run `f` with the new state every time the match state changes.
    ///
    /// Replaces any previous callback. An active subscription keeps
    /// delivering to the same state, so this may be called at any time.
    pub fn on_change(self, f: impl Fn(bool) + 'static) -> Self {
        self.state.on_change.replace(Some(Rc::new(f)));
        self
    }

    pub fn matches(&self) -> bool {
        self.state.matches.get()
    }

    /// The active compiled query, if any.
    pub fn query(&self) -> Option<&CompiledQuery> {
        self.active
            .as_ref()
            .map(|active| &active.query)
            .filter(|query| !query.is_empty())
    }

    pub fn is_subscribed(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.subscription.is_some())
    }

    /// Same as [`update`](Self::update); reads better for the first query.
    pub fn start(&mut self, set: impl Into<QuerySet>) -> bool {
        self.update(set)
    }

    /// Switch to a new descriptor set.
    ///
    /// Nothing happens when both the key shape and the compiled query are
    /// unchanged. Otherwise the old subscription is detached and, unless the
    /// new query is empty, the current match state is read synchronously and
    /// a new subscription attached. An empty query keeps the current state.
    ///
    /// Returns whether the subscription was replaced.
    pub fn update(&mut self, set: impl Into<QuerySet>) -> bool {
        let set = set.into();
        let shape = set.shape();
        let query = set.compile_with_unit(&self.unit);
        if self
            .active
            .as_ref()
            .is_some_and(|active| active.shape == shape && active.query == query)
        {
            return false;
        }

        self.stop();

        let live = Rc::new(Cell::new(true));
        let subscription = if query.is_empty() {
            tracing::debug!("empty media query, keeping match state");
            None
        } else {
            self.state.apply(self.platform.matches(&query));
            let listener = listener(Rc::downgrade(&self.state), live.clone());
            let id = self.platform.subscribe(&query, listener);
            tracing::debug!(%query, ?id, "subscribed to media query");
            Some(id)
        };

        self.active = Some(Active {
            query,
            shape,
            subscription,
            live,
        });
        true
    }

    /// Detach the current subscription, if any. Safe to call repeatedly.
    pub fn stop(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        active.live.set(false);
        if let Some(id) = active.subscription {
            self.platform.unsubscribe(id);
            tracing::debug!(query = %active.query, ?id, "unsubscribed from media query");
        }
    }
}

fn listener(state: Weak<MatchState>, live: Rc<Cell<bool>>) -> Listener {
    Rc::new(move |matches: bool| {
        if !live.get() {
            tracing::trace!(matches, "dropping notification for detached media query");
            return;
        }
        if let Some(state) = state.upgrade() {
            state.apply(matches);
        }
    })
}

impl<P: MediaPlatform> Drop for QueryObserver<P> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<P: MediaPlatform> fmt::Debug for QueryObserver<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryObserver")
            .field("matches", &self.matches())
            .field("query", &self.query())
            .field("subscribed", &self.is_subscribed())
            .finish()
    }
}
