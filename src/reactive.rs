//! Media queries as reactive state.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use floem_reactive::{RwSignal, Scope, SignalGet, SignalUpdate, create_rw_signal};

use crate::{
    observer::{MediaPlatform, QueryObserver},
    query::{CompiledQuery, QuerySet},
};

/// Match state of a media query, kept in a signal.
///
/// Reading it with [`get`](Self::get) inside an effect or view re-runs that
/// effect whenever the query starts or stops matching. Dropping the handle
/// detaches from the platform.
pub struct MediaQuerySignal<P: MediaPlatform + 'static> {
    matches: RwSignal<bool>,
    observer: Rc<RefCell<QueryObserver<P>>>,
    scope: Scope,
    disposed: Rc<Cell<bool>>,
}

impl<P: MediaPlatform + 'static> MediaQuerySignal<P> {
    pub fn get(&self) -> bool {
        self.matches.get()
    }

    pub fn get_untracked(&self) -> bool {
        self.matches.get_untracked()
    }

    pub fn signal(&self) -> RwSignal<bool> {
        self.matches
    }

    pub fn query(&self) -> Option<CompiledQuery> {
        self.observer.try_borrow().ok()?.query().cloned()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Detach from the platform and stop following `source`.
    ///
    /// The signal keeps its last value.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.scope.dispose();
        // Still borrowed only if dropped from inside an update; the observer
        // then detaches itself when the last reference goes away.
        if let Ok(mut observer) = self.observer.try_borrow_mut() {
            observer.stop();
        }
    }
}

impl<P: MediaPlatform + 'static> Drop for MediaQuerySignal<P> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Observe the media query produced by `source`.
///
/// `source` runs inside an effect, so any signal it reads makes the query
/// follow that signal. The subscription is only replaced when the resulting
/// query set changes shape or compiles to a different string.
pub fn use_media_query<P, S, F>(platform: P, source: F, initial: bool) -> MediaQuerySignal<P>
where
    P: MediaPlatform + 'static,
    S: Into<QuerySet>,
    F: Fn() -> S + 'static,
{
    let matches = create_rw_signal(initial);
    // While the observer is borrowed for an update, changes are held back and
    // published once the borrow is released.
    let updating = Rc::new(Cell::new(false));
    let pending = Rc::new(Cell::new(None));
    let observer = Rc::new(RefCell::new(QueryObserver::new(platform, initial).on_change({
        let updating = updating.clone();
        let pending = pending.clone();
        move |value| {
            if updating.get() {
                pending.set(Some(value));
            } else {
                matches.set(value);
            }
        }
    })));
    let disposed = Rc::new(Cell::new(false));

    let scope = Scope::current().create_child();
    {
        let observer = observer.clone();
        let disposed = disposed.clone();
        scope.create_effect(move |_| {
            if disposed.get() {
                return;
            }
            let set: QuerySet = source().into();
            updating.set(true);
            observer.borrow_mut().update(set);
            updating.set(false);
            if let Some(value) = pending.take() {
                matches.set(value);
            }
        });
    }

    MediaQuerySignal {
        matches,
        observer,
        scope,
        disposed,
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use floem_reactive::{SignalGet, SignalUpdate, create_effect, create_rw_signal};

    use super::use_media_query;
    use crate::{query::QueryDescriptor, viewport::Viewport};

    #[test]
    fn follows_the_viewport() {
        let viewport = Rc::new(Viewport::new(1024.0, 768.0));
        let wide = use_media_query(
            viewport.clone(),
            || QueryDescriptor::new().min_width(768),
            false,
        );
        assert!(wide.get_untracked());

        viewport.set_size(400.0, 768.0);
        assert!(!wide.get_untracked());

        wide.dispose();
        assert!(wide.is_disposed());
        assert_eq!(viewport.subscriber_count(), 0);
        viewport.set_size(1024.0, 768.0);
        assert!(!wide.get_untracked());
    }

    #[test]
    fn follows_the_source_signal() {
        let viewport = Rc::new(Viewport::new(900.0, 600.0));
        let min_width = create_rw_signal(1000);
        let matches = use_media_query(
            viewport.clone(),
            move || QueryDescriptor::new().min_width(min_width.get()),
            true,
        );
        assert!(!matches.get_untracked());
        assert_eq!(matches.query().unwrap().as_str(), "(min-width:1000px)");

        min_width.set(800);
        assert!(matches.get_untracked());
        assert_eq!(matches.query().unwrap().as_str(), "(min-width:800px)");
        assert_eq!(viewport.subscriber_count(), 1);
    }

    #[test]
    fn disposed_signal_ignores_source_changes() {
        let viewport = Rc::new(Viewport::new(500.0, 600.0));
        let min_width = create_rw_signal(800);
        let matches = use_media_query(
            viewport.clone(),
            move || QueryDescriptor::new().min_width(min_width.get()),
            false,
        );
        assert_eq!(viewport.subscriber_count(), 1);

        matches.dispose();
        assert_eq!(viewport.subscriber_count(), 0);

        min_width.set(300);
        assert_eq!(viewport.subscriber_count(), 0);
        assert!(!matches.get_untracked());
        assert!(matches.query().is_none());
    }

    #[test]
    fn dropping_the_handle_unsubscribes() {
        let viewport = Rc::new(Viewport::new(500.0, 600.0));
        {
            let _matches = use_media_query(
                viewport.clone(),
                || QueryDescriptor::new().min_width(400),
                false,
            );
            assert_eq!(viewport.subscriber_count(), 1);
        }
        assert_eq!(viewport.subscriber_count(), 0);
        viewport.set_size(1000.0, 600.0);
    }

    #[test]
    fn dependent_effects_can_read_the_query() {
        let viewport = Rc::new(Viewport::new(700.0, 500.0));
        let min_width = create_rw_signal(800);
        let matches = Rc::new(use_media_query(
            viewport.clone(),
            move || QueryDescriptor::new().min_width(min_width.get()),
            false,
        ));

        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let matches = matches.clone();
            let seen = seen.clone();
            create_effect(move |_| {
                let state = matches.get();
                let query = matches.query().map(|q| q.to_string());
                seen.borrow_mut().push((state, query));
            });
        }

        min_width.set(600);
        viewport.set_size(500.0, 500.0);
        assert_eq!(
            *seen.borrow(),
            [
                (false, Some("(min-width:800px)".to_string())),
                (true, Some("(min-width:600px)".to_string())),
                (false, Some("(min-width:600px)".to_string())),
            ]
        );
    }
}
