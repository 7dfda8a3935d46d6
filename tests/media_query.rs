use std::{cell::RefCell, rc::Rc};

use floem_areas::{
    config::LayoutOptions,
    floem_reactive::{SignalGet, SignalUpdate, create_effect, create_rw_signal},
    prelude::*,
};

#[test]
fn breakpoint_queries_track_the_viewport() {
    let options = LayoutOptions::default();
    let viewport = Rc::new(Viewport::new(640.0, 480.0));

    let md_only = QueryObserver::observe(
        viewport.clone(),
        options.breakpoints.query(Breakpoint::Md, Behavior::Only),
        false,
    );
    assert_eq!(
        md_only.query().map(|q| q.as_str()),
        Some("(min-width:768px) and (max-width:991.98px)")
    );
    assert!(!md_only.matches());

    viewport.set_size(800.0, 480.0);
    assert!(md_only.matches());
    viewport.set_size(992.0, 480.0);
    assert!(!md_only.matches());
    assert_eq!(viewport.breakpoint(&options.breakpoints), Breakpoint::Lg);
}

#[test]
fn screen_size_sets_compile_to_alternatives() {
    let breakpoints = LayoutOptions::default().breakpoints;
    let set = breakpoints.query_for(ScreenSize::XS | ScreenSize::XL | ScreenSize::XXL);
    assert_eq!(
        set.compile().as_str(),
        "(max-width:575.98px),(min-width:1200px)"
    );

    let viewport = Viewport::new(1300.0, 700.0);
    assert!(viewport.matches(&set.compile()));
}

#[test]
fn signal_drives_effects() {
    let viewport = Rc::new(Viewport::new(1024.0, 768.0));
    let portrait = use_media_query(
        viewport.clone(),
        || QueryDescriptor::new().orientation("portrait"),
        true,
    );
    assert!(!portrait.get_untracked());

    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = seen.clone();
        let signal = portrait.signal();
        create_effect(move |_| seen.borrow_mut().push(signal.get()));
    }

    viewport.set_size(768.0, 1024.0);
    viewport.set_size(760.0, 1024.0);
    viewport.set_size(1024.0, 768.0);
    assert_eq!(*seen.borrow(), [false, true, false]);
}

#[test]
fn switching_source_replaces_the_subscription() {
    let viewport = Rc::new(Viewport::new(500.0, 500.0));
    let wide = create_rw_signal(true);
    let query = use_media_query(
        viewport.clone(),
        move || {
            if wide.get() {
                QuerySet::from(QueryDescriptor::new().min_width(1000))
            } else {
                QuerySet::new()
            }
        },
        false,
    );
    assert!(!query.get_untracked());
    assert_eq!(viewport.subscriber_count(), 1);

    wide.set(false);
    assert_eq!(viewport.subscriber_count(), 0);
    assert!(query.query().is_none());

    viewport.set_size(1200.0, 500.0);
    assert!(!query.get_untracked());

    wide.set(true);
    assert_eq!(viewport.subscriber_count(), 1);
    assert!(query.get_untracked());
}

#[test]
fn callback_added_after_observe_sees_resizes() {
    let viewport = Rc::new(Viewport::new(500.0, 500.0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let observer = QueryObserver::observe(
        viewport.clone(),
        QueryDescriptor::new().min_width(768),
        false,
    )
    .on_change({
        let seen = seen.clone();
        move |matches| seen.borrow_mut().push(matches)
    });

    viewport.set_size(1000.0, 500.0);
    assert!(observer.is_subscribed());
    assert!(observer.matches());
    assert_eq!(*seen.borrow(), [true]);
}

#[test]
fn fractional_width_shows_exactly_one_variant() {
    let breakpoints = LayoutOptions::default().breakpoints;
    let narrow = breakpoints.query_for(ScreenSize::XS | ScreenSize::SM).compile();
    let wide = breakpoints
        .query_for(ScreenSize::not(ScreenSize::XS | ScreenSize::SM))
        .compile();

    let viewport = Viewport::new(767.5, 500.0);
    assert!(viewport.matches(&narrow));
    assert!(!viewport.matches(&wide));
}
