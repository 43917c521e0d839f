use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use cadenza_core::{
    CarouselConfig, Frame, InputEvent, InputOutcome, MemoryPreferenceStore,
    Showcase, UniformWidth, ViewOptions,
};
use cadenza_model::{Item, ItemId, ItemSet, ViewKind};

fn composers(slugs: &[&str]) -> ItemSet<String> {
    slugs
        .iter()
        .map(|slug| Item::new(ItemId::parse(*slug).unwrap(), slug.to_string()))
        .collect()
}

fn showcase(
    store: MemoryPreferenceStore,
) -> Showcase<String, MemoryPreferenceStore> {
    Showcase::new(
        composers(&["bach", "brahms", "chopin", "debussy"]),
        800.0,
        &UniformWidth(160.0),
        CarouselConfig::default(),
        store,
        ViewOptions::default(),
    )
}

#[test]
fn grid_suspends_the_carousel_and_ignores_its_input() {
    let mut showcase = showcase(MemoryPreferenceStore::new());
    let now = Instant::now();
    assert!(matches!(showcase.frame(now), Frame::Advanced(_)));

    let change = showcase.show_grid().expect("view should change");
    assert_eq!(change.current, ViewKind::Grid);
    assert_eq!(showcase.frame(now), Frame::Suspended);
    assert!(!showcase.carousel().wants_frame());
    assert_eq!(
        showcase.handle_input(InputEvent::PointerEnter, now),
        InputOutcome::Ignored
    );

    showcase.show_carousel();
    assert!(showcase.carousel().wants_frame());
    assert!(matches!(showcase.frame(now), Frame::Advanced(_)));
}

#[test]
fn stored_grid_preference_starts_in_grid() {
    let store = MemoryPreferenceStore::with_view(ViewKind::Grid);
    let showcase = showcase(store);

    assert_eq!(showcase.current_view(), ViewKind::Grid);
    assert_eq!(showcase.views().grid_cells().len(), 4);
    assert!(!showcase.carousel().wants_frame());
    assert!(showcase.surface(ViewKind::Grid).visible);
}

#[test]
fn toggle_persists_and_notifies() {
    let store = MemoryPreferenceStore::new();
    let mut showcase = showcase(store.clone());
    let heard = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&heard);
    showcase.on_view_change(move |_| *counter.borrow_mut() += 1);

    showcase.toggle();
    assert_eq!(store.get(), Some(ViewKind::Grid));
    showcase.toggle();
    assert_eq!(store.get(), Some(ViewKind::Carousel));
    // Re-selecting the current view writes the preference but is silent.
    showcase.show(ViewKind::Carousel);
    assert_eq!(*heard.borrow(), 2);
}

#[test]
fn replacing_items_rebuilds_track_but_not_grid() {
    let mut showcase = showcase(MemoryPreferenceStore::new());
    showcase.show_grid();
    showcase.show_carousel();

    showcase.replace_items(composers(&["liszt", "ravel"]), &UniformWidth(100.0));
    assert_eq!(showcase.items().len(), 2);
    assert_eq!(showcase.carousel().layout().unique_count(), 2);
    assert_eq!(showcase.carousel().layout().unit_width_px(), 200.0);
    assert_eq!(showcase.views().grid_cells().len(), 4);
}

#[test]
fn teardown_stops_frames_and_pending_resume() {
    let mut showcase = showcase(MemoryPreferenceStore::new());
    let start = Instant::now();
    showcase.handle_input(InputEvent::TouchStart { x: 10.0 }, start);
    showcase.handle_input(InputEvent::TouchEnd, start);

    showcase.teardown();
    assert_eq!(showcase.frame(start + Duration::from_secs(5)), Frame::Stopped);
    assert_eq!(
        showcase.handle_input(InputEvent::PointerLeave, start),
        InputOutcome::Ignored
    );
}

#[test]
fn duplicate_ids_are_rendered_once() {
    let showcase = Showcase::new(
        composers(&["bach", "bach", "ravel"]),
        400.0,
        &UniformWidth(100.0),
        CarouselConfig::default(),
        MemoryPreferenceStore::new(),
        ViewOptions::default(),
    );
    assert_eq!(showcase.items().duplicates_dropped(), 1);
    assert_eq!(showcase.carousel().layout().unique_count(), 2);
}
