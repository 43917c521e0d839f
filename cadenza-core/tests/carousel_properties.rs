//! Behavioural properties of a single carousel: wraparound, drag momentum,
//! hover/drag arbitration, empty input and grid population.

use std::time::{Duration, Instant};

use cadenza_core::{
    Carousel, CarouselConfig, Frame, InputController, InputEvent,
    InputOutcome, MemoryPreferenceStore, PointerButton, ReplicateFactor,
    ScrollEngine, TrackLayout, UniformWidth, ViewCoordinator, ViewOptions,
};
use cadenza_model::{Item, ItemId, ItemSet, ViewKind};

fn composers(n: usize) -> ItemSet<()> {
    (0..n)
        .map(|i| Item::new(ItemId::parse(format!("composer-{i}")).unwrap(), ()))
        .collect()
}

fn loaded_carousel(items: usize, width: f32) -> Carousel {
    let mut carousel = Carousel::new(CarouselConfig::default());
    carousel.load(&composers(items), 1200.0, &UniformWidth(width));
    carousel
}

#[test]
fn autoplay_steps_by_speed_and_stays_within_one_unit() {
    let mut carousel = loaded_carousel(4, 100.0);
    let unit = carousel.layout().unit_width_px();
    assert_eq!(unit, 400.0);

    let start = Instant::now();
    let mut previous = carousel.state().position_px;
    for i in 0..1_000u32 {
        let frame = carousel.frame(start + Duration::from_millis(u64::from(i)));
        let Frame::Advanced(position) = frame else {
            panic!("expected an autoplay step, got {frame:?}");
        };
        assert!(position.abs() < unit, "position {position} escaped the unit");
        assert!(position <= 0.0);
        let step = previous - position;
        // A wrap adds exactly one unit back.
        assert!(
            (step - 1.0).abs() < 1e-3 || (step - 1.0 + unit).abs() < 1e-3,
            "unexpected step {step}"
        );
        previous = position;
    }
}

#[test]
fn wraparound_keeps_fractional_remainder() {
    let mut engine = ScrollEngine::new(0.5);
    engine.set_unit_width(1000.0);
    engine.set_position(-1000.0 + 0.3);

    let frame = engine.tick(Instant::now());
    let Frame::Advanced(position) = frame else {
        panic!("expected an autoplay step, got {frame:?}");
    };
    assert!((position - -0.2).abs() < 1e-3, "got {position}");
}

#[test]
fn drag_release_applies_momentum() {
    let config = CarouselConfig::default();
    let mut engine = ScrollEngine::new(config.speed_px_per_frame);
    engine.set_unit_width(1000.0);
    engine.set_position(-50.0);
    let mut input = InputController::new(&config);
    let now = Instant::now();

    let outcome = input.handle(
        &mut engine,
        InputEvent::PointerDown {
            x: 200.0,
            button: PointerButton::Primary,
        },
        now,
    );
    assert_eq!(outcome, InputOutcome::DragStarted { origin_px: -50.0 });

    input.handle(&mut engine, InputEvent::PointerMove { x: 165.0 }, now);
    let outcome =
        input.handle(&mut engine, InputEvent::PointerMove { x: 170.0 }, now);
    assert_eq!(outcome, InputOutcome::DragMoved { manual_px: -80.0 });
    assert_eq!(engine.rendered_offset(), -80.0);

    let outcome = input.handle(&mut engine, InputEvent::PointerUp, now);
    assert_eq!(outcome, InputOutcome::DragReleased { baseline_px: 20.0 });
    assert!(!engine.state().is_dragging);
    assert!(!input.is_dragging());
    assert_eq!(engine.position(), 20.0);
}

#[test]
fn leaving_mid_drag_does_not_resume_autoplay() {
    let mut carousel = loaded_carousel(10, 100.0);
    let now = Instant::now();

    carousel.handle_input(InputEvent::PointerEnter, now);
    carousel.handle_input(
        InputEvent::PointerDown {
            x: 300.0,
            button: PointerButton::Primary,
        },
        now,
    );
    let outcome = carousel.handle_input(InputEvent::PointerLeave, now);
    assert_eq!(outcome, InputOutcome::Recorded);
    assert!(carousel.state().is_dragging);

    // Moves outside the element still drive the manual offset.
    carousel.handle_input(InputEvent::PointerMove { x: 260.0 }, now);
    assert_eq!(carousel.frame(now), Frame::Held(-40.0));
    assert_eq!(carousel.frame(now), Frame::Held(-40.0));
}

#[test]
fn global_pointer_up_ends_drag_outside_element() {
    let mut carousel = loaded_carousel(10, 100.0);
    let start = Instant::now();

    carousel.handle_input(InputEvent::PointerEnter, start);
    carousel.handle_input(
        InputEvent::PointerDown {
            x: 300.0,
            button: PointerButton::Primary,
        },
        start,
    );
    carousel.handle_input(InputEvent::PointerLeave, start);
    carousel.handle_input(InputEvent::PointerUp, start);
    assert!(!carousel.state().is_dragging);
    assert!(carousel.state().is_paused);

    // Not hovering any more, so the deferred resume fires after 100 ms.
    assert!(matches!(
        carousel.frame(start + Duration::from_millis(50)),
        Frame::Held(_)
    ));
    assert!(matches!(
        carousel.frame(start + Duration::from_millis(100)),
        Frame::Advanced(_)
    ));
}

#[test]
fn hover_between_release_and_resume_wins() {
    let mut carousel = loaded_carousel(10, 100.0);
    let start = Instant::now();

    carousel.handle_input(InputEvent::TouchStart { x: 100.0 }, start);
    carousel.handle_input(InputEvent::TouchMove { x: 90.0 }, start);
    carousel.handle_input(InputEvent::TouchEnd, start);
    assert!(carousel.engine().pending_resume().is_some());

    carousel.handle_input(
        InputEvent::PointerEnter,
        start + Duration::from_millis(200),
    );
    assert!(carousel.engine().pending_resume().is_none());
    assert!(matches!(
        carousel.frame(start + Duration::from_secs(2)),
        Frame::Held(_)
    ));
}

#[test]
fn empty_items_produce_empty_track_and_idle_engine() {
    let empty = ItemSet::<()>::new();
    let layout = TrackLayout::build(&empty, 5, &UniformWidth(120.0));
    assert_eq!(layout.unit_width_px(), 0.0);
    assert!(layout.placements().is_empty());

    let mut carousel = Carousel::new(CarouselConfig::default());
    carousel.load(&empty, 1200.0, &UniformWidth(120.0));
    let before = carousel.state().position_px;
    for _ in 0..10 {
        assert_eq!(carousel.frame(Instant::now()), Frame::Unmeasured(before));
    }
    assert_eq!(carousel.state().position_px, before);
}

#[test]
fn fixed_factor_produces_verbatim_replicas() {
    let items = composers(3);
    let layout = TrackLayout::build(&items, 2, &UniformWidth(50.0));
    let ids: Vec<&str> =
        layout.placements().iter().map(|p| p.id().as_str()).collect();
    assert_eq!(
        ids,
        [
            "composer-0",
            "composer-1",
            "composer-2",
            "composer-0",
            "composer-1",
            "composer-2",
            "composer-0",
            "composer-1",
            "composer-2",
        ]
    );
    assert_eq!(layout.unit_width_px(), 150.0);
    assert_eq!(layout.track_width_px(), 450.0);
}

#[test]
fn auto_factor_covers_wide_viewports() {
    let items = composers(2);
    let config = CarouselConfig {
        replicate: ReplicateFactor::Auto { minimum: 1 },
        ..CarouselConfig::default()
    };
    let mut carousel = Carousel::new(config);
    carousel.load(&items, 1000.0, &UniformWidth(100.0));
    assert!(carousel.layout().covers_viewport(1000.0));

    carousel.resize(3000.0);
    assert!(carousel.layout().covers_viewport(3000.0));
    assert_eq!(carousel.layout().unit_width_px(), 200.0);
}

#[test]
fn grid_is_populated_once_across_toggles() {
    let items = composers(7);
    let mut views =
        ViewCoordinator::load(MemoryPreferenceStore::new(), ViewOptions::default());

    views.show_grid(&items);
    views.show_carousel();
    views.show_grid(&items);
    assert_eq!(views.grid_cells().len(), items.len());
}

#[test]
fn preference_survives_reload() {
    let store = MemoryPreferenceStore::new();
    let mut first = ViewCoordinator::load(store.clone(), ViewOptions::default());
    first.show_grid(&composers(2));

    let restored = ViewCoordinator::load(store.clone(), ViewOptions::default());
    assert_eq!(restored.current(), ViewKind::Grid);

    let ignored = ViewCoordinator::load(
        store,
        ViewOptions {
            restore_preference_on_load: false,
            ..ViewOptions::default()
        },
    );
    assert_eq!(ignored.current(), ViewKind::Carousel);
}

#[test]
fn holding_still_keeps_the_drag_until_release() {
    let mut carousel = loaded_carousel(10, 100.0);
    let start = Instant::now();
    carousel.handle_input(
        InputEvent::PointerDown {
            x: 50.0,
            button: PointerButton::Primary,
        },
        start,
    );
    carousel.handle_input(InputEvent::PointerMove { x: 40.0 }, start);

    let later = start + Duration::from_secs(30);
    assert_eq!(carousel.frame(later), Frame::Held(-10.0));
    assert!(carousel.state().is_dragging);
    assert_eq!(
        carousel.handle_input(InputEvent::PointerMove { x: 30.0 }, later),
        InputOutcome::DragMoved { manual_px: -20.0 }
    );

    // Lost capture ends the drag through Cancel, without momentum.
    carousel.handle_input(InputEvent::Cancel, later);
    assert!(!carousel.state().is_dragging);
    assert_eq!(carousel.state().position_px, -20.0);
}
