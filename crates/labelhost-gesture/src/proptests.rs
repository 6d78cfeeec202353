use super::*;
use labelhost_core::messages::Point;
use proptest::prelude::*;

fn arb_point() -> impl Strategy<Value = Point> {
    (-2000.0f32..2000.0, -2000.0f32..2000.0).prop_map(|(x, y)| Point::new(x, y))
}

fn arb_event() -> impl Strategy<Value = PointerEvent> {
    prop_oneof![
        (0u8..3, arb_point()).prop_map(|(button, p)| PointerEvent::MouseDown {
            button,
            x: p.x,
            y: p.y
        }),
        arb_point().prop_map(|p| PointerEvent::MouseMove { x: p.x, y: p.y }),
        Just(PointerEvent::MouseUp),
        prop::collection::vec(arb_point(), 0..3)
            .prop_map(|touches| PointerEvent::TouchStart { touches }),
        prop::collection::vec(arb_point(), 0..3)
            .prop_map(|touches| PointerEvent::TouchMove { touches }),
        Just(PointerEvent::TouchEnd),
        (-500.0f32..500.0).prop_map(|delta_y| PointerEvent::Wheel { delta_y }),
    ]
}

// Property: no event sequence moves zoom outside its bounds
proptest! {
    #[test]
    fn prop_zoom_stays_in_bounds(
        initial in -10.0f32..10.0,
        events in prop::collection::vec(arb_event(), 0..64),
    ) {
        let mut tracker = GestureTracker::new("preview", initial);
        prop_assert!(tracker.zoom() >= MIN_ZOOM && tracker.zoom() <= MAX_ZOOM);
        for event in &events {
            let outcome = tracker.handle(event);
            prop_assert!(tracker.zoom() >= MIN_ZOOM && tracker.zoom() <= MAX_ZOOM);
            if let Some(update) = outcome.update {
                prop_assert_eq!(update.zoom, tracker.zoom());
            }
        }
    }
}

// Property: only gesture-ending events report an update
proptest! {
    #[test]
    fn prop_moves_never_emit(events in prop::collection::vec(arb_event(), 0..64)) {
        let mut tracker = GestureTracker::new("preview", 1.0);
        for event in &events {
            let outcome = tracker.handle(event);
            let ends_gesture = matches!(
                event,
                PointerEvent::MouseUp | PointerEvent::TouchEnd | PointerEvent::Wheel { .. }
            );
            if !ends_gesture {
                prop_assert!(outcome.update.is_none());
            }
        }
    }
}
