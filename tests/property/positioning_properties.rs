// Property-based tests for tooltip placement and event colouring
// Random anchors, popups and viewports must always produce on-screen positions

use calendar_widget::models::event::EventRecord;
use calendar_widget::models::reference::ReferenceEntity;
use calendar_widget::services::tooltip::position::{
    place, Rect, Size, Viewport, MIN_LEFT, WINDOW_MARGIN,
};
use calendar_widget::services::transform::palette::event_color;
use calendar_widget::services::transform::EventTransformer;
use proptest::prelude::*;

fn anchor_strategy() -> impl Strategy<Value = Rect> {
    (-500.0..2500.0f64, -500.0..2500.0f64, 1.0..400.0f64, 1.0..200.0f64)
        .prop_map(|(left, top, width, height)| Rect::new(left, top, width, height))
}

fn viewport_strategy() -> impl Strategy<Value = Viewport> {
    (400.0..2000.0f64, 300.0..1200.0f64, 0.0..3000.0f64, 0.0..3000.0f64)
        .prop_map(|(w, h, sx, sy)| Viewport::new(w, h).scrolled(sx, sy))
}

proptest! {
    /// Property: the popup never starts above the top margin
    #[test]
    fn prop_top_edge_always_respected(
        anchor in anchor_strategy(),
        width in 10.0..400.0f64,
        height in 10.0..2000.0f64,
        viewport in viewport_strategy(),
    ) {
        let pos = place(anchor, Size::new(width, height), viewport);
        prop_assert!(pos.y >= viewport.scroll_y + WINDOW_MARGIN);
    }

    /// Property: a popup that fits vertically stays inside the bottom margin
    #[test]
    fn prop_fitting_popup_stays_above_bottom(
        anchor in anchor_strategy(),
        width in 10.0..400.0f64,
        height in 10.0..260.0f64,
        viewport in viewport_strategy(),
    ) {
        let pos = place(anchor, Size::new(width, height), viewport);
        let bottom = viewport.scroll_y + viewport.height - WINDOW_MARGIN;
        prop_assert!(pos.y + height <= bottom + 1e-9);
    }

    /// Property: horizontal position stays between the left minimum and the
    /// right edge allowance
    #[test]
    fn prop_horizontal_clamp(
        anchor in anchor_strategy(),
        width in 10.0..400.0f64,
        height in 10.0..200.0f64,
        viewport in viewport_strategy(),
    ) {
        let pos = place(anchor, Size::new(width, height), viewport);
        prop_assert!(pos.x >= viewport.scroll_x + MIN_LEFT);
        prop_assert!(pos.x <= viewport.width + viewport.scroll_x - width / 2.0 - WINDOW_MARGIN + 1e-9);
    }

    /// Property: an event's colour is decided by its proposal's list position
    #[test]
    fn prop_color_follows_proposal_position(
        count in 1usize..40,
        pick in 0usize..40,
    ) {
        let index = pick % count;
        let proposals: Vec<_> = (0..count)
            .map(|i| ReferenceEntity::new(i as i64 * 7, format!("Proposal {}", i)))
            .collect();
        let record = EventRecord::new(1, "2024-01-01T10:00", "2024-01-01T11:00")
            .with_proposal(index as i64 * 7);

        let transformer = EventTransformer::new(&proposals, &[]);
        let first = transformer.to_view_model(&record);
        let second = transformer.to_view_model(&record);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.background_color.as_deref(), Some(event_color(index)));
        prop_assert_eq!(first.border_color.as_deref(), Some(event_color(index)));
    }
}
