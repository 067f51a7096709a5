//! Gesture-driven behavior: edge drags, flings, taps and the edge peek.

use sideswipe_panel::{
    ChildParams, Constraints, Dimension, DragState, EdgeGravity, LockMode, PanelConfig,
    PanelGravity, Point, PointerEvent, PointerEventKind, SideSwipeLayout, DRAWER_INDEX,
};

const CONTAINER_WIDTH: f32 = 1000.0;
const CONTAINER_HEIGHT: f32 = 600.0;
const DRAWER_WIDTH: f32 = 300.0;

fn left_panel() -> SideSwipeLayout {
    let mut panel = SideSwipeLayout::new(PanelConfig::default());
    panel.add_child(ChildParams::content(), false);
    panel.add_child(
        ChildParams::drawer(
            PanelGravity::new(EdgeGravity::Left),
            Dimension::Exact(DRAWER_WIDTH),
        ),
        true,
    );
    panel
        .measure(Constraints::tight(CONTAINER_WIDTH, CONTAINER_HEIGHT))
        .unwrap();
    panel.layout().unwrap();
    panel
}

fn down(panel: &mut SideSwipeLayout, x: f32, y: f32, t: i64) {
    panel.handle_pointer(&PointerEvent::new(
        PointerEventKind::Down,
        Point::new(x, y),
        t,
    ));
}

fn mv(panel: &mut SideSwipeLayout, x: f32, y: f32, t: i64) {
    panel.handle_pointer(&PointerEvent::new(
        PointerEventKind::Move,
        Point::new(x, y),
        t,
    ));
}

fn up(panel: &mut SideSwipeLayout, x: f32, y: f32, t: i64) {
    panel.handle_pointer(&PointerEvent::new(
        PointerEventKind::Up,
        Point::new(x, y),
        t,
    ));
}

/// Runs frames until the panel stops requesting them.
fn settle(panel: &mut SideSwipeLayout) {
    let mut now = 0;
    while panel.on_frame(now) {
        now += 16;
        assert!(now < 10_000, "animation failed to settle");
    }
}

fn drawer_offset(panel: &SideSwipeLayout) -> f32 {
    panel.drawer_params().map(|p| p.on_screen()).unwrap_or(0.0)
}

#[test]
fn edge_drag_captures_and_moves_the_drawer() {
    let mut panel = left_panel();
    down(&mut panel, 10.0, 300.0, 0);
    mv(&mut panel, 50.0, 300.0, 16);
    assert_eq!(panel.drawer_drag_state(), DragState::Dragging);

    mv(&mut panel, 170.0, 300.0, 32);
    assert_eq!(panel.child_frame(DRAWER_INDEX).x, -180.0);
    assert!((drawer_offset(&panel) - 0.4).abs() < 1e-4);
    assert!(panel.child_visible(DRAWER_INDEX));
}

#[test]
fn dead_release_below_halfway_settles_closed() {
    let mut panel = left_panel();
    down(&mut panel, 10.0, 300.0, 0);
    mv(&mut panel, 50.0, 300.0, 16);
    mv(&mut panel, 170.0, 300.0, 32);
    // Hold still long enough that no fling velocity survives.
    mv(&mut panel, 170.0, 300.0, 200);
    up(&mut panel, 170.0, 300.0, 360);

    assert_eq!(panel.drawer_drag_state(), DragState::Settling);
    settle(&mut panel);
    assert!(!panel.is_drawer_open());
    assert_eq!(panel.child_frame(DRAWER_INDEX).x, -DRAWER_WIDTH);
    assert_eq!(drawer_offset(&panel), 0.0);
}

#[test]
fn dead_release_past_halfway_settles_open() {
    let mut panel = left_panel();
    down(&mut panel, 10.0, 300.0, 0);
    mv(&mut panel, 50.0, 300.0, 16);
    mv(&mut panel, 230.0, 300.0, 32);
    assert!((drawer_offset(&panel) - 0.6).abs() < 1e-4);
    mv(&mut panel, 230.0, 300.0, 200);
    up(&mut panel, 230.0, 300.0, 360);

    settle(&mut panel);
    assert!(panel.is_drawer_open());
    assert_eq!(panel.child_frame(DRAWER_INDEX).x, 0.0);
}

#[test]
fn fast_fling_opens_from_a_small_offset() {
    let mut panel = left_panel();
    down(&mut panel, 10.0, 300.0, 0);
    mv(&mut panel, 60.0, 300.0, 10);
    mv(&mut panel, 110.0, 300.0, 20);
    mv(&mut panel, 160.0, 300.0, 30);
    assert!(drawer_offset(&panel) < 0.5, "drawer is barely out");
    up(&mut panel, 160.0, 300.0, 35);

    settle(&mut panel);
    assert!(panel.is_drawer_open(), "velocity beats position");
}

#[test]
fn tap_on_scrimmed_content_closes_the_drawer() {
    let mut panel = left_panel();
    panel.open_drawer(false);

    down(&mut panel, 600.0, 300.0, 0);
    up(&mut panel, 601.0, 300.0, 50);

    settle(&mut panel);
    assert!(!panel.is_drawer_open());
    assert_eq!(drawer_offset(&panel), 0.0);
}

#[test]
fn tap_does_not_close_a_locked_open_drawer() {
    let mut panel = left_panel();
    panel.set_drawer_lock_mode(LockMode::LockedOpen);
    settle(&mut panel);
    assert!(panel.is_drawer_open());

    down(&mut panel, 600.0, 300.0, 1000);
    up(&mut panel, 601.0, 300.0, 1050);

    settle(&mut panel);
    assert!(panel.is_drawer_open());
}

#[test]
fn locked_closed_drawer_ignores_edge_drags() {
    let mut panel = left_panel();
    panel.set_drawer_lock_mode(LockMode::LockedClosed);
    settle(&mut panel);

    down(&mut panel, 10.0, 300.0, 0);
    mv(&mut panel, 60.0, 300.0, 16);
    mv(&mut panel, 200.0, 300.0, 32);
    up(&mut panel, 200.0, 300.0, 48);

    settle(&mut panel);
    assert_eq!(panel.drawer_drag_state(), DragState::Idle);
    assert_eq!(drawer_offset(&panel), 0.0);
}

#[test]
fn edge_dwell_peeks_the_drawer() {
    let mut panel = left_panel();
    down(&mut panel, 10.0, 300.0, 0);

    // The peek waits for its dwell deadline.
    assert!(panel.on_frame(100), "peek still pending");
    assert!(!panel.is_drawer_visible());

    let mut now = 160;
    while panel.on_frame(now) {
        now += 16;
        assert!(now < 10_000, "peek failed to settle");
    }

    let params = panel.drawer_params().unwrap();
    assert!(params.is_peeking());
    assert!(panel.is_drawer_visible());
    assert!(!panel.is_drawer_open(), "a peek is not an open");
    // Revealed by exactly the edge band width.
    assert!((drawer_offset(&panel) - 20.0 / DRAWER_WIDTH).abs() < 1e-3);
    assert!(panel.take_child_cancel_request());

    // Lifting the finger dismisses the peek.
    up(&mut panel, 10.0, 300.0, now + 100);
    settle(&mut panel);
    assert!(!panel.is_drawer_visible());
    assert!(!panel.drawer_params().unwrap().is_peeking());
}

#[test]
fn starting_a_drag_cancels_the_pending_peek() {
    let mut panel = left_panel();
    let ev = PointerEvent::new(PointerEventKind::Down, Point::new(10.0, 300.0), 0);
    panel.should_intercept_pointer(&ev);
    let ev = PointerEvent::new(PointerEventKind::Move, Point::new(50.0, 300.0), 16);
    assert!(panel.should_intercept_pointer(&ev), "edge drag captured");

    assert!(!panel.on_frame(200), "no peek left to fire");
    assert!(!panel.drawer_params().unwrap().is_peeking());
    assert_eq!(panel.drawer_drag_state(), DragState::Dragging);
}

#[test]
fn intercept_claims_taps_over_scrimmed_content_only() {
    let mut panel = left_panel();
    panel.open_drawer(false);

    let over_content =
        PointerEvent::new(PointerEventKind::Down, Point::new(600.0, 300.0), 0);
    assert!(panel.should_intercept_pointer(&over_content));

    let mut closed = left_panel();
    let no_scrim = PointerEvent::new(PointerEventKind::Down, Point::new(600.0, 300.0), 0);
    assert!(!closed.should_intercept_pointer(&no_scrim));
}

#[test]
fn edge_lock_claims_the_edge_and_force_closes() {
    let mut panel = SideSwipeLayout::new(PanelConfig {
        allow_edge_lock: true,
        ..PanelConfig::default()
    });
    panel.add_child(ChildParams::content(), false);
    panel.add_child(
        ChildParams::drawer(
            PanelGravity::new(EdgeGravity::Left),
            Dimension::Exact(DRAWER_WIDTH),
        ),
        true,
    );
    panel
        .measure(Constraints::tight(CONTAINER_WIDTH, CONTAINER_HEIGHT))
        .unwrap();
    panel.layout().unwrap();

    // Mostly-vertical motion from the tracked edge claims the edge and, with
    // the drawer shut, force-closes it.
    down(&mut panel, 10.0, 300.0, 0);
    mv(&mut panel, 12.0, 360.0, 16);
    assert!(panel.take_needs_redraw(), "force-close requested a redraw");

    // The claimed gesture can no longer turn into an edge drag.
    mv(&mut panel, 100.0, 360.0, 32);
    assert_eq!(panel.drawer_drag_state(), DragState::Idle);
    assert_eq!(drawer_offset(&panel), 0.0);

    up(&mut panel, 100.0, 360.0, 48);
    settle(&mut panel);
    assert!(!panel.is_drawer_visible());
}

#[test]
fn without_edge_lock_the_same_motion_still_drags() {
    let mut panel = left_panel();
    down(&mut panel, 10.0, 300.0, 0);
    mv(&mut panel, 12.0, 360.0, 16);
    mv(&mut panel, 100.0, 360.0, 32);
    assert_eq!(panel.drawer_drag_state(), DragState::Dragging);
}

#[test]
fn drag_is_clamped_to_the_travel_range() {
    let mut panel = left_panel();
    down(&mut panel, 10.0, 300.0, 0);
    mv(&mut panel, 50.0, 300.0, 16);
    // Way past the fully-open position.
    mv(&mut panel, 900.0, 300.0, 32);
    assert_eq!(panel.child_frame(DRAWER_INDEX).x, 0.0);
    assert_eq!(drawer_offset(&panel), 1.0);
}
