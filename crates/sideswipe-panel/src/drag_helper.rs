//! Drag recognition and settling for the panel container.
//!
//! `DragHelper` turns raw pointer events into capture, drag and settle
//! decisions: touch-slop detection, edge-touch tracking, velocity-based
//! release and a time-eased settle animation stepped once per frame. It
//! never stores a reference back to its owner; every entry point takes the
//! narrow [`DragCallback`] the container implements, so ownership stays a
//! straight line.

use smallvec::SmallVec;

use sideswipe_core::{Dp, HorizontalEdge, Point, Rect, Size};

use crate::events::{PointerEvent, PointerEventKind, PointerId};
use crate::velocity::VelocityTracker;

/// Touch slop before a pointer movement is treated as a drag.
pub const TOUCH_SLOP: Dp = Dp(8.0);

/// Width of the edge band that arms edge gestures.
pub const EDGE_SIZE: Dp = Dp(20.0);

/// Magnitude cap applied to release velocities.
pub const MAX_VELOCITY: Dp = Dp(8_000.0);

const BASE_SETTLE_DURATION_MS: i64 = 256;
const MAX_SETTLE_DURATION_MS: i64 = 600;

/// Motion state of the tracked child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DragState {
    /// Nothing is moving and no pointer owns the child.
    #[default]
    Idle,
    /// A pointer is actively dragging the captured child.
    Dragging,
    /// The child is animating to a settle position.
    Settling,
}

/// Decisions and notifications the helper needs from its owner.
///
/// The callback both answers geometry queries (frames, clamping, drag range)
/// and receives gesture lifecycle reports. `on_released` returns the settle
/// target instead of calling back into the helper, which is the one place a
/// reference cycle would otherwise appear.
pub trait DragCallback {
    fn child_count(&self) -> usize;
    fn child_frame(&self, child: usize) -> Rect;
    fn container_size(&self) -> Size;

    /// Whether `child` may be captured for dragging right now.
    fn try_capture_child(&mut self, child: usize, pointer: PointerId) -> bool;

    fn clamp_horizontal(&self, child: usize, left: f32, dx: f32) -> f32;
    fn clamp_vertical(&self, child: usize, top: f32, dy: f32) -> f32;

    /// Horizontal travel range of `child`; 0 for children that do not drag.
    fn horizontal_drag_range(&self, child: usize) -> f32;

    fn on_drag_state_changed(&mut self, state: DragState);
    fn on_position_changed(&mut self, child: usize, left: f32, top: f32, dx: f32, dy: f32);
    fn on_captured(&mut self, child: usize, pointer: PointerId);

    /// The gesture released with the given velocity; returns the position
    /// the child should settle at.
    fn on_released(&mut self, child: usize, velocity_x: f32, velocity_y: f32) -> Point;

    fn on_edge_touched(&mut self, edge: HorizontalEdge, pointer: PointerId, time_ms: i64);

    /// A drag began from the tracked edge; returns the child to capture, if
    /// any. Capture bypasses `try_capture_child`.
    fn on_edge_drag_started(&mut self, edge: HorizontalEdge, pointer: PointerId) -> Option<usize>;

    /// Mostly-perpendicular motion from the tracked edge; returning true
    /// claims the edge and suppresses the drag for this gesture.
    fn on_edge_lock(&mut self, edge: HorizontalEdge) -> bool;
}

#[derive(Clone, Copy)]
struct TrackedPointer {
    id: PointerId,
    down: Point,
    last: Point,
    on_tracked_edge: bool,
    edge_drag_locked: bool,
}

struct SettleAnimation {
    child: usize,
    from: Point,
    to: Point,
    /// Set on the first `continue_settling` tick.
    start_time_ms: Option<i64>,
    duration_ms: i64,
}

/// Gesture tracker for a single draggable child.
pub struct DragHelper {
    state: DragState,
    touch_slop: f32,
    edge_size: f32,
    min_velocity: f32,
    max_velocity: f32,
    tracked_edge: Option<HorizontalEdge>,
    captured: Option<usize>,
    active_pointer: Option<PointerId>,
    pointers: SmallVec<[TrackedPointer; 2]>,
    velocity: VelocityTracker,
    settle: Option<SettleAnimation>,
    edge_drag_started: bool,
}

impl DragHelper {
    pub fn new(density: f32) -> Self {
        Self {
            state: DragState::Idle,
            touch_slop: TOUCH_SLOP.to_px(density),
            edge_size: EDGE_SIZE.to_px(density),
            min_velocity: 0.0,
            max_velocity: MAX_VELOCITY.to_px(density),
            tracked_edge: None,
            captured: None,
            active_pointer: None,
            pointers: SmallVec::new(),
            velocity: VelocityTracker::new(),
            settle: None,
            edge_drag_started: false,
        }
    }

    /// Minimum release speed (px/sec) treated as a fling.
    pub fn set_min_velocity(&mut self, min_velocity: f32) {
        self.min_velocity = min_velocity;
    }

    /// The edge the drawer anchors to; edge touches elsewhere are ignored.
    pub fn set_tracked_edge(&mut self, edge: HorizontalEdge) {
        self.tracked_edge = Some(edge);
    }

    pub fn current_state(&self) -> DragState {
        self.state
    }

    pub fn touch_slop(&self) -> f32 {
        self.touch_slop
    }

    pub fn edge_size(&self) -> f32 {
        self.edge_size
    }

    pub fn captured_child(&self) -> Option<usize> {
        self.captured
    }

    /// True if any tracked pointer has moved beyond the touch slop.
    pub fn check_touch_slop(&self) -> bool {
        self.pointers.iter().any(|p| {
            (p.last.x - p.down.x).abs() > self.touch_slop
                || (p.last.y - p.down.y).abs() > self.touch_slop
        })
    }

    /// Topmost child whose frame contains the point; children are ordered
    /// bottom-up, so the drawer (index 1) wins over the content.
    pub fn find_top_child_under(
        &self,
        x: f32,
        y: f32,
        cb: &dyn DragCallback,
    ) -> Option<usize> {
        (0..cb.child_count())
            .rev()
            .find(|&i| cb.child_frame(i).contains(x, y))
    }

    /// Decides whether the container should take over the event stream.
    /// Mirrors the full event handling but only ever captures, never drags.
    pub fn should_intercept(&mut self, event: &PointerEvent, cb: &mut dyn DragCallback) -> bool {
        match event.kind {
            PointerEventKind::Down => self.handle_down(event, cb),
            PointerEventKind::Move => {
                self.velocity.add_movement(event.time_ms, event.position);
                self.handle_move_before_capture(event, cb);
                if let Some(p) = self.pointer_mut(event.id) {
                    p.last = event.position;
                }
            }
            PointerEventKind::Up | PointerEventKind::Cancel => self.cancel(),
        }
        self.state == DragState::Dragging
    }

    /// Processes an event the container owns. Drives capture, live drag and
    /// the release decision.
    pub fn process_event(&mut self, event: &PointerEvent, cb: &mut dyn DragCallback) {
        match event.kind {
            PointerEventKind::Down => self.handle_down(event, cb),
            PointerEventKind::Move => {
                self.velocity.add_movement(event.time_ms, event.position);
                if self.state == DragState::Dragging && self.active_pointer == Some(event.id) {
                    let last = match self.pointer(event.id) {
                        Some(p) => p.last,
                        None => event.position,
                    };
                    let dx = event.position.x - last.x;
                    let dy = event.position.y - last.y;
                    self.drag_to(dx, dy, cb);
                } else {
                    self.handle_move_before_capture(event, cb);
                }
                if let Some(p) = self.pointer_mut(event.id) {
                    p.last = event.position;
                }
            }
            PointerEventKind::Up => {
                if self.state == DragState::Dragging && self.active_pointer == Some(event.id) {
                    let (vx, vy) = self
                        .velocity
                        .velocity_clamped(self.min_velocity, self.max_velocity);
                    self.release(vx, vy, cb);
                }
                self.clear_pointers();
            }
            PointerEventKind::Cancel => {
                if self.state == DragState::Dragging {
                    self.release(0.0, 0.0, cb);
                }
                self.clear_pointers();
            }
        }
    }

    /// Animates `child` to `to` with no initial velocity. Returns false when
    /// the child is already there (and forces the state to idle).
    pub fn animate_to(&mut self, child: usize, to: Point, cb: &mut dyn DragCallback) -> bool {
        self.active_pointer = None;
        self.start_settle(child, to, 0.0, cb)
    }

    /// Advances an in-flight settle animation. Returns true while more
    /// frames are needed.
    pub fn continue_settling(&mut self, now_ms: i64, cb: &mut dyn DragCallback) -> bool {
        if self.state != DragState::Settling {
            return false;
        }
        if self.settle.is_none() {
            self.set_state(DragState::Idle, cb);
            return false;
        }
        let (child, x, y, finished) = {
            let Some(anim) = self.settle.as_mut() else {
                return false;
            };
            let start = *anim.start_time_ms.get_or_insert(now_ms);
            let fraction = if anim.duration_ms <= 0 {
                1.0
            } else {
                ((now_ms - start) as f32 / anim.duration_ms as f32).clamp(0.0, 1.0)
            };
            let eased = ease_out_cubic(fraction);
            let x = lerp(anim.from.x, anim.to.x, eased).round();
            let y = lerp(anim.from.y, anim.to.y, eased).round();
            (anim.child, x, y, fraction >= 1.0)
        };

        let frame = cb.child_frame(child);
        let dx = x - frame.x;
        let dy = y - frame.y;
        if dx != 0.0 || dy != 0.0 {
            cb.on_position_changed(child, x, y, dx, dy);
        }
        if finished {
            self.settle = None;
            self.set_state(DragState::Idle, cb);
        }
        self.state == DragState::Settling
    }

    /// Aborts pointer tracking for the current gesture. Does not touch an
    /// in-flight settle; a follow-up `animate_to` supersedes it instead.
    pub fn cancel(&mut self) {
        self.clear_pointers();
    }

    fn handle_down(&mut self, event: &PointerEvent, cb: &mut dyn DragCallback) {
        let on_edge = self.edge_hit(event.position, cb);
        self.pointers.retain(|p| p.id != event.id);
        self.pointers.push(TrackedPointer {
            id: event.id,
            down: event.position,
            last: event.position,
            on_tracked_edge: on_edge,
            edge_drag_locked: false,
        });
        self.velocity.reset();
        self.velocity.add_movement(event.time_ms, event.position);
        self.edge_drag_started = false;

        if on_edge {
            if let Some(edge) = self.tracked_edge {
                cb.on_edge_touched(edge, event.id, event.time_ms);
            }
        }

        // Catch a settling child under the finger.
        if self.state == DragState::Settling {
            if let Some(child) = self.settle.as_ref().map(|a| a.child) {
                if cb.child_frame(child).contains(event.position.x, event.position.y) {
                    self.try_capture(child, event.id, cb);
                }
            }
        }
    }

    /// Slop and edge-drag checks for a move that has not captured yet.
    fn handle_move_before_capture(&mut self, event: &PointerEvent, cb: &mut dyn DragCallback) {
        let Some(pointer) = self.pointer(event.id).copied() else {
            return;
        };
        let dx = event.position.x - pointer.down.x;
        let dy = event.position.y - pointer.down.y;

        if pointer.on_tracked_edge && !pointer.edge_drag_locked && !self.edge_drag_started {
            if let Some(edge) = self.tracked_edge {
                if dx.abs() < dy.abs() * 0.5 && dy.abs() > self.touch_slop {
                    if cb.on_edge_lock(edge) {
                        if let Some(p) = self.pointer_mut(event.id) {
                            p.edge_drag_locked = true;
                        }
                        return;
                    }
                } else if dx.abs() > self.touch_slop {
                    self.edge_drag_started = true;
                    if let Some(child) = cb.on_edge_drag_started(edge, event.id) {
                        self.force_capture(child, event.id, cb);
                        return;
                    }
                }
            }
        }

        if self.state != DragState::Dragging && dx.abs() > self.touch_slop && dx.abs() > dy.abs() {
            if let Some(child) =
                self.find_top_child_under(event.position.x, event.position.y, cb)
            {
                self.try_capture(child, event.id, cb);
            }
        }
    }

    fn try_capture(&mut self, child: usize, pointer: PointerId, cb: &mut dyn DragCallback) -> bool {
        if self.state == DragState::Dragging
            && self.captured == Some(child)
            && self.active_pointer == Some(pointer)
        {
            return true;
        }
        if cb.try_capture_child(child, pointer) {
            self.force_capture(child, pointer, cb);
            true
        } else {
            false
        }
    }

    fn force_capture(&mut self, child: usize, pointer: PointerId, cb: &mut dyn DragCallback) {
        self.captured = Some(child);
        self.active_pointer = Some(pointer);
        self.settle = None;
        cb.on_captured(child, pointer);
        self.set_state(DragState::Dragging, cb);
    }

    fn drag_to(&mut self, dx: f32, dy: f32, cb: &mut dyn DragCallback) {
        let Some(child) = self.captured else {
            return;
        };
        let frame = cb.child_frame(child);
        let left = cb.clamp_horizontal(child, frame.x + dx, dx);
        let top = cb.clamp_vertical(child, frame.y + dy, dy);
        let moved_x = left - frame.x;
        let moved_y = top - frame.y;
        if moved_x != 0.0 || moved_y != 0.0 {
            cb.on_position_changed(child, left, top, moved_x, moved_y);
        }
    }

    fn release(&mut self, vx: f32, vy: f32, cb: &mut dyn DragCallback) {
        let Some(child) = self.captured else {
            return;
        };
        let target = cb.on_released(child, vx, vy);
        self.active_pointer = None;
        self.start_settle(child, target, vx, cb);
    }

    fn start_settle(
        &mut self,
        child: usize,
        to: Point,
        velocity_x: f32,
        cb: &mut dyn DragCallback,
    ) -> bool {
        let from = cb.child_frame(child).origin();
        if from == to {
            self.settle = None;
            self.set_state(DragState::Idle, cb);
            return false;
        }
        let range = cb.horizontal_drag_range(child);
        let duration = settle_duration(to.x - from.x, velocity_x, range);
        self.captured = Some(child);
        self.settle = Some(SettleAnimation {
            child,
            from,
            to,
            start_time_ms: None,
            duration_ms: duration,
        });
        self.set_state(DragState::Settling, cb);
        true
    }

    fn set_state(&mut self, state: DragState, cb: &mut dyn DragCallback) {
        if self.state != state {
            self.state = state;
            if state == DragState::Idle {
                self.captured = None;
            }
            cb.on_drag_state_changed(state);
        }
    }

    fn edge_hit(&self, position: Point, cb: &dyn DragCallback) -> bool {
        let width = cb.container_size().width;
        match self.tracked_edge {
            Some(HorizontalEdge::Left) => position.x < self.edge_size,
            Some(HorizontalEdge::Right) => position.x > width - self.edge_size,
            None => false,
        }
    }

    fn pointer(&self, id: PointerId) -> Option<&TrackedPointer> {
        self.pointers.iter().find(|p| p.id == id)
    }

    fn pointer_mut(&mut self, id: PointerId) -> Option<&mut TrackedPointer> {
        self.pointers.iter_mut().find(|p| p.id == id)
    }

    fn clear_pointers(&mut self) {
        self.pointers.clear();
        self.active_pointer = None;
        self.velocity.reset();
        self.edge_drag_started = false;
    }
}

/// Settle duration scaled by how fast the gesture released: a fast fling
/// finishes quickly, a slow release takes a fraction of the base duration
/// proportional to the remaining distance.
fn settle_duration(delta: f32, velocity: f32, range: f32) -> i64 {
    if delta == 0.0 {
        return 0;
    }
    let speed = velocity.abs();
    let duration = if speed > 0.0 {
        (4.0 * (1000.0 * (delta.abs() / speed))).round() as i64
    } else if range > 0.0 {
        (BASE_SETTLE_DURATION_MS as f32 * (delta.abs() / range).min(1.0)).round() as i64
    } else {
        BASE_SETTLE_DURATION_MS
    };
    duration.min(MAX_SETTLE_DURATION_MS)
}

fn lerp(from: f32, to: f32, fraction: f32) -> f32 {
    from + (to - from) * fraction
}

/// Decelerating ease matching the feel of a released scroller.
fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_duration_is_capped() {
        assert!(settle_duration(300.0, 10.0, 300.0) <= MAX_SETTLE_DURATION_MS);
    }

    #[test]
    fn zero_distance_settles_instantly() {
        assert_eq!(settle_duration(0.0, 500.0, 300.0), 0);
    }

    #[test]
    fn slow_release_scales_with_remaining_distance() {
        let short = settle_duration(30.0, 0.0, 300.0);
        let long = settle_duration(300.0, 0.0, 300.0);
        assert!(short < long);
        assert_eq!(long, BASE_SETTLE_DURATION_MS);
    }

    #[test]
    fn ease_out_hits_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}
