//! The panel container and its gesture-to-layout state machine.

use std::cell::RefCell;
use std::rc::Rc;

use sideswipe_core::{
    placement, Dp, HorizontalEdge, LayoutDirection, Point, Rect, Size,
};

use crate::drag_helper::{DragCallback, DragHelper, DragState};
use crate::events::{PointerEvent, PointerEventKind, PointerId};
use crate::params::{ChildParams, OpenState};

/// Index of the primary content child.
pub const CONTENT_INDEX: usize = 0;
/// Index of the drawer child.
pub const DRAWER_INDEX: usize = 1;

/// Default margin kept visible on the non-anchored side of an open drawer.
pub const MIN_DRAWER_MARGIN: Dp = Dp(64.0);

/// Scrim color obscuring content while the drawer is open, 0xAARRGGBB.
pub const DEFAULT_SCRIM_COLOR: u32 = 0x9900_0000;

/// Delay between an edge touch and the peek preview.
pub const PEEK_DELAY_MS: i64 = 160;

/// Minimum release speed detected as a fling.
pub const MIN_FLING_VELOCITY: Dp = Dp(400.0);

/// Policy restricting user-driven (but not programmatic) open/close.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockMode {
    /// The drawer responds to gestures normally.
    Unlocked,
    /// The user may not open the drawer; the app still can.
    LockedClosed,
    /// The user may not close the drawer; the app still can.
    LockedOpen,
    /// No lock override; only meaningful as a restore marker.
    Undefined,
}

/// Listener for drawer lifecycle events. All methods default to no-ops so
/// implementors override only what they care about.
pub trait DrawerListener {
    /// The drawer's position changed; `offset` slides within 0..1.
    fn on_drawer_slide(&self, _offset: f32) {}
    /// The drawer settled fully open and is interactive.
    fn on_drawer_opened(&self) {}
    /// The drawer settled fully closed.
    fn on_drawer_closed(&self) {}
    /// The gesture motion state changed.
    fn on_drawer_state_changed(&self, _state: DragState) {}
}

/// Shared, ordered listener collection.
///
/// Notification runs most-recently-added first, iterating by index from the
/// end so a listener unregistering itself mid-dispatch neither skips nor
/// duplicates the remaining notifications.
#[derive(Clone, Default)]
pub struct DrawerListeners {
    inner: Rc<RefCell<Vec<Rc<dyn DrawerListener>>>>,
}

impl DrawerListeners {
    pub fn add(&self, listener: Rc<dyn DrawerListener>) {
        self.inner.borrow_mut().push(listener);
    }

    pub fn remove(&self, listener: &Rc<dyn DrawerListener>) {
        let mut list = self.inner.borrow_mut();
        let before = list.len();
        list.retain(|l| !same_listener(l, listener));
        if list.len() == before {
            log::debug!("remove_drawer_listener: listener was not registered");
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    fn for_each_from_end(&self, mut f: impl FnMut(&Rc<dyn DrawerListener>)) {
        let len = self.inner.borrow().len();
        for i in (0..len).rev() {
            let listener = {
                let list = self.inner.borrow();
                if i >= list.len() {
                    continue;
                }
                list[i].clone()
            };
            f(&listener);
        }
    }

    pub(crate) fn dispatch_slide(&self, offset: f32) {
        self.for_each_from_end(|l| l.on_drawer_slide(offset));
    }

    pub(crate) fn dispatch_opened(&self) {
        self.for_each_from_end(|l| l.on_drawer_opened());
    }

    pub(crate) fn dispatch_closed(&self) {
        self.for_each_from_end(|l| l.on_drawer_closed());
    }

    pub(crate) fn dispatch_state_changed(&self, state: DragState) {
        self.for_each_from_end(|l| l.on_drawer_state_changed(state));
    }
}

fn same_listener(a: &Rc<dyn DrawerListener>, b: &Rc<dyn DrawerListener>) -> bool {
    std::ptr::eq(
        Rc::as_ptr(a) as *const (),
        Rc::as_ptr(b) as *const (),
    )
}

/// Construction-time configuration, standing in for declarative attributes.
#[derive(Clone, Copy, Debug)]
pub struct PanelConfig {
    /// Display density used to convert dp defaults to pixels.
    pub density: f32,
    pub min_drawer_margin: Dp,
    pub scrim_color: u32,
    pub layout_direction: LayoutDirection,
    /// Design-preview context: non-exact constraints fall back to magic
    /// sizes instead of failing measurement.
    pub preview_mode: bool,
    /// Experimental: claim the tracked edge even when the drawer stays shut.
    pub allow_edge_lock: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            min_drawer_margin: MIN_DRAWER_MARGIN,
            scrim_color: DEFAULT_SCRIM_COLOR,
            layout_direction: LayoutDirection::Ltr,
            preview_mode: false,
            allow_edge_lock: false,
        }
    }
}

/// A child slot of the container: its layout params plus measured/placed
/// geometry the layout pass maintains.
pub struct Child {
    pub params: ChildParams,
    pub(crate) opaque_background: bool,
    pub(crate) frame: Rect,
    pub(crate) measured: Size,
    pub(crate) visible: bool,
}

pub(crate) struct PanelState {
    pub(crate) preview_mode: bool,
    pub(crate) allow_edge_lock: bool,
    pub(crate) min_drawer_margin: f32,
    pub(crate) scrim_color: u32,
    pub(crate) layout_direction: LayoutDirection,
    pub(crate) lock_mode: LockMode,
    /// Last drag state reported to listeners, for change detection.
    pub(crate) drawer_state: DragState,
    pub(crate) in_layout: bool,
    pub(crate) first_layout: bool,
    pub(crate) needs_layout: bool,
    pub(crate) needs_redraw: bool,
    pub(crate) container_size: Size,
    pub(crate) children: Vec<Child>,
    pub(crate) listeners: DrawerListeners,
    pub(crate) initial_motion: Option<Point>,
    pub(crate) children_canceled_touch: bool,
    pub(crate) child_cancel_requested: bool,
    pub(crate) pending_peek_deadline: Option<i64>,
    pub(crate) deferred_close: bool,
}

/// Single-drawer edge-swipe panel container.
///
/// Holds exactly two children: content at [`CONTENT_INDEX`] and the drawer
/// at [`DRAWER_INDEX`]. The host drives it with `measure`/`layout` passes,
/// pointer events, and per-frame ticks while animations run.
pub struct SideSwipeLayout {
    pub(crate) drag: DragHelper,
    pub(crate) state: PanelState,
}

impl SideSwipeLayout {
    pub fn new(config: PanelConfig) -> Self {
        let mut drag = DragHelper::new(config.density);
        drag.set_min_velocity(MIN_FLING_VELOCITY.to_px(config.density));
        Self {
            drag,
            state: PanelState {
                preview_mode: config.preview_mode,
                allow_edge_lock: config.allow_edge_lock,
                min_drawer_margin: config.min_drawer_margin.to_px(config.density),
                scrim_color: config.scrim_color,
                layout_direction: config.layout_direction,
                lock_mode: LockMode::Unlocked,
                drawer_state: DragState::Idle,
                in_layout: false,
                first_layout: true,
                needs_layout: true,
                needs_redraw: false,
                container_size: Size::ZERO,
                children: Vec::new(),
                listeners: DrawerListeners::default(),
                initial_motion: None,
                children_canceled_touch: false,
                child_cancel_requested: false,
                pending_peek_deadline: None,
                deferred_close: false,
            },
        }
    }

    /// Appends a child. Content must be added first, then the drawer; the
    /// count is validated at measure time.
    pub fn add_child(&mut self, params: ChildParams, opaque_background: bool) {
        self.state.children.push(Child {
            params,
            opaque_background,
            frame: Rect::default(),
            measured: Size::ZERO,
            visible: true,
        });
        self.state.request_layout();
    }

    pub fn child_count(&self) -> usize {
        self.state.children.len()
    }

    pub fn child(&self, index: usize) -> Option<&Child> {
        self.state.children.get(index)
    }

    /// Placed frame of the child, valid after a layout pass.
    pub fn child_frame(&self, index: usize) -> Rect {
        self.state
            .children
            .get(index)
            .map(|c| c.frame)
            .unwrap_or_default()
    }

    pub fn child_visible(&self, index: usize) -> bool {
        self.state
            .children
            .get(index)
            .map(|c| c.visible)
            .unwrap_or(false)
    }

    pub fn drawer_params(&self) -> Option<&ChildParams> {
        self.state.children.get(DRAWER_INDEX).map(|c| &c.params)
    }

    /// Current gesture motion state.
    pub fn drawer_drag_state(&self) -> DragState {
        self.drag.current_state()
    }

    // ----- programmatic open/close ------------------------------------

    /// Opens the drawer. Before the first layout pass the state is applied
    /// directly so initial display does not animate a visible slide-in.
    pub fn open_drawer(&mut self, animate: bool) {
        if self.state.children.len() <= DRAWER_INDEX {
            log::warn!("open_drawer called before a drawer child was added");
            return;
        }
        if self.state.first_layout {
            let drawer = &mut self.state.children[DRAWER_INDEX];
            drawer.params.on_screen = 1.0;
            drawer.params.open_state = OpenState::Open;
        } else if animate {
            {
                let drawer = &mut self.state.children[DRAWER_INDEX];
                if drawer.params.open_state != OpenState::Open {
                    drawer.params.open_state = OpenState::Opening;
                }
            }
            let edge = self.state.drawer_edge();
            let frame = self.state.children[DRAWER_INDEX].frame;
            let target = placement::opened_left(
                edge,
                self.state.container_size.width,
                frame.width,
            );
            self.drag
                .animate_to(DRAWER_INDEX, Point::new(target, frame.y), &mut self.state);
        } else {
            self.state.move_drawer_to_offset(1.0);
            self.state.update_drawer_state(DragState::Idle);
            self.state.children[DRAWER_INDEX].visible = true;
        }
        self.state.invalidate();
    }

    /// Closes the drawer, mirroring [`Self::open_drawer`].
    pub fn close_drawer(&mut self, animate: bool) {
        if self.state.children.len() <= DRAWER_INDEX {
            log::warn!("close_drawer called before a drawer child was added");
            return;
        }
        if self.state.first_layout {
            let drawer = &mut self.state.children[DRAWER_INDEX];
            drawer.params.on_screen = 0.0;
            drawer.params.open_state = OpenState::Closed;
        } else if animate {
            {
                let drawer = &mut self.state.children[DRAWER_INDEX];
                if drawer.params.open_state != OpenState::Closed {
                    drawer.params.open_state = OpenState::Closing;
                }
            }
            let edge = self.state.drawer_edge();
            let frame = self.state.children[DRAWER_INDEX].frame;
            let target = placement::closed_left(
                edge,
                self.state.container_size.width,
                frame.width,
            );
            self.drag
                .animate_to(DRAWER_INDEX, Point::new(target, frame.y), &mut self.state);
        } else {
            self.state.move_drawer_to_offset(0.0);
            self.state.update_drawer_state(DragState::Idle);
            self.state.children[DRAWER_INDEX].visible = false;
        }
        self.state.invalidate();
    }

    /// True iff the drawer has settled into its fully open state. For
    /// partial visibility use [`Self::is_drawer_visible`].
    pub fn is_drawer_open(&self) -> bool {
        self.state
            .children
            .get(DRAWER_INDEX)
            .map(|c| c.params.open_state == OpenState::Open)
            .unwrap_or(false)
    }

    /// True if the drawer is at all on screen: peeking, fully extended, or
    /// anywhere in between.
    pub fn is_drawer_visible(&self) -> bool {
        self.state
            .children
            .get(DRAWER_INDEX)
            .map(|c| c.params.on_screen > 0.0)
            .unwrap_or(false)
    }

    // ----- lock mode --------------------------------------------------

    /// Locking a drawer open or closed implicitly opens or closes it.
    pub fn set_drawer_lock_mode(&mut self, mode: LockMode) {
        if self.state.lock_mode == mode {
            return;
        }
        self.state.lock_mode = mode;
        if mode != LockMode::Unlocked {
            // Cancel interaction in progress.
            self.drag.cancel();
            self.state.remove_peek_callbacks();
        }
        match mode {
            LockMode::LockedOpen => self.open_drawer(true),
            LockMode::LockedClosed => self.close_drawer(true),
            _ => {}
        }
    }

    pub fn drawer_lock_mode(&self) -> LockMode {
        self.state.lock_mode
    }

    // ----- configuration ----------------------------------------------

    pub fn set_min_drawer_margin(&mut self, margin_px: f32) {
        if self.state.min_drawer_margin != margin_px {
            self.state.min_drawer_margin = margin_px;
            self.state.invalidate();
            self.state.request_layout();
        }
    }

    pub fn min_drawer_margin(&self) -> f32 {
        self.state.min_drawer_margin
    }

    /// Color used for the scrim obscuring content, in 0xAARRGGBB.
    pub fn set_scrim_color(&mut self, color: u32) {
        self.state.scrim_color = color;
        self.state.invalidate();
    }

    pub fn scrim_color(&self) -> u32 {
        self.state.scrim_color
    }

    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        if self.state.layout_direction != direction {
            self.state.layout_direction = direction;
            self.state.request_layout();
        }
    }

    // ----- listeners ---------------------------------------------------

    pub fn add_drawer_listener(&mut self, listener: Rc<dyn DrawerListener>) {
        self.state.listeners.add(listener);
    }

    pub fn remove_drawer_listener(&mut self, listener: &Rc<dyn DrawerListener>) {
        self.state.listeners.remove(listener);
    }

    /// Shared handle to the listener list, usable from inside callbacks.
    pub fn listeners(&self) -> DrawerListeners {
        self.state.listeners.clone()
    }

    // ----- pointer input -----------------------------------------------

    /// Whether the container should claim the event stream instead of
    /// letting children see it.
    pub fn should_intercept_pointer(&mut self, event: &PointerEvent) -> bool {
        let intercept_for_drag = self.drag.should_intercept(event, &mut self.state);
        let mut intercept_for_tap = false;

        match event.kind {
            PointerEventKind::Down => {
                self.state.initial_motion = Some(event.position);
                if self.scrim_opacity() > 0.0 {
                    let child = self.drag.find_top_child_under(
                        event.position.x,
                        event.position.y,
                        &self.state,
                    );
                    if child == Some(CONTENT_INDEX) {
                        intercept_for_tap = true;
                    }
                }
                self.state.children_canceled_touch = false;
            }
            PointerEventKind::Move => {
                // Crossing the slop kills the delayed edge peek.
                if self.drag.check_touch_slop() {
                    self.state.remove_peek_callbacks();
                }
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                self.close_drawers(true);
                self.state.children_canceled_touch = false;
            }
        }

        self.run_deferred_close();

        intercept_for_drag
            || intercept_for_tap
            || self.state.has_peeking_drawer()
            || self.state.children_canceled_touch
    }

    /// Handles an event the container owns. Always consumes it.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        self.drag.process_event(event, &mut self.state);

        match event.kind {
            PointerEventKind::Down => {
                self.state.initial_motion = Some(event.position);
                self.state.children_canceled_touch = false;
            }
            PointerEventKind::Up => {
                let mut peeking_only = true;
                let touched = self.drag.find_top_child_under(
                    event.position.x,
                    event.position.y,
                    &self.state,
                );
                if touched == Some(CONTENT_INDEX) {
                    if let Some(down) = self.state.initial_motion {
                        let dx = event.position.x - down.x;
                        let dy = event.position.y - down.y;
                        let slop = self.drag.touch_slop();
                        if dx * dx + dy * dy < slop * slop {
                            // A tap closes a dimmed open drawer, unless it
                            // is locked open.
                            peeking_only = self.is_drawer_open()
                                && self.state.lock_mode == LockMode::LockedOpen;
                        }
                    }
                }
                self.close_drawers(peeking_only);
            }
            PointerEventKind::Cancel => {
                self.state.children_canceled_touch = false;
            }
            PointerEventKind::Move => {}
        }

        self.run_deferred_close();
        true
    }

    /// Per-frame tick: fires a due edge peek and advances settling. Returns
    /// true while another frame is needed.
    pub fn on_frame(&mut self, now_ms: i64) -> bool {
        if let Some(deadline) = self.state.pending_peek_deadline {
            if now_ms >= deadline {
                self.state.pending_peek_deadline = None;
                self.peek_drawer();
            }
        }
        let settling = self.drag.continue_settling(now_ms, &mut self.state);
        if settling {
            self.state.invalidate();
        }
        settling || self.state.pending_peek_deadline.is_some()
    }

    /// Back-navigation: closes a visible, unlocked drawer. Returns whether
    /// the event was consumed.
    pub fn handle_back(&mut self) -> bool {
        let visible = self.is_drawer_visible();
        if visible && self.state.gestures_enabled() {
            self.close_drawer(true);
        }
        visible
    }

    // ----- host signalling ---------------------------------------------

    /// True once if a redraw was requested since the last call.
    pub fn take_needs_redraw(&mut self) -> bool {
        std::mem::take(&mut self.state.needs_redraw)
    }

    /// True once if a relayout was requested since the last call.
    pub fn take_needs_layout(&mut self) -> bool {
        std::mem::take(&mut self.state.needs_layout)
    }

    /// True once if children should receive a synthetic touch cancel (the
    /// drawer claimed the gesture, e.g. on peek).
    pub fn take_child_cancel_request(&mut self) -> bool {
        std::mem::take(&mut self.state.child_cancel_requested)
    }

    // ----- internals ----------------------------------------------------

    /// Animates the drawer shut. With `peeking_only`, only a peeking drawer
    /// is dismissed and a committed open state stays put.
    fn close_drawers(&mut self, peeking_only: bool) {
        let mut needs_invalidate = false;
        if self.state.children.len() > DRAWER_INDEX {
            let is_peeking = self.state.children[DRAWER_INDEX].params.is_peeking;
            if !(peeking_only && !is_peeking) {
                let edge = self.state.drawer_edge();
                let frame = self.state.children[DRAWER_INDEX].frame;
                let closed_x = placement::closed_left(
                    edge,
                    self.state.container_size.width,
                    frame.width,
                );
                needs_invalidate |= self.drag.animate_to(
                    DRAWER_INDEX,
                    Point::new(closed_x, frame.y),
                    &mut self.state,
                );
                self.state.children[DRAWER_INDEX].params.is_peeking = false;
            }
        }
        self.state.remove_peek_callbacks();
        if needs_invalidate {
            self.state.invalidate();
        }
    }

    /// Slides the drawer partially into view after a dwell on the edge.
    /// Only ever makes the drawer more visible, and never under a lock.
    fn peek_drawer(&mut self) {
        if self.state.children.len() <= DRAWER_INDEX {
            return;
        }
        let peek_distance = self.drag.edge_size();
        let edge = self.state.drawer_edge();
        let frame = self.state.children[DRAWER_INDEX].frame;
        let target_left = match edge {
            HorizontalEdge::Left => -frame.width + peek_distance,
            HorizontalEdge::Right => self.state.container_size.width - peek_distance,
        };
        let additive = match edge {
            HorizontalEdge::Left => frame.x < target_left,
            HorizontalEdge::Right => frame.x > target_left,
        };
        if additive && self.state.gestures_enabled() {
            self.drag.animate_to(
                DRAWER_INDEX,
                Point::new(target_left, frame.y),
                &mut self.state,
            );
            self.state.children[DRAWER_INDEX].params.is_peeking = true;
            self.state.invalidate();
            self.state.cancel_child_touch();
        }
    }

    fn run_deferred_close(&mut self) {
        if std::mem::take(&mut self.state.deferred_close) {
            self.close_drawer(true);
        }
    }
}

impl PanelState {
    pub(crate) fn drawer_edge(&self) -> HorizontalEdge {
        self.children
            .get(DRAWER_INDEX)
            .and_then(|c| c.params.gravity)
            .map(|g| g.edge.resolve(self.layout_direction))
            .unwrap_or(HorizontalEdge::Left)
    }

    /// Whether user-driven open/close is currently allowed.
    pub(crate) fn gestures_enabled(&self) -> bool {
        self.lock_mode == LockMode::Unlocked
    }

    pub(crate) fn has_peeking_drawer(&self) -> bool {
        self.children
            .get(DRAWER_INDEX)
            .map(|c| c.params.is_peeking)
            .unwrap_or(false)
    }

    pub(crate) fn request_layout(&mut self) {
        // Re-entrant requests during a layout pass are dropped, not queued.
        if !self.in_layout {
            self.needs_layout = true;
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    pub(crate) fn remove_peek_callbacks(&mut self) {
        self.pending_peek_deadline = None;
    }

    /// Asks the host to deliver a synthetic cancel to the other children so
    /// they do not also respond to the claimed touch sequence.
    pub(crate) fn cancel_child_touch(&mut self) {
        if !self.children_canceled_touch {
            self.child_cancel_requested = true;
            self.children_canceled_touch = true;
        }
    }

    /// Updates the drawer's continuous offset, notifying listeners exactly
    /// once per distinct value.
    pub(crate) fn set_drawer_view_offset(&mut self, offset: f32) {
        let Some(drawer) = self.children.get_mut(DRAWER_INDEX) else {
            return;
        };
        if offset == drawer.params.on_screen {
            return;
        }
        drawer.params.on_screen = offset;
        self.listeners.dispatch_slide(offset);
    }

    pub(crate) fn drawer_view_offset(&self) -> f32 {
        self.children
            .get(DRAWER_INDEX)
            .map(|c| c.params.on_screen)
            .unwrap_or(0.0)
    }

    /// Jumps the drawer to `offset` without animating, keeping the placed
    /// frame consistent with the new offset.
    pub(crate) fn move_drawer_to_offset(&mut self, offset: f32) {
        let edge = self.drawer_edge();
        let Some(drawer) = self.children.get_mut(DRAWER_INDEX) else {
            return;
        };
        let width = drawer.frame.width;
        let dx = width * offset - width * drawer.params.on_screen;
        drawer.frame.x += match edge {
            HorizontalEdge::Left => dx,
            HorizontalEdge::Right => -dx,
        };
        self.set_drawer_view_offset(offset);
    }

    /// Resolves the drawer's terminal states when the gesture tracker goes
    /// idle, then fans out motion-state changes.
    pub(crate) fn update_drawer_state(&mut self, active_state: DragState) {
        if active_state == DragState::Idle {
            let offset = self.drawer_view_offset();
            if offset == 0.0 {
                self.dispatch_on_drawer_closed();
            } else if offset == 1.0 {
                self.dispatch_on_drawer_opened();
            }
        }

        if active_state != self.drawer_state {
            self.drawer_state = active_state;
            self.listeners.dispatch_state_changed(active_state);
        }
    }

    fn dispatch_on_drawer_closed(&mut self) {
        let Some(drawer) = self.children.get_mut(DRAWER_INDEX) else {
            return;
        };
        // Fires once per transition into closed.
        if drawer.params.open_state != OpenState::Closed {
            drawer.params.open_state = OpenState::Closed;
            self.listeners.dispatch_closed();
        }
    }

    fn dispatch_on_drawer_opened(&mut self) {
        let Some(drawer) = self.children.get_mut(DRAWER_INDEX) else {
            return;
        };
        // Fires once per transition into open.
        if drawer.params.open_state != OpenState::Open {
            drawer.params.open_state = OpenState::Open;
            self.listeners.dispatch_opened();
        }
    }
}

impl DragCallback for PanelState {
    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_frame(&self, child: usize) -> Rect {
        self.children.get(child).map(|c| c.frame).unwrap_or_default()
    }

    fn container_size(&self) -> Size {
        self.container_size
    }

    fn try_capture_child(&mut self, child: usize, _pointer: PointerId) -> bool {
        // Only the drawer is ever draggable, and only when unlocked.
        child == DRAWER_INDEX && self.gestures_enabled()
    }

    fn clamp_horizontal(&self, child: usize, left: f32, _dx: f32) -> f32 {
        if child != DRAWER_INDEX {
            return left;
        }
        let width = self.child_frame(child).width;
        placement::clamp_left(self.drawer_edge(), self.container_size.width, width, left)
    }

    fn clamp_vertical(&self, child: usize, _top: f32, _dy: f32) -> f32 {
        // The drawer only travels horizontally.
        self.child_frame(child).y
    }

    fn horizontal_drag_range(&self, child: usize) -> f32 {
        if child == DRAWER_INDEX {
            self.child_frame(child).width
        } else {
            0.0
        }
    }

    fn on_drag_state_changed(&mut self, state: DragState) {
        self.update_drawer_state(state);
    }

    fn on_position_changed(&mut self, child: usize, left: f32, top: f32, _dx: f32, _dy: f32) {
        if child != DRAWER_INDEX {
            return;
        }
        let edge = self.drawer_edge();
        let container_width = self.container_size.width;
        let Some(drawer) = self.children.get_mut(DRAWER_INDEX) else {
            return;
        };
        drawer.frame.x = left;
        drawer.frame.y = top;
        // This reverses the positioning applied during layout.
        let offset =
            placement::offset_for_left(edge, container_width, drawer.frame.width, left);
        drawer.visible = offset > 0.0;
        self.set_drawer_view_offset(offset);
        self.invalidate();
    }

    fn on_captured(&mut self, child: usize, _pointer: PointerId) {
        if let Some(captured) = self.children.get_mut(child) {
            captured.params.is_peeking = false;
        }
        self.remove_peek_callbacks();
    }

    fn on_released(&mut self, child: usize, velocity_x: f32, _velocity_y: f32) -> Point {
        let offset = self.drawer_view_offset();
        let frame = self.child_frame(child);
        let container_width = self.container_size.width;

        // Velocity toward an edge wins; a dead release falls back to
        // whichever side of halfway the drawer sits on.
        let left = match self.drawer_edge() {
            HorizontalEdge::Left => {
                if velocity_x > 0.0 || (velocity_x == 0.0 && offset > 0.5) {
                    0.0
                } else {
                    -frame.width
                }
            }
            HorizontalEdge::Right => {
                if velocity_x < 0.0 || (velocity_x == 0.0 && offset > 0.5) {
                    container_width - frame.width
                } else {
                    container_width
                }
            }
        };
        self.invalidate();
        Point::new(left, frame.y)
    }

    fn on_edge_touched(&mut self, _edge: HorizontalEdge, _pointer: PointerId, time_ms: i64) {
        self.pending_peek_deadline = Some(time_ms + PEEK_DELAY_MS);
    }

    fn on_edge_drag_started(&mut self, edge: HorizontalEdge, _pointer: PointerId) -> Option<usize> {
        if self.drawer_edge() == edge && self.gestures_enabled() {
            Some(DRAWER_INDEX)
        } else {
            None
        }
    }

    fn on_edge_lock(&mut self, _edge: HorizontalEdge) -> bool {
        if self.allow_edge_lock {
            if !self
                .children
                .get(DRAWER_INDEX)
                .map(|c| c.params.open_state == OpenState::Open)
                .unwrap_or(false)
            {
                self.deferred_close = true;
            }
            true
        } else {
            false
        }
    }
}
