//! Pointer tracking and listener bookkeeping.
//!
//! The host owns the real event listeners; the core decides which ones are
//! attached at any time and hands back [`ListenerChanges`] to apply.

use crate::config::CoordinateSpace;
use crate::vector::Vector2D;

/// Host listeners the engine may ask to attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    Resize,
    PointerEnter,
    PointerLeave,
    PointerMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerChange {
    Attach(ListenerKind),
    Detach(ListenerKind),
}

pub const MAX_LISTENERS: usize = 4;

pub type ListenerChanges = heapless::Vec<ListenerChange, MAX_LISTENERS>;

/// Which listeners are currently attached. Each kind is recorded at most once.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    attached: heapless::Vec<ListenerKind, MAX_LISTENERS>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.attached.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Record `kind` as attached, pushing the change if it was not already.
    pub fn attach(&mut self, kind: ListenerKind, changes: &mut ListenerChanges) {
        if self.is_attached(kind) {
            return;
        }
        // Capacity covers every kind, so neither push can fail.
        let _ = self.attached.push(kind);
        let _ = changes.push(ListenerChange::Attach(kind));
    }

    pub fn detach(&mut self, kind: ListenerKind, changes: &mut ListenerChanges) {
        if let Some(index) = self.attached.iter().position(|k| *k == kind) {
            self.attached.swap_remove(index);
            let _ = changes.push(ListenerChange::Detach(kind));
        }
    }

    /// Detach everything, in attachment order.
    pub fn detach_all(&mut self, changes: &mut ListenerChanges) {
        for kind in self.attached.iter() {
            let _ = changes.push(ListenerChange::Detach(*kind));
        }
        self.attached.clear();
    }
}

/// Client coordinates of a pointer event, before mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter,
    Move(ClientPoint),
    Leave,
}

/// Geometry needed to turn client coordinates into simulation coordinates:
/// the surface's on-screen rectangle and its backing-store size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMapping {
    pub left: f64,
    pub top: f64,
    pub css_width: f64,
    pub css_height: f64,
    pub backing_width: f64,
    pub backing_height: f64,
    pub space: CoordinateSpace,
}

impl SurfaceMapping {
    /// `None` while the surface has no on-screen or backing size.
    pub fn to_simulation(&self, point: ClientPoint) -> Option<Vector2D> {
        if self.css_width <= 0.0 || self.css_height <= 0.0 {
            return None;
        }
        let scale_x = self.backing_width / self.css_width;
        let scale_y = self.backing_height / self.css_height;
        let pixels = Vector2D::new((point.x - self.left) * scale_x, (point.y - self.top) * scale_y);

        match self.space {
            CoordinateSpace::DevicePixels => Some(pixels),
            CoordinateSpace::Normalized => {
                if self.backing_width <= 0.0 || self.backing_height <= 0.0 {
                    return None;
                }
                Some(Vector2D::new(
                    pixels.x / self.backing_width,
                    pixels.y / self.backing_height,
                ))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerPhase {
    #[default]
    Idle,
    Tracking,
}

/// Tracks whether the pointer is over the surface and where.
#[derive(Debug, Clone, Default)]
pub struct PointerController {
    phase: PointerPhase,
    position: Option<Vector2D>,
    listeners: ListenerRegistry,
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    /// Current pointer position, absent unless tracking and a move was seen.
    pub fn position(&self) -> Option<Vector2D> {
        self.position
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Begin waiting for the pointer to enter.
    pub fn activate(&mut self) -> ListenerChanges {
        let mut changes = ListenerChanges::new();
        if self.phase == PointerPhase::Idle {
            self.listeners.attach(ListenerKind::PointerEnter, &mut changes);
        }
        changes
    }

    pub fn handle(&mut self, event: PointerEvent, mapping: Option<&SurfaceMapping>) -> ListenerChanges {
        let mut changes = ListenerChanges::new();

        match (self.phase, event) {
            (PointerPhase::Idle, PointerEvent::Enter) => {
                self.phase = PointerPhase::Tracking;
                self.listeners.attach(ListenerKind::PointerMove, &mut changes);
                self.listeners.detach(ListenerKind::PointerEnter, &mut changes);
                self.listeners.attach(ListenerKind::PointerLeave, &mut changes);
            }
            (PointerPhase::Tracking, PointerEvent::Move(point)) => {
                if let Some(position) = mapping.and_then(|m| m.to_simulation(point)) {
                    self.position = Some(position);
                }
            }
            (PointerPhase::Tracking, PointerEvent::Leave) => {
                self.phase = PointerPhase::Idle;
                self.listeners.detach(ListenerKind::PointerMove, &mut changes);
                self.listeners.detach(ListenerKind::PointerLeave, &mut changes);
                self.listeners.attach(ListenerKind::PointerEnter, &mut changes);
                self.position = None;
            }
            // Stray events for the other phase carry no information.
            _ => {}
        }

        changes
    }

    /// Detach every listener regardless of phase and forget the pointer.
    pub fn shutdown(&mut self) -> ListenerChanges {
        let mut changes = ListenerChanges::new();
        self.listeners.detach_all(&mut changes);
        self.phase = PointerPhase::Idle;
        self.position = None;
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> SurfaceMapping {
        SurfaceMapping {
            left: 10.0,
            top: 20.0,
            css_width: 400.0,
            css_height: 300.0,
            backing_width: 800.0,
            backing_height: 600.0,
            space: CoordinateSpace::DevicePixels,
        }
    }

    fn at(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move(ClientPoint { x, y })
    }

    #[test]
    fn test_registry_attaches_once() {
        let mut registry = ListenerRegistry::new();
        let mut changes = ListenerChanges::new();
        registry.attach(ListenerKind::Resize, &mut changes);
        registry.attach(ListenerKind::Resize, &mut changes);
        assert_eq!(changes.len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_detaches_once() {
        let mut registry = ListenerRegistry::new();
        let mut changes = ListenerChanges::new();
        registry.attach(ListenerKind::Resize, &mut changes);
        changes.clear();
        registry.detach(ListenerKind::Resize, &mut changes);
        registry.detach(ListenerKind::Resize, &mut changes);
        assert_eq!(changes.as_slice(), &[ListenerChange::Detach(ListenerKind::Resize)]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_mapping_scales_to_backing_store() {
        let position = mapping().to_simulation(ClientPoint { x: 110.0, y: 70.0 });
        assert_eq!(position, Some(Vector2D::new(200.0, 100.0)));
    }

    #[test]
    fn test_mapping_normalized() {
        let mapping = SurfaceMapping {
            space: CoordinateSpace::Normalized,
            ..mapping()
        };
        let position = mapping.to_simulation(ClientPoint { x: 210.0, y: 170.0 });
        assert_eq!(position, Some(Vector2D::new(0.5, 0.5)));
    }

    #[test]
    fn test_mapping_zero_size_is_none() {
        let mapping = SurfaceMapping {
            css_width: 0.0,
            ..mapping()
        };
        assert_eq!(mapping.to_simulation(ClientPoint { x: 1.0, y: 1.0 }), None);
    }

    #[test]
    fn test_activate_listens_for_enter() {
        let mut controller = PointerController::new();
        let changes = controller.activate();
        assert_eq!(changes.as_slice(), &[ListenerChange::Attach(ListenerKind::PointerEnter)]);
        assert!(controller.activate().is_empty());
    }

    #[test]
    fn test_enter_swaps_listeners() {
        let mut controller = PointerController::new();
        controller.activate();
        let changes = controller.handle(PointerEvent::Enter, None);
        assert_eq!(
            changes.as_slice(),
            &[
                ListenerChange::Attach(ListenerKind::PointerMove),
                ListenerChange::Detach(ListenerKind::PointerEnter),
                ListenerChange::Attach(ListenerKind::PointerLeave),
            ]
        );
        assert_eq!(controller.phase(), PointerPhase::Tracking);
        assert_eq!(controller.position(), None);
    }

    #[test]
    fn test_enter_move_leave_ends_idle() {
        let mut controller = PointerController::new();
        controller.activate();
        controller.handle(PointerEvent::Enter, None);
        controller.handle(at(110.0, 70.0), Some(&mapping()));
        assert_eq!(controller.position(), Some(Vector2D::new(200.0, 100.0)));
        controller.handle(at(210.0, 70.0), Some(&mapping()));
        assert_eq!(controller.position(), Some(Vector2D::new(400.0, 100.0)));

        let changes = controller.handle(PointerEvent::Leave, None);
        assert_eq!(controller.phase(), PointerPhase::Idle);
        assert_eq!(controller.position(), None);
        assert!(changes.contains(&ListenerChange::Attach(ListenerKind::PointerEnter)));

        controller.handle(at(50.0, 50.0), Some(&mapping()));
        assert_eq!(controller.position(), None);
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut controller = PointerController::new();
        controller.handle(at(110.0, 70.0), Some(&mapping()));
        assert_eq!(controller.position(), None);
        assert_eq!(controller.phase(), PointerPhase::Idle);
    }

    #[test]
    fn test_shutdown_detaches_everything_once() {
        let mut controller = PointerController::new();
        controller.activate();
        controller.handle(PointerEvent::Enter, None);

        let changes = controller.shutdown();
        assert_eq!(changes.len(), 2);
        assert!(changes.contains(&ListenerChange::Detach(ListenerKind::PointerMove)));
        assert!(changes.contains(&ListenerChange::Detach(ListenerKind::PointerLeave)));
        assert!(controller.listeners().is_empty());
        assert!(controller.shutdown().is_empty());
    }
}
