use egui::{Pos2, Vec2};

use crate::state::{Placement, OVERLAY_SIZE};

/// One pointer interaction in canvas-local coordinates. Mouse and touch input
/// are both translated into this stream, so they share a single set of
/// placement semantics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Press(Pos2),
    Move(Pos2),
    Release,
}

/// Exists only for the duration of a drag gesture.
#[derive(Clone, Copy, Debug)]
struct DragState {
    grab: Vec2,
}

/// Idle/Dragging state machine that owns overlay repositioning.
///
/// A press strictly inside the overlay's bounding square starts a drag and
/// records the grab offset; every move while dragging recomputes
/// `placement = pointer - grab`; release returns to idle unconditionally.
#[derive(Default)]
pub struct PlacementController {
    drag: Option<DragState>,
}

impl PlacementController {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Feeds one gesture event through the state machine. Returns true when
    /// the placement changed.
    pub fn handle(
        &mut self,
        event: GestureEvent,
        placement: &mut Placement,
        has_overlay: bool,
    ) -> bool {
        match event {
            GestureEvent::Press(pos) => {
                if has_overlay && hit_test(*placement, pos) {
                    self.drag = Some(DragState {
                        grab: Vec2::new(pos.x - placement.x, pos.y - placement.y),
                    });
                }
                false
            }
            GestureEvent::Move(pos) => {
                let Some(drag) = self.drag else {
                    return false;
                };
                let next = Placement {
                    x: pos.x - drag.grab.x,
                    y: pos.y - drag.grab.y,
                };
                let changed = next != *placement;
                *placement = next;
                changed
            }
            GestureEvent::Release => {
                self.drag = None;
                false
            }
        }
    }
}

/// Strictly inside the bounding square; a press exactly on an edge does not
/// start a drag. Also used for the hover cursor so both agree on boundaries.
pub fn hit_test(placement: Placement, pos: Pos2) -> bool {
    pos.x > placement.x
        && pos.x < placement.x + OVERLAY_SIZE
        && pos.y > placement.y
        && pos.y < placement.y + OVERLAY_SIZE
}

#[cfg(test)]
mod tests {
    use egui::Pos2;

    use super::{hit_test, GestureEvent, PlacementController};
    use crate::state::{Placement, INITIAL_PLACEMENT, OVERLAY_SIZE};

    fn press(x: f32, y: f32) -> GestureEvent {
        GestureEvent::Press(Pos2::new(x, y))
    }

    fn moved(x: f32, y: f32) -> GestureEvent {
        GestureEvent::Move(Pos2::new(x, y))
    }

    #[test]
    fn drag_scenario_moves_overlay_by_grab_offset() {
        let mut controller = PlacementController::default();
        let mut placement = INITIAL_PLACEMENT;

        controller.handle(press(250.0, 250.0), &mut placement, true);
        assert!(controller.is_dragging());

        assert!(controller.handle(moved(400.0, 400.0), &mut placement, true));
        assert_eq!(placement, Placement { x: 370.0, y: 370.0 });

        controller.handle(GestureEvent::Release, &mut placement, true);
        assert!(!controller.is_dragging());

        assert!(!controller.handle(moved(100.0, 100.0), &mut placement, true));
        assert_eq!(placement, Placement { x: 370.0, y: 370.0 });
    }

    #[test]
    fn placement_update_law_holds_across_a_move_sequence() {
        let mut controller = PlacementController::default();
        let mut placement = Placement { x: 50.0, y: 60.0 };

        controller.handle(press(80.0, 100.0), &mut placement, true);
        let grab = (80.0 - 50.0, 100.0 - 60.0);

        for (x, y) in [(90.0, 110.0), (10.0, 700.0), (-40.0, 5.0), (300.0, 300.0)] {
            controller.handle(moved(x, y), &mut placement, true);
            assert_eq!(placement, Placement { x: x - grab.0, y: y - grab.1 });
        }
    }

    #[test]
    fn hit_test_is_strict_on_all_four_edges() {
        let placement = Placement { x: 220.0, y: 220.0 };
        let inside = |x, y| hit_test(placement, Pos2::new(x, y));

        assert!(inside(250.0, 250.0));
        assert!(!inside(220.0, 250.0));
        assert!(!inside(220.0 + OVERLAY_SIZE, 250.0));
        assert!(!inside(250.0, 220.0));
        assert!(!inside(250.0, 220.0 + OVERLAY_SIZE));
    }

    #[test]
    fn edge_press_does_not_start_a_drag() {
        let mut controller = PlacementController::default();
        let mut placement = Placement { x: 220.0, y: 220.0 };

        controller.handle(press(220.0, 250.0), &mut placement, true);
        assert!(!controller.is_dragging());

        controller.handle(press(220.0 + OVERLAY_SIZE, 250.0), &mut placement, true);
        assert!(!controller.is_dragging());

        controller.handle(press(221.0, 250.0), &mut placement, true);
        assert!(controller.is_dragging());
    }

    #[test]
    fn press_without_overlay_never_starts_a_drag() {
        let mut controller = PlacementController::default();
        let mut placement = INITIAL_PLACEMENT;

        controller.handle(press(250.0, 250.0), &mut placement, false);
        assert!(!controller.is_dragging());
        assert!(!controller.handle(moved(400.0, 400.0), &mut placement, false));
        assert_eq!(placement, INITIAL_PLACEMENT);
    }

    #[test]
    fn overlay_may_be_dragged_off_canvas() {
        let mut controller = PlacementController::default();
        let mut placement = INITIAL_PLACEMENT;

        controller.handle(press(230.0, 230.0), &mut placement, true);
        controller.handle(moved(-100.0, -100.0), &mut placement, true);
        assert_eq!(placement, Placement { x: -110.0, y: -110.0 });
    }
}
