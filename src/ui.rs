//! Host-side interaction state
//!
//! Tracks which wall tool is active and where the pointer is, and turns
//! pointer events into simulation calls. Drawing and erasing exclude each
//! other here; the simulation itself does not care.

use glam::Vec2;

use crate::sim::SimState;

/// Active wall tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Idle,
    Drawing,
    Erasing,
}

/// Pointer and tool state owned by the host
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub tool: ToolMode,
    pub pointer: Vec2,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the draw tool (turns erase off)
    pub fn toggle_draw(&mut self, sim: &mut SimState) {
        self.tool = if self.tool == ToolMode::Drawing {
            ToolMode::Idle
        } else {
            ToolMode::Drawing
        };
        sim.cancel_wall_draw();
        log::info!("Tool: {:?}", self.tool);
    }

    /// Toggle the erase tool (turns draw off)
    pub fn toggle_erase(&mut self, sim: &mut SimState) {
        self.tool = if self.tool == ToolMode::Erasing {
            ToolMode::Idle
        } else {
            ToolMode::Erasing
        };
        sim.cancel_wall_draw();
        log::info!("Tool: {:?}", self.tool);
    }

    pub fn is_drawing(&self) -> bool {
        self.tool == ToolMode::Drawing
    }

    pub fn is_erasing(&self) -> bool {
        self.tool == ToolMode::Erasing
    }

    pub fn pointer_down(&mut self, sim: &mut SimState, pos: Vec2) {
        self.pointer = pos;
        if self.is_drawing() {
            sim.begin_wall_draw(pos.x, pos.y);
        }
    }

    /// Returns true if a wall was created
    pub fn pointer_up(&mut self, sim: &mut SimState, pos: Vec2) -> bool {
        self.pointer = pos;
        self.is_drawing() && sim.end_wall_draw(pos.x, pos.y)
    }

    pub fn pointer_move(&mut self, sim: &mut SimState, pos: Vec2) {
        self.pointer = pos;
        if self.is_erasing() {
            sim.erase_walls_near(pos.x, pos.y);
        }
    }

    /// Segment from the drag start to the pointer while a wall is being drawn
    pub fn draft_segment(&self, sim: &SimState) -> Option<(Vec2, Vec2)> {
        if !self.is_drawing() {
            return None;
        }
        sim.wall_draft().map(|start| (start, self.pointer))
    }
}

/// Status text for the mode display
pub fn mode_label(tool: ToolMode, running: bool, gravity: bool) -> String {
    let base = match (running, tool) {
        (false, _) => "Paused",
        (true, ToolMode::Idle) => "Normal",
        (true, ToolMode::Drawing) => "Drawing Walls",
        (true, ToolMode::Erasing) => "Erasing Walls",
    };

    let mut label = base.to_string();

    if gravity {
        label.push_str(" + Gravity");
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimConfig;

    fn sim() -> SimState {
        SimState::new(SimConfig {
            width: 200.0,
            height: 200.0,
            ball_count: 0,
            ..Default::default()
        })
    }

    #[test]
    fn test_tools_are_mutually_exclusive() {
        let mut sim = sim();
        let mut controls = Controls::new();

        controls.toggle_draw(&mut sim);
        assert!(controls.is_drawing());

        controls.toggle_erase(&mut sim);
        assert!(controls.is_erasing());
        assert!(!controls.is_drawing());

        controls.toggle_draw(&mut sim);
        assert!(controls.is_drawing());
        assert!(!controls.is_erasing());

        controls.toggle_draw(&mut sim);
        assert_eq!(controls.tool, ToolMode::Idle);
    }

    #[test]
    fn test_drag_creates_wall_only_while_drawing() {
        let mut sim = sim();
        let mut controls = Controls::new();

        controls.pointer_down(&mut sim, Vec2::new(10.0, 10.0));
        assert!(!controls.pointer_up(&mut sim, Vec2::new(100.0, 10.0)));
        assert_eq!(sim.wall_count(), 0);

        controls.toggle_draw(&mut sim);
        controls.pointer_down(&mut sim, Vec2::new(10.0, 10.0));
        controls.pointer_move(&mut sim, Vec2::new(60.0, 10.0));
        assert_eq!(
            controls.draft_segment(&sim),
            Some((Vec2::new(10.0, 10.0), Vec2::new(60.0, 10.0)))
        );
        assert!(controls.pointer_up(&mut sim, Vec2::new(100.0, 10.0)));
        assert_eq!(sim.wall_count(), 1);
        assert!(controls.draft_segment(&sim).is_none());
    }

    #[test]
    fn test_move_erases_only_while_erasing() {
        let mut sim = sim();
        sim.begin_wall_draw(0.0, 50.0);
        sim.end_wall_draw(100.0, 50.0);
        let mut controls = Controls::new();

        controls.pointer_move(&mut sim, Vec2::new(50.0, 52.0));
        assert_eq!(sim.wall_count(), 1);

        controls.toggle_erase(&mut sim);
        controls.pointer_move(&mut sim, Vec2::new(50.0, 52.0));
        assert_eq!(sim.wall_count(), 0);
    }

    #[test]
    fn test_mode_label() {
        assert_eq!(mode_label(ToolMode::Idle, true, false), "Normal");
        assert_eq!(mode_label(ToolMode::Drawing, true, false), "Drawing Walls");
        assert_eq!(mode_label(ToolMode::Erasing, true, true), "Erasing Walls + Gravity");
        assert_eq!(mode_label(ToolMode::Drawing, false, true), "Paused + Gravity");
    }
}
