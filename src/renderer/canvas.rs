//! Draws balls, walls and the draft wall onto a 2D canvas

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{HIGHLIGHT_FRACTION, WALL_WIDTH};
use crate::sim::{Ball, SimState, Wall};

/// Translucent clear that leaves motion blur behind fast balls
const FADE_FILL: &str = "rgba(0, 0, 0, 0.2)";
const CONTAINER_STROKE: &str = "rgba(255, 255, 255, 0.2)";
const WALL_STROKE: &str = "rgba(255, 255, 255, 0.7)";
const DRAFT_STROKE: &str = "rgba(255, 255, 255, 0.5)";
const SHADE_STOP: &str = "rgba(0, 0, 0, 0.8)";
const HIGHLIGHT_FILL: &str = "rgba(255, 255, 255, 0.3)";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Draw one frame
    pub fn render(&self, sim: &SimState, draft: Option<(Vec2, Vec2)>) -> Result<(), JsValue> {
        let bounds = sim.bounds();
        let (w, h) = (bounds.x as f64, bounds.y as f64);

        self.ctx.set_fill_style_str(FADE_FILL);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        self.ctx.set_stroke_style_str(CONTAINER_STROKE);
        self.ctx.set_line_width(2.0);
        self.ctx.stroke_rect(0.0, 0.0, w, h);

        for wall in sim.walls() {
            self.draw_wall(wall, WALL_STROKE);
        }

        for ball in sim.balls() {
            self.draw_ball(ball)?;
        }

        if let Some((start, end)) = draft {
            self.draw_wall(&Wall::new(start, end), DRAFT_STROKE);
        }

        Ok(())
    }

    fn draw_wall(&self, wall: &Wall, stroke: &str) {
        self.ctx.begin_path();
        self.ctx.move_to(wall.start.x as f64, wall.start.y as f64);
        self.ctx.line_to(wall.end.x as f64, wall.end.y as f64);
        self.ctx.set_stroke_style_str(stroke);
        self.ctx.set_line_width(WALL_WIDTH as f64);
        self.ctx.stroke();
    }

    fn draw_ball(&self, ball: &Ball) -> Result<(), JsValue> {
        let r = ball.radius;
        if r <= 0.0 {
            return Ok(());
        }

        let spot = ball.highlight_center();

        let gradient = self.ctx.create_radial_gradient(
            spot.x as f64,
            spot.y as f64,
            0.0,
            ball.pos.x as f64,
            ball.pos.y as f64,
            (r * 2.0) as f64,
        )?;
        gradient.add_color_stop(0.0, &ball.color.to_css())?;
        gradient.add_color_stop(1.0, SHADE_STOP)?;

        self.ctx.begin_path();
        self.ctx
            .arc(ball.pos.x as f64, ball.pos.y as f64, r as f64, 0.0, std::f64::consts::TAU)?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.set_global_alpha(ball.opacity as f64);
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);

        self.ctx.begin_path();
        self.ctx.arc(
            spot.x as f64,
            spot.y as f64,
            (r * HIGHLIGHT_FRACTION) as f64,
            0.0,
            std::f64::consts::TAU,
        )?;
        self.ctx.set_fill_style_str(HIGHLIGHT_FILL);
        self.ctx.fill();

        Ok(())
    }
}
