//! 2D canvas render sink

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::GROUND_MARGIN;
use crate::sim::{Rect, Snapshot};
use crate::ui;

const DINO_COLOR: &str = "#555";
const OBSTACLE_COLOR: &str = "#e74c3c";
const TEXT_COLOR: &str = "black";
const FOOTER_COLOR: &str = "#999";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn fill_rect(&self, rect: &Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn text(&self, text: &str, x: f64, y: f64, size_px: u32, align: &str, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_text_align(align);
        self.ctx.set_font(&format!("{size_px}px Arial"));
        let _ = self.ctx.fill_text(text, x, y);
    }

    /// Draw one frame
    pub fn render(&self, snapshot: &Snapshot, last_action_label: &str) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.width, self.height);

        // Ground
        let ground = self.height - GROUND_MARGIN as f64;
        ctx.begin_path();
        ctx.move_to(0.0, ground);
        ctx.line_to(self.width, ground);
        ctx.stroke();

        self.fill_rect(&snapshot.dino, DINO_COLOR);
        // Obstacles stay visible after a game over
        for obstacle in &snapshot.obstacles {
            self.fill_rect(obstacle, OBSTACLE_COLOR);
        }

        if let Some(score) = ui::score_text(snapshot) {
            self.text(&score, 10.0, 30.0, 20, "left", TEXT_COLOR);
        }

        let center_x = self.width / 2.0;
        for line in ui::overlay_lines(snapshot) {
            self.text(
                &line.text,
                center_x,
                line.y as f64,
                line.style.size_px(),
                "center",
                TEXT_COLOR,
            );
        }

        self.text(
            &ui::last_action_text(last_action_label),
            10.0,
            self.height - 20.0,
            14,
            "left",
            FOOTER_COLOR,
        );
    }
}
