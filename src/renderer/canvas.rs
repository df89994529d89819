//! Canvas 2D backend

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::Shape;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Size the canvas and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", CANVAS_WIDTH));
        let _ = style.set_property("height", &format!("{}px", CANVAS_HEIGHT));

        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    /// Clear and draw a frame
    pub fn draw(&self, shapes: &[Shape]) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);

        for shape in shapes {
            match shape {
                Shape::Rect { rect, color } => {
                    let size = rect.size();
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(
                        rect.min.x as f64,
                        rect.min.y as f64,
                        size.x as f64,
                        size.y as f64,
                    );
                }
                Shape::RectOutline { rect, width, color } => {
                    let size = rect.size();
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*width as f64);
                    ctx.stroke_rect(
                        rect.min.x as f64,
                        rect.min.y as f64,
                        size.x as f64,
                        size.y as f64,
                    );
                }
                Shape::Polygon { points, color } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    ctx.begin_path();
                    ctx.move_to(first.x as f64, first.y as f64);
                    for p in rest {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    ctx.close_path();
                    ctx.set_fill_style_str(color);
                    ctx.fill();
                }
                Shape::Circle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    ctx.set_fill_style_str(color);
                    ctx.fill();
                }
                Shape::Ring {
                    center,
                    radius,
                    width,
                    color,
                } => {
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
                Shape::Ellipse {
                    center,
                    radii,
                    start,
                    end,
                    color,
                } => {
                    ctx.begin_path();
                    let _ = ctx.ellipse(
                        center.x as f64,
                        center.y as f64,
                        radii.x as f64,
                        radii.y as f64,
                        0.0,
                        *start as f64,
                        *end as f64,
                    );
                    ctx.set_fill_style_str(color);
                    ctx.fill();
                }
                Shape::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
            }
        }
    }
}
