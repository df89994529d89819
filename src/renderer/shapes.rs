//! Shape generation for a frame
//!
//! Turns the game state into a flat, back-to-front list of primitives. The
//! backend only has to know how to fill and stroke these.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_4, FRAC_PI_6, PI, TAU};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, GRASS_HEIGHT};
use crate::sim::{FoodKind, GameState, Rect, Striker, Target};

/// CSS color string
pub type Color = &'static str;

const SKY: Color = "#87CEEB";
const GRASS: Color = "#4CAF50";
const INK: Color = "#333";
const PENALTY_FLASH: Color = "rgba(255,0,0,0.25)";
const SPEED_UP_FLASH: Color = "rgba(255,255,0,0.15)";

/// A 2D drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { rect: Rect, color: Color },
    Polygon { points: Vec<Vec2>, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    /// Filled elliptical arc from `start` to `end` (radians)
    Ellipse { center: Vec2, radii: Vec2, start: f32, end: f32, color: Color },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
    Ring { center: Vec2, radius: f32, width: f32, color: Color },
    RectOutline { rect: Rect, width: f32, color: Color },
}

/// Presentation switches that don't live in the game state
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneOptions {
    pub flashes: bool,
    pub show_strike_zone: bool,
}

/// Build the full frame
pub fn scene(state: &GameState, now_ms: f64, opts: SceneOptions) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(32);
    field(&mut shapes);
    striker(&mut shapes, &state.striker);
    if opts.show_strike_zone {
        shapes.push(Shape::RectOutline {
            rect: state.striker.zone,
            width: 1.0,
            color: "rgba(255,0,0,0.5)",
        });
    }
    if state.target.active {
        food(&mut shapes, &state.target);
    }
    if opts.flashes {
        if now_ms < state.penalty_flash_until {
            shapes.push(overlay(PENALTY_FLASH));
        }
        if now_ms < state.speed_up_flash_until {
            shapes.push(overlay(SPEED_UP_FLASH));
        }
    }
    shapes
}

fn overlay(color: Color) -> Shape {
    Shape::Rect {
        rect: Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
        color,
    }
}

fn field(shapes: &mut Vec<Shape>) {
    shapes.push(overlay(SKY));
    shapes.push(Shape::Rect {
        rect: Rect::new(0.0, CANVAS_HEIGHT - GRASS_HEIGHT, CANVAS_WIDTH, GRASS_HEIGHT),
        color: GRASS,
    });
}

/// Body and head, rotated about the body center by the swing angle
fn striker(shapes: &mut Vec<Shape>, striker: &Striker) {
    let body = striker.body;
    let pivot = (body.min + body.max) * 0.5;
    let rot = Vec2::from_angle(striker.swing_angle.to_radians());
    let turn = |p: Vec2| pivot + rot.rotate(p - pivot);

    let corners = [
        body.min,
        Vec2::new(body.max.x, body.min.y),
        body.max,
        Vec2::new(body.min.x, body.max.y),
    ];
    shapes.push(Shape::Polygon {
        points: corners.iter().map(|&c| turn(c)).collect(),
        color: INK,
    });
    shapes.push(Shape::Circle {
        center: turn(Vec2::new(pivot.x, body.min.y - 10.0)),
        radius: 15.0,
        color: INK,
    });
}

fn food(shapes: &mut Vec<Shape>, target: &Target) {
    let c = target.pos;
    let r = target.kind.radius().max(10.0);
    match target.kind {
        FoodKind::Clock => clock(shapes, c, r),
        FoodKind::GoldenBurger => burger(shapes, c, r, true),
        FoodKind::Burger => burger(shapes, c, r, false),
        FoodKind::Pizza => pizza(shapes, c, r),
        FoodKind::Donut => donut(shapes, c, r),
        FoodKind::Baseball => {
            shapes.push(Shape::Circle { center: c, radius: r, color: "white" });
            shapes.push(Shape::Ring { center: c, radius: r, width: 1.0, color: "red" });
            return;
        }
    }
    // Outline to make it pop
    shapes.push(Shape::Ring {
        center: c,
        radius: r + 6.0,
        width: 1.0,
        color: "rgba(0,0,0,0.12)",
    });
}

fn clock(shapes: &mut Vec<Shape>, c: Vec2, r: f32) {
    shapes.push(Shape::Circle { center: c, radius: r + 4.0, color: "#f0f0f0" });
    shapes.push(Shape::Ring { center: c, radius: r + 4.0, width: 2.0, color: INK });
    for (angle, len) in [(-FRAC_PI_4, r), (FRAC_PI_6, r + 2.0)] {
        shapes.push(Shape::Line {
            from: c,
            to: c + Vec2::from_angle(angle) * len,
            width: 2.0,
            color: INK,
        });
    }
    shapes.push(Shape::Circle { center: c, radius: 2.0, color: INK });
}

/// Bun, lettuce, patty, bun; the golden variant gets a cheese slice
fn burger(shapes: &mut Vec<Shape>, c: Vec2, r: f32, golden: bool) {
    let (bun, lettuce, patty) = if golden {
        ("#ffd700", "#aaff00", "#e6b800")
    } else {
        ("#d2a679", "#6bbf59", "#5c3a21")
    };
    shapes.push(Shape::Ellipse {
        center: c - Vec2::new(0.0, r * 0.2),
        radii: Vec2::new(r + 6.0, r * 0.9),
        start: PI,
        end: TAU,
        color: bun,
    });
    shapes.push(Shape::Ellipse {
        center: c,
        radii: Vec2::new(r + 2.0, r * 0.5),
        start: 0.0,
        end: TAU,
        color: lettuce,
    });
    shapes.push(Shape::Ellipse {
        center: c + Vec2::new(0.0, r * 0.2),
        radii: Vec2::new(r, r * 0.45),
        start: 0.0,
        end: TAU,
        color: patty,
    });
    shapes.push(Shape::Ellipse {
        center: c + Vec2::new(0.0, r * 0.6),
        radii: Vec2::new(r + 4.0, r * 0.35),
        start: 0.0,
        end: TAU,
        color: bun,
    });
    if golden {
        shapes.push(Shape::Rect {
            rect: Rect::new(c.x - r * 0.7, c.y + r * 0.15, r * 1.4, r * 0.25),
            color: "#fff700",
        });
    }
}

fn pizza(shapes: &mut Vec<Shape>, c: Vec2, r: f32) {
    shapes.push(Shape::Circle { center: c, radius: r + 6.0, color: "#d2a679" });
    shapes.push(Shape::Circle { center: c, radius: r + 2.0, color: "#b22222" });
    shapes.push(Shape::Circle { center: c, radius: r, color: "#f5d96b" });

    const PEPPERONI: usize = 6;
    for i in 0..PEPPERONI {
        let angle = i as f32 / PEPPERONI as f32 * TAU + 0.3;
        shapes.push(Shape::Circle {
            center: c + Vec2::new(angle.cos() * r * 0.5, angle.sin() * r * 0.45),
            radius: (r * 0.18).max(4.0),
            color: "#8b0000",
        });
    }
}

fn donut(shapes: &mut Vec<Shape>, c: Vec2, r: f32) {
    shapes.push(Shape::Circle { center: c, radius: r + 6.0, color: "#f0c27b" });
    shapes.push(Shape::Circle { center: c, radius: r + 1.0, color: "#f08fb0" });
    shapes.push(Shape::Circle { center: c, radius: r * 0.4, color: "#fff" });
}
