//! Painting scenes into the pixel buffer
//!
//! The play field is scaled uniformly to the largest size that fits the
//! terminal and centered; everything outside it stays black.

use crate::driver::{MenuView, Scene};
use crate::sim::{Obstacle, Point, Session, Size};
use crate::theme::{ActorSprite, Backdrop, ObstacleSprite, Rgb, ThemeAssets};

use super::pixels::{Label, PixelBuf, draw_number};

const BLACK: Rgb = Rgb(0, 0, 0);
const WHITE: Rgb = Rgb(255, 255, 255);
const TITLE: Rgb = Rgb(128, 0, 0);
const BUTTON: Rgb = Rgb(255, 102, 102);
const BUTTON_BORDER: Rgb = Rgb(200, 0, 0);

/// Maps play-field coordinates to buffer pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub ox: f32,
    pub oy: f32,
}

impl Viewport {
    pub fn fit(field: Size, pw: usize, ph: usize) -> Self {
        let scale = (pw as f32 / field.width)
            .min(ph as f32 / field.height)
            .max(f32::EPSILON);
        Self {
            scale,
            ox: ((pw as f32 - field.width * scale) / 2.0).floor(),
            oy: ((ph as f32 - field.height * scale) / 2.0).floor(),
        }
    }

    pub fn px(&self, x: f32) -> i32 {
        (self.ox + x * self.scale).round() as i32
    }

    pub fn py(&self, y: f32) -> i32 {
        (self.oy + y * self.scale).round() as i32
    }

    /// Length in pixels, never below `min`
    pub fn len(&self, v: f32, min: i32) -> i32 {
        ((v * self.scale).round() as i32).max(min)
    }

    /// Terminal cell back to play-field coordinates
    pub fn cell_to_field(&self, col: u16, row: u16) -> Point {
        let px = col as f32 + 0.5;
        let py = row as f32 * 2.0 + 1.0;
        Point::new((px - self.ox) / self.scale, (py - self.oy) / self.scale)
    }
}

/// Paint `scene`, returning the text to print on top of it
pub fn paint(buf: &mut PixelBuf, scene: &Scene<'_>, frame: u64) -> Vec<Label> {
    let vp = Viewport::fit(scene.field(), buf.width(), buf.height());
    buf.clear(BLACK);
    match scene {
        Scene::Menu(view) => paint_menu(buf, &vp, view),
        Scene::Countdown { assets, beat } => {
            paint_backdrop(buf, &vp, &assets.background, 0.0);
            let dot = vp.len(assets.field().height / 30.0, 2);
            let top = vp.py(assets.field().height / 2.0) - dot * 5 / 2;
            draw_number(buf, vp.px(assets.field().width / 2.0), top, *beat as u32, TITLE, dot);
            Vec::new()
        }
        Scene::Playing { assets, session } => {
            paint_round(buf, &vp, assets, session, frame);
            Vec::new()
        }
    }
}

fn paint_round(buf: &mut PixelBuf, vp: &Viewport, assets: &ThemeAssets, session: &Session, frame: u64) {
    let field = session.field();
    paint_backdrop(buf, vp, &assets.background, session.distance());
    for obstacle in session.stream().obstacles() {
        paint_obstacle(buf, vp, &assets.obstacle, obstacle, field.height);
    }
    let actor = session.actor();
    paint_actor(
        buf,
        vp,
        &assets.actor,
        Point::new(actor.x, actor.y),
        actor.vel_y,
        frame,
    );
    let dot = vp.len(field.height / 120.0, 1);
    draw_number(buf, vp.px(field.width / 2.0), vp.py(30.0) - dot * 2, session.score(), assets.text, dot);
}

fn paint_backdrop(buf: &mut PixelBuf, vp: &Viewport, bg: &Backdrop, scroll: f32) {
    let (x0, x1) = (vp.px(0.0), vp.px(bg.size.width));
    let (y0, y1) = (vp.py(0.0), vp.py(bg.size.height));
    let h = (y1 - y0).max(1);

    for y in y0..y1 {
        let t = ((y - y0) * 256 / h) as u16;
        let c = Rgb::lerp(bg.sky_top, bg.sky_bottom, t);
        for x in x0..x1 {
            buf.set(x, y, c);
        }
    }

    // Far hills
    let s = vp.scale as f64;
    for x in x0..x1 {
        let fx = ((x - x0) as f64 / s + scroll as f64 * 0.2) * 0.02;
        let hh = (fx.sin() * 30.0 + (fx * 1.7).sin() * 15.0 + 60.0) * s;
        for y in (y1 - hh as i32)..y1 {
            buf.set(x, y, bg.hills_far);
        }
    }
    // Near hills
    for x in x0..x1 {
        let fx = ((x - x0) as f64 / s + scroll as f64 * 0.4) * 0.03;
        let hh = (fx.sin() * 20.0 + (fx * 2.3).sin() * 10.0 + 35.0) * s;
        for y in (y1 - hh as i32)..y1 {
            buf.set(x, y, bg.hills_near);
        }
    }
}

fn pipe_shade(x: i32, total_w: i32, sprite: &ObstacleSprite) -> Rgb {
    if total_w <= 1 {
        return sprite.body;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(sprite.edge, sprite.body, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(sprite.body, sprite.shine, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(sprite.shine, sprite.body, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(sprite.body, sprite.edge, ((t - 160) * 3).min(256))
    }
}

fn paint_obstacle(buf: &mut PixelBuf, vp: &Viewport, sprite: &ObstacleSprite, o: &Obstacle, field_h: f32) {
    let px = vp.px(o.x);
    let pw = vp.len(o.width, 1);
    let top = vp.py(0.0);
    let bottom = vp.py(field_h);
    let gap_top = vp.py(o.gap_top);
    let gap_bot = vp.py(o.gap_bottom());
    let cap_extra = vp.len(6.0, 1);
    let cap_h = vp.len(18.0, 1);

    // Bodies
    for x in 0..pw {
        let c = pipe_shade(x, pw, sprite);
        for y in top..(gap_top - cap_h) {
            buf.set(px + x, y, c);
        }
        for y in (gap_bot + cap_h)..bottom {
            buf.set(px + x, y, c);
        }
    }

    // Caps, wider than the body, with darkened rims
    for x in -cap_extra..(pw + cap_extra) {
        let c = pipe_shade(x + cap_extra, pw + cap_extra * 2, sprite);
        for y in (gap_top - cap_h).max(top)..gap_top {
            buf.set(px + x, y, c);
        }
        for y in gap_bot..(gap_bot + cap_h).min(bottom) {
            buf.set(px + x, y, c);
        }
        buf.set(px + x, gap_top - 1, sprite.cap);
        buf.set(px + x, gap_bot, sprite.cap);
    }
}

fn paint_actor(buf: &mut PixelBuf, vp: &Viewport, sprite: &ActorSprite, pos: Point, vel_y: f32, frame: u64) {
    let x = vp.px(pos.x);
    let y = vp.py(pos.y);
    let w = vp.len(sprite.size.width, 2);
    let h = vp.len(sprite.size.height, 2);
    let unit = (w / 6).max(1);

    // Nose dips when falling, lifts when rising
    let tilt = (vel_y / 4.0).clamp(-1.0, 1.0).round() as i32;

    // Body
    buf.fill_rect(x, y, w, h, sprite.body);
    buf.fill_rect(x + 1, y, w - 2, unit, sprite.highlight);

    // Wing beats every four frames
    let wing_y = if frame % 8 < 4 { y + h / 3 } else { y + h / 2 };
    buf.fill_rect(x, wing_y, w / 2, (h / 4).max(1), sprite.wing);

    // Eye
    let eye = unit.max(1);
    buf.fill_rect(x + w - eye * 2, y + unit, eye, eye, sprite.eye);

    // Beak
    let beak_y = y + h / 2 - unit + tilt;
    buf.fill_rect(x + w, beak_y, (w / 3).max(1), (h / 5).max(1), sprite.beak);
}

fn paint_menu(buf: &mut PixelBuf, vp: &Viewport, view: &MenuView<'_>) -> Vec<Label> {
    if let Some(assets) = view.backdrop {
        paint_backdrop(buf, vp, &assets.background, 0.0);
        buf.dim();
    }

    let cx = vp.px(view.field.width / 2.0);
    let title_fg = if view.backdrop.is_some() { WHITE } else { BUTTON };
    let mut labels = vec![Label::centered(
        cx,
        vp.py(50.0),
        view.title.to_uppercase(),
        title_fg,
        None,
    )];
    for (i, line) in view.lines.iter().enumerate() {
        labels.push(Label::centered(cx, vp.py(140.0 + i as f32 * 36.0), line.clone(), WHITE, None));
    }

    for (i, (label, rect)) in view.buttons.iter().enumerate() {
        let (x, y) = (vp.px(rect.x), vp.py(rect.y));
        let (w, h) = (vp.len(rect.w, 3), vp.len(rect.h, 2));
        buf.fill_rect(x, y, w, h, BUTTON);
        buf.stroke_rect(x, y, w, h, BUTTON_BORDER);
        let center = rect.center();
        labels.push(Label::centered(
            vp.px(center.x),
            vp.py(center.y),
            format!("{} {}", i + 1, label),
            TITLE,
            Some(BUTTON),
        ));
    }
    labels
}
