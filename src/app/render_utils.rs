use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use pedigree::genealogy::Gender;

pub(super) const MIN_ZOOM: f32 = 0.1;
pub(super) const MAX_ZOOM: f32 = 2.0;

pub(super) const MARRIAGE_COLOR: Color32 = Color32::from_rgb(0xFF, 0x6B, 0x6B);
pub(super) const EDGE_COLOR: Color32 = Color32::from_rgb(0xCB, 0xD5, 0xE0);
pub(super) const TEXT_COLOR: Color32 = Color32::from_rgb(0x2D, 0x37, 0x48);
pub(super) const MUTED_TEXT_COLOR: Color32 = Color32::from_rgb(0x71, 0x80, 0x96);
pub(super) const SEARCH_COLOR: Color32 = Color32::from_rgb(0xF6, 0xAD, 0x55);

#[derive(Clone, Copy)]
pub(super) struct CardPalette {
    pub fill: Color32,
    pub stroke: Color32,
}

pub(super) fn card_palette(gender: Gender) -> CardPalette {
    match gender {
        Gender::Male => CardPalette {
            fill: Color32::from_rgb(0xEB, 0xF8, 0xFF),
            stroke: Color32::from_rgb(0x42, 0x99, 0xE1),
        },
        Gender::Female => CardPalette {
            fill: Color32::from_rgb(0xFF, 0xF5, 0xF7),
            stroke: Color32::from_rgb(0xED, 0x64, 0xA6),
        },
    }
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(0xF7, 0xFA, 0xFC));

    let step = (48.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center() + pan;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(0xCB, 0xD5, 0xE0, 60));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Pos2) -> Pos2 {
    rect.center() + pan + world.to_vec2() * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Pos2 {
    ((screen - rect.center() - pan) / zoom).to_pos2()
}

pub(super) fn world_rect_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Rect) -> Rect {
    Rect::from_min_max(
        world_to_screen(rect, pan, zoom, world.min),
        world_to_screen(rect, pan, zoom, world.max),
    )
}

/// Pan that puts the world origin at the horizontal center, `top_margin`
/// pixels below the top edge.
pub(super) fn initial_pan(rect: Rect, top_margin: f32) -> Vec2 {
    Vec2::new(0.0, rect.top() + top_margin - rect.center().y)
}
