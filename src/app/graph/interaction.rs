use eframe::egui::{self, Pos2, Rect, Ui};

use pedigree::tree::ToggleTarget;

use super::super::ViewModel;
use super::super::render_utils::{MAX_ZOOM, MIN_ZOOM, screen_to_world};

/// The single target a pointer position resolves to.
#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) enum CanvasHit {
    Toggle(ToggleTarget),
    Card(String),
}

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = pointer - rect.center() - (world_before.to_vec2() * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged() {
            self.pan += response.drag_delta();
        }
    }

    /// Toggles win over cards: a toggle sits on top of its stem and may
    /// overlap a card edge.
    pub(in crate::app) fn hit_test(&self, rect: Rect, screen: Pos2) -> Option<CanvasHit> {
        let world = screen_to_world(rect, self.pan, self.zoom, screen);
        if let Some(toggle) = self.scene.toggle_at(world) {
            return Some(CanvasHit::Toggle(toggle.target.clone()));
        }
        self.scene
            .card_at(world)
            .map(|card| CanvasHit::Card(card.member_id.clone()))
    }

    /// Clicks only; egui never reports a drag as a click.
    pub(in crate::app) fn apply_canvas_click(&mut self, hit: Option<CanvasHit>) {
        match hit {
            Some(CanvasHit::Toggle(target)) => self.apply_toggle(&target),
            Some(CanvasHit::Card(member_id)) => self.set_inspected(Some(member_id)),
            None => {}
        }
    }

    pub(in crate::app) fn set_inspected(&mut self, member_id: Option<String>) {
        if self.inspected != member_id {
            self.inspected = member_id;
        }
    }
}
