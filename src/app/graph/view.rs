use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::epaint::CubicBezierShape;
use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, vec2,
};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use pedigree::genealogy::{Member, MemberIndex};
use pedigree::tree::{CardKind, ConnectorKind, Toggle};
use pedigree::util::{spouse_tag, status_line};

use super::super::render_utils::{
    EDGE_COLOR, MARRIAGE_COLOR, MUTED_TEXT_COLOR, SEARCH_COLOR, TEXT_COLOR, blend_color,
    card_palette, draw_background, initial_pan, world_rect_to_screen, world_to_screen,
};
use super::super::{SearchMatchCache, ViewModel};
use super::interaction::CanvasHit;

const TOP_MARGIN: f32 = 50.0;
/// Below this zoom card text is unreadable and is skipped.
const TEXT_MIN_ZOOM: f32 = 0.25;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

struct CardStyle<'a> {
    member: &'a Member,
    tag: Option<String>,
    hovered: bool,
    matched: bool,
    inspected: bool,
}

impl ViewModel {
    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<String>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.scene_revision == self.scene_revision
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let index = MemberIndex::new(&self.data.members);
        let matches = self
            .scene
            .cards
            .iter()
            .filter_map(|card| index.get(&card.member_id))
            .filter(|member| fuzzy_match_score(&matcher, &member.name, query).is_some())
            .map(|member| member.id.clone())
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            scene_revision: self.scene_revision,
            matches: Arc::clone(&matches),
        });
        Some(matches)
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.scene_dirty {
            self.rebuild_scene();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        if self.view_reset_pending {
            self.pan = initial_pan(rect, TOP_MARGIN);
            self.zoom = self.initial_zoom;
            self.view_reset_pending = false;
        }

        draw_background(&painter, rect, self.pan, self.zoom);

        if self.scene.is_empty() {
            let hint = if self.selected_family.is_some() {
                "This family has no members yet."
            } else {
                "Select a family to view its pedigree."
            };
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                hint,
                FontId::proportional(16.0),
                MUTED_TEXT_COLOR,
            );
            return;
        }

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let search_matches = self.cached_search_matches();
        let hovered = response
            .hover_pos()
            .and_then(|pointer| self.hit_test(rect, pointer));
        if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        let pan = self.pan;
        let zoom = self.zoom;
        let index = MemberIndex::new(&self.data.members);

        for edge in &self.scene.edges {
            let points = edge.points.map(|point| world_to_screen(rect, pan, zoom, point));
            if !rect.intersects(Rect::from_points(&points)) {
                continue;
            }
            let stroke = Stroke::new((1.5 * zoom).max(0.75), EDGE_COLOR);
            painter.add(CubicBezierShape::from_points_stroke(
                points,
                false,
                Color32::TRANSPARENT,
                stroke,
            ));
        }

        for connector in &self.scene.connectors {
            let from = world_to_screen(rect, pan, zoom, connector.from);
            let to = world_to_screen(rect, pan, zoom, connector.to);
            let color = match connector.kind {
                ConnectorKind::Marriage => MARRIAGE_COLOR,
                ConnectorKind::Stem => EDGE_COLOR,
            };
            painter.line_segment([from, to], Stroke::new((2.0 * zoom).max(0.75), color));
        }

        let hovered_card = match &hovered {
            Some(CanvasHit::Card(id)) => Some(id.as_str()),
            _ => None,
        };
        for card in &self.scene.cards {
            let screen_rect =
                world_rect_to_screen(rect, pan, zoom, self.scene.card_rect(card));
            if !rect.intersects(screen_rect) {
                continue;
            }
            let Some(member) = index.get(&card.member_id) else {
                continue;
            };
            let tag = match card.kind {
                CardKind::Primary => None,
                CardKind::Spouse { .. } => Some(spouse_tag(
                    self.data.family(&member.family_id).map(|family| family.name.as_str()),
                )),
            };
            let style = CardStyle {
                member,
                tag,
                hovered: hovered_card == Some(card.member_id.as_str()),
                matched: search_matches
                    .as_ref()
                    .is_some_and(|matches| matches.contains(&card.member_id)),
                inspected: self.inspected.as_deref() == Some(card.member_id.as_str()),
            };
            draw_card(&painter, screen_rect, zoom, &style);
        }

        for toggle in &self.scene.toggles {
            let center = world_to_screen(rect, pan, zoom, toggle.center);
            if rect.expand(self.scene.toggle_radius * zoom).contains(center) {
                draw_toggle(&painter, toggle, center, self.scene.toggle_radius * zoom);
            }
        }

        if let Some(id) = hovered_card
            && let Some(member) = index.get(id)
        {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!(
                    "{}  |  generation {}  |  {}",
                    member.name,
                    member.generation,
                    status_line(member)
                ),
                FontId::proportional(13.0),
                TEXT_COLOR,
            );
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            self.apply_canvas_click(hovered);
        }
    }
}

fn draw_card(painter: &Painter, screen_rect: Rect, zoom: f32, style: &CardStyle<'_>) {
    let palette = card_palette(style.member.gender);
    let fill = if style.hovered {
        blend_color(palette.fill, palette.stroke, 0.18)
    } else {
        palette.fill
    };
    let (stroke_width, stroke_color) = if style.matched {
        (3.0, SEARCH_COLOR)
    } else if style.inspected {
        (2.5, palette.stroke)
    } else {
        (1.5, palette.stroke)
    };

    painter.rect(
        screen_rect,
        6.0 * zoom,
        fill,
        Stroke::new(stroke_width * zoom.max(0.5), stroke_color),
        StrokeKind::Inside,
    );

    if zoom < TEXT_MIN_ZOOM {
        return;
    }

    let center = screen_rect.center();
    painter.text(
        center - vec2(0.0, 10.0 * zoom),
        Align2::CENTER_CENTER,
        &style.member.name,
        FontId::proportional(15.0 * zoom),
        TEXT_COLOR,
    );
    painter.text(
        center + vec2(0.0, 14.0 * zoom),
        Align2::CENTER_CENTER,
        status_line(style.member),
        FontId::proportional(11.0 * zoom),
        MUTED_TEXT_COLOR,
    );

    if let Some(tag) = &style.tag {
        painter.text(
            screen_rect.right_top() + vec2(-4.0 * zoom, 3.0 * zoom),
            Align2::RIGHT_TOP,
            tag,
            FontId::proportional(10.0 * zoom),
            palette.stroke,
        );
    }
}

fn draw_toggle(painter: &Painter, toggle: &Toggle, center: Pos2, radius: f32) {
    let stroke = Stroke::new((radius / 5.0).max(1.0), MUTED_TEXT_COLOR);
    painter.circle_filled(center, radius, Color32::WHITE);
    painter.circle_stroke(center, radius, stroke);

    let arm = radius * 0.55;
    painter.line_segment([center - vec2(arm, 0.0), center + vec2(arm, 0.0)], stroke);
    if toggle.collapsed {
        painter.line_segment([center - vec2(0.0, arm), center + vec2(0.0, arm)], stroke);
    }
}
