use eframe::egui::{self, Color32, Key, Response, RichText, Sense, Stroke, StrokeKind, Ui, vec2};

use pedigree::genealogy::{Gender, Member, generate_id};

use super::super::render_utils::{
    EDGE_COLOR, MARRIAGE_COLOR, MAX_ZOOM, MIN_ZOOM, SEARCH_COLOR, card_palette,
};
use super::super::{MemberEditor, ViewModel};

const SLIDER_KEY_BASE_RATE: f32 = 10.0;
const SLIDER_KEY_ACCEL_PER_SEC: f32 = 9.0;
const SLIDER_KEY_ACCEL_MAX: f32 = 40.0;

#[derive(Clone, Copy, Default)]
struct SliderKeyHoldState {
    positive_secs: f32,
    negative_secs: f32,
}

fn slider_key_accel_multiplier(hold_secs: f32) -> f32 {
    let ramp = hold_secs * SLIDER_KEY_ACCEL_PER_SEC;
    (1.0 + ramp + ramp * ramp * 0.15).min(SLIDER_KEY_ACCEL_MAX)
}

/// Arrow keys nudge a focused slider, accelerating while held.
fn apply_slider_arrow_acceleration(
    ui: &Ui,
    response: &Response,
    value: &mut f32,
    min: f32,
    max: f32,
    step: f32,
) {
    let state_id = response.id.with("arrow_key_hold_state");
    let mut hold_state = ui.ctx().data(|data| {
        data.get_temp::<SliderKeyHoldState>(state_id)
            .unwrap_or_default()
    });

    if !response.has_focus() {
        ui.ctx()
            .data_mut(|data| data.insert_temp(state_id, SliderKeyHoldState::default()));
        return;
    }

    let (delta_time, increase_down, decrease_down) = ui.input(|input| {
        (
            input.stable_dt.min(0.1),
            input.key_down(Key::ArrowRight) || input.key_down(Key::ArrowUp),
            input.key_down(Key::ArrowLeft) || input.key_down(Key::ArrowDown),
        )
    });

    hold_state.positive_secs = if increase_down {
        hold_state.positive_secs + delta_time
    } else {
        0.0
    };
    hold_state.negative_secs = if decrease_down {
        hold_state.negative_secs + delta_time
    } else {
        0.0
    };
    ui.ctx()
        .data_mut(|data| data.insert_temp(state_id, hold_state));

    let direction = (increase_down as i8) - (decrease_down as i8);
    if direction == 0 {
        return;
    }

    let hold_secs = if direction > 0 {
        hold_state.positive_secs
    } else {
        hold_state.negative_secs
    };
    let speed = SLIDER_KEY_BASE_RATE * slider_key_accel_multiplier(hold_secs);
    *value = (*value + direction as f32 * step * speed * delta_time).clamp(min, max);
    ui.ctx().request_repaint();
}

fn legend_card(ui: &mut Ui, gender: Gender, label: &str) {
    let palette = card_palette(gender);
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(28.0, 16.0), Sense::hover());
        ui.painter().rect(
            rect,
            3.0,
            palette.fill,
            Stroke::new(1.5, palette.stroke),
            StrokeKind::Inside,
        );
        ui.label(label);
    });
}

fn legend_line(ui: &mut Ui, color: Color32, label: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(28.0, 16.0), Sense::hover());
        ui.painter()
            .line_segment([rect.left_center(), rect.right_center()], Stroke::new(2.0, color));
        ui.label(label);
    });
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Pedigree Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Family");
        let selected_text = self
            .selected_family
            .as_deref()
            .and_then(|id| self.data.family(id))
            .map(|family| family.name.clone())
            .unwrap_or_else(|| "(none)".to_owned());
        let mut chosen = self.selected_family.clone();
        egui::ComboBox::from_id_salt("family_selector")
            .selected_text(selected_text)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for family in &self.data.families {
                    ui.selectable_value(&mut chosen, Some(family.id.clone()), family.name.as_str());
                }
            });
        if chosen != self.selected_family {
            self.select_family(chosen);
        }

        ui.add_enabled_ui(self.selected_family.is_some(), |ui| {
            if ui
                .button("Add member")
                .on_hover_text("Create a member in the selected family.")
                .clicked()
                && let Some(family_id) = self.selected_family.clone()
            {
                self.editor = Some(MemberEditor {
                    draft: Member::new(generate_id("m"), family_id, ""),
                    is_new: true,
                    confirm_delete: false,
                });
            }
        });

        ui.separator();

        ui.label("Search by name")
            .on_hover_text("Fuzzy-highlight matching cards without changing the tree.");
        ui.text_edit_singleline(&mut self.search);

        ui.separator();

        let zoom_slider = ui
            .add(
                egui::Slider::new(&mut self.zoom, MIN_ZOOM..=MAX_ZOOM)
                    .text("Zoom")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Scroll over the canvas to zoom around the pointer.");
        apply_slider_arrow_acceleration(ui, &zoom_slider, &mut self.zoom, MIN_ZOOM, MAX_ZOOM, 0.01);

        ui.horizontal_wrapped(|ui| {
            if ui
                .add_enabled(!self.collapse.is_empty(), egui::Button::new("Expand all"))
                .on_hover_text("Show every spouse row and every branch again.")
                .clicked()
            {
                self.expand_all();
            }
            if ui
                .button("Reset view")
                .on_hover_text("Center the root and restore the default zoom.")
                .clicked()
            {
                self.view_reset_pending = true;
            }
        });

        ui.separator();
        ui.checkbox(&mut self.show_legend, "Show legend");
        if self.show_legend {
            ui.add_space(4.0);
            legend_card(ui, Gender::Male, "Male");
            legend_card(ui, Gender::Female, "Female");
            legend_line(ui, MARRIAGE_COLOR, "Marriage");
            legend_line(ui, EDGE_COLOR, "Parent to child");
            legend_line(ui, SEARCH_COLOR, "Search match");
            ui.add_space(4.0);
            ui.label(
                RichText::new(
                    "Click a card for details. The button under a card shows or hides \
                     a spouse row or that parent's children.",
                )
                .small(),
            );
        }
    }
}
