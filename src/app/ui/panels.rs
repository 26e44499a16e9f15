use eframe::egui::{self, Align, Color32, Context, Layout, RichText, Vec2};

use pedigree::genealogy::{GenealogyData, GenealogyStore};
use pedigree::tree::{CollapseState, LayoutConfig, Scene};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(
        store: GenealogyStore,
        data: GenealogyData,
        selected_family: Option<String>,
        initial_zoom: f32,
    ) -> Self {
        Self {
            store,
            data,
            layout: LayoutConfig::default(),
            selected_family,
            collapse: CollapseState::new(),
            search: String::new(),
            pan: Vec2::ZERO,
            zoom: initial_zoom,
            initial_zoom,
            view_reset_pending: true,
            scene_dirty: true,
            scene_revision: 0,
            scene: Scene::default(),
            search_match_cache: None,
            inspected: None,
            editor: None,
            error_message: None,
            show_legend: true,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        if self.scene_dirty {
            self.rebuild_scene();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("pedigree");
                    ui.separator();
                    ui.label(format!("surnames: {}", self.data.surnames.len()));
                    ui.label(format!("families: {}", self.data.families.len()));
                    ui.label(format!("members: {}", self.data.members.len()));
                    ui.label(format!("living: {}", self.data.living_count()));
                    if ui
                        .button("Reload data")
                        .on_hover_text(self.store.path().display().to_string())
                        .clicked()
                    {
                        self.reload_data();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "cards: {}  |  zoom: {:.0}%",
                            self.scene.cards.len(),
                            self.zoom * 100.0
                        ));
                    });
                });

                if let Some(message) = self.error_message.clone() {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(message).color(Color32::from_rgb(0xC5, 0x30, 0x30)));
                        if ui.small_button("Dismiss").clicked() {
                            self.error_message = None;
                        }
                    });
                }
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));

        self.draw_inspector(ctx);
        self.draw_editor(ctx);
    }
}
