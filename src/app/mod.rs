use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context as _;
use eframe::egui::{self, Context, Vec2};
use tracing::{error, info};

use pedigree::genealogy::{GenealogyData, GenealogyStore, Member};
use pedigree::tree::{CollapseState, LayoutConfig, Scene};

mod graph;
mod render_utils;
mod ui;

/// What the window should show first.
#[derive(Clone, Debug)]
pub struct LaunchOptions {
    pub family_id: Option<String>,
    pub default_family_name: String,
    pub initial_zoom: f32,
}

pub struct GenealogyApp {
    store: GenealogyStore,
    launch: LaunchOptions,
    state: AppState,
}

enum AppState {
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    store: GenealogyStore,
    data: GenealogyData,
    layout: LayoutConfig,
    selected_family: Option<String>,
    collapse: CollapseState,
    search: String,
    pan: Vec2,
    zoom: f32,
    initial_zoom: f32,
    view_reset_pending: bool,
    scene_dirty: bool,
    scene_revision: u64,
    scene: Scene,
    search_match_cache: Option<SearchMatchCache>,
    inspected: Option<String>,
    editor: Option<MemberEditor>,
    error_message: Option<String>,
    show_legend: bool,
}

struct SearchMatchCache {
    query: String,
    scene_revision: u64,
    matches: Arc<HashSet<String>>,
}

/// Editable copy of one member; nothing reaches the store until saved.
struct MemberEditor {
    draft: Member,
    is_new: bool,
    confirm_delete: bool,
}

/// Family to open: the requested id when it exists, else the family with the
/// configured default name, else the first family.
fn initial_family(
    data: &GenealogyData,
    requested: Option<&str>,
    default_name: &str,
) -> Option<String> {
    requested
        .and_then(|id| data.family(id))
        .or_else(|| data.families.iter().find(|family| family.name == default_name))
        .or_else(|| data.families.first())
        .map(|family| family.id.clone())
}

impl GenealogyApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        store: GenealogyStore,
        launch: LaunchOptions,
    ) -> Self {
        let state = Self::load_state(&store, &launch);
        Self {
            store,
            launch,
            state,
        }
    }

    fn load_state(store: &GenealogyStore, launch: &LaunchOptions) -> AppState {
        let loaded = store
            .load()
            .with_context(|| format!("loading {}", store.path().display()));
        match loaded {
            Ok(data) => {
                let family = initial_family(
                    &data,
                    launch.family_id.as_deref(),
                    &launch.default_family_name,
                );
                info!(
                    members = data.members.len(),
                    families = data.families.len(),
                    family = family.as_deref().unwrap_or("-"),
                    "genealogy data loaded"
                );
                AppState::Ready(Box::new(ViewModel::new(
                    store.clone(),
                    data,
                    family,
                    launch.initial_zoom,
                )))
            }
            Err(error) => {
                error!("{error:#}");
                AppState::Error(format!("{error:#}"))
            }
        }
    }
}

impl eframe::App for GenealogyApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load genealogy data");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::load_state(&self.store, &self.launch));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
