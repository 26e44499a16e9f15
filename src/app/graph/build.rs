use anyhow::Context as _;
use tracing::{debug, info, warn};

use pedigree::tree::{ToggleTarget, build_scene};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn rebuild_scene(&mut self) {
        self.scene = match &self.selected_family {
            Some(family_id) => {
                build_scene(&self.data.members, family_id, &self.collapse, &self.layout)
            }
            None => Default::default(),
        };
        self.scene_revision = self.scene_revision.wrapping_add(1);
        self.scene_dirty = false;
        self.search_match_cache = None;
        debug!(
            revision = self.scene_revision,
            cards = self.scene.cards.len(),
            "relayout"
        );
    }

    /// Switching families starts from a fresh viewport; collapse state is kept.
    pub(in crate::app) fn select_family(&mut self, family_id: Option<String>) {
        if self.selected_family == family_id {
            return;
        }
        info!(family = family_id.as_deref().unwrap_or("-"), "family selected");
        self.selected_family = family_id;
        self.inspected = None;
        self.view_reset_pending = true;
        self.scene_dirty = true;
    }

    pub(in crate::app) fn apply_toggle(&mut self, target: &ToggleTarget) {
        let (kind, id, collapsed) = match target {
            ToggleTarget::SpouseRow(id) => ("spouse-row", id, self.collapse.toggle_spouse_row(id)),
            ToggleTarget::Children(id) => ("children", id, self.collapse.toggle_children(id)),
        };
        debug!(kind, id = %id, collapsed, "toggle");
        self.scene_dirty = true;
    }

    pub(in crate::app) fn expand_all(&mut self) {
        if self.collapse.is_empty() {
            return;
        }
        self.collapse.clear();
        self.scene_dirty = true;
    }

    /// Re-reads the store after a write. On failure the last good snapshot stays.
    pub(in crate::app) fn reload_data(&mut self) {
        let loaded = self
            .store
            .load()
            .with_context(|| format!("reloading {}", self.store.path().display()));
        match loaded {
            Ok(data) => {
                self.data = data;
                if let Some(family) = &self.selected_family
                    && self.data.family(family).is_none()
                {
                    warn!(family = %family, "selected family no longer exists");
                    let fallback = self.data.families.first().map(|family| family.id.clone());
                    self.select_family(fallback);
                }
                if let Some(id) = &self.inspected
                    && self.data.member(id).is_none()
                {
                    self.inspected = None;
                }
                self.scene_dirty = true;
            }
            Err(error) => self.report_error(error),
        }
    }

    pub(in crate::app) fn report_error(&mut self, error: anyhow::Error) {
        warn!("{error:#}");
        self.error_message = Some(format!("{error:#}"));
    }
}
