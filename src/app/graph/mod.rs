mod build;
mod interaction;
mod view;

#[cfg(test)]
mod tests {
    use eframe::egui::{Rect, Vec2, pos2};
    use pedigree::genealogy::GenealogyStore;
    use pedigree::tree::ToggleTarget;

    use super::super::ViewModel;
    use super::super::render_utils::world_to_screen;
    use super::interaction::CanvasHit;

    const CLAN: &str = "f_huang_jiangxia";
    const PATRIARCH: &str = "m_huang_jiancheng";

    fn view_model(dir: &tempfile::TempDir) -> ViewModel {
        let store = GenealogyStore::new(dir.path().join("genealogy.json"));
        let data = store.load().expect("seeded load");
        let mut view = ViewModel::new(store, data, Some(CLAN.to_owned()), 0.8);
        view.rebuild_scene();
        view.view_reset_pending = false;
        view.pan = Vec2::new(120.0, -40.0);
        view.zoom = 1.3;
        view
    }

    #[test]
    fn test_toggle_relayout_keeps_viewport() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut view = view_model(&dir);
        let cards_before = view.scene.cards.len();

        view.apply_toggle(&ToggleTarget::SpouseRow(PATRIARCH.to_owned()));
        assert!(view.scene_dirty);
        view.rebuild_scene();

        assert!(view.collapse.is_spouse_row_collapsed(PATRIARCH));
        assert!(view.scene.cards.len() < cards_before);
        assert_eq!(view.pan, Vec2::new(120.0, -40.0));
        assert_eq!(view.zoom, 1.3);
        assert!(!view.view_reset_pending);
    }

    #[test]
    fn test_family_switch_resets_viewport() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut view = view_model(&dir);

        view.select_family(Some(CLAN.to_owned()));
        assert!(!view.view_reset_pending);

        view.collapse.toggle_spouse_row(PATRIARCH);
        view.select_family(Some("f_xiang_henan".to_owned()));
        assert!(view.view_reset_pending);
        assert!(view.scene_dirty);
        assert!(view.collapse.is_spouse_row_collapsed(PATRIARCH));
    }

    #[test]
    fn test_toggle_click_never_opens_inspector() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut view = view_model(&dir);
        let rect = Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(1200.0, 800.0));
        let toggle = view.scene.toggles.first().cloned().expect("seed has toggles");

        let screen = world_to_screen(rect, view.pan, view.zoom, toggle.center);
        let hit = view.hit_test(rect, screen);
        assert_eq!(hit, Some(CanvasHit::Toggle(toggle.target.clone())));

        view.apply_canvas_click(hit);
        assert_eq!(view.inspected, None);
        assert!(view.scene_dirty);
    }

    #[test]
    fn test_card_click_opens_inspector() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut view = view_model(&dir);

        view.apply_canvas_click(Some(CanvasHit::Card(PATRIARCH.to_owned())));
        assert_eq!(view.inspected.as_deref(), Some(PATRIARCH));
        assert!(!view.scene_dirty);

        view.apply_canvas_click(None);
        assert_eq!(view.inspected.as_deref(), Some(PATRIARCH));
    }
}
