use anyhow::Context as _;
use eframe::egui::{self, Context, RichText, Ui};
use tracing::info;

use pedigree::genealogy::{Gender, Member};

use super::super::{MemberEditor, ViewModel};

enum EditorAction {
    Save,
    Delete,
    Cancel,
}

fn reference_combo(
    ui: &mut Ui,
    id_salt: &str,
    value: &mut Option<String>,
    candidates: &[&Member],
) {
    let selected_text = value
        .as_deref()
        .map(|id| {
            candidates
                .iter()
                .find(|member| member.id == id)
                .map(|member| member.name.clone())
                .unwrap_or_else(|| format!("unknown ({id})"))
        })
        .unwrap_or_else(|| "(none)".to_owned());

    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            ui.selectable_value(value, None, "(none)");
            for member in candidates {
                ui.selectable_value(value, Some(member.id.clone()), member.name.as_str());
            }
        });
}

fn draw_form(ui: &mut Ui, editor: &mut MemberEditor, members: &[Member]) -> Option<EditorAction> {
    let draft = &mut editor.draft;
    let mut action = None;

    egui::Grid::new("member_editor_grid")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label("Name");
            ui.text_edit_singleline(&mut draft.name);
            ui.end_row();

            ui.label("Gender");
            ui.horizontal(|ui| {
                ui.radio_value(&mut draft.gender, Gender::Male, "male");
                ui.radio_value(&mut draft.gender, Gender::Female, "female");
            });
            ui.end_row();

            ui.label("Generation");
            ui.add(egui::DragValue::new(&mut draft.generation).range(1..=200));
            ui.end_row();

            ui.label("Birth date");
            ui.text_edit_singleline(&mut draft.birth_date)
                .on_hover_text("YYYY-MM-DD; only the year is shown on the card.");
            ui.end_row();

            ui.label("Death date");
            ui.horizontal(|ui| {
                let mut deceased = draft.death_date.is_some();
                if ui.checkbox(&mut deceased, "deceased").changed() {
                    draft.death_date = deceased.then(String::new);
                }
                if let Some(date) = draft.death_date.as_mut() {
                    ui.text_edit_singleline(date);
                }
            });
            ui.end_row();

            ui.label("Photo");
            let mut photo = draft.photo.clone().unwrap_or_default();
            if ui.text_edit_singleline(&mut photo).changed() {
                draft.photo = Some(photo).filter(|path| !path.trim().is_empty());
            }
            ui.end_row();
        });

    ui.label("Biography");
    ui.text_edit_multiline(&mut draft.bio);

    ui.separator();

    let fathers = members
        .iter()
        .filter(|member| {
            member.family_id == draft.family_id
                && member.gender == Gender::Male
                && member.id != draft.id
        })
        .collect::<Vec<_>>();
    let outsiders = members
        .iter()
        .filter(|member| member.family_id != draft.family_id)
        .collect::<Vec<_>>();
    let mothers = outsiders
        .iter()
        .copied()
        .filter(|member| member.gender == Gender::Female)
        .collect::<Vec<_>>();

    ui.horizontal(|ui| {
        ui.label("Father");
        reference_combo(ui, "editor_father", &mut draft.father_id, &fathers);
    });
    ui.horizontal(|ui| {
        ui.label("Mother");
        reference_combo(ui, "editor_mother", &mut draft.mother_id, &mothers);
    });

    ui.label("Spouses");
    egui::ScrollArea::vertical()
        .id_salt("editor_spouses_scroll")
        .max_height(160.0)
        .show(ui, |ui| {
            if outsiders.is_empty() {
                ui.label("No members from other families yet.");
            }
            for candidate in &outsiders {
                let mut married = draft.spouse_ids.contains(&candidate.id);
                if ui.checkbox(&mut married, candidate.name.as_str()).changed() {
                    if married {
                        draft.spouse_ids.push(candidate.id.clone());
                    } else {
                        draft.spouse_ids.retain(|id| id != &candidate.id);
                    }
                }
            }
        });

    ui.separator();
    ui.horizontal(|ui| {
        let can_save = !draft.name.trim().is_empty();
        if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
            action = Some(EditorAction::Save);
        }
        if ui.button("Cancel").clicked() {
            action = Some(EditorAction::Cancel);
        }
        if !editor.is_new {
            if editor.confirm_delete {
                ui.label(RichText::new("Delete and unlink everywhere?").strong());
                if ui.button("Confirm delete").clicked() {
                    action = Some(EditorAction::Delete);
                }
            } else if ui.button("Delete").clicked() {
                editor.confirm_delete = true;
            }
        }
    });

    action
}

impl ViewModel {
    pub(in crate::app) fn draw_editor(&mut self, ctx: &Context) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        let mut open = true;
        let mut action = None;
        let title = if editor.is_new { "New member" } else { "Edit member" };
        egui::Window::new(title)
            .id(egui::Id::new("member_editor"))
            .open(&mut open)
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| {
                action = draw_form(ui, editor, &self.data.members);
            });

        if !open {
            self.editor = None;
            return;
        }

        match action {
            Some(EditorAction::Save) => self.save_editor(),
            Some(EditorAction::Delete) => self.delete_editor_member(),
            Some(EditorAction::Cancel) => self.editor = None,
            None => {}
        }
    }

    /// The editor stays open with its draft when the store rejects the write.
    fn save_editor(&mut self) {
        let Some(editor) = self.editor.as_ref() else {
            return;
        };
        let mut member = editor.draft.clone();
        member.name = member.name.trim().to_owned();
        let id = member.id.clone();

        let saved = self
            .store
            .save_member(member)
            .with_context(|| format!("saving member {id}"));
        if let Err(error) = saved {
            self.report_error(error);
            return;
        }

        info!(id = %id, "member saved");
        self.editor = None;
        self.error_message = None;
        self.reload_data();
        self.set_inspected(Some(id));
    }

    fn delete_editor_member(&mut self) {
        let Some(editor) = self.editor.as_ref() else {
            return;
        };
        let id = editor.draft.id.clone();

        let deleted = self
            .store
            .delete_member(&id)
            .with_context(|| format!("deleting member {id}"));
        if let Err(error) = deleted {
            self.report_error(error);
            return;
        }

        self.editor = None;
        self.error_message = None;
        self.set_inspected(None);
        self.reload_data();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pedigree::genealogy::{GenealogyData, GenealogyStore, Member};

    use super::super::super::{MemberEditor, ViewModel};

    fn editing(store: GenealogyStore, data: GenealogyData) -> ViewModel {
        let mut view = ViewModel::new(store, data, None, 0.8);
        view.editor = Some(MemberEditor {
            draft: Member::new("m_new", "f_clan", "  黄新  "),
            is_new: true,
            confirm_delete: false,
        });
        view
    }

    #[test]
    fn test_failed_save_keeps_draft_open() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = GenealogyStore::new(dir.path().join("genealogy.json"));
        fs::write(store.path(), "{ not json").expect("corrupt");
        let mut view = editing(store, GenealogyData::default());

        view.save_editor();

        let editor = view.editor.as_ref().expect("editor still open");
        assert_eq!(editor.draft.name, "  黄新  ");
        assert!(view.error_message.is_some());
        assert_eq!(view.inspected, None);
    }

    #[test]
    fn test_successful_save_closes_editor_and_inspects() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = GenealogyStore::new(dir.path().join("genealogy.json"));
        store.write(&GenealogyData::default()).expect("empty document");
        let mut view = editing(store, GenealogyData::default());

        view.save_editor();

        assert!(view.editor.is_none());
        assert_eq!(view.inspected.as_deref(), Some("m_new"));
        let saved = view.data.member("m_new").expect("reloaded member");
        assert_eq!(saved.name, "黄新");
    }
}
