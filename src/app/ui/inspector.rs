use eframe::egui::{self, Context, RichText, Ui};

use pedigree::genealogy::Member;
use pedigree::tree::resolve_relations;
use pedigree::util::or_placeholder;

use super::super::{MemberEditor, ViewModel};

/// Clickable relative; returns the id to re-target when clicked.
fn relative_link(ui: &mut Ui, label: &str, relative: Option<&Member>) -> Option<String> {
    let mut target = None;
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).strong());
        match relative {
            Some(member) => {
                if ui.link(member.name.as_str()).clicked() {
                    target = Some(member.id.clone());
                }
            }
            None => {
                ui.label("unknown");
            }
        }
    });
    target
}

impl ViewModel {
    pub(in crate::app) fn draw_inspector(&mut self, ctx: &Context) {
        let Some(member_id) = self.inspected.clone() else {
            return;
        };
        let Some(member) = self.data.member(&member_id) else {
            self.inspected = None;
            return;
        };

        let mut open = true;
        let mut retarget = None;
        let mut edit = false;
        let relations = resolve_relations(&self.data.members, member);

        egui::Window::new("Member details")
            .id(egui::Id::new("member_inspector"))
            .open(&mut open)
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.label(RichText::new(&member.name).strong().size(18.0));
                ui.label(format!(
                    "Generation {}  |  {}",
                    member.generation,
                    member.gender.label()
                ));
                ui.add_space(4.0);

                ui.label(format!("Born: {}", or_placeholder(&member.birth_date, "unknown")));
                let died = member
                    .death_date
                    .as_deref()
                    .map(|date| or_placeholder(date, "living"))
                    .unwrap_or("living");
                ui.label(format!("Died: {died}"));
                if let Some(photo) = member.photo.as_deref() {
                    ui.small(format!("Photo: {photo}"));
                }

                ui.separator();
                ui.label(RichText::new("Biography").strong());
                ui.label(or_placeholder(&member.bio, "No biography recorded."));

                ui.separator();
                retarget = retarget.take().or(relative_link(ui, "Father:", relations.father));
                retarget = retarget.take().or(relative_link(ui, "Mother:", relations.mother));
                ui.label(RichText::new("Spouses:").strong());
                if relations.spouses.is_empty() {
                    ui.label("none");
                }
                for spouse in &relations.spouses {
                    if ui.link(spouse.name.as_str()).clicked() {
                        retarget = Some(spouse.id.clone());
                    }
                }

                ui.separator();
                if ui.button("Edit").clicked() {
                    edit = true;
                }
            });

        if edit {
            self.editor = Some(MemberEditor {
                draft: member.clone(),
                is_new: false,
                confirm_delete: false,
            });
        }
        if !open {
            self.set_inspected(None);
        } else if retarget.is_some() {
            self.set_inspected(retarget);
        }
    }
}
