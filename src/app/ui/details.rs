use eframe::egui::{self, RichText, Ui};

use pedigree::util::or_placeholder;

use super::super::ViewModel;

fn field(ui: &mut Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(label).strong());
        ui.label(or_placeholder(value, "unknown"));
    });
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Family Details");
        ui.add_space(6.0);

        let Some(family) = self
            .selected_family
            .as_deref()
            .and_then(|id| self.data.family(id))
        else {
            ui.label("Select a family to see its record.");
            return;
        };

        let surname = self
            .data
            .surname(&family.surname_id)
            .map(|surname| surname.name.as_str())
            .unwrap_or("unknown");
        let tanghao = self
            .data
            .tanghao_of(family)
            .map(|hall| hall.name.as_str())
            .unwrap_or("unknown");
        let member_count = self.data.family_members(&family.id).count();

        ui.label(RichText::new(&family.name).strong().size(18.0));
        ui.small(family.id.as_str());
        ui.add_space(6.0);

        field(ui, "Surname:", surname);
        field(ui, "Hall name:", tanghao);
        field(ui, "Founder:", &family.founder);
        field(ui, "Origin:", &family.origin);
        ui.label(format!("Members recorded: {member_count}"));

        if !family.description.trim().is_empty() {
            ui.add_space(4.0);
            ui.label(family.description.as_str());
        }

        if let Some(zibei) = family.zibei.as_deref().filter(|text| !text.trim().is_empty()) {
            ui.separator();
            ui.label(RichText::new("Generation poem").strong());
            ui.label(zibei);
        }

        if let Some(motto) = family.motto.as_deref().filter(|text| !text.trim().is_empty()) {
            ui.separator();
            ui.label(RichText::new("Family motto").strong());
            ui.label(motto);
        }

        if let Some(migration) = family
            .migration
            .as_deref()
            .filter(|text| !text.trim().is_empty())
        {
            ui.separator();
            ui.label(RichText::new("Migration").strong());
            ui.label(migration);
        }

        ui.separator();
        ui.label(RichText::new("Chronology").strong());
        if family.events.is_empty() {
            ui.label("No events recorded.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("family_events_scroll")
                .max_height(280.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for event in &family.events {
                        ui.label(
                            RichText::new(format!("{}  {}", event.year, event.title)).strong(),
                        );
                        if !event.description.trim().is_empty() {
                            ui.label(event.description.as_str());
                        }
                        ui.add_space(4.0);
                    }
                });
        }
    }
}
