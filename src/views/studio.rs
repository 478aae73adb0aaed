use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};
use serde_json::Value;

use crate::api::{ApiClient, Resource};
use crate::models::Studio;
use crate::views::{
    created_echo, post_failure, required, section_heading, text_field, FormError, Listing, Members,
    Notice,
};

#[derive(Debug, Default)]
pub struct StudioForm {
    pub name: String,
    pub description: String,
    pub location: String,
    /// Picked member ids, in the order they were picked.
    pub member_ids: Vec<String>,
}

impl StudioForm {
    pub fn toggle_member(&mut self, id: &str) {
        if let Some(pos) = self.member_ids.iter().position(|m| m == id) {
            self.member_ids.remove(pos);
        } else {
            self.member_ids.push(id.to_string());
        }
    }

    pub fn payload(&self) -> Result<Studio, FormError> {
        let name = required(&self.name, "Studio Name")?;
        let location = required(&self.location, "Location")?;
        if self.member_ids.is_empty() {
            return Err(FormError::NoMembers);
        }

        Ok(Studio {
            id: None,
            name,
            description: self.description.trim().to_string(),
            location,
            member_ids: self.member_ids.clone(),
        })
    }
}

pub struct StudioView {
    pub form: StudioForm,
    pub members: Members,
    pub listing: Listing<Studio>,
    pub notice: Option<Notice>,
    pub created: Option<Value>,
}

impl StudioView {
    pub fn new() -> Self {
        Self {
            form: StudioForm::default(),
            members: Members::Pending,
            listing: Listing::Pending,
            notice: None,
            created: None,
        }
    }

    pub fn needs_refresh(&self) -> bool {
        self.members.is_pending() || self.listing.is_pending()
    }

    pub fn refresh(&mut self, api: &ApiClient) {
        if self.members.is_pending() {
            self.members = Members::load(api);
        }
        if self.listing.is_pending() {
            self.listing = Listing::load(api, Resource::Studio);
        }
    }

    pub fn submit(&mut self, api: &ApiClient) {
        let payload = match self.form.payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.notice = Some(Notice::Error(e.to_string()));
                self.created = None;
                return;
            }
        };

        match api.create_record(Resource::Studio, &payload) {
            Ok(created) => {
                tracing::info!("Created studio {:?}", payload.name);
                self.notice = Some(Notice::Success(format!(
                    "Studio '{}' created successfully!",
                    payload.name
                )));
                self.created = Some(created);
                self.listing = Listing::Pending;
            }
            Err(e) => {
                self.notice = Some(Notice::Error(post_failure(&e)));
                self.created = None;
            }
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, api: &ApiClient) {
        ui.heading("Studio Management");
        section_heading(ui, "Create a New Studio");

        let form = &mut self.form;
        self.members.ui(ui, |ui, directory| {
            ui.label("Select Members for the Studio");
            ui.horizontal_wrapped(|ui| {
                for (name, id) in directory.iter() {
                    let mut picked = form.member_ids.iter().any(|m| m == id);
                    if ui.checkbox(&mut picked, name).changed() {
                        form.toggle_member(id);
                    }
                }
            });
        });

        text_field(ui, "Studio Name", &mut self.form.name);
        ui.label("Description (Optional)");
        ui.text_edit_multiline(&mut self.form.description);
        text_field(ui, "Location", &mut self.form.location);

        if ui.button("Create Studio").clicked() {
            self.submit(api);
        }
        if let Some(notice) = &self.notice {
            notice.ui(ui);
        }
        if let Some(created) = &self.created {
            created_echo(ui, created);
        }

        section_heading(ui, "List of Studios");
        self.listing.ui(ui, "studios", |ui, studios| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .column(Column::auto())
                .column(Column::remainder())
                .column(Column::auto())
                .column(Column::auto())
                .header(22.0, |mut header| {
                    for title in ["Name", "Description", "Location", "Members"] {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|mut body| {
                    for studio in studios {
                        body.row(20.0, |mut row| {
                            row.col(|ui| {
                                ui.label(studio.name.as_str());
                            });
                            row.col(|ui| {
                                ui.label(studio.description.as_str());
                            });
                            row.col(|ui| {
                                ui.label(studio.location.as_str());
                            });
                            row.col(|ui| {
                                ui.label(studio.member_ids.len().to_string())
                                    .on_hover_text(studio.member_ids.join(", "));
                            });
                        });
                    }
                });
        });
    }
}

impl Default for StudioView {
    fn default() -> Self {
        Self::new()
    }
}
