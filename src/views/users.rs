use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};
use serde_json::Value;

use crate::api::{ApiClient, Resource};
use crate::models::User;
use crate::views::{created_echo, post_failure, required, section_heading, text_field, FormError, Listing, Notice};

#[derive(Debug, Default)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl UserForm {
    pub fn payload(&self) -> Result<User, FormError> {
        Ok(User {
            id: None,
            first_name: required(&self.first_name, "First Name")?,
            last_name: required(&self.last_name, "Last Name")?,
            email: required(&self.email, "Email")?,
        })
    }
}

pub struct UsersView {
    pub form: UserForm,
    pub listing: Listing<User>,
    pub notice: Option<Notice>,
    pub created: Option<Value>,
}

impl UsersView {
    pub fn new() -> Self {
        Self {
            form: UserForm::default(),
            listing: Listing::Pending,
            notice: None,
            created: None,
        }
    }

    pub fn needs_refresh(&self) -> bool {
        self.listing.is_pending()
    }

    pub fn refresh(&mut self, api: &ApiClient) {
        if self.listing.is_pending() {
            self.listing = Listing::load(api, Resource::User);
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

        match api.create_record(Resource::User, &payload) {
            Ok(created) => {
                tracing::info!("Created user {:?}", payload.email);
                self.notice = Some(Notice::Success(format!(
                    "User '{}' with email '{}' created successfully!",
                    payload.display_name(),
                    payload.email
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
        ui.heading("User Management");
        section_heading(ui, "Create a New User");

        text_field(ui, "First Name", &mut self.form.first_name);
        text_field(ui, "Last Name", &mut self.form.last_name);
        text_field(ui, "Email", &mut self.form.email);

        if ui.button("Create User").clicked() {
            self.submit(api);
        }
        if let Some(notice) = &self.notice {
            notice.ui(ui);
        }
        if let Some(created) = &self.created {
            created_echo(ui, created);
        }

        section_heading(ui, "List of Users");
        self.listing.ui(ui, "users", |ui, users| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::remainder())
                .header(22.0, |mut header| {
                    for title in ["ID", "First Name", "Last Name", "Email"] {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|mut body| {
                    for user in users {
                        body.row(20.0, |mut row| {
                            row.col(|ui| {
                                ui.monospace(user.id.as_deref().unwrap_or("-"));
                            });
                            row.col(|ui| {
                                ui.label(user.first_name.as_str());
                            });
                            row.col(|ui| {
                                ui.label(user.last_name.as_str());
                            });
                            row.col(|ui| {
                                ui.label(user.email.as_str());
                            });
                        });
                    }
                });
        });
    }
}

impl Default for UsersView {
    fn default() -> Self {
        Self::new()
    }
}
