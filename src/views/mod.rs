use chrono::{DateTime, Local};
use eframe::egui::{self, Color32, RichText, Ui};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::api::{ApiClient, ApiError, Resource};
use crate::models::User;

pub mod healthplan;
pub mod studio;
pub mod users;
pub mod workoutplan;

pub use healthplan::HealthplanView;
pub use studio::StudioView;
pub use users::UsersView;
pub use workoutplan::WorkoutplanView;

/// Reasons a form is refused before anything is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required.")]
    Required(&'static str),

    #[error("At least one member must be selected.")]
    NoMembers,

    #[error("A member must be selected.")]
    NoMember,
}

/// Trimmed value of a required text field.
pub fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(value.to_string())
    }
}

pub fn required_count(value: u32, field: &'static str) -> Result<u32, FormError> {
    if value == 0 {
        Err(FormError::Required(field))
    } else {
        Ok(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn ui(&self, ui: &mut Ui) {
        match self {
            Notice::Success(text) => ui.colored_label(Color32::from_rgb(60, 160, 90), text.as_str()),
            Notice::Error(text) => ui.colored_label(Color32::RED, text.as_str()),
        };
    }
}

/// Existing records of one collection, as last fetched.
#[derive(Debug)]
pub enum Listing<T> {
    Pending,
    Loaded {
        records: Vec<T>,
        fetched_at: DateTime<Local>,
    },
    Unavailable(String),
}

impl<T: DeserializeOwned> Listing<T> {
    pub fn load(api: &ApiClient, resource: Resource) -> Self {
        match api.fetch_list(resource) {
            Ok(records) => Listing::Loaded {
                records,
                fetched_at: Local::now(),
            },
            Err(e) => Listing::Unavailable(fetch_failure(&e)),
        }
    }
}

impl<T> Listing<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Listing::Pending)
    }

    #[cfg(test)]
    pub fn records(&self) -> &[T] {
        match self {
            Listing::Loaded { records, .. } => records,
            _ => &[],
        }
    }

    /// Draws the table via `table`, or the "none found" state when there is nothing to show.
    pub fn ui(&self, ui: &mut Ui, plural: &str, table: impl FnOnce(&mut Ui, &[T])) {
        match self {
            Listing::Pending => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading…");
                });
            }
            Listing::Loaded { records, fetched_at } if !records.is_empty() => {
                ui.label(
                    RichText::new(format!("Last refreshed {}", fetched_at.format("%H:%M:%S")))
                        .small()
                        .weak(),
                );
                table(ui, records);
            }
            Listing::Loaded { .. } => {
                ui.label(format!("No {} found or an error occurred.", plural));
            }
            Listing::Unavailable(error) => {
                ui.colored_label(Color32::RED, error.as_str());
                ui.label(format!("No {} found or an error occurred.", plural));
            }
        }
    }
}

pub fn fetch_failure(error: &ApiError) -> String {
    format!("An error occurred while fetching data: {}", error)
}

pub fn post_failure(error: &ApiError) -> String {
    format!("An error occurred while posting data: {}", error)
}

/// Display names of selectable members, in backend order, with their ids.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemberDirectory {
    entries: Vec<(String, String)>,
}

impl MemberDirectory {
    pub fn from_users(users: &[User]) -> Self {
        let entries = users
            .iter()
            .filter_map(|user| user.id.clone().map(|id| (user.display_name(), id)))
            .collect();
        Self { entries }
    }

    pub fn first_id(&self) -> Option<&str> {
        self.entries.first().map(|(_, id)| id.as_str())
    }

    #[cfg(test)]
    pub fn id_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(label, _)| label == name)
            .map(|(_, id)| id.as_str())
    }

    pub fn name_for(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, member)| member == id)
            .map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(label, id)| (label.as_str(), id.as_str()))
    }
}

#[derive(Debug)]
pub enum Members {
    Pending,
    Ready(MemberDirectory),
    Unavailable,
}

impl Members {
    pub fn load(api: &ApiClient) -> Self {
        match api.fetch_list::<User>(Resource::User) {
            Ok(users) => {
                let directory = MemberDirectory::from_users(&users);
                if directory.entries.is_empty() {
                    tracing::warn!("No members to choose from");
                    Members::Unavailable
                } else {
                    Members::Ready(directory)
                }
            }
            Err(e) => {
                tracing::warn!("Member lookup failed: {}", e);
                Members::Unavailable
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Members::Pending)
    }

    pub fn directory(&self) -> Option<&MemberDirectory> {
        match self {
            Members::Ready(directory) => Some(directory),
            _ => None,
        }
    }

    /// Draws `pick` with the directory, or why there is nothing to pick from.
    pub fn ui(&self, ui: &mut Ui, pick: impl FnOnce(&mut Ui, &MemberDirectory)) {
        match self {
            Members::Pending => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading members…");
                });
            }
            Members::Ready(directory) => pick(ui, directory),
            Members::Unavailable => {
                ui.colored_label(Color32::RED, "Unable to fetch members. Please try again later.");
            }
        }
    }
}

/// Single member picker shared by the plan forms.
pub fn member_select(ui: &mut Ui, label: &str, directory: &MemberDirectory, selected: &mut Option<String>) {
    let shown = selected
        .as_deref()
        .and_then(|id| directory.name_for(id))
        .unwrap_or("Choose a member")
        .to_string();

    egui::ComboBox::from_label(label)
        .selected_text(shown)
        .show_ui(ui, |ui| {
            for (name, id) in directory.iter() {
                ui.selectable_value(selected, Some(id.to_string()), name);
            }
        });
}

/// Labelled single line text input.
pub fn text_field(ui: &mut Ui, label: &str, value: &mut String) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.text_edit_singleline(value);
    });
}

/// The backend's reply to a create, whatever shape it took.
pub fn created_echo(ui: &mut Ui, record: &Value) {
    match serde_json::to_string_pretty(record) {
        Ok(json) => {
            egui::CollapsingHeader::new("Created record")
                .default_open(true)
                .show(ui, |ui| {
                    ui.monospace(json);
                });
        }
        Err(e) => tracing::warn!("Could not render created record: {}", e),
    }
}

pub fn section_heading(ui: &mut Ui, text: &str) {
    ui.separator();
    ui.label(RichText::new(text).heading().strong());
    ui.add_space(6.0);
}
