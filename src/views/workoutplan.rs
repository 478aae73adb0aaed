use eframe::egui::{self, DragValue, Ui};
use egui_extras::{Column, TableBuilder};
use serde_json::Value;

use crate::api::{ApiClient, Resource};
use crate::models::{day_name, Exercise, Reps, TrainingDay, Workoutplan, EXERCISES_PER_DAY, WEEK};
use crate::views::{
    created_echo, member_select, post_failure, required, required_count, section_heading,
    text_field, FormError, Listing, Members, Notice,
};

#[derive(Debug, Clone)]
pub struct ExerciseForm {
    pub name: String,
    pub kind: String,
    pub sets: u32,
    pub reps: String,
    pub rest_seconds: u32,
    /// Zero means the exercise is not timed.
    pub duration_seconds: u32,
}

impl Default for ExerciseForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: String::new(),
            sets: 1,
            reps: String::new(),
            rest_seconds: 0,
            duration_seconds: 0,
        }
    }
}

impl ExerciseForm {
    fn to_exercise(&self) -> Exercise {
        Exercise {
            name: self.name.trim().to_string(),
            kind: self.kind.trim().to_string(),
            sets: self.sets,
            reps: Reps::parse(&self.reps),
            rest_seconds: self.rest_seconds,
            duration_seconds: (self.duration_seconds > 0).then_some(self.duration_seconds),
        }
    }

    fn ui(&mut self, ui: &mut Ui, n: usize) {
        text_field(ui, &format!("Exercise {} Name", n), &mut self.name);
        text_field(ui, &format!("Exercise {} Type (e.g., 'Strength', 'Cardio')", n), &mut self.kind);
        text_field(ui, "Reps (a number or a description like 'AMRAP')", &mut self.reps);
        ui.horizontal(|ui| {
            ui.label("Sets");
            ui.add(DragValue::new(&mut self.sets).range(1..=100));
            ui.label("Rest (s)");
            ui.add(DragValue::new(&mut self.rest_seconds).speed(10).range(0..=3_600));
            ui.label("Duration (s, if timed)");
            ui.add(DragValue::new(&mut self.duration_seconds).speed(10).range(0..=36_000));
        });
    }
}

#[derive(Debug, Default, Clone)]
pub struct DayForm {
    pub focus: String,
    pub exercises: Vec<ExerciseForm>,
}

#[derive(Debug)]
pub struct WorkoutplanForm {
    pub member_id: Option<String>,
    pub name: String,
    pub duration_weeks: u32,
    pub frequency_per_week: u32,
    pub goal: String,
    /// One entry per day in `WEEK`.
    pub days: Vec<DayForm>,
}

impl Default for WorkoutplanForm {
    fn default() -> Self {
        let day = DayForm {
            focus: String::new(),
            exercises: vec![ExerciseForm::default(); EXERCISES_PER_DAY],
        };
        Self {
            member_id: None,
            name: String::new(),
            duration_weeks: 1,
            frequency_per_week: 1,
            goal: String::new(),
            days: vec![day; WEEK.len()],
        }
    }
}

impl WorkoutplanForm {
    pub fn payload(&self) -> Result<Workoutplan, FormError> {
        let name = required(&self.name, "Workoutplan Name")?;
        let duration_weeks = required_count(self.duration_weeks, "Duration in weeks")?;
        let frequency_per_week = required_count(self.frequency_per_week, "Frequency per week")?;
        let goal = required(&self.goal, "Goal")?;
        let member_id = self
            .member_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(FormError::NoMember)?;

        let days = WEEK
            .iter()
            .zip(&self.days)
            .map(|(day, form)| TrainingDay {
                day: day_name(*day).to_string(),
                focus: form.focus.trim().to_string(),
                exercises: form.exercises.iter().map(ExerciseForm::to_exercise).collect(),
            })
            .collect();

        Ok(Workoutplan {
            id: None,
            member_id,
            name,
            duration_weeks,
            frequency_per_week,
            goal,
            days,
        })
    }
}

pub struct WorkoutplanView {
    pub form: WorkoutplanForm,
    pub members: Members,
    pub listing: Listing<Workoutplan>,
    pub notice: Option<Notice>,
    pub created: Option<Value>,
}

impl WorkoutplanView {
    pub fn new() -> Self {
        Self {
            form: WorkoutplanForm::default(),
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
            if self.form.member_id.is_none() {
                self.form.member_id = self
                    .members
                    .directory()
                    .and_then(|d| d.first_id())
                    .map(String::from);
            }
        }
        if self.listing.is_pending() {
            self.listing = Listing::load(api, Resource::Workoutplan);
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

        match api.create_record(Resource::Workoutplan, &payload) {
            Ok(created) => {
                tracing::info!("Created workoutplan {:?}", payload.name);
                self.notice = Some(Notice::Success(format!(
                    "Workoutplan '{}' created successfully!",
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
        ui.heading("Workoutplan Management");
        section_heading(ui, "Create a New Workoutplan");

        let member_id = &mut self.form.member_id;
        self.members.ui(ui, |ui, directory| {
            member_select(ui, "Select Member for the Workoutplan", directory, member_id);
        });

        text_field(ui, "Workoutplan Name", &mut self.form.name);
        ui.horizontal(|ui| {
            ui.label("Duration (in weeks)");
            ui.add(DragValue::new(&mut self.form.duration_weeks).range(1..=520));
            ui.label("Frequency per week");
            ui.add(DragValue::new(&mut self.form.frequency_per_week).range(1..=14));
        });
        text_field(ui, "Goal (e.g., 'Strength Building', 'Endurance')", &mut self.form.goal);

        for (day, form) in WEEK.iter().zip(self.form.days.iter_mut()) {
            let day = day_name(*day);
            ui.push_id(day, |ui| {
                ui.strong(day);
                text_field(ui, &format!("Focus for {} (e.g., 'Upper Body', 'Cardio')", day), &mut form.focus);
                for (i, exercise) in form.exercises.iter_mut().enumerate() {
                    egui::CollapsingHeader::new(format!("Exercise {}", i + 1))
                        .id_salt(i)
                        .show(ui, |ui| exercise.ui(ui, i + 1));
                }
            });
        }

        if ui.button("Create Workoutplan").clicked() {
            self.submit(api);
        }
        if let Some(notice) = &self.notice {
            notice.ui(ui);
        }
        if let Some(created) = &self.created {
            created_echo(ui, created);
        }

        section_heading(ui, "List of Workoutplans");
        let directory = self.members.directory();
        self.listing.ui(ui, "workoutplans", |ui, plans| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::remainder())
                .header(22.0, |mut header| {
                    for title in ["Name", "Member", "Weeks", "Per week", "Goal"] {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|mut body| {
                    for plan in plans {
                        let member = directory
                            .and_then(|d| d.name_for(&plan.member_id))
                            .unwrap_or(plan.member_id.as_str());
                        let focus: Vec<String> = plan
                            .days
                            .iter()
                            .filter(|d| !d.focus.is_empty())
                            .map(|d| format!("{}: {}", d.day, d.focus))
                            .collect();
                        body.row(20.0, |mut row| {
                            row.col(|ui| {
                                ui.label(plan.name.as_str()).on_hover_text(focus.join("\n"));
                            });
                            row.col(|ui| {
                                ui.label(member);
                            });
                            row.col(|ui| {
                                ui.label(plan.duration_weeks.to_string());
                            });
                            row.col(|ui| {
                                ui.label(plan.frequency_per_week.to_string());
                            });
                            row.col(|ui| {
                                ui.label(plan.goal.as_str());
                            });
                        });
                    }
                });
        });
    }
}

impl Default for WorkoutplanView {
    fn default() -> Self {
        Self::new()
    }
}
