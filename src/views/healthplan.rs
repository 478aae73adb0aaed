use eframe::egui::{self, DragValue, Ui};
use egui_extras::{Column, TableBuilder};
use serde_json::Value;

use crate::api::{ApiClient, Resource};
use crate::models::{day_name, parse_ingredients, Healthplan, Meal, MealDay, MEALS_PER_DAY, WEEK};
use crate::views::{
    created_echo, member_select, post_failure, required, required_count, section_heading,
    text_field, FormError, Listing, Members, Notice,
};

#[derive(Debug, Default, Clone)]
pub struct MealForm {
    pub name: String,
    pub time: String,
    pub calories: u32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub ingredients: String,
}

impl MealForm {
    fn to_meal(&self) -> Meal {
        Meal {
            name: self.name.trim().to_string(),
            time: self.time.trim().to_string(),
            calories: self.calories,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
            ingredients: parse_ingredients(&self.ingredients),
        }
    }

    fn ui(&mut self, ui: &mut Ui, n: usize) {
        text_field(ui, &format!("Meal {} Name", n), &mut self.name);
        text_field(ui, &format!("Meal {} Time (e.g., 'Breakfast', 'Lunch')", n), &mut self.time);
        ui.horizontal(|ui| {
            ui.label("Calories");
            ui.add(DragValue::new(&mut self.calories).range(0..=10_000));
            ui.label("Protein (g)");
            ui.add(DragValue::new(&mut self.protein_g).speed(0.1).range(0.0..=1_000.0));
            ui.label("Carbs (g)");
            ui.add(DragValue::new(&mut self.carbs_g).speed(0.1).range(0.0..=1_000.0));
            ui.label("Fat (g)");
            ui.add(DragValue::new(&mut self.fat_g).speed(0.1).range(0.0..=1_000.0));
        });
        ui.label(format!("Ingredients for Meal {} (comma separated)", n));
        ui.text_edit_multiline(&mut self.ingredients);
    }
}

#[derive(Debug)]
pub struct HealthplanForm {
    pub member_id: Option<String>,
    pub name: String,
    pub duration_weeks: u32,
    pub goal: String,
    /// One row of meals per entry in `WEEK`.
    pub meals: Vec<Vec<MealForm>>,
}

impl Default for HealthplanForm {
    fn default() -> Self {
        Self {
            member_id: None,
            name: String::new(),
            duration_weeks: 1,
            goal: String::new(),
            meals: vec![vec![MealForm::default(); MEALS_PER_DAY]; WEEK.len()],
        }
    }
}

impl HealthplanForm {
    pub fn payload(&self) -> Result<Healthplan, FormError> {
        let name = required(&self.name, "Healthplan Name")?;
        let duration_weeks = required_count(self.duration_weeks, "Duration in weeks")?;
        let goal = required(&self.goal, "Goal")?;
        let member_id = self
            .member_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(FormError::NoMember)?;

        let days = WEEK
            .iter()
            .zip(&self.meals)
            .map(|(day, meals)| MealDay {
                day: day_name(*day).to_string(),
                meals: meals.iter().map(MealForm::to_meal).collect(),
            })
            .collect();

        Ok(Healthplan {
            id: None,
            member_id,
            name,
            duration_weeks,
            goal,
            days,
        })
    }
}

pub struct HealthplanView {
    pub form: HealthplanForm,
    pub members: Members,
    pub listing: Listing<Healthplan>,
    pub notice: Option<Notice>,
    pub created: Option<Value>,
}

impl HealthplanView {
    pub fn new() -> Self {
        Self {
            form: HealthplanForm::default(),
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
            self.listing = Listing::load(api, Resource::Healthplan);
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

        match api.create_record(Resource::Healthplan, &payload) {
            Ok(created) => {
                tracing::info!("Created healthplan {:?}", payload.name);
                self.notice = Some(Notice::Success(format!(
                    "Healthplan '{}' created successfully!",
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
        ui.heading("Healthplan Management");
        section_heading(ui, "Create a New Healthplan");

        let member_id = &mut self.form.member_id;
        self.members.ui(ui, |ui, directory| {
            member_select(ui, "Select Member for the Healthplan", directory, member_id);
        });

        text_field(ui, "Healthplan Name", &mut self.form.name);
        ui.horizontal(|ui| {
            ui.label("Duration (in weeks)");
            ui.add(DragValue::new(&mut self.form.duration_weeks).range(1..=520));
        });
        text_field(ui, "Goal (e.g., 'Weight Loss', 'Muscle Gain')", &mut self.form.goal);

        for (day, meals) in WEEK.iter().zip(self.form.meals.iter_mut()) {
            ui.push_id(day_name(*day), |ui| {
                ui.strong(day_name(*day));
                for (i, meal) in meals.iter_mut().enumerate() {
                    egui::CollapsingHeader::new(format!("Meal {}", i + 1))
                        .id_salt(i)
                        .show(ui, |ui| meal.ui(ui, i + 1));
                }
            });
        }

        if ui.button("Create Healthplan").clicked() {
            self.submit(api);
        }
        if let Some(notice) = &self.notice {
            notice.ui(ui);
        }
        if let Some(created) = &self.created {
            created_echo(ui, created);
        }

        section_heading(ui, "List of Healthplans");
        let directory = self.members.directory();
        self.listing.ui(ui, "healthplans", |ui, plans| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::remainder())
                .column(Column::auto())
                .header(22.0, |mut header| {
                    for title in ["Name", "Member", "Weeks", "Goal", "Meals"] {
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
                        let meals: usize = plan.days.iter().map(|d| d.meals.len()).sum();
                        body.row(20.0, |mut row| {
                            row.col(|ui| {
                                ui.label(plan.name.as_str());
                            });
                            row.col(|ui| {
                                ui.label(member);
                            });
                            row.col(|ui| {
                                ui.label(plan.duration_weeks.to_string());
                            });
                            row.col(|ui| {
                                ui.label(plan.goal.as_str());
                            });
                            row.col(|ui| {
                                ui.label(meals.to_string());
                            });
                        });
                    }
                });
        });
    }
}

impl Default for HealthplanView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{client_for, members_body};
    use mockito::Matcher;
    use serde_json::json;

    fn filled_form() -> HealthplanForm {
        let mut form = HealthplanForm {
            member_id: Some("u1".into()),
            name: "Cut".into(),
            duration_weeks: 8,
            goal: "Weight Loss".into(),
            ..Default::default()
        };
        let breakfast = &mut form.meals[0][0];
        breakfast.name = "Porridge".into();
        breakfast.time = "Breakfast".into();
        breakfast.calories = 350;
        breakfast.protein_g = 12.5;
        breakfast.ingredients = "oats, milk, honey".into();
        form
    }

    #[test]
    fn payload_always_has_seven_days_of_three_meals() {
        let plan = filled_form().payload().unwrap();

        assert_eq!(plan.days.len(), 7);
        assert_eq!(plan.days[0].day, "Monday");
        assert_eq!(plan.days[6].day, "Sunday");
        assert!(plan.days.iter().all(|d| d.meals.len() == MEALS_PER_DAY));
        assert_eq!(plan.days[0].meals[0].ingredients, ["oats", "milk", "honey"]);
        assert!(plan.days[3].meals[2].ingredients.is_empty());
    }

    #[test]
    fn payload_uses_backend_field_names() {
        let value = serde_json::to_value(filled_form().payload().unwrap()).unwrap();

        assert_eq!(value["memberId"], "u1");
        assert_eq!(value["duration_weeks"], 8);
        assert_eq!(value["goal"], "Weight Loss");
        assert_eq!(value["days"][0]["meals"][0]["protein_g"], 12.5);
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn checks_run_in_field_order() {
        let mut form = filled_form();
        form.member_id = None;
        assert_eq!(form.payload().unwrap_err().to_string(), "A member must be selected.");
        form.goal = " ".into();
        assert_eq!(form.payload().unwrap_err().to_string(), "Goal is required.");
        form.duration_weeks = 0;
        assert_eq!(form.payload().unwrap_err().to_string(), "Duration in weeks is required.");
        form.name.clear();
        assert_eq!(form.payload().unwrap_err().to_string(), "Healthplan Name is required.");
    }

    #[test]
    fn refresh_defaults_to_first_member() {
        let mut server = mockito::Server::new();
        let _users = server.mock("GET", "/api/v1/user").with_body(members_body()).create();
        let _plans = server.mock("GET", "/api/v1/healthplan").with_body("[]").create();

        let mut view = HealthplanView::new();
        view.refresh(&client_for(&server));

        assert_eq!(view.form.member_id.as_deref(), Some("u1"));
        assert!(!view.needs_refresh());
    }

    #[test]
    fn missing_goal_never_reaches_the_backend() {
        let mut server = mockito::Server::new();
        let post = server.mock("POST", "/api/v1/healthplan").expect(0).create();
        let mut view = HealthplanView::new();
        view.form = filled_form();
        view.form.goal.clear();

        view.submit(&client_for(&server));

        post.assert();
        assert_eq!(view.notice, Some(Notice::Error("Goal is required.".into())));
    }

    #[test]
    fn valid_plan_is_posted_and_echoed() {
        let mut server = mockito::Server::new();
        let post = server
            .mock("POST", "/api/v1/healthplan")
            .match_body(Matcher::PartialJson(json!({
                "memberId": "u1",
                "name": "Cut",
                "duration_weeks": 8,
                "goal": "Weight Loss"
            })))
            .with_status(201)
            .with_body(
                json!({
                    "_id": "h1", "memberId": "u1", "name": "Cut",
                    "duration_weeks": 8, "goal": "Weight Loss", "days": []
                })
                .to_string(),
            )
            .create();

        let mut view = HealthplanView::new();
        view.form = filled_form();
        view.submit(&client_for(&server));

        post.assert();
        assert_eq!(
            view.notice,
            Some(Notice::Success("Healthplan 'Cut' created successfully!".into()))
        );
        assert_eq!(view.created.as_ref().map(|p| &p["_id"]), Some(&json!("h1")));
    }

    #[test]
    fn rejected_plan_keeps_the_form() {
        let mut server = mockito::Server::new();
        let _post = server.mock("POST", "/api/v1/healthplan").with_status(422).create();
        let mut view = HealthplanView::new();
        view.form = filled_form();

        view.submit(&client_for(&server));

        assert!(matches!(view.notice, Some(Notice::Error(_))));
        assert_eq!(view.form.meals[0][0].name, "Porridge");
    }
}
