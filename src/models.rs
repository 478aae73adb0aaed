//models.rs
use chrono::Weekday;
use serde::{Deserialize, Serialize};

pub const MEALS_PER_DAY: usize = 3;
pub const EXERCISES_PER_DAY: usize = 3;

/// Day slots of a plan, in the order the backend expects them.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Studio {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    #[serde(rename = "memberIds", default)]
    pub member_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Healthplan {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "memberId")]
    pub member_id: String,
    pub name: String,
    pub duration_weeks: u32,
    pub goal: String,
    #[serde(default)]
    pub days: Vec<MealDay>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MealDay {
    pub day: String,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub time: String,
    pub calories: u32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workoutplan {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "memberId")]
    pub member_id: String,
    pub name: String,
    pub duration_weeks: u32,
    pub frequency_per_week: u32,
    pub goal: String,
    #[serde(default)]
    pub days: Vec<TrainingDay>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingDay {
    pub day: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sets: u32,
    pub reps: Reps,
    pub rest_seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
}

/// Rep target: a plain count, or a description such as "AMRAP".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reps {
    Count(u32),
    Text(String),
}

impl Reps {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<u32>() {
            Ok(count) => Reps::Count(count),
            Err(_) => Reps::Text(input.to_string()),
        }
    }
}

impl std::fmt::Display for Reps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reps::Count(count) => write!(f, "{}", count),
            Reps::Text(text) => f.write_str(text),
        }
    }
}

/// Splits comma separated ingredient text, dropping blank entries.
pub fn parse_ingredients(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn week_runs_monday_to_sunday() {
        let names: Vec<&str> = WEEK.iter().map(|d| day_name(*d)).collect();
        assert_eq!(
            names,
            ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
    }

    #[test]
    fn user_reads_backend_id() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "__v": 0
        }))
        .unwrap();
        assert_eq!(user.id.as_deref(), Some("u1"));
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn studio_payload_omits_id() {
        let studio = Studio {
            id: None,
            name: "Alpha".into(),
            description: String::new(),
            location: "NY".into(),
            member_ids: vec!["u1".into()],
        };
        assert_eq!(
            serde_json::to_value(&studio).unwrap(),
            json!({"name": "Alpha", "description": "", "location": "NY", "memberIds": ["u1"]})
        );
    }

    #[test]
    fn studio_without_description_defaults_to_blank() {
        let studio: Studio = serde_json::from_value(json!({
            "_id": "s1", "name": "Beta", "location": "LA", "memberIds": []
        }))
        .unwrap();
        assert_eq!(studio.description, "");
    }

    #[test]
    fn reps_keep_numbers_numeric() {
        assert_eq!(Reps::parse(" 12 "), Reps::Count(12));
        assert_eq!(Reps::parse("AMRAP"), Reps::Text("AMRAP".into()));
        assert_eq!(serde_json::to_value(Reps::Count(8)).unwrap(), json!(8));
        assert_eq!(serde_json::to_value(Reps::parse("8-10")).unwrap(), json!("8-10"));
        let back: Reps = serde_json::from_value(json!("to failure")).unwrap();
        assert_eq!(back.to_string(), "to failure");
    }

    #[test]
    fn exercise_without_duration_leaves_it_out() {
        let exercise = Exercise {
            name: "Squat".into(),
            kind: "Strength".into(),
            sets: 5,
            reps: Reps::Count(5),
            rest_seconds: 120,
            duration_seconds: None,
        };
        let value = serde_json::to_value(&exercise).unwrap();
        assert_eq!(value["type"], "Strength");
        assert!(value.get("duration_seconds").is_none());
    }

    #[test]
    fn ingredients_are_trimmed_and_blank_dropped() {
        assert_eq!(parse_ingredients(" oats, milk ,,honey "), ["oats", "milk", "honey"]);
        assert!(parse_ingredients("").is_empty());
    }
}
