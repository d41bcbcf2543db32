//! Rule-based generation of workout templates.

use std::fmt;

use chrono::Weekday;

use crate::{
    ExercisePrescription, Name, PrescriptionError, Reps, Sets, Weight, WorkoutTemplate,
    weekday_name,
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub focus: Focus,
    pub difficulty: Difficulty,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Focus {
    UpperBody,
    LowerBody,
    Cardio,
    #[default]
    FullBody,
    /// Unknown focus. Uses the full body exercises, but keeps its text for the workout name.
    Custom(String),
}

impl From<&str> for Focus {
    fn from(value: &str) -> Self {
        let value = value.trim();
        match value.to_lowercase().as_str() {
            "upper body" => Focus::UpperBody,
            "lower body" => Focus::LowerBody,
            "cardio" => Focus::Cardio,
            "full body" | "" => Focus::FullBody,
            _ => Focus::Custom(value.to_string()),
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Focus::UpperBody => "upper body",
                Focus::LowerBody => "lower body",
                Focus::Cardio => "cardio",
                Focus::FullBody => "full body",
                Focus::Custom(focus) => focus.as_str(),
            }
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl From<&str> for Difficulty {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "beginner" => Difficulty::Beginner,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Intermediate,
        }
    }
}

struct Template {
    name: &'static str,
    sets: u32,
    reps: u32,
    weight: Option<f32>,
    notes: &'static str,
}

const fn template(name: &'static str, sets: u32, reps: u32, weight: Option<f32>) -> Template {
    Template {
        name,
        sets,
        reps,
        weight,
        notes: "",
    }
}

const UPPER_BODY: &[Template] = &[
    template("Bench Press", 4, 8, Some(135.0)),
    template("Pull-ups", 3, 10, None),
    template("Shoulder Press", 3, 10, Some(95.0)),
    template("Bicep Curls", 3, 12, Some(30.0)),
    template("Tricep Dips", 3, 12, None),
];

const LOWER_BODY: &[Template] = &[
    template("Squats", 4, 10, Some(185.0)),
    template("Deadlifts", 3, 8, Some(225.0)),
    template("Leg Press", 3, 12, Some(270.0)),
    template("Lunges", 3, 12, Some(45.0)),
    template("Calf Raises", 3, 15, Some(90.0)),
];

const CARDIO: &[Template] = &[
    Template {
        notes: "30 minutes at moderate pace",
        ..template("Running", 1, 30, None)
    },
    Template {
        notes: "60 seconds per set",
        ..template("Jump Rope", 5, 60, None)
    },
    template("Burpees", 3, 15, None),
    Template {
        notes: "20 per side",
        ..template("Mountain Climbers", 3, 20, None)
    },
];

const FULL_BODY: &[Template] = &[
    template("Deadlifts", 4, 8, Some(225.0)),
    template("Bench Press", 3, 10, Some(135.0)),
    template("Squats", 3, 12, Some(185.0)),
    template("Pull-ups", 3, 10, None),
    template("Overhead Press", 3, 10, Some(95.0)),
    Template {
        notes: "Hold for 60 seconds",
        ..template("Plank", 3, 1, None)
    },
];

impl Focus {
    fn templates(&self) -> &'static [Template] {
        match self {
            Focus::UpperBody => UPPER_BODY,
            Focus::LowerBody => LOWER_BODY,
            Focus::Cardio => CARDIO,
            Focus::FullBody | Focus::Custom(_) => FULL_BODY,
        }
    }
}

impl Template {
    fn prescription(&self, difficulty: Difficulty) -> Result<ExercisePrescription, PrescriptionError> {
        let weight = match self.weight {
            Some(weight) => Some(Weight::new(difficulty.weight(weight))?.rounded()),
            None => None,
        };
        Ok(ExercisePrescription::new(
            Name::new(self.name)?,
            Sets::new(difficulty.sets(self.sets))?,
            Reps::new(difficulty.reps(self.reps))?,
            weight,
        )
        .with_notes(self.notes))
    }
}

impl Difficulty {
    fn sets(self, sets: u32) -> u32 {
        match self {
            Difficulty::Beginner => sets.saturating_sub(1).max(2),
            Difficulty::Intermediate => sets,
            Difficulty::Advanced => sets + 1,
        }
    }

    fn reps(self, reps: u32) -> u32 {
        match self {
            Difficulty::Beginner => reps.saturating_sub(2).max(8),
            Difficulty::Intermediate => reps,
            Difficulty::Advanced => reps + 2,
        }
    }

    fn weight(self, weight: f32) -> f32 {
        match self {
            Difficulty::Beginner => (weight * 0.6).max(45.0),
            Difficulty::Intermediate => weight,
            Difficulty::Advanced => weight * 1.3,
        }
    }
}

/// Generates a workout for the given day, named e.g. "Upper body Workout - Monday".
pub fn generate_workout(
    day: Option<Weekday>,
    preferences: &Preferences,
) -> Result<WorkoutTemplate, PrescriptionError> {
    let Preferences { focus, difficulty } = preferences;

    let exercises = focus
        .templates()
        .iter()
        .map(|t| t.prescription(*difficulty))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WorkoutTemplate {
        name: Name::new(&workout_name(focus, day))?,
        day,
        exercises,
    })
}

fn workout_name(focus: &Focus, day: Option<Weekday>) -> String {
    let focus = focus.to_string();
    let mut chars = focus.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    match day {
        Some(day) => format!("{capitalized} Workout - {}", weekday_name(day)),
        None => format!("{capitalized} Workout"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::NameError;

    use super::*;

    type Summary = (String, u32, u32, Option<f32>, Option<String>);

    fn summarize(template: &WorkoutTemplate) -> Vec<Summary> {
        template
            .exercises
            .iter()
            .map(|e| {
                (
                    e.name.to_string(),
                    u32::from(e.sets),
                    u32::from(e.reps),
                    e.weight.map(f32::from),
                    e.notes.clone(),
                )
            })
            .collect()
    }

    fn expected(rows: &[(&str, u32, u32, Option<f32>, Option<&str>)]) -> Vec<Summary> {
        rows.iter()
            .map(|(name, sets, reps, weight, notes)| {
                (
                    (*name).to_string(),
                    *sets,
                    *reps,
                    *weight,
                    notes.map(str::to_string),
                )
            })
            .collect()
    }

    #[rstest]
    #[case::upper_body("upper body", Focus::UpperBody)]
    #[case::lower_body(" Lower Body ", Focus::LowerBody)]
    #[case::cardio("cardio", Focus::Cardio)]
    #[case::full_body("full body", Focus::FullBody)]
    #[case::empty(" ", Focus::FullBody)]
    #[case::unknown(" Yoga ", Focus::Custom("Yoga".to_string()))]
    fn test_focus_from_str(#[case] value: &str, #[case] expected: Focus) {
        assert_eq!(Focus::from(value), expected);
    }

    #[rstest]
    #[case::beginner("beginner", Difficulty::Beginner)]
    #[case::advanced("Advanced", Difficulty::Advanced)]
    #[case::intermediate("intermediate", Difficulty::Intermediate)]
    #[case::unknown("", Difficulty::Intermediate)]
    fn test_difficulty_from_str(#[case] value: &str, #[case] expected: Difficulty) {
        assert_eq!(Difficulty::from(value), expected);
    }

    #[rstest]
    #[case::without_day(Focus::UpperBody, None, "Upper body Workout")]
    #[case::with_day(Focus::FullBody, Some(Weekday::Mon), "Full body Workout - Monday")]
    #[case::cardio(Focus::Cardio, Some(Weekday::Sat), "Cardio Workout - Saturday")]
    #[case::custom(Focus::Custom("mobility".to_string()), None, "Mobility Workout")]
    fn test_generate_workout_name(
        #[case] focus: Focus,
        #[case] day: Option<Weekday>,
        #[case] expected: &str,
    ) {
        let preferences = Preferences {
            focus,
            ..Preferences::default()
        };
        let template = generate_workout(day, &preferences).unwrap();

        assert_eq!(template.name.as_str(), expected);
        assert_eq!(template.day, day);
    }

    #[test]
    fn test_generate_workout_intermediate() {
        let template = generate_workout(None, &Preferences::default()).unwrap();

        assert_eq!(
            summarize(&template),
            expected(&[
                ("Deadlifts", 4, 8, Some(225.0), None),
                ("Bench Press", 3, 10, Some(135.0), None),
                ("Squats", 3, 12, Some(185.0), None),
                ("Pull-ups", 3, 10, None, None),
                ("Overhead Press", 3, 10, Some(95.0), None),
                ("Plank", 3, 1, None, Some("Hold for 60 seconds")),
            ])
        );
    }

    #[test]
    fn test_generate_workout_custom_focus() {
        let preferences = Preferences {
            focus: Focus::from("yoga"),
            ..Preferences::default()
        };
        let template = generate_workout(Some(Weekday::Sun), &preferences).unwrap();

        assert_eq!(template.name.as_str(), "Yoga Workout - Sunday");
        assert_eq!(
            summarize(&template),
            summarize(&generate_workout(None, &Preferences::default()).unwrap())
        );
    }

    #[test]
    fn test_generate_workout_custom_focus_name_too_long() {
        let preferences = Preferences {
            focus: Focus::Custom("a".repeat(60)),
            ..Preferences::default()
        };

        assert_eq!(
            generate_workout(None, &preferences),
            Err(PrescriptionError::Name(NameError::TooLong(68)))
        );
    }

    #[test]
    fn test_generate_workout_beginner() {
        let preferences = Preferences {
            focus: Focus::UpperBody,
            difficulty: Difficulty::Beginner,
        };
        let template = generate_workout(None, &preferences).unwrap();

        assert_eq!(
            summarize(&template),
            expected(&[
                ("Bench Press", 3, 8, Some(81.0), None),
                ("Pull-ups", 2, 8, None, None),
                ("Shoulder Press", 2, 8, Some(57.0), None),
                ("Bicep Curls", 2, 10, Some(45.0), None),
                ("Tricep Dips", 2, 10, None, None),
            ])
        );
    }

    #[test]
    fn test_generate_workout_advanced() {
        let preferences = Preferences {
            focus: Focus::LowerBody,
            difficulty: Difficulty::Advanced,
        };
        let template = generate_workout(Some(Weekday::Wed), &preferences).unwrap();

        assert_eq!(
            summarize(&template),
            expected(&[
                ("Squats", 5, 12, Some(240.5), None),
                ("Deadlifts", 4, 10, Some(292.5), None),
                ("Leg Press", 4, 14, Some(351.0), None),
                ("Lunges", 4, 14, Some(58.5), None),
                ("Calf Raises", 4, 17, Some(117.0), None),
            ])
        );
    }

    #[test]
    fn test_generate_workout_cardio_notes() {
        let preferences = Preferences {
            focus: Focus::Cardio,
            difficulty: Difficulty::Beginner,
        };
        let template = generate_workout(None, &preferences).unwrap();

        assert_eq!(
            summarize(&template),
            expected(&[
                ("Running", 2, 28, None, Some("30 minutes at moderate pace")),
                ("Jump Rope", 4, 58, None, Some("60 seconds per set")),
                ("Burpees", 2, 13, None, None),
                ("Mountain Climbers", 2, 18, None, Some("20 per side")),
            ])
        );
    }
}
