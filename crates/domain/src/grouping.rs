//! Grouping of near-duplicate exercises into exercise families.
//!
//! Exercise names are reduced to a base name by stripping variation keywords (equipment, tempo,
//! angle, laterality and stance qualifiers). Exercises sharing a base name form one group, so that
//! "Paused Barbell Bench Press" and "Incline Dumbbell Bench Press" are shown as variations of
//! "Bench Press".

use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
    sync::LazyLock,
};

use icu_collator::{Collator, CollatorOptions};
use log::warn;
use regex::Regex;

use crate::ExerciseRecord;

pub const VARIATION_KEYWORDS: &[&str] = &[
    "paused",
    "pause",
    "tempo",
    "slow",
    "fast",
    "incline",
    "decline",
    "flat",
    "wide",
    "narrow",
    "close",
    "single",
    "one",
    "unilateral",
    "double",
    "two",
    "bilateral",
    "alternating",
    "alt",
    "concentric",
    "eccentric",
    "isometric",
    "iso",
    "explosive",
    "plyometric",
    "reverse",
    "negative",
    "45-degree",
    "45 degree",
    "45°",
    "90-degree",
    "90 degree",
    "90°",
    "seated",
    "standing",
    "lying",
    "dumbbell",
    "barbell",
    "cable",
    "machine",
];

/// Base names shorter than this fall back to the original name.
const MIN_BASE_NAME_CHARS: usize = 3;

static VARIATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    VARIATION_KEYWORDS
        .iter()
        .map(|keyword| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword)))
                .expect("escaped keyword is a valid pattern")
        })
        .collect()
});

/// Returns the canonical family name of an exercise.
///
/// If stripping the variation keywords leaves fewer than three characters, the name consisted
/// (almost) entirely of keywords and is returned unchanged.
#[must_use]
pub fn base_name(name: &str) -> String {
    let mut stripped = name.to_lowercase();

    for pattern in VARIATION_PATTERNS.iter() {
        stripped = pattern.replace_all(&stripped, "").into_owned();
    }

    let words = stripped.split_whitespace().collect::<Vec<_>>();

    if words.join(" ").chars().count() < MIN_BASE_NAME_CHARS {
        return name.to_string();
    }

    words
        .into_iter()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseGroup {
    base_name: String,
    exercises: Vec<ExerciseRecord>,
    primary_idx: usize,
}

impl ExerciseGroup {
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    #[must_use]
    pub fn exercises(&self) -> &[ExerciseRecord] {
        &self.exercises
    }

    /// The exercise with the shortest name, usually the plain version of the movement.
    #[must_use]
    pub fn primary_exercise(&self) -> &ExerciseRecord {
        &self.exercises[self.primary_idx]
    }

    #[must_use]
    pub fn has_variations(&self) -> bool {
        self.exercises.len() > 1
    }

    /// Names of the variations, excluding the primary exercise.
    ///
    /// Exercises are excluded if they are the primary exercise or share its name. Remaining names
    /// are deduplicated case-insensitively, keeping the casing of the first occurrence.
    #[must_use]
    pub fn variation_names(&self) -> Vec<&str> {
        if !self.has_variations() {
            return vec![];
        }

        let primary = self.primary_exercise();
        let primary_name = normalized(&primary.name);
        let mut seen = HashSet::new();

        self.exercises
            .iter()
            .filter(|e| e.id != primary.id && normalized(&e.name) != primary_name)
            .filter(|e| seen.insert(normalized(&e.name)))
            .map(|e| e.name.as_str())
            .collect()
    }
}

fn normalized(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Groups exercises by base name.
///
/// Exercises keep their input order inside a group. The groups are sorted by base name.
#[must_use]
pub fn group_exercises<'a>(
    exercises: impl IntoIterator<Item = &'a ExerciseRecord>,
) -> Vec<ExerciseGroup> {
    let mut buckets: Vec<(String, Vec<ExerciseRecord>)> = vec![];
    let mut bucket_idx: HashMap<String, usize> = HashMap::new();

    for exercise in exercises {
        let idx = *bucket_idx
            .entry(base_name(&exercise.name))
            .or_insert_with_key(|key| {
                buckets.push((key.clone(), vec![]));
                buckets.len() - 1
            });
        buckets[idx].1.push(exercise.clone());
    }

    let mut groups = buckets
        .into_iter()
        .map(|(base_name, exercises)| ExerciseGroup {
            primary_idx: shortest_name_idx(&exercises),
            base_name,
            exercises,
        })
        .collect::<Vec<_>>();

    sort_by_base_name(&mut groups);

    groups
}

/// Sorts with the root collation, so accented names sort next to their unaccented letters.
fn sort_by_base_name(groups: &mut [ExerciseGroup]) {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => groups.sort_by(|a, b| collator.compare(&a.base_name, &b.base_name)),
        Err(err) => {
            warn!("failed to load collation data: {err}");
            groups.sort_by(|a, b| compare_names(&a.base_name, &b.base_name));
        }
    }
}

fn shortest_name_idx(exercises: &[ExerciseRecord]) -> usize {
    exercises
        .iter()
        .enumerate()
        .min_by_key(|(_, e)| e.name.chars().count())
        .map_or(0, |(idx, _)| idx)
}

/// Case-insensitive ordering, lower case first on ties.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn exercise(id: &str, name: &str) -> ExerciseRecord {
        ExerciseRecord {
            id: id.into(),
            name: name.to_string(),
            aliases: vec![],
            description: None,
            primary_muscle_group: "Chest".to_string(),
            sub_muscles: vec![],
            secondary_muscle_groups: vec![],
            equipment: vec![],
            movement_patterns: vec![],
            difficulty: None,
        }
    }

    static EXERCISES: LazyLock<Vec<ExerciseRecord>> = LazyLock::new(|| {
        vec![
            exercise("1", "Squat"),
            exercise("2", "Paused Barbell Bench Press"),
            exercise("3", "Incline Dumbbell Bench Press"),
            exercise("4", "Deadlift"),
            exercise("5", "Bench Press"),
            exercise("6", "Seated Cable Row"),
            exercise("7", "Tempo Squat"),
            exercise("8", "Incline"),
        ]
    });

    #[rstest]
    #[case::equipment_and_pause("Paused Barbell Bench Press", "Bench Press")]
    #[case::angle_and_equipment("Incline Dumbbell Bench Press", "Bench Press")]
    #[case::no_keywords("Deadlift", "Deadlift")]
    #[case::lower_case_input("romanian deadlift", "Romanian Deadlift")]
    #[case::stance("Standing Calf Raise", "Calf Raise")]
    #[case::laterality("One Arm Row", "Arm Row")]
    #[case::angle_with_hyphen("45-Degree Back Extension", "Back Extension")]
    #[case::angle_with_space("90 degree Wall Sit", "Wall Sit")]
    #[case::repeated_keywords("Paused Squat Pause", "Squat")]
    #[case::exactly_three_chars("Seated Cable Row", "Row")]
    #[case::keyword_inside_word("Altitude Squat", "Altitude Squat")]
    #[case::keyword_prefix("Alternating Curl", "Curl")]
    #[case::extra_whitespace("  Slow   Front    Squat ", "Front Squat")]
    #[case::only_keyword("Incline", "Incline")]
    #[case::only_keywords("Seated Machine", "Seated Machine")]
    #[case::too_short("Lying Ab", "Lying Ab")]
    #[case::empty("", "")]
    fn test_base_name(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(base_name(name), expected);
    }

    #[rstest]
    #[case("Paused Barbell Bench Press")]
    #[case("Reverse Lunge")]
    #[case("Incline")]
    #[case("Lying Ab")]
    fn test_base_name_idempotent(#[case] name: &str) {
        let once = base_name(name);
        assert_eq!(base_name(&once), once);
    }

    #[test]
    fn test_group_exercises_bench_press() {
        let groups = group_exercises(&EXERCISES[1..3]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].base_name(), "Bench Press");
        assert_eq!(groups[0].exercises(), &EXERCISES[1..3]);
        assert_eq!(groups[0].primary_exercise(), &EXERCISES[1]);
    }

    #[test]
    fn test_group_exercises() {
        let groups = group_exercises(EXERCISES.iter());

        assert_eq!(
            groups
                .iter()
                .map(|g| (
                    g.base_name(),
                    g.exercises()
                        .iter()
                        .map(|e| e.id.as_str())
                        .collect::<Vec<_>>(),
                    g.primary_exercise().id.as_str()
                ))
                .collect::<Vec<_>>(),
            vec![
                ("Bench Press", vec!["2", "3", "5"], "5"),
                ("Deadlift", vec!["4"], "4"),
                ("Incline", vec!["8"], "8"),
                ("Row", vec!["6"], "6"),
                ("Squat", vec!["1", "7"], "1"),
            ]
        );
    }

    #[test]
    fn test_group_exercises_invariants() {
        for group in group_exercises(EXERCISES.iter()) {
            assert!(group.exercises().contains(group.primary_exercise()));
            for exercise in group.exercises() {
                assert_eq!(base_name(&exercise.name), group.base_name());
            }
        }
    }

    #[test]
    fn test_group_exercises_deterministic() {
        assert_eq!(
            group_exercises(EXERCISES.iter()),
            group_exercises(EXERCISES.iter())
        );
    }

    #[test]
    fn test_group_exercises_empty() {
        assert!(group_exercises(&Vec::<ExerciseRecord>::new()).is_empty());
    }

    #[test]
    fn test_group_exercises_primary_tie() {
        let exercises = [exercise("1", "Slow Squat"), exercise("2", "Fast Squat")];
        let groups = group_exercises(&exercises);

        assert_eq!(groups[0].primary_exercise().id.as_str(), "1");
    }

    #[test]
    fn test_group_exercises_sort_order() {
        let exercises = [
            exercise("1", "squat"),
            exercise("2", "Bench Press"),
            exercise("3", "ab Wheel"),
        ];

        assert_eq!(
            group_exercises(&exercises)
                .iter()
                .map(ExerciseGroup::base_name)
                .collect::<Vec<_>>(),
            vec!["Ab Wheel", "Bench Press", "Squat"]
        );
    }

    #[test]
    fn test_group_exercises_accented_names() {
        let exercises = [
            exercise("1", "Squat"),
            exercise("2", "Élévation Latérale"),
            exercise("3", "Curl"),
            exercise("4", "Zercher Squat"),
        ];

        assert_eq!(
            group_exercises(&exercises)
                .iter()
                .map(ExerciseGroup::base_name)
                .collect::<Vec<_>>(),
            vec!["Curl", "Élévation Latérale", "Squat", "Zercher Squat"]
        );
    }

    #[test]
    fn test_compare_names() {
        assert_eq!(compare_names("bench", "Bench"), Ordering::Less);
        assert_eq!(compare_names("Ab", "bench"), Ordering::Less);
        assert_eq!(compare_names("Row", "Row"), Ordering::Equal);
    }

    #[test]
    fn test_variation_names_single_exercise() {
        let groups = group_exercises(&EXERCISES[0..1]);

        assert!(!groups[0].has_variations());
        assert!(groups[0].variation_names().is_empty());
    }

    #[test]
    fn test_variation_names() {
        let exercises = [
            exercise("1", "Row"),
            exercise("2", "Cable Row"),
            exercise("3", "Cable Row"),
            exercise("4", "row "),
            exercise("5", "Seated Row"),
            exercise("6", "seated row"),
        ];
        let groups = group_exercises(&exercises);

        assert_eq!(groups.len(), 1);
        assert!(groups[0].has_variations());
        assert_eq!(groups[0].variation_names(), vec!["Cable Row", "Seated Row"]);
    }

    #[test]
    fn test_variation_names_duplicates_of_primary() {
        let exercises = [exercise("1", "Pull-up"), exercise("2", "Pull-up")];
        let groups = group_exercises(&exercises);

        assert_eq!(groups[0].exercises().len(), 2);
        assert!(groups[0].variation_names().is_empty());
    }
}
