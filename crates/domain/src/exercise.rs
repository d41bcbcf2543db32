use std::collections::{BTreeMap, BTreeSet};

use derive_more::{AsRef, Deref, Display};

use crate::{ExerciseGroup, ReadError, group_exercises};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<ExerciseRecord>, ReadError>;

    async fn get_exercise(&self, id: &ExerciseID) -> Result<ExerciseRecord, ReadError> {
        self.get_exercises()
            .await?
            .into_iter()
            .find(|e| e.id == *id)
            .ok_or(ReadError::NotFound)
    }

    async fn search_exercises(
        &self,
        filter: &ExerciseFilter,
    ) -> Result<Vec<ExerciseRecord>, ReadError> {
        let exercises = self.get_exercises().await?;
        Ok(filter
            .exercises(exercises.iter())
            .into_iter()
            .cloned()
            .collect())
    }

    async fn search_exercise_groups(
        &self,
        filter: &ExerciseFilter,
    ) -> Result<Vec<ExerciseGroup>, ReadError> {
        let exercises = self.get_exercises().await?;
        Ok(group_exercises(filter.exercises(exercises.iter())))
    }

    async fn get_catalog_stats(&self) -> Result<CatalogStats, ReadError> {
        Ok(CatalogStats::new(&self.get_exercises().await?))
    }
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<ExerciseRecord>, ReadError>;
}

/// An exercise of the catalog, with all category IDs already resolved to display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseRecord {
    pub id: ExerciseID,
    pub name: String,
    pub aliases: Vec<String>,
    pub description: Option<String>,
    pub primary_muscle_group: String,
    pub sub_muscles: Vec<String>,
    pub secondary_muscle_groups: Vec<String>,
    pub equipment: Vec<String>,
    pub movement_patterns: Vec<String>,
    pub difficulty: Option<String>,
}

impl ExerciseRecord {
    fn searchable_text(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        parts.extend(self.aliases.iter().map(String::as_str));
        parts.push(self.description.as_deref().unwrap_or_default());
        parts.push(self.primary_muscle_group.as_str());
        parts.extend(self.sub_muscles.iter().map(String::as_str));
        parts.extend(self.secondary_muscle_groups.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }
}

#[derive(AsRef, Deref, Display, Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseID(String);

impl From<String> for ExerciseID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub query: String,
    pub muscle_groups: BTreeSet<String>,
    pub sub_muscles: BTreeSet<String>,
    pub equipment: BTreeSet<String>,
    pub movement_patterns: BTreeSet<String>,
}

impl ExerciseFilter {
    #[must_use]
    pub fn exercises<'a>(
        &self,
        exercises: impl Iterator<Item = &'a ExerciseRecord>,
    ) -> Vec<&'a ExerciseRecord> {
        let query = self.query.trim().to_lowercase();
        exercises
            .filter(|e| {
                (query.is_empty() || e.searchable_text().contains(&query))
                    && (self.muscle_groups.is_empty()
                        || self.muscle_groups.contains(&e.primary_muscle_group))
                    && overlaps(&self.sub_muscles, &e.sub_muscles)
                    && overlaps(&self.equipment, &e.equipment)
                    && overlaps(&self.movement_patterns, &e.movement_patterns)
            })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.muscle_groups.is_empty()
            && self.sub_muscles.is_empty()
            && self.equipment.is_empty()
            && self.movement_patterns.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn toggle_muscle_group(&mut self, muscle_group: &str) {
        toggle(&mut self.muscle_groups, muscle_group);
    }

    pub fn toggle_sub_muscle(&mut self, sub_muscle: &str) {
        toggle(&mut self.sub_muscles, sub_muscle);
    }

    pub fn toggle_equipment(&mut self, equipment: &str) {
        toggle(&mut self.equipment, equipment);
    }

    pub fn toggle_movement_pattern(&mut self, movement_pattern: &str) {
        toggle(&mut self.movement_patterns, movement_pattern);
    }
}

fn overlaps(selected: &BTreeSet<String>, values: &[String]) -> bool {
    selected.is_empty() || values.iter().any(|v| selected.contains(v))
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub by_muscle_group: BTreeMap<String, usize>,
    pub by_equipment: BTreeMap<String, usize>,
    pub by_movement_pattern: BTreeMap<String, usize>,
}

impl CatalogStats {
    #[must_use]
    pub fn new(exercises: &[ExerciseRecord]) -> Self {
        let mut stats = Self {
            total: exercises.len(),
            ..Self::default()
        };
        for exercise in exercises {
            *stats
                .by_muscle_group
                .entry(exercise.primary_muscle_group.clone())
                .or_insert(0) += 1;
            for equipment in &exercise.equipment {
                *stats.by_equipment.entry(equipment.clone()).or_insert(0) += 1;
            }
            for pattern in &exercise.movement_patterns {
                *stats.by_movement_pattern.entry(pattern.clone()).or_insert(0) += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use futures_util::FutureExt;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn record(id: &str, name: &str) -> ExerciseRecord {
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

    static EXERCISES: std::sync::LazyLock<Vec<ExerciseRecord>> = std::sync::LazyLock::new(|| {
        vec![
            ExerciseRecord {
                aliases: vec!["Flat Bench".to_string()],
                sub_muscles: vec!["Middle Chest".to_string()],
                secondary_muscle_groups: vec!["Triceps".to_string()],
                equipment: vec!["Barbell".to_string(), "Bench".to_string()],
                movement_patterns: vec!["Push".to_string()],
                ..record("1", "Barbell Bench Press")
            },
            ExerciseRecord {
                description: Some("Hinge at the hips".to_string()),
                primary_muscle_group: "Back".to_string(),
                sub_muscles: vec!["Lower Back".to_string()],
                equipment: vec!["Barbell".to_string()],
                movement_patterns: vec!["Hinge".to_string()],
                ..record("2", "Deadlift")
            },
            ExerciseRecord {
                primary_muscle_group: "Back".to_string(),
                sub_muscles: vec!["Lats".to_string()],
                equipment: vec!["Pull-up Bar".to_string()],
                movement_patterns: vec!["Pull".to_string()],
                ..record("3", "Pull-up")
            },
        ]
    });

    fn ids(exercises: &[&ExerciseRecord]) -> Vec<String> {
        exercises.iter().map(|e| e.id.to_string()).collect()
    }

    #[rstest]
    #[case::empty(ExerciseFilter::default(), &["1", "2", "3"])]
    #[case::name(ExerciseFilter { query: "BENCH".into(), ..ExerciseFilter::default() }, &["1"])]
    #[case::alias(ExerciseFilter { query: "flat".into(), ..ExerciseFilter::default() }, &["1"])]
    #[case::description(ExerciseFilter { query: " hips ".into(), ..ExerciseFilter::default() }, &["2"])]
    #[case::secondary_muscle(ExerciseFilter { query: "triceps".into(), ..ExerciseFilter::default() }, &["1"])]
    #[case::muscle_group(ExerciseFilter { muscle_groups: ["Back".into()].into(), ..ExerciseFilter::default() }, &["2", "3"])]
    #[case::sub_muscles(ExerciseFilter { sub_muscles: ["Lats".into(), "Middle Chest".into()].into(), ..ExerciseFilter::default() }, &["1", "3"])]
    #[case::equipment(ExerciseFilter { equipment: ["Barbell".into()].into(), ..ExerciseFilter::default() }, &["1", "2"])]
    #[case::movement_pattern(ExerciseFilter { movement_patterns: ["Pull".into()].into(), ..ExerciseFilter::default() }, &["3"])]
    #[case::combined(
        ExerciseFilter {
            muscle_groups: ["Back".into()].into(),
            equipment: ["Barbell".into()].into(),
            ..ExerciseFilter::default()
        },
        &["2"]
    )]
    #[case::no_match(ExerciseFilter { query: "curl".into(), ..ExerciseFilter::default() }, &[])]
    fn test_exercise_filter_exercises(#[case] filter: ExerciseFilter, #[case] expected: &[&str]) {
        assert_eq!(ids(&filter.exercises(EXERCISES.iter())), expected);
    }

    #[test]
    fn test_exercise_filter_is_empty() {
        assert!(ExerciseFilter::default().is_empty());
        assert!(
            ExerciseFilter {
                query: "  ".into(),
                ..ExerciseFilter::default()
            }
            .is_empty()
        );
        assert!(
            !ExerciseFilter {
                equipment: ["Cable".into()].into(),
                ..ExerciseFilter::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn test_exercise_filter_toggle() {
        let mut filter = ExerciseFilter::default();

        filter.toggle_muscle_group("Chest");
        filter.toggle_sub_muscle("Lats");
        filter.toggle_equipment("Cable");
        filter.toggle_movement_pattern("Pull");

        assert!(filter.muscle_groups.contains("Chest"));
        assert!(filter.sub_muscles.contains("Lats"));
        assert!(filter.equipment.contains("Cable"));
        assert!(filter.movement_patterns.contains("Pull"));

        filter.toggle_muscle_group("Chest");
        filter.toggle_sub_muscle("Lats");
        filter.toggle_equipment("Cable");
        filter.toggle_movement_pattern("Pull");

        assert!(filter.is_empty());
    }

    #[test]
    fn test_exercise_filter_clear() {
        let mut filter = ExerciseFilter {
            query: "press".into(),
            equipment: ["Barbell".into()].into(),
            ..ExerciseFilter::default()
        };
        filter.clear();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_catalog_stats_new() {
        let stats = CatalogStats::new(&EXERCISES);
        assert_eq!(stats.total, 3);
        assert_eq!(
            stats.by_muscle_group,
            BTreeMap::from([("Back".to_string(), 2), ("Chest".to_string(), 1)])
        );
        assert_eq!(
            stats.by_equipment,
            BTreeMap::from([
                ("Barbell".to_string(), 2),
                ("Bench".to_string(), 1),
                ("Pull-up Bar".to_string(), 1)
            ])
        );
        assert_eq!(stats.by_movement_pattern.len(), 3);
    }

    #[test]
    fn test_catalog_stats_empty() {
        assert_eq!(CatalogStats::new(&[]), CatalogStats::default());
    }

    struct Catalog;

    impl ExerciseService for Catalog {
        async fn get_exercises(&self) -> Result<Vec<ExerciseRecord>, ReadError> {
            Ok(EXERCISES.clone())
        }
    }

    #[test]
    fn test_exercise_service_get_exercise() {
        assert_eq!(
            Catalog
                .get_exercise(&"2".into())
                .now_or_never()
                .unwrap()
                .unwrap()
                .name,
            "Deadlift"
        );
        assert!(matches!(
            Catalog.get_exercise(&"9".into()).now_or_never().unwrap(),
            Err(ReadError::NotFound)
        ));
    }

    #[test]
    fn test_exercise_service_search_exercise_groups() {
        let filter = ExerciseFilter {
            muscle_groups: ["Back".into()].into(),
            ..ExerciseFilter::default()
        };
        let groups = Catalog
            .search_exercise_groups(&filter)
            .now_or_never()
            .unwrap()
            .unwrap();
        assert_eq!(
            groups.iter().map(ExerciseGroup::base_name).collect::<Vec<_>>(),
            vec!["Deadlift", "Pull-up"]
        );
    }

    #[test]
    fn test_exercise_service_search_exercises() {
        let filter = ExerciseFilter {
            query: "pull".into(),
            ..ExerciseFilter::default()
        };
        assert_eq!(
            Catalog
                .search_exercises(&filter)
                .now_or_never()
                .unwrap()
                .unwrap(),
            vec![EXERCISES[2].clone()]
        );
    }
}
