//! Answer-variant consolidation.
//!
//! Randomized problems store one distribution row per variant. The
//! `answer_distribution/` endpoint reports each distinct answer once, so
//! rows that differ only by variant are merged here before serialization:
//! counts are summed, `variant` is cleared, and the merged row is flagged
//! `consolidated_variant`. Groups with a single variant pass through
//! unchanged with the flag false. Output order is first appearance in the
//! input.

use std::collections::HashMap;

use insights_db::models::problems::{AnswerDistribution, FirstLastAnswerDistribution};

/// Fields that identify one answer across variants. `variant` is
/// deliberately absent; rows differing only by variant are the groups
/// being merged.
type GroupKey = (Option<String>, Option<String>, String, Option<bool>);

trait VariantRow {
    fn group_key(&self) -> GroupKey;
    fn absorb(&mut self, other: &Self);
    fn clear_variant(&mut self);
}

impl VariantRow for AnswerDistribution {
    fn group_key(&self) -> GroupKey {
        (
            self.value_id.clone(),
            self.answer_value.clone(),
            self.part_id.clone(),
            self.correct,
        )
    }

    fn absorb(&mut self, other: &Self) {
        self.count += other.count;
    }

    fn clear_variant(&mut self) {
        self.variant = None;
    }
}

impl VariantRow for FirstLastAnswerDistribution {
    fn group_key(&self) -> GroupKey {
        (
            self.value_id.clone(),
            self.answer_value.clone(),
            self.part_id.clone(),
            self.correct,
        )
    }

    fn absorb(&mut self, other: &Self) {
        self.first_response_count += other.first_response_count;
        self.last_response_count += other.last_response_count;
    }

    fn clear_variant(&mut self) {
        self.variant = None;
    }
}

fn consolidate<R: VariantRow>(rows: Vec<R>) -> Vec<(R, bool)> {
    let mut merged: Vec<(R, bool)> = Vec::new();
    let mut slots: HashMap<GroupKey, usize> = HashMap::new();

    for row in rows {
        match slots.get(&row.group_key()) {
            Some(&slot) => {
                let (target, consolidated) = &mut merged[slot];
                target.absorb(&row);
                target.clear_variant();
                *consolidated = true;
            }
            None => {
                slots.insert(row.group_key(), merged.len());
                merged.push((row, false));
            }
        }
    }

    merged
}

/// Consolidate base answer-distribution rows.
pub fn consolidate_answers(rows: Vec<AnswerDistribution>) -> Vec<(AnswerDistribution, bool)> {
    consolidate(rows)
}

/// Consolidate first/last-response rows; first and last counts sum
/// independently.
pub fn consolidate_first_last(
    rows: Vec<FirstLastAnswerDistribution>,
) -> Vec<(FirstLastAnswerDistribution, bool)> {
    consolidate(rows)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use insights_core::types::Timestamp;

    use super::*;

    fn created() -> Timestamp {
        Utc.with_ymd_and_hms(2014, 5, 29, 19, 7, 35).unwrap()
    }

    fn answer(answer_value: &str, variant: i32, count: i32) -> AnswerDistribution {
        AnswerDistribution {
            course_id: "edX/DemoX/Demo_Course".into(),
            module_id: "m1".into(),
            part_id: "p1".into(),
            correct: Some(true),
            count,
            value_id: Some("choice_1".into()),
            answer_value: Some(answer_value.into()),
            problem_display_name: None,
            question_text: None,
            variant: Some(variant),
            created: created(),
        }
    }

    #[test]
    fn variants_of_one_answer_merge_into_a_flagged_row() {
        let merged = consolidate_answers(vec![answer("3.14", 1, 10), answer("3.14", 2, 5)]);

        assert_eq!(merged.len(), 1);
        let (row, consolidated) = &merged[0];
        assert_eq!(row.count, 15);
        assert_eq!(row.variant, None);
        assert!(*consolidated);
    }

    #[test]
    fn single_variant_answers_pass_through_unchanged() {
        let merged = consolidate_answers(vec![answer("3.14", 1, 10)]);

        let (row, consolidated) = &merged[0];
        assert_eq!(row.count, 10);
        assert_eq!(row.variant, Some(1));
        assert!(!*consolidated);
    }

    #[test]
    fn output_order_is_first_appearance_even_when_groups_interleave() {
        let merged = consolidate_answers(vec![
            answer("3.14", 1, 10),
            answer("2.72", 1, 7),
            answer("3.14", 2, 5),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].0.answer_value.as_deref(), Some("3.14"));
        assert_eq!(merged[0].0.count, 15);
        assert_eq!(merged[1].0.answer_value.as_deref(), Some("2.72"));
        assert_eq!(merged[1].0.count, 7);
        assert!(!merged[1].1);
    }

    #[test]
    fn correctness_splits_otherwise_identical_answers() {
        let mut wrong = answer("3.14", 2, 5);
        wrong.correct = Some(false);

        let merged = consolidate_answers(vec![answer("3.14", 1, 10), wrong]);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|(_, consolidated)| !consolidated));
    }

    #[test]
    fn first_and_last_counts_sum_independently() {
        let row = |variant: i32, first: i32, last: i32| FirstLastAnswerDistribution {
            course_id: "edX/DemoX/Demo_Course".into(),
            module_id: "m1".into(),
            part_id: "p1".into(),
            correct: Some(true),
            first_response_count: first,
            last_response_count: last,
            value_id: None,
            answer_value: Some("42".into()),
            problem_display_name: None,
            question_text: None,
            variant: Some(variant),
            created: created(),
        };

        let merged = consolidate_first_last(vec![row(1, 10, 4), row(2, 3, 9)]);

        assert_eq!(merged.len(), 1);
        let (out, consolidated) = &merged[0];
        assert_eq!(out.first_response_count, 13);
        assert_eq!(out.last_response_count, 13);
        assert_eq!(out.variant, None);
        assert!(*consolidated);
    }
}
