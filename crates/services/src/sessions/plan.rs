use rand::Rng;
use rand::seq::SliceRandom;

use vocab_core::model::{FilterCriteria, QuestionRecord};

/// Selection result for a session build.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub questions: Vec<QuestionRecord>,
    /// Records that satisfied the filter before sampling.
    pub matched: usize,
}

impl SessionPlan {
    /// Number of questions selected for the session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Picks the questions for a session: filter, shuffle, then sample.
pub struct SessionPlanner<'a> {
    criteria: &'a FilterCriteria,
}

impl<'a> SessionPlanner<'a> {
    #[must_use]
    pub fn new(criteria: &'a FilterCriteria) -> Self {
        Self { criteria }
    }

    /// Build a plan from the dataset records.
    ///
    /// - Keeps the records matching every constraint of the criteria.
    /// - Shuffles the matches, so a full run comes in random order.
    /// - Takes `min(sample_size, matched)` of them, a uniform draw without replacement.
    pub fn build<R: Rng + ?Sized>(self, records: &[QuestionRecord], rng: &mut R) -> SessionPlan {
        let mut questions: Vec<QuestionRecord> = records
            .iter()
            .filter(|record| self.criteria.matches(record))
            .cloned()
            .collect();
        let matched = questions.len();

        questions.shuffle(rng);
        questions.truncate(self.criteria.sample_size.clamp(matched));

        SessionPlan { questions, matched }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use vocab_core::model::{QuestionDraft, RecordIndex, SampleSize};

    fn build_record(index: usize, category: &str) -> QuestionRecord {
        QuestionDraft {
            word: format!("w{index}"),
            definition: format!("d{index}"),
            example: String::new(),
            category: category.into(),
            test_number: "1".into(),
            page_number: (index % 3).to_string(),
            importance: "A".into(),
        }
        .validate(RecordIndex::new(index))
        .unwrap()
    }

    fn build_records(n: usize) -> Vec<QuestionRecord> {
        (0..n)
            .map(|i| build_record(i, if i % 2 == 0 { "noun" } else { "verb" }))
            .collect()
    }

    #[test]
    fn planner_keeps_only_matching_records() {
        let records = build_records(10);
        let criteria = FilterCriteria::all().with_category("verb");
        let plan = SessionPlanner::new(&criteria).build(&records, &mut StdRng::seed_from_u64(1));

        assert_eq!(plan.matched, 5);
        assert_eq!(plan.total(), 5);
        assert!(plan.questions.iter().all(|q| q.category() == "verb"));
    }

    #[test]
    fn planner_takes_every_match_once() {
        let records = build_records(8);
        let criteria = FilterCriteria::all();
        let plan = SessionPlanner::new(&criteria).build(&records, &mut StdRng::seed_from_u64(7));

        let indices: HashSet<_> = plan.questions.iter().map(QuestionRecord::index).collect();
        assert_eq!(indices.len(), 8);
    }

    #[test]
    fn planner_clamps_sample_to_pool() {
        let records = build_records(4);
        let criteria = FilterCriteria::all().with_sample_size(SampleSize::count(30).unwrap());
        let plan = SessionPlanner::new(&criteria).build(&records, &mut StdRng::seed_from_u64(3));
        assert_eq!(plan.total(), 4);
    }

    #[test]
    fn planner_samples_requested_count() {
        let records = build_records(20);
        let criteria = FilterCriteria::all().with_sample_size(SampleSize::count(5).unwrap());
        let plan = SessionPlanner::new(&criteria).build(&records, &mut StdRng::seed_from_u64(3));
        assert_eq!(plan.total(), 5);
        assert_eq!(plan.matched, 20);
    }

    #[test]
    fn planner_is_reproducible_with_seed() {
        let records = build_records(12);
        let criteria = FilterCriteria::all();
        let a = SessionPlanner::new(&criteria).build(&records, &mut StdRng::seed_from_u64(42));
        let b = SessionPlanner::new(&criteria).build(&records, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn no_matches_gives_empty_plan() {
        let records = build_records(6);
        let criteria = FilterCriteria::all().with_category("adverb");
        let plan = SessionPlanner::new(&criteria).build(&records, &mut StdRng::seed_from_u64(0));
        assert!(plan.is_empty());
        assert_eq!(plan.matched, 0);
    }
}
