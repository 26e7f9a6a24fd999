use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::models::{new_id, Question};

const COPY_SUFFIX: &str = " (copy)";

/// Ordered question collection for one quiz draft. Every operation leaves the
/// `order` fields contiguous from 0 and equal to the array index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionList {
    questions: Vec<Question>,
}

impl QuestionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a list from externally supplied questions, renumbering to
    /// restore the contiguity invariant regardless of what came in.
    pub fn from_questions(questions: Vec<Question>) -> Self {
        let mut list = Self { questions };
        list.renumber();
        list
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn total_points(&self) -> f64 {
        self.questions.iter().map(|question| question.points).sum()
    }

    pub fn add(&mut self, mut question: Question) {
        question.order = self.questions.len() as i32;
        self.questions.push(question);
    }

    /// Replaces the question with the same id in place, or appends when the id
    /// is new. The in-place path keeps the existing position and order.
    pub fn upsert(&mut self, mut question: Question) {
        match self.questions.iter().position(|existing| existing.id == question.id) {
            Some(index) => {
                question.order = index as i32;
                self.questions[index] = question;
            }
            None => self.add(question),
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<Question> {
        if index >= self.questions.len() {
            return None;
        }
        let removed = self.questions.remove(index);
        self.renumber();
        Some(removed)
    }

    /// Clones the question at `index` with fresh ids and a marked title, then
    /// appends the copy at the end of the list.
    pub fn duplicate(&mut self, index: usize) -> Option<&Question> {
        let source = self.questions.get(index)?;
        let mut copy = source.clone();
        copy.id = new_id("q");
        copy.text.push_str(COPY_SUFFIX);
        for answer in &mut copy.answers {
            answer.id = new_id("ans");
        }
        self.add(copy);
        self.questions.last()
    }

    /// Applies a drag-and-drop result. The input must be an exact permutation
    /// of the current question ids; anything else is rejected as a no-op.
    pub fn reorder(&mut self, ordered_ids: &[String]) -> bool {
        if ordered_ids.len() != self.questions.len() {
            return false;
        }
        let current: HashSet<&str> =
            self.questions.iter().map(|question| question.id.as_str()).collect();
        let requested: HashSet<&str> = ordered_ids.iter().map(String::as_str).collect();
        if requested.len() != ordered_ids.len() || current != requested {
            return false;
        }

        self.questions.sort_by_key(|question| {
            ordered_ids
                .iter()
                .position(|id| *id == question.id)
                .unwrap_or(usize::MAX)
        });
        self.renumber();
        true
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }

    fn renumber(&mut self) {
        for (index, question) in self.questions.iter_mut().enumerate() {
            question.order = index as i32;
        }
    }
}

impl<'a> IntoIterator for &'a QuestionList {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::mc_question;

    fn orders(list: &QuestionList) -> Vec<i32> {
        list.iter().map(|question| question.order).collect()
    }

    #[test]
    fn add_assigns_contiguous_orders() {
        let mut list = QuestionList::new();
        list.add(mc_question("Q1", 1.0));
        list.add(mc_question("Q2", 1.0));
        list.add(mc_question("Q3", 1.0));
        assert_eq!(orders(&list), vec![0, 1, 2]);
    }

    #[test]
    fn remove_renumbers_remaining_questions() {
        let mut list = QuestionList::new();
        list.add(mc_question("Q1", 1.0));
        list.add(mc_question("Q2", 1.0));
        list.add(mc_question("Q3", 1.0));

        let removed = list.remove(1).expect("question at index 1");
        assert_eq!(removed.text, "Q2");
        assert_eq!(list.len(), 2);
        assert_eq!(orders(&list), vec![0, 1]);
        assert_eq!(list.get(1).unwrap().text, "Q3");
    }

    #[test]
    fn remove_out_of_bounds_is_noop() {
        let mut list = QuestionList::new();
        list.add(mc_question("Q1", 1.0));
        assert!(list.remove(5).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn duplicate_appends_marked_copy_with_fresh_ids() {
        let mut list = QuestionList::new();
        list.add(mc_question("Q1", 1.0));
        list.add(mc_question("Q2", 1.0));

        let original_id = list.get(0).unwrap().id.clone();
        let original_answer_ids: Vec<String> =
            list.get(0).unwrap().answers.iter().map(|a| a.id.clone()).collect();

        let copy = list.duplicate(0).expect("copy").clone();
        assert_eq!(copy.text, "Q1 (copy)");
        assert_eq!(copy.order, 2);
        assert_ne!(copy.id, original_id);
        for answer in &copy.answers {
            assert!(!original_answer_ids.contains(&answer.id));
        }
        assert_eq!(orders(&list), vec![0, 1, 2]);
    }

    #[test]
    fn reorder_applies_exact_permutation() {
        let mut list = QuestionList::new();
        list.add(mc_question("Q1", 1.0));
        list.add(mc_question("Q2", 1.0));
        list.add(mc_question("Q3", 1.0));

        let mut ids: Vec<String> = list.iter().map(|question| question.id.clone()).collect();
        ids.reverse();

        assert!(list.reorder(&ids));
        assert_eq!(list.get(0).unwrap().text, "Q3");
        assert_eq!(list.get(2).unwrap().text, "Q1");
        assert_eq!(orders(&list), vec![0, 1, 2]);
    }

    #[test]
    fn reorder_rejects_mismatched_id_sets() {
        let mut list = QuestionList::new();
        list.add(mc_question("Q1", 1.0));
        list.add(mc_question("Q2", 1.0));

        let before: Vec<String> = list.iter().map(|question| question.id.clone()).collect();

        assert!(!list.reorder(&[before[0].clone()]));
        assert!(!list.reorder(&[before[0].clone(), "q_unknown".to_string()]));
        assert!(!list.reorder(&[before[0].clone(), before[0].clone()]));

        let after: Vec<String> = list.iter().map(|question| question.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn upsert_replaces_in_place_and_appends_new() {
        let mut list = QuestionList::new();
        list.add(mc_question("Q1", 1.0));
        list.add(mc_question("Q2", 1.0));

        let mut edited = list.get(0).unwrap().clone();
        edited.text = String::from("Q1 edited");
        edited.points = 4.0;
        list.upsert(edited);

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().text, "Q1 edited");
        assert_eq!(list.get(0).unwrap().order, 0);

        list.upsert(mc_question("Q3", 1.0));
        assert_eq!(list.len(), 3);
        assert_eq!(orders(&list), vec![0, 1, 2]);
    }

    #[test]
    fn from_questions_restores_contiguity() {
        let mut gappy = mc_question("Q1", 1.0);
        gappy.order = 7;
        let mut second = mc_question("Q2", 1.0);
        second.order = 2;

        let list = QuestionList::from_questions(vec![gappy, second]);
        assert_eq!(orders(&list), vec![0, 1]);
    }

    #[test]
    fn random_operation_sequence_keeps_invariant() {
        let mut list = QuestionList::new();
        for index in 0..5 {
            list.add(mc_question(&format!("Q{index}"), 1.0));
        }
        list.remove(2);
        list.duplicate(1);
        list.remove(0);
        let mut ids: Vec<String> = list.iter().map(|question| question.id.clone()).collect();
        ids.rotate_left(1);
        assert!(list.reorder(&ids));

        let expected: Vec<i32> = (0..list.len() as i32).collect();
        assert_eq!(orders(&list), expected);
    }
}
