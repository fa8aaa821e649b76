use std::collections::HashMap;

use crate::answers::AnswerMap;
use crate::domain::question::{Question, QuestionId, QuestionType};

/// Question arena for one questionnaire, built once per load. The child
/// index makes root classification and reachability checks O(1) lookups
/// instead of repeated scans over every question's edge list.
#[derive(Clone, Debug, Default)]
pub struct QuestionGraph {
    questions: Vec<Question>,
    by_id: HashMap<QuestionId, usize>,
    parents_by_child: HashMap<QuestionId, Vec<QuestionId>>,
}

impl QuestionGraph {
    /// Builds the arena from a questionnaire's question list. Sorting is
    /// stable, so questions sharing an `order` keep their input order
    /// across repeated builds of the same set.
    pub fn new(mut questions: Vec<Question>) -> Self {
        questions.sort_by_key(|question| question.order);

        let mut by_id = HashMap::with_capacity(questions.len());
        let mut parents_by_child: HashMap<QuestionId, Vec<QuestionId>> = HashMap::new();
        for (index, question) in questions.iter().enumerate() {
            by_id.insert(question.id.clone(), index);
            for edge in &question.conditional_children {
                parents_by_child
                    .entry(edge.child_id.clone())
                    .or_default()
                    .push(question.id.clone());
            }
        }

        Self { questions, by_id, parents_by_child }
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.by_id.get(id).map(|&index| &self.questions[index])
    }

    /// All questions, ascending by `order`. Includes soft-deleted entries
    /// when the caller loaded them; active-only filtering is the loader's
    /// choice.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn active_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|question| !question.is_deleted())
    }

    pub fn is_conditional_child(&self, id: &QuestionId) -> bool {
        self.parents_by_child.contains_key(id)
    }

    pub fn parents_of(&self, id: &QuestionId) -> &[QuestionId] {
        self.parents_by_child.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Root questions: active questions no edge targets, ascending order.
    pub fn root_questions(&self) -> impl Iterator<Item = &Question> {
        self.active_questions().filter(|question| !self.is_conditional_child(&question.id))
    }

    pub fn find_by_order(&self, order: u32) -> Option<&Question> {
        self.active_questions().find(|question| question.order == order)
    }

    pub fn find_by_order_and_type(&self, order: u32, kind: QuestionType) -> Option<&Question> {
        self.active_questions()
            .find(|question| question.order == order && question.kind == kind)
    }

    /// Whether a question is reachable given the recorded answers. Root
    /// questions always are. A conditional child is reachable only when
    /// the first parent listing it has an answer resolving to exactly the
    /// triggering option.
    pub fn is_reachable(&self, id: &QuestionId, answers: &AnswerMap) -> bool {
        let Some(parents) = self.parents_by_child.get(id) else {
            return true;
        };
        for parent_id in parents {
            let Some(parent) = self.get(parent_id) else { continue };
            let Some(edge) =
                parent.conditional_children.iter().find(|edge| edge.child_id == *id)
            else {
                continue;
            };
            return answers
                .get(parent_id)
                .and_then(|answer| answer.option_id())
                .is_some_and(|selected| selected == edge.option_id.0);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::answers::{AnswerMap, AnswerValue};
    use crate::domain::question::{
        ConditionalChild, LocalizedText, OptionId, Question, QuestionId, QuestionType,
    };
    use crate::domain::questionnaire::QuestionnaireId;

    use super::QuestionGraph;

    fn question(id: &str, order: u32) -> Question {
        Question {
            id: QuestionId(id.to_owned()),
            questionnaire_id: QuestionnaireId("evening".to_owned()),
            text: LocalizedText::exact(id),
            kind: QuestionType::Text,
            locked: false,
            order,
            options: Vec::new(),
            conditional_children: Vec::new(),
            min_value: None,
            max_value: None,
            min_time: None,
            max_time: None,
            color_thresholds: None,
            deleted_at: None,
        }
    }

    fn with_edge(mut parent: Question, option: &str, child: &str) -> Question {
        parent.conditional_children.push(ConditionalChild {
            option_id: OptionId(option.to_owned()),
            child_id: QuestionId(child.to_owned()),
        });
        parent
    }

    #[test]
    fn roots_and_children_partition_the_active_set() {
        let graph = QuestionGraph::new(vec![
            with_edge(question("q-1", 1), "opt_a", "q-2"),
            question("q-2", 2),
            question("q-3", 3),
        ]);

        let roots: HashSet<&str> =
            graph.root_questions().map(|question| question.id.0.as_str()).collect();
        let children: HashSet<&str> = graph
            .active_questions()
            .filter(|question| graph.is_conditional_child(&question.id))
            .map(|question| question.id.0.as_str())
            .collect();

        assert_eq!(roots, HashSet::from(["q-1", "q-3"]));
        assert_eq!(children, HashSet::from(["q-2"]));
        assert!(roots.is_disjoint(&children));
        assert_eq!(roots.len() + children.len(), graph.active_questions().count());
    }

    #[test]
    fn roots_are_ordered_and_stable_on_ties() {
        let graph = QuestionGraph::new(vec![
            question("q-b", 2),
            question("q-a", 2),
            question("q-c", 1),
        ]);
        let rebuilt = QuestionGraph::new(graph.questions().to_vec());

        let order: Vec<&str> =
            graph.root_questions().map(|question| question.id.0.as_str()).collect();
        let order_again: Vec<&str> =
            rebuilt.root_questions().map(|question| question.id.0.as_str()).collect();

        assert_eq!(order, vec!["q-c", "q-b", "q-a"]);
        assert_eq!(order, order_again);
    }

    #[test]
    fn reachability_follows_the_triggering_option() {
        let graph = QuestionGraph::new(vec![
            with_edge(question("q-6", 6), "wake_yes", "q-7"),
            question("q-7", 7),
        ]);
        let child = QuestionId("q-7".to_owned());
        let parent = QuestionId("q-6".to_owned());

        let mut answers = AnswerMap::new();
        assert!(!graph.is_reachable(&child, &answers), "unanswered parent hides the child");

        answers.insert(parent.clone(), AnswerValue::from("wake_no"));
        assert!(!graph.is_reachable(&child, &answers), "other option hides the child");

        answers.insert(parent.clone(), AnswerValue::from("wake_yes"));
        assert!(graph.is_reachable(&child, &answers));

        answers.insert(parent, AnswerValue::other_selection("wake_yes", "twice"));
        assert!(graph.is_reachable(&child, &answers), "structured payload resolves too");
    }

    #[test]
    fn deleted_questions_stay_resolvable_but_leave_the_active_flow() {
        let mut deleted = question("q-2", 2);
        deleted.deleted_at = Some(chrono::Utc::now());
        let graph = QuestionGraph::new(vec![question("q-1", 1), deleted]);

        assert!(graph.get(&QuestionId("q-2".to_owned())).is_some());
        assert_eq!(graph.root_questions().count(), 1);
    }
}
