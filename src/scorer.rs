use crate::models::{Question, ScoreResult};
use std::collections::BTreeMap;

const PASS_RATIO: f64 = 0.6;

/// Score the selected answers. Missing or out-of-range selections count as incorrect.
pub fn evaluate(quiz: &[Question], answers: &BTreeMap<usize, usize>) -> ScoreResult {
    let mut correct_count = 0;
    let feedback = quiz
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let selected = answers
                .get(&i)
                .copied()
                .filter(|&idx| idx < question.options().len());
            let is_correct = selected == Some(question.correct_index());
            if is_correct {
                correct_count += 1;
            }
            question_feedback(i, question, selected, is_correct)
        })
        .collect();

    ScoreResult {
        correct_count,
        total: quiz.len(),
        feedback,
    }
}

fn question_feedback(
    index: usize,
    question: &Question,
    selected: Option<usize>,
    is_correct: bool,
) -> String {
    if is_correct {
        return format!("Q{}: Correct! \"{}\" is right.", index + 1, question.correct_option());
    }
    let chosen = selected
        .map(|idx| question.options()[idx].as_str())
        .unwrap_or("No answer");
    format!(
        "Q{}: Incorrect. Your answer: {} | Correct answer: {}",
        index + 1,
        chosen,
        question.correct_option()
    )
}

impl ScoreResult {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct_count as f64 * 100.0 / self.total as f64
        }
    }

    pub fn score_line(&self) -> String {
        format!(
            "Score: {} / {} ({:.0}%)",
            self.correct_count,
            self.total,
            self.percentage()
        )
    }

    /// Overall encouragement shown above the per-question feedback.
    pub fn summary(&self) -> &'static str {
        if self.total == 0 {
            "No quiz generated yet."
        } else if self.correct_count == self.total {
            "Great job. You've mastered this set."
        } else if self.correct_count as f64 >= self.total as f64 * PASS_RATIO {
            "Good work. Review the missed questions and try again."
        } else {
            "Keep practicing. Revisit the explanation and roadmap."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(prompt: &str, options: &[&str], correct: usize) -> Question {
        Question::new(
            prompt,
            options.iter().map(|o| o.to_string()).collect(),
            correct,
        )
        .unwrap()
    }

    fn sample_quiz() -> Vec<Question> {
        vec![
            question("2+2?", &["3", "4", "5"], 1),
            question("Capital of France?", &["Paris", "Rome", "Lima"], 0),
            question("Largest planet?", &["Mars", "Jupiter", "Venus"], 1),
            question("H2O is?", &["Water", "Salt"], 0),
            question("3*3?", &["6", "9", "12"], 1),
        ]
    }

    #[test]
    fn test_single_correct_answer() {
        let quiz = vec![question("2+2?", &["3", "4", "5"], 1)];
        let answers = BTreeMap::from([(0, 1)]);
        let result = evaluate(&quiz, &answers);
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.total, 1);
        assert!(result.feedback[0].contains("Correct!"));
    }

    #[test]
    fn test_single_wrong_answer_names_correct_option() {
        let quiz = vec![question("2+2?", &["3", "4", "5"], 1)];
        let answers = BTreeMap::from([(0, 0)]);
        let result = evaluate(&quiz, &answers);
        assert_eq!(result.correct_count, 0);
        assert_eq!(result.total, 1);
        assert_eq!(
            result.feedback[0],
            "Q1: Incorrect. Your answer: 3 | Correct answer: 4"
        );
    }

    #[test]
    fn test_empty_answers_score_zero() {
        let quiz = sample_quiz();
        let result = evaluate(&quiz, &BTreeMap::new());
        assert_eq!(result.correct_count, 0);
        assert_eq!(result.total, quiz.len());
        assert!(result.feedback.iter().all(|f| f.contains("No answer")));
    }

    #[test]
    fn test_all_correct_scores_total() {
        let quiz = sample_quiz();
        let answers: BTreeMap<usize, usize> = quiz
            .iter()
            .enumerate()
            .map(|(i, q)| (i, q.correct_index()))
            .collect();
        let result = evaluate(&quiz, &answers);
        assert_eq!(result.correct_count, result.total);
        assert_eq!(result.summary(), "Great job. You've mastered this set.");
        assert_eq!(result.percentage(), 100.0);
    }

    #[test]
    fn test_out_of_range_selection_is_incorrect() {
        let quiz = vec![question("2+2?", &["3", "4", "5"], 1)];
        let answers = BTreeMap::from([(0, 7), (4, 1)]);
        let result = evaluate(&quiz, &answers);
        assert_eq!(result.correct_count, 0);
        assert!(result.feedback[0].contains("No answer"));
        assert_eq!(result.feedback.len(), 1);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let quiz = sample_quiz();
        let answers = BTreeMap::from([(0, 1), (1, 2), (3, 0)]);
        assert_eq!(evaluate(&quiz, &answers), evaluate(&quiz, &answers));
    }

    #[test]
    fn test_count_never_exceeds_total() {
        let quiz = sample_quiz();
        for pick in 0..3 {
            let answers: BTreeMap<usize, usize> = (0..quiz.len()).map(|i| (i, pick)).collect();
            let result = evaluate(&quiz, &answers);
            assert!(result.correct_count <= result.total);
        }
    }

    #[test]
    fn test_summary_tiers() {
        let quiz = sample_quiz();
        // 3 of 5 correct is exactly the pass ratio
        let answers = BTreeMap::from([(0, 1), (1, 0), (2, 1)]);
        let result = evaluate(&quiz, &answers);
        assert_eq!(result.correct_count, 3);
        assert_eq!(
            result.summary(),
            "Good work. Review the missed questions and try again."
        );
        assert_eq!(result.score_line(), "Score: 3 / 5 (60%)");

        let answers = BTreeMap::from([(0, 1)]);
        let result = evaluate(&quiz, &answers);
        assert_eq!(
            result.summary(),
            "Keep practicing. Revisit the explanation and roadmap."
        );
    }

    #[test]
    fn test_empty_quiz() {
        let result = evaluate(&[], &BTreeMap::new());
        assert_eq!(result.total, 0);
        assert_eq!(result.percentage(), 0.0);
        assert_eq!(result.summary(), "No quiz generated yet.");
    }
}
