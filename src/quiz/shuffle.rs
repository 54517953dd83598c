//! Answer randomizer: shuffle each question's options, track the letter.
//!
//! The logic model tends to put the correct option in the same slot, so
//! options are permuted before play and the `answer` letter rewritten to
//! the correct text's new position. Malformed items (no question text, no
//! options) are dropped outright; callers surface "no valid items" when
//! the filtered set ends up empty.

use rand::Rng;

use super::{McqItem, index_letter};

/// Shuffle every question's options with the given random source.
///
/// The shuffle is an unbiased Fisher-Yates pass, traversing backwards with
/// uniform swaps. A malformed `answer` letter treats option 0 as correct
/// before shuffling.
pub fn shuffle_options<R: Rng>(questions: Vec<McqItem>, rng: &mut R) -> Vec<McqItem> {
    questions
        .into_iter()
        .filter(|q| !q.question.is_empty() && !q.options.is_empty())
        .map(|mut q| {
            let correct_text = q.options[q.correct_index()].clone();

            for i in (1..q.options.len()).rev() {
                let j = rng.gen_range(0..=i);
                q.options.swap(i, j);
            }

            let new_index = q.options.iter().position(|o| *o == correct_text).unwrap_or(0);
            q.answer = index_letter(new_index).to_string();
            q
        })
        .collect()
}

/// Shuffle with the thread-local random source
pub fn shuffle_mcq(questions: Vec<McqItem>) -> Vec<McqItem> {
    shuffle_options(questions, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn question(options: &[&str], answer: &str) -> McqItem {
        McqItem {
            question: "What is it?".to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn shuffled_answer_tracks_the_correct_text() {
        for _ in 0..200 {
            let shuffled = shuffle_mcq(vec![question(&["A. x", "B. y", "C. z", "D. w"], "B")]);
            let q = &shuffled[0];
            assert_eq!(q.options[q.correct_index()], "B. y");
        }
    }

    #[test]
    fn option_multiset_is_preserved() {
        let original = question(&["A. x", "B. y", "C. z", "D. w"], "C");
        let shuffled = shuffle_mcq(vec![original.clone()]);

        let mut before = original.options.clone();
        let mut after = shuffled[0].options.clone();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn malformed_answers_treat_option_zero_as_correct() {
        for bad in ["", "z", "E", "##"] {
            let shuffled = shuffle_mcq(vec![question(&["first", "second", "third"], bad)]);
            let q = &shuffled[0];
            assert_eq!(q.options[q.correct_index()], "first");
        }
    }

    #[test]
    fn items_without_options_or_question_are_dropped() {
        let no_options = McqItem {
            question: "Q".to_string(),
            options: vec![],
            answer: "A".to_string(),
        };
        let no_question = McqItem {
            question: String::new(),
            options: vec!["x".into()],
            answer: "A".to_string(),
        };
        assert!(shuffle_mcq(vec![no_options, no_question]).is_empty());
    }

    #[test]
    fn single_option_is_stable() {
        let shuffled = shuffle_mcq(vec![question(&["only"], "A")]);
        assert_eq!(shuffled[0].options, vec!["only"]);
        assert_eq!(shuffled[0].answer, "A");
    }

    #[test]
    fn correct_answer_lands_in_multiple_positions() {
        // Statistical sanity: across many shuffles of a 4-option question
        // the correct text must not stay pinned to one slot.
        let mut positions: BTreeMap<usize, usize> = BTreeMap::new();
        for _ in 0..200 {
            let shuffled = shuffle_mcq(vec![question(&["A. x", "B. y", "C. z", "D. w"], "A")]);
            *positions.entry(shuffled[0].correct_index()).or_default() += 1;
        }
        assert!(positions.len() >= 3, "correct answer stuck in {:?}", positions);
    }

    proptest! {
        #[test]
        fn shuffle_never_panics_and_tracks_answer(
            options in proptest::collection::vec("[a-z]{1,8}", 1..6),
            answer in "[A-Za-z?]{0,2}",
        ) {
            let original = McqItem {
                question: "Q".to_string(),
                options: options.clone(),
                answer,
            };
            let correct_text = original.options[original.correct_index()].clone();

            let shuffled = shuffle_mcq(vec![original]);
            prop_assert_eq!(shuffled.len(), 1);

            let q = &shuffled[0];
            // The letter must index an option carrying the originally
            // correct text (duplicates may alias, text must still match).
            prop_assert_eq!(&q.options[q.correct_index()], &correct_text);
        }
    }
}
