//! Question selection against a catalog on disk.

use std::collections::HashSet;

use quiz_generator::quiz::session::{score, select_questions};
use quiz_generator::quiz::{Question, QuizCatalog, QuizSession};
use quiz_generator::QuizError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn question(n: usize) -> Question {
    Question::new(
        format!("Question {}", n),
        ["a", "b", "c", "d"],
        format!("answer {}", n),
    )
    .unwrap()
}

fn catalog_with(dir: &tempfile::TempDir, creator: &str, count: usize) -> QuizCatalog {
    let mut catalog = QuizCatalog::open(dir.path().join("categories.json")).unwrap();
    catalog
        .create("Trivia", creator, (0..count).map(question).collect())
        .unwrap();
    catalog
}

#[test]
fn creators_cannot_take_their_own_quiz() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog_with(&dir, "alice", 3);
    let mut rng = StdRng::seed_from_u64(1);

    let err = select_questions(&catalog, "Trivia", "alice", 10, &mut rng).unwrap_err();
    assert!(matches!(err, QuizError::SelfAuthored { .. }));
    assert!(QuizSession::start(&catalog, "Trivia", "alice", 10, &mut rng).is_err());
}

#[test]
fn unknown_quiz_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog_with(&dir, "alice", 3);
    let mut rng = StdRng::seed_from_u64(1);

    let err = select_questions(&catalog, "trivia", "bob", 10, &mut rng).unwrap_err();
    assert!(matches!(err, QuizError::NotFound(name) if name == "trivia"));
}

#[test]
fn cap_limits_the_draw_without_repeats() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog_with(&dir, "alice", 25);
    let mut rng = StdRng::seed_from_u64(7);

    let drawn = select_questions(&catalog, "Trivia", "bob", 10, &mut rng).unwrap();
    assert_eq!(drawn.len(), 10);
    let distinct: HashSet<&str> = drawn.iter().map(|q| q.text()).collect();
    assert_eq!(distinct.len(), 10);
    let pool = catalog.get("Trivia").unwrap().questions();
    assert!(drawn.iter().all(|q| pool.contains(q)));
}

#[test]
fn cap_above_pool_uses_every_question() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog_with(&dir, "alice", 4);
    let mut rng = StdRng::seed_from_u64(3);

    let drawn = select_questions(&catalog, "Trivia", "bob", usize::MAX, &mut rng).unwrap();
    let mut texts: Vec<&str> = drawn.iter().map(|q| q.text()).collect();
    texts.sort();
    assert_eq!(
        texts,
        vec!["Question 0", "Question 1", "Question 2", "Question 3"]
    );
}

#[test]
fn order_is_shuffled() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog_with(&dir, "alice", 8);
    let original = catalog.get("Trivia").unwrap().questions().to_vec();

    let reordered = (0..20u64).any(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        select_questions(&catalog, "Trivia", "bob", 8, &mut rng).unwrap() != original
    });
    assert!(reordered);
}

#[test]
fn full_session_scores_answers() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog_with(&dir, "alice", 3);
    let mut rng = StdRng::seed_from_u64(11);

    let mut session = QuizSession::start(&catalog, "Trivia", "bob", 10, &mut rng).unwrap();
    assert_eq!(session.quiz_name(), "Trivia");
    let mut given = Vec::new();
    while let Some(question) = session.current() {
        let reply = if given.len() == 1 {
            "wrong".to_string()
        } else {
            format!("  {} ", question.answer().to_uppercase())
        };
        given.push(reply.clone());
        session.submit(&reply);
    }

    let drawn = session.questions().to_vec();
    assert_eq!(score(&drawn, &given).unwrap(), 2);
    let outcome = session.finish().unwrap();
    assert_eq!(outcome.score, 2);
    assert_eq!(outcome.total, 3);
}
