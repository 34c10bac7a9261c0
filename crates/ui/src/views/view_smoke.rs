use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{QuestionSet, TestId};
use quiz_core::report::FeedbackTier;
use services::{ProviderError, QuestionProvider};

use super::test_harness::{ViewHarness, setup_builtin_harness, setup_view_harness};
use crate::vm::QuizIntent;

fn answer_current_correctly(harness: &mut ViewHarness) {
    let words = harness.with_vm(|vm| {
        vm.session()
            .current_question()
            .expect("question on screen")
            .correct_answer()
            .to_vec()
    });
    for word in words {
        harness.dispatch(QuizIntent::Pick(word));
    }
    harness.dispatch(QuizIntent::Submit);
}

#[tokio::test(flavor = "current_thread")]
async fn intro_view_smoke_renders_challenge() {
    let mut harness = setup_builtin_harness();
    harness.load().await;
    let html = harness.render();
    assert!(html.contains("Sentence Construction Challenge"), "missing title in {html}");
    assert!(html.contains("10 challenging questions"), "missing count in {html}");
    assert!(html.contains("30-second timer"), "missing timer note in {html}");
    assert!(html.contains("Start Challenge"), "missing start in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_renders_first_question() {
    let mut harness = setup_builtin_harness();
    harness.load().await;
    harness.dispatch(QuizIntent::Start);

    let html = harness.render();
    assert!(html.contains("Question 1 of 10"), "missing position in {html}");
    assert!(html.contains("30 seconds left"), "missing timer in {html}");
    assert!(html.contains("Next Question"), "missing submit in {html}");
    assert!(html.contains("User-centric"), "missing pool word in {html}");
    assert!(html.contains("quiz-word-3"), "missing pool word id in {html}");
    assert!(!html.contains("quiz-blank--filled"), "unexpected filled blank in {html}");

    harness.dispatch(QuizIntent::Pick("User-centric".into()));
    let html = harness.render();
    assert!(html.contains("quiz-blank--filled"), "missing filled blank in {html}");

    harness.dispatch(QuizIntent::Clear(0));
    let html = harness.render();
    assert!(!html.contains("quiz-blank--filled"), "blank not cleared in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_times_out_to_next_question() {
    let mut harness = setup_builtin_harness();
    harness.load().await;
    harness.dispatch(QuizIntent::Start);

    let key = harness.with_vm(|vm| vm.countdown_key().expect("countdown running"));
    for _ in 0..20 {
        harness.dispatch(QuizIntent::Tick(key));
    }
    let html = harness.render();
    assert!(html.contains("10 seconds left"), "missing timer in {html}");
    assert!(html.contains("quiz-timer--urgent"), "missing urgent style in {html}");

    for _ in 0..10 {
        harness.dispatch(QuizIntent::Tick(key));
    }
    let html = harness.render();
    assert!(html.contains("Question 2 of 10"), "did not advance in {html}");
    assert!(html.contains("30 seconds left"), "timer not reset in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_score_and_restarts() {
    let mut harness = setup_builtin_harness();
    harness.load().await;
    harness.dispatch(QuizIntent::Start);
    for _ in 0..10 {
        answer_current_correctly(&mut harness);
    }

    let html = harness.render();
    assert!(html.contains("Your Results"), "missing title in {html}");
    assert!(html.contains("10.0/10"), "missing score in {html}");
    assert!(html.contains(FeedbackTier::Excellent.message()), "missing message in {html}");
    assert!(html.contains("Try Again"), "missing restart in {html}");

    harness.dispatch(QuizIntent::Restart);
    let html = harness.render();
    assert!(html.contains("Question 1 of 10"), "restart did not reset in {html}");
}

struct FailingProvider;

#[async_trait]
impl QuestionProvider for FailingProvider {
    async fn fetch_questions(&self) -> Result<QuestionSet, ProviderError> {
        Err(ProviderError::MissingData)
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_load_error() {
    let mut harness = setup_view_harness(Arc::new(FailingProvider));
    harness.load().await;
    let html = harness.render();
    assert!(html.contains("Could not load questions"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

struct EmptyProvider;

#[async_trait]
impl QuestionProvider for EmptyProvider {
    async fn fetch_questions(&self) -> Result<QuestionSet, ProviderError> {
        Ok(QuestionSet::new(TestId::new("empty").expect("valid id"), Vec::new())
            .expect("empty set is valid"))
    }

    fn describe(&self) -> String {
        "empty".to_string()
    }
}

#[tokio::test(flavor = "current_thread")]
async fn empty_quiz_view_smoke_goes_straight_to_results() {
    let mut harness = setup_view_harness(Arc::new(EmptyProvider));
    harness.load().await;
    let html = harness.render();
    assert!(html.contains("Your Results"), "missing results in {html}");
    assert!(html.contains("0.0/10"), "missing zero score in {html}");
    assert!(!html.contains("Start Challenge"), "intro still shown in {html}");
}
