use dioxus::prelude::*;
use quiz_core::model::BLANK_MARKER;

use crate::vm::{QuizIntent, ResultItemVm, ResultsVm, SentenceSegment};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResultsTab {
    Summary,
    Details,
}

#[component]
pub fn ResultsPanel(results: ResultsVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let mut tab = use_signal(|| ResultsTab::Summary);
    let active = tab();
    let tab_class = |which: ResultsTab| {
        if which == active {
            "quiz-tab quiz-tab--active"
        } else {
            "quiz-tab"
        }
    };
    let summary_class = tab_class(ResultsTab::Summary);
    let details_class = tab_class(ResultsTab::Details);

    rsx! {
        div { class: "quiz-card quiz-results",
            h2 { class: "quiz-results__title", "Your Results" }
            div { class: "quiz-score",
                span { class: "quiz-score__value", id: "quiz-score", "{results.score_label}" }
                p { class: "quiz-score__message", "{results.message}" }
                if let Some(duration) = results.duration_label.as_deref() {
                    p { class: "quiz-score__duration", "Finished in {duration}" }
                }
            }
            nav { class: "quiz-tabs",
                button {
                    class: "{summary_class}",
                    r#type: "button",
                    onclick: move |_| tab.set(ResultsTab::Summary),
                    "Summary"
                }
                button {
                    class: "{details_class}",
                    r#type: "button",
                    onclick: move |_| tab.set(ResultsTab::Details),
                    "Detailed Review"
                }
            }
            match active {
                ResultsTab::Summary => rsx! {
                    div { class: "quiz-summary",
                        div { class: "quiz-summary__counts",
                            div { class: "quiz-count quiz-count--correct",
                                strong { "{results.correct}" }
                                span { "Correct Answers" }
                            }
                            div { class: "quiz-count quiz-count--incorrect",
                                strong { "{results.incorrect}" }
                                span { "Incorrect Answers" }
                            }
                        }
                        if results.timed_out > 0 {
                            p { class: "quiz-summary__timeouts", "Time ran out on {results.timed_out} question(s)." }
                        }
                        h3 { "Question Performance" }
                        ul { class: "quiz-performance",
                            for item in results.items.iter() {
                                li { class: "quiz-performance__row",
                                    span { "{item.title}" }
                                    StatusBadge { item: item.clone() }
                                }
                            }
                        }
                    }
                },
                ResultsTab::Details => rsx! {
                    div { class: "quiz-details",
                        for item in results.items.iter().cloned() {
                            DetailCard { item }
                        }
                    }
                },
            }
            footer { class: "quiz-card__footer quiz-card__footer--center",
                button {
                    class: "btn btn-primary",
                    id: "quiz-restart",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Restart),
                    "Try Again"
                }
            }
        }
    }
}

#[component]
fn StatusBadge(item: ResultItemVm) -> Element {
    let class = if item.status.is_correct() {
        "quiz-status quiz-status--correct"
    } else {
        "quiz-status quiz-status--incorrect"
    };
    let label = item.status.label();
    rsx! {
        span { class: "{class}", "{label}" }
    }
}

#[component]
fn DetailCard(item: ResultItemVm) -> Element {
    let card_class = if item.status.is_correct() {
        "quiz-detail quiz-detail--correct"
    } else {
        "quiz-detail quiz-detail--incorrect"
    };
    rsx! {
        article { class: "{card_class}",
            header { class: "quiz-detail__header",
                h3 { "{item.title}" }
                StatusBadge { item: item.clone() }
            }
            p { class: "quiz-detail__label", "Your Answer:" }
            Sentence { segments: item.user_sentence.clone() }
            if let Some(correct) = item.correct_sentence.clone() {
                p { class: "quiz-detail__label", "Correct Answer:" }
                Sentence { segments: correct }
            }
        }
    }
}

#[component]
fn Sentence(segments: Vec<SentenceSegment>) -> Element {
    rsx! {
        p { class: "quiz-detail__sentence",
            for segment in segments {
                match segment {
                    SentenceSegment::Text(text) => rsx! { span { "{text}" } },
                    SentenceSegment::Blank { word: Some(word), .. } => rsx! {
                        span { class: "quiz-answer", "{word}" }
                    },
                    SentenceSegment::Blank { word: None, .. } => rsx! {
                        span { class: "quiz-answer quiz-answer--empty", "{BLANK_MARKER}" }
                    },
                }
            }
        }
    }
}
