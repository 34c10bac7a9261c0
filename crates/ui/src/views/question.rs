use dioxus::prelude::*;

use crate::vm::{PoolWordVm, QuestionVm, QuizIntent, SentenceSegment};

#[component]
pub fn QuestionPanel(question: QuestionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let timer_class = if question.is_urgent {
        "quiz-timer quiz-timer--urgent"
    } else {
        "quiz-timer"
    };

    rsx! {
        div { class: "quiz-card quiz-question",
            header { class: "quiz-card__header",
                span { class: "quiz-badge", id: "quiz-position", "{question.position_label}" }
                span { class: "{timer_class}", id: "quiz-timer", "{question.timer_label}" }
            }
            div { class: "quiz-progress",
                div {
                    class: "quiz-progress__bar",
                    style: "width: {question.timer_percent}%",
                }
            }
            p { class: "quiz-sentence",
                for segment in question.segments.iter().cloned() {
                    Segment { segment, on_intent }
                }
            }
            div { class: "quiz-pool",
                for word in question.pool.iter().cloned() {
                    PoolWord { word, on_intent }
                }
            }
            footer { class: "quiz-card__footer",
                span { class: "quiz-hint", "Click on a filled blank to remove the word" }
                button {
                    class: "btn btn-primary",
                    id: "quiz-submit",
                    r#type: "button",
                    disabled: !question.can_submit,
                    onclick: move |_| on_intent.call(QuizIntent::Submit),
                    "Next Question"
                }
            }
        }
    }
}

#[component]
fn Segment(segment: SentenceSegment, on_intent: EventHandler<QuizIntent>) -> Element {
    match segment {
        SentenceSegment::Text(text) => rsx! {
            span { class: "quiz-sentence__text", "{text}" }
        },
        SentenceSegment::Blank {
            slot,
            word: Some(word),
        } => rsx! {
            button {
                class: "quiz-blank quiz-blank--filled",
                id: "quiz-blank-{slot}",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Clear(slot)),
                "{word}"
            }
        },
        SentenceSegment::Blank { slot, word: None } => rsx! {
            span { class: "quiz-blank", id: "quiz-blank-{slot}" }
        },
    }
}

#[component]
fn PoolWord(word: PoolWordVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let label = word.word.clone();
    let id = format!("quiz-word-{}", word.index);
    rsx! {
        button {
            class: "quiz-word",
            id: "{id}",
            r#type: "button",
            onclick: move |_| on_intent.call(QuizIntent::Pick(word.word.clone())),
            "{label}"
        }
    }
}
