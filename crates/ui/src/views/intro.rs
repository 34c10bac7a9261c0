use dioxus::prelude::*;

use crate::vm::{IntroVm, QuizIntent};

#[component]
pub fn IntroPanel(intro: IntroVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let IntroVm {
        question_count,
        time_limit_secs,
    } = intro;

    rsx! {
        div { class: "quiz-card quiz-intro",
            h1 { class: "quiz-intro__title", "Sentence Construction Challenge" }
            p { class: "quiz-intro__lead",
                "Complete sentences by placing the correct words in the blanks. You have {time_limit_secs} seconds for each question."
            }
            ul { class: "quiz-intro__points",
                li { "{question_count} challenging questions" }
                li { "{time_limit_secs}-second timer for each question" }
                li { "Detailed feedback at the end" }
            }
            button {
                class: "btn btn-primary quiz-intro__start",
                id: "quiz-start",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Start),
                "Start Challenge"
            }
        }
    }
}
