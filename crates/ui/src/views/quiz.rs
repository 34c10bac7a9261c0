use dioxus::prelude::*;
use dioxus::core::Task;
use services::Countdown;

use crate::context::AppContext;
use crate::views::intro::IntroPanel;
use crate::views::question::QuestionPanel;
use crate::views::results::ResultsPanel;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizIntent, QuizScreen, QuizVm, load_quiz};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let vm = use_signal(|| None::<QuizVm>);
    let error = use_signal(|| None::<ViewError>);
    let mut timer_task = use_signal(|| None::<Task>);

    let resource = use_resource(move || {
        let quiz_loop = quiz_loop.clone();
        let mut vm = vm;
        let mut error = error;
        async move {
            let loaded = load_quiz(&quiz_loop).await?;
            vm.set(Some(loaded));
            error.set(None);
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        let mut error = error;
        let result = {
            let mut guard = vm.write();
            match guard.as_mut() {
                Some(quiz) => quiz.apply(intent),
                None => Err(ViewError::Unknown),
            }
        };
        match result {
            Ok(_) => {
                if error.peek().is_some() {
                    error.set(None);
                }
            }
            Err(err) => error.set(Some(err)),
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, vm);
            }
        }
    }

    // One countdown per presented question; replaced whenever the key changes.
    let countdown_key = use_memo(move || vm.read().as_ref().and_then(QuizVm::countdown_key));
    use_effect(move || {
        let key = countdown_key();
        if let Some(task) = timer_task.write().take() {
            task.cancel();
        }
        if let Some(key) = key {
            let task = spawn(async move {
                let mut countdown = Countdown::start(Countdown::DEFAULT_PERIOD);
                while countdown.next_tick().await.is_some() {
                    dispatch.call(QuizIntent::Tick(key));
                }
            });
            timer_task.set(Some(task));
        }
    });

    let retry = {
        let mut resource = resource;
        use_callback(move |()| resource.restart())
    };

    let (screen, intro, question, results) = {
        let guard = vm.read();
        match guard.as_ref() {
            Some(quiz) => (
                Some(quiz.screen()),
                Some(quiz.intro()),
                quiz.question(),
                quiz.results(),
            ),
            None => (None, None, None, Ok(None)),
        }
    };
    let body = match (screen, results) {
        (_, Err(err)) => rsx! {
            p { class: "quiz-alert", "{err.message()}" }
        },
        (Some(QuizScreen::Intro), _) => match intro {
            Some(intro) => rsx! {
                IntroPanel { intro, on_intent: dispatch }
            },
            None => rsx! {},
        },
        (Some(QuizScreen::Question), _) => match question {
            Some(question) => rsx! {
                QuestionPanel { question, on_intent: dispatch }
            },
            None => rsx! {},
        },
        (Some(QuizScreen::Results), Ok(Some(results))) => rsx! {
            ResultsPanel { results, on_intent: dispatch }
        },
        (Some(QuizScreen::Results), Ok(None)) | (None, Ok(_)) => rsx! {},
    };

    rsx! {
        div { class: "page quiz-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    div { class: "quiz-loading",
                        div { class: "quiz-spinner" }
                        p { "Loading questions..." }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "quiz-card quiz-failed",
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            id: "quiz-retry",
                            r#type: "button",
                            onclick: move |_| retry.call(()),
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        p { class: "quiz-alert", "{err.message()}" }
                    }
                    {body}
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
