mod question_vm;
mod quiz_vm;
mod results_vm;
mod sentence_vm;
mod time_fmt;

pub use question_vm::{PoolWordVm, QuestionVm, URGENT_THRESHOLD_SECS};
pub use quiz_vm::{
    CountdownKey, IntroVm, QuizIntent, QuizOutcome, QuizScreen, QuizVm, load_quiz,
};
pub use results_vm::{ResultItemVm, ResultStatus, ResultsVm};
pub use sentence_vm::{SentenceSegment, map_sentence_parts};
pub use time_fmt::{format_duration, format_seconds_left};
