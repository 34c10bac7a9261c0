mod ids;
mod interaction;
mod question;
mod session;
mod template;
mod verdict;

pub use ids::{IdError, QuestionId, TestId};
pub use interaction::{InteractionPhase, InteractionState};
pub use question::{Question, QuestionError, QuestionSet, QuestionSetError};
pub(crate) use question::word_counts;
pub use session::{SessionPhase, SessionState, SessionStateError};
pub use template::{BLANK_MARKER, BlankTemplate, SentencePart};
pub use verdict::Verdict;
