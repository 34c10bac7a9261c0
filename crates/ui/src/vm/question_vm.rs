use services::QuizSession;

use crate::vm::sentence_vm::{SentenceSegment, map_sentence_parts};
use crate::vm::time_fmt::format_seconds_left;

/// At or below this many seconds the timer is shown as urgent.
pub const URGENT_THRESHOLD_SECS: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolWordVm {
    pub index: usize,
    pub word: String,
}

/// Everything the question panel renders for the active question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub position_label: String,
    pub timer_label: String,
    pub timer_percent: u32,
    pub is_urgent: bool,
    pub segments: Vec<SentenceSegment>,
    pub pool: Vec<PoolWordVm>,
    pub can_submit: bool,
}

impl QuestionVm {
    /// `None` unless a question is on screen.
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let question = session.current_question()?;
        let interaction = session.interaction();
        let progress = session.progress();
        let remaining = interaction.time_remaining();

        let parts = question.template().parts(interaction.slots());
        let pool = interaction
            .pool()
            .iter()
            .enumerate()
            .map(|(index, word)| PoolWordVm {
                index,
                word: word.clone(),
            })
            .collect();

        Some(Self {
            position_label: format!("Question {} of {}", progress.position, progress.total),
            timer_label: format_seconds_left(remaining),
            timer_percent: timer_percent(remaining, interaction.time_limit()),
            is_urgent: remaining <= URGENT_THRESHOLD_SECS,
            segments: map_sentence_parts(&parts),
            pool,
            can_submit: session.can_submit(),
        })
    }
}

fn timer_percent(remaining: u32, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    let percent = u64::from(remaining.min(limit)) * 100 / u64::from(limit);
    u32::try_from(percent).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use quiz_core::model::{BLANK_MARKER, BlankTemplate, Question, QuestionId, QuestionSet, TestId};
    use quiz_core::time::fixed_clock;

    use super::*;

    fn session() -> QuizSession {
        let question = Question::new(
            QuestionId::new("q1").unwrap(),
            BlankTemplate::parse(format!("The {BLANK_MARKER} barked at the {BLANK_MARKER}.")),
            vec!["mailman".into(), "dog".into()],
            vec!["dog".into(), "mailman".into()],
        )
        .unwrap();
        let set = QuestionSet::new(TestId::new("t").unwrap(), vec![question]).unwrap();
        let mut session = QuizSession::new(set, 30, fixed_clock());
        session.start().unwrap();
        session
    }

    #[test]
    fn maps_sentence_and_pool() {
        let mut session = session();
        session.pick("dog");
        let vm = QuestionVm::from_session(&session).unwrap();

        assert_eq!(vm.position_label, "Question 1 of 1");
        assert_eq!(
            vm.segments,
            vec![
                SentenceSegment::Text("The ".into()),
                SentenceSegment::Blank { slot: 0, word: Some("dog".into()) },
                SentenceSegment::Text(" barked at the ".into()),
                SentenceSegment::Blank { slot: 1, word: None },
                SentenceSegment::Text(".".into()),
            ]
        );
        assert_eq!(vm.pool, vec![PoolWordVm { index: 0, word: "mailman".into() }]);
        assert!(!vm.can_submit);
    }

    #[test]
    fn timer_turns_urgent_at_ten_seconds() {
        let mut session = session();
        for _ in 0..19 {
            session.tick().unwrap();
        }
        let vm = QuestionVm::from_session(&session).unwrap();
        assert_eq!(vm.timer_label, "11 seconds left");
        assert!(!vm.is_urgent);

        session.tick().unwrap();
        let vm = QuestionVm::from_session(&session).unwrap();
        assert_eq!(vm.timer_label, "10 seconds left");
        assert!(vm.is_urgent);
        assert_eq!(vm.timer_percent, 33);
    }

    #[test]
    fn no_question_before_start() {
        let set = QuestionSet::new(TestId::new("t").unwrap(), Vec::new()).unwrap();
        let session = QuizSession::new(set, 30, fixed_clock());
        assert!(QuestionVm::from_session(&session).is_none());
    }
}
