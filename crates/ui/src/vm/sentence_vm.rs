use quiz_core::model::SentencePart;

/// Owned piece of a rendered sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SentenceSegment {
    Text(String),
    Blank { slot: usize, word: Option<String> },
}

#[must_use]
pub fn map_sentence_parts(parts: &[SentencePart<'_>]) -> Vec<SentenceSegment> {
    parts
        .iter()
        .map(|part| match *part {
            SentencePart::Text(text) => SentenceSegment::Text(text.to_string()),
            SentencePart::Blank { index, value } => SentenceSegment::Blank {
                slot: index,
                word: value.map(str::to_string),
            },
        })
        .collect()
}
