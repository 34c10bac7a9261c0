use serde::{Deserialize, Serialize};

/// Placeholder substring marking one fill-in slot in a question template.
pub const BLANK_MARKER: &str = "_____________";

/// One piece of a rendered sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentencePart<'a> {
    Text(&'a str),
    Blank { index: usize, value: Option<&'a str> },
}

/// A sentence template split on [`BLANK_MARKER`].
///
/// A template with `N` blanks always holds `N + 1` literal fragments; the
/// leading and trailing fragments may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct BlankTemplate {
    raw: String,
    fragments: Vec<String>,
}

impl BlankTemplate {
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let fragments = raw.split(BLANK_MARKER).map(str::to_owned).collect();
        Self { raw, fragments }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn blank_count(&self) -> usize {
        self.fragments.len().saturating_sub(1)
    }

    #[must_use]
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Interleave the literal fragments with `answers`.
    ///
    /// Blanks past the end of `answers` are reported as empty.
    #[must_use]
    pub fn parts<'a, S: AsRef<str>>(&'a self, answers: &'a [Option<S>]) -> Vec<SentencePart<'a>> {
        let mut parts = Vec::with_capacity(self.fragments.len() * 2);
        for (index, fragment) in self.fragments.iter().enumerate() {
            if !fragment.is_empty() {
                parts.push(SentencePart::Text(fragment));
            }
            if index < self.blank_count() {
                let value = answers
                    .get(index)
                    .and_then(Option::as_ref)
                    .map(AsRef::as_ref);
                parts.push(SentencePart::Blank { index, value });
            }
        }
        parts
    }

    /// Plain-text rendering; unanswered blanks keep the marker.
    #[must_use]
    pub fn render<S: AsRef<str>>(&self, answers: &[Option<S>]) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for part in self.parts(answers) {
            match part {
                SentencePart::Text(text) => out.push_str(text),
                SentencePart::Blank { value, .. } => out.push_str(value.unwrap_or(BLANK_MARKER)),
            }
        }
        out
    }

    /// Render with every blank filled, e.g. from a correct answer.
    #[must_use]
    pub fn render_filled<S: AsRef<str>>(&self, answers: &[S]) -> String {
        let filled: Vec<Option<&str>> = answers.iter().map(|a| Some(a.as_ref())).collect();
        self.render(&filled)
    }
}

impl From<String> for BlankTemplate {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<BlankTemplate> for String {
    fn from(template: BlankTemplate) -> Self {
        template.raw
    }
}
