//! Artifacts generated server-side from an uploaded document.

use serde::{Deserialize, Serialize};

/// Which artifact a fetcher retrieves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Summary,
    Flashcards,
}

impl ArtifactKind {
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Summary => "summary",
            ArtifactKind::Flashcards => "flashcards",
        }
    }

    /// Message used when neither the server nor the transport explains a failure.
    pub fn fallback_error(&self) -> &'static str {
        match self {
            ArtifactKind::Summary => "Could not generate summary",
            ArtifactKind::Flashcards => "Could not generate flashcards",
        }
    }
}

/// A single question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Summary text (markdown) or an ordered flashcard set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedArtifact {
    SummaryText(String),
    FlashcardSet(Vec<Flashcard>),
}

impl DerivedArtifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            DerivedArtifact::SummaryText(_) => ArtifactKind::Summary,
            DerivedArtifact::FlashcardSet(_) => ArtifactKind::Flashcards,
        }
    }

    pub fn as_summary(&self) -> Option<&str> {
        match self {
            DerivedArtifact::SummaryText(text) => Some(text),
            DerivedArtifact::FlashcardSet(_) => None,
        }
    }

    pub fn as_flashcards(&self) -> Option<&[Flashcard]> {
        match self {
            DerivedArtifact::FlashcardSet(cards) => Some(cards),
            DerivedArtifact::SummaryText(_) => None,
        }
    }
}

/// Study cursor over a flashcard set.
///
/// Moving in either direction clamps to the deck bounds and hides the answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
    index: usize,
    show_answer: bool,
}

impl FlashcardDeck {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            index: 0,
            show_answer: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.index)
    }

    pub fn is_answer_visible(&self) -> bool {
        self.show_answer
    }

    pub fn flip(&mut self) {
        self.show_answer = !self.show_answer;
    }

    pub fn next(&mut self) {
        self.show_answer = false;
        self.index = (self.index + 1).min(self.cards.len().saturating_sub(1));
    }

    pub fn prev(&mut self) {
        self.show_answer = false;
        self.index = self.index.saturating_sub(1);
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.cards.len()
    }

    /// One-based position, e.g. `2 / 5`.
    pub fn position(&self) -> String {
        if self.cards.is_empty() {
            return "0 / 0".to_string();
        }
        format!("{} / {}", self.index + 1, self.cards.len())
    }

    /// Text of the visible face: `Q: ...` or `A: ...`.
    pub fn face(&self) -> Option<String> {
        self.current().map(|card| {
            if self.show_answer {
                format!("A: {}", card.answer)
            } else {
                format!("Q: {}", card.question)
            }
        })
    }
}
