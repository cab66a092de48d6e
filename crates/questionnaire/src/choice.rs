//! Questions and the fixed three-option answer set.

use serde::{Deserialize, Serialize};

/// One of the three answer options.
///
/// Users reply with the Arabic letters `أ`, `ب` and `ج`; nothing else is
/// accepted as an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerChoice {
    A,
    B,
    C,
}

impl AnswerChoice {
    /// All choices in display order.
    pub const ALL: [AnswerChoice; 3] = [AnswerChoice::A, AnswerChoice::B, AnswerChoice::C];

    /// Parse raw message text into a choice.
    ///
    /// The match is exact: no trimming, no case folding, no parentheses.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "أ" => Some(Self::A),
            "ب" => Some(Self::B),
            "ج" => Some(Self::C),
            _ => None,
        }
    }

    /// The glyph users type for this choice.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::A => "أ",
            Self::B => "ب",
            Self::C => "ج",
        }
    }
}

impl std::fmt::Display for AnswerChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// The eleven multiple-choice questions, in the order they are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Question {
    ProblemSolving,
    Creativity,
    DecisionMaking,
    SocialInteraction,
    EmotionalState,
    Planning,
    Flexibility,
    TeamLoyalty,
    ControlPreference,
    DailyJudgment,
    ToughSituations,
}

impl Question {
    /// Number of questions.
    pub const COUNT: usize = 11;

    /// All questions in asking order.
    pub const ALL: [Question; Self::COUNT] = [
        Question::ProblemSolving,
        Question::Creativity,
        Question::DecisionMaking,
        Question::SocialInteraction,
        Question::EmotionalState,
        Question::Planning,
        Question::Flexibility,
        Question::TeamLoyalty,
        Question::ControlPreference,
        Question::DailyJudgment,
        Question::ToughSituations,
    ];

    /// Zero-based slot index.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// 1-based question number as shown to operators.
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    /// The question asked after this one, if any.
    pub fn next(&self) -> Option<Question> {
        Self::ALL.get(self.index() + 1).copied()
    }
}

/// The eleven answer slots of a session, filled in question order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    slots: [Option<AnswerChoice>; Question::COUNT],
}

impl Answers {
    /// Get the answer for a question, if given.
    pub fn get(&self, question: Question) -> Option<AnswerChoice> {
        self.slots[question.index()]
    }

    /// Fill the slot for a question.
    ///
    /// Returns `false` and leaves the slot alone if it was already filled.
    pub fn set(&mut self, question: Question, choice: AnswerChoice) -> bool {
        let slot = &mut self.slots[question.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(choice);
        true
    }

    /// Number of filled slots.
    pub fn answered(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// All eleven answers, or `None` while any slot is empty.
    pub fn complete(&self) -> Option<[AnswerChoice; Question::COUNT]> {
        let mut out = [AnswerChoice::A; Question::COUNT];
        for (dst, slot) in out.iter_mut().zip(self.slots.iter()) {
            *dst = (*slot)?;
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_glyphs() {
        assert_eq!(AnswerChoice::parse("أ"), Some(AnswerChoice::A));
        assert_eq!(AnswerChoice::parse("ب"), Some(AnswerChoice::B));
        assert_eq!(AnswerChoice::parse("ج"), Some(AnswerChoice::C));
    }

    #[test]
    fn test_parse_rejects_near_misses() {
        for text in ["", "a", "A", " أ", "أ ", "(أ)", "أب", "د", "1"] {
            assert_eq!(AnswerChoice::parse(text), None, "accepted {:?}", text);
        }
    }

    #[test]
    fn test_glyph_round_trips() {
        for choice in AnswerChoice::ALL {
            assert_eq!(AnswerChoice::parse(choice.glyph()), Some(choice));
        }
    }

    #[test]
    fn test_question_order() {
        assert_eq!(Question::ALL[0], Question::ProblemSolving);
        assert_eq!(Question::ToughSituations.number(), 11);
        assert_eq!(Question::TeamLoyalty.next(), Some(Question::ControlPreference));
        assert_eq!(Question::ToughSituations.next(), None);
        for (i, q) in Question::ALL.iter().enumerate() {
            assert_eq!(q.index(), i);
        }
    }

    #[test]
    fn test_answers_write_once() {
        let mut answers = Answers::default();
        assert!(answers.set(Question::Planning, AnswerChoice::A));
        assert!(!answers.set(Question::Planning, AnswerChoice::C));
        assert_eq!(answers.get(Question::Planning), Some(AnswerChoice::A));
        assert_eq!(answers.answered(), 1);
        assert!(answers.complete().is_none());
    }

    #[test]
    fn test_answers_complete() {
        let mut answers = Answers::default();
        for q in Question::ALL {
            answers.set(q, AnswerChoice::B);
        }
        assert_eq!(answers.complete(), Some([AnswerChoice::B; Question::COUNT]));
    }
}
