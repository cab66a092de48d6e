//! Personality classification of a finished questionnaire.
//!
//! [`classify`] is a pure function of the answers. Four axes yield a
//! four-part type code; four more traits are read off single answers or a
//! small additive score.

use serde::Serialize;

use crate::choice::{AnswerChoice, Question};
use crate::record::CompletedQuestionnaire;

const MIXED_LABEL: &str = "مختلط";

/// One of the four type-code axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    ExtraversionIntroversion,
    SensingIntuition,
    ThinkingFeeling,
    JudgingPerceiving,
}

impl Axis {
    /// The literal token standing in for an unresolved axis.
    pub fn mixed_token(&self) -> &'static str {
        match self {
            Self::ExtraversionIntroversion => "I/E",
            Self::SensingIntuition => "S/N",
            Self::ThinkingFeeling => "T/F",
            Self::JudgingPerceiving => "J/P",
        }
    }

    fn mixed_label(&self) -> &'static str {
        match self {
            Self::ExtraversionIntroversion => "مختلط (Ambivert)",
            _ => MIXED_LABEL,
        }
    }
}

/// Value of one axis: a definite letter, or mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisValue {
    Letter(char),
    Mixed,
}

/// A resolved axis with its human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisResult {
    pub axis: Axis,
    pub value: AxisValue,
    pub label: &'static str,
}

impl AxisResult {
    fn letter(axis: Axis, letter: char, label: &'static str) -> Self {
        Self {
            axis,
            value: AxisValue::Letter(letter),
            label,
        }
    }

    fn mixed(axis: Axis) -> Self {
        Self {
            axis,
            value: AxisValue::Mixed,
            label: axis.mixed_label(),
        }
    }

    /// The code this axis contributes to the type code.
    pub fn code(&self) -> String {
        match self.value {
            AxisValue::Letter(c) => c.to_string(),
            AxisValue::Mixed => self.axis.mixed_token().to_string(),
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self.value, AxisValue::Mixed)
    }
}

/// Creativity tier, straight from the creativity answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CreativityLevel {
    VeryCreative,
    SomewhatCreative,
    NotCreative,
}

impl CreativityLevel {
    pub fn percent(&self) -> u8 {
        match self {
            Self::VeryCreative => 100,
            Self::SomewhatCreative => 50,
            Self::NotCreative => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryCreative => "مبدع جدًا (100%)",
            Self::SomewhatCreative => "مبدع نسبيًا (50%)",
            Self::NotCreative => "غير مبدع (0%)",
        }
    }
}

/// Loyalty tier derived from the loyalty score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoyaltyLevel {
    High,
    Medium,
    Low,
}

impl LoyaltyLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= 75 {
            Self::High
        } else if score >= 50 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "مرتفع",
            Self::Medium => "متوسط",
            Self::Low => "منخفض",
        }
    }
}

/// Loyalty score in steps of 25, with its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Loyalty {
    pub score: u8,
    pub level: LoyaltyLevel,
}

impl Loyalty {
    /// Rendered as `"<tier> (<score>%)"`.
    pub fn label(&self) -> String {
        format!("{} ({}%)", self.level.label(), self.score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControlPreference {
    HighControl,
    ModerateControl,
    LowControl,
}

impl ControlPreference {
    pub fn label(&self) -> &'static str {
        match self {
            Self::HighControl => "يحب السيطرة (High Control)",
            Self::ModerateControl => "متعاون (Moderate Control)",
            Self::LowControl => "غير مسيطر (Low Control)",
        }
    }
}

/// How the user handles tough situations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Resilience {
    Strong,
    Moderate,
    Weak,
}

impl Resilience {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Strong => "قوي في المواقف الصعبة (Strong)",
            Self::Moderate => "متوسط في المواقف الصعبة (Moderate)",
            Self::Weak => "ضعيف في المواقف الصعبة (Weak)",
        }
    }
}

/// Derived personality profile. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalityProfile {
    pub extraversion: AxisResult,
    pub sensing: AxisResult,
    pub thinking: AxisResult,
    pub judging: AxisResult,
    pub creativity: CreativityLevel,
    pub loyalty: Loyalty,
    pub control: ControlPreference,
    pub resilience: Resilience,
}

impl PersonalityProfile {
    /// The four axes in type-code order.
    pub fn axes(&self) -> [AxisResult; 4] {
        [self.extraversion, self.sensing, self.thinking, self.judging]
    }

    /// Concatenated axis codes, e.g. `ENTJ` or `I/ENT/FJ/P`.
    pub fn type_code(&self) -> String {
        self.axes().iter().map(AxisResult::code).collect()
    }
}

/// Classify a finished questionnaire.
pub fn classify(record: &CompletedQuestionnaire) -> PersonalityProfile {
    let answer = |q: Question| record.answer(q);

    PersonalityProfile {
        extraversion: extraversion(answer(Question::SocialInteraction)),
        sensing: sensing(answer(Question::Creativity)),
        thinking: thinking(answer(Question::DecisionMaking)),
        judging: judging(
            answer(Question::Planning),
            answer(Question::DailyJudgment),
            answer(Question::Flexibility),
        ),
        creativity: creativity(answer(Question::Creativity)),
        loyalty: loyalty(
            answer(Question::Planning),
            answer(Question::Flexibility),
            answer(Question::TeamLoyalty),
        ),
        control: control(answer(Question::ControlPreference)),
        resilience: resilience(answer(Question::ToughSituations)),
    }
}

fn extraversion(social: AnswerChoice) -> AxisResult {
    let axis = Axis::ExtraversionIntroversion;
    match social {
        AnswerChoice::A => AxisResult::letter(axis, 'E', "منفتح (Extroverted)"),
        AnswerChoice::B => AxisResult::mixed(axis),
        AnswerChoice::C => AxisResult::letter(axis, 'I', "انطوائي (Introverted)"),
    }
}

fn sensing(creativity: AnswerChoice) -> AxisResult {
    let axis = Axis::SensingIntuition;
    match creativity {
        AnswerChoice::A => AxisResult::letter(axis, 'N', "حدسي (Intuitive)"),
        AnswerChoice::B => AxisResult::mixed(axis),
        AnswerChoice::C => AxisResult::letter(axis, 'S', "حسي (Sensing)"),
    }
}

fn thinking(decision: AnswerChoice) -> AxisResult {
    let axis = Axis::ThinkingFeeling;
    match decision {
        AnswerChoice::A => AxisResult::letter(axis, 'T', "منطقي (Thinking)"),
        AnswerChoice::B => AxisResult::letter(axis, 'F', "عاطفي (Feeling)"),
        AnswerChoice::C => AxisResult::mixed(axis),
    }
}

/// J counts two answers, P only one; a tie is mixed.
fn judging(planning: AnswerChoice, daily: AnswerChoice, flexibility: AnswerChoice) -> AxisResult {
    let axis = Axis::JudgingPerceiving;
    let j_score = [planning, daily]
        .iter()
        .filter(|c| **c == AnswerChoice::A)
        .count();
    let p_score = usize::from(flexibility == AnswerChoice::A);

    match j_score.cmp(&p_score) {
        std::cmp::Ordering::Greater => AxisResult::letter(axis, 'J', "منظم (Judging)"),
        std::cmp::Ordering::Less => AxisResult::letter(axis, 'P', "مرن (Perceiving)"),
        std::cmp::Ordering::Equal => AxisResult::mixed(axis),
    }
}

fn creativity(choice: AnswerChoice) -> CreativityLevel {
    match choice {
        AnswerChoice::A => CreativityLevel::VeryCreative,
        AnswerChoice::B => CreativityLevel::SomewhatCreative,
        AnswerChoice::C => CreativityLevel::NotCreative,
    }
}

fn loyalty(planning: AnswerChoice, flexibility: AnswerChoice, team: AnswerChoice) -> Loyalty {
    let mut score = 0;
    if planning == AnswerChoice::A {
        score += 25;
    }
    if flexibility == AnswerChoice::C {
        score += 25;
    }
    if team == AnswerChoice::A {
        score += 50;
    }
    Loyalty {
        score,
        level: LoyaltyLevel::from_score(score),
    }
}

fn control(choice: AnswerChoice) -> ControlPreference {
    match choice {
        AnswerChoice::A => ControlPreference::HighControl,
        AnswerChoice::B => ControlPreference::ModerateControl,
        AnswerChoice::C => ControlPreference::LowControl,
    }
}

fn resilience(choice: AnswerChoice) -> Resilience {
    match choice {
        AnswerChoice::A => Resilience::Strong,
        AnswerChoice::B => Resilience::Moderate,
        AnswerChoice::C => Resilience::Weak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Identity;
    use AnswerChoice::{A, B, C};

    fn completed(overrides: &[(Question, AnswerChoice)]) -> CompletedQuestionnaire {
        let mut answers = [B; Question::COUNT];
        for (q, c) in overrides {
            answers[q.index()] = *c;
        }
        CompletedQuestionnaire {
            identity: Identity::new(1, "Omar", "Khalil"),
            nickname: "Omar".to_string(),
            city: "Beirut".to_string(),
            country: "Lebanon".to_string(),
            answers,
            submitted_at: chrono::NaiveDate::from_ymd_opt(2025, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap(),
        }
    }

    #[test]
    fn test_extraversion_axis() {
        let code = |c| classify(&completed(&[(Question::SocialInteraction, c)])).extraversion;
        assert_eq!(code(A).code(), "E");
        assert_eq!(code(B).code(), "I/E");
        assert_eq!(code(B).label, "مختلط (Ambivert)");
        assert_eq!(code(C).code(), "I");
    }

    #[test]
    fn test_sensing_axis() {
        let code = |c| classify(&completed(&[(Question::Creativity, c)])).sensing;
        assert_eq!(code(A).code(), "N");
        assert_eq!(code(B).code(), "S/N");
        assert_eq!(code(B).label, "مختلط");
        assert_eq!(code(C).code(), "S");
    }

    #[test]
    fn test_thinking_axis() {
        let code = |c| classify(&completed(&[(Question::DecisionMaking, c)])).thinking;
        assert_eq!(code(A).code(), "T");
        assert_eq!(code(B).code(), "F");
        assert_eq!(code(C).code(), "T/F");
        assert!(code(C).is_mixed());
    }

    #[test]
    fn test_judging_boundaries() {
        let judging = |planning, daily, flexibility| {
            classify(&completed(&[
                (Question::Planning, planning),
                (Question::DailyJudgment, daily),
                (Question::Flexibility, flexibility),
            ]))
            .judging
            .code()
        };
        assert_eq!(judging(A, A, C), "J");
        assert_eq!(judging(B, B, A), "P");
        assert_eq!(judging(A, B, A), "J/P");
        assert_eq!(judging(B, B, B), "J/P");
        assert_eq!(judging(A, A, A), "J");
    }

    #[test]
    fn test_loyalty_boundaries() {
        let loyalty = |planning, flexibility, team| {
            classify(&completed(&[
                (Question::Planning, planning),
                (Question::Flexibility, flexibility),
                (Question::TeamLoyalty, team),
            ]))
            .loyalty
        };

        let l = loyalty(A, C, A);
        assert_eq!((l.score, l.level), (100, LoyaltyLevel::High));
        assert_eq!(l.label(), "مرتفع (100%)");

        let l = loyalty(B, A, B);
        assert_eq!((l.score, l.level), (0, LoyaltyLevel::Low));

        let l = loyalty(A, A, B);
        assert_eq!((l.score, l.level), (25, LoyaltyLevel::Low));

        let l = loyalty(B, B, A);
        assert_eq!((l.score, l.level), (50, LoyaltyLevel::Medium));
        assert_eq!(l.label(), "متوسط (50%)");

        let l = loyalty(A, B, A);
        assert_eq!((l.score, l.level), (75, LoyaltyLevel::High));
    }

    #[test]
    fn test_direct_mappings() {
        let p = classify(&completed(&[
            (Question::Creativity, A),
            (Question::ControlPreference, C),
            (Question::ToughSituations, A),
        ]));
        assert_eq!(p.creativity.percent(), 100);
        assert_eq!(p.control, ControlPreference::LowControl);
        assert_eq!(p.resilience, Resilience::Strong);
        assert_eq!(p.resilience.label(), "قوي في المواقف الصعبة (Strong)");

        let p = classify(&completed(&[(Question::Creativity, C)]));
        assert_eq!(p.creativity.label(), "غير مبدع (0%)");
    }

    #[test]
    fn test_type_code() {
        let p = classify(&completed(&[
            (Question::SocialInteraction, A),
            (Question::Creativity, A),
            (Question::DecisionMaking, A),
            (Question::Planning, A),
            (Question::DailyJudgment, A),
        ]));
        assert_eq!(p.type_code(), "ENTJ");

        // All B: E/I and S/N mixed, F definite, J/P tied at 0-0.
        let p = classify(&completed(&[]));
        assert_eq!(p.type_code(), "I/ES/NFJ/P");
    }
}
