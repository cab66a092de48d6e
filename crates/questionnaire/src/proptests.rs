//! Property-based tests for the session state machine and classifier.

use proptest::prelude::*;

use crate::choice::{AnswerChoice, Question};
use crate::classifier::{classify, AxisValue};
use crate::record::{CompletedQuestionnaire, Identity};
use crate::session::{SessionError, SessionTable, StepResult};
use crate::state::SessionState;
use crate::transition::TransitionError;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

fn timestamp() -> chrono::NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2024, 11, 5)
        .unwrap()
        .and_hms_opt(18, 30, 0)
        .unwrap()
}

fn arb_choice() -> impl Strategy<Value = AnswerChoice> {
    prop_oneof![
        Just(AnswerChoice::A),
        Just(AnswerChoice::B),
        Just(AnswerChoice::C),
    ]
}

/// Inputs a user might plausibly send: glyphs, near-miss junk and free text.
fn arb_input() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_choice().prop_map(|c| c.glyph().to_string()),
        Just(String::new()),
        Just("a".to_string()),
        Just(" أ".to_string()),
        Just("(ب)".to_string()),
        "[a-zA-Z ]{1,12}",
    ]
}

fn arb_completed() -> impl Strategy<Value = CompletedQuestionnaire> {
    prop::array::uniform11(arb_choice()).prop_map(|answers| CompletedQuestionnaire {
        identity: Identity::new(77, "Rami", "Aziz"),
        nickname: "Rami".to_string(),
        city: "Tunis".to_string(),
        country: "Tunisia".to_string(),
        answers,
        submitted_at: timestamp(),
    })
}

proptest! {
    #[test]
    fn prop_submit_before_begin_never_creates(user_id in any::<i64>(), text in arb_input()) {
        let rt = runtime();
        rt.block_on(async {
            let table = SessionTable::new();
            let result = table.submit_at(user_id, &text, timestamp()).await;
            prop_assert_eq!(result, Err(SessionError::NoActiveSession(user_id)));
            prop_assert!(table.is_empty().await);
            Ok(())
        })?;
    }

    #[test]
    fn prop_each_step_advances_once_or_not_at_all(inputs in prop::collection::vec(arb_input(), 0..60)) {
        let rt = runtime();
        rt.block_on(async {
            let table = SessionTable::new();
            table.begin(Identity::new(5, "Hala", "Nasser")).await;

            for input in &inputs {
                let Some(before) = table.snapshot(5).await else {
                    break;
                };
                let result = table.submit_at(5, input, timestamp()).await;

                match result {
                    Ok(StepResult::Advanced { state, .. }) => {
                        prop_assert_eq!(state.position(), before.state.position() + 1);
                        let after = table.snapshot(5).await.unwrap();
                        prop_assert_eq!(after.filled_fields(), before.filled_fields() + 1);
                        if let SessionState::AwaitingAnswer(q) = before.state {
                            prop_assert_eq!(after.answers.get(q), AnswerChoice::parse(input));
                        }
                    }
                    Ok(StepResult::Rejected { state, reason }) => {
                        prop_assert_eq!(state, before.state);
                        let after = table.snapshot(5).await.unwrap();
                        prop_assert_eq!(&after, &before);
                        match before.state {
                            SessionState::AwaitingAnswer(q) => {
                                prop_assert_eq!(reason, TransitionError::InvalidChoice(q));
                                prop_assert!(AnswerChoice::parse(input).is_none());
                            }
                            _ => {
                                prop_assert_eq!(reason, TransitionError::EmptyText);
                            }
                        }
                    }
                    Ok(StepResult::Finished(completed)) => {
                        prop_assert_eq!(
                            before.state,
                            SessionState::AwaitingAnswer(Question::ToughSituations)
                        );
                        prop_assert_eq!(
                            Some(completed.answer(Question::ToughSituations)),
                            AnswerChoice::parse(input)
                        );
                        prop_assert!(table.is_empty().await);
                    }
                    Err(e) => {
                        prop_assert!(false, "unexpected error: {}", e);
                    }
                }
            }
            Ok(())
        })?;
    }

    #[test]
    fn prop_valid_run_always_finishes(answers in prop::array::uniform11(arb_choice())) {
        let rt = runtime();
        rt.block_on(async {
            let table = SessionTable::new();
            table.begin(Identity::new(8, "Yara", "Fares")).await;
            for text in ["Yoyo", "Oran", "Algeria"] {
                table.submit_at(8, text, timestamp()).await.unwrap();
            }

            let mut finished = None;
            for choice in answers {
                if let StepResult::Finished(done) =
                    table.submit_at(8, choice.glyph(), timestamp()).await.unwrap()
                {
                    finished = Some(done);
                }
            }

            let done = finished.expect("questionnaire did not finish");
            prop_assert_eq!(done.answers, answers);
            prop_assert_eq!(done.country.as_str(), "Algeria");
            prop_assert!(table.is_empty().await);
            Ok(())
        })?;
    }

    #[test]
    fn prop_classify_is_deterministic(record in arb_completed()) {
        let first = classify(&record);
        let second = classify(&record);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn prop_loyalty_in_steps_of_25(record in arb_completed()) {
        let profile = classify(&record);
        prop_assert!(profile.loyalty.score <= 100);
        prop_assert_eq!(profile.loyalty.score % 25, 0);
    }
}

/// Exhaustive check of the four axes over every combination of the six
/// slots they read.
#[test]
fn test_axis_truth_table() {
    use AnswerChoice::{A, B, C};

    for social in AnswerChoice::ALL {
        for creativity in AnswerChoice::ALL {
            for decision in AnswerChoice::ALL {
                for planning in AnswerChoice::ALL {
                    for daily in AnswerChoice::ALL {
                        for flexibility in AnswerChoice::ALL {
                            let mut answers = [C; Question::COUNT];
                            answers[Question::SocialInteraction.index()] = social;
                            answers[Question::Creativity.index()] = creativity;
                            answers[Question::DecisionMaking.index()] = decision;
                            answers[Question::Planning.index()] = planning;
                            answers[Question::DailyJudgment.index()] = daily;
                            answers[Question::Flexibility.index()] = flexibility;

                            let record = CompletedQuestionnaire {
                                identity: Identity::new(1, "x", "y"),
                                nickname: "n".into(),
                                city: "c".into(),
                                country: "k".into(),
                                answers,
                                submitted_at: timestamp(),
                            };
                            let p = classify(&record);

                            let ei = match social {
                                A => "E",
                                B => "I/E",
                                C => "I",
                            };
                            let sn = match creativity {
                                A => "N",
                                B => "S/N",
                                C => "S",
                            };
                            let tf = match decision {
                                A => "T",
                                B => "F",
                                C => "T/F",
                            };
                            let j = (planning == A) as u8 + (daily == A) as u8;
                            let pp = (flexibility == A) as u8;
                            let jp = if j > pp {
                                "J"
                            } else if pp > j {
                                "P"
                            } else {
                                "J/P"
                            };

                            assert_eq!(p.extraversion.code(), ei);
                            assert_eq!(p.sensing.code(), sn);
                            assert_eq!(p.thinking.code(), tf);
                            assert_eq!(p.judging.code(), jp);
                            assert_eq!(p.type_code(), format!("{}{}{}{}", ei, sn, tf, jp));
                            assert_eq!(
                                p.judging.value == AxisValue::Mixed,
                                jp == "J/P"
                            );
                        }
                    }
                }
            }
        }
    }
}
