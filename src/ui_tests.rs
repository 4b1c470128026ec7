#[cfg(test)]
mod ui_integration_tests {
    use crate::catalog::{self, ItemContent};
    use crate::grading::Verdict;
    use crate::session::{handle_worksheet_input, ItemState, WorksheetSession};
    use crate::AppState;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_session(seed: u64) -> WorksheetSession {
        WorksheetSession::new(catalog::load_embedded().unwrap(), StdRng::seed_from_u64(seed))
    }

    fn press(session: &mut WorksheetSession, code: KeyCode) {
        let mut app_state = AppState::Worksheet;
        handle_worksheet_input(session, KeyEvent::new(code, KeyModifiers::empty()), &mut app_state)
            .unwrap();
    }

    fn press_n(session: &mut WorksheetSession, code: KeyCode, times: usize) {
        for _ in 0..times {
            press(session, code);
        }
    }

    fn solve_sequence(session: &mut WorksheetSession) {
        let len = match session.current_state() {
            Some(ItemState::Sequence(order)) => order.steps().len(),
            _ => panic!("not on a sequence"),
        };
        for target in 0..len {
            let (cursor, from) = match session.current_state() {
                Some(ItemState::Sequence(order)) => (
                    order.cursor(),
                    order
                        .steps()
                        .iter()
                        .position(|s| s.order as usize == target + 1)
                        .unwrap(),
                ),
                _ => unreachable!(),
            };
            // Walk the focus to the step, carry it up to its place and drop it.
            if cursor > from {
                press_n(session, KeyCode::Up, cursor - from);
            } else {
                press_n(session, KeyCode::Down, from - cursor);
            }
            press(session, KeyCode::Char(' '));
            press_n(session, KeyCode::Up, from - target);
            press(session, KeyCode::Char(' '));
        }
    }

    fn solve_board(session: &mut WorksheetSession) {
        let index = session.current_index;
        let ItemContent::Placement(board) = &session.catalog.items[index].content else {
            panic!("not on a board");
        };
        let board = board.clone();
        for slot in 0..board.slots().len() {
            let (slot_cursor, item_cursor, wanted) = match &session.states[index] {
                ItemState::Placement(state) => (
                    state.slot_cursor(),
                    state.item_cursor(),
                    state
                        .tray(&board)
                        .iter()
                        .position(|item| item.correct_slot == board.slots()[slot].id)
                        .unwrap(),
                ),
                _ => unreachable!(),
            };
            press_n(session, KeyCode::Down, slot - slot_cursor);
            if item_cursor > wanted {
                press_n(session, KeyCode::Left, item_cursor - wanted);
            } else {
                press_n(session, KeyCode::Right, wanted - item_cursor);
            }
            press(session, KeyCode::Enter);
        }
    }

    fn type_answer(session: &mut WorksheetSession, text: &str) {
        for c in text.chars() {
            press(session, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_full_worksheet_scores_every_graded_item() {
        let mut session = create_test_session(11);

        for index in 0..session.catalog.len() {
            session.go_to(index);
            let content = session.catalog.items[index].content.clone();
            match content {
                ItemContent::Scenario(scenario) => type_answer(&mut session, &scenario.answer),
                ItemContent::RecallCard(_) => press(&mut session, KeyCode::Enter),
                ItemContent::Choice(question) => {
                    let correct = question.options().iter().position(|o| o.is_correct).unwrap();
                    press_n(&mut session, KeyCode::Down, correct);
                    press(&mut session, KeyCode::Enter);
                }
                ItemContent::DecisionTree(_) => {
                    for _ in 0..3 {
                        press(&mut session, KeyCode::Down);
                        press(&mut session, KeyCode::Enter);
                    }
                }
                ItemContent::Sequence(_) => solve_sequence(&mut session),
                ItemContent::Placement(_) => solve_board(&mut session),
                ItemContent::Hotspots(set) => {
                    for _ in 0..set.len() {
                        press(&mut session, KeyCode::Enter);
                        press(&mut session, KeyCode::Down);
                    }
                }
            }
        }

        session.submit();
        let result = session.result.as_ref().unwrap();
        assert_eq!(result.unanswered(), 0);
        assert_eq!(result.incorrect(), 0, "{:?}", result.items);
        assert_eq!(result.correct(), result.graded());
        assert_eq!(result.percent(), 100);

        for (item, state) in session.catalog.items.iter().zip(&session.states) {
            if let (ItemContent::Hotspots(set), ItemState::Hotspots(found)) = (&item.content, state) {
                assert!(found.is_complete(set));
            }
        }
    }

    #[test]
    fn test_widgets_do_not_share_state() {
        let mut session = create_test_session(5);
        let before = session.states.clone();

        let board = session
            .catalog
            .items
            .iter()
            .position(|i| matches!(&i.content, ItemContent::Placement(b) if b.id == "ac-grades"))
            .unwrap();
        session.go_to(board);
        press(&mut session, KeyCode::Enter);

        for (index, (old, new)) in before.iter().zip(&session.states).enumerate() {
            if index == board {
                assert_ne!(old, new);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_reveal_then_practice_again_round_trip() {
        let mut session = create_test_session(9);
        type_answer(&mut session, "angle of Louis");

        let tree = session
            .catalog
            .items
            .iter()
            .position(|i| matches!(i.content, ItemContent::DecisionTree(_)))
            .unwrap();
        session.go_to(tree);
        // Choosing to discharge the patient ends the walk at once.
        press_n(&mut session, KeyCode::Down, 3);
        press(&mut session, KeyCode::Enter);

        let mut app_state = AppState::Worksheet;
        handle_worksheet_input(
            &mut session,
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
            &mut app_state,
        )
        .unwrap();
        assert_eq!(app_state, AppState::Summary);

        let result = session.result.clone().unwrap();
        assert_eq!(result.items[0].verdict, Verdict::Correct);
        assert_eq!(result.items[tree].verdict, Verdict::Incorrect);

        // The case can be replayed while answers are shown; the score keeps the first walk.
        session.go_to(tree);
        press(&mut session, KeyCode::Char('r'));
        let ItemState::DecisionTree(walker) = &session.states[tree] else {
            panic!("expected a walker");
        };
        assert!(!walker.is_finished());
        assert_eq!(
            session.result.as_ref().unwrap().items[tree].verdict,
            Verdict::Incorrect
        );

        handle_worksheet_input(
            &mut session,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
            &mut app_state,
        )
        .unwrap();
        assert!(!session.is_revealed());
        assert!(session.answers.is_empty());
        let ItemState::DecisionTree(walker) = &session.states[tree] else {
            panic!("expected a walker");
        };
        assert_eq!(walker.path(), ["assess".to_string()]);
    }

    #[test]
    fn test_seeded_sessions_shuffle_identically() {
        let a = create_test_session(21);
        let b = create_test_session(21);
        assert_eq!(a.states, b.states);
    }
}
