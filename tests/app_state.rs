use lineup_terminal::catalog::{Catalog, Map, Side, UtilityType};
use lineup_terminal::selection::SelectionStage;
use lineup_terminal::state::{AppState, Focus, Screen};

fn move_cursor_to(state: &mut AppState, index: usize) {
    for _ in 0..index {
        state.select_next();
    }
}

#[test]
fn focus_skips_disabled_steps() {
    let mut state = AppState::new(Catalog::builtin());
    assert_eq!(state.focus, Focus::Map);
    state.focus_next();
    assert_eq!(state.focus, Focus::Map);
    state.focus_prev();
    assert_eq!(state.focus, Focus::Map);

    state.choose_map(Map::Mirage);
    state.focus_next();
    assert_eq!(state.focus, Focus::Side);
    state.focus_next();
    assert_eq!(state.focus, Focus::Map);
}

#[test]
fn enter_walks_through_the_three_steps() {
    let mut state = AppState::new(Catalog::builtin());

    // Mirage is the second map.
    move_cursor_to(&mut state, 1);
    assert_eq!(state.activate(), None);
    assert_eq!(state.selection().map(), Some(Map::Mirage));
    assert_eq!(state.focus, Focus::Side);

    assert_eq!(state.activate(), None);
    assert_eq!(state.selection().side(), Some(Side::CT));
    assert_eq!(state.focus, Focus::Utility);

    assert_eq!(state.activate(), None);
    assert_eq!(state.selection().utility_type(), Some(UtilityType::Smoke));
    assert_eq!(state.selection().stage(), SelectionStage::FullSelection);
    assert_eq!(state.focus, Focus::Lineups);
    assert_eq!(state.visible_lineups().len(), 2);

    state.select_next();
    assert_eq!(
        state.highlighted_lineup().map(|l| l.id.as_str()),
        Some("mirage-ct-smoke-palace")
    );
    assert_eq!(state.activate(), None);
    match &state.screen {
        Screen::Details(params) => {
            assert_eq!(params.name.as_deref(), Some("Smoke Palace (retake)"));
            assert_eq!(params.side.as_deref(), Some("CT"));
        }
        Screen::Browse => panic!("expected details screen"),
    }

    state.back();
    assert_eq!(state.screen, Screen::Browse);
    assert_eq!(state.selection().stage(), SelectionStage::FullSelection);
}

#[test]
fn empty_result_keeps_focus_on_utility() {
    let mut state = AppState::new(Catalog::builtin());
    state.choose_map(Map::Ancient);
    state.choose_side(Side::CT);
    state.focus = Focus::Utility;
    assert_eq!(state.activate(), None);
    assert_eq!(state.selection().stage(), SelectionStage::FullSelection);
    assert!(state.visible_lineups().is_empty());
    assert_eq!(state.focus, Focus::Utility);
    assert_eq!(
        state.engine().summary(),
        "No lineups registered for this combination yet."
    );
}

#[test]
fn changing_map_resets_cursors_and_results() {
    let mut state = AppState::new(Catalog::builtin());
    state.choose_map(Map::DustII);
    state.choose_side(Side::TR);
    state.choose_utility_type(UtilityType::Smoke);
    state.focus = Focus::Lineups;
    state.select_next();
    assert_eq!(state.lineup_cursor, 1);

    state.choose_map(Map::Nuke);
    assert_eq!(state.lineup_cursor, 0);
    assert_eq!(state.side_cursor, 0);
    assert!(state.visible_lineups().is_empty());
    assert!(state.highlighted_lineup().is_none());
}

#[test]
fn cursor_wraps_in_both_directions() {
    let mut state = AppState::new(Catalog::builtin());
    state.select_prev();
    assert_eq!(state.map_cursor, Map::ALL.len() - 1);
    state.select_next();
    assert_eq!(state.map_cursor, 0);
}

#[test]
fn gated_choices_log_a_warning() {
    let mut state = AppState::new(Catalog::builtin());
    assert!(!state.choose_side(Side::CT));
    assert!(!state.choose_utility_type(UtilityType::Flash));
    assert_eq!(state.selection().stage(), SelectionStage::NoMap);
    assert!(state.logs.iter().all(|line| line.starts_with("[WARN]")));
    assert_eq!(state.logs.len(), 2);
}

#[test]
fn open_shortcut_needs_a_highlighted_lineup() {
    let mut state = AppState::new(Catalog::builtin());
    assert_eq!(state.launch_highlighted(), None);
    assert!(!state.launch_pending);

    state.choose_map(Map::Nuke);
    state.choose_side(Side::TR);
    state.choose_utility_type(UtilityType::Smoke);
    state.focus = Focus::Lineups;
    assert_eq!(
        state.launch_highlighted().as_deref(),
        Some("https://www.youtube.com/watch?v=3GPl1xNCRwM")
    );
    assert!(state.launch_pending);
}

#[test]
fn log_ring_is_capped() {
    let mut state = AppState::new(Catalog::builtin());
    for i in 0..250 {
        state.push_log(format!("[INFO] line {i}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 50"));
}
