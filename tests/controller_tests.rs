// tests/controller_tests.rs
//
// Проверяем автомат состояний GameController:
//
// 1) Переходы по таблице: Ready / Active / Paused / OutOfTime.
// 2) Инварианты:
//    - в Active заведены ровно одни часы;
//    - reset из любого состояния возвращает Ready и полные бюджеты;
//    - повторное нажатие активного игрока ничего не меняет;
//    - монотонность остатка у активного и неизменность у остановленного.
// 3) Сценарии из жизни: партия с паузой, флажок.

use chess_clock::domain::{GameState, Seconds, Timestamp};
use chess_clock::engine::{ClockEvent, GameController};
use chess_clock::time_ctrl::{PlayerClock, TimeControl};

fn ts(secs: f64) -> Timestamp {
    Timestamp::from_secs(secs)
}

/// Утилита: партия 10с / 10с.
fn ten_seconds_each() -> GameController {
    GameController::two_player(Seconds(10.0), Seconds(10.0))
}

fn running_clocks(controller: &GameController) -> usize {
    controller.clocks().iter().filter(|c| c.is_running()).count()
}

// ----------------------
// Создание
// ----------------------

#[test]
fn new_controller_is_ready_with_full_clocks() {
    let controller = GameController::two_player(Seconds(10.0), Seconds(20.0));
    assert_eq!(controller.state(), GameState::Ready);
    assert_eq!(controller.remaining_time(1), Seconds(10.0));
    assert_eq!(controller.initial_time(2), Seconds(20.0));
    assert_eq!(running_clocks(&controller), 0);
    assert_eq!(controller.player_ids().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn from_time_control_builds_all_players() {
    let control = TimeControl::equal("three", [3, 1, 2], Seconds(60.0));
    let controller = GameController::from_time_control(&control).unwrap();
    assert_eq!(controller.player_ids().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(controller.next_player(3), 1);
    assert_eq!(controller.next_player(1), 2);
}

#[test]
#[should_panic(expected = "duplicate player id")]
fn duplicate_ids_panic() {
    GameController::new(vec![
        PlayerClock::new(1, Seconds(10.0)),
        PlayerClock::new(1, Seconds(10.0)),
    ]);
}

#[test]
#[should_panic(expected = "unknown player id 7")]
fn unknown_player_is_a_contract_violation() {
    let mut controller = ten_seconds_each();
    controller.turn_passed(7, ts(0.0));
}

#[test]
#[should_panic(expected = "unknown player id 9")]
fn unknown_player_panics_even_when_out_of_time() {
    let mut controller = GameController::two_player(Seconds(1.0), Seconds(1.0));
    controller.turn_passed(1, ts(0.0));
    controller.tick(ts(2.0));
    controller.turn_passed(9, ts(3.0));
}

// ----------------------
// Переходы
// ----------------------

#[test]
fn first_turn_pass_starts_that_players_clock() {
    let mut controller = ten_seconds_each();
    let state = controller.turn_passed(1, ts(0.0));

    assert_eq!(state, GameState::Active(1));
    assert_eq!(controller.clock(1).clock_end(), Some(ts(10.0)));
    assert_eq!(controller.clock(2).clock_end(), None);
}

#[test]
fn turn_pass_to_other_player_freezes_the_outgoing_clock() {
    let mut controller = ten_seconds_each();
    controller.turn_passed(1, ts(0.0));
    controller.tick(ts(4.0));
    controller.turn_passed(2, ts(4.0));

    assert_eq!(controller.state(), GameState::Active(2));
    assert_eq!(controller.remaining_time(1), Seconds(6.0));
    assert_eq!(controller.clock(1).clock_end(), None);
    assert_eq!(controller.clock(2).clock_end(), Some(ts(14.0)));
}

#[test]
fn outgoing_clock_keeps_value_from_last_tick() {
    let mut controller = ten_seconds_each();
    controller.turn_passed(1, ts(0.0));
    controller.tick(ts(2.5));
    controller.turn_passed(2, ts(3.0));

    // Полсекунды между тиком и передачей хода не списываются.
    assert_eq!(controller.remaining_time(1), Seconds(7.5));
    assert_eq!(controller.clock(1).clock_end(), None);
}

#[test]
fn tapping_own_active_clock_is_a_noop() {
    let mut controller = ten_seconds_each();
    controller.turn_passed(1, ts(0.0));
    controller.tick(ts(2.0));
    let before = controller.clone();

    let state = controller.turn_passed(1, ts(5.0));

    assert_eq!(state, GameState::Active(1));
    assert_eq!(controller, before);
}

#[test]
fn pause_remembers_active_player_and_stops_clock() {
    let mut controller = ten_seconds_each();
    controller.turn_passed(1, ts(0.0));
    controller.tick(ts(2.0));
    let state = controller.pause(ts(2.5));

    assert_eq!(state, GameState::Paused(1));
    assert_eq!(running_clocks(&controller), 0);
    assert_eq!(controller.remaining_time(1), Seconds(8.0));

    // Во время паузы тики время не тратят.
    controller.tick(ts(50.0));
    assert_eq!(controller.state(), GameState::Paused(1));
    assert_eq!(controller.remaining_time(1), Seconds(8.0));
}

#[test]
fn resume_from_pause_rearms_from_frozen_remaining() {
    let mut controller = ten_seconds_each();
    controller.turn_passed(1, ts(0.0));
    controller.tick(ts(2.0));
    controller.pause(ts(2.0));
    controller.turn_passed(1, ts(20.0));

    assert_eq!(controller.state(), GameState::Active(1));
    assert_eq!(controller.clock(1).clock_end(), Some(ts(28.0)));
}

#[test]
fn resume_may_hand_the_turn_to_another_player() {
    let mut controller = ten_seconds_each();
    controller.turn_passed(1, ts(0.0));
    controller.tick(ts(2.0));
    controller.pause(ts(2.0));
    controller.turn_passed(2, ts(3.0));

    assert_eq!(controller.state(), GameState::Active(2));
    assert_eq!(running_clocks(&controller), 1);
    assert_eq!(controller.remaining_time(1), Seconds(8.0));
}

#[test]
fn pause_outside_active_is_a_noop() {
    let mut controller = ten_seconds_each();
    assert_eq!(controller.pause(ts(1.0)), GameState::Ready);

    controller.turn_passed(1, ts(0.0));
    controller.tick(ts(1.0));
    controller.pause(ts(1.0));
    assert_eq!(controller.pause(ts(2.0)), GameState::Paused(1));
    assert_eq!(controller.remaining_time(1), Seconds(9.0));
}

#[test]
fn ticks_are_ignored_outside_active() {
    let mut controller = ten_seconds_each();
    controller.tick(ts(100.0));
    assert_eq!(controller.state(), GameState::Ready);
    assert_eq!(controller.remaining_time(1), Seconds(10.0));
    assert_eq!(running_clocks(&controller), 0);
}

// ----------------------
// Флажок
// ----------------------

#[test]
fn player_runs_out_of_time() {
    let mut controller = GameController::two_player(Seconds(5.0), Seconds(5.0));
    controller.turn_passed(1, ts(0.0));
    let state = controller.tick(ts(6.0));

    assert_eq!(state, GameState::OutOfTime(1));
    assert_eq!(running_clocks(&controller), 0);
    assert_eq!(controller.clock(1).reported_remaining(), Seconds::ZERO);
}

#[test]
fn exactly_zero_remaining_is_out_of_time() {
    let mut controller = GameController::two_player(Seconds(5.0), Seconds(5.0));
    controller.turn_passed(2, ts(1.0));
    assert_eq!(controller.tick(ts(6.0)), GameState::OutOfTime(2));
}

#[test]
fn out_of_time_ignores_turn_passes_and_ticks() {
    let mut controller = GameController::two_player(Seconds(5.0), Seconds(5.0));
    controller.turn_passed(1, ts(0.0));
    controller.tick(ts(6.0));
    let before = controller.clone();

    controller.turn_passed(2, ts(7.0));
    controller.tick(ts(8.0));
    controller.pause(ts(9.0));

    assert_eq!(controller, before);
    assert_eq!(controller.state(), GameState::OutOfTime(1));
}

#[test]
fn frozen_player_with_zero_budget_loses_on_first_tick() {
    let mut controller = GameController::two_player(Seconds::ZERO, Seconds(5.0));
    controller.turn_passed(2, ts(0.0));

    assert_eq!(controller.state(), GameState::Active(2));
    assert_eq!(controller.tick(ts(0.1)), GameState::OutOfTime(1));
}

#[test]
fn active_player_loses_when_both_are_expired() {
    let mut controller = GameController::two_player(Seconds::ZERO, Seconds::ZERO);
    controller.turn_passed(2, ts(0.0));

    // Обе стороны в нуле: флажок у того, чьи часы шли.
    assert_eq!(controller.tick(ts(0.5)), GameState::OutOfTime(2));
}

// ----------------------
// Сброс
// ----------------------

#[test]
fn reset_from_every_state_returns_to_ready() {
    let mut active = ten_seconds_each();
    active.turn_passed(1, ts(0.0));
    active.tick(ts(3.0));

    let mut paused = active.clone();
    paused.pause(ts(4.0));

    let mut out = GameController::two_player(Seconds(1.0), Seconds(1.0));
    out.turn_passed(2, ts(0.0));
    out.tick(ts(2.0));
    assert!(out.state().is_terminal());

    for mut controller in [ten_seconds_each(), active, paused, out] {
        assert_eq!(controller.reset(), GameState::Ready);
        for clock in controller.clocks() {
            assert_eq!(clock.remaining_time(), clock.initial_time());
            assert_eq!(clock.clock_end(), None);
        }
    }
}

// ----------------------
// Инварианты на последовательностях
// ----------------------

#[test]
fn exactly_one_clock_runs_while_active() {
    let mut controller = ten_seconds_each();
    let mut now = 0.0;

    for turn in 0..20 {
        let to = if turn % 2 == 0 { 1 } else { 2 };
        controller.turn_passed(to, ts(now));
        now += 0.2;
        controller.tick(ts(now));

        assert_eq!(controller.state(), GameState::Active(to));
        assert_eq!(running_clocks(&controller), 1);
        assert!(controller.clock(to).is_running());
    }
}

#[test]
fn ticks_decrease_active_and_keep_frozen_constant() {
    let mut controller = ten_seconds_each();
    controller.turn_passed(1, ts(0.0));
    controller.turn_passed(2, ts(1.0));

    let frozen = controller.remaining_time(1);
    let mut last = controller.remaining_time(2);
    for step in 1..=30 {
        controller.tick(ts(1.0 + step as f64 * 0.1));
        assert!(controller.remaining_time(2) <= last);
        assert_eq!(controller.remaining_time(1), frozen);
        last = controller.remaining_time(2);
    }
}

#[test]
fn query_flags_follow_the_state() {
    let mut controller = ten_seconds_each();
    assert!(controller.can_tap(1) && controller.can_tap(2));
    assert!(!controller.can_pause());
    assert!(!controller.can_reset());

    controller.turn_passed(1, ts(0.0));
    assert!(controller.can_tap(1));
    assert!(!controller.can_tap(2));
    assert!(controller.can_pause());
    assert!(controller.can_reset());

    controller.pause(ts(1.0));
    assert!(controller.can_tap(1) && controller.can_tap(2));
    assert!(!controller.can_pause());

    controller.turn_passed(1, ts(2.0));
    controller.tick(ts(20.0));
    assert!(!controller.can_tap(1) && !controller.can_tap(2));
    assert!(controller.can_reset());
}

// ----------------------
// Сценарий
// ----------------------

#[test]
fn full_game_with_pause_and_resume() {
    let mut controller = ten_seconds_each();

    let state = controller.apply(ClockEvent::TurnPassed { to: 1, now: ts(0.0) });
    assert_eq!(state, GameState::Active(1));

    controller.apply(ClockEvent::Tick { now: ts(3.0) });
    assert_eq!(controller.remaining_time(1), Seconds(7.0));

    let state = controller.apply(ClockEvent::TurnPassed { to: 2, now: ts(3.0) });
    assert_eq!(state, GameState::Active(2));
    assert_eq!(controller.remaining_time(1), Seconds(7.0));
    assert_eq!(controller.clock(1).clock_end(), None);
    assert_eq!(controller.clock(2).clock_end(), Some(ts(13.0)));

    // После запуска тиков не было: остаток P2 по-прежнему 10 с.
    let state = controller.apply(ClockEvent::Pause { now: ts(5.0) });
    assert_eq!(state, GameState::Paused(2));
    assert_eq!(controller.remaining_time(2), Seconds(10.0));

    let state = controller.apply(ClockEvent::TurnPassed { to: 2, now: ts(8.0) });
    assert_eq!(state, GameState::Active(2));
    assert_eq!(controller.clock(2).clock_end(), Some(ts(18.0)));
    assert_eq!(controller.remaining_time(1), Seconds(7.0));

    controller.apply(ClockEvent::Tick { now: ts(17.5) });
    assert_eq!(controller.remaining_time(2), Seconds(0.5));
    assert_eq!(controller.state(), GameState::Active(2));

    let state = controller.apply(ClockEvent::Tick { now: ts(18.0) });
    assert_eq!(state, GameState::OutOfTime(2));

    assert_eq!(controller.apply(ClockEvent::Reset), GameState::Ready);
    assert_eq!(controller.remaining_time(1), Seconds(10.0));
    assert_eq!(controller.remaining_time(2), Seconds(10.0));
}
