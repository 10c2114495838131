// src/engine/controller.rs
//! Автомат состояний партии.
//!
//! `GameController` владеет часами всех игроков и общим `GameState`
//! и меняет их вместе, одним переходом на каждое событие.
//! Таблица переходов:
//!
//! | состояние     | событие          | результат                          |
//! |---------------|------------------|------------------------------------|
//! | Ready         | turn_passed(p)   | Active(p), часы p запущены         |
//! | Active(a)     | turn_passed(p≠a) | часы a остановлены, Active(p)      |
//! | Active(a)     | turn_passed(a)   | ничего                             |
//! | Paused(a)     | turn_passed(p)   | Active(p)                          |
//! | Active(a)     | pause            | часы a остановлены, Paused(a)      |
//! | любое         | reset            | Ready, все часы на старте          |
//! | Active(a)     | tick             | пересчёт a, при нуле — OutOfTime   |
//! | OutOfTime     | turn_passed/tick | ничего                             |
//!
//! Остановленные часы хранят остаток, посчитанный последним тиком.
//! Неизвестный `PlayerId` — ошибка вызывающего кода, и контроллер паникует.

use log::{debug, info, trace};

use crate::domain::{GameState, PlayerId, Seconds, Timestamp};
use crate::engine::events::ClockEvent;
use crate::time_ctrl::{ConfigError, PlayerClock, TimeControl};

#[derive(Clone, Debug, PartialEq)]
pub struct GameController {
    /// Часы игроков, отсортированы по id.
    clocks: Vec<PlayerClock>,
    state: GameState,
}

impl GameController {
    /// Контроллер из готовых часов.
    ///
    /// # Panics
    ///
    /// Паникует, если часов меньше двух или id повторяются.
    pub fn new(mut clocks: Vec<PlayerClock>) -> Self {
        assert!(clocks.len() >= 2, "a game needs at least two clocks");
        clocks.sort_by_key(PlayerClock::id);
        assert!(
            clocks.windows(2).all(|w| w[0].id() != w[1].id()),
            "duplicate player id"
        );

        let mut controller = Self {
            clocks,
            state: GameState::Ready,
        };
        controller.reset();
        controller
    }

    /// Обычная партия: игроки 1 и 2.
    pub fn two_player(player_one: Seconds, player_two: Seconds) -> Self {
        Self::new(vec![
            PlayerClock::new(1, player_one),
            PlayerClock::new(2, player_two),
        ])
    }

    /// Контроллер по проверенному контролю времени.
    pub fn from_time_control(control: &TimeControl) -> Result<Self, ConfigError> {
        control.validate()?;
        debug!(
            "новая партия '{}' на {} игроков",
            control.name,
            control.players.len()
        );
        Ok(Self::new(control.build_clocks()))
    }

    // ----------------------
    // Запросы
    // ----------------------

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn clocks(&self) -> &[PlayerClock] {
        &self.clocks
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.clocks.iter().map(PlayerClock::id)
    }

    pub fn has_player(&self, id: PlayerId) -> bool {
        self.position(id).is_some()
    }

    /// Часы игрока.
    ///
    /// # Panics
    ///
    /// Паникует на неизвестном id.
    pub fn clock(&self, id: PlayerId) -> &PlayerClock {
        &self.clocks[self.index_of(id)]
    }

    pub fn remaining_time(&self, id: PlayerId) -> Seconds {
        self.clock(id).remaining_time()
    }

    pub fn initial_time(&self, id: PlayerId) -> Seconds {
        self.clock(id).initial_time()
    }

    /// Следующий игрок по кругу. Кнопка игрока передаёт ход именно ему.
    pub fn next_player(&self, id: PlayerId) -> PlayerId {
        let idx = self.index_of(id);
        self.clocks[(idx + 1) % self.clocks.len()].id()
    }

    /// Может ли игрок сейчас нажать свою кнопку.
    pub fn can_tap(&self, id: PlayerId) -> bool {
        assert!(self.has_player(id), "unknown player id {}", id);
        match self.state {
            GameState::Ready | GameState::Paused(_) => true,
            GameState::Active(active) => active == id,
            GameState::OutOfTime(_) => false,
        }
    }

    pub fn can_pause(&self) -> bool {
        matches!(self.state, GameState::Active(_))
    }

    pub fn can_reset(&self) -> bool {
        self.state != GameState::Ready
    }

    // ----------------------
    // Команды
    // ----------------------

    /// Применить событие, вернуть новое состояние.
    pub fn apply(&mut self, event: ClockEvent) -> GameState {
        match event {
            ClockEvent::TurnPassed { to, now } => self.turn_passed(to, now),
            ClockEvent::Pause { now } => self.pause(now),
            ClockEvent::Reset => self.reset(),
            ClockEvent::Tick { now } => self.tick(now),
        }
    }

    /// Передать ход игроку `to`.
    pub fn turn_passed(&mut self, to: PlayerId, now: Timestamp) -> GameState {
        let to_idx = self.index_of(to);

        match self.state {
            GameState::OutOfTime(loser) => {
                trace!("turn_passed({}) проигнорирован: у игрока {} кончилось время", to, loser);
                return self.state;
            }
            GameState::Active(active) if active == to => {
                trace!("turn_passed({}): часы уже идут", to);
                return self.state;
            }
            GameState::Active(active) => {
                let from_idx = self.index_of(active);
                self.clocks[from_idx].freeze();
            }
            GameState::Paused(previous) => {
                if previous != to {
                    debug!("после паузы ход у {}, хотя до паузы был у {}", to, previous);
                }
            }
            GameState::Ready => {}
        }

        self.clocks[to_idx].arm_clock_end(now);
        self.transition(GameState::Active(to))
    }

    /// Пауза. Остаток активного игрока остаётся на последнем тике.
    pub fn pause(&mut self, _now: Timestamp) -> GameState {
        let GameState::Active(active) = self.state else {
            trace!("pause проигнорирован в состоянии {}", self.state);
            return self.state;
        };

        let idx = self.index_of(active);
        self.clocks[idx].freeze();
        self.transition(GameState::Paused(active))
    }

    /// Сброс: все часы на стартовое время, состояние `Ready`.
    pub fn reset(&mut self) -> GameState {
        for clock in &mut self.clocks {
            clock.reset();
        }
        self.transition(GameState::Ready)
    }

    /// Тик: пересчитать остаток активного игрока и проверить флажок.
    pub fn tick(&mut self, now: Timestamp) -> GameState {
        let GameState::Active(active) = self.state else {
            return self.state;
        };

        let idx = self.index_of(active);
        self.clocks[idx].refresh(now);

        if let Some(loser) = self.expired_player(active) {
            for clock in &mut self.clocks {
                clock.freeze();
            }
            info!(
                "у игрока {} кончилось время (остаток {:.3} с)",
                loser,
                self.clock(loser).remaining_time().as_secs()
            );
            return self.transition(GameState::OutOfTime(loser));
        }

        self.state
    }

    // ----------------------
    // Внутреннее
    // ----------------------

    /// Кто проиграл по времени. Если флажок упал у нескольких сразу,
    /// проигрывает тот, чьи часы шли.
    fn expired_player(&self, active: PlayerId) -> Option<PlayerId> {
        if self.clock(active).is_expired() {
            return Some(active);
        }
        self.clocks
            .iter()
            .find(|clock| clock.is_expired())
            .map(PlayerClock::id)
    }

    fn transition(&mut self, next: GameState) -> GameState {
        if self.state != next {
            debug!("{} -> {}", self.state, next);
        }
        self.state = next;
        next
    }

    fn position(&self, id: PlayerId) -> Option<usize> {
        self.clocks.binary_search_by_key(&id, PlayerClock::id).ok()
    }

    fn index_of(&self, id: PlayerId) -> usize {
        match self.position(id) {
            Some(idx) => idx,
            None => panic!("unknown player id {}", id),
        }
    }
}
