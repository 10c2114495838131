// src/domain/game_state.rs

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

/// Состояние партии. Хранит только идентификаторы игроков,
/// сами часы живут рядом в `GameController`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Никто ещё не ходил.
    #[default]
    Ready,
    /// Идут часы этого игрока.
    Active(PlayerId),
    /// Пауза; помним, чьи часы шли, чтобы вернуться к нему.
    Paused(PlayerId),
    /// У игрока кончилось время. Выйти отсюда можно только через reset.
    OutOfTime(PlayerId),
}

impl GameState {
    /// Чьи часы сейчас идут (только для `Active`).
    pub fn active_player(self) -> Option<PlayerId> {
        match self {
            GameState::Active(id) => Some(id),
            _ => None,
        }
    }

    /// Игрок, которого упоминает состояние (кроме `Ready`).
    pub fn player(self) -> Option<PlayerId> {
        match self {
            GameState::Ready => None,
            GameState::Active(id) | GameState::Paused(id) | GameState::OutOfTime(id) => Some(id),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::OutOfTime(_))
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GameState::Ready => f.write_str("ready"),
            GameState::Active(id) => write!(f, "active({})", id),
            GameState::Paused(id) => write!(f, "paused({})", id),
            GameState::OutOfTime(id) => write!(f, "out of time({})", id),
        }
    }
}
