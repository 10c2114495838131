use serde::{Deserialize, Serialize};

use crate::domain::{GameState, PlayerId};

/// DTO часов одного игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerClockDto {
    pub player_id: PlayerId,
    pub initial_secs: f64,
    /// Остаток для экрана: отрицательное время отдаём как ноль.
    pub remaining_secs: f64,
    /// Циферблат вида `M:SS` / `H:MM:SS`.
    pub display: String,
    pub is_running: bool,
    pub is_out_of_time: bool,
    /// Активна ли кнопка игрока.
    pub can_tap: bool,
}

/// DTO всей партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClockViewDto {
    pub game_state: GameState,
    pub players: Vec<PlayerClockDto>,
    pub can_pause: bool,
    pub can_reset: bool,
}

impl ClockViewDto {
    pub fn player(&self, player_id: PlayerId) -> Option<&PlayerClockDto> {
        self.players.iter().find(|p| p.player_id == player_id)
    }
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResponse {
    /// Команда применена, состояние изменилось.
    Updated {
        previous: GameState,
        view: ClockViewDto,
    },

    /// Команда допустима, но в текущем состоянии ничего не делает
    /// (повторное нажатие, пауза вне партии и т.п.).
    Unchanged(ClockViewDto),
}

impl CommandResponse {
    pub fn view(&self) -> &ClockViewDto {
        match self {
            CommandResponse::Updated { view, .. } => view,
            CommandResponse::Unchanged(view) => view,
        }
    }
}
