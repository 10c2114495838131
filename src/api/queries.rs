use serde::{Deserialize, Serialize};

use crate::domain::{GameState, PlayerId};
use crate::engine::GameController;
use crate::time_ctrl::PlayerClock;

use super::dto::{ClockViewDto, PlayerClockDto};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Query {
    /// Вся партия целиком.
    GetClock,

    /// Часы одного игрока.
    GetPlayer { player_id: PlayerId },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum QueryResponse {
    Clock(ClockViewDto),
    Player(PlayerClockDto),
}

pub fn run_query(controller: &GameController, query: &Query) -> Result<QueryResponse, ApiError> {
    match *query {
        Query::GetClock => Ok(QueryResponse::Clock(build_clock_view(controller))),
        Query::GetPlayer { player_id } => {
            if !controller.has_player(player_id) {
                return Err(ApiError::UnknownPlayer(player_id));
            }
            Ok(QueryResponse::Player(build_player_dto(
                controller,
                controller.clock(player_id),
            )))
        }
    }
}

/// Сформировать DTO партии по текущему состоянию контроллера.
pub fn build_clock_view(controller: &GameController) -> ClockViewDto {
    let players = controller
        .clocks()
        .iter()
        .map(|clock| build_player_dto(controller, clock))
        .collect();

    ClockViewDto {
        game_state: controller.state(),
        players,
        can_pause: controller.can_pause(),
        can_reset: controller.can_reset(),
    }
}

fn build_player_dto(controller: &GameController, clock: &PlayerClock) -> PlayerClockDto {
    let remaining = clock.reported_remaining();

    PlayerClockDto {
        player_id: clock.id(),
        initial_secs: clock.initial_time().as_secs(),
        remaining_secs: remaining.as_secs(),
        display: remaining.to_string(),
        is_running: clock.is_running(),
        is_out_of_time: controller.state() == GameState::OutOfTime(clock.id()),
        can_tap: controller.can_tap(clock.id()),
    }
}
