use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, Timestamp};
use crate::engine::{ClockEvent, GameController};

use super::dto::CommandResponse;
use super::errors::ApiError;
use super::queries::build_clock_view;

/// Команда верхнего уровня (то, что присылает фронт).
///
/// Метки времени в команде нет: её ставит тот, кто исполняет
/// команду (`execute`), в момент исполнения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Command {
    /// Передать ход конкретному игроку.
    TurnPassed { to: PlayerId },

    /// Игрок нажал свою кнопку: ход уходит следующему по кругу.
    ButtonTapped { player_id: PlayerId },

    /// Пауза.
    Pause,

    /// Сброс партии.
    Reset,

    /// Пересчитать время (обычно шлёт таймер фронта).
    Tick,
}

/// Разобрать команду из JSON.
pub fn parse_command(json: &str) -> Result<Command, ApiError> {
    Ok(serde_json::from_str(json)?)
}

/// Превратить команду в событие движка.
///
/// Здесь же проверяем id игроков: движок считает неизвестный id
/// ошибкой программиста, а от клиента такое вполне может прийти.
pub fn command_to_event(
    controller: &GameController,
    command: &Command,
    now: Timestamp,
) -> Result<ClockEvent, ApiError> {
    let event = match *command {
        Command::TurnPassed { to } => {
            ensure_player(controller, to)?;
            ClockEvent::TurnPassed { to, now }
        }
        Command::ButtonTapped { player_id } => {
            ensure_player(controller, player_id)?;
            ClockEvent::TurnPassed {
                to: controller.next_player(player_id),
                now,
            }
        }
        Command::Pause => ClockEvent::Pause { now },
        Command::Reset => ClockEvent::Reset,
        Command::Tick => ClockEvent::Tick { now },
    };
    Ok(event)
}

/// Исполнить команду на контроллере в момент `now`.
pub fn execute(
    controller: &mut GameController,
    command: Command,
    now: Timestamp,
) -> Result<CommandResponse, ApiError> {
    let event = command_to_event(controller, &command, now)?;

    let before = controller.clone();
    controller.apply(event);
    let view = build_clock_view(controller);

    if *controller == before {
        Ok(CommandResponse::Unchanged(view))
    } else {
        Ok(CommandResponse::Updated {
            previous: before.state(),
            view,
        })
    }
}

fn ensure_player(controller: &GameController, player_id: PlayerId) -> Result<(), ApiError> {
    if controller.has_player(player_id) {
        Ok(())
    } else {
        Err(ApiError::UnknownPlayer(player_id))
    }
}
