// src/runtime/clock_runtime.rs
//! Рантайм партии поверх tokio.
//!
//! Единственный владелец `GameController` — задача рантайма. Команды приходят
//! через очередь и применяются строго по одной, в порядке прихода; метку времени
//! ставит рантайм в момент применения. Тики идут из `tokio::time::interval`
//! и их можно выключать и включать, не трогая состояние партии.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::{build_clock_view, execute, ClockViewDto, Command, CommandResponse};
use crate::domain::PlayerId;
use crate::engine::GameController;
use crate::infra::TimeSource;

/// Ошибки со стороны хэндла рантайма.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Игрок {0} не участвует в партии")]
    UnknownPlayer(PlayerId),

    #[error("Рантайм часов уже остановлен")]
    Closed,
}

/// Настройки рантайма.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Период тиков.
    pub tick_interval: Duration,
    /// Идут ли тики сразу после старта.
    pub ticking: bool,
    /// Ёмкость очереди команд.
    pub queue_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            ticking: true,
            queue_capacity: 64,
        }
    }
}

enum Request {
    Command(Command),
    SetTicking(bool),
    Shutdown,
}

struct Envelope {
    request: Request,
    reply: oneshot::Sender<ClockViewDto>,
}

/// Задача, которая владеет контроллером.
pub struct ClockRuntime<T> {
    controller: GameController,
    time: T,
    views: watch::Sender<ClockViewDto>,
    ticking: bool,
}

impl<T> ClockRuntime<T>
where
    T: TimeSource + Send + 'static,
{
    /// Запустить рантайм в текущем tokio-рантайме.
    ///
    /// По завершении (`ClockHandle::shutdown` или когда все хэндлы удалены)
    /// `JoinHandle` отдаёт контроллер обратно.
    pub fn spawn(
        controller: GameController,
        time: T,
        config: RuntimeConfig,
    ) -> (ClockHandle, JoinHandle<GameController>) {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let (views, view_rx) = watch::channel(build_clock_view(&controller));
        let players: Arc<[PlayerId]> = controller.player_ids().collect();

        let runtime = ClockRuntime {
            controller,
            time,
            views,
            ticking: config.ticking,
        };
        let join = tokio::spawn(runtime.run(rx, config.tick_interval));

        let handle = ClockHandle {
            tx,
            views: view_rx,
            players,
        };
        (handle, join)
    }

    async fn run(mut self, mut rx: mpsc::Receiver<Envelope>, period: Duration) -> GameController {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        debug!("рантайм часов запущен, период тиков {:?}", period);

        loop {
            tokio::select! {
                envelope = rx.recv() => {
                    let Some(envelope) = envelope else {
                        debug!("все хэндлы удалены");
                        break;
                    };
                    if !self.handle(envelope) {
                        break;
                    }
                }
                _ = interval.tick(), if self.ticking => {
                    self.run_command(Command::Tick);
                }
            }
        }

        info!("рантайм часов остановлен в состоянии {}", self.controller.state());
        self.controller
    }

    /// Обработать запрос. `false` — пора остановиться.
    fn handle(&mut self, envelope: Envelope) -> bool {
        let Envelope { request, reply } = envelope;

        let (view, keep_running) = match request {
            Request::Command(command) => (self.run_command(command), true),
            Request::SetTicking(on) => {
                if self.ticking != on {
                    debug!("тики {}", if on { "включены" } else { "выключены" });
                }
                self.ticking = on;
                (build_clock_view(&self.controller), true)
            }
            Request::Shutdown => (build_clock_view(&self.controller), false),
        };

        // Отправитель мог уже не ждать ответа.
        let _ = reply.send(view);
        keep_running
    }

    fn run_command(&mut self, command: Command) -> ClockViewDto {
        let now = self.time.now();
        match execute(&mut self.controller, command, now) {
            Ok(CommandResponse::Updated { view, .. }) => {
                self.views.send_replace(view.clone());
                view
            }
            Ok(CommandResponse::Unchanged(view)) => view,
            Err(err) => {
                warn!("команда отклонена: {:?}", err);
                build_clock_view(&self.controller)
            }
        }
    }
}

/// Хэндл для UI/таймеров: всё общение с партией идёт через него.
#[derive(Clone, Debug)]
pub struct ClockHandle {
    tx: mpsc::Sender<Envelope>,
    views: watch::Receiver<ClockViewDto>,
    players: Arc<[PlayerId]>,
}

impl ClockHandle {
    /// Передать ход игроку `to`.
    pub async fn pass_turn(&self, to: PlayerId) -> Result<ClockViewDto, RuntimeError> {
        self.ensure_player(to)?;
        self.request(Request::Command(Command::TurnPassed { to })).await
    }

    /// Игрок нажал свою кнопку.
    pub async fn tap(&self, player_id: PlayerId) -> Result<ClockViewDto, RuntimeError> {
        self.ensure_player(player_id)?;
        self.request(Request::Command(Command::ButtonTapped { player_id }))
            .await
    }

    pub async fn pause(&self) -> Result<ClockViewDto, RuntimeError> {
        self.request(Request::Command(Command::Pause)).await
    }

    pub async fn reset(&self) -> Result<ClockViewDto, RuntimeError> {
        self.request(Request::Command(Command::Reset)).await
    }

    /// Внеочередной тик (например, приложение вернулось на передний план).
    pub async fn tick_now(&self) -> Result<ClockViewDto, RuntimeError> {
        self.request(Request::Command(Command::Tick)).await
    }

    /// Включить/выключить периодические тики.
    pub async fn set_ticking(&self, on: bool) -> Result<ClockViewDto, RuntimeError> {
        self.request(Request::SetTicking(on)).await
    }

    /// Остановить рантайм. Возвращает последнее состояние.
    pub async fn shutdown(&self) -> Result<ClockViewDto, RuntimeError> {
        self.request(Request::Shutdown).await
    }

    /// Последнее опубликованное состояние.
    pub fn view(&self) -> ClockViewDto {
        self.views.borrow().clone()
    }

    /// Подписка на обновления (для перерисовки UI).
    pub fn subscribe(&self) -> watch::Receiver<ClockViewDto> {
        self.views.clone()
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    fn ensure_player(&self, player_id: PlayerId) -> Result<(), RuntimeError> {
        if self.players.contains(&player_id) {
            Ok(())
        } else {
            Err(RuntimeError::UnknownPlayer(player_id))
        }
    }

    async fn request(&self, request: Request) -> Result<ClockViewDto, RuntimeError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply })
            .await
            .map_err(|_| RuntimeError::Closed)?;
        rx.await.map_err(|_| RuntimeError::Closed)
    }
}
