// src/bin/chess_clock_dev_cli.rs
//
// Dev-CLI для шахматных часов.
//
//   chess_clock_dev_cli                  — сценарий на ручном времени (детерминированный);
//   chess_clock_dev_cli <control.json>   — то же, но с контролем времени из файла;
//   chess_clock_dev_cli --live [secs]    — живая партия на tokio-рантайме до флажка.
//
// Флаг -v / --verbose включает trace-лог переходов.

use std::time::Duration;

use chess_clock::api::{build_clock_view, execute, ClockViewDto, Command};
use chess_clock::domain::{GameState, Seconds, Timestamp};
use chess_clock::engine::GameController;
use chess_clock::infra::{init_logging, LoggingConfig, SystemTimeSource};
use chess_clock::runtime::{ClockRuntime, RuntimeConfig};
use chess_clock::time_ctrl::TimeControl;

use log::{error, info};
use tokio::runtime::Builder as RtBuilder;

fn main() {
    let (flags, args): (Vec<String>, Vec<String>) = std::env::args()
        .skip(1)
        .partition(|a| a == "-v" || a == "--verbose");

    init_logging(if flags.is_empty() {
        LoggingConfig::default()
    } else {
        LoggingConfig::verbose()
    });

    match args.first().map(String::as_str) {
        Some("--live") => {
            let secs = args
                .get(1)
                .and_then(|s| s.parse::<f64>().ok())
                .unwrap_or(3.0);
            run_live(Seconds::from_secs(secs));
        }
        Some(path) => match load_time_control(path) {
            Ok(control) => run_scripted(control),
            Err(e) => {
                error!("не удалось загрузить контроль времени из {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => run_scripted(TimeControl::default()),
    }
}

fn load_time_control(path: &str) -> Result<TimeControl, String> {
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    TimeControl::from_json(&json).map_err(|e| e.to_string())
}

/// Сценарий на ручном времени: ход, тик, передача хода, пауза, возобновление, флажок.
fn run_scripted(control: TimeControl) {
    println!("chess_clock_dev_cli: контроль времени '{}'", control.name);

    let mut controller = match GameController::from_time_control(&control) {
        Ok(c) => c,
        Err(e) => {
            error!("контроль времени не прошёл проверку: {}", e);
            std::process::exit(1);
        }
    };

    let ids: Vec<_> = controller.player_ids().collect();
    let (first, second) = (ids[0], ids[1]);

    let script = [
        (0.0, Command::TurnPassed { to: first }),
        (3.0, Command::Tick),
        (3.0, Command::ButtonTapped { player_id: first }),
        (5.0, Command::Pause),
        (8.0, Command::TurnPassed { to: second }),
        (8.0, Command::TurnPassed { to: second }),
        (9.5, Command::Tick),
    ];

    print_view("старт", &build_clock_view(&controller));

    for (at, command) in script {
        let label = format!("t={:.1} {:?}", at, command);
        match execute(&mut controller, command, Timestamp::from_secs(at)) {
            Ok(resp) => print_view(&label, resp.view()),
            Err(e) => println!("[CLI] ОШИБКА {}: {:?}", label, e),
        }
    }

    // Дожимаем тиками до флажка.
    let mut now = 9.5;
    while !controller.state().is_terminal() && now < 10_000.0 {
        now += 0.1;
        controller.tick(Timestamp::from_secs(now));
    }
    print_view(&format!("t={:.1} флажок", now), &build_clock_view(&controller));

    controller.reset();
    print_view("reset", &build_clock_view(&controller));
}

/// Живая партия: каждый игрок тратит секунду и передаёт ход, пока у кого-то не упадёт флажок.
fn run_live(initial: Seconds) {
    let rt = match RtBuilder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!("не удалось поднять tokio-рантайм: {}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async move {
        let controller = GameController::two_player(initial, initial + Seconds::from_secs(0.5));
        let (handle, join) =
            ClockRuntime::spawn(controller, SystemTimeSource::new(), RuntimeConfig::default());
        let mut updates = handle.subscribe();
        let mut moves = tokio::time::interval(Duration::from_secs(1));
        moves.tick().await;

        let mut to = 1;
        if let Err(e) = handle.pass_turn(to).await {
            error!("{}", e);
            return;
        }

        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let view = updates.borrow_and_update().clone();
                    if let GameState::OutOfTime(loser) = view.game_state {
                        print_view(&format!("флажок у игрока {}", loser), &view);
                        break;
                    }
                }
                _ = moves.tick() => {
                    to = if to == 1 { 2 } else { 1 };
                    match handle.pass_turn(to).await {
                        Ok(view) => print_view("ход передан", &view),
                        Err(e) => {
                            error!("{}", e);
                            break;
                        }
                    }
                }
            }
        }

        let _ = handle.shutdown().await;
        match join.await {
            Ok(controller) => info!("партия закончилась в состоянии {}", controller.state()),
            Err(e) => error!("задача рантайма упала: {}", e),
        }
    });
}

fn print_view(label: &str, view: &ClockViewDto) {
    println!("[CLI] {:<40} state={}", label, view.game_state);
    for p in &view.players {
        println!(
            "        player {} | {:>8} | running={} | can_tap={}{}",
            p.player_id,
            p.display,
            p.is_running,
            p.can_tap,
            if p.is_out_of_time { " | OUT OF TIME" } else { "" }
        );
    }
}
