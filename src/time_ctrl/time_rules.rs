// src/time_ctrl/time_rules.rs
//! Конфигурация контроля времени.
//!
//! Здесь описываем только "правила": сколько времени у кого на старте.
//! Состояние партии живёт в `GameController`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PlayerId, Seconds};

use super::{Increment, PlayerClock};

/// Ошибки конфигурации контроля времени.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Нужно минимум два игрока, задано {0}")]
    NotEnoughPlayers(usize),

    #[error("Игрок {0} указан в контроле времени дважды")]
    DuplicatePlayer(PlayerId),

    #[error("Некорректное стартовое время у игрока {player_id}: {secs}")]
    InvalidInitialTime { player_id: PlayerId, secs: f64 },

    #[error("Добавка за ход ({0:?}) пока не поддерживается")]
    UnsupportedIncrement(super::IncrementType),

    #[error("Не удалось разобрать контроль времени: {0}")]
    Parse(String),
}

/// Пресеты контроля времени.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeProfile {
    /// 10 секунд — удобно для проверки флажка.
    Quick,
    /// 1 минута.
    Bullet,
    /// 5 минут.
    Blitz,
    /// 10 минут.
    Rapid,
    /// 90 минут.
    Classical,
}

impl TimeProfile {
    pub fn initial_time(self) -> Seconds {
        match self {
            TimeProfile::Quick => Seconds::from_secs(10.0),
            TimeProfile::Bullet => Seconds::from_minutes(1),
            TimeProfile::Blitz => Seconds::from_minutes(5),
            TimeProfile::Rapid => Seconds::from_minutes(10),
            TimeProfile::Classical => Seconds::from_minutes(90),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeProfile::Quick => "Quick 10s",
            TimeProfile::Bullet => "Bullet 1+0",
            TimeProfile::Blitz => "Blitz 5+0",
            TimeProfile::Rapid => "Rapid 10+0",
            TimeProfile::Classical => "Classical 90+0",
        }
    }
}

/// Правила для одного игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerTimeRules {
    pub player_id: PlayerId,
    /// Стартовый бюджет.
    pub initial_time: Seconds,
    /// Добавка за ход (по умолчанию нет).
    #[serde(default)]
    pub increment: Increment,
}

impl PlayerTimeRules {
    pub fn new(player_id: PlayerId, initial_time: Seconds) -> Self {
        Self {
            player_id,
            initial_time,
            increment: Increment::none(),
        }
    }
}

/// Контроль времени для одной партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TimeControl {
    pub name: String,
    pub players: Vec<PlayerTimeRules>,
}

impl TimeControl {
    pub fn new(name: impl Into<String>, players: Vec<PlayerTimeRules>) -> Self {
        Self {
            name: name.into(),
            players,
        }
    }

    /// Одинаковое время у всех перечисленных игроков.
    pub fn equal<I>(name: impl Into<String>, players: I, initial_time: Seconds) -> Self
    where
        I: IntoIterator<Item = PlayerId>,
    {
        let players = players
            .into_iter()
            .map(|id| PlayerTimeRules::new(id, initial_time))
            .collect();
        Self::new(name, players)
    }

    /// Пресет для обычной партии на двоих (игроки 1 и 2).
    pub fn from_profile(profile: TimeProfile) -> Self {
        Self::equal(profile.name(), [1, 2], profile.initial_time())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let control: TimeControl =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        control.validate()?;
        Ok(control)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Проверка конфига перед стартом партии.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.len() < 2 {
            return Err(ConfigError::NotEnoughPlayers(self.players.len()));
        }

        let mut seen = HashSet::new();
        for rules in &self.players {
            if !seen.insert(rules.player_id) {
                return Err(ConfigError::DuplicatePlayer(rules.player_id));
            }
            if !rules.initial_time.is_valid_budget() {
                return Err(ConfigError::InvalidInitialTime {
                    player_id: rules.player_id,
                    secs: rules.initial_time.as_secs(),
                });
            }
            if rules.increment.is_active() {
                return Err(ConfigError::UnsupportedIncrement(rules.increment.kind));
            }
        }

        Ok(())
    }

    /// Собрать часы игроков по конфигу (после `validate`).
    pub fn build_clocks(&self) -> Vec<PlayerClock> {
        self.players
            .iter()
            .map(|rules| PlayerClock::new(rules.player_id, rules.initial_time))
            .collect()
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::from_profile(TimeProfile::Quick)
    }
}
