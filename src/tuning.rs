//! Data-driven game balance
//!
//! Every number a designer might want to tweak lives here. Loaded from JSON
//! (missing fields fall back to defaults) or built from a difficulty preset.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::PacketKind;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Wire budget multiplier
    fn budget_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.5,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.7,
        }
    }

    /// Effect price multiplier
    fn price_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }
}

/// Coin prices for the shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectCosts {
    pub freeze: u32,
    pub extend_budget: u32,
    pub desensitize_secret: u32,
    pub reset_noise: u32,
}

impl Default for EffectCosts {
    fn default() -> Self {
        Self {
            freeze: 10,
            extend_budget: 5,
            desensitize_secret: 15,
            reset_noise: 5,
        }
    }
}

/// Relative odds of each packet kind when spawning without an explicit kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnWeights {
    pub messenger: u32,
    pub secret: u32,
    pub bulky: u32,
}

impl Default for SpawnWeights {
    fn default() -> Self {
        Self {
            messenger: 6,
            secret: 2,
            bulky: 2,
        }
    }
}

impl SpawnWeights {
    pub fn total(&self) -> u32 {
        self.messenger + self.secret + self.bulky
    }

    /// Map a roll in `0..total()` onto a kind
    pub fn pick(&self, roll: u32) -> PacketKind {
        if roll < self.messenger {
            PacketKind::Messenger
        } else if roll < self.messenger + self.secret {
            PacketKind::Secret
        } else {
            PacketKind::Bulky
        }
    }
}

/// Game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub difficulty: Difficulty,

    // === Wires ===
    /// Wire length available at session start
    pub initial_wire_budget: f32,
    /// Length granted by the extend-budget effect
    pub budget_extension: f32,
    /// Default coin price of a bend point
    pub bend_cost: u32,
    /// Wires longer than this boost non-bulky packets
    pub long_wire_threshold: f32,
    /// Acceleration granted on long wires
    pub long_wire_boost: f32,

    // === Effects ===
    pub costs: EffectCosts,
    /// Ticks a freeze lasts
    pub freeze_duration_ticks: u32,
    /// Velocity factor applied by the desensitize-secret effect
    pub secret_damping: f32,

    // === End conditions ===
    pub win_deliveries: u32,
    pub max_loss_ratio: f32,

    // === Spawning ===
    pub spawn_weights: SpawnWeights,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            initial_wire_budget: INITIAL_WIRE_BUDGET,
            budget_extension: 100.0,
            bend_cost: 1,
            long_wire_threshold: 300.0,
            long_wire_boost: 0.05,

            costs: EffectCosts::default(),
            freeze_duration_ticks: 600,
            secret_damping: 0.8,

            win_deliveries: WIN_DELIVERIES,
            max_loss_ratio: MAX_LOSS_RATIO,

            spawn_weights: SpawnWeights::default(),
        }
    }
}

impl Tuning {
    /// Create tuning from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut tuning = Self::default();
        tuning.apply_preset(preset);
        tuning
    }

    /// Apply a difficulty preset (rescales budget and prices from the defaults)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        let base = Self::default();
        self.difficulty = preset;
        self.initial_wire_budget = base.initial_wire_budget * preset.budget_scale();

        let scale = |cost: u32| ((cost as f32 * preset.price_scale()).round() as u32).max(1);
        self.costs = EffectCosts {
            freeze: scale(base.costs.freeze),
            extend_budget: scale(base.costs.extend_budget),
            desensitize_secret: scale(base.costs.desensitize_secret),
            reset_noise: scale(base.costs.reset_noise),
        };
    }

    /// Parse tuning from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, crate::persistence::PersistError> {
        let text = fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&text)?;
        log::info!(
            "Loaded tuning from {} ({})",
            path.as_ref().display(),
            tuning.difficulty.as_str()
        );
        Ok(tuning)
    }
}
