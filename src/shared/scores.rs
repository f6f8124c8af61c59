//! Review Scores and Preference Weights
//!
//! A review rates a restaurant on five axes; a weighting records how much
//! a user cares about each of those same axes. Both share the axis names
//! `food`, `ambience`, `service`, `price` and `novelty`.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Lowest accepted review score
pub const MIN_SCORE: i64 = 1;
/// Highest accepted review score
pub const MAX_SCORE: i64 = 5;
/// Value every weight returns to on reset
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Scores attached to a review, each in `MIN_SCORE..=MAX_SCORE`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewScores {
    pub food: i64,
    pub ambience: i64,
    pub service: i64,
    pub price: i64,
    pub novelty: i64,
}

impl ReviewScores {
    pub fn validate(&self) -> Result<(), SharedError> {
        check_score("food", self.food)?;
        check_score("ambience", self.ambience)?;
        check_score("service", self.service)?;
        check_score("price", self.price)?;
        check_score("novelty", self.novelty)
    }

    /// Overlay the fields present in `patch`
    pub fn apply(&self, patch: &ReviewScoresPatch) -> Self {
        Self {
            food: patch.food.unwrap_or(self.food),
            ambience: patch.ambience.unwrap_or(self.ambience),
            service: patch.service.unwrap_or(self.service),
            price: patch.price.unwrap_or(self.price),
            novelty: patch.novelty.unwrap_or(self.novelty),
        }
    }
}

/// Partial update of review scores
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewScoresPatch {
    pub food: Option<i64>,
    pub ambience: Option<i64>,
    pub service: Option<i64>,
    pub price: Option<i64>,
    pub novelty: Option<i64>,
}

/// A user's preference weights
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Weights {
    pub food: f64,
    pub ambience: f64,
    pub service: f64,
    pub price: f64,
    pub novelty: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            food: DEFAULT_WEIGHT,
            ambience: DEFAULT_WEIGHT,
            service: DEFAULT_WEIGHT,
            price: DEFAULT_WEIGHT,
            novelty: DEFAULT_WEIGHT,
        }
    }
}

impl Weights {
    pub fn validate(&self) -> Result<(), SharedError> {
        check_weight("food", self.food)?;
        check_weight("ambience", self.ambience)?;
        check_weight("service", self.service)?;
        check_weight("price", self.price)?;
        check_weight("novelty", self.novelty)
    }

    pub fn apply(&self, patch: &WeightsPatch) -> Self {
        Self {
            food: patch.food.unwrap_or(self.food),
            ambience: patch.ambience.unwrap_or(self.ambience),
            service: patch.service.unwrap_or(self.service),
            price: patch.price.unwrap_or(self.price),
            novelty: patch.novelty.unwrap_or(self.novelty),
        }
    }
}

/// Partial update of preference weights
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct WeightsPatch {
    pub food: Option<f64>,
    pub ambience: Option<f64>,
    pub service: Option<f64>,
    pub price: Option<f64>,
    pub novelty: Option<f64>,
}

fn check_score(field: &str, value: i64) -> Result<(), SharedError> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
        return Err(SharedError::validation(
            field,
            format!("{field} score must be between {MIN_SCORE} and {MAX_SCORE}, got {value}"),
        ));
    }
    Ok(())
}

fn check_weight(field: &str, value: f64) -> Result<(), SharedError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SharedError::validation(
            field,
            format!("{field} weight must be a non-negative number"),
        ));
    }
    Ok(())
}
