//! Ruleset selection from the environment.

use std::env;

use crate::domain::{DiscardRule, JokerRules, Ruleset};
use crate::error::AppError;

pub fn parse_jokers(value: &str) -> Result<JokerRules, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" => Ok(JokerRules::None),
        "suitless" => Ok(JokerRules::Suitless),
        "two_suits" => Ok(JokerRules::TwoSuits),
        "all_suits" => Ok(JokerRules::AllSuits),
        other => Err(AppError::config(format!(
            "GOLF_JOKERS must be one of none|suitless|two_suits|all_suits, got '{other}'"
        ))),
    }
}

pub fn parse_discard_rule(value: &str) -> Result<DiscardRule, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "require_flip" => Ok(DiscardRule::RequireFlip),
        "ends_turn" => Ok(DiscardRule::EndsTurn),
        other => Err(AppError::config(format!(
            "GOLF_DISCARD_RULE must be require_flip or ends_turn, got '{other}'"
        ))),
    }
}

/// Ruleset from `GOLF_JOKERS` / `GOLF_DISCARD_RULE`; unset variables keep the defaults.
pub fn ruleset_from_env() -> Result<Ruleset, AppError> {
    let defaults = Ruleset::default();
    let jokers = match env::var("GOLF_JOKERS") {
        Ok(v) => parse_jokers(&v)?,
        Err(_) => defaults.jokers,
    };
    let discard = match env::var("GOLF_DISCARD_RULE") {
        Ok(v) => parse_discard_rule(&v)?,
        Err(_) => defaults.discard,
    };
    Ok(Ruleset { jokers, discard })
}
