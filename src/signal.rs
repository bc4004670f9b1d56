use chrono::{DateTime, TimeZone, Timelike};
use serde::Deserialize;
use thiserror::Error;

use crate::types::{SignalColor, SignalPlan, SignalReading, SignalStep};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("signal plan has no usable cycle time")]
    ZeroCycleTime,

    #[error("signal plan has no steps")]
    EmptySteps,

    #[error("malformed signal plan record: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn color_for_code(code: i32) -> SignalColor {
    match code {
        1 => SignalColor::Green,
        3 => SignalColor::Yellow,
        _ => SignalColor::Red,
    }
}

/// Seconds since local midnight in the instant's own time zone.
pub fn seconds_since_midnight<Tz: TimeZone>(instant: &DateTime<Tz>) -> u32 {
    instant.time().num_seconds_from_midnight()
}

pub fn phase_at_seconds(
    plan: &SignalPlan,
    seconds_since_midnight: u32,
) -> Result<SignalReading, PlanError> {
    if plan.cycle_time == 0 {
        return Err(PlanError::ZeroCycleTime);
    }
    if plan.steps.is_empty() {
        return Err(PlanError::EmptySteps);
    }

    let cycle = plan.cycle_time as i64;
    // Reduce the offset first; any i64 offset is accepted.
    let offset = plan.offset.rem_euclid(cycle);
    let position = (seconds_since_midnight as i64 - offset).rem_euclid(cycle);

    let mut elapsed: i64 = 0;
    for step in &plan.steps {
        elapsed += step.duration as i64;
        if position < elapsed {
            return Ok(SignalReading {
                color: color_for_code(step.display_code),
                countdown: (elapsed.min(cycle) - position) as u32,
            });
        }
    }

    log::warn!(
        "signal {}: position {}s is past the declared steps ({}s of a {}s cycle)",
        plan.signal_id.as_deref().unwrap_or("?"),
        position,
        elapsed,
        cycle
    );
    Ok(SignalReading {
        color: SignalColor::Unknown,
        countdown: (cycle - position) as u32,
    })
}

pub fn phase_at<Tz: TimeZone>(
    plan: &SignalPlan,
    instant: &DateTime<Tz>,
) -> Result<SignalReading, PlanError> {
    phase_at_seconds(plan, seconds_since_midnight(instant))
}

/// Reading for the nearest signal, if there is one with a usable plan.
pub fn current_reading<Tz: TimeZone>(
    plan: Option<&SignalPlan>,
    instant: &DateTime<Tz>,
) -> Option<SignalReading> {
    let plan = plan?;
    match phase_at(plan, instant) {
        Ok(reading) => Some(reading),
        Err(err) => {
            log::debug!(
                "no reading for signal {}: {}",
                plan.signal_id.as_deref().unwrap_or("?"),
                err
            );
            None
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TdxPlanRecord {
    #[serde(rename = "SignalID", default)]
    signal_id: Option<String>,
    #[serde(default)]
    cycle_time: Option<u32>,
    #[serde(default)]
    offset: Option<i64>,
    #[serde(default)]
    plans: Vec<TdxPlan>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TdxPlan {
    #[serde(default)]
    signal_steps: Vec<TdxStep>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TdxStep {
    human_display: i32,
    duration: u32,
}

impl From<TdxPlanRecord> for SignalPlan {
    fn from(record: TdxPlanRecord) -> Self {
        let steps = record
            .plans
            .into_iter()
            .next()
            .map(|plan| {
                plan.signal_steps
                    .into_iter()
                    .map(|s| SignalStep {
                        duration: s.duration,
                        display_code: s.human_display,
                    })
                    .collect()
            })
            .unwrap_or_default();
        SignalPlan {
            signal_id: record.signal_id,
            cycle_time: record.cycle_time.unwrap_or(0),
            offset: record.offset.unwrap_or(0),
            steps,
        }
    }
}

/// Decodes a TDX `TrafficSignal/Plan` response body. Only the first plan of
/// each record is used.
pub fn parse_tdx_plans(json: &str) -> Result<Vec<SignalPlan>, PlanError> {
    let records: Vec<TdxPlanRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(SignalPlan::from).collect())
}
