//! Step sequencing for the quote wizard.
//!
//! Forward and backward moves are both derived from [`active_steps`], so a step
//! skipped going forward is skipped going back as well. A position on a step that
//! became inactive (e.g. the size step after deselecting all wall work) moves to
//! the nearest active neighbour in declared order.

use crate::core::gate::{can_advance_with, ValidationFailure};
use crate::core::steps::{StepId, STEPS};
use crate::domain::model::FormState;
use crate::domain::services::{classify, ServiceProfile};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "step")]
pub enum FlowPosition {
    Step(StepId),
    /// Terminal state, only reachable through [`next`] from the last active step.
    Submit,
}

impl FlowPosition {
    pub fn start() -> Self {
        FlowPosition::Step(STEPS[0].id)
    }

    pub fn step(&self) -> Option<StepId> {
        match self {
            FlowPosition::Step(step) => Some(*step),
            FlowPosition::Submit => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowPosition::Submit)
    }
}

impl fmt::Display for FlowPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowPosition::Step(step) => write!(f, "{}", step),
            FlowPosition::Submit => f.write_str("submit"),
        }
    }
}

pub fn active_steps(state: &FormState) -> Vec<StepId> {
    active_steps_for(&classify(&state.selected_services))
}

pub fn active_steps_for(profile: &ServiceProfile) -> Vec<StepId> {
    STEPS
        .iter()
        .filter(|definition| (definition.is_active)(profile))
        .map(|definition| definition.id)
        .collect()
}

/// Move forward if the current step's gate passes.
pub fn next(current: FlowPosition, state: &FormState) -> Result<FlowPosition, ValidationFailure> {
    let step = match current {
        FlowPosition::Step(step) => step,
        FlowPosition::Submit => return Ok(FlowPosition::Submit),
    };

    let profile = classify(&state.selected_services);
    can_advance_with(step, state, &profile)?;

    let ordinal = step.ordinal();
    let following = active_steps_for(&profile)
        .into_iter()
        .find(|candidate| candidate.ordinal() > ordinal);

    Ok(following.map_or(FlowPosition::Submit, FlowPosition::Step))
}

/// Move to the previous active step. A no-op on the first step.
pub fn back(current: FlowPosition, state: &FormState) -> FlowPosition {
    let active = active_steps(state);
    match current {
        FlowPosition::Submit => active
            .last()
            .copied()
            .map_or(FlowPosition::start(), FlowPosition::Step),
        FlowPosition::Step(step) => {
            let ordinal = step.ordinal();
            active
                .into_iter()
                .rev()
                .find(|candidate| candidate.ordinal() < ordinal)
                .map_or(current, FlowPosition::Step)
        }
    }
}

/// One-based position and total count of active steps, for a progress bar.
pub fn progress(current: FlowPosition, state: &FormState) -> (usize, usize) {
    let active = active_steps(state);
    let total = active.len();
    let done = match current {
        FlowPosition::Submit => total,
        FlowPosition::Step(step) => {
            let ordinal = step.ordinal();
            active
                .iter()
                .filter(|candidate| candidate.ordinal() <= ordinal)
                .count()
                .max(1)
        }
    };
    (done, total)
}
