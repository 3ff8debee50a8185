//! Per-step checks deciding whether the wizard may move forward.

use crate::core::steps::StepId;
use crate::domain::model::{FormState, SizeMode};
use crate::domain::services::{classify, ServiceProfile};
use crate::utils::validation::{is_valid_email, is_valid_postal_code};
use serde::Serialize;
use thiserror::Error;

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PHONE_LEN: usize = 6;

/// Why a step cannot be left yet. Recoverable by further input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{step}: {reason}")]
pub struct ValidationFailure {
    pub step: StepId,
    pub reason: String,
}

impl ValidationFailure {
    fn new(step: StepId, reason: &str) -> Self {
        Self {
            step,
            reason: reason.to_string(),
        }
    }
}

pub fn can_advance(step: StepId, state: &FormState) -> Result<(), ValidationFailure> {
    let profile = classify(&state.selected_services);
    can_advance_with(step, state, &profile)
}

/// Same as [`can_advance`] for callers that already hold the profile.
pub fn can_advance_with(
    step: StepId,
    state: &FormState,
    profile: &ServiceProfile,
) -> Result<(), ValidationFailure> {
    let reason = match step {
        StepId::PostalCode => postal_code(state),
        StepId::PropertyType => state
            .property_type
            .is_none()
            .then_some("Please choose a property type"),
        StepId::Services => services(state, profile),
        StepId::Size => size(state, profile),
        StepId::Details => details(state, profile),
        StepId::AddOns | StepId::Summary => None,
        StepId::Contact => contact(state),
    };

    match reason {
        Some(reason) => Err(ValidationFailure::new(step, reason)),
        None => Ok(()),
    }
}

fn is_positive(value: Option<f64>) -> bool {
    value.is_some_and(|v| v > 0.0)
}

fn postal_code(state: &FormState) -> Option<&'static str> {
    (!is_valid_postal_code(&state.postal_code))
        .then_some("Please enter a valid 5-digit postal code")
}

fn services(state: &FormState, profile: &ServiceProfile) -> Option<&'static str> {
    if state.selected_services.is_empty() {
        return Some("Please select at least one service");
    }
    if profile.has_mold_remediation && !is_positive(state.mold_area_sqm) {
        return Some("Please enter the affected area for mold remediation");
    }
    if profile.has_epoxy_flooring && !is_positive(state.epoxy_area_sqm) {
        return Some("Please enter the floor area for the epoxy coating");
    }
    if profile.has_resilient_flooring && !is_positive(state.floor_area_sqm) {
        return Some("Please enter the floor area for the resilient flooring");
    }
    if profile.needs_element_question {
        if state.element_type.is_none() {
            return Some("Please choose which elements should be painted");
        }
        if state.element_count.unwrap_or(0) == 0 {
            return Some("Please enter how many elements should be painted");
        }
    }
    None
}

fn size(state: &FormState, profile: &ServiceProfile) -> Option<&'static str> {
    if !profile.needs_size_question {
        return None;
    }
    let answered = match state.size_mode {
        SizeMode::RoomCount => state.room_count.unwrap_or(0) > 0,
        SizeMode::WallArea => is_positive(state.wall_area_sqm),
    };
    (!answered).then_some("Please enter the wall area or the number of rooms")
}

fn details(state: &FormState, profile: &ServiceProfile) -> Option<&'static str> {
    if profile.needs_color_question && state.finish_tier.is_none() {
        return Some("Please choose a paint finish");
    }
    if state.building_condition.is_none() {
        return Some("Please choose the building condition");
    }
    None
}

fn contact(state: &FormState) -> Option<&'static str> {
    let contact = &state.contact;
    if contact.name.trim().chars().count() < MIN_NAME_LEN {
        return Some("Please enter your name");
    }
    if contact.phone.trim().chars().count() < MIN_PHONE_LEN {
        return Some("Please enter a phone number with at least 6 characters");
    }
    if !is_valid_email(&contact.email) {
        return Some("Please enter a valid email address");
    }
    None
}
