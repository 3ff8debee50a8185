use crate::domain::services::ServiceProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    PostalCode,
    PropertyType,
    Services,
    Size,
    Details,
    AddOns,
    Summary,
    Contact,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::PostalCode => "postal-code",
            StepId::PropertyType => "property-type",
            StepId::Services => "services",
            StepId::Size => "size",
            StepId::Details => "details",
            StepId::AddOns => "add-ons",
            StepId::Summary => "summary",
            StepId::Contact => "contact",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StepId::PostalCode => "Location",
            StepId::PropertyType => "Property",
            StepId::Services => "Services",
            StepId::Size => "Size",
            StepId::Details => "Details",
            StepId::AddOns => "Extras",
            StepId::Summary => "Overview",
            StepId::Contact => "Contact",
        }
    }

    /// Position in the declared step order.
    pub fn ordinal(&self) -> usize {
        STEPS
            .iter()
            .position(|definition| definition.id == *self)
            .unwrap_or(STEPS.len())
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A step and the predicate deciding whether the wizard shows it.
#[derive(Clone, Copy)]
pub struct StepDefinition {
    pub id: StepId,
    pub is_active: fn(&ServiceProfile) -> bool,
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition").field("id", &self.id).finish()
    }
}

fn always(_: &ServiceProfile) -> bool {
    true
}

fn when_size_needed(profile: &ServiceProfile) -> bool {
    profile.needs_size_question
}

/// The one table both navigation directions are derived from.
pub const STEPS: [StepDefinition; 8] = [
    StepDefinition { id: StepId::PostalCode, is_active: always },
    StepDefinition { id: StepId::PropertyType, is_active: always },
    StepDefinition { id: StepId::Services, is_active: always },
    StepDefinition { id: StepId::Size, is_active: when_size_needed },
    StepDefinition { id: StepId::Details, is_active: always },
    StepDefinition { id: StepId::AddOns, is_active: always },
    StepDefinition { id: StepId::Summary, is_active: always },
    StepDefinition { id: StepId::Contact, is_active: always },
];
