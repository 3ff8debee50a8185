use crate::domain::model::FormState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A named line of the price breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Component {
    WallsAndCeilings,
    SkimCoating,
    Wallpapering,
    Varnishing,
    MoldRemediation,
    ResilientFlooring,
    EpoxyFlooring,
    AddOns,
    OldBuildingSurcharge,
}

impl Component {
    pub const ALL: [Component; 9] = [
        Component::WallsAndCeilings,
        Component::SkimCoating,
        Component::Wallpapering,
        Component::Varnishing,
        Component::MoldRemediation,
        Component::ResilientFlooring,
        Component::EpoxyFlooring,
        Component::AddOns,
        Component::OldBuildingSurcharge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Component::WallsAndCeilings => "Walls & ceilings",
            Component::SkimCoating => "Skim coating",
            Component::Wallpapering => "Wallpapering",
            Component::Varnishing => "Painted elements",
            Component::MoldRemediation => "Mold remediation",
            Component::ResilientFlooring => "Resilient flooring",
            Component::EpoxyFlooring => "Epoxy flooring",
            Component::AddOns => "Add-ons",
            Component::OldBuildingSurcharge => "Old building surcharge",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Amount per component. Every component is present, zero when it does not apply,
/// so two breakdowns of the same catalog always compare line by line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    lines: BTreeMap<Component, f64>,
}

impl Default for PriceBreakdown {
    fn default() -> Self {
        Self {
            lines: Component::ALL.iter().map(|component| (*component, 0.0)).collect(),
        }
    }
}

impl PriceBreakdown {
    pub fn get(&self, component: Component) -> f64 {
        self.lines.get(&component).copied().unwrap_or(0.0)
    }

    pub(crate) fn set(&mut self, component: Component, amount: f64) {
        self.lines.insert(component, amount.max(0.0));
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        self.lines.iter().map(|(component, amount)| (*component, *amount))
    }

    /// Components that contribute a positive amount.
    pub fn charged(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        self.iter().filter(|(_, amount)| *amount > 0.0)
    }

    pub fn total(&self) -> f64 {
        self.lines.values().sum()
    }
}

/// Result of pricing a non-empty selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub min: u64,
    pub max: u64,
    /// Post-surcharge, post-floor amount the range is derived from.
    pub subtotal: f64,
    pub surcharge: f64,
    pub minimum_order_applied: bool,
    pub breakdown: PriceBreakdown,
}

impl Estimate {
    pub fn label(&self) -> String {
        format!("{}€ - {}€", self.min, self.max)
    }
}

/// Payload handed to the lead-persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub form: FormState,
    pub estimate: Option<Estimate>,
    pub price_label: String,
    pub source: String,
    pub submitted_at: DateTime<Utc>,
}

impl LeadSubmission {
    pub const ON_REQUEST: &'static str = "on request";

    pub fn new(form: FormState, estimate: Option<Estimate>, source: impl Into<String>) -> Self {
        let price_label = estimate
            .as_ref()
            .map(Estimate::label)
            .unwrap_or_else(|| Self::ON_REQUEST.to_string());
        Self {
            form,
            estimate,
            price_label,
            source: source.into(),
            submitted_at: Utc::now(),
        }
    }
}
