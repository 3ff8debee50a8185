//! Rendering of a one-shot estimate for the command line.

use crate::core::gate::can_advance_with;
use crate::core::pricing::PricingEngine;
use crate::core::steps::{StepId, STEPS};
use crate::domain::model::FormState;
use crate::domain::quote::{Estimate, LeadSubmission};
use crate::domain::services::{classify, ServiceProfile};
use crate::utils::error::{QuoteError, Result};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: StepId,
    pub active: bool,
    /// Gate failure reason, `None` when the step can be left.
    pub blocked: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    pub profile: ServiceProfile,
    pub steps: Vec<StepReport>,
    pub estimate: Option<Estimate>,
    pub price_label: String,
}

impl EstimateReport {
    pub fn build(engine: &PricingEngine, state: &FormState) -> Self {
        let profile = classify(&state.selected_services);
        let steps = STEPS
            .iter()
            .map(|definition| StepReport {
                step: definition.id,
                active: (definition.is_active)(&profile),
                blocked: can_advance_with(definition.id, state, &profile)
                    .err()
                    .map(|failure| failure.reason),
            })
            .collect();
        let estimate = engine.estimate(state);
        let price_label = estimate
            .as_ref()
            .map(Estimate::label)
            .unwrap_or_else(|| LeadSubmission::ON_REQUEST.to_string());

        Self {
            profile,
            steps,
            estimate,
            price_label,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Steps:");
        for step in &self.steps {
            let marker = match (step.active, &step.blocked) {
                (false, _) => "skip",
                (true, None) => " ok ",
                (true, Some(_)) => "open",
            };
            let _ = write!(out, "  [{}] {:<10} {}", marker, step.step.title(), step.step);
            if let (true, Some(reason)) = (step.active, &step.blocked) {
                let _ = write!(out, " - {}", reason);
            }
            out.push('\n');
        }

        match &self.estimate {
            None => {
                let _ = writeln!(out, "\nPrice: {}", self.price_label);
            }
            Some(estimate) => {
                let _ = writeln!(out, "\nBreakdown:");
                for (component, amount) in estimate.breakdown.charged() {
                    let _ = writeln!(out, "  {:<24} {:>10.2} €", component.label(), amount);
                }
                if estimate.minimum_order_applied {
                    let _ = writeln!(out, "  (minimum order applied)");
                }
                let _ = writeln!(out, "  {:<24} {:>10.2} €", "Subtotal", estimate.subtotal);
                let _ = writeln!(out, "\nPrice: {}", self.price_label);
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One row per breakdown component, then subtotal and range rows.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["item", "amount"])?;

        if let Some(estimate) = &self.estimate {
            for (component, amount) in estimate.breakdown.iter() {
                writer.write_record([component.label().to_string(), format!("{:.2}", amount)])?;
            }
            writer.write_record(["surcharge".to_string(), format!("{:.2}", estimate.surcharge)])?;
            writer.write_record(["subtotal".to_string(), format!("{:.2}", estimate.subtotal)])?;
            writer.write_record(["min".to_string(), estimate.min.to_string()])?;
            writer.write_record(["max".to_string(), estimate.max.to_string()])?;
        }

        let data = writer
            .into_inner()
            .map_err(|e| QuoteError::IoError(e.into_error()))?;
        String::from_utf8(data)
            .map_err(|e| QuoteError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}
