//! The live recalculation driver.
//!
//! A [`QuoteSession`] owns the single [`FormState`] of one wizard run. Every
//! mutation goes through [`reduce`] and is followed by a full recompute of
//! profile, active steps, gate verdict and estimate. The resulting
//! [`QuoteView`] replaces the previous one wholesale and is published to
//! subscribers.

use crate::core::flow::{self, FlowPosition};
use crate::core::gate::{can_advance_with, ValidationFailure};
use crate::core::pricing::PricingEngine;
use crate::core::reducer::{reduce, FormAction};
use crate::core::steps::StepId;
use crate::domain::model::{DistanceAnnotation, FormState};
use crate::domain::ports::LeadSink;
use crate::domain::quote::{Estimate, LeadSubmission};
use crate::domain::services::{classify, ServiceProfile};
use crate::utils::error::{QuoteError, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Everything the presentation layer renders for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteView {
    pub position: FlowPosition,
    pub profile: ServiceProfile,
    pub active_steps: Vec<StepId>,
    /// One-based step number and active step count.
    pub progress: (usize, usize),
    pub estimate: Option<Estimate>,
    /// Why the current step cannot be left yet, if it cannot.
    pub blocked: Option<ValidationFailure>,
}

impl QuoteView {
    pub fn can_advance(&self) -> bool {
        self.blocked.is_none()
    }
}

pub struct QuoteSession {
    engine: PricingEngine,
    state: FormState,
    position: FlowPosition,
    view: Arc<QuoteView>,
    publisher: watch::Sender<Arc<QuoteView>>,
    submitted: bool,
}

impl QuoteSession {
    pub fn new(engine: PricingEngine) -> Self {
        let state = FormState::new();
        let position = FlowPosition::start();
        let view = Arc::new(recompute(&engine, &state, position));
        let (publisher, _) = watch::channel(Arc::clone(&view));
        Self {
            engine,
            state,
            position,
            view,
            publisher,
            submitted: false,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn position(&self) -> FlowPosition {
        self.position
    }

    pub fn view(&self) -> Arc<QuoteView> {
        Arc::clone(&self.view)
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Receives a fresh view after every mutation or navigation.
    pub fn subscribe(&self) -> watch::Receiver<Arc<QuoteView>> {
        self.publisher.subscribe()
    }

    pub fn dispatch(&mut self, action: FormAction) -> Arc<QuoteView> {
        tracing::debug!(?action, position = %self.position, "dispatching form action");
        self.state = reduce(&self.state, action);
        self.refresh()
    }

    /// Apply every distance annotation that has arrived so far.
    pub fn drain_distance_updates(
        &mut self,
        updates: &mut mpsc::UnboundedReceiver<DistanceAnnotation>,
    ) -> Arc<QuoteView> {
        while let Ok(annotation) = updates.try_recv() {
            self.state = reduce(&self.state, FormAction::AnnotateDistance(annotation));
        }
        self.refresh()
    }

    pub fn next(&mut self) -> std::result::Result<FlowPosition, ValidationFailure> {
        match flow::next(self.position, &self.state) {
            Ok(position) => {
                tracing::info!(from = %self.position, to = %position, "advanced");
                self.position = position;
                self.refresh();
                Ok(position)
            }
            Err(failure) => {
                tracing::debug!(step = %failure.step, reason = %failure.reason, "advance blocked");
                Err(failure)
            }
        }
    }

    pub fn back(&mut self) -> FlowPosition {
        let position = flow::back(self.position, &self.state);
        if position != self.position {
            tracing::info!(from = %self.position, to = %position, "went back");
        }
        self.position = position;
        self.refresh();
        position
    }

    /// The payload a submission would send. Only available in the terminal state.
    pub fn submission(&self, source: &str) -> Result<LeadSubmission> {
        if self.submitted {
            return Err(QuoteError::AlreadySubmitted);
        }
        if !self.position.is_terminal() {
            return Err(QuoteError::NotReadyToSubmit {
                position: self.position.to_string(),
            });
        }
        Ok(LeadSubmission::new(
            self.state.clone(),
            self.view.estimate.clone(),
            source,
        ))
    }

    /// Hand the completed request to the lead collaborator, once.
    ///
    /// On success the form is discarded and the session stays closed for
    /// further submissions. On failure nothing changes.
    pub async fn submit<S>(&mut self, sink: &S, source: &str) -> Result<String>
    where
        S: LeadSink + ?Sized,
    {
        let lead = self.submission(source)?;
        let receipt = sink.submit(&lead).await?;

        tracing::info!(receipt = %receipt, price = %lead.price_label, "quote request submitted");
        self.submitted = true;
        self.state = FormState::new();
        self.position = FlowPosition::start();
        self.refresh();
        Ok(receipt)
    }

    fn refresh(&mut self) -> Arc<QuoteView> {
        self.view = Arc::new(recompute(&self.engine, &self.state, self.position));
        self.publisher.send_replace(Arc::clone(&self.view));
        Arc::clone(&self.view)
    }
}

fn recompute(engine: &PricingEngine, state: &FormState, position: FlowPosition) -> QuoteView {
    let profile = classify(&state.selected_services);
    let blocked = position
        .step()
        .and_then(|step| can_advance_with(step, state, &profile).err());

    QuoteView {
        position,
        profile,
        active_steps: flow::active_steps_for(&profile),
        progress: flow::progress(position, state),
        estimate: engine.estimate(state),
        blocked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ServiceCode;
    use crate::core::reducer::NumericField;

    #[test]
    fn test_new_session_starts_at_first_step_without_estimate() {
        let session = QuoteSession::new(PricingEngine::default());
        let view = session.view();
        assert_eq!(view.position, FlowPosition::Step(StepId::PostalCode));
        assert!(view.estimate.is_none());
        assert!(!view.can_advance());
    }

    #[test]
    fn test_dispatch_recomputes_estimate() {
        let mut session = QuoteSession::new(PricingEngine::default());
        session.dispatch(FormAction::ToggleService(ServiceCode::EpoxyFlooring));
        let view = session.dispatch(FormAction::SetNumber {
            field: NumericField::EpoxyArea,
            raw: "50".to_string(),
        });
        let estimate = view.estimate.as_ref().unwrap();
        assert_eq!(estimate.min, 6750);
        assert_eq!(estimate.max, 8630);
    }

    #[test]
    fn test_subscribers_see_every_update() {
        let mut session = QuoteSession::new(PricingEngine::default());
        let mut receiver = session.subscribe();
        session.dispatch(FormAction::SetPostalCode("20095".to_string()));

        assert!(receiver.has_changed().unwrap());
        let view = (**receiver.borrow_and_update()).clone();
        assert!(view.can_advance());
        assert_eq!(view, *session.view());
    }

    #[test]
    fn test_submission_requires_terminal_state() {
        let session = QuoteSession::new(PricingEngine::default());
        assert!(matches!(
            session.submission("test"),
            Err(QuoteError::NotReadyToSubmit { .. })
        ));
    }

    #[test]
    fn test_drain_distance_updates() {
        let mut session = QuoteSession::new(PricingEngine::default());
        session.dispatch(FormAction::SetPostalCode("20095".to_string()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(DistanceAnnotation {
            postal_code: "20095".to_string(),
            distance_km: 3,
            outside_service_area: false,
            is_estimate: false,
        })
        .unwrap();

        session.drain_distance_updates(&mut rx);
        assert_eq!(session.state().distance.as_ref().unwrap().distance_km, 3);
    }
}
