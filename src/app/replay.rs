use crate::core::flow::FlowPosition;
use crate::core::reducer::FormAction;
use crate::core::session::QuoteSession;
use crate::domain::model::DistanceAnnotation;
use crate::domain::ports::{DistanceLookup, LeadSink};
use crate::utils::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Navigation {
    Next,
    Back,
}

/// One line of a replay script: either a form action or a navigation command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplayCommand {
    Navigate { nav: Navigation },
    Action(FormAction),
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    pub index: usize,
    pub command: ReplayCommand,
    pub position: FlowPosition,
    pub blocked: Option<String>,
    pub price_label: Option<String>,
}

pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Vec<ReplayCommand>> {
    let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
    Ok(serde_json::from_str(&content)?)
}

/// Feed every command through the session. Blocked navigation is recorded, not fatal.
pub fn replay(session: &mut QuoteSession, commands: Vec<ReplayCommand>) -> Vec<ReplayStep> {
    commands
        .into_iter()
        .enumerate()
        .map(|(index, command)| {
            let blocked = match &command {
                ReplayCommand::Navigate { nav: Navigation::Next } => {
                    session.next().err().map(|failure| failure.reason)
                }
                ReplayCommand::Navigate { nav: Navigation::Back } => {
                    session.back();
                    None
                }
                ReplayCommand::Action(action) => {
                    session.dispatch(action.clone());
                    None
                }
            };
            let view = session.view();
            ReplayStep {
                index,
                command,
                position: view.position,
                blocked,
                price_label: view.estimate.as_ref().map(|estimate| estimate.label()),
            }
        })
        .collect()
}

/// Resolve the distance for the replayed postal code and annotate the form with it.
/// Lookup errors are logged and leave the form unannotated.
pub async fn annotate_distance(
    session: &mut QuoteSession,
    lookup: &dyn DistanceLookup,
) -> Option<DistanceAnnotation> {
    let postal_code = session.state().postal_code.clone();
    match lookup.lookup(&postal_code).await {
        Ok(Some(annotation)) => {
            session.dispatch(FormAction::AnnotateDistance(annotation.clone()));
            Some(annotation)
        }
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Distance lookup failed for {}: {}", postal_code, e);
            None
        }
    }
}

/// Submit the lead if the script reached the submit step. `Ok(None)` otherwise.
pub async fn submit_if_complete(
    session: &mut QuoteSession,
    sink: &dyn LeadSink,
    source: &str,
) -> Result<Option<String>> {
    if !session.position().is_terminal() {
        tracing::warn!("Replay ended at {}, lead not submitted", session.position());
        return Ok(None);
    }
    session.submit(sink, source).await.map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pricing::PricingEngine;
    use crate::core::steps::StepId;

    #[test]
    fn test_script_parses_mixed_commands() {
        let script = r#"[
            {"action": "set-postal-code", "value": "20095"},
            {"nav": "next"},
            {"nav": "back"}
        ]"#;
        let commands: Vec<ReplayCommand> = serde_json::from_str(script).unwrap();
        assert_eq!(
            commands[0],
            ReplayCommand::Action(FormAction::SetPostalCode("20095".to_string()))
        );
        assert_eq!(commands[1], ReplayCommand::Navigate { nav: Navigation::Next });
        assert_eq!(commands[2], ReplayCommand::Navigate { nav: Navigation::Back });
    }

    #[test]
    fn test_replay_records_blocked_navigation() {
        let mut session = QuoteSession::new(PricingEngine::default());
        let steps = replay(
            &mut session,
            vec![
                ReplayCommand::Navigate { nav: Navigation::Next },
                ReplayCommand::Action(FormAction::SetPostalCode("20095".to_string())),
                ReplayCommand::Navigate { nav: Navigation::Next },
            ],
        );

        assert!(steps[0].blocked.is_some());
        assert_eq!(steps[0].position, FlowPosition::Step(StepId::PostalCode));
        assert_eq!(steps[2].position, FlowPosition::Step(StepId::PropertyType));
        assert!(steps[2].blocked.is_none());
    }

    #[tokio::test]
    async fn test_incomplete_replay_is_not_submitted() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let store = crate::adapters::LocalLeadStore::new(temp_dir.path());
        let mut session = QuoteSession::new(PricingEngine::default());

        let receipt = submit_if_complete(&mut session, &store, "replay").await.unwrap();
        assert!(receipt.is_none());
        assert!(!session.is_submitted());
    }

    #[tokio::test]
    async fn test_annotate_distance_from_prefix() {
        let mut session = QuoteSession::new(PricingEngine::default());
        session.dispatch(FormAction::SetPostalCode("28195".to_string()));

        let annotation = annotate_distance(&mut session, &crate::adapters::PrefixEstimateLookup)
            .await
            .unwrap();
        assert_eq!(annotation.distance_km, 100);
        assert_eq!(session.state().distance, Some(annotation));
    }
}
