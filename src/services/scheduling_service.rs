use crate::error::{Error, Result};
use crate::models::batch::{Batch, InvitationRequest, LineError, LineOutcome};
use crate::models::candidate::{CandidateId, CandidateView};
use crate::models::invitation::{DeliveryState, Invitation};
use crate::services::candidate_service::{CandidateFilter, CandidateService};
use crate::services::delivery_service::{DeliveryService, SendIntent};
use crate::services::invitation_service::InvitationService;
use crate::services::pipeline;
use crate::store::Store;
use crate::utils::bulk;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub batch_id: Uuid,
    pub created: usize,
    pub failed: usize,
    pub errors: Vec<LineError>,
    pub candidate_ids: Vec<CandidateId>,
}

/// Candidate listing plus the store's last-modified marker, so the
/// presentation layer can tell which mutation its snapshot reflects.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateListing {
    pub as_of: DateTime<Utc>,
    pub candidates: Vec<CandidateView>,
}

/// Public entry point composing the parser, state machine, store and
/// ledger. All writes to candidates and invitations originate here.
#[derive(Clone)]
pub struct SchedulingService {
    store: Arc<dyn Store>,
    candidates: CandidateService,
    ledger: InvitationService,
    delivery: DeliveryService,
}

impl SchedulingService {
    pub fn new(
        store: Arc<dyn Store>,
        candidates: CandidateService,
        ledger: InvitationService,
        delivery: DeliveryService,
    ) -> Self {
        Self {
            store,
            candidates,
            ledger,
            delivery,
        }
    }

    pub async fn schedule_single(
        &self,
        role: &str,
        email: &str,
        date_time: &str,
    ) -> Result<CandidateId> {
        let request = single_request(role, email, date_time)?;
        self.schedule(request, None).await
    }

    /// Best-effort bulk ingestion: valid lines are scheduled, invalid
    /// lines come back as data, and the whole submission is persisted as
    /// a write-once batch audit record.
    pub async fn schedule_bulk(&self, raw: &str) -> Result<BatchSummary> {
        if raw.trim().is_empty() {
            return Err(Error::EmptyBatch);
        }

        let results = bulk::parse_bulk(raw);
        let batch_id = Uuid::new_v4();
        let mut candidate_ids = Vec::new();
        let mut errors = Vec::new();
        let mut outcomes = Vec::with_capacity(results.len());

        for result in results {
            match result {
                // A line that parses can still fail to schedule; that too
                // stays per-line data so the batch always completes and
                // the audit record is always written.
                Ok(parsed) => match self.schedule(parsed.request.clone(), Some(batch_id)).await {
                    Ok(id) => {
                        candidate_ids.push(id);
                        outcomes.push(LineOutcome::from(Ok(parsed)));
                    }
                    Err(err) => {
                        let err = LineError {
                            line: parsed.line,
                            reason: err.to_string(),
                        };
                        errors.push(err.clone());
                        outcomes.push(LineOutcome::from(Err(err)));
                    }
                },
                Err(err) => {
                    errors.push(err.clone());
                    outcomes.push(LineOutcome::from(Err(err)));
                }
            }
        }

        self.ledger
            .record_batch(Batch {
                id: batch_id,
                raw_text: raw.to_string(),
                submitted_at: Utc::now(),
                outcomes,
            })
            .await;

        tracing::info!(
            batch_id = %batch_id,
            created = candidate_ids.len(),
            failed = errors.len(),
            "bulk batch processed"
        );

        Ok(BatchSummary {
            batch_id,
            created: candidate_ids.len(),
            failed: errors.len(),
            errors,
            candidate_ids,
        })
    }

    /// Creates the candidate and its originating invitation, hands the
    /// send intent to the transport and records the `queued -> sent`
    /// handoff in the ledger.
    async fn schedule(
        &self,
        request: InvitationRequest,
        batch_id: Option<Uuid>,
    ) -> Result<CandidateId> {
        let candidate = self.candidates.create(&request.role).await;
        let invitation = self.ledger.record(candidate.id, &request, batch_id).await;

        self.delivery.emit(SendIntent {
            invitation_id: invitation.id,
            email: invitation.email.clone(),
            role: invitation.role.clone(),
            scheduled_at: invitation.scheduled_at,
        });
        self.ledger
            .update_delivery_state(invitation.id, DeliveryState::Sent)
            .await?;

        Ok(candidate.id)
    }

    /// Marks the candidate seen, then returns the disclosure-filtered view.
    pub async fn view_candidate(&self, id: CandidateId) -> Result<CandidateView> {
        let candidate = self.candidates.mark_seen(id).await?;
        Ok(pipeline::project(&candidate))
    }

    pub async fn list_candidates(&self, filter: &CandidateFilter) -> CandidateListing {
        let candidates = self.candidates.list(filter).await;
        CandidateListing {
            as_of: self.store.last_modified().await,
            candidates: candidates.iter().map(pipeline::project).collect(),
        }
    }

    pub async fn invitation_history(&self, limit: usize) -> Vec<Invitation> {
        self.ledger.history(limit).await
    }

    pub async fn batch(&self, id: Uuid) -> Result<Batch> {
        self.ledger.batch(id).await
    }
}

fn single_request(role: &str, email: &str, date_time: &str) -> Result<InvitationRequest> {
    let role = role.trim();
    let email = email.trim();
    let date_time = date_time.trim();

    if role.is_empty() {
        return Err(Error::MissingField("role"));
    }
    if email.is_empty() {
        return Err(Error::MissingField("email"));
    }
    if date_time.is_empty() {
        return Err(Error::MissingField("date_time"));
    }
    if !bulk::is_valid_email(email) {
        return Err(Error::Validation("malformed email address".to_string()));
    }
    let scheduled_at = crate::utils::time::parse_schedule(date_time).ok_or_else(|| {
        Error::Validation("date-time must match YYYY-MM-DD HH:MM".to_string())
    })?;

    Ok(InvitationRequest {
        email: email.to_string(),
        role: role.to_string(),
        scheduled_at,
    })
}
