use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Outbound `send_invitation` intent handed to the delivery transport.
#[derive(Debug, Clone, Serialize)]
pub struct SendIntent {
    pub invitation_id: Uuid,
    pub email: String,
    pub role: String,
    pub scheduled_at: NaiveDateTime,
}

/// Emitter side of the delivery boundary. Emitting never blocks; the
/// dispatcher picks intents up on its own time.
#[derive(Clone)]
pub struct DeliveryService {
    tx: mpsc::UnboundedSender<SendIntent>,
}

impl DeliveryService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SendIntent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, intent: SendIntent) {
        if self.tx.send(intent).is_err() {
            tracing::warn!("delivery dispatcher is not running; send intent dropped");
        }
    }
}

/// Background worker that forwards intents to the configured transport
/// webhook. Delivery-state progress comes back through the inbound
/// webhook, never from this worker.
pub struct DeliveryDispatcher {
    client: Client,
    target_url: Option<String>,
    secret: String,
    rx: mpsc::UnboundedReceiver<SendIntent>,
}

impl DeliveryDispatcher {
    pub fn new(
        rx: mpsc::UnboundedReceiver<SendIntent>,
        target_url: Option<String>,
        secret: String,
    ) -> Self {
        Self {
            client: Client::new(),
            target_url,
            secret,
            rx,
        }
    }

    pub async fn run(mut self) {
        while let Some(intent) = self.rx.recv().await {
            if let Err(e) = self.dispatch(&intent).await {
                tracing::error!(invitation_id = %intent.invitation_id, error = ?e, "failed to hand invitation to transport");
            }
        }
    }

    async fn dispatch(&self, intent: &SendIntent) -> anyhow::Result<()> {
        let Some(url) = &self.target_url else {
            tracing::info!(invitation_id = %intent.invitation_id, "no delivery transport configured; intent logged only");
            return Ok(());
        };

        let payload = json!({
            "event": "send_invitation",
            "invitation_id": intent.invitation_id,
            "email": intent.email,
            "role": intent.role,
            "scheduled_at": intent.scheduled_at.format(crate::utils::time::SCHEDULE_FORMAT).to_string(),
        });

        let resp = self
            .client
            .post(url)
            .header("X-Webhook-Secret", &self.secret)
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            tracing::warn!(
                invitation_id = %intent.invitation_id,
                status = %resp.status(),
                "delivery transport refused the intent"
            );
        }
        Ok(())
    }
}
