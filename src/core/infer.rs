use tokio::sync::mpsc;

use crate::api::{InferRequest, InferResponse};
use crate::core::constants::NO_REPLY_FALLBACK;

/// How one inference turn ended. `Reply` already has the fallback text
/// substituted when the payload lacked a usable `response` field;
/// `Failed` covers transport errors and non-2xx statuses and is mapped
/// to the fixed warning message by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Reply(String),
    Failed,
}

pub struct RequestParams {
    pub client: reqwest::Client,
    pub endpoint: String,
    pub prompt: String,
    pub turn_id: u64,
}

/// Issues at most one request per turn and reports back over a channel
/// drained by the event loop. Outcomes carry the turn id that started
/// them so stale arrivals can be discarded.
#[derive(Clone)]
pub struct InferenceService {
    tx: mpsc::UnboundedSender<(TurnOutcome, u64)>,
}

impl InferenceService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(TurnOutcome, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_request(&self, params: RequestParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let RequestParams {
                client,
                endpoint,
                prompt,
                turn_id,
            } = params;

            let outcome = run_request(&client, &endpoint, &prompt).await;
            let _ = tx.send((outcome, turn_id));
        });
    }

    #[cfg(test)]
    pub fn send_for_test(&self, outcome: TurnOutcome, turn_id: u64) {
        let _ = self.tx.send((outcome, turn_id));
    }
}

async fn run_request(client: &reqwest::Client, endpoint: &str, prompt: &str) -> TurnOutcome {
    let request = InferRequest { prompt };

    match client.post(endpoint).json(&request).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                tracing::debug!(%status, "inference request rejected");
                return TurnOutcome::Failed;
            }
            match response.text().await {
                Ok(body) => TurnOutcome::Reply(reply_from_body(&body)),
                Err(err) => {
                    tracing::debug!(error = %err, "failed to read inference response body");
                    TurnOutcome::Failed
                }
            }
        }
        Err(err) => {
            tracing::debug!(error = %err, "inference request failed");
            TurnOutcome::Failed
        }
    }
}

/// Extract the reply text from a 2xx body. Anything other than a JSON
/// object with a string `response` field degrades to the fixed fallback
/// rather than failing the turn.
pub fn reply_from_body(body: &str) -> String {
    serde_json::from_str::<InferResponse>(body)
        .ok()
        .and_then(|payload| payload.response)
        .unwrap_or_else(|| NO_REPLY_FALLBACK.to_string())
}
