use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::agent::IdentityAgent;

/// The open agent session. Clones share the same agent.
#[derive(Clone)]
pub struct SessionHandle {
    id: Uuid,
    wallet_id: String,
    opened_at: DateTime<Utc>,
    agent: Arc<dyn IdentityAgent>,
}

impl SessionHandle {
    pub(crate) fn new(wallet_id: impl Into<String>, agent: Arc<dyn IdentityAgent>) -> Self {
        Self {
            id: Uuid::now_v7(),
            wallet_id: wallet_id.into(),
            opened_at: Utc::now(),
            agent,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn wallet_id(&self) -> &str {
        &self.wallet_id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn agent(&self) -> &Arc<dyn IdentityAgent> {
        &self.agent
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id)
            .field("wallet_id", &self.wallet_id)
            .field("opened_at", &self.opened_at)
            .finish_non_exhaustive()
    }
}
