//! File outbox standing in for the order backend.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use fishmarket_commerce::checkout::{OrderGateway, OrderReceipt, OrderRequest};
use fishmarket_commerce::{CommerceError, OrderId};
use serde::{Deserialize, Serialize};

/// An order as written to the outbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxRecord {
    /// Assigned order id.
    pub order_id: OrderId,
    /// When the record was written.
    pub submitted_at: DateTime<Utc>,
    /// The submitted payload.
    pub order: OrderRequest,
}

/// Writes each order to `<dir>/<order-id>.json`.
#[derive(Debug, Clone)]
pub struct OutboxGateway {
    dir: PathBuf,
}

impl OutboxGateway {
    /// Create a gateway writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory orders are written to.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl OrderGateway for OutboxGateway {
    fn submit(&self, order: &OrderRequest) -> Result<OrderReceipt, CommerceError> {
        let record = OutboxRecord {
            order_id: OrderId::generate(),
            submitted_at: Utc::now(),
            order: order.clone(),
        };

        let content = serde_json::to_string_pretty(&record)?;
        let path = self.dir.join(format!("{}.json", record.order_id));
        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(&path, content))
            .map_err(|e| {
                CommerceError::SubmissionFailed(format!("{}: {}", path.display(), e))
            })?;

        Ok(OrderReceipt {
            order_id: record.order_id,
        })
    }
}
