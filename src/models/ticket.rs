use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SubmissionRequest;

/// Splits the fields of a ticket's QR content. Catalog entries may not contain it.
pub const QR_SEPARATOR: char = '|';

/// Confirmation artifact handed back after a successful booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub request: SubmissionRequest,
    pub qr_content: String,
    pub signature: String,
    pub issued_at: DateTime<Utc>,
}
