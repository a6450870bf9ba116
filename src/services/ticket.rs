use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::models::{SubmissionRequest, Ticket, QR_SEPARATOR};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    #[error("ticket code must have four non-empty parts")]
    Malformed,
}

/// Issues and checks the codes printed as QR on booking confirmations.
pub struct TicketIssuer {
    secret: String,
}

impl TicketIssuer {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn issue(&self, request: SubmissionRequest) -> anyhow::Result<Ticket> {
        let qr_content = qr_content(&request);
        let signature = self.sign(&qr_content)?;
        Ok(Ticket {
            id: uuid::Uuid::new_v4().to_string(),
            request,
            qr_content,
            signature,
            issued_at: Utc::now(),
        })
    }

    pub fn verify(&self, qr_content: &str, signature: &str) -> bool {
        let Ok(mut mac) = Hmac::<Sha1>::new_from_slice(self.secret.as_bytes()) else {
            return false;
        };
        let Ok(expected) = base64::engine::general_purpose::STANDARD.decode(signature) else {
            return false;
        };
        mac.update(qr_content.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }

    fn sign(&self, data: &str) -> anyhow::Result<String> {
        let mut mac = Hmac::<Sha1>::new_from_slice(self.secret.as_bytes())
            .map_err(|e| anyhow::anyhow!("invalid ticket secret: {e}"))?;
        mac.update(data.as_bytes());
        Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }
}

pub fn qr_content(request: &SubmissionRequest) -> String {
    [
        request.monument.as_str(),
        request.visit_date.as_str(),
        request.slot.as_str(),
        request.nationality.as_str(),
    ]
    .join(&QR_SEPARATOR.to_string())
}

pub fn parse_qr(content: &str) -> Result<SubmissionRequest, TicketError> {
    let parts: Vec<&str> = content.split(QR_SEPARATOR).collect();
    match parts.as_slice() {
        [monument, visit_date, slot, nationality]
            if parts.iter().all(|p| !p.trim().is_empty()) =>
        {
            Ok(SubmissionRequest {
                monument: monument.to_string(),
                visit_date: visit_date.to_string(),
                slot: slot.to_string(),
                nationality: nationality.to_string(),
            })
        }
        _ => Err(TicketError::Malformed),
    }
}
