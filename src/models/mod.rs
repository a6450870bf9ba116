pub mod account;
pub mod catalog;
pub mod selection;
pub mod ticket;

pub use account::{AuthSession, Login, Signup};
pub use catalog::Catalog;
pub use selection::{
    format_visit_date, BookingSelection, Field, FormError, FormState, SubmissionRequest,
};
pub use ticket::{Ticket, QR_SEPARATOR};
