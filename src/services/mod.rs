pub mod auth;
pub mod availability;
pub mod booking_form;
pub mod clock;
pub mod dispatch;
pub mod session_store;
pub mod ticket;
