//! Booking service for cultural-monument visits.
//!
//! The core is [`services::booking_form::BookingFormController`], which owns a
//! visitor's in-progress selection and decides when it may be submitted. The
//! HTTP layer in [`handlers`] exposes it to the mobile client.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
