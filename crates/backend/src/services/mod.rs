//! Business logic kept out of the HTTP handlers.

pub mod next_appointment;

pub use next_appointment::{
    build_card, next_appointment_response, select_next_appointment, NextAppointment,
};
