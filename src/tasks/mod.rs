//! Background tasks module
//!
//! This module contains the task that ticks the active countdown.

pub mod countdown_ticker;

pub(crate) use countdown_ticker::countdown_ticker;
