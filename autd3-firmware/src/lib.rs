#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::unescaped_backticks)]

//! Real-time control core of the AUTD3 CPU firmware.
//!
//! Every EtherCAT cycle delivers one [`frame`] to the arrival context, which hands it to the
//! [`Dispatcher`]. Read-only commands and synchronization are answered immediately, everything
//! else goes through the [`Mailbox`] to the [`ApplyEngine`], which drains at most one frame per
//! periodic tick and writes it into the FPGA memories through a [`Bram`] implementation.
//!
//! The crate performs no allocation and never blocks except in the producer's backpressure loop
//! (see [`Backpressure`]).

#[cfg(test)]
extern crate std;

/// The register/memory interface to the FPGA.
pub mod bram;
/// The arrival-side command dispatcher.
pub mod dispatcher;
/// The periodic apply engine and the streaming writers.
pub mod engine;
/// Error type.
pub mod error;
/// Definitions for EtherCAT.
pub mod ethercat;
/// Wire layout of the inbound frame.
pub mod frame;
/// The single-producer/single-consumer frame mailbox.
pub mod mailbox;
/// Firmware configuration.
pub mod option;
/// Fixed constants of the wire contract.
pub mod params;

pub use bram::Bram;
pub use dispatcher::Dispatcher;
pub use engine::ApplyEngine;
pub use error::FirmwareError;
pub use mailbox::Mailbox;
pub use option::{Backpressure, FirmwareOption};
