//! This module defines the `HalError` and `HalErrorLevel` enumerations and their associated
//! functionality. It provides a structured way to represent hardware abstraction layer (HAL)
//! related errors with different severity levels and format them for the UART console.

use crate::HalError::{InterfaceBadConfig, InterfaceNotAvailable, WrongPin};
use crate::HalErrorLevel::{Critical, Error};
use heapless::{String, format};

pub type HalResult<T> = Result<T, HalError>;

/// Represents the severity levels of hardware abstraction layer (HAL) errors.
///
/// # Variants
///
/// - `Critical`
///   The peripheral cannot be brought into the requested state. Callers are expected to
///   escalate to a fatal halt when this happens during bring-up.
///
/// - `Error`
///   A single operation was rejected; the peripheral state is unchanged.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalErrorLevel {
    Critical,
    Error,
}

impl HalErrorLevel {
    /// Converts the `HalErrorLevel` enum variant into a corresponding string slice representation.
    ///
    /// # Returns
    ///
    /// - `"HAL Critical error : "` for `HalErrorLevel::Critical` variant.
    /// - `"HAL Error : "` for `HalErrorLevel::Error` variant.
    pub fn as_str(&self) -> &str {
        match self {
            Critical => "HAL Critical error : ",
            Error => "HAL Error : ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// GPIO pin index outside of the 64 bit port.
    WrongPin(u8),
    /// The peripheral is not synthesized in this SoC configuration.
    InterfaceNotAvailable(&'static str),
    /// The peripheral rejected its configuration (interface name, reason).
    InterfaceBadConfig(&'static str, &'static str),
}

impl HalError {
    /// Converts the error into a formatted string representation with a maximum size of 256 characters.
    ///
    /// The severity prefix returned by [`HalErrorLevel::as_str`] is prepended to the message.
    ///
    /// # Returns
    /// A `String` with the descriptive message for the current error.
    ///
    /// # Errors
    /// The function does not return a `Result`. Capacity overflows are ignored with
    /// `unwrap_or(())`, the message is then truncated.
    pub fn to_string(&self) -> String<256> {
        let mut l_msg = String::new();
        l_msg.push_str(self.severity().as_str()).unwrap_or(());
        match self {
            WrongPin(l_pin) => {
                let l_detail: String<40> =
                    format!(40; "GPIO pin {} does not exist", l_pin).unwrap_or_default();
                l_msg.push_str(l_detail.as_str()).unwrap_or(());
            }
            InterfaceNotAvailable(l_ift) => {
                let l_detail: String<80> =
                    format!(80; "Interface {} is not implemented", l_ift).unwrap_or_default();
                l_msg.push_str(l_detail.as_str()).unwrap_or(());
            }
            InterfaceBadConfig(l_ift, l_err) => {
                let l_detail: String<200> =
                    format!(200; "Wrong configuration for interface {}: {}", l_ift, l_err)
                        .unwrap_or_default();
                l_msg.push_str(l_detail.as_str()).unwrap_or(());
            }
        }
        l_msg
    }

    /// Returns the severity level of the `HalError` instance.
    ///
    /// # Returns
    ///
    /// A `HalErrorLevel` enum value, which indicates the severity of the error occurring.
    ///
    pub fn severity(&self) -> HalErrorLevel {
        match self {
            WrongPin(_) => Error,
            InterfaceNotAvailable(_) => Critical,
            InterfaceBadConfig(_, _) => Critical,
        }
    }
}
