use crate::FaultLevel::{Fatal, Warning};
use crate::PortError::{HalError, InvalidConfig};
use hal_interface::{HalError as HalErrorDef, HalErrorLevel};
use heapless::{String, format};

pub type PortResult<T> = Result<T, PortError>;

/// The two severities handled by the port.
///
/// - `Warning`: printed on the console, execution continues.
/// - `Fatal`: interrupts are disabled, one line is printed and the hart halts.
#[derive(Debug, Clone, Copy, PartialOrd, PartialEq, Eq)]
pub enum FaultLevel {
    Warning,
    Fatal,
}

impl FaultLevel {
    pub fn as_str(&self) -> &str {
        match self {
            Fatal => "FATAL : ",
            Warning => "WARNING! ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortError {
    HalError(HalErrorDef),
    /// A configuration field holds an unusable value.
    InvalidConfig(&'static str),
}

impl PortError {
    pub fn to_string(&self) -> String<256> {
        let mut l_msg = String::new();
        match self {
            HalError(l_e) => l_msg.push_str(l_e.to_string().as_str()).unwrap_or(()),
            InvalidConfig(l_field) => {
                l_msg.push_str(self.severity().as_str()).unwrap_or(());
                l_msg
                    .push_str(
                        format!(200; "Invalid configuration : {}", l_field)
                            .unwrap_or_default()
                            .as_str(),
                    )
                    .unwrap_or(());
            }
        }
        l_msg
    }

    /// Returns the severity level of the error.
    ///
    /// Critical HAL errors and every configuration error stop the boot; the others are
    /// reported and ignored.
    pub fn severity(&self) -> FaultLevel {
        match self {
            HalError(l_err) => match l_err.severity() {
                HalErrorLevel::Critical => Fatal,
                HalErrorLevel::Error => Warning,
            },
            InvalidConfig(_) => Fatal,
        }
    }
}

impl From<HalErrorDef> for PortError {
    fn from(p_err: HalErrorDef) -> Self {
        HalError(p_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hal_severity_is_mapped() {
        let l_err: PortError = HalErrorDef::WrongPin(99).into();
        assert_eq!(l_err.severity(), Warning);
        let l_err: PortError = HalErrorDef::InterfaceNotAvailable("GPTMR").into();
        assert_eq!(l_err.severity(), Fatal);
    }

    #[test]
    fn config_error_message() {
        assert_eq!(
            InvalidConfig("baud_rate").to_string().as_str(),
            "FATAL : Invalid configuration : baud_rate"
        );
    }
}
