#![cfg_attr(not(test), no_std)]

//! NEORV32 board support for the FreeRTOS demo.
//!
//! The kernel itself is an external library. This crate holds everything the kernel
//! expects from the application side: hardware bring-up, dispatch of the trap causes the
//! kernel does not own, the hook callbacks and the fatal halt paths. Every routine takes
//! the hardware as a [`hal_interface::Hal`] capability.

mod boot;
mod config;
mod console_output;
mod errors_mgt;
mod hooks;
mod ident;
mod platform;
mod rtos;
mod trap;
mod types;

pub use boot::{ConfigMismatch, SetupReport, boot, setup_hardware};
pub use config::{DemoConfig, TimerConfig};
pub use console_output::{ConsoleFormatting, ConsoleOutput};
pub use errors_mgt::{K_ASSERT_MSG, assert_called, boot_error_halt, fatal_halt, panic_halt};
pub use hooks::{FaultHooks, K_MALLOC_FAILED_MSG, K_STACK_OVERFLOW_MSG, KernelHooks};
pub use ident::{K_RTOS_NAME, K_SOC_NAME};
pub use platform::{send_bytes, send_string, toggle_led};
pub use rtos::RtosKernel;
pub use trap::{ExceptionReport, InterruptOutcome, TrapCause, handle_exception, handle_interrupt};
pub use types::*;
