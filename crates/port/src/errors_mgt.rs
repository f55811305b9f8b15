//! Unrecoverable fault handling.
//!
//! Every path in this module starts by masking interrupts so that neither the kernel tick
//! nor a context switch can run again, prints exactly one diagnostic line and never
//! returns.
//!
//! # Halt behavior
//! - **Kernel faults** (allocation failure, stack overflow): debug break, then spin.
//! - **Assertions, panics and boot errors**: the GPIO port is cleared and the two halt
//!   LEDs blink forever with a busy-wait cadence derived from the configured clock.

use crate::console_output::ConsoleFormatting::StrNewLineAfter;
use crate::{ConsoleOutput, DemoConfig, FaultLevel, PortError};
use core::fmt::Write;
use core::panic::PanicInfo;
use hal_interface::Hal;

/// Diagnostic printed when a kernel assertion fails.
pub const K_ASSERT_MSG: &str = "FreeRTOS_FAULT: vAssertCalled called!";

/// Disables interrupts, prints `p_msg`, issues a debug break and spins forever.
///
/// # Parameters
/// - `p_hal`: Hardware capability.
/// - `p_msg`: Single-line diagnostic, without trailing newline.
///
/// # Returns
/// - Never returns (`!`).
pub fn fatal_halt<H: Hal>(p_hal: &mut H, p_msg: &str) -> ! {
    p_hal.disable_interrupts();
    ConsoleOutput::new(p_hal).write(&StrNewLineAfter(p_msg));
    p_hal.ebreak();
    p_hal.halt()
}

/// Assertion terminator.
///
/// Interrupts are off here to prevent any further tick interrupts or context switches,
/// so the blink delay is a busy-wait loop instead of a peripheral timer.
///
/// # Parameters
/// - `p_hal`: Hardware capability.
/// - `p_config`: Provides the halt LED pins and the clock the cadence is derived from.
///
/// # Returns
/// - Never returns (`!`). Only a power cycle or a debugger clears this state.
pub fn assert_called<H: Hal>(p_hal: &mut H, p_config: &DemoConfig) -> ! {
    p_hal.disable_interrupts();

    // Clear LEDs
    p_hal.gpio_port_set(0);

    ConsoleOutput::new(p_hal).write(&StrNewLineAfter(K_ASSERT_MSG));
    blink_forever(p_hal, p_config)
}

/// Panic path: same halt as [`assert_called`] with the panic payload as diagnostic.
pub fn panic_halt<H: Hal>(p_hal: &mut H, p_config: &DemoConfig, p_info: &PanicInfo) -> ! {
    p_hal.disable_interrupts();
    p_hal.gpio_port_set(0);

    let mut l_console = ConsoleOutput::new(p_hal);
    writeln!(l_console, "{}panic : {}", FaultLevel::Fatal.as_str(), p_info).unwrap_or(());
    blink_forever(p_hal, p_config)
}

/// Boot error path: prints the error and halts like [`assert_called`].
///
/// When the UART itself could not be configured the line is lost, but the blinking
/// LEDs still signal the halt.
pub fn boot_error_halt<H: Hal>(p_hal: &mut H, p_config: &DemoConfig, p_err: &PortError) -> ! {
    p_hal.disable_interrupts();
    p_hal.gpio_port_set(0);

    ConsoleOutput::new(p_hal).write(&StrNewLineAfter(p_err.to_string().as_str()));
    blink_forever(p_hal, p_config)
}

fn blink_forever<H: Hal>(p_hal: &mut H, p_config: &DemoConfig) -> ! {
    let l_delay = p_config.halt_blink_delay();
    let [l_led_a, l_led_b] = p_config.halt_led_pins;
    loop {
        p_hal.busy_wait(l_delay);
        // Pins are checked by `DemoConfig::validate`
        p_hal.gpio_pin_toggle(l_led_a).unwrap_or(());
        p_hal.gpio_pin_toggle(l_led_b).unwrap_or(());
    }
}
