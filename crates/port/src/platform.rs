//! Helpers called by the application tasks.

use crate::{DemoConfig, PortResult};
use hal_interface::Hal;

/// Toggles the application LED.
///
/// # Errors
/// - `HalError(WrongPin)` if the configured pin does not exist.
pub fn toggle_led<H: Hal>(p_hal: &mut H, p_config: &DemoConfig) -> PortResult<()> {
    p_hal.gpio_pin_toggle(p_config.app_led_pin)?;
    Ok(())
}

/// Sends a plain string over UART0, without any formatting.
pub fn send_string<H: Hal>(p_hal: &mut H, p_str: &str) {
    p_hal.uart_puts(p_str);
}

/// Sends raw bytes over UART0, as handed over by C code. No encoding is assumed.
pub fn send_bytes<H: Hal>(p_hal: &mut H, p_bytes: &[u8]) {
    p_hal.uart_write(p_bytes);
}
