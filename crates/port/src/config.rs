use crate::{Hz, Milliseconds, PortError, PortResult};
use hal_interface::{ClockPrescaler, K_GPIO_PINS};

/// Periodic timer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Clock prescaler applied to the timer counter.
    pub prescaler: ClockPrescaler,
    /// Interval between two timer interrupts.
    pub period: Milliseconds,
}

/// Configuration parameters of the demo.
///
/// The kernel-side values (`cpu_clock`, `total_heap_size`) must match what the kernel
/// library was compiled with; they are compared against the hardware at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoConfig {
    /// UART0 transmission speed.
    pub baud_rate: u32,
    /// CPU clock the kernel tick and the halt blink cadence are derived from.
    pub cpu_clock: Hz,
    /// Heap size the kernel allocator was built with, in bytes.
    pub total_heap_size: u32,
    /// Optional periodic timer. Ignored when the SoC does not implement it.
    pub gptmr: Option<TimerConfig>,
    /// LED toggled by the application helper.
    pub app_led_pin: u8,
    /// The two LEDs blinked by the assertion halt.
    pub halt_led_pins: [u8; 2],
}

impl DemoConfig {
    /// Demo defaults: 19200 baud, 100 MHz, 8 KiB of kernel heap, tick every 500 ms.
    pub const DEFAULT: DemoConfig = DemoConfig {
        baud_rate: 19_200,
        cpu_clock: Hz::from_mhz(100),
        total_heap_size: 8 * 1024,
        gptmr: Some(TimerConfig {
            prescaler: ClockPrescaler::Div8,
            period: Milliseconds(500),
        }),
        app_led_pin: 0,
        halt_led_pins: [0, 1],
    };

    /// Checks that every field holds a usable value.
    ///
    /// # Errors
    /// - `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> PortResult<()> {
        if self.baud_rate == 0 {
            return Err(PortError::InvalidConfig("baud_rate"));
        }
        if self.cpu_clock.to_u32() == 0 {
            return Err(PortError::InvalidConfig("cpu_clock"));
        }
        if self.total_heap_size == 0 {
            return Err(PortError::InvalidConfig("total_heap_size"));
        }
        if let Some(l_timer) = self.gptmr {
            if l_timer.period.to_u32() == 0 {
                return Err(PortError::InvalidConfig("gptmr.period"));
            }
        }
        if self.app_led_pin >= K_GPIO_PINS {
            return Err(PortError::InvalidConfig("app_led_pin"));
        }
        let [l_first, l_second] = self.halt_led_pins;
        if l_first >= K_GPIO_PINS || l_second >= K_GPIO_PINS || l_first == l_second {
            return Err(PortError::InvalidConfig("halt_led_pins"));
        }
        Ok(())
    }

    /// Busy-wait iterations between two toggles of the halt LEDs (a tenth of the clock).
    pub fn halt_blink_delay(&self) -> u32 {
        self.cpu_clock.to_u32() / 10
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig::DEFAULT
    }
}
