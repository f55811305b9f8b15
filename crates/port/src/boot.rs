use crate::errors_mgt::boot_error_halt;
use crate::ident::{K_RTOS_NAME, K_SOC_NAME};
use crate::{ConsoleOutput, DemoConfig, FaultLevel, Hz, PortResult, RtosKernel};
use core::fmt::Write;
use hal_interface::{Csr, Hal, HalError, K_GPTMR_FIRQ_BIT};
use heapless::Vec;

/// A configuration value that differs from what the hardware reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigMismatch {
    /// Kernel heap size versus the heap reserved at link time, in bytes.
    HeapSize { configured: u32, detected: u32 },
    /// Kernel clock versus the SoC clock.
    ClockFrequency { configured: Hz, detected: Hz },
}

/// Outcome of [`setup_hardware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    /// Mismatches found by the sanity checks, in check order.
    pub mismatches: Vec<ConfigMismatch, 2>,
    /// True when the periodic timer was programmed and its interrupt unmasked.
    pub timer_armed: bool,
    /// Why the configured timer could not be programmed, if it could not.
    pub timer_error: Option<HalError>,
}

/// Brings up the peripherals used by the demo.
///
/// This function performs the following steps:
/// 1. Installs the kernel trap entry into `mtvec`.
/// 2. Clears the GPIO output port.
/// 3. Sets up UART0 at the configured baud rate, without interrupts.
/// 4. Compares the kernel heap size with the heap reserved at link time.
/// 5. Compares the kernel clock with the SoC clock.
/// 6. Starts the general purpose timer and unmasks its interrupt, when configured and
///    implemented.
///
/// Mismatches found in steps 4 and 5 and a timer rejecting its settings in step 6 are
/// printed as warnings and execution continues.
///
/// # Parameters
/// - `p_hal`: Hardware capability.
/// - `p_kernel`: Provides the trap entry address.
/// - `p_config`: Demo configuration, already validated.
///
/// # Returns
/// - A [`SetupReport`] listing the mismatches and whether the timer runs.
///
/// # Errors
/// - `HalError` if UART0 rejects the baud rate, which only happens for a zero rate.
pub fn setup_hardware<H: Hal, K: RtosKernel>(
    p_hal: &mut H,
    p_kernel: &K,
    p_config: &DemoConfig,
) -> PortResult<SetupReport> {
    let mut l_report = SetupReport {
        mismatches: Vec::new(),
        timer_armed: false,
        timer_error: None,
    };

    // Install the kernel trap handler
    p_hal.write_csr(Csr::Mtvec, p_kernel.trap_handler() as u32);

    // Clear GPIO.out port
    p_hal.gpio_port_set(0);

    // Setup UART0 at default baud rate, no interrupts
    p_hal.uart_setup(p_config.baud_rate)?;

    // Check heap size configuration
    let l_heap = p_hal.max_heap_size();
    if l_heap != p_config.total_heap_size {
        let l_mismatch = ConfigMismatch::HeapSize {
            configured: p_config.total_heap_size,
            detected: l_heap,
        };
        print_mismatch(p_hal, &l_mismatch);
        l_report.mismatches.push(l_mismatch).unwrap_or(());
    }

    // Check clock frequency configuration
    let l_clk = Hz(p_hal.core_clk());
    if l_clk != p_config.cpu_clock {
        let l_mismatch = ConfigMismatch::ClockFrequency {
            configured: p_config.cpu_clock,
            detected: l_clk,
        };
        print_mismatch(p_hal, &l_mismatch);
        l_report.mismatches.push(l_mismatch).unwrap_or(());
    }

    // Periodic timer, if wanted and implemented
    if let Some(l_timer) = p_config.gptmr {
        if p_hal.gptmr_available() {
            let l_threshold = l_clk.ticks_in(l_timer.period, l_timer.prescaler.divisor());
            match p_hal.gptmr_setup(l_timer.prescaler, l_threshold) {
                Ok(()) => {
                    p_hal.set_csr_bits(Csr::Mie, 1 << K_GPTMR_FIRQ_BIT);
                    l_report.timer_armed = true;
                }
                Err(l_err) => {
                    writeln!(
                        ConsoleOutput::new(p_hal),
                        "{}GPTMR not started : {}\n",
                        FaultLevel::Warning.as_str(),
                        l_err.to_string()
                    )
                    .unwrap_or(());
                    l_report.timer_error = Some(l_err);
                }
            }
        }
    }

    Ok(l_report)
}

/// Writes the warning block of one configuration mismatch.
fn print_mismatch<H: Hal>(p_hal: &mut H, p_mismatch: &ConfigMismatch) {
    let mut l_console = ConsoleOutput::new(p_hal);
    let l_warning = FaultLevel::Warning.as_str();
    let l_res = match p_mismatch {
        ConfigMismatch::HeapSize {
            configured,
            detected,
        } => write!(
            l_console,
            "{}Incorrect 'configTOTAL_HEAP_SIZE' configuration!\n\
             FreeRTOS configTOTAL_HEAP_SIZE: {} bytes\n\
             NEORV32 makefile heap size:     {} bytes\n\n",
            l_warning, configured, detected
        ),
        ConfigMismatch::ClockFrequency {
            configured,
            detected,
        } => write!(
            l_console,
            "{}Incorrect 'configCPU_CLOCK_HZ' configuration!\n\
             FreeRTOS configCPU_CLOCK_HZ: {}\n\
             NEORV32 clock speed:         {}\n\n",
            l_warning, configured, detected
        ),
    };
    l_res.unwrap_or(());
}

/// Entry orchestration; never returns.
///
/// Validates the configuration, sets up the hardware, prints the banner and hands control
/// to `p_app`, which is expected to start the scheduler. A configuration or setup error is
/// fatal and ends in the blinking halt of [`crate::assert_called`].
///
/// `p_app` is a plain function pointer; capture-free closures coerce to it.
///
/// # Parameters
/// - `p_hal`: Hardware capability, released before `p_app` runs.
/// - `p_kernel`: External kernel services (trap entry, version string).
/// - `p_config`: Demo configuration.
/// - `p_app`: Application entry point.
pub fn boot<H, K>(
    p_hal: &mut H,
    p_kernel: &K,
    p_config: &DemoConfig,
    p_app: fn() -> !,
) -> !
where
    H: Hal,
    K: RtosKernel,
{
    //////////////////////////
    // Hardware setup
    //////////////////////////
    if let Err(l_err) = p_config
        .validate()
        .and_then(|_| setup_hardware(p_hal, p_kernel, p_config))
    {
        boot_error_halt(p_hal, p_config, &l_err)
    }

    //////////////////////////
    // Say hello
    //////////////////////////
    writeln!(
        ConsoleOutput::new(p_hal),
        "<<< {} running {} {} >>>\n",
        K_SOC_NAME,
        K_RTOS_NAME,
        p_kernel.version()
    )
    .unwrap_or(());

    // Run actual application code
    p_app()
}
