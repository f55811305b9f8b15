#![cfg_attr(not(test), no_std)]

//! Hardware abstraction for the NEORV32 SoC.
//!
//! Every routine of the port receives the hardware as a [`Hal`] capability instead of
//! touching registers through globals. Two backends implement it:
//! - [`Neorv32Hal`] drives the memory-mapped peripherals and CSRs (riscv32 builds only).
//! - [`SimHal`] models the same registers on the host and records every access
//!   (`sim` feature).

mod errors;
mod gptmr;
#[cfg(target_arch = "riscv32")]
mod neorv32;
#[cfg(any(test, feature = "sim"))]
mod sim;
mod uart;

pub use errors::*;
pub use gptmr::{ClockPrescaler, K_GPTMR_FIRQ, K_GPTMR_FIRQ_BIT, K_GPTMR_TRAP_CODE};
#[cfg(target_arch = "riscv32")]
pub use neorv32::Neorv32Hal;
#[cfg(any(test, feature = "sim"))]
pub use sim::{K_SIM_HALT_MSG, SimEvent, SimHal};
pub use uart::UartBaudConfig;

/// Number of pins on the GPIO output port.
pub const K_GPIO_PINS: u8 = 64;

/// Machine-mode control and status registers reachable through the HAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Csr {
    /// Trap cause.
    Mcause,
    /// Program counter of the trapping instruction.
    Mepc,
    /// Trap vector base address.
    Mtvec,
    /// Interrupt enable bits.
    Mie,
    /// Interrupt pending bits.
    Mip,
}

/// Register-level operations the port needs from the SoC.
///
/// Writes to hardware registers cannot fail; only operations that validate their
/// arguments return a [`HalResult`].
pub trait Hal {
    /// Returns the SoC clock frequency in Hz as reported by SYSINFO.
    fn core_clk(&self) -> u32;

    /// Returns the heap size reserved by the link-time runtime, in bytes.
    fn max_heap_size(&self) -> u32;

    /// Reads a CSR.
    fn read_csr(&self, p_csr: Csr) -> u32;

    /// Writes a CSR.
    fn write_csr(&mut self, p_csr: Csr, p_value: u32);

    /// Sets the bits of `p_mask` in a CSR.
    fn set_csr_bits(&mut self, p_csr: Csr, p_mask: u32);

    /// Clears the bits of `p_mask` in a CSR.
    fn clear_csr_bits(&mut self, p_csr: Csr, p_mask: u32);

    /// Globally masks machine interrupts (`mstatus.MIE`).
    ///
    /// This is the interrupt-disable primitive used by the kernel port before halting.
    fn disable_interrupts(&mut self);

    /// Writes the whole GPIO output port.
    fn gpio_port_set(&mut self, p_value: u64);

    /// Toggles one GPIO output pin.
    ///
    /// # Errors
    /// - `WrongPin` if `p_pin` is not below [`K_GPIO_PINS`].
    fn gpio_pin_toggle(&mut self, p_pin: u8) -> HalResult<()>;

    /// Enables UART0 at `p_baud` with all UART interrupts disabled.
    ///
    /// # Errors
    /// - `InterfaceBadConfig` if the baud rate cannot be derived from the core clock.
    fn uart_setup(&mut self, p_baud: u32) -> HalResult<()>;

    /// Transmits raw bytes over UART0, blocking until every byte is queued.
    ///
    /// No encoding is assumed; `'\n'` is the only byte the backend may expand.
    fn uart_write(&mut self, p_bytes: &[u8]);

    /// Transmits a string over UART0, blocking until every byte is queued.
    fn uart_puts(&mut self, p_str: &str) {
        self.uart_write(p_str.as_bytes());
    }

    /// Returns true when the general purpose timer is synthesized.
    fn gptmr_available(&self) -> bool;

    /// Starts the general purpose timer in continuous mode.
    ///
    /// # Errors
    /// - `InterfaceNotAvailable` if the timer is not synthesized.
    /// - `InterfaceBadConfig` if `p_threshold` is zero.
    fn gptmr_setup(&mut self, p_prescaler: ClockPrescaler, p_threshold: u32) -> HalResult<()>;

    /// Puts the hart in low-power wait until the next interrupt.
    fn sleep(&mut self);

    /// Issues a debug break.
    fn ebreak(&mut self);

    /// Spins for `p_iterations` no-operation instructions.
    fn busy_wait(&mut self, p_iterations: u32);

    /// Stops forever.
    fn halt(&mut self) -> !;
}
