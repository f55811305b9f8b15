//! Host-side model of the NEORV32 registers used by the port.
//!
//! `SimHal` keeps the CSR, GPIO, UART and GPTMR state in plain fields and appends every
//! access to an event log. Paths that never return on hardware ([`Hal::halt`] and an
//! exhausted busy-wait budget) panic with [`K_SIM_HALT_MSG`] so tests can observe them.

use crate::{ClockPrescaler, Csr, Hal, HalError, HalResult, K_GPIO_PINS, UartBaudConfig};
use heapless::{String, Vec};

/// Panic message used when the simulated hart stops.
pub const K_SIM_HALT_MSG: &str = "hal halted";

const K_SIM_OUTPUT_LEN: usize = 4096;
const K_SIM_EVENTS_LEN: usize = 256;

/// One recorded hardware access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    CsrWrite(Csr, u32),
    CsrSet(Csr, u32),
    CsrClear(Csr, u32),
    InterruptsDisabled,
    GpioPortSet(u64),
    GpioToggle(u8),
    UartSetup(UartBaudConfig),
    /// Number of bytes transmitted by one `uart_write`/`uart_puts` call.
    UartWrite(usize),
    GptmrSetup(ClockPrescaler, u32),
    Sleep,
    Ebreak,
    BusyWait(u32),
    Halted,
}

#[derive(Debug)]
pub struct SimHal {
    clk: u32,
    heap: u32,
    gptmr_present: bool,
    mcause: u32,
    mepc: u32,
    mtvec: u32,
    mie: u32,
    mip: u32,
    interrupts_enabled: bool,
    gpio_out: u64,
    uart: Option<UartBaudConfig>,
    gptmr: Option<(ClockPrescaler, u32)>,
    output: String<K_SIM_OUTPUT_LEN>,
    raw_output: Vec<u8, K_SIM_OUTPUT_LEN>,
    events: Vec<SimEvent, K_SIM_EVENTS_LEN>,
    wait_budget: Option<u32>,
}

impl SimHal {
    /// Creates a simulated SoC running at `p_clk` Hz with `p_heap` bytes of heap.
    ///
    /// The timer is present, interrupts start enabled (as once the scheduler runs) and the
    /// busy-wait budget is unlimited.
    pub fn new(p_clk: u32, p_heap: u32) -> Self {
        SimHal {
            clk: p_clk,
            heap: p_heap,
            gptmr_present: true,
            mcause: 0,
            mepc: 0,
            mtvec: 0,
            mie: 0,
            mip: 0,
            interrupts_enabled: true,
            gpio_out: 0,
            uart: None,
            gptmr: None,
            output: String::new(),
            raw_output: Vec::new(),
            events: Vec::new(),
            wait_budget: None,
        }
    }

    /// Removes the general purpose timer from the simulated SoC.
    pub fn without_gptmr(mut self) -> Self {
        self.gptmr_present = false;
        self
    }

    /// Allows `p_budget` calls to [`Hal::busy_wait`]; the next one halts.
    pub fn with_wait_budget(mut self, p_budget: u32) -> Self {
        self.wait_budget = Some(p_budget);
        self
    }

    /// Presets a CSR without logging an event, as if the hardware had latched it.
    pub fn with_csr(mut self, p_csr: Csr, p_value: u32) -> Self {
        *self.csr_mut(p_csr) = p_value;
        self
    }

    /// Presets the GPIO output port.
    pub fn with_gpio(mut self, p_value: u64) -> Self {
        self.gpio_out = p_value;
        self
    }

    /// Everything transmitted over UART0 so far, invalid UTF-8 shown as U+FFFD.
    pub fn output(&self) -> &str {
        self.output.as_str()
    }

    /// Everything transmitted over UART0 so far, byte for byte.
    pub fn raw_output(&self) -> &[u8] {
        &self.raw_output
    }

    /// Number of transmitted lines containing `p_pattern`.
    pub fn lines_containing(&self, p_pattern: &str) -> usize {
        self.output
            .lines()
            .filter(|l_line| l_line.contains(p_pattern))
            .count()
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled
    }

    pub fn gpio_out(&self) -> u64 {
        self.gpio_out
    }

    pub fn uart_config(&self) -> Option<UartBaudConfig> {
        self.uart
    }

    pub fn gptmr_config(&self) -> Option<(ClockPrescaler, u32)> {
        self.gptmr
    }

    /// Latches a new trap: sets `mcause`/`mepc` the way the hardware does before entering
    /// the trap vector.
    pub fn raise_trap(&mut self, p_cause: u32, p_epc: u32) {
        self.mcause = p_cause;
        self.mepc = p_epc;
    }

    /// Marks the interrupt bit `p_bit` pending in `mip`.
    pub fn set_pending(&mut self, p_bit: u32) {
        self.mip |= 1 << p_bit;
    }

    fn record(&mut self, p_event: SimEvent) {
        // A full log keeps its oldest entries.
        self.events.push(p_event).unwrap_or(());
    }

    fn csr_mut(&mut self, p_csr: Csr) -> &mut u32 {
        match p_csr {
            Csr::Mcause => &mut self.mcause,
            Csr::Mepc => &mut self.mepc,
            Csr::Mtvec => &mut self.mtvec,
            Csr::Mie => &mut self.mie,
            Csr::Mip => &mut self.mip,
        }
    }
}

impl Hal for SimHal {
    fn core_clk(&self) -> u32 {
        self.clk
    }

    fn max_heap_size(&self) -> u32 {
        self.heap
    }

    fn read_csr(&self, p_csr: Csr) -> u32 {
        match p_csr {
            Csr::Mcause => self.mcause,
            Csr::Mepc => self.mepc,
            Csr::Mtvec => self.mtvec,
            Csr::Mie => self.mie,
            Csr::Mip => self.mip,
        }
    }

    fn write_csr(&mut self, p_csr: Csr, p_value: u32) {
        *self.csr_mut(p_csr) = p_value;
        self.record(SimEvent::CsrWrite(p_csr, p_value));
    }

    fn set_csr_bits(&mut self, p_csr: Csr, p_mask: u32) {
        *self.csr_mut(p_csr) |= p_mask;
        self.record(SimEvent::CsrSet(p_csr, p_mask));
    }

    fn clear_csr_bits(&mut self, p_csr: Csr, p_mask: u32) {
        *self.csr_mut(p_csr) &= !p_mask;
        self.record(SimEvent::CsrClear(p_csr, p_mask));
    }

    fn disable_interrupts(&mut self) {
        self.interrupts_enabled = false;
        self.record(SimEvent::InterruptsDisabled);
    }

    fn gpio_port_set(&mut self, p_value: u64) {
        self.gpio_out = p_value;
        self.record(SimEvent::GpioPortSet(p_value));
    }

    fn gpio_pin_toggle(&mut self, p_pin: u8) -> HalResult<()> {
        if p_pin >= K_GPIO_PINS {
            return Err(HalError::WrongPin(p_pin));
        }
        self.gpio_out ^= 1 << p_pin;
        self.record(SimEvent::GpioToggle(p_pin));
        Ok(())
    }

    fn uart_setup(&mut self, p_baud: u32) -> HalResult<()> {
        let l_cfg = UartBaudConfig::compute(self.clk, p_baud)?;
        self.uart = Some(l_cfg);
        self.record(SimEvent::UartSetup(l_cfg));
        Ok(())
    }

    fn uart_write(&mut self, p_bytes: &[u8]) {
        self.raw_output.extend_from_slice(p_bytes).unwrap_or(());
        for l_chunk in p_bytes.utf8_chunks() {
            self.output.push_str(l_chunk.valid()).unwrap_or(());
            if !l_chunk.invalid().is_empty() {
                self.output.push(char::REPLACEMENT_CHARACTER).unwrap_or(());
            }
        }
        self.record(SimEvent::UartWrite(p_bytes.len()));
    }

    fn gptmr_available(&self) -> bool {
        self.gptmr_present
    }

    fn gptmr_setup(&mut self, p_prescaler: ClockPrescaler, p_threshold: u32) -> HalResult<()> {
        if !self.gptmr_present {
            return Err(HalError::InterfaceNotAvailable("GPTMR"));
        }
        if p_threshold == 0 {
            return Err(HalError::InterfaceBadConfig("GPTMR", "threshold is zero"));
        }
        self.gptmr = Some((p_prescaler, p_threshold));
        self.record(SimEvent::GptmrSetup(p_prescaler, p_threshold));
        Ok(())
    }

    fn sleep(&mut self) {
        self.record(SimEvent::Sleep);
    }

    fn ebreak(&mut self) {
        self.record(SimEvent::Ebreak);
    }

    fn busy_wait(&mut self, p_iterations: u32) {
        if let Some(l_budget) = self.wait_budget {
            if l_budget == 0 {
                self.halt();
            }
            self.wait_budget = Some(l_budget - 1);
        }
        self.record(SimEvent::BusyWait(p_iterations));
    }

    fn halt(&mut self) -> ! {
        self.record(SimEvent::Halted);
        panic!("{}", K_SIM_HALT_MSG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_only_requested_pin() {
        let mut l_hal = SimHal::new(100_000_000, 8192).with_gpio(0b100);
        l_hal.gpio_pin_toggle(0).unwrap();
        l_hal.gpio_pin_toggle(63).unwrap();
        assert_eq!(l_hal.gpio_out(), 0b101 | (1 << 63));
        assert_eq!(l_hal.gpio_pin_toggle(64), Err(HalError::WrongPin(64)));
    }

    #[test]
    fn csr_bit_operations() {
        let mut l_hal = SimHal::new(100_000_000, 8192).with_csr(Csr::Mip, 0xffff_0000);
        l_hal.clear_csr_bits(Csr::Mip, 1 << 28);
        l_hal.set_csr_bits(Csr::Mie, 1 << 28);
        assert_eq!(l_hal.read_csr(Csr::Mip), 0xefff_0000);
        assert_eq!(l_hal.read_csr(Csr::Mie), 1 << 28);
        assert_eq!(
            l_hal.events(),
            &[
                SimEvent::CsrClear(Csr::Mip, 1 << 28),
                SimEvent::CsrSet(Csr::Mie, 1 << 28)
            ]
        );
    }

    #[test]
    fn gptmr_absent_is_reported() {
        let mut l_hal = SimHal::new(100_000_000, 8192).without_gptmr();
        assert!(!l_hal.gptmr_available());
        assert_eq!(
            l_hal.gptmr_setup(ClockPrescaler::Div8, 100),
            Err(HalError::InterfaceNotAvailable("GPTMR"))
        );
    }

    #[test]
    fn uart_output_is_captured() {
        let mut l_hal = SimHal::new(100_000_000, 8192);
        l_hal.uart_setup(19_200).unwrap();
        l_hal.uart_puts("first line\nsecond");
        l_hal.uart_puts(" line\n");
        assert_eq!(l_hal.lines_containing("line"), 2);
        assert_eq!(l_hal.lines_containing("second line"), 1);
    }

    #[test]
    fn raw_bytes_are_kept() {
        let mut l_hal = SimHal::new(100_000_000, 8192);
        l_hal.uart_write(b"T\xffx\n");
        assert_eq!(l_hal.raw_output(), b"T\xffx\n");
        assert_eq!(l_hal.output(), "T\u{fffd}x\n");
        assert_eq!(l_hal.events(), &[SimEvent::UartWrite(4)]);
    }

    #[test]
    #[should_panic(expected = "hal halted")]
    fn exhausted_wait_budget_halts() {
        let mut l_hal = SimHal::new(100_000_000, 8192).with_wait_budget(2);
        l_hal.busy_wait(10);
        l_hal.busy_wait(10);
        l_hal.busy_wait(10);
    }
}
