//! Application-level trap dispatch.
//!
//! The kernel trap entry saves the interrupted context, handles the causes it owns
//! (machine timer, environment calls) and forwards everything else here with interrupts
//! masked. Both dispatchers only touch CSRs and the UART and never block.

use crate::ConsoleOutput;
use core::fmt::{Display, Write};
use hal_interface::{Csr, Hal, K_GPTMR_FIRQ_BIT};

/// Raw `mcause` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapCause(pub u32);

impl TrapCause {
    const K_INTERRUPT_FLAG: u32 = 1 << 31;

    pub fn bits(&self) -> u32 {
        self.0
    }

    /// True for asynchronous causes (interrupts).
    pub fn is_interrupt(&self) -> bool {
        self.0 & Self::K_INTERRUPT_FLAG != 0
    }

    /// Cause number without the interrupt flag.
    pub fn code(&self) -> u32 {
        self.0 & !Self::K_INTERRUPT_FLAG
    }
}

impl Display for TrapCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// What the interrupt dispatcher did with a cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptOutcome {
    /// Periodic timer match, acknowledged.
    TimerTick,
    /// No handler for this cause; logged only.
    Unexpected(TrapCause),
}

/// State captured by the exception dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionReport {
    pub cause: TrapCause,
    pub mepc: u32,
}

/// Handles an interrupt the kernel did not consume.
///
/// `mcause` is read once. The general purpose timer interrupt is acknowledged by clearing
/// its pending bit and reported with a tick line; any other cause is reported with its raw
/// value. Exactly one diagnostic line is printed in both cases; the unexpected-cause line
/// is preceded by an empty separator line so it stands out of task output.
///
/// # Parameters
/// - `p_hal`: Hardware capability.
///
/// # Returns
/// - The [`InterruptOutcome`] that was printed.
pub fn handle_interrupt<H: Hal>(p_hal: &mut H) -> InterruptOutcome {
    let l_cause = TrapCause(p_hal.read_csr(Csr::Mcause));

    if l_cause.is_interrupt() && l_cause.code() == K_GPTMR_FIRQ_BIT {
        // Acknowledge the fast interrupt
        p_hal.clear_csr_bits(Csr::Mip, 1 << K_GPTMR_FIRQ_BIT);
        p_hal.uart_puts("GPTMR IRQ Tick\n");
        InterruptOutcome::TimerTick
    } else {
        writeln!(
            ConsoleOutput::new(p_hal),
            "\n<NEORV32-IRQ> Unexpected IRQ! cause={} </NEORV32-IRQ>",
            l_cause
        )
        .unwrap_or(());
        InterruptOutcome::Unexpected(l_cause)
    }
}

/// Handles a synchronous exception the kernel did not consume.
///
/// Reports `mcause` and `mepc` and returns; there is no attempt at recovery.
pub fn handle_exception<H: Hal>(p_hal: &mut H) -> ExceptionReport {
    let l_report = ExceptionReport {
        cause: TrapCause(p_hal.read_csr(Csr::Mcause)),
        mepc: p_hal.read_csr(Csr::Mepc),
    };

    writeln!(
        ConsoleOutput::new(p_hal),
        "\n<NEORV32-EXC> mcause = {} @ mepc = 0x{:x} </NEORV32-EXC>",
        l_report.cause,
        l_report.mepc
    )
    .unwrap_or(());
    l_report
}

#[cfg(test)]
mod tests {
    use super::*;
    use hal_interface::{K_GPTMR_TRAP_CODE, SimEvent, SimHal};

    #[test]
    fn cause_fields() {
        let l_cause = TrapCause(0x8000_001c);
        assert!(l_cause.is_interrupt());
        assert_eq!(l_cause.code(), 28);
        assert!(!TrapCause(2).is_interrupt());
        assert_eq!(format!("{}", TrapCause(0x8000_0007)), "0x80000007");
    }

    #[test]
    fn timer_interrupt_is_acknowledged() {
        let mut l_hal = SimHal::new(100_000_000, 8192);
        l_hal.set_pending(K_GPTMR_FIRQ_BIT);
        l_hal.set_pending(3);
        l_hal.raise_trap(K_GPTMR_TRAP_CODE, 0x100);

        assert_eq!(handle_interrupt(&mut l_hal), InterruptOutcome::TimerTick);
        assert_eq!(l_hal.read_csr(Csr::Mip), 1 << 3);
        assert_eq!(l_hal.output(), "GPTMR IRQ Tick\n");
        assert_eq!(l_hal.lines_containing("Unexpected"), 0);
    }

    #[test]
    fn other_interrupts_are_reported_once() {
        for l_raw in [0x8000_0007u32, 0x8000_0010, 0x8000_001d, 0x0000_001c] {
            let mut l_hal = SimHal::new(100_000_000, 8192).with_csr(Csr::Mip, 0xffff_ffff);
            l_hal.raise_trap(l_raw, 0);

            assert_eq!(
                handle_interrupt(&mut l_hal),
                InterruptOutcome::Unexpected(TrapCause(l_raw))
            );
            assert_eq!(l_hal.lines_containing("Unexpected IRQ!"), 1);
            assert_eq!(l_hal.lines_containing(&format!("cause=0x{:x}", l_raw)), 1);
            assert_eq!(l_hal.lines_containing("Tick"), 0);
            // Pending bits are left alone
            assert_eq!(l_hal.read_csr(Csr::Mip), 0xffff_ffff);
            assert!(l_hal.events().iter().all(|l_e| !matches!(l_e, SimEvent::CsrClear(..))));
        }
    }

    #[test]
    fn unexpected_interrupt_line_layout() {
        let mut l_hal = SimHal::new(100_000_000, 8192);
        l_hal.raise_trap(0x8000_0007, 0);
        handle_interrupt(&mut l_hal);

        assert_eq!(
            l_hal.output(),
            "\n<NEORV32-IRQ> Unexpected IRQ! cause=0x80000007 </NEORV32-IRQ>\n"
        );
        assert_eq!(l_hal.output().lines().filter(|l_l| !l_l.is_empty()).count(), 1);
    }

    #[test]
    fn exception_reports_cause_and_pc() {
        let mut l_hal = SimHal::new(100_000_000, 8192);
        l_hal.raise_trap(0x2, 0x0000_04a8);

        let l_report = handle_exception(&mut l_hal);
        assert_eq!(
            l_report,
            ExceptionReport {
                cause: TrapCause(2),
                mepc: 0x4a8
            }
        );
        assert_eq!(
            l_hal.output(),
            "\n<NEORV32-EXC> mcause = 0x2 @ mepc = 0x4a8 </NEORV32-EXC>\n"
        );
    }
}
