use crate::errors_mgt::fatal_halt;
use hal_interface::Hal;

/// Printed when the kernel allocator runs out of heap.
pub const K_MALLOC_FAILED_MSG: &str = "FreeRTOS_FAULT: vApplicationMallocFailedHook \
     (increase 'configTOTAL_HEAP_SIZE' in FreeRTOSConfig.h)";

/// Printed when the kernel detects a task stack overflow.
pub const K_STACK_OVERFLOW_MSG: &str = "FreeRTOS_FAULT: vApplicationStackOverflowHook \
     (increase 'configISR_STACK_SIZE_WORDS' in FreeRTOSConfig.h)";

/// Callback slots the kernel invokes at defined points of its lifecycle.
pub trait KernelHooks {
    /// The kernel allocator could not satisfy a request.
    ///
    /// Called from task context, possibly with the scheduler suspended. Must not return:
    /// the allocator has no fallback.
    fn malloc_failed(&mut self) -> !;

    /// One iteration of the idle task.
    ///
    /// Must never block (no queue or semaphore waits, no delays) and must return, since the
    /// idle task reclaims memory of deleted tasks after this call.
    fn idle(&mut self);

    /// A task overflowed its stack.
    ///
    /// Called from the context switch with interrupts masked. Must not return: the
    /// corrupted stack cannot be trusted anymore.
    fn stack_overflow(&mut self) -> !;

    /// Scheduler tick, from the tick interrupt. Must not block.
    fn tick(&mut self);
}

/// Hook set of the demo.
pub struct FaultHooks<'a, H: Hal> {
    hal: &'a mut H,
}

impl<'a, H: Hal> FaultHooks<'a, H> {
    pub fn new(p_hal: &'a mut H) -> Self {
        FaultHooks { hal: p_hal }
    }
}

impl<H: Hal> KernelHooks for FaultHooks<'_, H> {
    fn malloc_failed(&mut self) -> ! {
        fatal_halt(self.hal, K_MALLOC_FAILED_MSG)
    }

    /// Sleeps until the next interrupt, then hands control back to the idle task.
    fn idle(&mut self) {
        self.hal.sleep();
    }

    fn stack_overflow(&mut self) -> ! {
        fatal_halt(self.hal, K_STACK_OVERFLOW_MSG)
    }

    /// Single no-operation; nothing to do here yet.
    fn tick(&mut self) {
        self.hal.busy_wait(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hal_interface::{SimEvent, SimHal};
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    #[should_panic(expected = "hal halted")]
    fn malloc_failed_never_returns() {
        let mut l_hal = SimHal::new(100_000_000, 8192);
        FaultHooks::new(&mut l_hal).malloc_failed();
    }

    #[test]
    fn malloc_failed_prints_one_line_with_interrupts_off() {
        let mut l_hal = SimHal::new(100_000_000, 8192);
        let l_res: std::thread::Result<()> =
            catch_unwind(AssertUnwindSafe(|| FaultHooks::new(&mut l_hal).malloc_failed()));
        assert!(l_res.is_err());

        assert!(!l_hal.interrupts_enabled());
        assert_eq!(l_hal.output(), format!("{}\n", K_MALLOC_FAILED_MSG));
        assert_eq!(
            l_hal.events(),
            &[
                SimEvent::InterruptsDisabled,
                SimEvent::UartWrite(K_MALLOC_FAILED_MSG.len()),
                SimEvent::UartWrite(1),
                SimEvent::Ebreak,
                SimEvent::Halted,
            ]
        );
    }

    #[test]
    fn stack_overflow_prints_one_line_with_interrupts_off() {
        let mut l_hal = SimHal::new(100_000_000, 8192);
        let l_res: std::thread::Result<()> =
            catch_unwind(AssertUnwindSafe(|| FaultHooks::new(&mut l_hal).stack_overflow()));
        assert!(l_res.is_err());

        assert!(!l_hal.interrupts_enabled());
        assert_eq!(l_hal.output().lines().count(), 1);
        assert_eq!(l_hal.lines_containing("configISR_STACK_SIZE_WORDS"), 1);
        assert_eq!(l_hal.events().last(), Some(&SimEvent::Halted));
    }

    #[test]
    fn idle_sleeps_once_and_returns() {
        let mut l_hal = SimHal::new(100_000_000, 8192);
        FaultHooks::new(&mut l_hal).idle();
        assert_eq!(l_hal.events(), &[SimEvent::Sleep]);
        assert!(l_hal.interrupts_enabled());
    }

    #[test]
    fn tick_is_a_single_nop() {
        let mut l_hal = SimHal::new(100_000_000, 8192);
        let mut l_hooks = FaultHooks::new(&mut l_hal);
        l_hooks.tick();
        l_hooks.tick();
        assert_eq!(l_hal.events(), &[SimEvent::BusyWait(1), SimEvent::BusyWait(1)]);
        assert!(l_hal.output().is_empty());
        assert!(l_hal.interrupts_enabled());
    }
}
