//! End-to-end boot of the port against the simulated SoC.

use hal_interface::{Csr, Hal, K_GPTMR_TRAP_CODE, K_SIM_HALT_MSG, SimEvent, SimHal};
use port::{
    DemoConfig, FaultHooks, InterruptOutcome, K_ASSERT_MSG, KernelHooks, RtosKernel,
    assert_called, boot, handle_interrupt,
};
use std::panic::{AssertUnwindSafe, catch_unwind};

const K_APP_STARTED: &str = "application started";

struct FakeFreeRtos;

impl RtosKernel for FakeFreeRtos {
    fn version(&self) -> &'static str {
        "V10.4.4"
    }

    fn trap_handler(&self) -> usize {
        0x0000_0200
    }
}

/// Runs `boot` until the application closure takes over, which ends the test run with a
/// panic carrying `K_APP_STARTED`.
fn boot_until_app(p_hal: &mut SimHal, p_config: &DemoConfig) -> String {
    let l_res: std::thread::Result<()> = catch_unwind(AssertUnwindSafe(|| {
        boot(p_hal, &FakeFreeRtos, p_config, || panic!("{}", K_APP_STARTED))
    }));
    let l_payload = match l_res {
        Err(l_payload) => l_payload,
        Ok(()) => unreachable!(),
    };
    l_payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default()
}

#[test]
fn boot_prints_banner_then_starts_application() {
    let mut l_hal = SimHal::new(100_000_000, 8 * 1024);
    let l_reason = boot_until_app(&mut l_hal, &DemoConfig::DEFAULT);

    assert_eq!(l_reason, K_APP_STARTED);
    assert_eq!(
        l_hal.output(),
        "<<< NEORV32 running FreeRTOS V10.4.4 >>>\n\n"
    );
    assert_eq!(l_hal.read_csr(Csr::Mtvec), 0x200);
    assert!(l_hal.uart_config().is_some());
    assert!(l_hal.gptmr_config().is_some());
}

#[test]
fn boot_continues_after_config_warnings() {
    let mut l_hal = SimHal::new(32_000_000, 16 * 1024);
    let l_reason = boot_until_app(&mut l_hal, &DemoConfig::DEFAULT);

    assert_eq!(l_reason, K_APP_STARTED);
    assert_eq!(l_hal.lines_containing("WARNING!"), 2);
    assert_eq!(l_hal.lines_containing("<<< NEORV32 running FreeRTOS"), 1);
    // Warnings come before the banner
    let l_out = l_hal.output();
    assert!(l_out.find("WARNING!").unwrap() < l_out.find("<<<").unwrap());
}

#[test]
fn invalid_config_halts_before_application() {
    let l_cfg = DemoConfig {
        baud_rate: 0,
        ..DemoConfig::DEFAULT
    };
    let mut l_hal = SimHal::new(100_000_000, 8 * 1024).with_wait_budget(2);
    let l_reason = boot_until_app(&mut l_hal, &l_cfg);

    assert_eq!(l_reason, K_SIM_HALT_MSG);
    assert!(!l_hal.interrupts_enabled());
    assert_eq!(l_hal.lines_containing("Invalid configuration : baud_rate"), 1);
    assert_eq!(l_hal.lines_containing("<<<"), 0);
    // The UART was never touched by setup
    assert!(l_hal.uart_config().is_none());
}

#[test]
fn clock_below_twice_the_baud_rate_still_boots() {
    let mut l_hal = SimHal::new(32_000, 8 * 1024).with_wait_budget(0);
    let l_reason = boot_until_app(&mut l_hal, &DemoConfig::DEFAULT);

    assert_eq!(l_reason, K_APP_STARTED);
    assert_eq!(l_hal.lines_containing("WARNING!"), 1);
    assert_eq!(l_hal.lines_containing("NEORV32 clock speed:         32000 Hz"), 1);
    assert_eq!(l_hal.lines_containing("<<< NEORV32 running FreeRTOS"), 1);
    assert!(l_hal.interrupts_enabled());
}

#[test]
fn runtime_after_boot() {
    // Boot never busy-waits: one wait for the tick hook, two blink periods, then halt
    let mut l_hal = SimHal::new(100_000_000, 8 * 1024).with_wait_budget(3);
    boot_until_app(&mut l_hal, &DemoConfig::DEFAULT);

    // Timer tick delivered by the kernel trap entry
    l_hal.set_pending(28);
    l_hal.raise_trap(K_GPTMR_TRAP_CODE, 0x400);
    assert_eq!(handle_interrupt(&mut l_hal), InterruptOutcome::TimerTick);
    assert_eq!(l_hal.lines_containing("GPTMR IRQ Tick"), 1);

    // Scheduler tick then idle task iteration
    FaultHooks::new(&mut l_hal).tick();
    FaultHooks::new(&mut l_hal).idle();
    assert_eq!(l_hal.events().last(), Some(&SimEvent::Sleep));

    // A failed assertion ends everything
    let l_res: std::thread::Result<()> = catch_unwind(AssertUnwindSafe(|| {
        assert_called(&mut l_hal, &DemoConfig::DEFAULT)
    }));
    assert!(l_res.is_err());
    assert_eq!(l_hal.lines_containing(K_ASSERT_MSG), 1);
    assert!(!l_hal.interrupts_enabled());
    assert_eq!(l_hal.events().last(), Some(&SimEvent::Halted));
    assert_eq!(
        l_hal
            .events()
            .iter()
            .filter(|l_e| matches!(l_e, SimEvent::GpioToggle(_)))
            .count(),
        4
    );
}
