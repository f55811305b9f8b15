#![cfg_attr(target_arch = "riscv32", no_std, no_main)]

//! NEORV32 FreeRTOS demo entry point.
//!
//! This crate links the port against the FreeRTOS static library: it provides the reset
//! entry, the C symbols the kernel calls back into and the panic handler. The image only
//! makes sense for a riscv32 target; host builds compile an empty stub.

#[cfg(target_arch = "riscv32")]
mod hooks;
#[cfg(target_arch = "riscv32")]
mod interrupts;
#[cfg(target_arch = "riscv32")]
mod rtos;

use port::DemoConfig;

/// Demo configuration. Keep in sync with `FreeRTOSConfig.h` and the linker script.
pub const K_DEMO_CONFIG: DemoConfig = DemoConfig::DEFAULT;

#[cfg(target_arch = "riscv32")]
#[riscv_rt::entry]
fn main() -> ! {
    let mut l_hal = hal_interface::Neorv32Hal::new();

    port::boot(&mut l_hal, &rtos::FreeRtos, &K_DEMO_CONFIG, || {
        unsafe { rtos::main_blinky() };

        // We should never reach this
        port::assert_called(&mut hal_interface::Neorv32Hal::new(), &K_DEMO_CONFIG)
    })
}

/// Kernel-wide panic handler.
///
/// Prints the panic information on UART0, then halts with the assertion LED pattern.
#[cfg(target_arch = "riscv32")]
#[panic_handler]
fn panic(p_info: &core::panic::PanicInfo) -> ! {
    port::panic_halt(
        &mut hal_interface::Neorv32Hal::new(),
        &K_DEMO_CONFIG,
        p_info,
    )
}

#[cfg(not(target_arch = "riscv32"))]
fn main() {
    // Only validates the configuration the image would boot with
    if let Err(l_err) = K_DEMO_CONFIG.validate() {
        eprintln!("{}", l_err.to_string());
        std::process::exit(1);
    }
    eprintln!("demo: build for a riscv32 NEORV32 target to get a bootable image");
}
