//! C symbols expected by the kernel and by the blinky application.
//!
//! Each function builds a register handle and forwards to the port.

use crate::K_DEMO_CONFIG;
use core::ffi::{CStr, c_char, c_void};
use hal_interface::Neorv32Hal;
use port::{FaultHooks, KernelHooks};

#[allow(non_snake_case)]
#[no_mangle]
pub extern "C" fn vApplicationMallocFailedHook() -> ! {
    FaultHooks::new(&mut Neorv32Hal::new()).malloc_failed()
}

#[allow(non_snake_case)]
#[no_mangle]
pub extern "C" fn vApplicationIdleHook() {
    FaultHooks::new(&mut Neorv32Hal::new()).idle();
}

#[allow(non_snake_case)]
#[no_mangle]
pub extern "C" fn vApplicationStackOverflowHook(
    _px_task: *mut c_void,
    _pc_task_name: *mut c_char,
) -> ! {
    FaultHooks::new(&mut Neorv32Hal::new()).stack_overflow()
}

#[allow(non_snake_case)]
#[no_mangle]
pub extern "C" fn vApplicationTickHook() {
    FaultHooks::new(&mut Neorv32Hal::new()).tick();
}

/// Target of `configASSERT`.
#[allow(non_snake_case)]
#[no_mangle]
pub extern "C" fn vAssertCalled() -> ! {
    port::assert_called(&mut Neorv32Hal::new(), &K_DEMO_CONFIG)
}

/// Toggles the application LED (GPIO.out(0) in the default configuration).
#[allow(non_snake_case)]
#[no_mangle]
pub extern "C" fn vToggleLED() {
    // The pin is checked at boot
    port::toggle_led(&mut Neorv32Hal::new(), &K_DEMO_CONFIG).unwrap_or(());
}

/// Sends a NUL-terminated string over UART0.
///
/// # Safety
/// `pc_string` must be null or point to a NUL-terminated string.
#[allow(non_snake_case)]
#[no_mangle]
pub unsafe extern "C" fn vSendString(pc_string: *const c_char) {
    if pc_string.is_null() {
        return;
    }
    let l_str = unsafe { CStr::from_ptr(pc_string) };
    port::send_bytes(&mut Neorv32Hal::new(), l_str.to_bytes());
}
