use hal_interface::Neorv32Hal;

/// Called by the kernel trap entry for every interrupt it does not handle itself.
#[no_mangle]
pub extern "C" fn freertos_risc_v_application_interrupt_handler() {
    port::handle_interrupt(&mut Neorv32Hal::new());
}

/// Called by the kernel trap entry for every exception it does not handle itself.
#[no_mangle]
pub extern "C" fn freertos_risc_v_application_exception_handler() {
    port::handle_exception(&mut Neorv32Hal::new());
}
