use port::RtosKernel;

/// Release of the linked kernel (`tskKERNEL_VERSION_NUMBER`).
const K_FREERTOS_VERSION: &str = "V10.4.4";

extern "C" {
    /// Blinky application: creates the tasks and starts the scheduler.
    pub fn main_blinky();

    /// Kernel trap entry (context save, then dispatch).
    fn freertos_risc_v_trap_handler();
}

/// The FreeRTOS library linked into the image.
pub struct FreeRtos;

impl RtosKernel for FreeRtos {
    fn version(&self) -> &'static str {
        K_FREERTOS_VERSION
    }

    fn trap_handler(&self) -> usize {
        freertos_risc_v_trap_handler as usize
    }
}
