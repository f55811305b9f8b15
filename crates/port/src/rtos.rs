//! Seam towards the external real-time kernel.
//!
//! The kernel is linked as a native library. The port only needs two things from it at
//! boot time; everything else flows the other way through [`crate::KernelHooks`] and the
//! trap dispatchers.

/// Boot-time services consumed from the external kernel.
pub trait RtosKernel {
    /// Kernel release string printed in the boot banner (e.g. `V10.4.4`).
    fn version(&self) -> &'static str;

    /// Address of the kernel trap entry, installed into `mtvec` during setup.
    ///
    /// The kernel saves the task context there and calls back into
    /// [`crate::handle_interrupt`] or [`crate::handle_exception`] for causes it does not
    /// own.
    fn trap_handler(&self) -> usize;
}
