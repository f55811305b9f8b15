//! Register backend for the NEORV32 processor.
//!
//! Peripherals are reached through their memory-mapped registers in the IO region at the
//! top of the address space. CSR accesses use the `riscv` crate where it exposes the
//! operation and inline `csr*` instructions otherwise.

use crate::gptmr::{K_GPTMR_CTRL_EN, K_GPTMR_CTRL_MODE, K_GPTMR_CTRL_PRSC_SHIFT};
use crate::{ClockPrescaler, Csr, Hal, HalError, HalResult, K_GPIO_PINS, UartBaudConfig};
use core::arch::asm;
use core::ptr::{read_volatile, write_volatile};

const K_GPTMR_CTRL: usize = 0xFFFF_FF60;
const K_GPTMR_THRES: usize = 0xFFFF_FF64;
const K_GPTMR_COUNT: usize = 0xFFFF_FF68;

const K_UART0_CTRL: usize = 0xFFFF_FFA0;
const K_UART0_DATA: usize = 0xFFFF_FFA4;
const K_UART_CTRL_TX_BUSY: u32 = 1 << 31;

const K_GPIO_OUTPUT_LO: usize = 0xFFFF_FFC8;
const K_GPIO_OUTPUT_HI: usize = 0xFFFF_FFCC;

const K_SYSINFO_CLK: usize = 0xFFFF_FFE0;
const K_SYSINFO_SOC: usize = 0xFFFF_FFE8;
const K_SYSINFO_SOC_IO_GPTMR: u32 = 1 << 28;

unsafe extern "C" {
    /// Heap size chosen at link time; only the symbol address is meaningful.
    static __crt0_max_heap: u8;
}

#[inline(always)]
fn reg_read(p_addr: usize) -> u32 {
    unsafe { read_volatile(p_addr as *const u32) }
}

#[inline(always)]
fn reg_write(p_addr: usize, p_value: u32) {
    unsafe { write_volatile(p_addr as *mut u32, p_value) }
}

/// Expands to one inline `csr*` instruction per supported register.
macro_rules! csr_op {
    ($op:literal, $csr:expr, $value:expr) => {
        match $csr {
            Csr::Mcause => unsafe { asm!(concat!($op, " mcause, {0}"), in(reg) $value) },
            Csr::Mepc => unsafe { asm!(concat!($op, " mepc, {0}"), in(reg) $value) },
            Csr::Mtvec => unsafe { asm!(concat!($op, " mtvec, {0}"), in(reg) $value) },
            Csr::Mie => unsafe { asm!(concat!($op, " mie, {0}"), in(reg) $value) },
            Csr::Mip => unsafe { asm!(concat!($op, " mip, {0}"), in(reg) $value) },
        }
    };
}

/// Zero-sized handle on the NEORV32 registers.
///
/// The registers are global to the hart, so any context holding control may create one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neorv32Hal;

impl Neorv32Hal {
    pub const fn new() -> Self {
        Neorv32Hal
    }
}

impl Hal for Neorv32Hal {
    fn core_clk(&self) -> u32 {
        reg_read(K_SYSINFO_CLK)
    }

    fn max_heap_size(&self) -> u32 {
        unsafe { core::ptr::addr_of!(__crt0_max_heap) as usize as u32 }
    }

    fn read_csr(&self, p_csr: Csr) -> u32 {
        let mut l_value: u32 = 0;
        match p_csr {
            Csr::Mcause => l_value = riscv::register::mcause::read().bits() as u32,
            Csr::Mepc => l_value = riscv::register::mepc::read() as u32,
            Csr::Mtvec => unsafe { asm!("csrr {0}, mtvec", out(reg) l_value) },
            Csr::Mie => unsafe { asm!("csrr {0}, mie", out(reg) l_value) },
            Csr::Mip => unsafe { asm!("csrr {0}, mip", out(reg) l_value) },
        }
        l_value
    }

    fn write_csr(&mut self, p_csr: Csr, p_value: u32) {
        csr_op!("csrw", p_csr, p_value);
    }

    fn set_csr_bits(&mut self, p_csr: Csr, p_mask: u32) {
        csr_op!("csrs", p_csr, p_mask);
    }

    fn clear_csr_bits(&mut self, p_csr: Csr, p_mask: u32) {
        csr_op!("csrc", p_csr, p_mask);
    }

    fn disable_interrupts(&mut self) {
        unsafe { riscv::register::mstatus::clear_mie() }
    }

    fn gpio_port_set(&mut self, p_value: u64) {
        reg_write(K_GPIO_OUTPUT_LO, p_value as u32);
        reg_write(K_GPIO_OUTPUT_HI, (p_value >> 32) as u32);
    }

    fn gpio_pin_toggle(&mut self, p_pin: u8) -> HalResult<()> {
        if p_pin >= K_GPIO_PINS {
            return Err(HalError::WrongPin(p_pin));
        }
        let (l_addr, l_bit) = if p_pin < 32 {
            (K_GPIO_OUTPUT_LO, p_pin)
        } else {
            (K_GPIO_OUTPUT_HI, p_pin - 32)
        };
        reg_write(l_addr, reg_read(l_addr) ^ (1 << l_bit));
        Ok(())
    }

    fn uart_setup(&mut self, p_baud: u32) -> HalResult<()> {
        let l_cfg = UartBaudConfig::compute(self.core_clk(), p_baud)?;

        // Reset the module before applying the new configuration
        reg_write(K_UART0_CTRL, 0);
        reg_write(K_UART0_CTRL, l_cfg.ctrl_word());
        Ok(())
    }

    fn uart_write(&mut self, p_bytes: &[u8]) {
        for &l_byte in p_bytes {
            if l_byte == b'\n' {
                uart_putc(b'\r');
            }
            uart_putc(l_byte);
        }
    }

    fn gptmr_available(&self) -> bool {
        reg_read(K_SYSINFO_SOC) & K_SYSINFO_SOC_IO_GPTMR != 0
    }

    fn gptmr_setup(&mut self, p_prescaler: ClockPrescaler, p_threshold: u32) -> HalResult<()> {
        if !self.gptmr_available() {
            return Err(HalError::InterfaceNotAvailable("GPTMR"));
        }
        if p_threshold == 0 {
            return Err(HalError::InterfaceBadConfig("GPTMR", "threshold is zero"));
        }

        reg_write(K_GPTMR_CTRL, 0);
        reg_write(K_GPTMR_THRES, p_threshold);
        reg_write(K_GPTMR_COUNT, 0);
        reg_write(
            K_GPTMR_CTRL,
            K_GPTMR_CTRL_EN | K_GPTMR_CTRL_MODE | (p_prescaler.bits() << K_GPTMR_CTRL_PRSC_SHIFT),
        );
        Ok(())
    }

    fn sleep(&mut self) {
        unsafe { riscv::asm::wfi() }
    }

    fn ebreak(&mut self) {
        unsafe { riscv::asm::ebreak() }
    }

    fn busy_wait(&mut self, p_iterations: u32) {
        for _ in 0..p_iterations {
            unsafe { riscv::asm::nop() }
        }
    }

    fn halt(&mut self) -> ! {
        #[allow(clippy::empty_loop)]
        loop {}
    }
}

fn uart_putc(p_byte: u8) {
    while reg_read(K_UART0_CTRL) & K_UART_CTRL_TX_BUSY != 0 {}
    reg_write(K_UART0_DATA, p_byte as u32);
}
