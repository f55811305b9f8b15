/// Clock prescaler selection shared by the NEORV32 timer-like peripherals.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPrescaler {
    Div2 = 0,
    Div4 = 1,
    Div8 = 2,
    Div64 = 3,
    Div128 = 4,
    Div1024 = 5,
    Div2048 = 6,
    Div4096 = 7,
}

impl ClockPrescaler {
    /// Returns the clock division factor applied by this prescaler setting.
    pub fn divisor(&self) -> u32 {
        match self {
            ClockPrescaler::Div2 => 2,
            ClockPrescaler::Div4 => 4,
            ClockPrescaler::Div8 => 8,
            ClockPrescaler::Div64 => 64,
            ClockPrescaler::Div128 => 128,
            ClockPrescaler::Div1024 => 1024,
            ClockPrescaler::Div2048 => 2048,
            ClockPrescaler::Div4096 => 4096,
        }
    }

    /// Register selector value.
    pub fn bits(&self) -> u32 {
        *self as u32
    }
}

/// GPTMR control register fields.
pub(crate) const K_GPTMR_CTRL_EN: u32 = 1 << 0;
pub(crate) const K_GPTMR_CTRL_PRSC_SHIFT: u32 = 1;
/// Continuous mode: the counter restarts after each threshold match.
pub(crate) const K_GPTMR_CTRL_MODE: u32 = 1 << 4;

/// Fast interrupt channel wired to the GPTMR.
pub const K_GPTMR_FIRQ: u32 = 12;

/// `mie`/`mip` bit of the GPTMR fast interrupt (FIRQ channels start at bit 16).
pub const K_GPTMR_FIRQ_BIT: u32 = 16 + K_GPTMR_FIRQ;

/// `mcause` value reported when the GPTMR fast interrupt is taken.
pub const K_GPTMR_TRAP_CODE: u32 = 0x8000_0000 | K_GPTMR_FIRQ_BIT;
