use core::fmt::Display;

/// A wrapper struct representing a duration in milliseconds.
///
/// # Fields
///
/// * `0` - The inner `u32` value representing the duration in milliseconds.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milliseconds(pub u32);

impl Display for Milliseconds {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ms", self.0)
    }
}

impl Milliseconds {
    /// Converts the value of the current instance into a `u32`.
    pub fn to_u32(&self) -> u32 {
        self.0
    }
}

/// A frequency in Hertz.
///
/// Used for the CPU clock the kernel was configured for. The value printed by
/// [`Display`] is the raw Hz count, matching the console diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hz(pub u32);

impl Display for Hz {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

impl Hz {
    /// Builds a frequency from a MHz count.
    pub const fn from_mhz(p_mhz: u32) -> Self {
        Hz(p_mhz * 1_000_000)
    }

    pub fn to_u32(&self) -> u32 {
        self.0
    }

    /// Number of cycles of this clock elapsed during `p_period`, after division by
    /// `p_divisor`.
    ///
    /// The intermediate product is computed on 64 bits; the result saturates at `u32::MAX`.
    pub fn ticks_in(&self, p_period: Milliseconds, p_divisor: u32) -> u32 {
        let l_ticks = (self.0 as u64 / p_divisor.max(1) as u64) * p_period.0 as u64 / 1000;
        l_ticks.min(u32::MAX as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_for_timer_period() {
        assert_eq!(Hz::from_mhz(100).ticks_in(Milliseconds(500), 8), 6_250_000);
        assert_eq!(Hz::from_mhz(100).ticks_in(Milliseconds(1000), 1), 100_000_000);
        assert_eq!(Hz(u32::MAX).ticks_in(Milliseconds(u32::MAX), 1), u32::MAX);
    }

    #[test]
    fn display_units() {
        assert_eq!(format!("{}", Hz(100)), "100 Hz");
        assert_eq!(format!("{}", Milliseconds(500)), "500 ms");
    }
}
