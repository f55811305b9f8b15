use crate::{HalError, HalResult};

/// Largest value accepted by the 12 bit baud divider field.
const K_BAUD_DIV_LIMIT: u32 = 0x0fff;

/// Highest prescaler selector of the UART control register.
const K_PRSC_MAX: u8 = 7;

/// UART0 control register fields.
pub(crate) const K_UART_CTRL_BAUD_MASK: u32 = 0x0fff;
pub(crate) const K_UART_CTRL_PRSC_SHIFT: u32 = 24;
pub(crate) const K_UART_CTRL_EN: u32 = 1 << 28;

/// Prescaler selector and baud divider computed for a UART setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartBaudConfig {
    /// Clock prescaler selector (0..=7).
    pub prescaler: u8,
    /// Value written to the baud field (divider minus one).
    pub divider: u16,
}

impl UartBaudConfig {
    /// Computes the prescaler/divider pair for `p_baud` on a core running at `p_clk` Hz.
    ///
    /// The divider starts at `clk / (2 * baud)` and is scaled down until it fits the 12 bit
    /// field. Prescaler steps 2 and 4 divide by 8, the other steps divide by 2. A rate above
    /// half the core clock gets the smallest divider.
    ///
    /// # Errors
    /// - `InterfaceBadConfig` if the baud rate is zero.
    pub fn compute(p_clk: u32, p_baud: u32) -> HalResult<UartBaudConfig> {
        if p_baud == 0 {
            return Err(HalError::InterfaceBadConfig("UART0", "baud rate is zero"));
        }

        let mut l_div = (p_clk / p_baud / 2).max(1);

        let mut l_prsc: u8 = 0;
        while l_div >= K_BAUD_DIV_LIMIT && l_prsc < K_PRSC_MAX {
            if l_prsc == 2 || l_prsc == 4 {
                l_div >>= 3;
            } else {
                l_div >>= 1;
            }
            l_prsc += 1;
        }

        Ok(UartBaudConfig {
            prescaler: l_prsc,
            divider: ((l_div - 1) & K_UART_CTRL_BAUD_MASK) as u16,
        })
    }

    /// Returns the UART0 control word enabling the transmitter with this baud setting.
    ///
    /// Interrupt enable bits are left cleared.
    pub fn ctrl_word(&self) -> u32 {
        K_UART_CTRL_EN
            | ((self.prescaler as u32) << K_UART_CTRL_PRSC_SHIFT)
            | (self.divider as u32 & K_UART_CTRL_BAUD_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_rate_needs_no_prescaler() {
        let l_cfg = UartBaudConfig::compute(100_000_000, 19_200).unwrap();
        assert_eq!(l_cfg.prescaler, 0);
        assert_eq!(l_cfg.divider, 2603);
        assert_eq!(l_cfg.ctrl_word(), (1 << 28) | 2603);
    }

    #[test]
    fn slow_rate_walks_prescaler() {
        // 100 MHz / (2 * 9600) = 5208, halved once
        let l_cfg = UartBaudConfig::compute(100_000_000, 9_600).unwrap();
        assert_eq!(l_cfg.prescaler, 1);
        assert_eq!(l_cfg.divider, 2603);

        // 100 MHz / (2 * 300) = 166666 -> 83333 -> 41666 -> 5208 -> 2604
        let l_cfg = UartBaudConfig::compute(100_000_000, 300).unwrap();
        assert_eq!(l_cfg.prescaler, 4);
        assert_eq!(l_cfg.divider, 2603);
    }

    #[test]
    fn rejects_zero_rate() {
        assert!(matches!(
            UartBaudConfig::compute(100_000_000, 0),
            Err(HalError::InterfaceBadConfig("UART0", _))
        ));
    }

    #[test]
    fn slow_clock_gets_smallest_divider() {
        for l_clk in [0, 1_000, 32_000, 38_399] {
            let l_cfg = UartBaudConfig::compute(l_clk, 19_200).unwrap();
            assert_eq!(l_cfg.prescaler, 0);
            assert_eq!(l_cfg.divider, 0);
        }
    }
}
