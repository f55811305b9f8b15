/// Name of the SoC reported in the boot banner.
pub const K_SOC_NAME: &str = "NEORV32";

/// Name of the external kernel reported in the boot banner.
pub const K_RTOS_NAME: &str = "FreeRTOS";
