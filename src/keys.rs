//! Telemetry key catalog for the `getValues` endpoint.
//!
//! Keys are opaque register identifiers defined by the device firmware.
//! Unknown or inapplicable keys (e.g. phase 2/3 values on a single-phase
//! inverter) are simply absent from the response.

pub type Key = str;

pub const KEY_POWER: &Key = "6100_40263F00"; // W
pub const KEY_ENERGY_TODAY: &Key = "6400_00262200"; // Wh
pub const KEY_ENERGY_TOTAL: &Key = "6400_00260100"; // Wh

/* AC values */
pub const KEY_AC_L1_POWER: &Key = "6100_40464000"; // W (only one if only one phase)
pub const KEY_AC_L1_VOLTAGE: &Key = "6100_00464800"; // 1e-2 V (only one if only one phase)
pub const KEY_AC_L1_CURRENT: &Key = "6100_40465300"; // mA (only one if only one phase)
pub const KEY_AC_L2_POWER: &Key = "6100_40464100"; // W (only if multiple phases)
pub const KEY_AC_L2_VOLTAGE: &Key = "6100_00464900"; // 1e-2 V (only if multiple phases)
pub const KEY_AC_L2_CURRENT: &Key = "6100_40465400"; // mA (only if multiple phases)
pub const KEY_AC_L3_POWER: &Key = "6100_40464200"; // W (only if multiple phases)
pub const KEY_AC_L3_VOLTAGE: &Key = "6100_00464A00"; // 1e-2 V (only if multiple phases)
pub const KEY_AC_L3_CURRENT: &Key = "6100_40465500"; // mA (only if multiple phases)
pub const KEY_AC_L1L2_VOLTAGE: &Key = "6100_00464B00"; // 1e-2 V (only if multiple phases)
pub const KEY_AC_L2L3_VOLTAGE: &Key = "6100_00464C00"; // 1e-2 V (only if multiple phases)
pub const KEY_AC_L3L1_VOLTAGE: &Key = "6100_00464D00"; // 1e-2 V (only if multiple phases)
pub const KEY_AC_FREQUENCY: &Key = "6100_00465700"; // 1e-2 Hz

/* DC values */
pub const KEY_DC_POWER: &Key = "6380_40251E00"; // W
pub const KEY_DC_VOLTAGE: &Key = "6380_40451F00"; // 1e-2 V
pub const KEY_DC_CURRENT: &Key = "6380_40452100"; // mA

pub const KEY_OPERATING_TIME: &Key = "6400_00462E00"; // s
pub const KEY_FEED_IN_TIME: &Key = "6400_00462F00"; // s

/* Device info */
pub const KEY_ETHERNET_IP: &Key = "6180_104A9A00"; // String
pub const KEY_ETHERNET_DNS_IP: &Key = "6180_104A9D00"; // String
pub const KEY_ETHERNET_NETMASK: &Key = "6180_104A9B00"; // String
pub const KEY_ETHERNET_GATEWAY_IP: &Key = "6180_104A9C00"; // String

pub const KEY_WLAN_IP: &Key = "6180_104AB700"; // String
pub const KEY_WLAN_DNS_IP: &Key = "6180_104ABA00"; // String
pub const KEY_WLAN_NETMASK: &Key = "6180_104AB800"; // String
pub const KEY_WLAN_GATEWAY_IP: &Key = "6180_104AB900"; // String
pub const KEY_WLAN_STRENGTH: &Key = "6100_004AB600"; // percentage

pub const KEY_DEVICE_WARNING: &Key = "6100_00411F00";
pub const KEY_DEVICE_ERROR: &Key = "6100_00412000";
pub const KEY_DEVICE_OK: &Key = "6100_00411E00"; // Gives nominal power (W) if ok
