//! Set of command strings understood by the device

/// TCP port an ESC/VP.net device listens on
pub const DEFAULT_PORT: u16 = 3629;

/// Turn power on
pub const POWER_ON: &str = "PWR ON";

/// Put the device into standby
pub const POWER_OFF: &str = "PWR OFF";

/// Query power state
pub const POWER_QUERY: &str = "PWR?";

/// Query lamp hours
pub const LAMP_QUERY: &str = "LAMP?";

/// Switch input source (takes a source id argument)
pub const SOURCE: &str = "SOURCE";

/// Query active input source
pub const SOURCE_QUERY: &str = "SOURCE?";

/// Blank video and audio
pub const MUTE_ON: &str = "MUTE ON";

/// Restore video and audio
pub const MUTE_OFF: &str = "MUTE OFF";

/// Query blank state
pub const MUTE_QUERY: &str = "MUTE?";
