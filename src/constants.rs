// Host-side constants: file layout and back-office messaging.

// Config directory layout below the user's home
pub const CONFIG_SUBDIRS: [&str; 3] = ["AppData", "LocalLow", "Varonia"];
pub const CONFIG_DIR_ENV: &str = "VARONIA_CONFIG_DIR"; // overrides the whole directory
pub const SPATIAL_FILE: &str = "NewSpatial.json";
pub const GLOBAL_CONFIG_FILE: &str = "GlobalConfig.json";

// Messaging
pub const DEFAULT_BROKER_HOST: &str = "localhost";
pub const DEFAULT_BROKER_PORT: u16 = 1883;
pub const CLIENT_ID_PREFIX: &str = "Varonia_"; // broker client id is prefix + device id
pub const BACK_OFFICE_DEVICE_ID: i32 = 0; // messages always target the back office
