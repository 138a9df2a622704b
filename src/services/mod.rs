pub mod logger;
pub mod params;
