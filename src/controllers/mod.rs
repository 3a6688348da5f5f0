pub mod home_controller;
pub mod coins_controller;
pub mod alerts_controller;
pub mod realtime_controller;
