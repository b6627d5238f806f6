pub mod datetime;
pub mod net;
pub mod stats;
