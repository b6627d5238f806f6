pub mod period;
pub mod series;
