pub mod aggregate;
pub mod efficiency;
pub mod transform;
pub mod units;
