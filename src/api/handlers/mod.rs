pub mod debug;
pub mod health;
pub mod metrics;
pub mod positions;
pub mod summary;
