pub mod implementations;
pub mod optimization;
pub mod shock;
pub mod traits;
