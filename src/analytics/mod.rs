pub mod abc;
pub mod capital;
pub mod margin;
