pub mod branch;
pub mod coordinates;
pub mod finder;
