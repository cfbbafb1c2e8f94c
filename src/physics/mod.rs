pub mod decay_mode;
pub mod elements;
pub mod isotopes;
pub mod nucleus;
pub mod particle;
