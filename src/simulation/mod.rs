pub mod chain;
pub mod energy;
pub mod engine;
pub mod half_life;
pub mod presets;
pub mod session;
