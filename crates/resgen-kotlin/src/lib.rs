pub mod emitter;
pub mod generator;

pub use emitter::KotlinEmitter;
pub use generator::KotlinProvider;
