pub mod emitter;
pub mod generator;

pub use emitter::JavaEmitter;
pub use generator::JavaProvider;
