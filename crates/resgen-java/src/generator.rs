use resgen_core::config::GeneratorConfig;
use resgen_core::{Emitter, EmitterProvider};

use crate::emitter::JavaEmitter;

/// Provides [`JavaEmitter`]s, selected as `java`.
pub struct JavaProvider;

impl EmitterProvider for JavaProvider {
    fn id(&self) -> &str {
        "java"
    }

    fn module_name(&self) -> &str {
        "java"
    }

    fn provide(&self, type_name: &str, config: &GeneratorConfig) -> Box<dyn Emitter> {
        Box::new(JavaEmitter::new(type_name, config))
    }
}
