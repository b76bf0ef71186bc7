use resgen_core::config::GeneratorConfig;
use resgen_core::{Emitter, EmitterProvider};

use crate::emitter::KotlinEmitter;

/// Provides [`KotlinEmitter`]s, selected as `kotlin`.
pub struct KotlinProvider;

impl EmitterProvider for KotlinProvider {
    fn id(&self) -> &str {
        "kotlin"
    }

    fn module_name(&self) -> &str {
        "kotlin"
    }

    fn provide(&self, type_name: &str, config: &GeneratorConfig) -> Box<dyn Emitter> {
        Box::new(KotlinEmitter::new(type_name, config))
    }
}
