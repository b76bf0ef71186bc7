use resgen_core::config::GeneratorConfig;
use resgen_core::error::EmitError;
use resgen_core::{Emitter, EmitterProvider, EmitterState};
use serde_json::{Value, json};

/// Renders the collected type tree as pretty-printed JSON.
pub struct SummaryEmitter {
    state: EmitterState,
    nested: Vec<SummaryEmitter>,
}

impl SummaryEmitter {
    fn summary(&self) -> Value {
        json!({
            "type": self.state.type_name(),
            "constants": self.state.constants(),
            "nested": self.nested.iter().map(SummaryEmitter::summary).collect::<Vec<_>>(),
        })
    }
}

impl Emitter for SummaryEmitter {
    fn file_extension(&self) -> &str {
        "json"
    }

    fn module_name(&self) -> &str {
        "summary"
    }

    fn state(&self) -> &EmitterState {
        &self.state
    }

    fn add_resource(&mut self, identifier: String, path: String) {
        self.state.push(identifier, path);
    }

    fn add_nested(&mut self, type_name: &str) -> &mut dyn Emitter {
        self.nested.push(SummaryEmitter {
            state: self.state.nested(type_name),
            nested: Vec::new(),
        });
        let last = self.nested.len() - 1;
        &mut self.nested[last]
    }

    fn build(&self) -> Result<String, EmitError> {
        serde_json::to_string_pretty(&self.summary()).map_err(|e| EmitError::Render {
            type_name: self.state.type_name().to_string(),
            message: e.to_string(),
        })
    }
}

pub struct SummaryProvider;

impl EmitterProvider for SummaryProvider {
    fn id(&self) -> &str {
        "summary"
    }

    fn module_name(&self) -> &str {
        "summary"
    }

    fn provide(&self, type_name: &str, _config: &GeneratorConfig) -> Box<dyn Emitter> {
        Box::new(SummaryEmitter {
            state: EmitterState::new(type_name),
            nested: Vec::new(),
        })
    }
}
