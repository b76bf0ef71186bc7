use minijinja::{Environment, context};
use resgen_core::config::GeneratorConfig;
use resgen_core::error::EmitError;
use resgen_core::{Emitter, EmitterState};

const TEMPLATE: &str = "enum.java.j2";

/// Escape a value for use inside a Java string literal.
///
/// Control characters use octal escapes. `\uXXXX` is translated before the
/// source is tokenized, so `\u000a` would still end the literal.
fn escape_literal(value: String) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\{:03o}", u32::from(c))),
            c => escaped.push(c),
        }
    }
    escaped
}

fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("escape_literal", escape_literal);
    env.add_template(TEMPLATE, include_str!("../templates/enum.java.j2"))?;
    Ok(env)
}

/// Emits a Java `enum` whose constants implement the resource contract.
/// Nested types become nested enums.
#[derive(Debug)]
pub struct JavaEmitter {
    state: EmitterState,
    package: String,
    contract: String,
    nested: Vec<JavaEmitter>,
}

impl JavaEmitter {
    pub fn new(type_name: &str, config: &GeneratorConfig) -> Self {
        Self {
            state: EmitterState::new(type_name),
            package: config.package().to_string(),
            contract: config.contract().to_string(),
            nested: Vec::new(),
        }
    }

    fn render_error(&self, err: minijinja::Error) -> EmitError {
        EmitError::Render {
            type_name: self.state.type_name().to_string(),
            message: err.to_string(),
        }
    }
}

impl Emitter for JavaEmitter {
    fn file_extension(&self) -> &str {
        "java"
    }

    fn module_name(&self) -> &str {
        "java"
    }

    fn state(&self) -> &EmitterState {
        &self.state
    }

    fn add_resource(&mut self, identifier: String, path: String) {
        self.state.push(identifier, path);
    }

    fn add_nested(&mut self, type_name: &str) -> &mut dyn Emitter {
        log::debug!("{} > {type_name}", self.state.type_name());
        self.nested.push(JavaEmitter {
            state: self.state.nested(type_name),
            package: self.package.clone(),
            contract: self.contract.clone(),
            nested: Vec::new(),
        });
        let last = self.nested.len() - 1;
        &mut self.nested[last]
    }

    fn build(&self) -> Result<String, EmitError> {
        let env = environment().map_err(|e| self.render_error(e))?;
        self.render(&env)
    }
}

impl JavaEmitter {
    /// Render this type and its nested types with one template environment.
    fn render(&self, env: &Environment<'_>) -> Result<String, EmitError> {
        let nested = self
            .nested
            .iter()
            .map(|emitter| emitter.render(env))
            .collect::<Result<Vec<_>, _>>()?;

        let tmpl = env.get_template(TEMPLATE).map_err(|e| self.render_error(e))?;

        tmpl.render(context! {
            package => self.state.is_top_level().then_some(&self.package),
            pad => self.state.indent(),
            name => self.state.type_name(),
            contract => &self.contract,
            constants => self.state.constants(),
            nested => nested,
        })
        .map_err(|e| self.render_error(e))
    }
}
