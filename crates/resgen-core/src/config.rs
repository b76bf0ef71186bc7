use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::naming;
use crate::roots::ResourceRoot;

/// Project configuration as written in `.resgen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResgenConfig {
    pub package: String,
    pub class_name: String,
    pub keep_extension: bool,
    /// Source sets that never generate.
    pub exclude: Vec<String>,
    pub emitter: String,
    /// Fully-qualified name of the runtime interface every constant implements.
    pub contract: String,
    pub output: PathBuf,
    pub root_marker: String,
    pub line_ending: LineEnding,
    /// Explicit resource roots. When empty, `src/*/resources` is discovered.
    pub roots: Vec<RootEntry>,
}

impl Default for ResgenConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            class_name: DEFAULT_CLASS_NAME.to_string(),
            keep_extension: false,
            exclude: Vec::new(),
            emitter: DEFAULT_EMITTER.to_string(),
            contract: DEFAULT_CONTRACT.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            root_marker: DEFAULT_ROOT_MARKER.to_string(),
            line_ending: LineEnding::Native,
            roots: Vec::new(),
        }
    }
}

impl ResgenConfig {
    /// Validate the file values into a [`GeneratorConfig`].
    pub fn into_generator_config(self) -> Result<GeneratorConfig, ConfigError> {
        Ok(GeneratorConfig::builder()
            .package(self.package)?
            .class_name(self.class_name)?
            .contract(self.contract)?
            .keep_extension(self.keep_extension)
            .exclude(self.exclude)
            .emitter(self.emitter)
            .output_dir(self.output)
            .root_marker(self.root_marker)
            .line_ending(self.line_ending)
            .build())
    }

    /// Explicitly configured roots, resolved against `base`.
    pub fn resource_roots(&self, base: &Path) -> Vec<ResourceRoot> {
        self.roots
            .iter()
            .map(|entry| {
                let mut root = match &entry.module {
                    Some(module) => ResourceRoot::with_module(base.join(&entry.path), module),
                    None => ResourceRoot::new(base.join(&entry.path)),
                };
                root.source_set = entry.source_set.clone();
                root
            })
            .collect()
    }
}

/// One explicitly configured resource root.
#[derive(Debug, Clone, Deserialize)]
pub struct RootEntry {
    pub path: PathBuf,
    /// Defaults to the name of the root's parent directory.
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub source_set: Option<String>,
}

/// Line terminator of written files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    #[default]
    Native,
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Native if cfg!(windows) => "\r\n",
            LineEnding::Native | LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    /// Convert `\n`-terminated text to this line ending.
    pub fn apply(self, text: &str) -> String {
        match self.as_str() {
            "\n" => text.to_string(),
            terminator => text.replace('\n', terminator),
        }
    }
}

/// Validated settings shared by every component of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    package: String,
    class_name: String,
    keep_extension: bool,
    excluded_source_sets: BTreeSet<String>,
    emitter: String,
    contract: String,
    output_dir: PathBuf,
    root_marker: String,
    line_ending: LineEnding,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            class_name: DEFAULT_CLASS_NAME.to_string(),
            keep_extension: false,
            excluded_source_sets: BTreeSet::new(),
            emitter: DEFAULT_EMITTER.to_string(),
            contract: DEFAULT_CONTRACT.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT),
            root_marker: DEFAULT_ROOT_MARKER.to_string(),
            line_ending: LineEnding::Native,
        }
    }
}

impl GeneratorConfig {
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder {
            config: GeneratorConfig::default(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Package as a relative directory path (`a.b.c` → `a/b/c`).
    pub fn package_path(&self) -> PathBuf {
        self.package.split('.').collect()
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn keep_extension(&self) -> bool {
        self.keep_extension
    }

    pub fn is_excluded(&self, source_set: &str) -> bool {
        self.excluded_source_sets.contains(source_set)
    }

    pub fn emitter(&self) -> &str {
        &self.emitter
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn root_marker(&self) -> &str {
        &self.root_marker
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}

/// Builds a [`GeneratorConfig`], rejecting invalid names as they are set.
#[derive(Debug, Clone)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    pub fn package(mut self, package: impl Into<String>) -> Result<Self, ConfigError> {
        let package = package.into();
        if !naming::is_valid_package(&package) {
            return Err(ConfigError::InvalidPackage(package));
        }
        self.config.package = package;
        Ok(self)
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Result<Self, ConfigError> {
        let class_name = class_name.into();
        if !naming::is_valid_class_name(&class_name) {
            return Err(ConfigError::InvalidClassName(class_name));
        }
        self.config.class_name = class_name;
        Ok(self)
    }

    pub fn contract(mut self, contract: impl Into<String>) -> Result<Self, ConfigError> {
        let contract = contract.into();
        if !naming::is_valid_qualified_name(&contract) {
            return Err(ConfigError::InvalidContract(contract));
        }
        self.config.contract = contract;
        Ok(self)
    }

    pub fn keep_extension(mut self, keep: bool) -> Self {
        self.config.keep_extension = keep;
        self
    }

    pub fn exclude<I, S>(mut self, source_sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .excluded_source_sets
            .extend(source_sets.into_iter().map(Into::into));
        self
    }

    pub fn emitter(mut self, emitter: impl Into<String>) -> Self {
        self.config.emitter = emitter.into();
        self
    }

    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = output_dir.into();
        self
    }

    pub fn root_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.root_marker = marker.into();
        self
    }

    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.config.line_ending = line_ending;
        self
    }

    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}

pub const DEFAULT_PACKAGE: &str = "generated.resgen";
pub const DEFAULT_CLASS_NAME: &str = "Resources";
pub const DEFAULT_EMITTER: &str = "java";
pub const DEFAULT_CONTRACT: &str = "resgen.api.Resource";
pub const DEFAULT_OUTPUT: &str = "build/generated/sources/resgen";
pub const DEFAULT_ROOT_MARKER: &str = "resources";

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".resgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ResgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# resgen configuration
package: generated.resgen
class_name: Resources     # suffix of every generated type, e.g. MainResources
keep_extension: false     # LOGO vs LOGO_PNG
emitter: java             # java | kotlin
contract: resgen.api.Resource
output: build/generated/sources/resgen
root_marker: resources    # resource paths are relative to this directory
line_ending: native       # native | lf | crlf

exclude: []
  # - test

roots: []                 # empty = every src/<source-set>/resources
  # - path: assets
  #   module: app
"#
}
