use std::fs;
use std::path::{Path, PathBuf};

use crate::GeneratedFile;
use crate::config::GeneratorConfig;
use crate::emitter::{Emitter, EmitterProvider};
use crate::error::GenerateError;
use crate::naming;
use crate::roots::ResourceRoot;
use crate::tree::ResourceNode;

/// Drives one generation run over a set of resource roots.
pub struct Generator<'a> {
    config: &'a GeneratorConfig,
    provider: &'a dyn EmitterProvider,
}

/// Outcome of [`Generator::run`].
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Written files, joined onto the output directory.
    pub generated: Vec<PathBuf>,
    /// Roots that were missing, empty or excluded.
    pub skipped: Vec<ResourceRoot>,
    pub failures: Vec<RootFailure>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A root whose generation failed. Other roots are unaffected.
#[derive(Debug)]
pub struct RootFailure {
    pub root: ResourceRoot,
    pub error: GenerateError,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a GeneratorConfig, provider: &'a dyn EmitterProvider) -> Self {
        Self { config, provider }
    }

    /// Name of the outer type generated for `root`, e.g. `MainResources`.
    pub fn type_name(&self, root: &ResourceRoot) -> String {
        naming::type_name(&format!(
            "{}{}",
            naming::capitalize(&root.module),
            self.config.class_name()
        ))
    }

    /// Generate and write every root, isolating per-root failures.
    pub fn run(&self, roots: &[ResourceRoot]) -> GenerationReport {
        let mut report = GenerationReport::default();

        for root in roots {
            let outcome = self
                .render(root)
                .and_then(|file| file.map(|f| self.write(&f)).transpose());

            match outcome {
                Ok(Some(path)) => {
                    log::info!("wrote {}", path.display());
                    report.generated.push(path);
                }
                Ok(None) => report.skipped.push(root.clone()),
                Err(error) => {
                    log::error!("failed to generate {}: {error}", root.path.display());
                    report.failures.push(RootFailure {
                        root: root.clone(),
                        error,
                    });
                }
            }
        }

        report
    }

    /// Render the file for one root without writing it.
    ///
    /// Returns `None` when the root is excluded, missing or has no entries.
    pub fn render(&self, root: &ResourceRoot) -> Result<Option<GeneratedFile>, GenerateError> {
        if let Some(source_set) = &root.source_set
            && self.config.is_excluded(source_set)
        {
            log::debug!("source set {source_set} is excluded");
            return Ok(None);
        }
        if !root.path.exists() {
            log::debug!("{} does not exist", root.path.display());
            return Ok(None);
        }

        let tree = ResourceNode::scan(&root.path)?;
        if tree.is_empty() {
            log::warn!("{} is empty, nothing to generate", root.path.display());
            return Ok(None);
        }

        let type_name = self.type_name(root);
        let base = canonical_base(&root.path, self.config.root_marker());
        let mut emitter = self.provider.provide(&type_name, self.config);
        self.collect(tree.children(), emitter.as_mut(), base)?;

        log::debug!(
            "{type_name}: {} resources from {}",
            tree.resource_count(),
            root.path.display()
        );

        let path = Path::new(&root.module)
            .join(emitter.module_name())
            .join(self.config.package_path())
            .join(format!("{type_name}.{}", emitter.file_extension()));

        Ok(Some(GeneratedFile {
            path,
            content: emitter.build()?,
        }))
    }

    /// Write `file` below the output directory, replacing any existing file.
    pub fn write(&self, file: &GeneratedFile) -> Result<PathBuf, GenerateError> {
        let path = self.config.output_dir().join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GenerateError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut content = file.content.clone();
        if !content.ends_with('\n') {
            content.push('\n');
        }
        fs::write(&path, self.config.line_ending().apply(&content)).map_err(|source| {
            GenerateError::Write {
                path: path.clone(),
                source,
            }
        })?;

        Ok(path)
    }

    fn collect(
        &self,
        nodes: &[ResourceNode],
        emitter: &mut dyn Emitter,
        base: &Path,
    ) -> Result<(), GenerateError> {
        for node in nodes {
            match node {
                ResourceNode::Resource { path } => {
                    let file_name = node.name();
                    let name = naming::constant_name(&file_name, self.config.keep_extension());
                    let (identifier, collides) =
                        naming::resolve_collision(name.clone(), &file_name, |n| {
                            emitter.contains(n)
                        });

                    if identifier != name {
                        log::warn!(
                            "{} collides with {name} in {}, using {identifier}",
                            path.display(),
                            emitter.state().type_name()
                        );
                    }
                    if collides {
                        log::warn!(
                            "{identifier} is still taken in {}, the generated type will not compile",
                            emitter.state().type_name()
                        );
                    }

                    emitter.add_resource(identifier, canonical_path(path, base)?);
                }
                ResourceNode::Container { path, children } => {
                    let name = naming::type_name(&node.name());
                    let state = emitter.state();
                    let type_name = naming::resolve_type_collision(name.clone(), |n| {
                        !state.is_nested_name_free(n)
                    });

                    if type_name != name {
                        log::warn!(
                            "{} collides with type {name} in {}, using {type_name}",
                            path.display(),
                            state.type_name()
                        );
                    }

                    let nested = emitter.add_nested(&type_name);
                    self.collect(children, nested, base)?;
                }
            }
        }
        Ok(())
    }
}

/// Directory canonical paths are relative to: the nearest ancestor of `root`
/// (itself included) named `marker`, otherwise the parent of `root`.
pub fn canonical_base<'p>(root: &'p Path, marker: &str) -> &'p Path {
    root.ancestors()
        .find(|dir| dir.file_name().is_some_and(|name| name == marker))
        .or_else(|| root.parent())
        .unwrap_or(root)
}

/// `path` relative to `base`, `/`-separated regardless of platform.
pub fn canonical_path(path: &Path, base: &Path) -> Result<String, GenerateError> {
    let relative = path
        .strip_prefix(base)
        .map_err(|_| GenerateError::OutsideRoot {
            path: path.to_path_buf(),
        })?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}
