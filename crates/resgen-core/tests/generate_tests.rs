use std::fs;
use std::path::{Path, PathBuf};

use resgen_core::config::{GeneratorConfig, LineEnding};
use resgen_core::error::{EmitError, GenerateError, TreeError};
use resgen_core::roots::ResourceRoot;
use resgen_core::{Emitter, EmitterProvider, EmitterState, Generator};

/// Minimal emitter rendering an indented outline of the type tree.
struct OutlineEmitter {
    state: EmitterState,
    nested: Vec<OutlineEmitter>,
}

impl Emitter for OutlineEmitter {
    fn file_extension(&self) -> &str {
        "txt"
    }

    fn module_name(&self) -> &str {
        "outline"
    }

    fn state(&self) -> &EmitterState {
        &self.state
    }

    fn add_resource(&mut self, identifier: String, path: String) {
        self.state.push(identifier, path);
    }

    fn add_nested(&mut self, type_name: &str) -> &mut dyn Emitter {
        self.nested.push(OutlineEmitter {
            state: self.state.nested(type_name),
            nested: Vec::new(),
        });
        let last = self.nested.len() - 1;
        &mut self.nested[last]
    }

    fn build(&self) -> Result<String, EmitError> {
        let pad = self.state.indent();
        let mut out = format!("{pad}{} {{\n", self.state.type_name());
        for constant in self.state.constants() {
            out.push_str(&format!("{pad}\t{} = {}\n", constant.identifier, constant.path));
        }
        for nested in &self.nested {
            out.push_str(&nested.build()?);
        }
        out.push_str(&format!("{pad}}}\n"));
        Ok(out)
    }
}

struct OutlineProvider;

impl EmitterProvider for OutlineProvider {
    fn id(&self) -> &str {
        "outline"
    }

    fn module_name(&self) -> &str {
        "outline"
    }

    fn provide(&self, type_name: &str, _config: &GeneratorConfig) -> Box<dyn Emitter> {
        Box::new(OutlineEmitter {
            state: EmitterState::new(type_name),
            nested: Vec::new(),
        })
    }
}

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

fn config(output: &Path) -> GeneratorConfig {
    GeneratorConfig::builder()
        .package("generated.res")
        .unwrap()
        .class_name("Resources")
        .unwrap()
        .output_dir(output)
        .line_ending(LineEnding::Lf)
        .build()
}

#[test]
fn test_logo_and_icons_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let res = dir.path().join("main/res");
    touch(&res.join("logo.png"));
    touch(&res.join("icons/arrow.png"));

    let config = config(&dir.path().join("out"));
    let generator = Generator::new(&config, &OutlineProvider);
    let file = generator
        .render(&ResourceRoot::with_module(&res, ""))
        .unwrap()
        .unwrap();

    assert_eq!(
        file.path,
        PathBuf::from("outline/generated/res/Resources.txt")
    );
    assert_eq!(
        file.content,
        "Resources {\n\
         \tLOGO = res/logo.png\n\
         \tIcons {\n\
         \t\tARROW = res/icons/arrow.png\n\
         \t}\n\
         }\n"
    );
}

#[test]
fn test_type_name_from_module() {
    let config = GeneratorConfig::default();
    let generator = Generator::new(&config, &OutlineProvider);
    assert_eq!(
        generator.type_name(&ResourceRoot::new("app/src/main/resources")),
        "MainResources"
    );
    assert_eq!(
        generator.type_name(&ResourceRoot::with_module("x", "web_app")),
        "WebAppResources"
    );
}

#[test]
fn test_collisions_resolved_in_listing_order() {
    let dir = tempfile::tempdir().unwrap();
    let resources = dir.path().join("main/resources");
    touch(&resources.join("icon.png"));
    touch(&resources.join("icon.svg"));

    let config = config(&dir.path().join("out"));
    let file = Generator::new(&config, &OutlineProvider)
        .render(&ResourceRoot::new(&resources))
        .unwrap()
        .unwrap();

    assert!(file.content.contains("\tICON = icon.png\n"));
    assert!(file.content.contains("\tICON_SVG = icon.svg\n"));
}

#[test]
fn test_sibling_directories_with_same_type_name() {
    let dir = tempfile::tempdir().unwrap();
    let resources = dir.path().join("main/resources");
    touch(&resources.join("sub-dir/a.txt"));
    touch(&resources.join("sub_dir/b.txt"));

    let config = config(&dir.path().join("out"));
    let file = Generator::new(&config, &OutlineProvider)
        .render(&ResourceRoot::new(&resources))
        .unwrap()
        .unwrap();

    assert!(file.content.contains("\tSubDir {\n\t\tA = sub-dir/a.txt\n\t}\n"));
    assert!(file.content.contains("\tSubDir2 {\n\t\tB = sub_dir/b.txt\n\t}\n"));
}

#[test]
fn test_nested_directory_named_like_enclosing_type() {
    let dir = tempfile::tempdir().unwrap();
    let resources = dir.path().join("main/resources");
    touch(&resources.join("icons/icons/a.png"));

    let config = config(&dir.path().join("out"));
    let file = Generator::new(&config, &OutlineProvider)
        .render(&ResourceRoot::new(&resources))
        .unwrap()
        .unwrap();

    assert_eq!(
        file.content,
        "MainResources {\n\
         \tIcons {\n\
         \t\tIcons2 {\n\
         \t\t\tA = icons/icons/a.png\n\
         \t\t}\n\
         \t}\n\
         }\n"
    );
}

#[test]
fn test_constant_does_not_reuse_nested_type_name() {
    let dir = tempfile::tempdir().unwrap();
    let resources = dir.path().join("main/resources");
    touch(&resources.join("A/x.txt"));
    touch(&resources.join("a.txt"));

    let config = config(&dir.path().join("out"));
    let file = Generator::new(&config, &OutlineProvider)
        .render(&ResourceRoot::new(&resources))
        .unwrap()
        .unwrap();

    assert!(file.content.contains("\tA {\n"));
    assert!(file.content.contains("\tA_TXT = a.txt\n"));
}

#[test]
fn test_keep_extension() {
    let dir = tempfile::tempdir().unwrap();
    let resources = dir.path().join("main/resources");
    touch(&resources.join("my-file.v2.png"));

    let config = GeneratorConfig::builder()
        .keep_extension(true)
        .output_dir(dir.path().join("out"))
        .build();
    let file = Generator::new(&config, &OutlineProvider)
        .render(&ResourceRoot::new(&resources))
        .unwrap()
        .unwrap();

    assert!(file.content.contains("\tMY_FILE_V2_PNG = my-file.v2.png\n"));
}

#[test]
fn test_empty_root_generates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let resources = dir.path().join("main/resources");
    fs::create_dir_all(&resources).unwrap();
    let out = dir.path().join("out");

    let config = config(&out);
    let report = Generator::new(&config, &OutlineProvider).run(&[ResourceRoot::new(&resources)]);

    assert!(report.is_success());
    assert!(report.generated.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert!(!out.exists());
}

#[test]
fn test_nested_empty_directory_yields_empty_type() {
    let dir = tempfile::tempdir().unwrap();
    let resources = dir.path().join("main/resources");
    touch(&resources.join("a.txt"));
    fs::create_dir_all(resources.join("fonts")).unwrap();

    let config = config(&dir.path().join("out"));
    let file = Generator::new(&config, &OutlineProvider)
        .render(&ResourceRoot::new(&resources))
        .unwrap()
        .unwrap();

    assert!(file.content.contains("\tFonts {\n\t}\n"));
}

#[test]
fn test_missing_and_excluded_roots_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let test_resources = dir.path().join("src/test/resources");
    touch(&test_resources.join("fixture.json"));

    let mut excluded = ResourceRoot::new(&test_resources);
    excluded.source_set = Some("test".to_string());

    let config = GeneratorConfig::builder()
        .exclude(["test"])
        .output_dir(dir.path().join("out"))
        .build();
    let report = Generator::new(&config, &OutlineProvider).run(&[
        excluded,
        ResourceRoot::new(dir.path().join("src/main/resources")),
    ]);

    assert!(report.is_success());
    assert!(report.generated.is_empty());
    assert_eq!(report.skipped.len(), 2);
}

#[test]
fn test_run_writes_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let resources = dir.path().join("main/resources");
    touch(&resources.join("logo.png"));
    touch(&resources.join("icons/arrow.png"));
    let out = dir.path().join("out");

    let config = config(&out);
    let generator = Generator::new(&config, &OutlineProvider);
    let roots = [ResourceRoot::new(&resources)];

    let first = generator.run(&roots);
    assert_eq!(
        first.generated,
        vec![out.join("main/outline/generated/res/MainResources.txt")]
    );
    let before = fs::read(&first.generated[0]).unwrap();

    let second = generator.run(&roots);
    assert_eq!(second.generated, first.generated);
    assert_eq!(fs::read(&second.generated[0]).unwrap(), before);
}

#[test]
fn test_existing_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let resources = dir.path().join("main/resources");
    touch(&resources.join("logo.png"));
    let out = dir.path().join("out");
    let target = out.join("main/outline/generated/res/MainResources.txt");
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(&target, "stale contents that are longer than the new file").unwrap();

    let config = config(&out);
    Generator::new(&config, &OutlineProvider).run(&[ResourceRoot::new(&resources)]);

    let written = fs::read_to_string(&target).unwrap();
    assert_eq!(written, "MainResources {\n\tLOGO = logo.png\n}\n");
}

#[test]
fn test_failed_root_does_not_stop_others() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken/resources");
    touch(&broken);
    let resources = dir.path().join("main/resources");
    touch(&resources.join("logo.png"));

    let config = config(&dir.path().join("out"));
    let report = Generator::new(&config, &OutlineProvider)
        .run(&[ResourceRoot::new(&broken), ResourceRoot::new(&resources)]);

    assert!(!report.is_success());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].root.module, "broken");
    assert!(matches!(
        report.failures[0].error,
        GenerateError::Tree(TreeError::NotADirectory(_))
    ));
    assert_eq!(report.generated.len(), 1);
}

#[test]
fn test_crlf_line_endings() {
    let dir = tempfile::tempdir().unwrap();
    let resources = dir.path().join("main/resources");
    touch(&resources.join("logo.png"));

    let config = GeneratorConfig::builder()
        .output_dir(dir.path().join("out"))
        .line_ending(LineEnding::Crlf)
        .build();
    let report = Generator::new(&config, &OutlineProvider).run(&[ResourceRoot::new(&resources)]);

    let written = fs::read_to_string(&report.generated[0]).unwrap();
    assert_eq!(written, "MainResources {\r\n\tLOGO = logo.png\r\n}\r\n");
}

#[test]
fn test_unwritable_output_does_not_stop_others() {
    let dir = tempfile::tempdir().unwrap();
    let blocked = dir.path().join("blocked/resources");
    touch(&blocked.join("logo.png"));
    let resources = dir.path().join("main/resources");
    touch(&resources.join("logo.png"));
    let out = dir.path().join("out");
    // A file where the module's output directory should go.
    touch(&out.join("blocked"));

    let config = config(&out);
    let report = Generator::new(&config, &OutlineProvider)
        .run(&[ResourceRoot::new(&blocked), ResourceRoot::new(&resources)]);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].root.module, "blocked");
    assert!(matches!(
        report.failures[0].error,
        GenerateError::Write { .. }
    ));
    assert_eq!(
        report.generated,
        vec![out.join("main/outline/generated/res/MainResources.txt")]
    );
    assert!(report.generated[0].is_file());
}
