//! End-to-end project generation test.

use std::fs;

use scaffold::generator;

#[test]
fn generates_the_full_project_tree() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("widget");
    fs::create_dir_all(&project).unwrap();

    generator::generate(&project, "widget", "github.com/example").unwrap();

    let expected = [
        "README.md",
        ".gitignore",
        "Makefile",
        "Cargo.toml",
        "config.json",
        "src/config.rs",
        "src/handler.rs",
        "src/metrics.rs",
        "src/main.rs",
    ];
    for file in expected {
        assert!(project.join(file).is_file(), "{file} was not generated");
    }

    let readme = fs::read_to_string(project.join("README.md")).unwrap();
    assert!(readme.starts_with("# widget"));

    let makefile = fs::read_to_string(project.join("Makefile")).unwrap();
    assert!(makefile.contains("./target/release/widget"));

    let manifest = fs::read_to_string(project.join("Cargo.toml")).unwrap();
    assert!(manifest.contains(r#"name = "widget""#));
    assert!(manifest.contains("https://github.com/example/widget"));

    let config: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(project.join("config.json")).unwrap()).unwrap();
    assert_eq!(config["listen_port"], 10001);

    for file in ["src/main.rs", "src/handler.rs", "src/config.rs"] {
        let text = fs::read_to_string(project.join(file)).unwrap();
        assert!(!text.contains("{{"), "unsubstituted placeholder in {file}");
    }
}
