//! End-to-end runs of the `logpipe-ctl` binary against temporary
//! pipeline documents and a directory-backed secret store.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const PIPELINE: &str = r#"
input:
  label:
    app: nginx
filter:
  - type: parser
    name: access-log
    parameters:
      - name: format
        value: nginx
output:
  - type: elasticsearch
    name: es
    parameters:
      - name: host
        value: es.logging.svc
      - name: user
        valueFrom:
          secretKeyRef:
            name: es-cred
            key: user
      - name: password
        valueFrom:
          secretKeyRef:
            name: es-cred
            key: password
"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("home")).unwrap();
        let secrets = dir.path().join("secrets/logging");
        fs::create_dir_all(&secrets).unwrap();
        // "elastic" / "s3cr3t"
        fs::write(
            secrets.join("es-cred.yaml"),
            "data:\n  user: ZWxhc3RpYw==\n  password: czNjcjN0\n",
        )
        .unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, contents: &str) -> String {
        let path = self.path().join(name);
        fs::write(&path, contents).unwrap();
        path.display().to_string()
    }

    fn secrets_dir(&self) -> String {
        self.path().join("secrets").display().to_string()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_logpipe-ctl"))
            .args(args)
            .current_dir(self.path())
            .env("HOME", self.path().join("home"))
            .env_remove("LOGPIPE_CONFIG")
            .env_remove("LOGPIPE_NAMESPACE")
            .env_remove("LOGPIPE_SECRETS_DIR")
            .env("RUST_LOG", "off")
            .output()
            .unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_render_pipeline_with_secret_store() {
    let ws = Workspace::new();
    let pipeline = ws.write("pipeline.yaml", PIPELINE);
    let secrets = ws.secrets_dir();

    let output = ws.run(&[
        "render",
        &pipeline,
        "--namespace",
        "logging",
        "--secrets-dir",
        &secrets,
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let config = stdout(&output);
    assert!(config.starts_with("<filter nginx.**>"), "{config}");
    assert!(config.contains("@type nginx"));
    assert!(config.contains("<match nginx.**>"));
    assert!(config.contains("host es.logging.svc"));
    assert!(config.contains("user elastic"));
    assert!(config.contains("password s3cr3t"));
    assert!(config.find("</filter>").unwrap() < config.find("<match").unwrap());
}

#[test]
fn test_render_pipeline_as_json() {
    let ws = Workspace::new();
    let pipeline = ws.write("pipeline.yaml", PIPELINE);
    let secrets = ws.secrets_dir();

    let output = ws.run(&[
        "render",
        &pipeline,
        "--namespace",
        "logging",
        "--secrets-dir",
        &secrets,
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let sections = json["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["kind"], "filter");
    assert_eq!(sections[0]["name"], "access-log");
    assert_eq!(sections[1]["kind"], "output");
    assert_eq!(sections[1]["plugin_type"], "elasticsearch");
}

#[test]
fn test_missing_secret_degrades_by_default() {
    let ws = Workspace::new();
    let pipeline = ws.write("pipeline.yaml", PIPELINE);
    let secrets = ws.secrets_dir();

    // Wrong namespace: every lookup misses.
    let output = ws.run(&["render", &pipeline, "--secrets-dir", &secrets]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let config = stdout(&output);
    assert!(config.contains("  user \n"), "{config}");
    assert!(!config.contains("s3cr3t"));
}

#[test]
fn test_missing_secret_fails_when_asked() {
    let ws = Workspace::new();
    let pipeline = ws.write("pipeline.yaml", PIPELINE);
    let secrets = ws.secrets_dir();

    let output = ws.run(&[
        "render",
        &pipeline,
        "--secrets-dir",
        &secrets,
        "--on-secret-error",
        "fail",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("es-cred"), "{}", stderr(&output));
}

#[test]
fn test_unknown_plugin_type_fails() {
    let ws = Workspace::new();
    let plugin = ws.write("plugin.yaml", "type: kafka\nname: broker\n");

    let output = ws.run(&["plugin", &plugin]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("kafka"), "{}", stderr(&output));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_plugin_with_base_context() {
    let ws = Workspace::new();
    let plugin = ws.write("plugin.yaml", "type: stdout\nname: debug\n");

    let output = ws.run(&["plugin", &plugin, "--set", "pattern=payments"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "<match payments.**>\n  @type stdout\n</match>\n"
    );
}

#[test]
fn test_template_dir_overrides_builtin() {
    let ws = Workspace::new();
    let templates = ws.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("stdout.tera"), "custom {{ pattern }}\n").unwrap();
    let plugin = ws.write("plugin.yaml", "type: stdout\n");
    let templates = templates.display().to_string();

    let output = ws.run(&[
        "plugin",
        &plugin,
        "--template-dir",
        &templates,
        "--set",
        "pattern=app",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "custom app\n");
}

#[test]
fn test_config_file_is_discovered() {
    let ws = Workspace::new();
    let secrets = ws.secrets_dir();
    ws.write(
        ".logpipe.toml",
        &format!("namespace = \"logging\"\nsecrets-dir = \"{secrets}\"\n"),
    );
    let pipeline = ws.write("pipeline.yaml", PIPELINE);

    let output = ws.run(&["render", &pipeline]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("password s3cr3t"));
}

#[test]
fn test_list_templates() {
    let ws = Workspace::new();

    let output = ws.run(&["templates"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let listing = stdout(&output);
    for plugin_type in ["elasticsearch", "forward", "gcs", "parser", "s3", "stdout"] {
        assert!(listing.contains(plugin_type), "{listing}");
    }
    assert!(listing.contains("builtin"));
}
