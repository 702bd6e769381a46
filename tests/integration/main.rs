//! Integration tests for relocheck

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    const EXPECTATIONS: &str = r#"
[tasks]
":compileKotlin" = "FROM_CACHE"
":jar" = "SUCCESS"
"#;

    const MATCHING_LOG: &str = "\
> Task :compileKotlin FROM-CACHE
> Task :jar

BUILD SUCCESSFUL in 2s
";

    const SURPLUS_LOG: &str = "\
> Task :compileKotlin FROM-CACHE
> Task :jar
> Task :inspectClassesForKotlinIC
";

    /// Command isolated from any user config file
    fn relocheck(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("relocheck");
        cmd.arg("--config").arg(temp.path().join("absent.toml"));
        cmd
    }

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        relocheck(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("survive relocating a checkout"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        relocheck(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("relocheck"));
    }

    #[test]
    fn expectations_prints_builtin_table() {
        let temp = TempDir::new().unwrap();
        relocheck(&temp)
            .arg("expectations")
            .assert()
            .success()
            .stdout(predicate::str::contains("\":compileKotlin\" = \"FROM_CACHE\""));
    }

    #[test]
    fn init_script_uses_env_overrides() {
        let temp = TempDir::new().unwrap();
        relocheck(&temp)
            .arg("init-script")
            .env("RELOCHECK_KOTLIN_VERSION", "1.4.10")
            .env("RELOCHECK_PLUGIN_MIRROR", "https://mirror.example.com")
            .assert()
            .success()
            .stdout(predicate::str::contains("def relocheckKotlinVersion = '1.4.10'"))
            .stdout(predicate::str::contains("maven { url 'https://mirror.example.com' }"));
    }

    #[test]
    fn verify_matching_log_passes() {
        let temp = TempDir::new().unwrap();
        let log = write(temp.path(), "build.log", MATCHING_LOG);
        let expect = write(temp.path(), "expect.toml", EXPECTATIONS);

        relocheck(&temp)
            .args(["verify", "--log"])
            .arg(&log)
            .arg("--expectations")
            .arg(&expect)
            .assert()
            .success()
            .stdout(predicate::str::contains("2 tasks match expectations"));
    }

    #[test]
    fn verify_surplus_task_fails() {
        let temp = TempDir::new().unwrap();
        let log = write(temp.path(), "build.log", SURPLUS_LOG);
        let expect = write(temp.path(), "expect.toml", EXPECTATIONS);
        let report = temp.path().join("report.json");

        relocheck(&temp)
            .args(["verify", "--log"])
            .arg(&log)
            .arg("--expectations")
            .arg(&expect)
            .arg("--report")
            .arg(&report)
            .assert()
            .failure()
            .stdout(predicate::str::contains(
                "unexpected task :inspectClassesForKotlinIC",
            ))
            .stderr(predicate::str::contains("does not match expectations"));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(json["passed"], false);
        assert_eq!(json["verification"]["surplus"][0], ":inspectClassesForKotlinIC");
    }

    #[test]
    fn verify_rejects_empty_expectations() {
        let temp = TempDir::new().unwrap();
        let log = write(temp.path(), "build.log", MATCHING_LOG);
        let expect = write(temp.path(), "expect.toml", "[tasks]\n");

        relocheck(&temp)
            .args(["verify", "--log"])
            .arg(&log)
            .arg("--expectations")
            .arg(&expect)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Expectation table is empty"));
    }

    #[test]
    fn run_requires_checkouts() {
        let temp = TempDir::new().unwrap();
        relocheck(&temp)
            .arg("run")
            .env_remove("RELOCHECK_ORIGINAL_DIR")
            .env_remove("RELOCHECK_RELOCATED_DIR")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Checkout not configured: original"));
    }

    #[test]
    fn run_rejects_identical_checkouts() {
        let temp = TempDir::new().unwrap();
        relocheck(&temp)
            .arg("run")
            .arg("--original")
            .arg(temp.path())
            .arg("--relocated")
            .arg(temp.path().join("."))
            .assert()
            .failure()
            .stderr(predicate::str::contains("resolve to the same location"));
    }

    #[cfg(unix)]
    mod fake_gradle {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        /// Stands in for `$GRADLE_HOME/bin/gradle`: checks the init script
        /// exists, answers `clean` quietly, and reports a fixed task list.
        const SCRIPT: &str = r#"#!/bin/sh
init=""
prev=""
for a in "$@"; do
  if [ "$prev" = "--init-script" ] && [ -z "$init" ]; then init="$a"; fi
  prev="$a"
done
if [ ! -f "$init" ]; then echo "init script missing" >&2; exit 2; fi
for a in "$@"; do
  if [ "$a" = "clean" ]; then echo "> Task :clean"; exit 0; fi
done
if [ -n "$FAKE_GRADLE_FAIL" ]; then echo "FAILURE: Build failed with an exception." >&2; exit 1; fi
mkdir -p .gradle
echo "> Task :compileKotlin FROM-CACHE"
echo "> Task :jar"
echo "BUILD SUCCESSFUL in 1s"
"#;

        struct Workspace {
            temp: TempDir,
        }

        impl Workspace {
            fn new() -> Self {
                let temp = TempDir::new().unwrap();
                let bin = temp.path().join("gradle-home").join("bin");
                std::fs::create_dir_all(&bin).unwrap();
                let gradle = write(&bin, "gradle", SCRIPT);
                std::fs::set_permissions(&gradle, std::fs::Permissions::from_mode(0o755))
                    .unwrap();

                for checkout in ["original", "relocated"] {
                    let dir = temp.path().join(checkout);
                    std::fs::create_dir_all(dir.join(".gradle")).unwrap();
                    write(&dir, "build.gradle", "plugins { id 'org.jetbrains.kotlin.jvm' }\n");
                }
                write(temp.path(), "expect.toml", EXPECTATIONS);
                Self { temp }
            }

            fn run(&self) -> Command {
                let root = self.temp.path();
                let mut cmd = relocheck(&self.temp);
                cmd.arg("run")
                    .arg("--original")
                    .arg(root.join("original"))
                    .arg("--relocated")
                    .arg(root.join("relocated"))
                    .arg("--gradle-home")
                    .arg(root.join("gradle-home"))
                    .arg("--cache-dir")
                    .arg(root.join("cache"))
                    .arg("--expectations")
                    .arg(root.join("expect.toml"))
                    .env_remove("FAKE_GRADLE_FAIL");
                cmd
            }
        }

        #[test]
        fn run_passes_with_matching_outcomes() {
            let ws = Workspace::new();
            ws.run()
                .assert()
                .success()
                .stdout(predicate::str::contains("build tool: Gradle"))
                .stdout(predicate::str::contains("[6/6] Verifying task outcomes"))
                .stdout(predicate::str::contains("Relocated build matches expectations"));

            assert!(ws.temp.path().join("cache").is_dir());
        }

        #[test]
        fn run_reports_mismatch() {
            let ws = Workspace::new();
            let expect = ws.temp.path().join("expect.toml");
            std::fs::write(
                &expect,
                "[tasks]\n\":compileKotlin\" = \"FROM_CACHE\"\n\":jar\" = \"UP_TO_DATE\"\n",
            )
            .unwrap();

            ws.run()
                .assert()
                .failure()
                .stdout(predicate::str::contains(":jar: expected UP_TO_DATE, got SUCCESS"));
        }

        #[test]
        fn build_failure_aborts_run() {
            let ws = Workspace::new();
            ws.run()
                .env("FAKE_GRADLE_FAIL", "1")
                .assert()
                .failure()
                .stdout(predicate::str::contains("Relocation check aborted"))
                .stderr(predicate::str::contains("Build failed in"));
        }
    }
}
