// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

use {
    crate::{runner::fake::FakeRunner, ExitCode},
    std::{fs, io, path::PathBuf},
};

/// List the serial numbers reported by nrfjprog.
#[test]
fn probe_lists_serial_numbers() {
    let workspace = Workspace::new();
    let mut runner = FakeRunner::new(|_| Ok((0, "1050012345\n683000111\n".to_string())));
    let output = workspace.test(&mut runner, ["probe"]);
    assert_eq!(output.exit_code, ExitCode(0));
    assert_eq!(output.stdout, "1050012345\n683000111\n");
    assert!(output.stderr.is_empty());
    assert_eq!(runner.command_lines(), ["test-nrfjprog --ids"]);
}

/// No debugger attached is only a warning.
#[test]
fn probe_without_debuggers() {
    let workspace = Workspace::new();
    let mut runner = FakeRunner::succeeding();
    let output = workspace.test(&mut runner, ["probe"]);
    assert_eq!(output.exit_code, ExitCode(0));
    assert!(output.stdout.is_empty());
}

/// Build both cores of the broadcast source with the tools from the config file.
#[test]
fn broadcast_source_both_cores() {
    let workspace = Workspace::new();
    let mut runner = FakeRunner::succeeding();
    let output = workspace.test(&mut runner, ["broadcast-source", "--core", "both", "-p"]);
    assert_eq!(output.exit_code, ExitCode(0));
    assert!(output.stderr.is_empty());

    let lines = runner.command_lines();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("test-west build -b nrf5340_audio_dk_nrf5340_cpuapp"));
    assert!(lines[2].starts_with("test-west flash --build-dir"));
    assert!(lines[3].starts_with("test-west build "));
    assert!(lines[3].contains("hci_rpmsg"));
    assert!(lines[4].ends_with("build_net"));
    assert_eq!(
        runner.calls[1].current_dir.as_deref(),
        Some(workspace.samples().join("broadcast_audio_source").as_path())
    );
}

/// A failing build exits with 1 and reports the tool's exit code.
#[test]
fn build_failure_is_reported() {
    let workspace = Workspace::new();
    let mut runner = FakeRunner::new(|cmd| {
        let code = if cmd.program == "test-west" { 2 } else { 0 };
        Ok((code, String::new()))
    });
    let output = workspace.test(&mut runner, ["iso-attack", "--dongle", "-p", "-b"]);
    assert_eq!(output.exit_code, ExitCode(1));
    assert!(output.stderr.contains("error:"));
    assert!(output.stderr.contains("exit code 2"));
    assert!(output.stderr.contains("nrf52840dongle_nrf52840"));
    assert_eq!(runner.calls.len(), 2);
}

/// A missing config file is fatal before any tool runs.
#[test]
fn missing_config_file() {
    let workspace = Workspace::new();
    let mut runner = FakeRunner::succeeding();
    let output = test(
        &mut runner,
        [
            "--config",
            workspace.dir.path().join("absent.toml").to_str().unwrap(),
            "probe",
        ],
    );
    assert_eq!(output.exit_code, ExitCode(1));
    assert!(output.stderr.contains("failed to read config file"));
    assert!(runner.calls.is_empty());
}

/// Unknown values are rejected by clap with its own formatting.
#[test]
fn invalid_core() {
    let mut runner = FakeRunner::succeeding();
    let output = test(&mut runner, ["broadcast-source", "--core", "all"]);
    assert_eq!(output.exit_code, ExitCode(2));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.contains("--core"));
    assert!(runner.calls.is_empty());
}

/// Help goes to stdout and is not an error.
#[test]
fn help() {
    let mut runner = FakeRunner::succeeding();
    let output = test(&mut runner, ["iso-attack", "--help"]);
    assert_eq!(output.exit_code, ExitCode(0));
    assert!(output.stdout.contains("--dongle"));
    assert!(output.stderr.is_empty());
}

/// The size report of a collected image is written to the injected stdout.
#[test]
fn binaries_report_image_size() {
    let workspace = Workspace::new();
    let mut runner = FakeRunner::new(|cmd| {
        if cmd.args.first().is_some_and(|a| a == "build") {
            let build_dir = PathBuf::from(cmd.args.last().unwrap());
            fs::create_dir_all(build_dir.join("zephyr")).unwrap();
            fs::write(
                build_dir.join("zephyr/zephyr.hex"),
                ":0400000001020304F2\n:00000001FF\n",
            )
            .unwrap();
        }
        Ok((0, String::new()))
    });
    let output = workspace.test(&mut runner, ["iso-attack", "-b"]);
    assert_eq!(output.exit_code, ExitCode(0));
    assert!(output.stdout.contains("mallory.hex size:"));
    assert!(output.stdout.contains("Bytes: 4 bytes"));
    assert!(output.stdout.contains("Range: 0x00000000..0x00000004"));
    assert!(workspace.samples().join("iso_attack/bin/mallory.hex").is_file());
}

/// Failing to print the error is fatal, like in any other CLI.
#[test]
#[should_panic(expected = "write error to stderr")]
fn unwritable_stderr() {
    let mut runner = FakeRunner::succeeding();
    crate::main_args(
        ["sample-builder", "--config", "/nonexistent/builder.toml", "probe"],
        &mut runner,
        io::sink(),
        BrokenPipe,
    );
}

/// `--verbose` lowers the default level, `RUST_LOG` overrides both.
#[test]
fn log_level_selection() {
    assert_eq!(crate::log_directives(false, None), "info");
    assert_eq!(crate::log_directives(true, None), "debug");
    assert_eq!(crate::log_directives(true, Some("")), "debug");
    assert_eq!(crate::log_directives(false, Some("  ")), "info");
    assert_eq!(crate::log_directives(false, Some("warn")), "warn");
    assert_eq!(
        crate::log_directives(true, Some("sample_builder=trace")),
        "sample_builder=trace"
    );
    assert_eq!(crate::log_filter(true, None).to_string(), "debug");
    assert_eq!(crate::log_filter(true, Some("warn")).to_string(), "warn");
}

struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Scratch samples folder with a config file pointing at it.
struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("samples")).unwrap();
        fs::write(
            dir.path().join("builder.toml"),
            "west = \"test-west\"\nnrfjprog = \"test-nrfjprog\"\nsamples_dir = \"samples\"\n",
        )
        .unwrap();
        Self { dir }
    }

    fn samples(&self) -> PathBuf {
        self.dir.path().join("samples")
    }

    fn test<const N: usize>(&self, runner: &mut FakeRunner, args: [&str; N]) -> Output {
        let config = self.dir.path().join("builder.toml");
        let config = config.to_str().unwrap().to_string();
        let args = ["--config", config.as_str()]
            .into_iter()
            .chain(args)
            .collect::<Vec<_>>();
        run_main(runner, &args)
    }
}

fn test<const N: usize>(runner: &mut FakeRunner, args: [&str; N]) -> Output {
    run_main(runner, &args)
}

fn run_main(runner: &mut FakeRunner, args: &[&str]) -> Output {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit_code = crate::main_args(
        std::iter::once("sample-builder").chain(args.iter().copied()),
        runner,
        &mut stdout,
        &mut stderr,
    );
    println!("* args: {:?}", args);
    println!("* exit_code: {:?}", exit_code);
    println!("* stdout:\n{}", String::from_utf8_lossy(&stdout));
    println!("* stderr:\n{}", String::from_utf8_lossy(&stderr));
    Output {
        exit_code,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
    }
}

#[derive(Debug)]
struct Output {
    exit_code: ExitCode,
    stdout: String,
    stderr: String,
}
