// src/app.rs
// =============================================================================
// One complete run of the tool, from parsed options to exit code.
//
// What happens here:
// 1. Read the URL list (the only fatal error: file missing/unreadable)
// 2. Check every URL concurrently and wait for all of them
// 3. Write one line per URL, then optionally save JSON
// 4. Return the exit code (0 = run completed, 1 = could not read input)
//
// A DOWN url does NOT change the exit code. Neither does a failure to write
// the JSON file - that's reported as a warning.
//
// Output goes through the `out`/`err` writers instead of println! so tests
// can capture it. main.rs passes stdout and stderr.
// =============================================================================

use colored::Colorize;
use std::io::Write;
use tracing::debug;

use crate::checker::Checker;
use crate::cli::Cli;
use crate::dispatch::Dispatcher;
use crate::input;
use crate::report::{self, ConsoleStyle};

// Runs all checks described by `cli` and returns the process exit code
pub async fn run<O, E>(cli: &Cli, out: &mut O, err: &mut E) -> i32
where
    O: Write,
    E: Write,
{
    let color = !cli.no_color;

    let urls = match input::read_urls(&cli.file) {
        Ok(urls) => urls,
        Err(e) => {
            // {:#} prints the whole context chain: "could not open ...: No such file"
            let _ = writeln!(err, "{} {:#}", label("Error:", color, false), e);
            return 1;
        }
    };
    debug!(
        file = %cli.file.display(),
        urls = urls.len(),
        timeout_secs = cli.timeout,
        ssl = cli.ssl,
        "starting checks"
    );

    let checker = Checker::new(cli.timeout(), cli.ssl);
    let outcomes = Dispatcher::new(checker)
        .with_concurrency_limit(cli.concurrency_limit())
        .run_all(urls)
        .await;

    // Console output always comes first, even if saving fails later
    if let Err(e) = report::write_report(out, &outcomes, ConsoleStyle::new(color, cli.ssl)) {
        let _ = writeln!(err, "{} {}", label("Warning:", color, true), e);
    }

    if let Some(path) = &cli.output {
        match report::write_json(path, &outcomes) {
            Ok(()) => {
                let _ = writeln!(out, "\nResults saved to: {}", path.display());
            }
            Err(e) => {
                let _ = writeln!(err, "{} {:#}", label("Warning:", color, true), e);
            }
        }
    }

    0
}

// Red for errors, yellow for warnings
fn label(text: &str, color: bool, warning: bool) -> String {
    match (color, warning) {
        (false, _) => text.to_string(),
        (true, false) => text.red().to_string(),
        (true, true) => text.yellow().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use clap::Parser;
    use std::cell::RefCell;
    use std::io;
    use std::path::Path;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    // Both streams write into one buffer, so tests can check what came first
    #[derive(Clone, Default)]
    struct Transcript(Rc<RefCell<Vec<u8>>>);

    impl Write for Transcript {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Transcript {
        fn text(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    // Log lines end up here instead of stderr
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    async fn logs_for_run(verbose: bool, args: &[&str]) -> String {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let _guard = tracing::subscriber::set_default(crate::logging::subscriber(
            crate::logging::level_filter(verbose),
            false,
            move || writer.clone(),
        ));

        let (code, _, _) = run_captured(&cli(args)).await;
        assert_eq!(code, 0);
        logs.text()
    }

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["url-sentinel", "--no-color", "--timeout", "2"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn write_url_file(dir: &Path, urls: &[String]) -> String {
        let path = dir.join("urls.txt");
        std::fs::write(&path, urls.join("\n\n")).unwrap();
        path.display().to_string()
    }

    async fn run_captured(cli: &Cli) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(cli, &mut out, &mut err).await;
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_missing_input_file_exits_with_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt").display().to_string();

        let (code, out, err) = run_captured(&cli(&["--file", &missing])).await;

        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.starts_with("Error: could not open URL file"));
        assert!(err.contains("nope.txt"));
    }

    #[tokio::test]
    async fn test_down_urls_still_exit_zero() {
        let dir = tempfile::tempdir().unwrap();
        let refused = testing::unused_local_addr().await;
        let file = write_url_file(
            dir.path(),
            &[format!("http://{}/a", refused), format!("http://{}/b", refused)],
        );

        let (code, out, err) = run_captured(&cli(&["--file", &file])).await;

        assert_eq!(code, 0);
        assert_eq!(out.lines().filter(|l| l.starts_with("[DOWN]")).count(), 2);
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_failed_output_write_only_warns() {
        let dir = tempfile::tempdir().unwrap();
        let refused = testing::unused_local_addr().await;
        let file = write_url_file(
            dir.path(),
            &[format!("http://{}/a", refused), format!("http://{}/b", refused)],
        );
        let output = dir
            .path()
            .join("no-such-dir")
            .join("out.json")
            .display()
            .to_string();
        let cli = cli(&["--file", &file, "--output", &output]);

        let transcript = Transcript::default();
        let code = run(&cli, &mut transcript.clone(), &mut transcript.clone()).await;
        let text = transcript.text();

        assert_eq!(code, 0);
        let last_report_line = text.rfind("[DOWN]").unwrap();
        let warning = text.find("Warning: could not save results").unwrap();
        assert!(last_report_line < warning);
        assert_eq!(text.matches("[DOWN]").count(), 2);
        assert!(!text.contains("Results saved to"));
    }

    #[tokio::test]
    async fn test_results_saved_after_report() {
        let dir = tempfile::tempdir().unwrap();
        let up = testing::spawn_http_server(200).await;
        let refused = testing::unused_local_addr().await;
        let up_url = format!("http://{}/", up);
        let file = write_url_file(dir.path(), &[up_url.clone(), format!("http://{}/", refused)]);
        let output = dir.path().join("out.json");
        let output_arg = output.display().to_string();

        let (code, out, err) = run_captured(&cli(&["--file", &file, "--output", &output_arg])).await;

        assert_eq!(code, 0);
        assert!(err.is_empty());
        let saved = out.find("Results saved to:").unwrap();
        assert!(out.find(&format!("[UP] {}", up_url)).unwrap() < saved);
        assert!(out.find("[DOWN]").unwrap() < saved);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .any(|e| e["url"] == up_url.as_str() && e["status"] == "UP" && e["code"] == 200));
    }

    #[tokio::test]
    async fn test_normal_run_logs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let refused = testing::unused_local_addr().await;
        let file = write_url_file(dir.path(), &[format!("http://{}/", refused)]);

        let logs = logs_for_run(false, &["--file", &file]).await;

        assert_eq!(logs, "");
    }

    #[tokio::test]
    async fn test_verbose_logs_are_plain_without_color() {
        let dir = tempfile::tempdir().unwrap();
        let refused = testing::unused_local_addr().await;
        let file = write_url_file(dir.path(), &[format!("http://{}/", refused)]);

        let logs = logs_for_run(true, &["--file", &file]).await;

        assert!(logs.contains("starting checks"));
        assert!(logs.contains("checks launched"));
        assert!(!logs.contains('\x1b'));
    }
}
