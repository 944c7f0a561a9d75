//! Human-readable run report.

use crate::registry::TestCase;
use crate::runner::{CaseResult, CaseStatus, Summary};
use colored::{ColoredString, Colorize};

fn paint(text: &str, enabled: bool, style: impl Fn(&str) -> ColoredString) -> String {
    if enabled {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Line announcing a case: `[i/n] name: description`.
pub fn format_banner(index: usize, total: usize, case: &TestCase, color: bool) -> String {
    let position = format!("[{}/{}]", index, total);
    format!(
        "{} {}: {}\n",
        paint(&position, color, |s| s.cyan()),
        paint(&case.name, color, |s| s.bold()),
        case.description
    )
}

/// Diagnostics and verdict of one case.
pub fn format_case(result: &CaseResult, color: bool) -> String {
    let mut output = String::new();

    for line in &result.diagnostics {
        output.push_str(&format!("    {}\n", line));
    }
    if let Some(message) = &result.panic {
        output.push_str(&format!("    panicked: {}\n", message));
    }

    let failures = plural(result.failures, "failure");
    let verdict = match result.status {
        CaseStatus::Passed => paint("ok", color, |s| s.green()),
        CaseStatus::Fixed => format!(
            "{} (listed as an expected failure)",
            paint("fixed", color, |s| s.green().bold())
        ),
        CaseStatus::Known => {
            format!("{} ({}, known)", paint("FAIL", color, |s| s.yellow()), failures)
        }
        CaseStatus::Pending => {
            format!("{} ({}, pending)", paint("FAIL", color, |s| s.yellow()), failures)
        }
        CaseStatus::Regression => {
            format!("{} ({})", paint("FAIL", color, |s| s.red().bold()), failures)
        }
    };
    output.push_str(&format!("  {}\n", verdict));
    output
}

/// Closing tally of a run.
pub fn format_summary(summary: &Summary, color: bool) -> String {
    let mut output = String::new();

    let status = if summary.success() {
        paint("PASS", color, |s| s.green().bold())
    } else {
        paint("FAIL", color, |s| s.red().bold())
    };
    output.push_str(&format!(
        "\n{}: {}, {} passed, {} failed ({} expected, {} regressions)\n",
        status,
        plural(summary.total(), "case"),
        summary.passed,
        summary.failed,
        summary.expected_failures,
        summary.regressions
    ));

    if summary.fixed > 0 {
        let names: Vec<&str> = summary
            .cases
            .iter()
            .filter(|case| case.status == CaseStatus::Fixed)
            .map(|case| case.name.as_str())
            .collect();
        output.push_str(&format!(
            "  now passing, remove from expected failures: {}\n",
            names.join(", ")
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunnerConfig;
    use crate::diagnostic::{fail, Location};
    use crate::failures::{ExpectedFailures, FailureEntry};
    use crate::registry::TestRegistry;
    use crate::runner::run_all;

    fn report(registry: &TestRegistry, config: &RunnerConfig) -> String {
        let mut out = Vec::new();
        run_all(registry, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_layout() {
        let mut registry = TestRegistry::new();
        registry
            .register("dup_video", "2110-20 video on two paths", || 0)
            .unwrap();
        registry
            .register("audio_l24", "2110-30 stereo audio", || {
                fail(
                    "media[0].attribute[0] rtpmap.clock_rate",
                    "parsed is 44100, expected is 48000",
                    Location::new("tests/audio.rs", 12),
                );
                1
            })
            .unwrap();
        registry
            .register("ancillary", "2110-40 data", || 2)
            .unwrap();
        registry.register("jxsv", "2110-22 video", || 0).unwrap();

        let config = RunnerConfig::standard().with_expected_failures(ExpectedFailures {
            known: vec![],
            pending: vec![FailureEntry::new("ancillary"), FailureEntry::new("jxsv")],
        });

        insta::assert_snapshot!(report(&registry, &config), @r###"
        [1/4] dup_video: 2110-20 video on two paths
          ok
        [2/4] audio_l24: 2110-30 stereo audio
            tests/audio.rs:12: media[0].attribute[0] rtpmap.clock_rate failed: parsed is 44100, expected is 48000
          FAIL (1 failure)
        [3/4] ancillary: 2110-40 data
          FAIL (2 failures, pending)
        [4/4] jxsv: 2110-22 video
          fixed (listed as an expected failure)

        FAIL: 4 cases, 2 passed, 2 failed (1 expected, 1 regressions)
          now passing, remove from expected failures: jxsv
        "###);
    }

    #[test]
    fn test_panic_is_shown() {
        let mut registry = TestRegistry::new();
        registry
            .register("crash", "panics", || panic!("no media section"))
            .unwrap();

        insta::assert_snapshot!(report(&registry, &RunnerConfig::standard()), @r###"
        [1/1] crash: panics
            panicked: no media section
          FAIL (1 failure)

        FAIL: 1 case, 0 passed, 1 failed (0 expected, 1 regressions)
        "###);
    }

    #[test]
    fn test_color_report() {
        let mut registry = TestRegistry::new();
        registry.register("dup_video", "two paths", || 0).unwrap();
        registry.register("audio_l24", "stereo", || 1).unwrap();

        colored::control::set_override(true);
        let styled = report(&registry, &RunnerConfig::standard().with_color(true));
        let plain = report(&registry, &RunnerConfig::standard());
        let ok = "ok".green().to_string();
        let fail = "FAIL".red().bold().to_string();
        colored::control::unset_override();

        assert!(styled.contains("\u{1b}["));
        assert!(styled.contains(&ok));
        assert!(styled.contains(&fail));
        assert!(!plain.contains('\u{1b}'));
    }

    #[test]
    fn test_summary_pass() {
        let output = format_summary(&Summary::new(), false);
        assert!(output.contains("PASS: 0 cases"));
    }
}
