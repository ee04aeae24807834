use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use resgraph::engine::progress::{Progress, ProgressCallback};
use std::time::Duration;

const SPINNER_TICK: Duration = Duration::from_millis(80);

/// Renders pipeline progress on stderr: a spinner per phase, and a step bar while
/// the round-trip checks run.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        Self {
            bar: ProgressBar::with_draw_target(None, target),
        }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        Box::new(move |event| apply(&bar, event))
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(bar: &ProgressBar, event: Progress) {
    match event {
        Progress::PhaseStart { name } => {
            bar.reset();
            bar.set_length(0);
            bar.set_style(spinner_style());
            bar.set_prefix(name);
            bar.set_message("");
            bar.enable_steady_tick(SPINNER_TICK);
        }
        Progress::ResiduesSkipped { count } => {
            bar.println(format!(
                "  ⚠ {count} residue(s) with types outside the feature table were skipped"
            ));
        }
        Progress::ChecksStart { total } => {
            bar.disable_steady_tick();
            bar.set_style(checks_style());
            bar.set_length(total);
            bar.set_position(0);
        }
        Progress::CheckPassed { check } => {
            bar.inc(1);
            bar.set_message(format!("{check} ok"));
        }
        Progress::PhaseFinish => {
            bar.disable_steady_tick();
            bar.finish_with_message("✓");
        }
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn checks_style() -> ProgressStyle {
    ProgressStyle::with_template("  {prefix:<22} [{bar:20.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}
