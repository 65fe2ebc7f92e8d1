//! Progress reporting for dispatch execution

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use tutor_application::{DispatchProgress, DispatchStage};

/// Shows a spinner while a question is being classified and answered
pub struct SpinnerProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap()
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchProgress for SpinnerProgress {
    fn on_stage(&self, stage: &DispatchStage) {
        let Ok(mut guard) = self.bar.lock() else {
            return;
        };

        match stage {
            DispatchStage::Completed => {
                if let Some(pb) = guard.take() {
                    pb.finish_and_clear();
                }
            }
            DispatchStage::Errored(category) => {
                if let Some(pb) = guard.take() {
                    pb.finish_with_message(format!("{} {}", "x".red(), category));
                }
            }
            _ => {
                let pb = guard.get_or_insert_with(|| {
                    let pb = ProgressBar::new_spinner();
                    pb.set_style(Self::spinner_style());
                    pb.set_prefix("TutorVerse");
                    pb.enable_steady_tick(Duration::from_millis(100));
                    pb
                });
                pb.set_message(stage.label());
            }
        }
    }
}
