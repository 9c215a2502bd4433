//! Colorful console output for batch runs.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Batch lifecycle (batch start/end, retry end)
//! - **DEBUG**: One line per decision and per solved chain
//! - **TRACE**: Individual chain steps and rule matches

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static BATCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "routeforge_solver=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the RouteForge banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let builder = EnvFilter::builder();
        let builder = match DEFAULT_DIRECTIVE.parse() {
            Ok(directive) => builder.with_default_directive(directive),
            Err(_) => builder,
        };
        let filter = builder.from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RouteConsoleLayer)
            .try_init();
    });
}

// Marks the start of a batch for elapsed time tracking.
fn mark_batch_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    BATCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = BATCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 ____             _       _____
|  _ \ ___  _   _| |_ ___|  ___|__  _ __ __ _  ___
| |_) / _ \| | | | __/ _ \ |_ / _ \| '__/ _` |/ _ \
|  _ < (_) | |_| | ||  __/  _| (_) | | | (_| |  __/
|_| \_\___/ \__,_|\__\___|_|  \___/|_|  \__, |\___|
                                        |___/
"#;

    let version_line = format!(
        "                 v{} - Route Branch Classifier\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats engine events with colors.
pub struct RouteConsoleLayer;

impl<S: Subscriber> Layer<S> for RouteConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("routeforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    engine: Option<String>,
    mode: Option<String>,
    route: Option<String>,
    seed: Option<String>,
    outcome: Option<String>,
    rule: Option<String>,
    score: Option<String>,
    total_score: Option<String>,
    derived: Option<String>,
    routes: Option<u64>,
    decisions: Option<u64>,
    fallbacks: Option<u64>,
    chain_steps: Option<u64>,
    elapsed_ms: Option<u64>,
    attempts: Option<u64>,
    steps: Option<u64>,
    step: Option<u64>,
    parallel: Option<bool>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "engine" => self.engine = Some(value),
            "mode" => self.mode = Some(value),
            "route" => self.route = Some(value),
            "seed" => self.seed = Some(value),
            "outcome" => self.outcome = Some(value),
            "rule" => self.rule = Some(value),
            "score" => self.score = Some(value),
            "total_score" => self.total_score = Some(value),
            "derived" => self.derived = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "routes" => self.routes = Some(value),
            "decisions" => self.decisions = Some(value),
            "fallbacks" => self.fallbacks = Some(value),
            "chain_steps" => self.chain_steps = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            "attempts" => self.attempts = Some(value),
            "steps" => self.steps = Some(value),
            "step" => self.step = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "parallel" {
            self.parallel = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "batch_start" => {
            mark_batch_start();
            format_batch_start(v)
        }
        "batch_end" => format_batch_end(v),
        "decision" => format_decision(v),
        "chain" => format_chain(v),
        "chain_step" => format_chain_step(v, level),
        "retry_end" => format_retry_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_batch_start(v: &EventVisitor) -> String {
    let routes = v.routes.unwrap_or(0);
    let engine = v.engine.as_deref().unwrap_or("Gate");
    let mode = v.mode.as_deref().unwrap_or("Live");

    let mut output = format!(
        "{} {} Batch │ {} routes │ {} engine │ {} mode",
        format_elapsed(),
        "▶".bright_green().bold(),
        routes.to_formatted_string(&Locale::en).bright_yellow(),
        engine.white().bold(),
        mode.white(),
    );
    if v.parallel == Some(true) {
        output.push_str(&format!(" │ {}", "parallel".bright_magenta()));
    }
    output
}

fn format_batch_end(v: &EventVisitor) -> String {
    let decisions = v.decisions.unwrap_or(0);
    let fallbacks = v.fallbacks.unwrap_or(0);
    let score = v.total_score.as_deref().unwrap_or("0");
    let duration = v.elapsed_ms.unwrap_or(0);

    let mut output = format!(
        "{} {} Batch complete │ {} │ {} decisions │ score {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        decisions.to_formatted_string(&Locale::en).white(),
        score.bright_magenta().bold(),
    );

    if fallbacks > 0 {
        output.push_str(&format!(
            " │ {} fallbacks",
            fallbacks.to_formatted_string(&Locale::en).bright_red()
        ));
    }
    if let Some(steps) = v.chain_steps.filter(|&s| s > 0) {
        output.push_str(&format!(
            " │ {} chain steps",
            steps.to_formatted_string(&Locale::en).white()
        ));
    }
    output
}

fn format_decision(v: &EventVisitor) -> String {
    let route = v.route.as_deref().unwrap_or("?");
    let outcome = v.outcome.as_deref().unwrap_or("?");
    let rule = v.rule.as_deref().unwrap_or("default");
    let score = v.score.as_deref().unwrap_or("0");

    format!(
        "{} {} {:<40} │ {:<9} │ {:<20} │ {}",
        format_elapsed(),
        outcome_icon(outcome),
        route.white(),
        format_outcome(outcome),
        rule.bright_black(),
        score.bright_magenta(),
    )
}

fn format_chain(v: &EventVisitor) -> String {
    let seed = v.seed.as_deref().unwrap_or("?");
    let steps = v.steps.unwrap_or(0);

    format!(
        "{} {} Chain {} │ {} steps",
        format_elapsed(),
        "↳".bright_blue(),
        seed.white(),
        steps.to_formatted_string(&Locale::en).bright_yellow(),
    )
}

fn format_chain_step(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let step = v.step.unwrap_or(0);
    let derived = v.derived.as_deref().unwrap_or("");
    format!(
        "{}   Step {:>4} │ {}",
        format_elapsed(),
        step.to_formatted_string(&Locale::en).bright_black(),
        derived.bright_black()
    )
}

fn format_retry_end(v: &EventVisitor) -> String {
    let route = v.route.as_deref().unwrap_or("?");
    let attempts = v.attempts.unwrap_or(0);
    let outcome = v.outcome.as_deref().unwrap_or("?");
    let rule = v.rule.as_deref().unwrap_or("default");

    format!(
        "{} {} Retry {} │ {} attempts │ {} by {}",
        format_elapsed(),
        "⟳".bright_cyan().bold(),
        route.white(),
        attempts.to_formatted_string(&Locale::en).bright_yellow(),
        format_outcome(outcome),
        rule.bright_black(),
    )
}

fn outcome_icon(outcome: &str) -> String {
    match outcome {
        "accepted" | "stable" | "resolved" => "✓".bright_green().to_string(),
        "rejected" | "abort" | "errored" => "✗".bright_red().to_string(),
        _ => "•".yellow().to_string(),
    }
}

fn format_outcome(outcome: &str) -> String {
    match outcome {
        "accepted" | "stable" | "resolved" => outcome.bright_green().to_string(),
        "rejected" | "abort" => outcome.bright_red().bold().to_string(),
        "errored" => outcome.red().to_string(),
        "rerouted" | "escalate" => outcome.bright_yellow().to_string(),
        _ => outcome.yellow().to_string(),
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
