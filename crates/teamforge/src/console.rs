//! Colorful console output for balancing runs.
//!
//! Installs a `tracing` subscriber whose layer renders the solver's
//! structured events as short colored lines.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "teamforge_solver=info";
const FACADE_DIRECTIVE: &str = "teamforge=warn";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// directives are honored on top of `teamforge_solver=info`, and the
/// facade's own warnings stay visible. Does nothing if another global
/// subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = default_filter();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(BalanceConsoleLayer)
            .try_init();
    });
}

fn default_filter() -> EnvFilter {
    let mut builder = EnvFilter::builder();
    if let Ok(directive) = DEFAULT_DIRECTIVE.parse() {
        builder = builder.with_default_directive(directive);
    }
    let filter = builder.from_env_lossy();
    match FACADE_DIRECTIVE.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// A tracing layer that formats balancer events with colors.
pub struct BalanceConsoleLayer;

impl<S: Subscriber> Layer<S> for BalanceConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if !target.starts_with("teamforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{output}");
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    /// Every other field, in recording order.
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let rendered = format!("{value:?}");
        self.record_str(field, rendered.trim_matches('"'));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.push((field.name(), format!("{value:.6}")));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.push((field.name(), value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.push((field.name(), value.to_string()));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.push((field.name(), value.to_string()));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            name => self.fields.push((name, value.to_string())),
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    let Some(event) = v.event.as_deref() else {
        return String::new();
    };

    match event {
        "solve_start" => format!(
            "{} {} players, {} pinned, mode {}",
            "▶".bright_cyan(),
            v.field("players").unwrap_or("?").bright_white(),
            v.field("pinned").unwrap_or("0"),
            v.field("mode").unwrap_or("?"),
        ),
        "phase_start" => format!(
            "{} {}{}",
            "├─".bright_blue(),
            v.field("phase").unwrap_or("phase").bright_white().bold(),
            details(v, &["candidates", "workers", "seed"]),
        ),
        "phase_end" => format!(
            "{} {} done in {}ms{}",
            "└─".bright_blue(),
            v.field("phase").unwrap_or("phase"),
            v.field("duration_ms").unwrap_or("?").yellow(),
            details(v, &["steps", "score", "relaxed"]),
        ),
        "solve_end" => format!(
            "{} {} total {} in {}ms",
            "■".bright_green(),
            v.field("engine").unwrap_or("?").bright_white(),
            v.field("total").unwrap_or("?").bright_green().bold(),
            v.field("duration_ms").unwrap_or("?"),
        ),
        "fallback_to_heuristic" | "spread_relaxed" | "non_convergence" | "source_degraded" => {
            format!("{} {}{}", "⚠".yellow(), event.yellow(), details(v, &[]))
        }
        _ => String::new(),
    }
}

/// Renders `key=value` pairs; an empty `only` renders every field.
fn details(v: &EventVisitor, only: &[&str]) -> String {
    let mut out = String::new();
    for (name, value) in &v.fields {
        if only.is_empty() || only.contains(name) {
            let _ = write!(out, " {}={}", name.dimmed(), value);
        }
    }
    out
}
