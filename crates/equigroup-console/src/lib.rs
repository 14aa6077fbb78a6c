//! Colorful console output for model building and solving.
//!
//! Provides a `tracing` layer that renders the structured events emitted by
//! `equigroup-model` and `equigroup-solver`.
//!
//! ## Log Levels
//!
//! - **INFO**: model built, backend selected, solve start/end
//! - **WARN**: solve abandoned at the time limit
//! - **DEBUG**: rejected backends and per-family constraint counts
//!
//! The default filter is `equigroup=info`; override it with `RUST_LOG`.

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
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_FILTER: &str = "equigroup=info,equigroup_model=info,equigroup_solver=info";

/// Width of the summary box interior, in columns.
const BOX_WIDTH: usize = 58;

/// Initializes console output.
///
/// Safe to call multiple times; only the first call has effect. If another
/// global subscriber is already installed it is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(EquigroupConsoleLayer)
            .try_init();
    });
}

fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
  ___  __ _ _   _(_) __ _ _ __ ___  _   _ _ __
 / _ \/ _` | | | | |/ _` | '__/ _ \| | | | '_ \
|  __/ (_| | |_| | | (_| | | | (_) | |_| | |_) |
 \___|\__, |\__,_|_|\__, |_|  \___/ \__,_| .__/
         |_|        |___/                |_|
"#;

    let version_line = format!("            v{} - Balanced Grouping via MILP\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats equigroup events with colors.
pub struct EquigroupConsoleLayer;

impl<S: Subscriber> Layer<S> for EquigroupConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("equigroup") {
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
    model: Option<String>,
    backend: Option<String>,
    status: Option<String>,
    reason: Option<String>,
    family: Option<String>,
    objective: Option<f64>,
    entity_count: Option<u64>,
    group_count: Option<u64>,
    n_people: Option<u64>,
    variable_count: Option<u64>,
    constraint_count: Option<u64>,
    rows: Option<u64>,
    duration_ms: Option<u64>,
    time_limit_secs: Option<f64>,
    ok: Option<bool>,
}

impl EventVisitor {
    fn set_text(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value),
            "model" => self.model = Some(value),
            "backend" => self.backend = Some(value),
            "status" => self.status = Some(value),
            "reason" => self.reason = Some(value),
            "family" => self.family = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field, s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "entity_count" => self.entity_count = Some(value),
            "group_count" => self.group_count = Some(value),
            "n_people" => self.n_people = Some(value),
            "variable_count" => self.variable_count = Some(value),
            "constraint_count" => self.constraint_count = Some(value),
            "rows" => self.rows = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "objective" => self.objective = Some(value),
            "time_limit_secs" => self.time_limit_secs = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "ok" {
            self.ok = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "model_built" => format_model_built(v),
        "constraints_added" => format_constraints_added(v, level),
        "solver_probe" => format_solver_probe(v),
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "solve_timeout" => format_solve_timeout(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value
        .unwrap_or(0)
        .to_formatted_string(&Locale::en)
        .bright_yellow()
        .to_string()
}

fn format_model_built(v: &EventVisitor) -> String {
    let model = v.model.as_deref().unwrap_or("model");

    let mut output = format!(
        "{} {} Built {} │ {} entities",
        format_elapsed(),
        "◆".bright_blue(),
        model.white().bold(),
        count(v.entity_count),
    );
    if v.group_count.is_some() {
        output.push_str(&format!(" │ {} groups", count(v.group_count)));
    }
    if v.n_people.is_some() {
        output.push_str(&format!(" │ {} to select", count(v.n_people)));
    }
    output.push_str(&format!(
        " │ {} variables │ {} constraints",
        count(v.variable_count),
        count(v.constraint_count)
    ));
    output
}

fn format_constraints_added(v: &EventVisitor, level: Level) -> String {
    if level != Level::DEBUG {
        return String::new();
    }
    format!(
        "{} {} {} rows │ {}",
        format_elapsed(),
        "+".bright_black(),
        count(v.rows),
        v.family.as_deref().unwrap_or("?").bright_black()
    )
}

fn format_solver_probe(v: &EventVisitor) -> String {
    let backend = v.backend.as_deref().unwrap_or("?");
    if v.ok.unwrap_or(false) {
        format!(
            "{} {} Backend {} ready",
            format_elapsed(),
            "✓".bright_green(),
            backend.bright_cyan().bold()
        )
    } else {
        format!(
            "{} {} Backend {} unavailable │ {}",
            format_elapsed(),
            "✗".bright_red(),
            backend.bright_cyan(),
            v.reason.as_deref().unwrap_or("unknown reason").bright_black()
        )
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let model = v.model.as_deref().unwrap_or("model");
    let backend = v.backend.as_deref().unwrap_or("?");

    let mut output = format!(
        "{} {} Solving {} with {} │ {} variables │ {} constraints",
        format_elapsed(),
        "▶".bright_green().bold(),
        model.white().bold(),
        backend.bright_cyan(),
        count(v.variable_count),
        count(v.constraint_count),
    );

    if let Some(limit) = v.time_limit_secs {
        output.push_str(&format!(
            " │ {}s limit",
            format!("{:.1}", limit).bright_yellow()
        ));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let optimal = status == "optimal";
    let objective = v.objective.map(format_objective);
    let objective = objective.as_deref().unwrap_or("N/A");
    let duration = format_duration_ms(v.duration_ms.unwrap_or(0));

    let status_tag = if optimal {
        "OPTIMAL".bright_green().bold().to_string()
    } else {
        "TIME LIMITED".yellow().bold().to_string()
    };

    let mut output = format!(
        "{} {} Solving complete │ {} │ objective {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        status_tag,
        objective.white(),
        duration.yellow()
    );

    // Summary box
    let rule = "═".repeat(BOX_WIDTH);
    output.push_str("\n\n");
    output.push_str(&format!("╔{}╗", rule).bright_cyan().to_string());
    output.push('\n');

    let status_text = if optimal {
        "OPTIMAL ALLOCATION FOUND"
    } else {
        "TIME LIMIT REACHED (best allocation found)"
    };
    let (left_pad, right_pad) = centered_padding(status_text, BOX_WIDTH);
    let status_colored = if optimal {
        status_text.bright_green().bold().to_string()
    } else {
        status_text.yellow().bold().to_string()
    };
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&format!("╠{}╣", rule).bright_cyan().to_string());
    output.push('\n');

    for (label, value) in [("Objective:", objective), ("Solve time:", duration.as_str())] {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }

    output.push_str(&format!("╚{}╝", rule).bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_solve_timeout(v: &EventVisitor) -> String {
    let model = v.model.as_deref().unwrap_or("model");
    let limit = v.time_limit_secs.unwrap_or(0.0);
    format!(
        "{} {} {} gave up on {} after {}s without a solution",
        format_elapsed(),
        "⚠".yellow().bold(),
        "WARN".yellow(),
        model.white().bold(),
        format!("{:.1}", limit).bright_yellow()
    )
}

fn centered_padding(text: &str, width: usize) -> (usize, usize) {
    let total = width.saturating_sub(text.chars().count());
    let left = total / 2;
    (left, total - left)
}

fn format_objective(value: f64) -> String {
    if value.abs() >= 1e6 {
        format!("{:.4e}", value)
    } else {
        format!("{:.4}", value)
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
