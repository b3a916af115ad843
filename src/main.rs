// SPDX-License-Identifier: MPL-2.0
use said_toasts::config::{self, QueueSettings};
use said_toasts::diagnostics::DiagnosticsCollector;
use said_toasts::notifications::{ToastOptions, Toaster, Variant};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
said_toasts - fire a burst of toasts through the queue and watch it drain

USAGE:
  said_toasts [OPTIONS]

OPTIONS:
  --config PATH         Settings file (defaults to the user config dir)
  --count N             Number of toasts to show [default: 5]
  --variant NAME        default | success | info | warning | destructive
  --persistent          Toasts never auto-dismiss
  --dismiss-after MS    Dismiss every visible toast after MS milliseconds
  --report PATH         Export the lifecycle log as TOML
  -h, --help            Print help
";

/// How often the drain loop checks the queue and collects lifecycle events.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

struct Args {
    config: Option<PathBuf>,
    count: usize,
    variant: Variant,
    persistent: bool,
    dismiss_after: Option<u64>,
    report: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        config: args.opt_value_from_str("--config")?,
        count: args.opt_value_from_str("--count")?.unwrap_or(5),
        variant: args.opt_value_from_str("--variant")?.unwrap_or_default(),
        persistent: args.contains("--persistent"),
        dismiss_after: args.opt_value_from_str("--dismiss-after")?,
        report: args.opt_value_from_str("--report")?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {remaining:?}"),
        });
    }
    Ok(Some(parsed))
}

async fn run(args: Args) -> said_toasts::error::Result<()> {
    let config = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    let settings = QueueSettings::from_config(&config);

    let mut collector = DiagnosticsCollector::new(config.diagnostics_buffer_capacity());
    let toaster = Toaster::new(settings)?;
    toaster.set_diagnostics(collector.handle());

    let subscription = toaster.subscribe(|toasts| {
        let visible = toasts.iter().filter(|toast| toast.is_visible()).count();
        let titles: Vec<&str> = toasts.iter().filter_map(|toast| toast.title()).collect();
        tracing::info!(total = toasts.len(), visible, ?titles, "queue changed");
    });

    for n in 1..=args.count {
        let mut options = ToastOptions::new()
            .variant(args.variant)
            .title(format!("Notificación {n}"));
        if args.persistent {
            options = options.persistent();
        }
        toaster.notify(options);
    }

    if let Some(delay) = args.dismiss_after {
        tokio::time::sleep(Duration::from_millis(delay)).await;
        let dismissed = toaster.dismiss_all();
        tracing::info!(dismissed, "dismissed visible toasts");
    }

    let budget = settings.default_duration + settings.removal_delay + POLL_INTERVAL * 2;
    let drained = tokio::time::timeout(budget, async {
        while !toaster.is_empty() {
            collector.process_pending();
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    })
    .await
    .is_ok();

    if !drained {
        tracing::warn!(remaining = toaster.len(), "queue did not drain, clearing");
        toaster.clear();
    }
    subscription.unsubscribe();

    match &args.report {
        Some(path) => collector.export_to_path(path)?,
        None => {
            collector.process_pending();
        }
    }
    tracing::info!(events = collector.len(), "lifecycle events recorded");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!(error = %err, "failed to start runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "said_toasts failed");
            ExitCode::FAILURE
        }
    }
}
