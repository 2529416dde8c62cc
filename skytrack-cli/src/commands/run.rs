//! Run command - receive telemetry and track the current flight.

use std::io::{self, IsTerminal};
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use skytrack::config::ConfigFile;
use skytrack::flight::FlightTracker;
use skytrack::telemetry::{ReceiverStats, TelemetryReceiver};
use skytrack::units::UnitSystem;

use crate::error::CliError;
use crate::runner::CliRunner;
use crate::ui::{Dashboard, PanelView, Presenter, TextPresenter, UiEvent};

/// Arguments for the run command.
#[derive(Debug, Default)]
pub struct RunArgs {
    pub port: Option<u16>,
    pub units: Option<UnitSystem>,
    pub debug: bool,
    pub no_tui: bool,
}

/// Run the run command.
pub fn run(args: RunArgs) -> Result<(), CliError> {
    // The dashboard and stdout logging cannot share the terminal
    let use_tui = io::stdout().is_terminal() && !args.no_tui;

    let runner = CliRunner::new(!use_tui, args.debug)?;
    runner.log_startup("run");

    let mut config = runner.config().clone();
    apply_overrides(&mut config, &args);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    runtime.block_on(run_session(&config, use_tui))
}

/// Apply command-line flags on top of the config file.
fn apply_overrides(config: &mut ConfigFile, args: &RunArgs) {
    if let Some(port) = args.port {
        config.telemetry.port = port;
    }
    if let Some(units) = args.units {
        config.display.units = units;
    }
}

async fn run_session(config: &ConfigFile, use_tui: bool) -> Result<(), CliError> {
    let mut receiver = TelemetryReceiver::start(config.telemetry.to_receiver_config())?;
    let mut tracker = FlightTracker::new(config.to_tracker_config());

    let shutdown = CancellationToken::new();
    spawn_signal_handler(shutdown.clone());

    if !use_tui {
        println!("SkyTrack v{}", skytrack::VERSION);
        println!(
            "Listening for '{}' telemetry on UDP port {}",
            config.telemetry.client_name,
            receiver.port()
        );
        println!("Press Ctrl+C to stop");
        println!();
    }

    let presenter: Result<Box<dyn Presenter>, io::Error> = if use_tui {
        Dashboard::new().map(|d| Box::new(d) as Box<dyn Presenter>)
    } else {
        Ok(Box::new(TextPresenter::stdout()))
    };

    let result = match presenter {
        Ok(mut presenter) => {
            let result = poll_loop(
                &receiver,
                &mut tracker,
                presenter.as_mut(),
                config.update_interval(),
                &shutdown,
            )
            .await;
            // Dropping the dashboard hands the terminal back
            drop(presenter);
            result
        }
        Err(e) => Err(CliError::Terminal(e)),
    };

    receiver.stop().await;
    result?;

    print_session_summary(&tracker, receiver.stats());
    Ok(())
}

/// Cancel `shutdown` on Ctrl+C.
fn spawn_signal_handler(shutdown: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C, shutting down");
                shutdown.cancel();
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C"),
        }
    });
}

/// Poll the receiver on a fixed period until shutdown or a quit request.
async fn poll_loop(
    receiver: &TelemetryReceiver,
    tracker: &mut FlightTracker,
    presenter: &mut dyn Presenter,
    period: Duration,
    shutdown: &CancellationToken,
) -> Result<(), CliError> {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let snapshot = receiver.snapshot();
        tracker.ingest(&snapshot);
        let report = tracker.get_statistics();

        let view = PanelView {
            snapshot: &snapshot,
            report: &report,
            port: receiver.port(),
        };
        presenter.render(&view).map_err(CliError::Terminal)?;

        while let Some(event) = presenter.poll_event().map_err(CliError::Terminal)? {
            if handle_event(tracker, event).is_break() {
                info!("Quit requested from dashboard");
                return Ok(());
            }
        }
    }

    Ok(())
}

/// Apply a user request to the tracker.
fn handle_event(tracker: &mut FlightTracker, event: UiEvent) -> ControlFlow<()> {
    match event {
        UiEvent::Quit => return ControlFlow::Break(()),
        UiEvent::ResetStatistics => {
            info!("Flight statistics reset");
            tracker.reset_statistics();
        }
        UiEvent::ClearPath => tracker.clear_path(),
        UiEvent::ToggleUnits => {
            let units = tracker.unit_system().toggled();
            tracker.set_unit_system(units);
        }
    }
    ControlFlow::Continue(())
}

/// Print final statistics after the terminal is restored.
fn print_session_summary(tracker: &FlightTracker, stats: ReceiverStats) {
    let report = tracker.get_statistics();
    info!(
        distance = report.distance,
        max_speed = report.max_speed,
        max_altitude = report.max_altitude,
        datagrams = stats.datagrams_received,
        rejected = stats.datagrams_rejected,
        "Session ended"
    );

    println!();
    println!("Final Statistics");
    println!("================");
    println!("{}", report);
    println!();
    println!(
        "Datagrams: {} received, {} positions, {} attitudes, {} rejected",
        stats.datagrams_received,
        stats.positions_accepted,
        stats.attitudes_accepted,
        stats.datagrams_rejected
    );
}
