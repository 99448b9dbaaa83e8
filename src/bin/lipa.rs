use lipa::{
    cli::{start, telemetry},
    session::SessionError,
};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let result = match start() {
        Ok(action) => action.execute().await,
        Err(err) => Err(err),
    };

    telemetry::shutdown_tracer();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // Session errors were already shown through the notifier.
        Err(err) if err.is::<SessionError>() => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
