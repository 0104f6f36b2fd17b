use std::time::Duration;

use clap::Parser;

use term_codepad::app::CodepadApp;
use term_codepad::config::{AppConfig, Cli};
use term_codepad::drivers::OutputDriver;
use term_codepad::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_codepad::error::AppError;
use term_codepad::question::Question;
use term_codepad::runner::run_app;
use term_codepad::tracing_sub;

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::try_from(&cli)?;
    tracing_sub::init(config.log_file.as_deref(), config.log_level)?;

    let question = Question::load_or_default(config.question.as_deref())?;
    tracing::info!(title = %question.title, "question loaded");

    let mut output = ConsoleOutputDriver::new()?;
    let mut input = ConsoleInputDriver::new();
    let mut app = CodepadApp::new(&config, question, output.area()?);

    output.enter()?;
    let result = run_app(&mut output, &mut input, &mut app, Duration::from_millis(16));
    output.exit()?;

    result.map_err(AppError::from)
}
