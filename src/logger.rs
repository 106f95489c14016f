/*!
 * Logging setup
 */

use std::io::Write;

use env_logger::Builder;
use log::Level;

/// Environment variable that overrides the verbosity flag
pub const LOG_ENV: &str = "COMBINE_FILES_LOG";

/// Default filter for a `-v` count
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize the global logger; output goes to stderr
pub fn setup_logger(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let env = env_logger::Env::default().filter_or(LOG_ENV, level_for(verbosity));

    Builder::from_env(env)
        .format(|buf, record| {
            let level_color = match record.level() {
                Level::Error => "31",
                Level::Warn => "33",
                Level::Info => "32",
                Level::Debug => "36",
                Level::Trace => "35",
            };

            writeln!(
                buf,
                "\x1B[{}m[{}]\x1B[0m {}",
                level_color,
                record.level(),
                record.args()
            )
        })
        .try_init()
}
