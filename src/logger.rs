use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::{env, str::FromStr};

const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

pub fn init() -> Result<()> {
    let level = level_from(env::var(LOG_LEVEL_ENV).ok().as_deref());

    SimpleLogger::new().with_level(level).init()?;

    Ok(())
}

fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|value| LevelFilter::from_str(value.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}
