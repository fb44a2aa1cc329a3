use almanac_core::config::AlmanacConfig;
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::GlobalArgs;
use crate::context::load_config;

pub fn run(args: &GlobalArgs) -> Result<()> {
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => AlmanacConfig::config_path()?,
    };
    let config = load_config(args)?;

    let calendar = args
        .calendar
        .clone()
        .or_else(|| config.calendar_path())
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "Gregorian (built in)".to_string());
    let events = args.events.clone().unwrap_or_else(|| config.events_path());

    println!("{}", "Paths".bold());
    println!("  Config:    {}", config_path.display());
    println!("  Calendar:  {}", calendar);
    println!("  Events:    {}", events.display());

    let limits = &config.engine;
    println!();
    println!("{}", "Engine limits".bold());
    println!("  Scan ceiling:         {}", limits.scan_ceiling);
    println!("  Random scan ceiling:  {}", limits.random_scan_ceiling);
    println!("  Stride ceiling:       {}", limits.stride_ceiling);
    println!("  Max link depth:       {}", limits.max_link_depth);
    println!("  Lookahead days:       {}", limits.lookahead_days);

    Ok(())
}
