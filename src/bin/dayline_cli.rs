//! CLI tool for dayline - prints per-day availability summaries
//!
//! Usage:
//!   dayline_cli <slots.json>                              # 14 days from today
//!   dayline_cli <slots.json> --from 2025-08-01 --days 30
//!   dayline_cli <slots.json> --tz Africa/Johannesburg

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;

use chrono::Duration;
use dayline::aggregate::SlotIndex;
use dayline::calendar::{DateIndexMapper, FALLBACK_TZ};
use dayline::parse_slots;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: dayline_cli <slots.json> [--from YYYY-MM-DD] [--days N] [--tz ZONE]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let mut from: Option<String> = None;
    let mut days: i64 = 14;
    let mut tz_name: Option<String> = None;

    let mut i = 2;
    while i + 1 < args.len() {
        match args[i].as_str() {
            "--from" => from = Some(args[i + 1].clone()),
            "--days" => match args[i + 1].parse::<i64>() {
                Ok(n) if n > 0 => days = n,
                _ => {
                    eprintln!("Error: --days expects a positive integer");
                    std::process::exit(1);
                }
            },
            "--tz" => tz_name = Some(args[i + 1].clone()),
            other => {
                eprintln!("Error: unknown option {}", other);
                std::process::exit(1);
            }
        }
        i += 2;
    }

    let tz = match tz_name {
        Some(name) => match DateIndexMapper::resolve_tz(&name) {
            Ok(tz) => tz,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => FALLBACK_TZ,
    };

    let start = match from {
        Some(iso) => match DateIndexMapper::parse_iso(&iso) {
            Ok(date) => date,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => DateIndexMapper::today_in(tz),
    };

    // Read input file
    let json = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    // Parse slot records
    let slots = match parse_slots(&json) {
        Ok(slots) => slots,
        Err(e) => {
            eprintln!("Error parsing slots: {}", e);
            std::process::exit(1);
        }
    };

    let index = SlotIndex::build(&slots);
    if index.skipped() > 0 {
        eprintln!(
            "Warning: skipped {} slot(s) with unparseable dates",
            index.skipped()
        );
    }

    println!(
        "{:<12} {:<4} {:<6} {:>9} {:>9} {:>10}  {:<5} {}",
        "date", "dow", "level", "capacity", "booked", "remaining", "flags", "first"
    );
    for offset in 0..days {
        let Some(date) = start.checked_add_signed(Duration::days(offset)) else {
            break;
        };
        let agg = index.aggregate_for(date);
        let mut flags = String::new();
        if agg.has_blackouts {
            flags.push('B');
        }
        if agg.has_restrictions {
            flags.push('R');
        }
        if agg.has_notes {
            flags.push('N');
        }
        println!(
            "{:<12} {:<4} {:<6} {:>9.1} {:>9.1} {:>10.1}  {:<5} {}",
            date.format("%Y-%m-%d"),
            date.format("%a"),
            agg.level.as_str(),
            agg.capacity_total,
            agg.booked_total,
            agg.remaining,
            flags,
            agg.first_slot_time.as_deref().unwrap_or("-")
        );
    }
}
