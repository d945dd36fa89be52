//! Build script for serialtext-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time
//! - Generates `board_config.rs` with the validated values

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Highest tick interval whose SysTick reload value fits 24 bits at 125 MHz
const MAX_TICK_MS: i64 = 134;

fn main() {
    setup_linker();
    let board = validate_config();
    generate_config(&board);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Values taken from board.toml
struct Board {
    baudrate: i64,
    data_bits: i64,
    parity: String,
    stop_bits: i64,
    period_ms: i64,
    tick_ms: i64,
}

/// Validate board.toml configuration at compile time
fn validate_config() -> Board {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the serialtext-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    let board = Board {
        baudrate: integer(&config, "serial", "baudrate", 57_600, &mut errors),
        data_bits: integer(&config, "serial", "data_bits", 8, &mut errors),
        parity: string(&config, "serial", "parity", "even", &mut errors),
        stop_bits: integer(&config, "serial", "stop_bits", 1, &mut errors),
        period_ms: integer(&config, "heartbeat", "period_ms", 1000, &mut errors),
        tick_ms: integer(&config, "heartbeat", "tick_ms", 100, &mut errors),
    };

    validate_serial(&board, &mut errors);
    validate_heartbeat(&board, &mut errors);

    if !errors.is_empty() {
        report_errors("Invalid board.toml", &errors);
    }

    println!("cargo:warning=board.toml validated successfully");
    board
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read an integer key, falling back to `default` when absent
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        None => default,
        Some(value) => match value.as_integer() {
            Some(n) => n,
            None => {
                errors.push(format!("[{}] {} must be an integer", section, key));
                default
            }
        },
    }
}

/// Read a string key, falling back to `default` when absent
fn string(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: &str,
    errors: &mut Vec<String>,
) -> String {
    match config.get(section).and_then(|s| s.get(key)) {
        None => default.to_string(),
        Some(value) => match value.as_str() {
            Some(s) => s.to_string(),
            None => {
                errors.push(format!("[{}] {} must be a string", section, key));
                default.to_string()
            }
        },
    }
}

fn validate_serial(board: &Board, errors: &mut Vec<String>) {
    if !(300..=921_600).contains(&board.baudrate) {
        errors.push(format!(
            "[serial] baudrate {} out of range (300-921600)",
            board.baudrate
        ));
    }
    if !(5..=8).contains(&board.data_bits) {
        errors.push(format!(
            "[serial] data_bits {} must be 5, 6, 7 or 8",
            board.data_bits
        ));
    }
    if !matches!(board.parity.as_str(), "none" | "even" | "odd") {
        errors.push(format!(
            "[serial] parity '{}' must be none, even or odd",
            board.parity
        ));
    }
    if !matches!(board.stop_bits, 1 | 2) {
        errors.push(format!(
            "[serial] stop_bits {} must be 1 or 2",
            board.stop_bits
        ));
    }
}

fn validate_heartbeat(board: &Board, errors: &mut Vec<String>) {
    if !(1..=MAX_TICK_MS).contains(&board.tick_ms) {
        errors.push(format!(
            "[heartbeat] tick_ms {} out of range (1-{})",
            board.tick_ms, MAX_TICK_MS
        ));
        return;
    }
    if board.period_ms < board.tick_ms {
        errors.push(format!(
            "[heartbeat] period_ms {} shorter than tick_ms {}",
            board.period_ms, board.tick_ms
        ));
    } else if board.period_ms % board.tick_ms != 0 {
        errors.push(format!(
            "[heartbeat] period_ms {} is not a multiple of tick_ms {}",
            board.period_ms, board.tick_ms
        ));
    } else if board.period_ms / board.tick_ms > i64::from(u16::MAX) {
        errors.push(format!(
            "[heartbeat] period_ms {} needs too many ticks",
            board.period_ms
        ));
    }
}

fn report_errors(title: &str, errors: &[String]) -> ! {
    let lines = errors
        .iter()
        .map(|e| format_error_lines(e))
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, lines
    );
}

/// Write the validated board values as Rust constants
fn generate_config(board: &Board) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let data_bits = match board.data_bits {
        5 => "Five",
        6 => "Six",
        7 => "Seven",
        _ => "Eight",
    };
    let parity = match board.parity.as_str() {
        "none" => "None",
        "odd" => "Odd",
        _ => "Even",
    };
    let stop_bits = if board.stop_bits == 2 { "Two" } else { "One" };

    let source = format!(
        "/// Serial line settings from board.toml\n\
         pub const SERIAL: UartConfig = UartConfig {{\n    \
             baudrate: {},\n    \
             data_bits: DataBits::{},\n    \
             parity: Parity::{},\n    \
             stop_bits: StopBits::{},\n\
         }};\n\n\
         /// Hardware tick interval in milliseconds\n\
         pub const TICK_MS: u32 = {};\n\n\
         /// Heartbeat period in milliseconds\n\
         pub const HEARTBEAT_PERIOD_MS: u32 = {};\n",
        board.baudrate, data_bits, parity, stop_bits, board.tick_ms, board.period_ms
    );

    let mut f = File::create(out_dir.join("board_config.rs")).unwrap();
    f.write_all(source.as_bytes()).unwrap();
}
