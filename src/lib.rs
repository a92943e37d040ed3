//! Uniswap v2/v3 helpers for a mainnet-fork test harness using Alloy only.
//!
//! Scope: composing multi-venue trades, reading pair/pool state from a node,
//! building swap options with sane defaults, and dumping wallet balances.
//! All pricing and execution stays on-chain / downstream; nothing in here
//! does AMM math.

pub mod writing {
    pub mod cc {
        pub const RED: &str = "\x1b[31m";
        pub const GREEN: &str = "\x1b[32m";
        pub const YELLOW: &str = "\x1b[33m";
        pub const CYAN: &str = "\x1b[36m";
        pub const RESET: &str = "\x1b[0m";
        pub const LIGHT_GRAY: &str = "\x1b[38;5;245m";
    }

    pub mod logging {
        use std::{fs::OpenOptions, io::Write, path::Path};

        // Append to file so the harness stdout stays clean.
        pub fn write_line(line: &str) {
            let path = std::env::var("UNIKIT_LOG_PATH").unwrap_or_else(|_| "logs/unikit.log".to_string());
            if let Some(parent) = Path::new(&path).parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&path) {
                let _ = writeln!(f, "{}", line);
            }
        }
    }

    #[macro_export]
    macro_rules! log {
        // colored, raw literal
        ($color:expr, $msg:literal) => {{
            let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
            let _ = $crate::writing::logging::write_line(&format!(
                "{} | {}{}{}",
                time,
                $color,
                $msg,
                $crate::writing::cc::RESET,
            ));
        }};

        // colored, with normal formatting: log!(cc::RED, "err: {}", e);
        ($color:expr, $fmt:literal, $($arg:tt)+) => {{
            let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
            let _ = $crate::writing::logging::write_line(&format!(
                "{} | {}{}{}",
                time,
                $color,
                format_args!($fmt, $($arg)+),
                $crate::writing::cc::RESET,
            ));
        }};

        // default color, raw literal
        ($msg:literal) => {{
            let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
            let _ = $crate::writing::logging::write_line(&format!(
                "{} | {}{}",
                time,
                $crate::writing::cc::LIGHT_GRAY,
                $msg,
            ));
        }};

        // default color, with formatting
        ($fmt:literal, $($arg:tt)+) => {{
            let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
            let _ = $crate::writing::logging::write_line(&format!(
                "{} | {}{}{}",
                time,
                $crate::writing::cc::LIGHT_GRAY,
                format_args!($fmt, $($arg)+),
                $crate::writing::cc::RESET,
            ));
        }};
    }
}

pub mod balances;
pub mod config;
pub mod swap;
pub mod trade;
pub mod uniswap;
