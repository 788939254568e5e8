// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2025 Oxide Computer Company

use std::str::FromStr;

use slog::o;
use slog::Drain;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum LogFormat {
    Human,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "h" | "human" => Ok(LogFormat::Human),
            "j" | "json" => Ok(LogFormat::Json),
            _ => Err(format!("invalid log format: {s}")),
        }
    }
}

// Log records are queued so that emitting them never blocks the caller.
fn async_drain<D>(drain: D, chan_size: usize) -> slog::Fuse<slog_async::Async>
where
    D: Drain<Ok = (), Err = slog::Never> + Send + 'static,
{
    slog_async::Async::new(drain)
        .chan_size(chan_size)
        .build()
        .fuse()
}

/// Build the root logger for a tool.
///
/// Records go to `log_file` when one is given and to stderr otherwise, so
/// that stdout carries only the tool's actual output.  Anything below
/// `level` is dropped.
pub fn log_init(
    name: &'static str,
    log_file: &Option<String>,
    log_format: LogFormat,
    level: slog::Level,
) -> anyhow::Result<slog::Logger> {
    let drain = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            match log_format {
                LogFormat::Json => async_drain(
                    slog_bunyan::with_name(name, file).build().fuse(),
                    1024,
                ),
                LogFormat::Human => {
                    let decorator = slog_term::PlainDecorator::new(file);
                    async_drain(
                        slog_term::FullFormat::new(decorator).build().fuse(),
                        1024,
                    )
                }
            }
        }
        None => match log_format {
            LogFormat::Json => async_drain(
                slog_bunyan::with_name(name, std::io::stderr())
                    .build()
                    .fuse(),
                1024,
            ),
            LogFormat::Human => {
                let decorator =
                    slog_term::TermDecorator::new().stderr().build();
                async_drain(
                    slog_term::CompactFormat::new(decorator).build().fuse(),
                    1024,
                )
            }
        },
    };
    let drain = slog::LevelFilter::new(drain, level).ignore_res();
    Ok(slog::Logger::root(drain, o!()))
}

/// A logger that throws everything away.
pub fn log_discard() -> slog::Logger {
    slog::Logger::root(slog::Discard, o!())
}
