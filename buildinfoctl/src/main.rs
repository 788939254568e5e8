// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2025 Oxide Computer Company

use std::io::Read;
use std::str::FromStr;

use anyhow::Context;
use slog::debug;
use slog::info;
use slog::o;
use slog::warn;
use structopt::*;

use buildinfo::mesh;
use buildinfo::BuildInfo;
use buildinfo::DockerBuildInfo;
use buildinfo::MeshInfo;
use buildinfo::Platform;
use buildinfo_common::LogFormat;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "buildinfoctl",
    about = "inspect and convert build version information"
)]
struct GlobalOpts {
    #[structopt(long, help = "log file")]
    log_file: Option<String>,

    #[structopt(
        long,
        short = "l",
        default_value = "human",
        help = "format logs for 'human' or 'json' consumption"
    )]
    log_format: LogFormat,

    #[structopt(long, short = "v", help = "include debug messages in the log")]
    verbose: bool,

    #[structopt(subcommand)]
    cmd: Commands,
}

/// How a build record is printed.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
enum OutputFormat {
    /// `<version>-<revision>-<status>`
    Short,
    /// Every field, for debugging
    Long,
    Json,
    /// The `Key: value` report older components print
    Legacy,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s" | "short" => Ok(OutputFormat::Short),
            "l" | "long" => Ok(OutputFormat::Long),
            "j" | "json" => Ok(OutputFormat::Json),
            "legacy" => Ok(OutputFormat::Legacy),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}

#[derive(Debug, StructOpt)]
enum Commands {
    /// Print the build information compiled into this binary.
    #[structopt(visible_alias = "v")]
    Version {
        #[structopt(
            short,
            long,
            default_value = "short",
            help = "one of 'short', 'long', 'json' or 'legacy'"
        )]
        output: OutputFormat,
    },
    /// Print the User-Agent this binary identifies itself with.
    #[structopt(visible_alias = "ua")]
    UserAgent {
        #[structopt(long, help = "program path (default: this process)")]
        argv0: Option<String>,
        #[structopt(long, help = "operating system (default: this host)")]
        os: Option<String>,
        #[structopt(long, help = "architecture (default: this host)")]
        arch: Option<String>,
    },
    /// Print the image coordinates this binary was published under.
    Docker {
        #[structopt(long, help = "print the full reference for this image")]
        image: Option<String>,
    },
    /// Parse a legacy `Key: value` version report.
    #[structopt(visible_alias = "parse")]
    ParseLegacy {
        #[structopt(help = "file to read, or '-' for stdin")]
        input: String,
        #[structopt(
            short,
            long,
            default_value = "json",
            help = "one of 'short', 'long', 'json' or 'legacy'"
        )]
        output: OutputFormat,
    },
    /// Summarize the versions in a JSON mesh version report.
    Mesh {
        #[structopt(help = "file to read, or '-' for stdin")]
        input: String,
    },
    /// Print the JSON schema of a build record.
    Schema,
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read {input}"))
    }
}

fn render(info: &BuildInfo, output: OutputFormat) -> anyhow::Result<String> {
    Ok(match output {
        OutputFormat::Short => info.to_compact_string(),
        OutputFormat::Long => info.long_form(),
        OutputFormat::Json => serde_json::to_string_pretty(info)
            .context("failed to serialize build information")?,
        OutputFormat::Legacy => info.legacy_form().trim_end().to_string(),
    })
}

fn user_agent(
    info: &BuildInfo,
    argv0: Option<String>,
    os: Option<String>,
    arch: Option<String>,
) -> String {
    if argv0.is_none() && os.is_none() && arch.is_none() {
        return info.current_user_agent();
    }
    let host = Platform::current();
    let platform = Platform {
        argv0: argv0.unwrap_or(host.argv0),
        os: os.unwrap_or(host.os),
        arch: arch.unwrap_or(host.arch),
    };
    info.user_agent_for(&platform)
}

fn docker(docker: &DockerBuildInfo, image: Option<&str>) -> String {
    match image {
        Some(image) => docker.image_ref(image),
        None => format!("Hub: {}\nTag: {}", docker.hub, docker.tag),
    }
}

fn parse_legacy(log: &slog::Logger, input: &str) -> anyhow::Result<BuildInfo> {
    let text = read_input(input)?;
    let info = buildinfo::parse_legacy(&text).with_context(|| {
        format!("failed to parse legacy report from {input}")
    })?;
    info!(log, "parsed legacy report";
        "source" => input,
        "version" => &info.version,
        "revision" => &info.git_revision);
    Ok(info)
}

fn mesh_report(mesh: &[buildinfo::ServerInfo]) -> Vec<String> {
    let mut lines = mesh
        .iter()
        .map(|s| format!("{}: {}", s.component, s.info))
        .collect::<Vec<String>>();
    match mesh::common_version(mesh) {
        Some(v) => lines.push(format!("all components at {v}")),
        None => {
            for group in mesh::mesh_versions(mesh) {
                lines.push(format!(
                    "{}: {}",
                    group.version,
                    group.members.join(", ")
                ));
            }
        }
    }
    lines
}

fn mesh_summary(log: &slog::Logger, input: &str) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let mesh: MeshInfo = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse mesh report from {input}"))?;
    if mesh.is_empty() {
        warn!(log, "mesh report lists no components"; "source" => input);
    }
    for line in mesh_report(&mesh) {
        println!("{line}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opts = GlobalOpts::from_args();
    let level = if opts.verbose {
        slog::Level::Debug
    } else {
        slog::Level::Info
    };
    let log = buildinfo_common::log_init(
        "buildinfoctl",
        &opts.log_file,
        opts.log_format,
        level,
    )?;

    // Constructed once here and passed to everything below.
    let info = BuildInfo::current();
    debug!(log, "build information"; "version" => &info.version,
        "revision" => &info.git_revision, "vendor" => &info.vendor);

    match opts.cmd {
        Commands::Version { output } => {
            println!("{}", render(&info, output)?);
        }
        Commands::UserAgent { argv0, os, arch } => {
            println!("{}", user_agent(&info, argv0, os, arch));
        }
        Commands::Docker { image } => {
            let coordinates = DockerBuildInfo::current();
            println!("{}", docker(&coordinates, image.as_deref()));
        }
        Commands::ParseLegacy { input, output } => {
            let log = log.new(o!("unit" => "legacy"));
            let parsed = parse_legacy(&log, &input)?;
            println!("{}", render(&parsed, output)?);
        }
        Commands::Mesh { input } => {
            mesh_summary(&log.new(o!("unit" => "mesh")), &input)?;
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(BuildInfo);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }
    Ok(())
}
