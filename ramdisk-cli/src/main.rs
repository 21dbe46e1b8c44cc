// SPDX-License-Identifier: GPL-3.0-only

//! Interactive session driving the RAM disk manager
//!
//! The tracked-volume registry lives for the lifetime of the process, so the
//! front-end keeps one manager alive per session and drives it with simple
//! line commands.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{fmt, EnvFilter};

use ramdisk_manager::RamDiskManager;
use ramdisk_types::{FilesystemKind, SizeUnit};

#[derive(Debug, Parser)]
#[command(name = "ramdisk")]
#[command(about = "Create and manage memory-backed volumes")]
struct Args {
    /// Icon resource to copy onto newly created volumes
    #[arg(long)]
    icon: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ramdisk_manager=info,ramdisk_sys=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting RAM Disk Manager v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut manager =
        RamDiskManager::new().context("the osascript automation facility is required")?;
    if let Some(icon) = args.icon {
        manager = manager.icon_source(icon);
    }

    println!("RAM Disk Manager - create fast temporary storage in memory");
    print_help();
    print_volumes(&manager);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt("> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["list"] => print_volumes(&manager),
            ["create", rest @ ..] => create(&manager, rest).await,
            ["eject", name] => eject(&manager, name, &mut lines).await?,
            ["help"] => print_help(),
            ["quit"] | ["exit"] => break,
            other => println!("unknown command: {} (try 'help')", other.join(" ")),
        }
    }

    Ok(())
}

async fn create(manager: &RamDiskManager, words: &[&str]) {
    let (name, size, unit, filesystem) = match words {
        [name, size, unit] | [name, size, unit, _] => {
            let Ok(size) = size.parse::<f64>() else {
                println!("size must be a number, got '{size}'");
                return;
            };
            let Some(unit) = SizeUnit::parse(unit) else {
                println!("unit must be MB or GB, got '{unit}'");
                return;
            };
            let filesystem = words
                .get(3)
                .map(|spelling| FilesystemKind::parse(spelling))
                .unwrap_or(FilesystemKind::Apfs);
            (*name, size, unit, filesystem)
        }
        _ => {
            println!("usage: create NAME SIZE MB|GB [APFS|HFS+|FAT32|ExFAT]");
            return;
        }
    };

    println!(
        "Creating '{name}' ({size} {}, {})...",
        unit.as_str(),
        filesystem.diskutil_format()
    );
    let outcome = manager.create(name, size, unit, filesystem).await;
    println!("{}", outcome.message);
    if outcome.success {
        print_volumes(manager);
    }
}

async fn eject(
    manager: &RamDiskManager,
    name: &str,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<()> {
    println!("All data on '{name}' will be permanently erased. This cannot be undone.");
    prompt("Eject? [y/N] ")?;

    let confirmed = matches!(
        lines.next_line().await?.as_deref().map(str::trim),
        Some("y") | Some("Y") | Some("yes")
    );
    if !confirmed {
        println!("cancelled");
        return Ok(());
    }

    let outcome = manager.unmount(name).await;
    println!("{}", outcome.message);
    if outcome.success {
        print_volumes(manager);
    }
    Ok(())
}

fn print_volumes(manager: &RamDiskManager) {
    let volumes = manager.refresh();
    if volumes.is_empty() {
        println!("(no RAM disks mounted)");
        return;
    }
    println!("Mounted RAM disks:");
    for name in volumes {
        println!("  {name}  /Volumes/{name}");
    }
}

fn print_help() {
    println!("commands:");
    println!("  create NAME SIZE MB|GB [APFS|HFS+|FAT32|ExFAT]");
    println!("  eject NAME");
    println!("  list");
    println!("  quit");
}

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(())
}
