//! The `seccompose compose` subcommand.
//!
//! The main operation: expands a base policy against the supplied fragment
//! paths. Output is all-or-nothing — the destination is only written once
//! the whole composition has succeeded, so a failed run never leaves a
//! partial policy for the build system to install.

use std::fs;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::Result;
use seccompose_inline::{compose, Fragment, FragmentCatalog};
use tracing::debug;

/// Fragment path flags shared by `compose` and `check`.
///
/// One flag per catalog member, mirroring the fixed configuration surface.
/// A flag may be omitted on targets that do not ship the fragment; it only
/// becomes an error if the base policy actually references it.
#[derive(Args)]
pub struct FragmentArgs {
    /// Path to the common device rules fragment.
    #[arg(long, value_name = "PATH")]
    pub common_device: Option<PathBuf>,

    /// Path to the shared GPU rules fragment.
    #[arg(long, value_name = "PATH")]
    pub gpu_common: Option<PathBuf>,

    /// Path to the serial device rules fragment.
    #[arg(long, value_name = "PATH")]
    pub serial: Option<PathBuf>,

    /// Path to the net device rules fragment.
    #[arg(long, value_name = "PATH")]
    pub net: Option<PathBuf>,

    /// Path to the block device rules fragment.
    #[arg(long, value_name = "PATH")]
    pub block: Option<PathBuf>,

    /// Path to the vhost-user frontend rules fragment.
    #[arg(long, value_name = "PATH")]
    pub vhost_user: Option<PathBuf>,

    /// Path to the vhost-vsock rules fragment.
    #[arg(long, value_name = "PATH")]
    pub vhost_vsock: Option<PathBuf>,
}

impl FragmentArgs {
    /// Build the per-invocation catalog from the supplied flags.
    #[must_use]
    pub fn catalog(&self) -> FragmentCatalog {
        let mut catalog = FragmentCatalog::new();
        let supplied = [
            (Fragment::CommonDevice, &self.common_device),
            (Fragment::GpuCommon, &self.gpu_common),
            (Fragment::Serial, &self.serial),
            (Fragment::Net, &self.net),
            (Fragment::Block, &self.block),
            (Fragment::VhostUser, &self.vhost_user),
            (Fragment::VhostVsock, &self.vhost_vsock),
        ];
        for (fragment, path) in supplied {
            if let Some(path) = path {
                catalog.set_path(fragment, path);
            }
        }
        catalog
    }
}

/// Arguments for `seccompose compose`.
#[derive(Args)]
pub struct ComposeArgs {
    /// Read the base policy from a file instead of stdin.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Write the composed policy to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub fragments: FragmentArgs,
}

/// Execute the compose command.
pub fn execute(args: &ComposeArgs) -> Result<()> {
    let catalog = args.fragments.catalog();

    let mut composed = Vec::new();
    match &args.input {
        Some(path) => {
            let file = fs::File::open(path)?;
            compose(BufReader::new(file), &mut composed, &catalog)?;
        }
        None => {
            let stdin = io::stdin();
            compose(stdin.lock(), &mut composed, &catalog)?;
        }
    }

    // Composition succeeded — only now touch the destination.
    match &args.output {
        Some(path) => fs::write(path, &composed)?,
        None => io::stdout().write_all(&composed)?,
    }

    debug!(bytes = composed.len(), "composed policy written");
    Ok(())
}
