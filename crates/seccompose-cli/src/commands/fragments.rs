//! The `seccompose fragments` subcommand.
//!
//! Lists the closed fragment catalog, so build scripts and humans can see
//! the fixed configuration surface without reading the source.

use clap::Args;
use color_eyre::eyre::Result;
use seccompose_inline::Fragment;

/// Arguments for `seccompose fragments`.
#[derive(Args)]
pub struct FragmentsArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the fragments command.
pub fn execute(args: &FragmentsArgs) -> Result<()> {
    if args.json {
        let entries: Vec<_> = Fragment::ALL
            .into_iter()
            .map(|fragment| {
                serde_json::json!({
                    "name": fragment.name(),
                    "file": fragment.file_name(),
                    "description": fragment.description(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for fragment in Fragment::ALL {
            println!(
                "{:<14} {:<22} {}",
                fragment.name(),
                fragment.file_name(),
                fragment.description()
            );
        }
    }

    Ok(())
}
