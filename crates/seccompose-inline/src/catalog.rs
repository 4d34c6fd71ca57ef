//! The closed catalog of shared policy fragments.
//!
//! The set of fragments is fixed at compile time: anything a base policy
//! tries to include that does not map into [`Fragment`] is outside the
//! catalog and rejected by construction. Which fragments actually exist on
//! a given target is an invocation-time concern — [`FragmentCatalog`] maps
//! each member to an optional file path, and an absent path only becomes an
//! error if a directive references it.

use std::fmt;
use std::path::{Path, PathBuf};

/// A member of the fragment catalog.
///
/// One variant per shared policy file. The well-known file names are the
/// fixed suffixes that include targets are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fragment {
    /// Rules common to every sandboxed device process.
    CommonDevice,
    /// Rules shared by GPU device variants.
    GpuCommon,
    /// Serial device rules.
    Serial,
    /// Net device rules.
    Net,
    /// Block device rules.
    Block,
    /// Rules for vhost-user frontends.
    VhostUser,
    /// Rules for the vhost-vsock device.
    VhostVsock,
}

impl Fragment {
    /// Every catalog member, in the order the configuration surface lists
    /// them.
    pub const ALL: [Fragment; 7] = [
        Fragment::CommonDevice,
        Fragment::GpuCommon,
        Fragment::Serial,
        Fragment::Net,
        Fragment::Block,
        Fragment::VhostUser,
        Fragment::VhostVsock,
    ];

    /// The fragment's name, e.g. `common_device`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Fragment::CommonDevice => "common_device",
            Fragment::GpuCommon => "gpu_common",
            Fragment::Serial => "serial",
            Fragment::Net => "net",
            Fragment::Block => "block",
            Fragment::VhostUser => "vhost_user",
            Fragment::VhostVsock => "vhost_vsock",
        }
    }

    /// The well-known policy file name, e.g. `common_device.policy`.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Fragment::CommonDevice => "common_device.policy",
            Fragment::GpuCommon => "gpu_common.policy",
            Fragment::Serial => "serial.policy",
            Fragment::Net => "net.policy",
            Fragment::Block => "block.policy",
            Fragment::VhostUser => "vhost_user.policy",
            Fragment::VhostVsock => "vhost_vsock.policy",
        }
    }

    /// What the fragment covers, for listings.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Fragment::CommonDevice => "rules common to every sandboxed device",
            Fragment::GpuCommon => "rules shared by GPU device variants",
            Fragment::Serial => "serial device rules",
            Fragment::Net => "net device rules",
            Fragment::Block => "block device rules",
            Fragment::VhostUser => "vhost-user frontend rules",
            Fragment::VhostVsock => "vhost-vsock device rules",
        }
    }

    /// Match an include target against the catalog.
    ///
    /// Targets are matched by their final path component only — the
    /// directory prefix varies per install tree and per architecture, but
    /// the file name is fixed. Returns `None` for anything outside the
    /// closed set.
    #[must_use]
    pub fn from_include_target(target: &str) -> Option<Fragment> {
        let file_name = Path::new(target).file_name()?.to_str()?;
        Fragment::ALL
            .into_iter()
            .find(|fragment| fragment.file_name() == file_name)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-invocation mapping from catalog member to fragment file path.
///
/// Built once from the caller's arguments and only ever read afterwards.
/// Members without a path are legal — an architecture without GPU support
/// simply never supplies (or references) the GPU fragment.
#[derive(Debug, Clone, Default)]
pub struct FragmentCatalog {
    paths: [Option<PathBuf>; Fragment::ALL.len()],
}

impl FragmentCatalog {
    /// An empty catalog: every member unconfigured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style path registration.
    #[must_use]
    pub fn with_path(mut self, fragment: Fragment, path: impl Into<PathBuf>) -> Self {
        self.set_path(fragment, path);
        self
    }

    /// Register the file path backing `fragment`.
    pub fn set_path(&mut self, fragment: Fragment, path: impl Into<PathBuf>) {
        self.paths[fragment as usize] = Some(path.into());
    }

    /// The path backing `fragment`, if one was supplied.
    #[must_use]
    pub fn path(&self, fragment: Fragment) -> Option<&Path> {
        self.paths[fragment as usize].as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_matches_by_file_name() {
        assert_eq!(
            Fragment::from_include_target("/usr/share/policy/crosvm/common_device.policy"),
            Some(Fragment::CommonDevice)
        );
        assert_eq!(
            Fragment::from_include_target("gpu_common.policy"),
            Some(Fragment::GpuCommon)
        );
        assert_eq!(
            Fragment::from_include_target("./policies/vhost_vsock.policy"),
            Some(Fragment::VhostVsock)
        );
    }

    #[test]
    fn unknown_targets_do_not_match() {
        assert_eq!(Fragment::from_include_target("unknown_fragment.policy"), None);
        assert_eq!(Fragment::from_include_target(""), None);
        // Suffix must be the whole file name, not a substring of it.
        assert_eq!(Fragment::from_include_target("not_common_device.policy"), None);
        assert_eq!(Fragment::from_include_target("common_device.policy.bak"), None);
    }

    #[test]
    fn catalog_paths_default_to_unset() {
        let catalog = FragmentCatalog::new();
        for fragment in Fragment::ALL {
            assert!(catalog.path(fragment).is_none());
        }
    }

    #[test]
    fn catalog_registers_paths() {
        let catalog = FragmentCatalog::new()
            .with_path(Fragment::Net, "/tmp/net.policy")
            .with_path(Fragment::Block, "/tmp/block.policy");

        assert_eq!(
            catalog.path(Fragment::Net),
            Some(Path::new("/tmp/net.policy"))
        );
        assert_eq!(
            catalog.path(Fragment::Block),
            Some(Path::new("/tmp/block.policy"))
        );
        assert!(catalog.path(Fragment::Serial).is_none());
    }
}
