//! Resource replication for out-of-source documentation builds
//!
//! The manual is built outside the definitions tree, so a fixed set of
//! source resources (files and directory trees) is copied into the
//! build directory first. The expected-resources manifest doubles as a
//! structural fingerprint confirming that the named source root really
//! is a NeXus definitions directory.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Files expected in a definitions root directory
pub const ROOT_EXPECTED_FILES: [&str; 7] = [
    "COPYING",
    "LGPL.txt",
    "Makefile",
    "NXDL_VERSION",
    "nxdl.xsd",
    "nxdlTypes.xsd",
    "README.md",
];

/// Subdirectories expected in a definitions root directory
pub const ROOT_EXPECTED_SUBDIRS: [&str; 7] = [
    "applications",
    "base_classes",
    "contributed_definitions",
    "manual",
    "package",
    "utils",
    "www",
];

/// The resources replicated into the build directory
pub const REPLICATED_RESOURCES: [&str; 10] = [
    "LGPL.txt",
    "Makefile",
    "nxdl.xsd",
    "nxdlTypes.xsd",
    "NXDL_VERSION",
    "base_classes",
    "applications",
    "contributed_definitions",
    "manual",
    "utils",
];

/// Test whether `basedir` is a NeXus definitions directory
pub fn is_definitions_directory(basedir: &Path) -> bool {
    ROOT_EXPECTED_FILES
        .iter()
        .chain(ROOT_EXPECTED_SUBDIRS.iter())
        .all(|item| basedir.join(item).exists())
}

/// Reject inputs the replication cannot continue with
pub fn qualify_inputs(source_dir: &Path, target_dir: &Path) -> Result<()> {
    if !source_dir.exists() {
        return Err(Error::Resource(format!(
            "cannot find {}",
            source_dir.display()
        )));
    }
    if !source_dir.is_dir() {
        return Err(Error::Resource(format!(
            "not a directory: {}",
            source_dir.display()
        )));
    }
    if !is_definitions_directory(source_dir) {
        return Err(Error::Resource(format!(
            "not a NeXus definitions root directory: {}",
            source_dir.display()
        )));
    }
    if same_directory(source_dir, target_dir) {
        return Err(Error::Resource(
            "source and target directories cannot be the same".to_string(),
        ));
    }
    Ok(())
}

/// Compare directories after resolving relative paths where possible
fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Copy one resource, file or directory tree, overwriting the target
pub fn replicate(source: &Path, target: &Path) -> Result<()> {
    if source.is_dir() {
        if target.exists() {
            fs::remove_dir_all(target)?;
        }
        copy_dir(source, target)
    } else {
        fs::copy(source, target)?;
        Ok(())
    }
}

fn copy_dir(source: &Path, target: &Path) -> Result<()> {
    fs::create_dir_all(target)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let src = entry.path();
        let dst = target.join(entry.file_name());
        if src.is_dir() {
            copy_dir(&src, &dst)?;
        } else {
            fs::copy(&src, &dst)?;
        }
    }
    Ok(())
}

/// Replicate the fixed resource list from a definitions tree into the
/// build directory, returning the (source, target) pairs copied
pub fn replicate_resources(
    source_root: &Path,
    target_dir: &Path,
) -> Result<Vec<(PathBuf, PathBuf)>> {
    qualify_inputs(source_root, target_dir)?;
    fs::create_dir_all(target_dir)?;

    let mut names = REPLICATED_RESOURCES.to_vec();
    names.sort_unstable();

    let mut copied = Vec::new();
    for name in names {
        let source = source_root.join(name);
        let target = target_dir.join(name);
        replicate(&source, &target)?;
        copied.push((source, target));
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_rejected() {
        let err = qualify_inputs(Path::new("/no/such/dir"), Path::new("/tmp")).unwrap_err();
        assert!(matches!(err, Error::Resource(_)));
        assert!(format!("{}", err).contains("cannot find"));
    }

    #[test]
    fn test_manifest_lists_are_disjoint() {
        for file in ROOT_EXPECTED_FILES {
            assert!(!ROOT_EXPECTED_SUBDIRS.contains(&file));
        }
    }

    #[test]
    fn test_replicated_resources_are_expected_resources() {
        for name in REPLICATED_RESOURCES {
            assert!(
                ROOT_EXPECTED_FILES.contains(&name) || ROOT_EXPECTED_SUBDIRS.contains(&name),
                "{} is not in the root manifest",
                name
            );
        }
    }
}
