//! Project layouts for tests.

use std::fs;
use std::io;
use std::path::Path;

use crate::preflight::MANIFEST;
use crate::steps::{DEPS_DIR, LOCKFILE};

pub fn sample_manifest() -> &'static str {
    r#"{
  "name": "sample-app",
  "version": "1.0.0",
  "main": "expo-router/entry",
  "dependencies": {
    "expo": "~51.0.0",
    "react": "18.2.0",
    "react-native": "0.74.5"
  }
}"#
}

/// Writes a `package.json` that declares expo.
pub fn write_manifest(root: &Path) -> io::Result<()> {
    fs::write(root.join(MANIFEST), sample_manifest())
}

/// A populated `node_modules` tree with a nested package.
pub fn write_deps_dir(root: &Path) -> io::Result<()> {
    let pkg = root.join(DEPS_DIR).join("expo");
    fs::create_dir_all(pkg.join("build"))?;
    fs::write(pkg.join("package.json"), r#"{"name": "expo"}"#)?;
    fs::write(pkg.join("build/index.js"), "module.exports = {};")
}

pub fn write_lockfile(root: &Path) -> io::Result<()> {
    fs::write(root.join(LOCKFILE), r#"{"lockfileVersion": 3}"#)
}

/// Manifest, dependency directory and lockfile: a typical broken install.
pub fn broken_project(root: &Path) -> io::Result<()> {
    write_manifest(root)?;
    write_deps_dir(root)?;
    write_lockfile(root)
}
