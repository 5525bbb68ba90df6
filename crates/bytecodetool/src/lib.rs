mod generate;
mod manifest;
mod render;
mod shader_list;

use anyhow::Context;
use color_print::cprintln;
pub use manifest::{BuildManifest, HeaderConfig};
pub use render::render_header;
pub use shader_list::load_shader_list;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Don't print logs to stdout.
    pub quiet: bool,
    /// Emit cargo dependency information.
    pub emit_cargo_deps: bool,
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct Error(#[from] anyhow::Error);

impl Error {
    pub fn print_cargo_error(&self) {
        let fmt = format!("{:#}", self.0);
        for line in fmt.lines() {
            println!("cargo::error={line}");
        }
    }
}

/// Generate all bytecode headers defined in the manifest at the given path.
///
/// # Arguments
/// * `manifest_path` - Path to the header manifest file (TOML).
pub fn generate_headers(manifest_path: impl AsRef<Path>, options: &BuildOptions) -> Result<(), Error> {
    fn generate_headers_inner(manifest_path: &Path, options: &BuildOptions) -> anyhow::Result<()> {
        let manifest = match BuildManifest::load(manifest_path) {
            Ok(manifest) => manifest,
            Err(err) => {
                if !options.quiet {
                    cprintln!(
                        "<r,bold>error:</> failed to load manifest from {}: {:#}",
                        manifest_path.display(),
                        err
                    );
                }
                return Err(err).with_context(|| format!("failed to load manifest from {}", manifest_path.display()));
            }
        };

        manifest.generate_all(options)?;

        Ok(())
    }

    generate_headers_inner(manifest_path.as_ref(), options).map_err(Error)
}
