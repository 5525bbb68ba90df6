use crate::manifest::{BuildManifest, HeaderConfig};
use crate::render::render_header;
use crate::shader_list::load_shader_list;
use crate::BuildOptions;
use anyhow::{anyhow, Context};
use color_print::{ceprintln, cprintln};
use std::path::Path;
use std::{fmt, fs};

/// Bundles generation errors from multiple headers into a single error.
#[derive(Debug)]
struct GenerationErrors(Vec<anyhow::Error>);

impl fmt::Display for GenerationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for err in &self.0 {
            // {:#} prints the whole context chain of each bundled error
            writeln!(f, "{err:#}")?;
        }
        Ok(())
    }
}

impl BuildManifest {
    pub(crate) fn generate_all(&self, options: &BuildOptions) -> anyhow::Result<()> {
        if options.emit_cargo_deps {
            println!("cargo:rerun-if-changed={}", self.manifest_path.display());
        }

        let mut errors = GenerationErrors(Vec::new());

        for header in &self.headers {
            if !options.quiet {
                cprintln!("<g,bold>Generating</> {} (<i>{}</>)", header.output_file, header.namespace);
            }

            match self.generate_header(header, options) {
                Ok(()) => {}
                Err(err) => {
                    ceprintln!("<r,bold>Error(s)</>: {:#}", err);
                    errors.0.push(err);
                    eprintln!();
                }
            }
        }

        if !errors.0.is_empty() {
            Err(anyhow!(errors))
        } else {
            Ok(())
        }
    }

    fn generate_header(&self, header: &HeaderConfig, options: &BuildOptions) -> anyhow::Result<()> {
        let list_path = self.resolve_path(&header.shader_list);
        let output_path = self.resolve_path(&header.output_file);

        // the whole header is built in memory before anything is written, so
        // a read or validation failure leaves the previous output untouched
        let shaders = load_shader_list(&list_path)?;

        if options.emit_cargo_deps {
            println!("cargo:rerun-if-changed={}", list_path.display());
        }

        let contents = render_header(header, &shaders);
        write_header(&output_path, &contents)?;

        Ok(())
    }
}

fn write_header(path: &Path, contents: &str) -> anyhow::Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use crate::{generate_headers, BuildOptions};
    use std::fs;

    const OPTIONS: BuildOptions = BuildOptions {
        quiet: true,
        emit_cargo_deps: false,
    };

    fn write_manifest(dir: &std::path::Path) -> std::path::PathBuf {
        let manifest_path = dir.join("headers.toml");
        fs::write(
            &manifest_path,
            r#"
            [[header]]
            shader_list = "ShaderList.txt"
            output_file = "ShaderBytecode.h"
            namespace = "Comfy::Render"
            include_template = "Detail/{name}.h"
            "#,
        )
        .unwrap();
        manifest_path
    }

    #[test]
    fn generates_header_next_to_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = write_manifest(dir.path());
        fs::write(dir.path().join("ShaderList.txt"), "Sprite_PS\nSprite_VS\n").unwrap();

        generate_headers(&manifest_path, &OPTIONS).unwrap();

        let header = fs::read_to_string(dir.path().join("ShaderBytecode.h")).unwrap();
        assert!(header.contains("DECLARE_BYTECODE_GETTER(Sprite_PS);"));
        assert!(header.contains("#include \"Detail/Sprite_VS.h\""));
    }

    #[test]
    fn reruns_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = write_manifest(dir.path());
        fs::write(dir.path().join("ShaderList.txt"), "Sprite_PS\n").unwrap();
        let output_path = dir.path().join("ShaderBytecode.h");

        generate_headers(&manifest_path, &OPTIONS).unwrap();
        let first = fs::read(&output_path).unwrap();
        generate_headers(&manifest_path, &OPTIONS).unwrap();
        let second = fs::read(&output_path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn output_overwritten_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = write_manifest(dir.path());
        fs::write(dir.path().join("ShaderList.txt"), "Sprite_PS\n").unwrap();
        let output_path = dir.path().join("ShaderBytecode.h");
        fs::write(&output_path, "stale contents").unwrap();

        generate_headers(&manifest_path, &OPTIONS).unwrap();

        let header = fs::read_to_string(&output_path).unwrap();
        assert!(!header.contains("stale contents"));
        assert!(header.starts_with("#pragma once\n"));
    }

    #[test]
    fn missing_list_leaves_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = write_manifest(dir.path());
        let output_path = dir.path().join("ShaderBytecode.h");
        fs::write(&output_path, "previous contents").unwrap();

        generate_headers(&manifest_path, &OPTIONS).unwrap_err();

        assert_eq!(fs::read_to_string(&output_path).unwrap(), "previous contents");
    }

    #[test]
    fn invalid_name_leaves_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = write_manifest(dir.path());
        fs::write(dir.path().join("ShaderList.txt"), "Sprite_PS\nbad name\n").unwrap();
        let output_path = dir.path().join("ShaderBytecode.h");
        fs::write(&output_path, "previous contents").unwrap();

        let err = generate_headers(&manifest_path, &OPTIONS).unwrap_err();

        assert!(err.to_string().contains("line 2"));
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "previous contents");
    }
}
