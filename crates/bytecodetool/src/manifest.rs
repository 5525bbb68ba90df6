//! Header manifest parsing.
//!
//! A manifest describes one generated header per `[[header]]` table:
//!
//! ```toml
//! [[header]]
//! shader_list = "ShaderList.txt"
//! output_file = "ShaderBytecode.h"
//! namespace = "Comfy::Render"
//! include_template = "Detail/{name}.h"
//! ```
//!
//! `accessor_header` and `descriptor_type` may be set per header to override
//! the shared accessor include and the descriptor type named in the generated
//! getter macros.

use crate::manifest::Error::{InvalidType, MissingField};
use anyhow::Context;
use std::env;
use std::path::{Path, PathBuf};
use toml::Value as TomlValue;

/// Header included at the top of every generated file, declaring the bytecode
/// descriptor type.
pub const DEFAULT_ACCESSOR_HEADER: &str = "Render/D3D11/D3D11Shader.h";

/// Descriptor type returned by the generated getter functions.
pub const DEFAULT_DESCRIPTOR_TYPE: &str = "D3D11BytecodeView";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid type for field {0}")]
    InvalidType(&'static str),
    #[error("{0}")]
    Other(&'static str),
}

#[derive(Debug, Clone)]
pub struct BuildManifest {
    pub manifest_path: PathBuf,
    pub headers: Vec<HeaderConfig>,
}

/// Configuration for a single generated header.
#[derive(Debug, Clone)]
pub struct HeaderConfig {
    /// Path to the shader name listing, one name per line.
    pub shader_list: String,
    /// Path of the generated header.
    pub output_file: String,
    /// C++ namespace enclosing the getter declarations and definitions.
    pub namespace: String,
    /// Include path of a single shader's bytecode header. `{name}` is
    /// replaced by the shader name.
    pub include_template: String,
    /// Header declaring the descriptor type.
    pub accessor_header: String,
    /// Descriptor type returned by the getters.
    pub descriptor_type: String,
}

impl BuildManifest {
    pub(crate) fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        fn load_inner(path: &Path) -> anyhow::Result<BuildManifest> {
            let manifest_str = std::fs::read_to_string(&path)?;
            let manifest_toml: TomlValue = toml::from_str(&manifest_str).context("invalid TOML")?;
            BuildManifest::from_toml(&manifest_toml, path.to_path_buf()).context("failed to parse manifest")
        }
        load_inner(path.as_ref())
    }

    pub fn from_toml(toml: &TomlValue, manifest_path: PathBuf) -> anyhow::Result<Self> {
        // [[header]] tables, in manifest order
        let headers_toml = toml
            .get_optional_array("header")?
            .ok_or(MissingField("header"))?;

        let mut headers = Vec::with_capacity(headers_toml.len());
        for header_toml in headers_toml {
            headers.push(HeaderConfig::from_toml(header_toml)?);
        }

        Ok(BuildManifest {
            manifest_path,
            headers,
        })
    }

    /// Resolves relative paths relative to the manifest directory, or
    /// returns the given path if absolute
    pub(crate) fn resolve_path(&self, path: &str) -> PathBuf {
        let manifest_dir = if let Some(parent) = self.manifest_path.parent() {
            parent.to_path_buf()
        } else {
            env::current_dir().unwrap()
        };

        let input_path = Path::new(path);
        if input_path.is_absolute() {
            input_path.to_path_buf()
        } else {
            manifest_dir.join(input_path)
        }
    }
}

impl HeaderConfig {
    fn from_toml(toml: &TomlValue) -> anyhow::Result<Self> {
        let shader_list = toml
            .get_optional_str("shader_list")?
            .ok_or(MissingField("shader_list"))?
            .to_string();

        let output_file = toml
            .get_optional_str("output_file")?
            .ok_or(MissingField("output_file"))?
            .to_string();

        let namespace = toml
            .get_optional_str("namespace")?
            .ok_or(MissingField("namespace"))?
            .to_string();

        let include_template = toml
            .get_optional_str("include_template")?
            .ok_or(MissingField("include_template"))?
            .to_string();
        if !include_template.contains("{name}") {
            return Err(Error::Other("include_template must contain a {name} placeholder").into());
        }

        let accessor_header = toml
            .get_optional_str("accessor_header")?
            .unwrap_or(DEFAULT_ACCESSOR_HEADER)
            .to_string();

        let descriptor_type = toml
            .get_optional_str("descriptor_type")?
            .unwrap_or(DEFAULT_DESCRIPTOR_TYPE)
            .to_string();

        Ok(HeaderConfig {
            shader_list,
            output_file,
            namespace,
            include_template,
            accessor_header,
            descriptor_type,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////

trait TomlExt {
    /// Retrieves an optional string field from a TOML value.
    ///
    /// Returns `Ok(None)` if the field is not present.
    /// Returns `Err(Error::InvalidType)` if the field is present but not a string.
    fn get_optional_str(&self, field: &'static str) -> Result<Option<&str>, Error>;
    /// Retrieves an optional array field from a TOML value.
    ///
    /// Returns `Ok(None)` if the field is not present.
    /// Returns `Err(Error::InvalidType)` if the field is present but not an array
    fn get_optional_array(&self, field: &'static str) -> Result<Option<&Vec<TomlValue>>, Error>;
}

impl TomlExt for toml::Value {
    fn get_optional_str(&self, field: &'static str) -> Result<Option<&str>, Error> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => value.as_str().ok_or(InvalidType(field)).map(Some),
        }
    }

    fn get_optional_array(&self, field: &'static str) -> Result<Option<&Vec<TomlValue>>, Error> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => value.as_array().ok_or(InvalidType(field)).map(|arr| Some(arr)),
        }
    }
}
