//! Renders the generated bytecode header.
//!
//! The header has two regions: an always-present block of namespaced getter
//! declarations, and a definition block compiled only in the one translation
//! unit that defines `SHADER_BYTECODE_IMPLEMENTATION`. Each definition wraps
//! the `<name>_Bytecode` array supplied by the per-shader header named by the
//! include template.

use crate::manifest::HeaderConfig;

/// Renders the whole header for the given shader names, in input order.
pub fn render_header(config: &HeaderConfig, shaders: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&render_prologue(config));
    out.push('\n');
    out.push_str(&render_declarations(config, shaders));
    out.push('\n');
    out.push_str(&render_implementation(config, shaders));
    out
}

fn render_prologue(config: &HeaderConfig) -> String {
    let descriptor = &config.descriptor_type;
    let mut block = String::from("#pragma once\n");
    block.push_str(&format!("#include \"{}\"\n\n", config.accessor_header));
    block.push_str(&format!(
        "#define DECLARE_BYTECODE_GETTER(shader)\t{descriptor} shader();\n"
    ));
    block.push_str(&format!(
        "#define DEFINE_BYTECODE_GETTER(shader)\t{descriptor} shader() {{ return {{ ::shader##_Bytecode, sizeof(::shader##_Bytecode) }}; }}\n"
    ));
    block
}

fn render_declarations(config: &HeaderConfig, shaders: &[String]) -> String {
    let mut block = String::from("// NOTE: Public interface\n");
    block.push_str(&format!("namespace {}\n{{\n", config.namespace));
    for name in shaders {
        block.push_str(&format!("\tDECLARE_BYTECODE_GETTER({name});\n"));
    }
    block.push_str("}\n");
    block
}

fn render_implementation(config: &HeaderConfig, shaders: &[String]) -> String {
    let mut block = String::from("// NOTE: Implementation included in the cpp file\n");
    block.push_str("#ifdef SHADER_BYTECODE_IMPLEMENTATION\n\n");
    for name in shaders {
        let include_path = config.include_template.replace("{name}", name);
        block.push_str(&format!("#include \"{include_path}\"\n"));
    }
    block.push('\n');
    block.push_str(&format!("namespace {}\n{{\n", config.namespace));
    for name in shaders {
        block.push_str(&format!("\tDEFINE_BYTECODE_GETTER({name});\n"));
    }
    block.push_str("}\n\n");
    block.push_str("#endif /* SHADER_BYTECODE_IMPLEMENTATION */\n");
    block
}
