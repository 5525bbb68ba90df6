use clap::Parser;
use color_print::ceprintln;

#[derive(Parser, Debug)]
struct Args {
    /// Path to the header manifest.
    manifest_path: String,
    /// Don't print logs to stdout.
    #[clap(short, long)]
    quiet: bool,
    /// Print cargo dependency directives.
    #[clap(long)]
    emit_cargo_deps: bool,
}

fn main() {
    let args = Args::parse();

    let build_options = bytecodetool::BuildOptions {
        quiet: args.quiet,
        emit_cargo_deps: args.emit_cargo_deps,
    };
    match bytecodetool::generate_headers(&args.manifest_path, &build_options) {
        Ok(()) => {}
        Err(err) => {
            ceprintln!("<r,bold>error:</> {err}");
            std::process::exit(1);
        }
    }
}
