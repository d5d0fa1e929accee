use clap::Parser;
use extract_bytecode::args::ExtractArgs;
use eyre::Result;

fn main() {
    if let Err(err) = run() {
        let _ = extract_common::sh_err!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    extract_cli::handler::install();

    let args = ExtractArgs::parse();
    args.global.init()?;
    args.run()?;

    Ok(())
}
