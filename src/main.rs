use anyhow::Context;
use sassling::Sassling;

#[derive(clap::Parser)]
struct Args {
    /// Style source text to compile.
    source: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = <Args as clap::Parser>::parse();

    let Some(source) = args.source else {
        eprintln!("usage: sassling <source>");
        return Ok(());
    };

    let ssl = Sassling::init();
    let css = sassling::compile(&ssl, &source).context("compilation failed")?;
    print!("{css}");

    Ok(())
}
