use crate::cli::args::InitArgs;
use crate::exit_codes;
use anyhow::Context;

pub fn run(args: InitArgs) -> anyhow::Result<i32> {
    if args.out.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to replace it)",
            args.out.display()
        );
    }
    spore_core::config::write_sample_config(&args.out)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    eprintln!("Wrote {}", args.out.display());
    Ok(exit_codes::SUCCESS)
}
