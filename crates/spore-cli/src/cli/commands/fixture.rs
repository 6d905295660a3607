use crate::cli::args::FixtureArgs;
use crate::exit_codes;
use anyhow::Context;
use spore_core::dump::write_dump;
use spore_core::TraceBuffer;

pub fn run(args: FixtureArgs) -> anyhow::Result<i32> {
    let mut buffer = TraceBuffer::try_fixture(args.traces, args.steps)
        .context("--traces x --steps is too large")?;
    if let Some(c) = args.corrupt {
        buffer
            .set(c.time_index, c.trace_id, c.value)
            .context("--corrupt points outside the fixture")?;
        tracing::info!(
            time_index = c.time_index,
            trace_id = c.trace_id,
            value = c.value,
            "corrupted fixture slot"
        );
    }
    write_dump(&buffer, &args.out)?;
    eprintln!(
        "Wrote {} ({} traces x {} steps)",
        args.out.display(),
        args.traces,
        args.steps
    );
    Ok(exit_codes::SUCCESS)
}
