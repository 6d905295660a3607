use super::args::*;

pub mod fixture;
pub mod init;
pub mod verify;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Verify(args) => verify::run(args),
        Command::Fixture(args) => fixture::run(args),
        Command::Init(args) => init::run(args),
    }
}
