use reposcope::{
    cli::{Args, Command},
    logging,
};
use std::process;

fn main() {
    let args = Args::parse_args();
    logging::init_logger(args.verbose, args.quiet);

    let command = Command::from_args(args);
    process::exit(command.run());
}
