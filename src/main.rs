//! ggem command-line interface
//!
//! Scaffold, build, install, push, tag and release Ruby gems

use ggem::{Cli, Config, Context, SystemRunner};
use std::env;
use std::io;
use std::process;
use std::rc::Rc;

fn main() {
    let config = Config::from_env();
    ggem::init_debug(config.debug);

    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("error: cannot read the working directory: {e}");
            process::exit(1);
        }
    };
    ggem::debug!("running in {}", cwd.display());

    let ctx = Context::new(cwd, config, Rc::new(SystemRunner));
    let args: Vec<String> = env::args().skip(1).collect();

    let code = Cli::new(&ctx).run(&args, &mut io::stdout(), &mut io::stderr());
    process::exit(code);
}
