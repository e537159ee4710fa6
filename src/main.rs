use std::io;

use clap::Parser;

use tagrt::config::Config;
use tagrt::value::Word;
use tagrt::{fault, host, logging};

unsafe extern "C" {
    fn our_code_starts_here(heap: *mut Word) -> Word;
}

fn main() {
    let config = Config::parse();
    logging::init(&config);

    if let Err(e) = host::run(our_code_starts_here, &config, &mut io::stdout()) {
        fault::terminate(&e);
    }
}
