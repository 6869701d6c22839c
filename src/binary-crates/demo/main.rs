/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[macro_use] extern crate log;

use clap::Arg;
use tmtx::demo::{self, Settings, LayoutChoice};

pub type FailResult<T> = Result<T, failure::Error>;

pub fn main() {
    _main().unwrap_or_else(|e| {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    });
}

pub fn _main() -> FailResult<()> {
    env_logger::init();
    let app = {
        clap::App::new("tmtx-demo")
            .about("Fills a 4x4 matrix, then scales, shifts, and combines it.")
            .args(&[
                Arg::with_name("fill")
                    .long("fill")
                    .value_name("VALUE")
                    .help("Initial value of every cell [default: 1]"),
                Arg::with_name("scalar")
                    .long("scalar")
                    .short("s")
                    .value_name("SCALAR")
                    .help("Scalar operand [default: 10]"),
                Arg::with_name("layout")
                    .long("layout")
                    .value_name("LAYOUT")
                    .possible_values(&["rows", "columns"])
                    .help("Storage order of the matrix [default: rows]"),
            ])
    };
    let matches = app.get_matches();
    let fill = matches.value_of("fill").unwrap_or("1").parse()?;
    let scalar = matches.value_of("scalar").unwrap_or("10").parse()?;
    let layout: LayoutChoice = matches.value_of("layout").unwrap_or("rows").parse()?;

    trace!("Running the scenario...");
    let report = demo::run(&Settings { fill, scalar, layout });
    println!("{}", report);
    Ok(())
}
