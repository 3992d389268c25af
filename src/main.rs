/* phone-forward
 *
 * To the extent possible under law, the author(s) have dedicated all
 * copyright and related and neighboring rights to this software to
 * the public domain worldwide. This software is distributed without
 * any warranty.
 *
 * You should have received a copy of the CC0 Public Domain Dedication
 * along with this software.
 * If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
 */

//! Entry point for `phfwd`: reads a script of forwarding commands (§6.2)
//! from a file or stdin, drives the interpreter, and reports the exit code
//! described in §6.3.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error};

use phone_forward::command;

/// Phone number forwarding rule interpreter.
#[derive(Parser, Debug)]
#[command(name = "phfwd", about = "Phone number forwarding rule interpreter")]
struct Cli {
    /// Script file to read commands from. Reads stdin when omitted.
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let input = match read_input(cli.script.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command::run(&input, &mut out) {
        Ok(()) => {
            debug!("reached clean end of input");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let _ = writeln!(io::stderr(), "{e}");
            ExitCode::FAILURE
        }
    }
}

fn read_input(script: Option<&std::path::Path>) -> io::Result<String> {
    match script {
        Some(path) => {
            debug!("reading script from {}", path.display());
            fs::read_to_string(path)
        }
        None => {
            debug!("reading script from stdin");
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
