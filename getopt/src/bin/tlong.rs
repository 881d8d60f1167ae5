// Long-option test driver. The first argument selects the mode ("long"
// or "longonly"); the rest are parsed against a fixed table modeled on
// the classic getopt_long(3) example.

use std::process::ExitCode;
use std::sync::atomic::{AtomicI32, Ordering};

use getopt::{parse_next, HasArg, LongOpt, OptState, Token};

const OPTSTRING: &str = "a:Ad:c:f:";

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let longonly = match args.first().map(String::as_str) {
        Some("long") => false,
        Some("longonly") => true,
        _ => {
            eprintln!("usage: tlong long|longonly [ARG]...");
            return ExitCode::FAILURE;
        }
    };

    let verbose = AtomicI32::new(0);
    let table = [
        LongOpt::new("add", HasArg::Required, 'a' as i32),
        LongOpt::new("append", HasArg::No, 'A' as i32),
        LongOpt::new("delete", HasArg::Required, 'd' as i32),
        LongOpt::flag("verbose", &verbose, 1),
        LongOpt::new("create", HasArg::Optional, 'c' as i32),
        LongOpt::new("file", HasArg::Required, 'f' as i32),
    ];

    let mut argv: Vec<&str> = vec!["tlong"];
    argv.extend(args[1..].iter().map(String::as_str));

    let mut state = OptState::new();
    loop {
        match parse_next(&argv, OPTSTRING, Some(&table), longonly, &mut state) {
            Token::End => break,
            Token::Opt {
                opt,
                arg: Some(value),
            } => println!("opt {} {}", opt, value),
            Token::Opt { opt, arg: None } => println!("opt {}", opt),
            Token::Flag => {
                if let Some(index) = state.longindex {
                    println!("flag {}", index);
                }
            }
            Token::Unknown(_) => {
                eprintln!("tlong: unrecognized option at index {}", state.optind);
                return ExitCode::FAILURE;
            }
            Token::MissingArg(c) => {
                eprintln!("tlong: option {} requires an operand", c);
                return ExitCode::FAILURE;
            }
        }
    }
    println!("verbose {}", verbose.load(Ordering::Relaxed));
    println!("rest {}", argv[state.optind..].join(" "));
    ExitCode::SUCCESS
}
