// Short-option test driver. The first argument is the option-string, the
// rest are parsed with it: one "opt" line per matched option, then a
// "rest" line with the leftover operands.

use std::process::ExitCode;

use getopt::{parse_next, OptState, Token};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("usage: tgetopt OPTSTRING [ARG]...")]
    Usage,
    #[error("unrecognized option: -{0}")]
    Unknown(char),
    #[error("option -{0} requires an operand")]
    MissingOperand(char),
}

fn run(args: &[String]) -> Result<(), CliError> {
    let optstring = args.first().ok_or(CliError::Usage)?;
    let mut argv: Vec<&str> = vec!["tgetopt"];
    argv.extend(args[1..].iter().map(String::as_str));

    let mut state = OptState::new();
    loop {
        match parse_next(&argv, optstring, None, false, &mut state) {
            Token::End => break,
            Token::Opt {
                opt,
                arg: Some(value),
            } => println!("opt {} {}", opt, value),
            Token::Opt { opt, arg: None } => println!("opt {}", opt),
            Token::Flag => {}
            Token::Unknown(c) => return Err(CliError::Unknown(c)),
            Token::MissingArg(c) => return Err(CliError::MissingOperand(c)),
        }
    }
    println!("rest {}", argv[state.optind..].join(" "));
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tgetopt: {}", err);
            ExitCode::FAILURE
        }
    }
}
