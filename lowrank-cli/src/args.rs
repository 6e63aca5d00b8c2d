//! Positional argument parsing

use std::path::PathBuf;

pub const USAGE: &str = "usage: lowrank <input.png> <rank> [output.png]";

/// Output path used when none is given
pub const DEFAULT_OUTPUT: &str = "out.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub input: PathBuf,
    pub rank: usize,
    pub output: PathBuf,
}

/// Parse the arguments following the program name
pub fn parse_args<I, S>(args: I) -> Result<Args, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let (input, rank, output) = match args.as_slice() {
        [input, rank] => (input, rank, DEFAULT_OUTPUT),
        [input, rank, output] => (input, rank, output.as_str()),
        _ => return Err(USAGE.to_string()),
    };

    let rank = match rank.trim().parse::<usize>() {
        Ok(k) if k > 0 => k,
        _ => {
            return Err(format!(
                "rank must be a positive integer, got {:?}\n{}",
                rank, USAGE
            ))
        }
    };

    Ok(Args {
        input: PathBuf::from(input),
        rank,
        output: PathBuf::from(output),
    })
}
