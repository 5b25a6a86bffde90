/*
    Operator console commands, one per line:
    - call <floor>          Hall call at a floor
    - press <car> <floor>   Button pressed inside a car
    - service <car>         Maintenance crew finished with a car
    - tick [n]              Advance the clock by hand (default 1)
    - status                Print every car as JSON
    - quit
*/

/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::str::FromStr;
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{CarId, Floor};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Call(Floor),
    Press(CarId, Floor),
    Service(CarId),
    Tick(u64),
    Status,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}'")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a valid number")]
    BadNumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Command, CommandError> {
        let mut words = line.split_whitespace();
        let keyword = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        match (keyword.to_lowercase().as_str(), args.as_slice()) {
            ("call", [floor]) => Ok(Command::Call(parse_number(floor)?)),
            ("call", _) => Err(CommandError::Usage("call <floor>")),
            ("press", [car, floor]) => Ok(Command::Press(parse_number(car)?, parse_number(floor)?)),
            ("press", _) => Err(CommandError::Usage("press <car> <floor>")),
            ("service", [car]) => Ok(Command::Service(parse_number(car)?)),
            ("service", _) => Err(CommandError::Usage("service <car>")),
            ("tick", []) => Ok(Command::Tick(1)),
            ("tick", [count]) => Ok(Command::Tick(parse_number(count)?)),
            ("tick", _) => Err(CommandError::Usage("tick [n]")),
            ("status", []) => Ok(Command::Status),
            ("quit", []) | ("exit", []) => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(keyword.to_string())),
        }
    }
}

fn parse_number<T: FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse()
        .map_err(|_| CommandError::BadNumber(word.to_string()))
}

/***************************************/
/*             Unit tests              */
/***************************************/
