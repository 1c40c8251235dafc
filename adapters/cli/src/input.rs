use std::{error::Error, fmt};

use otyugh_core::{Command, Direction, PickupItem, TreasureKind};

/// Follow-up question asked when a move or shot lacks its direction.
const WHERE_TO: &str = "Where to? ";
/// Follow-up question asked when a pickup lacks its item.
const WHAT: &str = "What? ";
/// Follow-up question asked when a shot lacks its distance.
const HOW_FAR: &str = "No. of caves? ";

/// A complete player instruction parsed from console tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Walk through the entrance facing the direction.
    Move(Direction),
    /// Pick up an item lying in the current cell.
    Pickup(PickupItem),
    /// Loose an arrow.
    Shoot {
        /// Heading of the arrow as it leaves the cell.
        direction: Direction,
        /// Number of caves the arrow travels.
        distance: u32,
    },
    /// Leave the game.
    Quit,
}

impl Input {
    /// Parses an accumulated line of whitespace separated tokens.
    ///
    /// Tokens are case insensitive. A shot accepts its direction and distance
    /// in either order.
    pub(crate) fn parse(line: &str) -> Result<Self, InputError> {
        let lowered = line.to_lowercase();
        let mut tokens = lowered.split_whitespace();
        let action = tokens.next().ok_or(InputError::Empty)?;

        let input = match action {
            "move" | "m" => {
                let token = tokens.next().ok_or(InputError::Incomplete(WHERE_TO))?;
                Self::Move(parse_direction(token)?)
            }
            "pickup" | "p" => {
                let token = tokens.next().ok_or(InputError::Incomplete(WHAT))?;
                Self::Pickup(parse_item(token)?)
            }
            "shoot" | "s" => {
                let first = tokens.next().ok_or(InputError::Incomplete(HOW_FAR))?;
                let (direction, distance) = match first.parse::<u32>() {
                    Ok(distance) => {
                        let token = tokens.next().ok_or(InputError::Incomplete(WHERE_TO))?;
                        (parse_direction(token)?, distance)
                    }
                    Err(_) => {
                        let direction = parse_direction(first)?;
                        let token = tokens.next().ok_or(InputError::Incomplete(HOW_FAR))?;
                        (direction, parse_distance(token)?)
                    }
                };
                Self::Shoot {
                    direction,
                    distance,
                }
            }
            "quit" | "q" => Self::Quit,
            other => return Err(InputError::UnknownAction(other.to_owned())),
        };

        match tokens.next() {
            Some(extra) => Err(InputError::Trailing(extra.to_owned())),
            None => Ok(input),
        }
    }

    /// Converts the input into the world command it requests, if any.
    pub(crate) fn command(self) -> Option<Command> {
        match self {
            Self::Move(direction) => Some(Command::MovePlayer { direction }),
            Self::Pickup(PickupItem::Treasure(kind)) => Some(Command::PickTreasure { kind }),
            Self::Pickup(PickupItem::Arrows) => Some(Command::PickArrows),
            Self::Shoot {
                direction,
                distance,
            } => Some(Command::ShootArrow {
                direction,
                distance,
            }),
            Self::Quit => None,
        }
    }
}

fn parse_direction(token: &str) -> Result<Direction, InputError> {
    match token {
        "north" | "n" => Ok(Direction::North),
        "south" | "s" => Ok(Direction::South),
        "east" | "e" => Ok(Direction::East),
        "west" | "w" => Ok(Direction::West),
        other => Err(InputError::UnknownDirection(other.to_owned())),
    }
}

fn parse_item(token: &str) -> Result<PickupItem, InputError> {
    match token {
        "ruby" | "rubies" | "r" => Ok(PickupItem::Treasure(TreasureKind::Rubies)),
        "diamond" | "diamonds" | "d" => Ok(PickupItem::Treasure(TreasureKind::Diamonds)),
        "sapphire" | "sapphires" | "s" => Ok(PickupItem::Treasure(TreasureKind::Sapphires)),
        "arrow" | "arrows" | "a" => Ok(PickupItem::Arrows),
        other => Err(InputError::UnknownItem(other.to_owned())),
    }
}

fn parse_distance(token: &str) -> Result<u32, InputError> {
    token
        .parse()
        .map_err(|_| InputError::InvalidDistance(token.to_owned()))
}

/// Reasons a console line could not be turned into an [`Input`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum InputError {
    /// The line held no tokens.
    Empty,
    /// The line stopped before the instruction was complete; holds the follow-up question.
    Incomplete(&'static str),
    /// The first token was not a known action.
    UnknownAction(String),
    /// A direction token was not recognised.
    UnknownDirection(String),
    /// A pickup token was not recognised.
    UnknownItem(String),
    /// A distance token was not a non-negative number.
    InvalidDistance(String),
    /// Tokens followed a complete instruction.
    Trailing(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete(question) => f.write_str(question),
            Self::UnknownDirection(_) => f.write_str("Not a valid move. Please try again."),
            Self::Empty
            | Self::UnknownAction(_)
            | Self::UnknownItem(_)
            | Self::InvalidDistance(_)
            | Self::Trailing(_) => f.write_str("Invalid input, please try again"),
        }
    }
}

impl Error for InputError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_forms_agree() {
        assert_eq!(Input::parse("m n"), Input::parse("MOVE North"));
        assert_eq!(Input::parse("move west"), Ok(Input::Move(Direction::West)));
        assert_eq!(Input::parse("q"), Ok(Input::Quit));
        assert_eq!(
            Input::parse("p rubies"),
            Ok(Input::Pickup(PickupItem::Treasure(TreasureKind::Rubies)))
        );
        assert_eq!(Input::parse("pickup a"), Ok(Input::Pickup(PickupItem::Arrows)));
    }

    #[test]
    fn the_letter_s_depends_on_position() {
        assert_eq!(
            Input::parse("s s 2"),
            Ok(Input::Shoot {
                direction: Direction::South,
                distance: 2
            })
        );
        assert_eq!(
            Input::parse("p s"),
            Ok(Input::Pickup(PickupItem::Treasure(TreasureKind::Sapphires)))
        );
    }

    #[test]
    fn shots_accept_distance_first() {
        assert_eq!(Input::parse("shoot 3 e"), Input::parse("shoot east 3"));
    }

    #[test]
    fn missing_tokens_ask_a_follow_up_question() {
        assert_eq!(Input::parse("m"), Err(InputError::Incomplete(WHERE_TO)));
        assert_eq!(Input::parse("p"), Err(InputError::Incomplete(WHAT)));
        assert_eq!(Input::parse("s"), Err(InputError::Incomplete(HOW_FAR)));
        assert_eq!(Input::parse("s 2"), Err(InputError::Incomplete(WHERE_TO)));
        assert_eq!(Input::parse("s n"), Err(InputError::Incomplete(HOW_FAR)));
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!(Input::parse("   "), Err(InputError::Empty));
        assert_eq!(
            Input::parse("m up").map_err(|error| error.to_string()),
            Err("Not a valid move. Please try again.".to_owned())
        );
        assert!(matches!(
            Input::parse("dance"),
            Err(InputError::UnknownAction(_))
        ));
        assert!(matches!(
            Input::parse("s n -1"),
            Err(InputError::InvalidDistance(_))
        ));
        assert!(matches!(
            Input::parse("m n n"),
            Err(InputError::Trailing(_))
        ));
    }

    #[test]
    fn inputs_map_to_commands() {
        assert_eq!(Input::Quit.command(), None);
        assert_eq!(
            Input::Pickup(PickupItem::Arrows).command(),
            Some(Command::PickArrows)
        );
        assert_eq!(
            Input::Shoot {
                direction: Direction::East,
                distance: 0
            }
            .command(),
            Some(Command::ShootArrow {
                direction: Direction::East,
                distance: 0
            })
        );
    }
}
