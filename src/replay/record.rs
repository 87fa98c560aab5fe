use std::fmt;

use crate::board::Position;
use crate::error::ParseError;
use crate::types::Direction;

/// One data line of a replay log: `score_direction_food_head_tail`.
///
/// `score` is the board score after the tick, `direction` the heading the
/// snake moved in, `food` where the food sat when the tick started (empty
/// when there was none) and `head`/`tail` the ends of the body after the
/// tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickRecord {
    #[allow(missing_docs)]
    pub score: u32,
    #[allow(missing_docs)]
    pub direction: Option<Direction>,
    #[allow(missing_docs)]
    pub food: Option<Position>,
    #[allow(missing_docs)]
    pub head: Position,
    #[allow(missing_docs)]
    pub tail: Position,
}

impl fmt::Display for TickRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_", self.score)?;
        if let Some(d) = self.direction {
            write!(f, "{}", d)?;
        }
        write!(f, "_")?;
        if let Some(food) = self.food {
            write!(f, "{}", food)?;
        }
        write!(f, "_{}_{}", self.head, self.tail)
    }
}

/// The fields of a data line as the decoder sees them. Lines with fewer
/// than five fields carry no head/tail trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DataLine {
    pub(crate) direction: Option<Direction>,
    pub(crate) food: Option<Position>,
    pub(crate) record: Option<TickRecord>,
}

impl DataLine {
    /// `line` is the 1-based line number used in errors
    pub(crate) fn parse(text: &str, line: usize) -> Result<Self, ParseError> {
        let fields: Vec<&str> = text.split('_').collect();
        if !(3..=5).contains(&fields.len()) {
            return Err(ParseError::FieldCount {
                line,
                found: fields.len(),
            });
        }

        let score = fields[0]
            .trim()
            .parse::<u32>()
            .map_err(|_| ParseError::Score {
                line,
                value: fields[0].to_string(),
            })?;
        let direction = Direction::from_letter(fields[1].trim());
        let food = match fields[2].trim() {
            "" => None,
            token => Some(parse_coordinate(token, line)?),
        };
        let ends = fields[3..]
            .iter()
            .map(|token| parse_coordinate(token, line))
            .collect::<Result<Vec<_>, _>>()?;

        let record = match ends.as_slice() {
            [head, tail] => Some(TickRecord {
                score,
                direction,
                food,
                head: *head,
                tail: *tail,
            }),
            _ => None,
        };

        Ok(DataLine {
            direction,
            food,
            record,
        })
    }
}

fn parse_coordinate(token: &str, line: usize) -> Result<Position, ParseError> {
    token.trim().parse().map_err(|_| ParseError::Coordinate {
        line,
        value: token.to_string(),
    })
}
