use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of the HTTP transaction a path belongs to
///
/// Incoming and outgoing paths are normalized by the same pipeline but
/// each direction has its own list of mapping rules.
///
/// # Examples
///
/// ```
/// use resource_uri::Direction;
///
/// let direction: Direction = "incoming".parse().unwrap();
/// assert_eq!(direction, Direction::Incoming);
/// assert_eq!(Direction::Outgoing.to_string(), "outgoing");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Request received by this process (server side)
    Incoming,
    /// Request issued by this process (client side)
    Outgoing,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Incoming => "incoming",
            Direction::Outgoing => "outgoing",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "incoming" | "in" | "server" => Ok(Direction::Incoming),
            "outgoing" | "out" | "client" => Ok(Direction::Outgoing),
            other => Err(format!(
                "Invalid direction '{}'. Use 'incoming' or 'outgoing'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction() {
        assert_eq!("incoming".parse::<Direction>(), Ok(Direction::Incoming));
        assert_eq!(" Server ".parse::<Direction>(), Ok(Direction::Incoming));
        assert_eq!("OUT".parse::<Direction>(), Ok(Direction::Outgoing));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for direction in [Direction::Incoming, Direction::Outgoing] {
            assert_eq!(direction.to_string().parse::<Direction>(), Ok(direction));
        }
    }
}
