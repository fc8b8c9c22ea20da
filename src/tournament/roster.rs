// Static team data for the world cup and the league

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    /// Three-letter scoreboard code
    pub code: String,
    pub primary_color: String,
    pub secondary_color: String,
}

impl Team {
    fn new(id: &str, name: &str, code: &str, primary: &str, secondary: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            code: code.to_string(),
            primary_color: primary.to_string(),
            secondary_color: secondary.to_string(),
        }
    }

    pub fn primary_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.primary_color).unwrap_or([255, 255, 255])
    }

    pub fn secondary_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.secondary_color).unwrap_or([255, 255, 255])
    }
}

/// Parse a `#RRGGBB` string
fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[derive(Debug, Clone)]
pub struct Roster {
    pub world_cup: Vec<Team>,
    pub league: Vec<Team>,
}

impl Default for Roster {
    fn default() -> Self {
        let world_cup = vec![
            Team::new("arg", "Argentina", "ARG", "#75AADB", "#FFFFFF"),
            Team::new("bra", "Brazil", "BRA", "#FFDF00", "#009C3B"),
            Team::new("fra", "France", "FRA", "#002395", "#FFFFFF"),
            Team::new("ger", "Germany", "GER", "#FFFFFF", "#000000"),
            Team::new("esp", "Spain", "ESP", "#AA151B", "#F1BF00"),
            Team::new("eng", "England", "ENG", "#FFFFFF", "#CE1124"),
            Team::new("ita", "Italy", "ITA", "#0064AA", "#FFFFFF"),
            Team::new("ned", "Netherlands", "NED", "#F36C21", "#FFFFFF"),
            Team::new("por", "Portugal", "POR", "#E42518", "#006600"),
            Team::new("bel", "Belgium", "BEL", "#E30613", "#FDF146"),
            Team::new("cro", "Croatia", "CRO", "#FFFFFF", "#FF0000"),
            Team::new("uru", "Uruguay", "URU", "#5BA4D4", "#000000"),
            Team::new("mex", "Mexico", "MEX", "#006847", "#FFFFFF"),
            Team::new("usa", "USA", "USA", "#3C3B6E", "#B22234"),
            Team::new("jpn", "Japan", "JPN", "#000555", "#FFFFFF"),
            Team::new("mar", "Morocco", "MAR", "#C1272D", "#006233"),
            Team::new("col", "Colombia", "COL", "#FCD116", "#003893"),
            Team::new("chi", "Chile", "CHI", "#D52B1E", "#0039A6"),
        ];
        let league = vec![
            Team::new("bar", "Barcelona", "BAR", "#A50044", "#004D98"),
            Team::new("rma", "Real Madrid", "RMA", "#FFFFFF", "#FEBE10"),
            Team::new("atl", "Atletico", "ATM", "#CB3524", "#FFFFFF"),
            Team::new("osa", "Osasuna", "OSA", "#B40526", "#172C59"),
            Team::new("lev", "Levante", "LEV", "#004996", "#A61A2E"),
            Team::new("elc", "Elche", "ELC", "#009540", "#FFFFFF"),
            Team::new("bet", "Betis", "BET", "#0BB363", "#FFFFFF"),
            Team::new("rso", "R. Sociedad", "RSO", "#0067B1", "#FFFFFF"),
            Team::new("sev", "Sevilla", "SEV", "#FFFFFF", "#D4001F"),
            Team::new("vil", "Villarreal", "VIL", "#F5E216", "#005187"),
        ];
        Self { world_cup, league }
    }
}

/// Which list of teams a competition draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    WorldCup,
    League,
}

impl Roster {
    pub fn pool(&self, pool: Pool) -> &[Team] {
        match pool {
            Pool::WorldCup => &self.world_cup,
            Pool::League => &self.league,
        }
    }

    pub fn find(&self, pool: Pool, id: &str) -> Option<&Team> {
        self.pool(pool).iter().find(|team| team.id == id)
    }

    /// Pick a random team whose id is not in `exclude`.
    ///
    /// Falls back to the whole pool if everything is excluded; `None` only for an
    /// empty pool.
    pub fn draw_opponent(&self, pool: Pool, exclude: &[&str], rng: &mut impl Rng) -> Option<Team> {
        let teams = self.pool(pool);
        let candidates: Vec<&Team> = teams
            .iter()
            .filter(|team| !exclude.contains(&team.id.as_str()))
            .collect();

        let picked = if candidates.is_empty() {
            teams.choose(rng)
        } else {
            candidates.choose(rng).copied()
        };
        picked.cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_roster_sizes() {
        let roster = Roster::default();
        assert_eq!(roster.world_cup.len(), 18);
        assert_eq!(roster.league.len(), 10);
        assert_eq!(roster.find(Pool::League, "sev").unwrap().code, "SEV");
        assert!(roster.find(Pool::WorldCup, "sev").is_none());
    }

    #[test]
    fn test_hex_colors() {
        let roster = Roster::default();
        assert_eq!(roster.find(Pool::WorldCup, "arg").unwrap().primary_rgb(), [0x75, 0xAA, 0xDB]);
        assert_eq!(parse_hex_color("#12"), None);
        assert_eq!(parse_hex_color("zzzzzz"), None);
    }

    #[test]
    fn test_draw_respects_exclusions() {
        let roster = Roster::default();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let team = roster.draw_opponent(Pool::WorldCup, &["arg", "bra"], &mut rng).unwrap();
            assert_ne!(team.id, "arg");
            assert_ne!(team.id, "bra");
        }
    }

    #[test]
    fn test_draw_falls_back_when_everything_excluded() {
        let roster = Roster::default();
        let mut rng = StdRng::seed_from_u64(5);
        let all: Vec<&str> = roster.league.iter().map(|team| team.id.as_str()).collect();
        assert!(roster.draw_opponent(Pool::League, &all, &mut rng).is_some());
    }
}
