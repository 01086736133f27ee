//! 难度等级：搜索深度和时间预算

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    /// 深度 2，偶尔随机走棋
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// 迭代加深的最大深度
    pub fn max_depth(&self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
            Difficulty::Expert => 5,
        }
    }

    /// 单次搜索的时间预算
    pub fn time_limit(&self) -> Duration {
        let ms = match self {
            Difficulty::Easy => 1000,
            Difficulty::Medium => 2000,
            Difficulty::Hard => 5000,
            Difficulty::Expert => 10000,
        };
        Duration::from_millis(ms)
    }

    /// 是否会以一定概率改走随机走法
    pub fn allows_random_move(&self) -> bool {
        *self == Difficulty::Easy
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(format!(
                "Unknown difficulty: {}. Available: easy, medium, hard, expert",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_and_time_table() {
        let table: Vec<(u32, u64)> = Difficulty::ALL
            .iter()
            .map(|d| (d.max_depth(), d.time_limit().as_millis() as u64))
            .collect();
        assert_eq!(table, vec![(2, 1000), (3, 2000), (4, 5000), (5, 10000)]);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" EXPERT ".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert!("impossible".parse::<Difficulty>().is_err());
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
        }
    }

    #[test]
    fn test_only_easy_is_random() {
        assert!(Difficulty::Easy.allows_random_move());
        assert!(!Difficulty::Expert.allows_random_move());
    }
}
