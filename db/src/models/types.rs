use std::fmt;
use std::io::Write;
use std::str::FromStr;

use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};

#[derive(AsExpression, Clone, Copy, Debug, Deserialize, Eq, FromSqlRow, Hash, PartialEq, Serialize)]
#[sql_type = "Text"]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Technical,
    Behavioral,
}

#[derive(AsExpression, Clone, Copy, Debug, Deserialize, Eq, FromSqlRow, Hash, PartialEq, Serialize)]
#[sql_type = "Text"]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Technical => "technical",
            QuestionType::Behavioral => "behavioral",
        }
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "technical" => Ok(QuestionType::Technical),
            "behavioral" => Ok(QuestionType::Behavioral),
            other => Err(format!("Unknown question type: {}", other)),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

impl ToSql<Text, Pg> for QuestionType {
    fn to_sql<W: Write>(&self, out: &mut Output<W, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for QuestionType {
    fn from_sql(bytes: Option<&[u8]>) -> deserialize::Result<Self> {
        let value = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        value.parse().map_err(Into::into)
    }
}

impl ToSql<Text, Pg> for Difficulty {
    fn to_sql<W: Write>(&self, out: &mut Output<W, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for Difficulty {
    fn from_sql(bytes: Option<&[u8]>) -> deserialize::Result<Self> {
        let value = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        value.parse().map_err(Into::into)
    }
}

/// Job titles are compared case-insensitively, so they are stored and
/// filtered in this form.
pub fn normalize_job_title(job_title: &str) -> String {
    job_title.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{normalize_job_title, Difficulty, QuestionType};

    #[test]
    fn normalizes_job_titles() {
        assert_eq!(normalize_job_title("  Backend Engineer "), "backend engineer");
        assert_eq!(normalize_job_title("SRE"), "sre");
    }

    #[test]
    fn parses_known_variants_only() {
        assert_eq!("technical".parse::<QuestionType>(), Ok(QuestionType::Technical));
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("Technical".parse::<QuestionType>().is_err());
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let value = serde_json::to_string(&QuestionType::Behavioral).unwrap();
        assert_eq!(value, "\"behavioral\"");

        let value: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(value, Difficulty::Easy);
    }

    #[test]
    fn medium_is_the_default_difficulty() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }
}
