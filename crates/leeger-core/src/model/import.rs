// Building a league record from loosely-typed JSON.
//
// Records often arrive from scrapers or hand-edited files, so every field's
// JSON type is checked explicitly and reported as a `StructuralError` rather
// than a generic deserialization failure. Keys are camelCase:
//
//   { "name": ..., "owners": [{ "id"?, "name" }],
//     "years": [{ "yearNumber", "teams": [{ "id"?, "ownerId", "name" }],
//                 "weeks": [{ "weekNumber", "isPlayoffWeek"?, "isChampionshipWeek"?,
//                             "matchups": [{ "teamAId", "teamBId", "teamAScore",
//                                            "teamBScore", "matchupType"? }] }] }] }
//
// Optional keys fall back to defaults when absent, but a key that is present
// with the wrong type (including `null`) is an error.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::{League, Matchup, MatchupType, Owner, OwnerId, Team, TeamId, Week, Year};
use crate::error::{RecordKind, StructuralError};

type Object = Map<String, Value>;

impl League {
    /// Parse and type-check a league record from JSON text.
    pub fn from_json_str(text: &str) -> Result<League, StructuralError> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            StructuralError::new(RecordKind::League, format!("League record is not valid JSON: {e}"))
        })?;
        league_from_json(&value)
    }
}

/// Type-check `value` and convert it into a `League`.
pub fn league_from_json(value: &Value) -> Result<League, StructuralError> {
    let obj = as_object(value, RecordKind::League, "League")?;
    let name = string_field(obj, "name", RecordKind::League, "League name")?;
    let owners = list_field(obj, "owners", RecordKind::League, "League owners")?
        .iter()
        .map(owner_from_json)
        .collect::<Result<Vec<_>, _>>()?;
    let years = list_field(obj, "years", RecordKind::League, "League years")?
        .iter()
        .map(year_from_json)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(League::new(name, owners, years))
}

fn owner_from_json(value: &Value) -> Result<Owner, StructuralError> {
    let obj = as_object(value, RecordKind::Owner, "Owner")?;
    let name = string_field(obj, "name", RecordKind::Owner, "Owner name")?;
    let id = match optional_string_field(obj, "id", RecordKind::Owner, "Owner id")? {
        Some(id) => OwnerId::from(id),
        None => OwnerId::generate(),
    };
    Ok(Owner { id, name })
}

fn year_from_json(value: &Value) -> Result<Year, StructuralError> {
    let obj = as_object(value, RecordKind::Year, "Year")?;
    let year_number = obj
        .get("yearNumber")
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| type_error(RecordKind::Year, "Year number", "int"))?;
    let teams = list_field(obj, "teams", RecordKind::Year, "Year teams")?
        .iter()
        .map(team_from_json)
        .collect::<Result<Vec<_>, _>>()?;
    let weeks = list_field(obj, "weeks", RecordKind::Year, "Year weeks")?
        .iter()
        .map(week_from_json)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Year::new(year_number, teams, weeks))
}

fn team_from_json(value: &Value) -> Result<Team, StructuralError> {
    let obj = as_object(value, RecordKind::Team, "Team")?;
    let owner_id = string_field(obj, "ownerId", RecordKind::Team, "Team ownerId")?;
    let name = string_field(obj, "name", RecordKind::Team, "Team name")?;
    let id = match optional_string_field(obj, "id", RecordKind::Team, "Team id")? {
        Some(id) => TeamId::from(id),
        None => TeamId::generate(),
    };
    Ok(Team {
        id,
        owner_id: OwnerId::from(owner_id),
        name,
    })
}

fn week_from_json(value: &Value) -> Result<Week, StructuralError> {
    let obj = as_object(value, RecordKind::Week, "Week")?;
    let week_number = obj
        .get("weekNumber")
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| type_error(RecordKind::Week, "Week number", "int"))?;
    let is_playoff_week = optional_bool_field(obj, "isPlayoffWeek", "Week isPlayoffWeek")?;
    let is_championship_week =
        optional_bool_field(obj, "isChampionshipWeek", "Week isChampionshipWeek")?;
    let matchups = list_field(obj, "matchups", RecordKind::Week, "Week matchups")?
        .iter()
        .map(matchup_from_json)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Week {
        week_number,
        is_playoff_week: is_playoff_week.unwrap_or(false),
        is_championship_week: is_championship_week.unwrap_or(false),
        matchups,
    })
}

fn matchup_from_json(value: &Value) -> Result<Matchup, StructuralError> {
    let kind = RecordKind::Matchup;
    let obj = as_object(value, kind, "Matchup")?;
    let team_a_id = string_field(obj, "teamAId", kind, "Matchup teamAId")?;
    let team_b_id = string_field(obj, "teamBId", kind, "Matchup teamBId")?;
    let team_a_score = score_field(obj, "teamAScore", "Matchup teamAScore")?;
    let team_b_score = score_field(obj, "teamBScore", "Matchup teamBScore")?;
    let matchup_type = match optional_string_field(obj, "matchupType", kind, "Matchup matchupType")? {
        Some(raw) => raw
            .parse::<MatchupType>()
            .map_err(|e| StructuralError::new(kind, format!("Matchup matchupType is invalid: {e}.")))?,
        None => MatchupType::Regular,
    };
    Ok(Matchup {
        team_a_id: TeamId::from(team_a_id),
        team_b_id: TeamId::from(team_b_id),
        team_a_score,
        team_b_score,
        matchup_type,
    })
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn type_error(kind: RecordKind, what: &str, expected: &str) -> StructuralError {
    StructuralError::new(kind, format!("{what} must be type '{expected}'."))
}

fn as_object<'v>(value: &'v Value, kind: RecordKind, what: &str) -> Result<&'v Object, StructuralError> {
    value.as_object().ok_or_else(|| type_error(kind, what, "object"))
}

fn string_field(obj: &Object, key: &str, kind: RecordKind, what: &str) -> Result<String, StructuralError> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| type_error(kind, what, "str"))
}

fn optional_string_field(
    obj: &Object,
    key: &str,
    kind: RecordKind,
    what: &str,
) -> Result<Option<String>, StructuralError> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(type_error(kind, what, "str")),
    }
}

fn optional_bool_field(obj: &Object, key: &str, what: &str) -> Result<Option<bool>, StructuralError> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(type_error(RecordKind::Week, what, "bool")),
    }
}

fn list_field<'v>(
    obj: &'v Object,
    key: &str,
    kind: RecordKind,
    what: &str,
) -> Result<&'v Vec<Value>, StructuralError> {
    obj.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| type_error(kind, what, "list"))
}

/// Scores are read through their decimal text so `1.1` stays exactly 1.1.
fn score_field(obj: &Object, key: &str, what: &str) -> Result<Decimal, StructuralError> {
    let Some(Value::Number(n)) = obj.get(key) else {
        return Err(type_error(RecordKind::Matchup, what, "number"));
    };
    let text = n.to_string();
    Decimal::from_str_exact(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| {
            StructuralError::new(RecordKind::Matchup, format!("{what} {text} is out of range."))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn two_team_league() -> Value {
        json!({
            "name": "TEST",
            "owners": [{ "id": "o1", "name": "1" }, { "id": "o2", "name": "2" }],
            "years": [{
                "yearNumber": 2000,
                "teams": [
                    { "id": "t1", "ownerId": "o1", "name": "1" },
                    { "id": "t2", "ownerId": "o2", "name": "2" }
                ],
                "weeks": [{
                    "weekNumber": 1,
                    "matchups": [{ "teamAId": "t1", "teamBId": "t2", "teamAScore": 1.1, "teamBScore": 2 }]
                }]
            }]
        })
    }

    fn expect_error(value: Value) -> StructuralError {
        league_from_json(&value).expect_err("record should be rejected")
    }

    #[test]
    fn parses_valid_record_with_defaults() {
        let league = league_from_json(&two_team_league()).unwrap();
        assert_eq!(league.name, "TEST");
        assert_eq!(league.owners[0].id, OwnerId::from("o1"));
        let year = &league.years[0];
        assert_eq!(year.year_number, 2000);
        let week = &year.weeks[0];
        assert!(!week.is_playoff_week);
        assert!(!week.is_championship_week);
        let m = &week.matchups[0];
        assert_eq!(m.team_a_score, dec!(1.1));
        assert_eq!(m.team_b_score, dec!(2));
        assert_eq!(m.matchup_type, MatchupType::Regular);
    }

    #[test]
    fn missing_ids_are_generated() {
        let mut value = two_team_league();
        value["owners"][0].as_object_mut().unwrap().remove("id");
        let league = league_from_json(&value).unwrap();
        assert!(!league.owners[0].id.as_str().is_empty());
        assert_ne!(league.owners[0].id, OwnerId::from("o1"));
    }

    #[test]
    fn year_number_must_be_int() {
        let mut value = two_team_league();
        value["years"][0]["yearNumber"] = Value::Null;
        let err = expect_error(value);
        assert_eq!(err.kind, RecordKind::Year);
        assert_eq!(err.to_string(), "Year number must be type 'int'.");
    }

    #[test]
    fn year_teams_and_weeks_must_be_lists() {
        let mut value = two_team_league();
        value["years"][0]["teams"] = Value::Null;
        assert_eq!(expect_error(value).to_string(), "Year teams must be type 'list'.");

        let mut value = two_team_league();
        value["years"][0]["weeks"] = json!({});
        assert_eq!(expect_error(value).to_string(), "Year weeks must be type 'list'.");
    }

    #[test]
    fn week_fields_are_type_checked() {
        let mut value = two_team_league();
        value["years"][0]["weeks"][0]["weekNumber"] = json!("1");
        assert_eq!(expect_error(value).to_string(), "Week number must be type 'int'.");

        let mut value = two_team_league();
        value["years"][0]["weeks"][0]["isPlayoffWeek"] = Value::Null;
        assert_eq!(
            expect_error(value).to_string(),
            "Week isPlayoffWeek must be type 'bool'."
        );

        let mut value = two_team_league();
        value["years"][0]["weeks"][0]["isChampionshipWeek"] = json!(1);
        assert_eq!(
            expect_error(value).to_string(),
            "Week isChampionshipWeek must be type 'bool'."
        );

        let mut value = two_team_league();
        value["years"][0]["weeks"][0]["matchups"] = Value::Null;
        let err = expect_error(value);
        assert_eq!(err.kind, RecordKind::Week);
        assert_eq!(err.to_string(), "Week matchups must be type 'list'.");
    }

    #[test]
    fn matchup_fields_are_type_checked() {
        let mut value = two_team_league();
        value["years"][0]["weeks"][0]["matchups"][0]["teamAScore"] = json!("1.1");
        let err = expect_error(value);
        assert_eq!(err.kind, RecordKind::Matchup);
        assert_eq!(err.to_string(), "Matchup teamAScore must be type 'number'.");

        let mut value = two_team_league();
        value["years"][0]["weeks"][0]["matchups"][0]["matchupType"] = json!("BYE");
        assert!(expect_error(value).to_string().contains("matchupType is invalid"));
    }

    #[test]
    fn league_and_owner_fields_are_type_checked() {
        let mut value = two_team_league();
        value["name"] = json!(5);
        assert_eq!(expect_error(value).to_string(), "League name must be type 'str'.");

        let mut value = two_team_league();
        value["owners"][1]["name"] = Value::Null;
        let err = expect_error(value);
        assert_eq!(err.kind, RecordKind::Owner);
        assert_eq!(err.to_string(), "Owner name must be type 'str'.");

        let mut value = two_team_league();
        value["years"][0]["teams"][0]["ownerId"] = json!(7);
        assert_eq!(expect_error(value).to_string(), "Team ownerId must be type 'str'.");
    }

    #[test]
    fn invalid_json_text_is_a_league_error() {
        let err = League::from_json_str("{ not json").unwrap_err();
        assert_eq!(err.kind, RecordKind::League);
        assert!(err.message.starts_with("League record is not valid JSON"));
    }
}
