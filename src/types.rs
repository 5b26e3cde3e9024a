use std::fmt;

use serde::de::Deserializer;
use serde::Deserialize;
use serde_json::Value;

fn vec_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let opt = Option::<T>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Scalar>::deserialize(deserializer)?;
    Ok(opt.map(|s| s.to_string()).unwrap_or_default())
}

/// A sheet-backed cell. The feed sends prices and counts either as JSON
/// numbers or as preformatted strings, and both are shown as sent. Empty
/// sheet cells can also arrive as `null` or `false`, so decoding never fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(v) => Scalar::Int(v),
                None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Scalar::Text(s),
            other => Scalar::Text(other.to_string()),
        })
    }
}

impl Scalar {
    /// Null, `false`, empty text and numeric zero count as missing, like a
    /// falsy cell.
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Bool(b) => !b,
            Scalar::Int(v) => *v == 0,
            Scalar::Float(v) => *v == 0.0 || v.is_nan(),
            Scalar::Text(s) => s.trim().is_empty(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Null | Scalar::Bool(_) => None,
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            Scalar::Text(s) => {
                let digits: String = s
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                    .collect();
                digits.parse::<f64>().ok()
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.0}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

/// Returns the cell when present and not blank.
pub fn filled(cell: &Option<Scalar>) -> Option<&Scalar> {
    cell.as_ref().filter(|s| !s.is_blank())
}

/// Full auction state as served by the endpoint. Fetched fresh every cycle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(deserialize_with = "null_as_default")]
    pub landing_page_data: LandingPageData,
    #[serde(default)]
    pub dashboard_data: Option<DashboardData>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    pub fixtures_data: Vec<Fixture>,
    #[serde(deserialize_with = "vec_or_empty")]
    pub teams_data: Vec<Team>,
    #[serde(deserialize_with = "vec_or_empty")]
    pub players_data: Vec<Player>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageData {
    #[serde(default)]
    pub active_player: Option<ActivePlayer>,
    #[serde(default, deserialize_with = "vec_or_empty")]
    pub top_buys: Vec<TopBuy>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePlayer {
    #[serde(deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub category: String,
    #[serde(default)]
    pub base_price: Scalar,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopBuy {
    #[serde(deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub category: String,
    #[serde(default)]
    pub winning_price: Scalar,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub category: String,
    #[serde(default)]
    pub base_price: Scalar,
    #[serde(default)]
    pub status: Option<Scalar>,
    #[serde(default)]
    pub winning_price: Option<Scalar>,
    #[serde(default)]
    pub winning_team: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPlayer {
    #[serde(deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub category: String,
    #[serde(default, alias = "winningPrice")]
    pub price: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default)]
    pub budget_remaining: Scalar,
    #[serde(default)]
    pub players_bought_count: Scalar,
    #[serde(default, deserialize_with = "vec_or_empty")]
    pub roster: Vec<RosterPlayer>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(deserialize_with = "string_or_empty")]
    pub tournament: String,
    #[serde(default)]
    pub match_num: Scalar,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub team1: String,
    #[serde(default)]
    pub team2: Option<Scalar>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub time_venue: String,
    #[serde(default)]
    pub winner: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default, deserialize_with = "vec_or_empty")]
    pub team_budgets: Vec<TeamBudget>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_stats: PlayerStats,
    #[serde(default)]
    pub starting_budget: Scalar,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamBudget {
    #[serde(deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default)]
    pub remaining: Scalar,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayerStats {
    #[serde(default)]
    pub sold: Scalar,
    #[serde(default)]
    pub unsold: Scalar,
    #[serde(default)]
    pub active: Scalar,
    #[serde(default)]
    pub upcoming: Scalar,
}

/// Truthiness of a loosely typed JSON value, as the feed's `error` flag uses it.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl Snapshot {
    /// The backend-reported error, if the snapshot carries a truthy one.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().filter(|v| is_truthy(v)).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_render_as_sent() {
        assert_eq!(Scalar::Int(450).to_string(), "450");
        assert_eq!(Scalar::Float(450.0).to_string(), "450");
        assert_eq!(Scalar::Float(12.5).to_string(), "12.5");
        assert_eq!(Scalar::from("₹1,200").to_string(), "₹1,200");
    }

    #[test]
    fn blank_scalars_match_falsy_cells() {
        assert!(Scalar::Int(0).is_blank());
        assert!(Scalar::from("  ").is_blank());
        assert!(!Scalar::from("0 pts").is_blank());
        assert!(filled(&None).is_none());
        assert!(filled(&Some(Scalar::from(""))).is_none());
        assert_eq!(filled(&Some(Scalar::Int(5))), Some(&Scalar::Int(5)));
    }

    #[test]
    fn text_amounts_parse_as_numbers() {
        assert_eq!(Scalar::from("₹1,200").as_f64(), Some(1200.0));
        assert_eq!(Scalar::from("n/a").as_f64(), None);
    }

    #[test]
    fn null_arrays_decode_as_empty() {
        let snap: Snapshot = serde_json::from_value(json!({
            "landingPageData": { "topBuys": null },
            "fixturesData": null,
            "teamsData": [],
            "playersData": null
        }))
        .unwrap();
        assert!(snap.landing_page_data.top_buys.is_empty());
        assert!(snap.fixtures_data.is_empty());
        assert!(snap.players_data.is_empty());
        assert!(snap.dashboard_data.is_none());
        assert!(snap.error_message().is_none());
    }

    #[test]
    fn roster_accepts_price_or_winning_price() {
        let a: RosterPlayer =
            serde_json::from_value(json!({"name": "A", "category": "Bat", "price": 300})).unwrap();
        let b: RosterPlayer =
            serde_json::from_value(json!({"name": "B", "category": "Bowl", "winningPrice": "250"}))
                .unwrap();
        assert_eq!(a.price, Some(Scalar::Int(300)));
        assert_eq!(b.price, Some(Scalar::from("250")));
    }

    #[test]
    fn numeric_names_are_kept_as_text() {
        let f: Fixture = serde_json::from_value(json!({
            "tournament": "Chess", "matchNum": 3, "team1": 7, "timeVenue": "Hall"
        }))
        .unwrap();
        assert_eq!(f.team1, "7");
        assert!(f.team2.is_none());
        assert!(f.winner.is_none());
    }

    #[test]
    fn null_and_bool_cells_decode() {
        let cells: Vec<Scalar> =
            serde_json::from_value(json!([null, false, true, 7, 2.5, "x", [1]])).unwrap();
        assert_eq!(cells[0], Scalar::Null);
        assert_eq!(cells[1], Scalar::Bool(false));
        assert!(cells[0].is_blank());
        assert!(cells[1].is_blank());
        assert!(!cells[2].is_blank());
        assert_eq!(cells[0].to_string(), "");
        assert_eq!(cells[1].as_f64(), None);
        assert_eq!(cells[6], Scalar::from("[1]"));
    }

    #[test]
    fn odd_cells_do_not_reject_the_snapshot() {
        let snap: Snapshot = serde_json::from_value(json!({
            "landingPageData": {
                "activePlayer": { "name": "C. Ali", "category": "All-rounder", "basePrice": null },
                "topBuys": []
            },
            "dashboardData": { "teamBudgets": [], "playerStats": null, "startingBudget": false },
            "fixturesData": [
                { "tournament": "Cricket", "matchNum": 1, "team1": "Red", "team2": false, "timeVenue": "5pm", "winner": false }
            ],
            "teamsData": [
                { "name": "Hawks", "budgetRemaining": null, "playersBoughtCount": false, "roster": [] }
            ],
            "playersData": [
                { "name": "B. Khan", "category": "Bowler", "basePrice": 80, "status": 0, "winningPrice": false, "winningTeam": null }
            ]
        }))
        .unwrap();

        let active = snap.landing_page_data.active_player.as_ref().unwrap();
        assert_eq!(active.base_price, Scalar::Null);
        let dash = snap.dashboard_data.as_ref().unwrap();
        assert_eq!(dash.player_stats, PlayerStats::default());
        assert!(filled(&snap.fixtures_data[0].winner).is_none());
        assert!(filled(&snap.fixtures_data[0].team2).is_none());
        let p = &snap.players_data[0];
        assert!(filled(&p.status).is_none());
        assert!(filled(&p.winning_price).is_none());
        assert!(filled(&p.winning_team).is_none());
    }

    #[test]
    fn null_landing_slice_decodes_as_empty() {
        let snap: Snapshot = serde_json::from_value(json!({
            "landingPageData": null, "teamsData": [], "playersData": []
        }))
        .unwrap();
        assert_eq!(snap.landing_page_data, LandingPageData::default());
    }

    #[test]
    fn missing_landing_slice_is_rejected() {
        let res = serde_json::from_value::<Snapshot>(json!({ "teamsData": [], "playersData": [] }));
        assert!(res.is_err());
    }

    #[test]
    fn error_truthiness() {
        assert!(is_truthy(&json!("Sheet locked")));
        assert!(is_truthy(&json!(true)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&Value::Null));
    }
}
