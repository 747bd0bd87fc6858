//! Market-related types decoded from the Gamma listing API.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::orderbook::parse_price;

/// A market as returned by the Gamma `/markets` listing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Market {
    /// Market question text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    /// CLOB token IDs, JSON-encoded as a string (e.g. `"[\"123\", \"456\"]"`).
    #[serde(default, rename = "clobTokenIds")]
    pub clob_token_ids: Option<String>,
    /// 24-hour traded volume. The API sends either a string or a number.
    #[serde(default, rename = "volume24hr", deserialize_with = "deserialize_volume")]
    pub volume_24hr: Decimal,
    /// Whether the market is closed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub closed: bool,
    /// Whether the market is active.
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
}

impl Market {
    /// Decode the embedded token id list.
    ///
    /// A missing or empty field yields an empty list.
    pub fn token_ids(&self) -> Result<Vec<String>, serde_json::Error> {
        match self.clob_token_ids.as_deref().map(str::trim) {
            None | Some("") => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(raw),
        }
    }

    /// Token id of the first ("yes") outcome, if the list decodes and is non-empty.
    pub fn yes_token_id(&self) -> Option<String> {
        self.token_ids().ok()?.into_iter().next()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Accept volume as a JSON number, a numeric or scientific string, or null. Anything
/// unparseable counts as zero volume.
fn deserialize_volume<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    let volume = match raw {
        Some(NumberOrString::Number(n)) => Decimal::try_from(n).unwrap_or_default(),
        Some(NumberOrString::Text(s)) => parse_price(&s).unwrap_or_default(),
        None => Decimal::ZERO,
    };
    Ok(volume)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
