use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

/// What a measurement point physically is, which determines the counters it carries.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum AssetType {
    /// Fixed-speed pump behind a soft starter: energy and connection hours.
    #[serde(rename = "SS")]
    Ss,

    /// Pump behind a variable-frequency drive: energy, connection and run hours.
    #[serde(rename = "VDF")]
    Vdf,

    /// Flow totalizer: volume only.
    #[serde(rename = "FIT")]
    Fit,
}

impl AssetType {
    pub const fn tracks_energy(self) -> bool {
        matches!(self, Self::Ss | Self::Vdf)
    }

    pub const fn tracks_volume(self) -> bool {
        matches!(self, Self::Fit)
    }

    pub const fn tracks_connection_hours(self) -> bool {
        self.tracks_energy()
    }

    /// Run-hour counters only exist on drives that report actual motor time.
    pub const fn tracks_run_hours(self) -> bool {
        matches!(self, Self::Vdf)
    }
}

impl Display for AssetType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ss => write!(f, "SS"),
            Self::Vdf => write!(f, "VDF"),
            Self::Fit => write!(f, "FIT"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize, derive_more::Constructor)]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AssetType,
}

/// A named group of assets measured together, for selection scoping only —
/// grouping never changes the derivation math.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize, derive_more::Constructor)]
pub struct ExtractionPoint {
    pub id: String,
    pub name: String,
    pub assets: Vec<Asset>,
}

/// The ordered site configuration: extraction points with their typed assets.
#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Deserialize,
    Serialize,
    derive_more::From,
    derive_more::IntoIterator,
)]
pub struct Config(pub Vec<ExtractionPoint>);

impl Config {
    /// Id-to-asset mapping, built once per configuration snapshot so lookups
    /// stay cheap regardless of configuration size.
    #[must_use]
    pub fn asset_index(&self) -> HashMap<&str, &Asset> {
        self.0
            .iter()
            .flat_map(|point| &point.assets)
            .map(|asset| (asset.id.as_str(), asset))
            .collect()
    }

    #[must_use]
    pub fn all_asset_ids(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|point| &point.assets)
            .map(|asset| asset.id.clone())
            .collect()
    }

    /// Expand a dashboard filter into a concrete selection: an extraction-point
    /// id becomes its member assets, anything else is taken as a single asset id.
    #[must_use]
    pub fn expand(&self, filter: &str) -> Selection {
        match self.0.iter().find(|point| point.id == filter) {
            Some(point) => {
                Selection::Assets(point.assets.iter().map(|asset| asset.id.clone()).collect())
            }
            None => Selection::Assets(vec![filter.to_owned()]),
        }
    }

    /// The seeded configuration a fresh installation starts from.
    #[must_use]
    pub fn default_site() -> Self {
        Self(vec![
            ExtractionPoint::new(
                "pe_tbo_3".to_owned(),
                "TBO 3 (Planta Química)".to_owned(),
                vec![
                    Asset::new("b_tbo_3".to_owned(), "Bomba TBO 3".to_owned(), AssetType::Vdf),
                    Asset::new("fit_tbo_3".to_owned(), "FIT TBO 3".to_owned(), AssetType::Fit),
                ],
            ),
            ExtractionPoint::new(
                "pe_tbo_4_5".to_owned(),
                "TBO 4/5 (Planta Química)".to_owned(),
                vec![
                    Asset::new("b_tbo_4".to_owned(), "Bomba TBO 4".to_owned(), AssetType::Vdf),
                    Asset::new("b_tbo_5".to_owned(), "Bomba TBO 5".to_owned(), AssetType::Vdf),
                    Asset::new("fit_tbo_4_5".to_owned(), "FIT TBO 4/5".to_owned(), AssetType::Fit),
                ],
            ),
            ExtractionPoint::new(
                "pe_42_50".to_owned(),
                "Pilas 42/50".to_owned(),
                vec![
                    Asset::new("b_42".to_owned(), "Bomba Pila 42".to_owned(), AssetType::Ss),
                    Asset::new("b_50".to_owned(), "Bomba Pila 50".to_owned(), AssetType::Ss),
                    Asset::new("fit_42_50".to_owned(), "FIT 42/50".to_owned(), AssetType::Fit),
                ],
            ),
            ExtractionPoint::new(
                "pe_64".to_owned(),
                "Pila 64".to_owned(),
                vec![
                    Asset::new("b_64".to_owned(), "Bomba Pila 64".to_owned(), AssetType::Ss),
                    Asset::new("fit_64".to_owned(), "FIT 64".to_owned(), AssetType::Fit),
                ],
            ),
            ExtractionPoint::new(
                "pe_osmosis".to_owned(),
                "Osmosis / Ingreso BES".to_owned(),
                vec![Asset::new(
                    "fit_bes_in".to_owned(),
                    "FIT Ingreso BES".to_owned(),
                    AssetType::Fit,
                )],
            ),
        ])
    }
}

/// Which assets an aggregation covers. The engine takes the list already
/// expanded — resolving group ids against the configuration is [`Config::expand`]'s job.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Selection {
    #[default]
    All,
    Assets(Vec<String>),
}

impl Selection {
    #[must_use]
    pub fn includes(&self, asset_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Assets(ids) => ids.iter().any(|id| id == asset_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_group() {
        let config = Config::default_site();
        let Selection::Assets(ids) = config.expand("pe_tbo_4_5") else {
            panic!("expected an explicit asset list");
        };
        assert_eq!(ids, ["b_tbo_4", "b_tbo_5", "fit_tbo_4_5"]);
    }

    #[test]
    fn test_expand_falls_back_to_single_asset() {
        let config = Config::default_site();
        assert_eq!(config.expand("b_64"), Selection::Assets(vec!["b_64".to_owned()]));
        assert_eq!(config.expand("ghost"), Selection::Assets(vec!["ghost".to_owned()]));
    }

    #[test]
    fn test_all_includes_unknown_assets() {
        assert!(Selection::All.includes("ghost"));
        assert!(!Selection::Assets(vec!["b_64".to_owned()]).includes("ghost"));
    }

    #[test]
    fn test_asset_index() {
        let config = Config::default_site();
        let index = config.asset_index();
        assert_eq!(index.len(), config.all_asset_ids().len());
        assert_eq!(index["fit_64"].kind, AssetType::Fit);
        assert!(!index.contains_key("ghost"));
    }

    #[test]
    fn test_asset_type_serde_names() {
        let json = serde_json::to_string(&AssetType::Vdf).unwrap();
        assert_eq!(json, r#""VDF""#);
        let kind: AssetType = serde_json::from_str(r#""FIT""#).unwrap();
        assert_eq!(kind, AssetType::Fit);
    }
}
